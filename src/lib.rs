//! Hitbox editing core: an ordered hitbox store with gap-filling ids, a
//! single-session drag controller, enter/exit animation bookkeeping and the
//! detail panel binding, plus the image session and configuration used by
//! the desktop shell.

pub mod animation;
pub mod config;
pub mod drag;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod hitbox;
pub mod panel;
pub mod session;
pub mod store;
pub mod view;

pub use animation::{LifecycleAnimator, Phase};
pub use config::EditorConfig;
pub use drag::{DragController, DragKind};
pub use editor::EditorState;
pub use error::{ConfigError, LoadError};
pub use geometry::{ContainerFrame, Point};
pub use hitbox::{Hitbox, HitboxField, HitboxId};
pub use panel::DetailPanel;
pub use session::{ImageSession, OpenOutcome};
pub use store::HitboxStore;
pub use view::ViewSettings;
