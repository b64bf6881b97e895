//! Application state owned by the top-level controller.
//!
//! Every interaction goes through `EditorState`, which keeps the store, the
//! animator, the drag controller and the panel consistent with each other.
//! Time is a monotonic `Duration` supplied by the caller.

use std::time::Duration;

use crate::animation::LifecycleAnimator;
use crate::config::EditorConfig;
use crate::drag::{DragController, DragKind, DragTargets};
use crate::geometry::{ContainerFrame, Point};
use crate::hitbox::{Hitbox, HitboxField, HitboxId};
use crate::panel::DetailPanel;
use crate::store::HitboxStore;

pub struct EditorState {
    store: HitboxStore,
    animator: LifecycleAnimator,
    drag: DragController,
    panel: DetailPanel,
    panel_origin: Point,
    field_step: i32,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            store: HitboxStore::new(config.placement, config.limits),
            animator: LifecycleAnimator::new(config.animation_window()),
            drag: DragController::new(),
            panel: DetailPanel::new(),
            panel_origin: config.panel_origin,
            field_step: config.field_step,
        }
    }

    pub fn store(&self) -> &HitboxStore {
        &self.store
    }

    pub fn animator(&self) -> &LifecycleAnimator {
        &self.animator
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn panel(&self) -> &DetailPanel {
        &self.panel
    }

    /// Window-space top-left of the detail panel.
    pub fn panel_origin(&self) -> Point {
        self.panel_origin
    }

    pub fn field_step(&self) -> i32 {
        self.field_step
    }

    // ── Lifecycle ───────────────────────────────────────────────────────────

    pub fn add_hitbox(&mut self, now: Duration) -> Hitbox {
        let hitbox = self.store.create();
        self.animator.begin_enter(hitbox.id(), now);
        hitbox
    }

    /// Starts the exit animation for `id`; the store keeps it until the
    /// window elapses. Returns false if `id` is absent or already exiting.
    pub fn remove_hitbox(&mut self, id: HitboxId, now: Duration) -> bool {
        if !self.store.contains(id) {
            log::debug!("remove of unknown hitbox {}", id);
            return false;
        }
        self.animator.begin_exit(id, now)
    }

    /// Removes every hitbox immediately and resets the placement cursor.
    pub fn remove_all(&mut self) {
        log::debug!("removing all {} hitbox(es)", self.store.len());
        self.store.clear();
        self.animator.reset();
        if matches!(self.drag.kind(), Some(DragKind::Hitbox(_))) {
            self.drag.stop();
        }
    }

    /// Fires deferred actions due at `now`. Returns ids whose removal was
    /// committed.
    pub fn tick(&mut self, now: Duration) -> Vec<HitboxId> {
        let removed = self.animator.tick(now, &mut self.store);
        if let Some(DragKind::Hitbox(id)) = self.drag.kind() {
            if removed.contains(&id) {
                self.drag.stop();
            }
        }
        removed
    }

    // ── Pointer ─────────────────────────────────────────────────────────────

    pub fn pointer_down_on_panel(&mut self, pointer: Point) -> bool {
        self.drag.begin_panel(pointer, self.panel_origin)
    }

    /// `frame` is the container placement measured right now.
    pub fn pointer_down_on_hitbox(&mut self, id: HitboxId, pointer: Point, frame: ContainerFrame) -> bool {
        self.drag.begin_hitbox(id, pointer, frame, &self.store)
    }

    pub fn pointer_moved(&mut self, pointer: Point) -> bool {
        self.drag.pointer_moved(
            pointer,
            DragTargets {
                store: &mut self.store,
                panel: &mut self.panel_origin,
            },
        )
    }

    pub fn pointer_up(&mut self) -> Option<DragKind> {
        self.drag.pointer_released()
    }

    pub fn stop_drag(&mut self) -> Option<DragKind> {
        self.drag.stop()
    }

    // ── Detail panel ────────────────────────────────────────────────────────

    pub fn select(&mut self, id: HitboxId) {
        self.panel.open(id);
    }

    /// Closing the panel also ends a panel drag in progress.
    pub fn close_panel(&mut self) {
        if self.drag.is_dragging_panel() {
            self.drag.stop();
        }
        self.panel.close();
    }

    pub fn field_value(&self, field: HitboxField) -> i32 {
        self.panel.field_value(field, &self.store)
    }

    pub fn set_field(&mut self, field: HitboxField, raw: &str) -> bool {
        self.panel.set_field(field, raw, &mut self.store)
    }

    /// One field-step up (`+1`) or down (`-1`).
    pub fn step_field(&mut self, field: HitboxField, direction: i32) -> bool {
        let delta = direction.signum() * self.field_step;
        self.panel.step_field(field, delta, &mut self.store)
    }

    pub fn reset_field(&mut self, field: HitboxField) -> bool {
        self.panel.reset_field(field, &mut self.store)
    }

    /// Resets the placement used for future hitboxes. The open hitbox keeps
    /// its current fields; [`EditorState::reset_field`] handles those.
    pub fn reset_placement(&mut self) {
        self.store.reset_cursor();
    }

    /// Deletes the hitbox open in the panel, animated.
    pub fn remove_open(&mut self, now: Duration) -> bool {
        match self.panel.open_id() {
            Some(id) => self.remove_hitbox(id, now),
            None => false,
        }
    }
}
