//! Single-session drag state machine shared by the detail panel and hitboxes.
//!
//! `Idle -> DraggingPanel | DraggingHitbox(id) -> Idle`. A session can only
//! start from idle, so at most one target is ever being dragged. Entering a
//! session attaches the global pointer capture and every way out detaches
//! it again.

use crate::geometry::{self, ContainerFrame, Offset, Point};
use crate::hitbox::HitboxId;
use crate::store::HitboxStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    Panel,
    Hitbox(HitboxId),
}

/// Routing of pointer move/up events that happen anywhere in the window,
/// not just over the element that started the drag.
#[derive(Clone, Debug, Default)]
pub struct PointerCapture {
    target: Option<DragKind>,
    attached: u64,
    detached: u64,
}

impl PointerCapture {
    fn attach(&mut self, kind: DragKind) {
        debug_assert!(self.target.is_none(), "pointer capture attached twice");
        self.target = Some(kind);
        self.attached += 1;
    }

    fn detach(&mut self) {
        if self.target.take().is_some() {
            self.detached += 1;
        }
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<DragKind> {
        self.target
    }

    /// Attach and detach counts since creation.
    pub fn balance(&self) -> (u64, u64) {
        (self.attached, self.detached)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub kind: DragKind,
    /// Captured once at pointer-down; never recomputed mid-drag.
    pub offset: Offset,
    /// Container placement measured when the session began.
    pub frame: ContainerFrame,
}

/// Mutable state a drag may move.
pub struct DragTargets<'a> {
    pub store: &'a mut HitboxStore,
    pub panel: &'a mut Point,
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    capture: PointerCapture,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn kind(&self) -> Option<DragKind> {
        self.session.map(|s| s.kind)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_dragging_panel(&self) -> bool {
        self.kind() == Some(DragKind::Panel)
    }

    pub fn is_dragging_hitbox(&self, id: HitboxId) -> bool {
        self.kind() == Some(DragKind::Hitbox(id))
    }

    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }

    fn enter(&mut self, session: DragSession) {
        self.capture.attach(session.kind);
        log::debug!("drag start: {:?} offset {:?}", session.kind, session.offset);
        self.session = Some(session);
    }

    /// Pointer-down on the panel's drag handle. Ignored unless idle.
    pub fn begin_panel(&mut self, pointer: Point, panel_top_left: Point) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.enter(DragSession {
            kind: DragKind::Panel,
            offset: geometry::capture_offset(pointer, panel_top_left),
            frame: ContainerFrame::default(),
        });
        true
    }

    /// Pointer-down on a hitbox body. `frame` must be freshly measured for
    /// this session. Ignored unless idle and `id` exists.
    pub fn begin_hitbox(
        &mut self,
        id: HitboxId,
        pointer: Point,
        frame: ContainerFrame,
        store: &HitboxStore,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(hitbox) = store.get(id) else {
            log::trace!("drag start on missing hitbox {}", id);
            return false;
        };
        let top_left = frame.to_window(hitbox.origin());
        self.enter(DragSession {
            kind: DragKind::Hitbox(id),
            offset: geometry::capture_offset(pointer, top_left),
            frame,
        });
        true
    }

    /// Recomputes the dragged target's position from the captured offset.
    /// Returns false when idle or when the dragged hitbox no longer exists.
    pub fn pointer_moved(&self, pointer: Point, targets: DragTargets<'_>) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        match session.kind {
            DragKind::Panel => {
                *targets.panel = geometry::panel_target(pointer, session.offset);
                true
            }
            DragKind::Hitbox(id) => {
                let origin = geometry::hitbox_target(pointer, session.frame, session.offset);
                targets.store.move_hitbox(id, origin)
            }
        }
    }

    /// Pointer-up anywhere in the window.
    pub fn pointer_released(&mut self) -> Option<DragKind> {
        self.stop()
    }

    /// Leaves the current session, if any, and detaches the capture.
    pub fn stop(&mut self) -> Option<DragKind> {
        let kind = self.session.take().map(|s| s.kind);
        self.capture.detach();
        if let Some(kind) = kind {
            log::debug!("drag end: {:?}", kind);
        }
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(n: usize) -> HitboxStore {
        let mut store = HitboxStore::default();
        for _ in 0..n {
            store.create();
        }
        store
    }

    #[test]
    fn hitbox_drag_moves_by_pointer_delta() {
        let mut store = store_with(1);
        let mut panel = Point::new(400, 200);
        let id = HitboxId::FIRST;
        let frame = ContainerFrame::new(Point::new(300, 50));
        let mut drag = DragController::new();

        // 200,200 in the overlay is 500,250 in the window; grab near its middle.
        assert!(drag.begin_hitbox(id, Point::new(560, 330), frame, &store));
        assert!(drag.pointer_moved(
            Point::new(600, 310),
            DragTargets {
                store: &mut store,
                panel: &mut panel,
            },
        ));
        assert_eq!(store.get(id).unwrap().origin(), Point::new(240, 180));
        assert_eq!(panel, Point::new(400, 200));
    }

    #[test]
    fn offset_is_not_recomputed_mid_drag() {
        let mut store = store_with(1);
        let mut panel = Point::ZERO;
        let id = HitboxId::FIRST;
        let frame = ContainerFrame::new(Point::ZERO);
        let mut drag = DragController::new();
        drag.begin_hitbox(id, Point::new(210, 210), frame, &store);

        for step in 1..=5 {
            let p = Point::new(210 + step * 7, 210 - step * 3);
            drag.pointer_moved(p, DragTargets { store: &mut store, panel: &mut panel });
            assert_eq!(
                store.get(id).unwrap().origin(),
                Point::new(200 + step * 7, 200 - step * 3)
            );
        }
        assert_eq!(drag.session().unwrap().offset, Offset { dx: 10, dy: 10 });
    }

    #[test]
    fn panel_drag_updates_panel_position_only() {
        let mut store = store_with(1);
        let mut panel = Point::new(400, 200);
        let mut drag = DragController::new();
        assert!(drag.begin_panel(Point::new(410, 205), panel));
        drag.pointer_moved(Point::new(20, 30), DragTargets { store: &mut store, panel: &mut panel });
        assert_eq!(panel, Point::new(10, 25));
        assert_eq!(store.get(HitboxId::FIRST).unwrap().origin(), Point::new(200, 200));
    }

    #[test]
    fn only_one_session_at_a_time() {
        let store = store_with(2);
        let two = HitboxId::new(2).unwrap();
        let mut drag = DragController::new();

        assert!(drag.begin_panel(Point::ZERO, Point::ZERO));
        assert!(!drag.begin_hitbox(two, Point::ZERO, ContainerFrame::default(), &store));
        assert!(!drag.begin_panel(Point::ZERO, Point::ZERO));
        assert_eq!(drag.kind(), Some(DragKind::Panel));

        assert_eq!(drag.pointer_released(), Some(DragKind::Panel));
        assert!(drag.begin_hitbox(two, Point::ZERO, ContainerFrame::default(), &store));
        assert!(drag.is_dragging_hitbox(two));
        assert!(!drag.is_dragging_panel());
    }

    #[test]
    fn missing_hitbox_does_not_start_a_session() {
        let store = store_with(0);
        let mut drag = DragController::new();
        assert!(!drag.begin_hitbox(HitboxId::FIRST, Point::ZERO, ContainerFrame::default(), &store));
        assert!(!drag.is_active());
        assert_eq!(drag.capture().balance(), (0, 0));
    }

    #[test]
    fn capture_is_paired_on_every_exit() {
        let store = store_with(1);
        let mut drag = DragController::new();

        drag.begin_panel(Point::ZERO, Point::ZERO);
        assert!(drag.capture().is_attached());
        drag.pointer_released();
        assert!(!drag.capture().is_attached());

        drag.begin_hitbox(HitboxId::FIRST, Point::ZERO, ContainerFrame::default(), &store);
        assert_eq!(drag.capture().target(), Some(DragKind::Hitbox(HitboxId::FIRST)));
        drag.stop();
        // Stopping while idle must not unbalance anything.
        drag.stop();
        drag.pointer_released();

        assert_eq!(drag.capture().balance(), (2, 2));
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut store = store_with(1);
        let mut panel = Point::new(1, 1);
        let drag = DragController::new();
        assert!(!drag.pointer_moved(Point::new(99, 99), DragTargets { store: &mut store, panel: &mut panel }));
        assert_eq!(panel, Point::new(1, 1));
    }
}
