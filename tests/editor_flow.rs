use std::time::Duration;

use hitbox_edit::{ContainerFrame, DragKind, EditorState, HitboxField, HitboxId, Point};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn id(raw: u32) -> HitboxId {
    HitboxId::new(raw).unwrap()
}

#[test]
fn deleted_id_is_reused_by_next_create() {
    let mut ed = EditorState::default();
    for _ in 0..3 {
        ed.add_hitbox(ms(0));
    }
    assert!(ed.remove_hitbox(id(2), ms(1000)));
    ed.tick(ms(1300));
    assert_eq!(ed.add_hitbox(ms(1400)).id(), id(2));
}

#[test]
fn delete_is_deferred_by_the_animation_window() {
    let mut ed = EditorState::default();
    for _ in 0..5 {
        ed.add_hitbox(ms(0));
    }
    let five = id(5);
    ed.remove_hitbox(five, ms(500));

    assert!(ed.store().contains(five));
    assert!(ed.animator().is_exiting(five));

    ed.tick(ms(799));
    assert!(ed.store().contains(five));

    ed.tick(ms(800));
    assert!(!ed.store().contains(five));
    assert!(!ed.animator().is_exiting(five));
}

#[test]
fn remove_all_always_resets_store_and_cursor() {
    let mut ed = EditorState::default();
    for i in 0..4 {
        ed.add_hitbox(ms(i));
    }
    ed.remove_hitbox(id(1), ms(10));
    ed.select(id(3));
    ed.set_field(HitboxField::X, "900");

    ed.remove_all();
    assert!(ed.store().is_empty());
    assert_eq!(ed.store().cursor().origin, Point::new(200, 200));
    assert_eq!(ed.animator().exiting().count(), 0);

    // The exit scheduled before the clear must not touch the fresh hitbox 1.
    let fresh = ed.add_hitbox(ms(20)).id();
    assert_eq!(fresh, id(1));
    assert!(ed.tick(ms(400)).is_empty());
    assert!(ed.store().contains(fresh));
}

#[test]
fn drag_displacement_equals_pointer_displacement() {
    let grabs = [Point::new(201, 201), Point::new(275, 275), Point::new(349, 349)];
    for grab in grabs {
        let mut ed = EditorState::default();
        let hb = ed.add_hitbox(ms(0));
        let frame = ContainerFrame::new(Point::new(180, 64));
        let p = frame.to_window(grab);
        let q = Point::new(p.x + 37, p.y - 112);

        assert!(ed.pointer_down_on_hitbox(hb.id(), p, frame));
        ed.pointer_moved(q);
        let moved = ed.store().get(hb.id()).unwrap().origin();
        assert_eq!(moved - hb.origin(), q - p);
        ed.pointer_up();
    }
}

#[test]
fn container_is_remeasured_per_session() {
    let mut ed = EditorState::default();
    let hb = ed.add_hitbox(ms(0)).id();

    let first = ContainerFrame::new(Point::new(0, 0));
    ed.pointer_down_on_hitbox(hb, Point::new(210, 210), first);
    ed.pointer_moved(Point::new(260, 210));
    ed.pointer_up();
    assert_eq!(ed.store().get(hb).unwrap().origin(), Point::new(250, 200));

    // The container moved between sessions; grabbing the same visual spot
    // must not make the hitbox jump.
    let second = ContainerFrame::new(Point::new(100, 40));
    let grab = second.to_window(Point::new(260, 210));
    ed.pointer_down_on_hitbox(hb, grab, second);
    ed.pointer_moved(grab);
    assert_eq!(ed.store().get(hb).unwrap().origin(), Point::new(250, 200));
}

#[test]
fn at_most_one_drag_target() {
    let mut ed = EditorState::default();
    let a = ed.add_hitbox(ms(0)).id();
    let b = ed.add_hitbox(ms(0)).id();
    ed.select(a);

    assert!(ed.pointer_down_on_hitbox(a, Point::new(210, 210), ContainerFrame::default()));
    assert!(!ed.pointer_down_on_hitbox(b, Point::new(300, 300), ContainerFrame::default()));
    assert!(!ed.pointer_down_on_panel(Point::new(410, 210)));
    assert_eq!(ed.drag().kind(), Some(DragKind::Hitbox(a)));

    ed.pointer_moved(Point::new(400, 400));
    assert_eq!(ed.store().get(b).unwrap().origin(), Point::new(290, 290));
    assert_eq!(ed.panel_origin(), Point::new(400, 200));

    assert_eq!(ed.pointer_up(), Some(DragKind::Hitbox(a)));
    assert!(ed.pointer_down_on_panel(Point::new(410, 210)));
    ed.pointer_moved(Point::new(0, 0));
    assert_eq!(ed.panel_origin(), Point::new(-10, -10));
    assert_eq!(ed.stop_drag(), Some(DragKind::Panel));
    assert_eq!(ed.drag().capture().balance(), (2, 2));
}

#[test]
fn invalid_width_input_is_stored_as_minimum() {
    let mut ed = EditorState::default();
    let hb = ed.add_hitbox(ms(0)).id();
    ed.select(hb);
    for raw in ["-5", "", "ten", "-1e9"] {
        ed.set_field(HitboxField::Width, "150");
        ed.set_field(HitboxField::Width, raw);
        assert_eq!(ed.store().get(hb).unwrap().width(), 10, "input {:?}", raw);
    }
}

#[test]
fn panel_falls_back_when_open_hitbox_vanishes() {
    let mut ed = EditorState::default();
    let hb = ed.add_hitbox(ms(0)).id();
    ed.select(hb);
    ed.remove_open(ms(0));
    ed.tick(ms(300));

    assert_eq!(ed.panel().open_id(), Some(hb));
    assert_eq!(ed.field_value(HitboxField::X), 290);
    assert_eq!(ed.field_value(HitboxField::Width), 150);
    assert!(!ed.reset_field(HitboxField::X));
}
