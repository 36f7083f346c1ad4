use std::sync::Arc;

use egui::{Rect, pos2, vec2};
use hero_gallery::animation::{FrameCounter, InstanceState, NoFrames};
use hero_gallery::clipboard::MemoryClipboard;
use hero_gallery::{AnimationHost, GalleryError, HostCommand, ParamValue, RawValue, Theme};

// Helper to create a host with a sized surface and one animation loaded
fn create_host(id: &str) -> AnimationHost {
    let mut host = AnimationHost::new(Arc::new(NoFrames), Theme::Dark);
    host.handle_resize(Rect::from_min_size(pos2(200.0, 0.0), vec2(800.0, 600.0)))
        .unwrap();
    host.select_animation(id).unwrap();
    host
}

#[test]
fn test_switch_cleans_up_previous_exactly_once() {
    let mut host = create_host("particles");
    let first_loop = host.instance().unwrap().loop_token();
    let first_id = host.instance().unwrap().id();

    host.select_animation("matrix_rain").unwrap();

    assert!(first_loop.is_cancelled());
    assert_eq!(host.retired(), 1);
    assert_eq!(host.active_id(), Some("matrix_rain"));
    let second = host.instance().unwrap();
    assert_ne!(second.id(), first_id);
    assert_eq!(second.state(), InstanceState::Running);
    assert!(second.is_running());
}

#[test]
fn test_unknown_id_leaves_active_animation_drawing() {
    let mut host = create_host("tunnel");
    host.frame(true).unwrap();

    let err = host.select_animation("nonexistent").unwrap_err();
    assert!(matches!(err, GalleryError::NotFound(ref id) if id == "nonexistent"));

    assert_eq!(host.active_id(), Some("tunnel"));
    assert_eq!(host.retired(), 0);
    assert!(host.frame(true).unwrap());
    assert_eq!(host.instance().unwrap().frames(), 2);
}

#[test]
fn test_range_input_is_clamped_before_storing() {
    let mut host = create_host("particles");
    let stored = host
        .on_parameter_input("count", RawValue::Text("5000".into()))
        .unwrap();
    assert_eq!(stored, ParamValue::Number(200.0));
    assert_eq!(host.schema().unwrap().number("count"), Some(200.0));

    host.on_parameter_input("speed", RawValue::Number(-3.0)).unwrap();
    assert_eq!(host.schema().unwrap().number("speed"), Some(0.1));
}

#[test]
fn test_invalid_input_stores_nothing() {
    let mut host = create_host("particles");
    let err = host
        .on_parameter_input("count", RawValue::Text("lots".into()))
        .unwrap_err();
    assert!(matches!(err, GalleryError::InvalidInput { .. }));
    assert_eq!(host.schema().unwrap().number("count"), Some(80.0));

    let err = host
        .on_parameter_input("missing", RawValue::Number(1.0))
        .unwrap_err();
    assert!(matches!(err, GalleryError::InvalidInput { .. }));
}

#[test]
fn test_select_input_is_restricted_to_options() {
    let mut host = create_host("tunnel");
    host.on_parameter_input("shapes", "Hexagon".into()).unwrap();
    assert!(host.on_parameter_input("shapes", "Blob".into()).is_err());
    assert_eq!(host.schema().unwrap().text("shapes"), Some("Hexagon"));
}

#[test]
fn test_trigger_is_not_stored() {
    let mut host = create_host("aurora");
    let before = host.schema().unwrap().clone();
    host.trigger("randomize").unwrap();
    assert_eq!(host.schema().unwrap(), &before);
}

#[test]
fn test_double_resize_matches_single_resize() {
    let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(640.0, 480.0));

    let mut once = create_host("sphere");
    once.handle_resize(rect).unwrap();
    once.frame(true).unwrap();

    let mut twice = create_host("sphere");
    twice.handle_resize(rect).unwrap();
    twice.handle_resize(rect).unwrap();
    twice.frame(true).unwrap();

    assert_eq!(once.surface().commands(), twice.surface().commands());
}

#[test]
fn test_zero_sized_surface_does_not_panic() {
    for descriptor in hero_gallery::CATALOG {
        let mut host = create_host(descriptor.id);
        host.handle_resize(Rect::from_min_size(pos2(0.0, 0.0), vec2(0.0, 0.0)))
            .unwrap();
        host.handle_pointer_move(pos2(10.0, 10.0)).unwrap();
        host.frame(true).unwrap();
    }
}

#[test]
fn test_theme_toggle_reaches_instance_and_marks_dirty() {
    let mut host = create_host("particles");
    assert_eq!(host.schema().unwrap().text("color"), Some("#ffffff"));

    assert_eq!(host.toggle_theme().unwrap(), Theme::Light);
    assert!(host.take_theme_dirty());
    assert!(!host.take_theme_dirty());
    assert_eq!(host.instance().unwrap().theme(), Theme::Light);
    assert_eq!(host.schema().unwrap().text("color"), Some("#000000"));
}

#[test]
fn test_new_instance_uses_current_theme() {
    let mut host = create_host("warp");
    host.toggle_theme().unwrap();
    host.select_animation("particles").unwrap();
    assert_eq!(host.instance().unwrap().theme(), Theme::Light);
    assert_eq!(host.schema().unwrap().text("color"), Some("#000000"));
}

#[test]
fn test_schema_is_fresh_on_every_load() {
    let mut host = create_host("particles");
    host.on_parameter_input("count", RawValue::Number(150.0)).unwrap();
    host.select_animation("particles").unwrap();
    assert_eq!(host.schema().unwrap().number("count"), Some(80.0));
}

#[test]
fn test_render_loop_requests_frames_until_switched() {
    let counter = Arc::new(FrameCounter::default());
    let mut host = AnimationHost::new(counter.clone(), Theme::Dark);
    host.handle_resize(Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 200.0)))
        .unwrap();
    host.select_animation("warp").unwrap();
    let after_start = counter.requested();
    assert!(after_start >= 1);

    host.frame(true).unwrap();
    host.frame(true).unwrap();
    assert_eq!(counter.requested(), after_start + 2);

    let old_loop = host.instance().unwrap().loop_token();
    host.select_animation("aurora").unwrap();
    assert!(old_loop.is_cancelled());
}

#[test]
fn test_queued_selections_resolve_to_the_latest() {
    let mut host = create_host("particles");
    host.enqueue(HostCommand::Select("tunnel".into()));
    host.enqueue(HostCommand::Select("nonexistent".into()));
    host.enqueue(HostCommand::Select("sphere".into()));
    host.enqueue(HostCommand::input("radius", 1000.0));
    host.process_commands(&mut MemoryClipboard::default());

    assert_eq!(host.active_id(), Some("sphere"));
    assert_eq!(host.retired(), 2);
    assert_eq!(host.schema().unwrap().number("radius"), Some(400.0));
    assert_eq!(
        host.notices().latest().map(|n| n.message.as_str()),
        Some("No animation with id 'nonexistent'")
    );
}
