mod common;

use common::*;
use sketch_core::{
    FixedPixelRatio, PlaybackMode, SketchConfig, SketchController, SketchError, UniformValue,
};

#[test]
fn construction_runs_steps_in_order() {
    let h = Harness::strict();
    let log = h.log.borrow();
    assert_eq!(log.calls, vec!["configure", "mount", "create_mesh"]);
    assert!(h.container.watching.get(), "resize listener registered");
    // first frame is scheduled, nothing drawn yet
    assert_eq!(h.clock.requests.get(), 1);
    assert_eq!(log.draws, 0);
    assert_eq!(h.sketch.time(), 0.0);
    assert!(h.sketch.is_playing());
    assert_eq!(h.sketch.scene().len(), 1);
}

#[test]
fn surface_and_camera_match_container_at_startup() {
    let h = Harness::new(1024.0, 512.0, PlaybackMode::Strict);
    let surface = h.sketch.surface();
    assert_eq!((surface.width, surface.height), (1024, 512));
    assert!((h.sketch.camera().aspect - 2.0).abs() < 1e-6);
    let configured = &h.log.borrow().configured[0];
    assert_eq!((configured.width, configured.height), (1024, 512));
    let u = h.sketch.uniforms().unwrap();
    assert_eq!(u.resolution.x, 1024.0);
    assert_eq!(u.resolution.y, 512.0);
    assert_eq!(u.uv_rate1, glam::Vec2::ONE);
}

#[test]
fn missing_container_fails_before_any_side_effect() {
    let clock = ManualClock::default();
    let renderer = RecordingRenderer::default();
    let log = renderer.log.clone();
    let config = SketchConfig::<FakeContainer>::new(None);
    let result = SketchController::new(
        config,
        renderer,
        Box::new(clock.clone()),
        Box::new(FixedPixelRatio(1.0)),
    );
    assert!(matches!(result, Err(SketchError::Configuration(_))));
    assert!(log.borrow().calls.is_empty());
    assert_eq!(clock.requests.get(), 0);
}

#[test]
fn invalid_config_fails_before_any_side_effect() {
    let container = FakeContainer::new(800.0, 600.0);
    let renderer = RecordingRenderer::default();
    let log = renderer.log.clone();
    let config = SketchConfig::new(Some(container.clone())).with_time_step(-0.05);
    let result = SketchController::new(
        config,
        renderer,
        Box::new(ManualClock::default()),
        Box::new(FixedPixelRatio(1.0)),
    );
    assert!(matches!(result, Err(SketchError::Configuration(_))));
    assert!(log.borrow().calls.is_empty());
    assert!(!container.watching.get());
}

#[test]
fn zero_height_container_at_startup_keeps_fallback_aspect() {
    let h = Harness::new(800.0, 0.0, PlaybackMode::Strict);
    let aspect = h.sketch.camera().aspect;
    assert!(aspect.is_finite() && aspect > 0.0);
    assert_eq!(aspect, 1.0);
}

#[test]
fn pixel_ratio_reaches_the_renderer() {
    let container = FakeContainer::new(400.0, 300.0);
    let renderer = RecordingRenderer::default();
    let log = renderer.log.clone();
    let _sketch = SketchController::new(
        SketchConfig::new(Some(container)),
        renderer,
        Box::new(ManualClock::default()),
        Box::new(FixedPixelRatio(2.0)),
    )
    .unwrap();
    let surface = &log.borrow().configured[0];
    assert_eq!(surface.pixel_ratio, 2.0);
    assert_eq!(surface.backing_size(), (800, 600));
}

#[test]
fn uniforms_can_be_set_by_name() {
    let mut h = Harness::strict();
    h.sketch
        .set_uniform("uvRate1", UniformValue::Vec2(glam::Vec2::new(2.0, 0.5)))
        .unwrap();
    assert_eq!(h.sketch.uniforms().unwrap().uv_rate1, glam::Vec2::new(2.0, 0.5));
    let err = h
        .sketch
        .set_uniform("progress", UniformValue::Float(0.5))
        .unwrap_err();
    assert!(err.is_recoverable());
}

#[test]
fn progress_setting_is_quantized() {
    let mut h = Harness::strict();
    assert_eq!(h.sketch.settings().progress(), 0.0);
    let v = h.sketch.set_progress(0.333);
    assert!((v - 0.33).abs() < 1e-6);
    assert_eq!(h.sketch.settings().progress(), v);
}

#[test]
fn orbit_moves_camera_but_not_projection() {
    let mut h = Harness::strict();
    let proj = h.sketch.camera().projection_matrix();
    let before = h.sketch.camera().position;
    h.sketch.orbit(150.0, 0.0);
    let after = h.sketch.camera().position;
    assert!((after - before).length() > 0.1);
    assert!((after.length() - 2.0).abs() < 1e-4);
    assert_eq!(h.sketch.camera().projection_matrix(), proj);
    h.sketch.zoom(1.0);
    assert!(h.sketch.camera().position.length() > 2.0);
}
