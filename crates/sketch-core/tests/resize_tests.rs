mod common;

use common::*;
use sketch_core::{PlaybackMode, SketchError};

#[test]
fn resize_applies_new_container_size() {
    let mut h = Harness::strict();
    h.set_size(1200.0, 400.0);
    h.sketch.resize().unwrap();
    let s = h.sketch.surface();
    assert_eq!((s.width, s.height), (1200, 400));
    assert!((h.sketch.camera().aspect - 3.0).abs() < 1e-6);
    let res = h.sketch.uniforms().unwrap().resolution;
    assert_eq!((res.x, res.y), (1200.0, 400.0));
    assert_eq!(h.log.borrow().configured.len(), 2);
}

#[test]
fn projection_refreshes_on_resize() {
    let mut h = Harness::strict();
    let before = h.sketch.camera().projection_matrix();
    h.set_size(1600.0, 400.0);
    h.sketch.resize().unwrap();
    assert_ne!(h.sketch.camera().projection_matrix(), before);
}

#[test]
fn resize_is_idempotent_under_stable_input() {
    let mut h = Harness::strict();
    h.set_size(640.0, 480.0);
    h.sketch.resize().unwrap();
    let surface = h.sketch.surface().clone();
    let aspect = h.sketch.camera().aspect;
    let configures = h.log.borrow().configured.len();

    h.sketch.resize().unwrap();
    assert_eq!(h.sketch.surface(), &surface);
    assert_eq!(h.sketch.camera().aspect, aspect);
    assert_eq!(h.log.borrow().configured.len(), configures);
}

#[test]
fn zero_height_keeps_previous_aspect() {
    let mut h = Harness::strict();
    let aspect = h.sketch.camera().aspect;
    h.set_size(800.0, 0.0);
    let err = h.sketch.resize().unwrap_err();
    assert!(matches!(
        err,
        SketchError::DegenerateSize {
            width: 800,
            height: 0
        }
    ));
    assert!(err.is_recoverable());
    let now = h.sketch.camera().aspect;
    assert!(now.is_finite() && !now.is_nan());
    assert_eq!(now, aspect);
    assert_eq!(h.sketch.surface().height, 0);
    assert!(h.sketch.camera().projection_matrix().is_finite());
}

#[test]
fn zero_width_is_also_guarded() {
    let mut h = Harness::strict();
    h.set_size(0.0, 600.0);
    assert!(h.sketch.resize().is_err());
    assert!(h.sketch.camera().aspect > 0.0);
}

#[test]
fn recovers_after_degenerate_size() {
    let mut h = Harness::new(800.0, 0.0, PlaybackMode::Strict);
    assert!(h.sketch.resize().is_err());
    h.set_size(900.0, 300.0);
    h.sketch.resize().unwrap();
    assert!((h.sketch.camera().aspect - 3.0).abs() < 1e-6);
}

#[test]
fn resize_and_frames_interleave() {
    let mut h = Harness::strict();
    h.pump();
    h.set_size(1000.0, 500.0);
    h.sketch.resize().unwrap();
    h.pump();
    assert!(approx(h.sketch.time(), 0.10));
    let aspects = h.log.borrow().drawn_aspects.clone();
    assert!((aspects[0] - 800.0 / 600.0).abs() < 1e-6);
    assert!((aspects[1] - 2.0).abs() < 1e-6);
}

#[test]
fn pixel_ratio_change_alone_reconfigures() {
    let mut h = Harness::strict();
    let aspect = h.sketch.camera().aspect;
    let configures = h.log.borrow().configured.len();

    h.set_pixel_ratio(2.0);
    h.sketch.resize().unwrap();

    let s = h.sketch.surface();
    assert_eq!((s.width, s.height), (800, 600));
    assert_eq!(s.pixel_ratio, 2.0);
    assert_eq!(s.backing_size(), (1600, 1200));
    let log = h.log.borrow();
    assert_eq!(log.configured.len(), configures + 1);
    assert_eq!(log.configured.last().unwrap().backing_size(), (1600, 1200));
    assert_eq!(h.sketch.camera().aspect, aspect);
}

#[test]
fn failed_configure_leaves_state_for_a_retry() {
    let mut h = Harness::strict();
    h.set_size(1200.0, 400.0);
    h.renderer.fail_configure.set(1);

    let err = h.sketch.resize().unwrap_err();
    assert!(matches!(err, SketchError::Backend(_)));
    assert!(!err.is_recoverable());
    let s = h.sketch.surface();
    assert_eq!((s.width, s.height), (800, 600));
    assert!((h.sketch.camera().aspect - 800.0 / 600.0).abs() < 1e-6);

    // same container size again: the retry must apply it in full
    h.sketch.resize().unwrap();
    let s = h.sketch.surface();
    assert_eq!((s.width, s.height), (1200, 400));
    assert!((h.sketch.camera().aspect - 3.0).abs() < 1e-6);
    let res = h.sketch.uniforms().unwrap().resolution;
    assert_eq!((res.x, res.y), (1200.0, 400.0));
}
