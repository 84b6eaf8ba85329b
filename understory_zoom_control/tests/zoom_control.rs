// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_zoom_control` crate.
//!
//! These drive `ZoomControl` the way a host would: size reports, input
//! events, and frame ticks, checking the resulting zoom, translate and mode.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Size, Vec2};
use understory_zoom_control::{
    ContentMetrics, DispatchPhase, ModifierMode, Modifiers, PointerAction, ViewMode, ZoomConfig,
    ZoomControl, ZoomGesture,
};

const FRAME: Duration = Duration::from_millis(16);

fn settle(zc: &mut ZoomControl) {
    let mut frames = 0;
    while zc.advance(FRAME) {
        frames += 1;
        assert!(frames < 10_000, "animation never settled");
    }
}

fn control_with(viewport: Size, content: Size) -> ZoomControl {
    let mut zc = ZoomControl::default();
    zc.set_viewport_size(viewport);
    zc.attach_content(ContentMetrics::new(content));
    settle(&mut zc);
    zc
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn wheel_notch_at_center_zooms_by_1_4() {
    let mut zc = control_with(Size::new(600.0, 400.0), Size::new(600.0, 400.0));
    assert!(close(zc.zoom(), 1.0));
    assert_eq!(zc.translate(), Vec2::ZERO);

    zc.on_wheel(120.0, Point::new(300.0, 200.0));
    settle(&mut zc);

    assert!(close(zc.zoom(), 1.4), "zoom was {}", zc.zoom());
    assert_eq!(zc.translate(), Vec2::ZERO);
    assert_eq!(zc.mode(), ViewMode::Custom);
}

#[test]
fn wheel_zoom_keeps_point_under_cursor() {
    let mut zc = control_with(Size::new(600.0, 400.0), Size::new(600.0, 400.0));
    let center = Point::new(300.0, 200.0);
    let cursor = Point::new(450.0, 120.0);
    let content_point = |zc: &ZoomControl| ((cursor - center) - zc.translate()) / zc.zoom();

    let before = content_point(&zc);
    zc.on_wheel(-60.0, cursor);
    settle(&mut zc);
    let after = content_point(&zc);

    assert!(close(zc.zoom(), 0.8));
    assert!((before - after).hypot() < 1e-9, "{before:?} vs {after:?}");
}

#[test]
fn zoom_never_leaves_configured_range() {
    let config = ZoomConfig::new(0.5, 4.0, Duration::from_millis(100)).unwrap();
    let mut zc = ZoomControl::new(config);
    zc.set_viewport_size(Size::new(100.0, 100.0));
    zc.attach_content(ContentMetrics::new(Size::new(100.0, 100.0)));
    settle(&mut zc);

    for _ in 0..10 {
        zc.on_wheel(10_000.0, Point::new(50.0, 50.0));
        settle(&mut zc);
        assert!(zc.zoom() <= 4.0);
    }
    assert!(close(zc.zoom(), 4.0));
    for _ in 0..10 {
        zc.on_wheel(-10_000.0, Point::new(10.0, 90.0));
        settle(&mut zc);
        assert!(zc.zoom() >= 0.5);
    }
    assert!(close(zc.zoom(), 0.5));

    zc.set_zoom(1e6);
    assert!(close(zc.zoom(), 4.0));
}

#[test]
fn fill_is_an_aspect_fit() {
    for (viewport, content) in [
        (Size::new(800.0, 600.0), Size::new(400.0, 400.0)),
        (Size::new(320.0, 900.0), Size::new(640.0, 480.0)),
        (Size::new(50.0, 50.0), Size::new(10.0, 70.0)),
    ] {
        let zc = control_with(viewport, content);
        assert_eq!(zc.mode(), ViewMode::Fill);
        let fits_width = close(content.width * zc.zoom(), viewport.width);
        let fits_height = close(content.height * zc.zoom(), viewport.height);
        assert!(fits_width || fits_height, "{content:?} in {viewport:?}");
        assert!(content.width * zc.zoom() <= viewport.width + 1e-9);
        assert!(content.height * zc.zoom() <= viewport.height + 1e-9);
    }
}

#[test]
fn resize_refits_only_in_fill() {
    let mut zc = control_with(Size::new(400.0, 400.0), Size::new(200.0, 100.0));
    assert!(close(zc.zoom(), 2.0));

    zc.set_viewport_size(Size::new(100.0, 400.0));
    settle(&mut zc);
    assert_eq!(zc.mode(), ViewMode::Fill);
    assert!(close(zc.zoom(), 0.5));

    zc.set_content_size(Size::new(50.0, 50.0), Size::new(50.0, 50.0));
    settle(&mut zc);
    assert!(close(zc.zoom(), 2.0));

    zc.set_mode(ViewMode::Original);
    settle(&mut zc);
    zc.set_viewport_size(Size::new(1000.0, 1000.0));
    assert!(!zc.needs_frame());
    assert!(close(zc.zoom(), 1.0));
    assert_eq!(zc.mode(), ViewMode::Original);
}

#[test]
fn direct_writes_switch_to_custom() {
    let mut zc = control_with(Size::new(400.0, 400.0), Size::new(200.0, 200.0));
    assert_eq!(zc.mode(), ViewMode::Fill);
    zc.set_translate(Vec2::new(5.0, 0.0));
    assert_eq!(zc.mode(), ViewMode::Custom);

    zc.zoom_to_original();
    settle(&mut zc);
    assert_eq!(zc.mode(), ViewMode::Original);
    zc.set_zoom(2.0);
    assert_eq!(zc.mode(), ViewMode::Custom);

    zc.zoom_to_fill();
    settle(&mut zc);
    assert_eq!(zc.mode(), ViewMode::Fill);
    zc.on_pointer_down(DispatchPhase::Normal, Point::new(10.0, 10.0), Modifiers::empty());
    zc.on_pointer_move(Point::new(11.0, 10.0));
    assert_eq!(zc.mode(), ViewMode::Custom);
}

#[test]
fn animation_frames_do_not_break_fill() {
    let mut zc = ZoomControl::default();
    zc.set_viewport_size(Size::new(300.0, 300.0));
    zc.attach_content(ContentMetrics::new(Size::new(100.0, 100.0)));
    while zc.advance(FRAME) {
        assert_eq!(zc.mode(), ViewMode::Fill);
        assert!(zc.is_animating());
    }
    assert!(!zc.is_animating());
    assert!(close(zc.zoom(), 3.0));
}

#[test]
fn overlapping_zooms_settle_on_the_second_request() {
    let mut zc = control_with(Size::new(200.0, 200.0), Size::new(200.0, 200.0));
    let center = Point::new(100.0, 100.0);

    zc.zoom_at(ZoomGesture::at(2.0, center, center));
    zc.advance(Duration::from_millis(200));
    let mid = zc.zoom();
    zc.zoom_at(ZoomGesture::at(1.5, center, center));
    assert_eq!(zc.pending_zoom_count(), 2);

    let mut seen_settle_early = false;
    while zc.advance(FRAME) {
        if !zc.is_animating() {
            seen_settle_early = true;
        }
    }
    assert!(!seen_settle_early, "settled before the last request completed");
    assert!(close(zc.zoom(), mid * 1.5), "zoom was {}", zc.zoom());
    assert_eq!(zc.pending_zoom_count(), 0);

    // Nothing snaps back afterwards.
    zc.advance(Duration::from_secs(5));
    assert!(close(zc.zoom(), mid * 1.5));
}

#[test]
fn zero_size_content_is_left_alone() {
    let mut zc = ZoomControl::default();
    zc.set_viewport_size(Size::new(800.0, 600.0));
    zc.attach_content(ContentMetrics::new(Size::ZERO));
    assert!(!zc.needs_frame());
    assert_eq!(zc.zoom(), 1.0);
    assert_eq!(zc.translate(), Vec2::ZERO);

    zc.set_mode(ViewMode::Fill);
    zc.advance(Duration::from_secs(1));
    assert!(zc.zoom().is_finite());
    assert_eq!(zc.zoom(), 1.0);
    assert_eq!(zc.translate(), Vec2::ZERO);

    // Once measured, Fill catches up.
    zc.set_content_size(Size::new(400.0, 300.0), Size::new(400.0, 300.0));
    settle(&mut zc);
    assert!(close(zc.zoom(), 2.0));
}

#[test]
fn zero_viewport_is_left_alone() {
    let mut zc = ZoomControl::default();
    zc.attach_content(ContentMetrics::new(Size::new(100.0, 100.0)));
    assert!(!zc.needs_frame());
    assert_eq!(zc.zoom(), 1.0);
}

#[test]
fn fresh_control_starts_inside_zoom_range() {
    let config = ZoomConfig::new(2.0, 10.0, Duration::from_millis(100)).unwrap();
    let mut zc = ZoomControl::new(config);
    assert_eq!(zc.zoom(), 2.0);
    assert_eq!(zc.state().zoom(), 2.0);

    // No viewport yet, so the fill request is skipped.
    zc.attach_content(ContentMetrics::new(Size::new(100.0, 100.0)));
    settle(&mut zc);
    assert!(
        (2.0..=10.0).contains(&zc.zoom()),
        "zoom {} left [2, 10]",
        zc.zoom()
    );
    let transform = zc.render_transform().unwrap();
    assert_eq!(transform.as_coeffs()[0], zc.zoom());
}

#[test]
fn operations_before_content_are_noops() {
    let mut zc = ZoomControl::default();
    zc.set_viewport_size(Size::new(100.0, 100.0));
    let revision = zc.state().revision();

    zc.set_zoom(3.0);
    zc.set_translate(Vec2::new(1.0, 2.0));
    zc.on_wheel(120.0, Point::new(10.0, 10.0));
    zc.zoom_at(ZoomGesture::at(2.0, Point::ORIGIN, Point::ORIGIN));
    assert_eq!(
        zc.on_pointer_down(DispatchPhase::Normal, Point::ORIGIN, Modifiers::empty()),
        PointerAction::Ignore
    );
    zc.set_mode(ViewMode::Original);
    zc.advance(Duration::from_secs(1));

    assert_eq!(zc.zoom(), 1.0);
    assert_eq!(zc.translate(), Vec2::ZERO);
    assert!(!zc.needs_frame());
    // Only the mode request itself is recorded.
    assert_eq!(zc.mode(), ViewMode::Original);
    assert_eq!(zc.state().revision(), revision + 1);
}

#[test]
fn plain_drag_pans_by_pointer_delta() {
    let mut zc = control_with(Size::new(200.0, 200.0), Size::new(200.0, 200.0));
    zc.set_translate(Vec2::new(3.0, -2.0));

    assert_eq!(
        zc.on_pointer_down(DispatchPhase::Preview, Point::new(50.0, 50.0), Modifiers::empty()),
        PointerAction::Ignore
    );
    assert_eq!(
        zc.on_pointer_down(DispatchPhase::Normal, Point::new(50.0, 50.0), Modifiers::empty()),
        PointerAction::Capture
    );
    assert_eq!(zc.modifier_mode(), ModifierMode::Pan);

    zc.on_pointer_move(Point::new(70.0, 65.0));
    assert_eq!(zc.translate(), Vec2::new(23.0, 13.0));
    assert!(!zc.needs_frame(), "pan writes are not animated");

    assert_eq!(zc.on_pointer_up(), PointerAction::Release);
    assert_eq!(zc.modifier_mode(), ModifierMode::None);
    zc.on_pointer_move(Point::new(0.0, 0.0));
    assert_eq!(zc.translate(), Vec2::new(23.0, 13.0));
}

#[test]
fn shift_drag_starts_in_preview_and_ctrl_is_reserved() {
    let mut zc = control_with(Size::new(200.0, 200.0), Size::new(200.0, 200.0));
    assert_eq!(
        zc.on_pointer_down(DispatchPhase::Preview, Point::ORIGIN, Modifiers::CONTROL),
        PointerAction::Ignore
    );
    assert_eq!(
        zc.on_pointer_down(DispatchPhase::Normal, Point::ORIGIN, Modifiers::CONTROL),
        PointerAction::Ignore
    );
    assert_eq!(
        zc.on_pointer_down(DispatchPhase::Preview, Point::ORIGIN, Modifiers::SHIFT),
        PointerAction::Capture
    );
    assert_eq!(
        zc.on_pointer_down(DispatchPhase::Normal, Point::ORIGIN, Modifiers::SHIFT),
        PointerAction::Ignore
    );
    zc.on_pointer_move(Point::new(-5.0, 5.0));
    assert_eq!(zc.translate(), Vec2::new(-5.0, 5.0));
}

#[test]
fn pan_during_fill_animation_takes_over_translate() {
    let mut zc = ZoomControl::default();
    zc.set_viewport_size(Size::new(400.0, 400.0));
    zc.attach_content(ContentMetrics {
        content_size: Size::new(200.0, 200.0),
        desired_size: Size::new(100.0, 100.0),
    });
    zc.advance(Duration::from_millis(100));

    zc.on_pointer_down(DispatchPhase::Normal, Point::ORIGIN, Modifiers::empty());
    zc.on_pointer_move(Point::new(10.0, 0.0));
    let panned = zc.translate();
    assert_eq!(zc.mode(), ViewMode::Custom);

    settle(&mut zc);
    assert_eq!(zc.translate(), panned, "translate animation was not detached");
    assert!(close(zc.zoom(), 2.0), "zoom animation keeps running");
}

#[test]
fn observer_sees_each_visible_change() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut zc = ZoomControl::default();
    let sink = Rc::clone(&seen);
    zc.set_observer(move |state| sink.borrow_mut().push((state.zoom(), state.mode())));

    zc.set_viewport_size(Size::new(100.0, 100.0));
    assert!(seen.borrow().is_empty(), "no visible change yet");

    zc.attach_content(ContentMetrics::new(Size::new(50.0, 50.0)));
    assert_eq!(seen.borrow().last(), Some(&(1.0, ViewMode::Fill)));

    settle(&mut zc);
    let count = seen.borrow().len();
    assert!(count > 2, "one notification per animated frame");
    assert_eq!(seen.borrow().last(), Some(&(2.0, ViewMode::Fill)));

    zc.advance(FRAME);
    assert_eq!(seen.borrow().len(), count, "idle frames are silent");

    zc.clear_observer();
    zc.set_zoom(3.0);
    assert_eq!(seen.borrow().len(), count);
}

#[test]
fn render_transform_tracks_state() {
    let mut zc = control_with(Size::new(200.0, 200.0), Size::new(100.0, 100.0));
    zc.set_translate(Vec2::new(10.0, 20.0));
    let transform = zc.render_transform().unwrap();
    let center = transform * Point::new(50.0, 50.0);
    assert!(close(center.x, 60.0) && close(center.y, 70.0), "{center:?}");
    let corner = transform * Point::new(100.0, 100.0);
    assert!(close(corner.x, 160.0) && close(corner.y, 170.0), "{corner:?}");
}

#[test]
fn shrinking_config_reclamps_zoom() {
    let mut zc = control_with(Size::new(1000.0, 1000.0), Size::new(100.0, 100.0));
    assert!(close(zc.zoom(), 10.0));
    zc.set_config(ZoomConfig::new(0.1, 5.0, Duration::from_millis(50)).unwrap());
    assert!(zc.zoom() <= 5.0);
    settle(&mut zc);
    assert!(close(zc.zoom(), 5.0));
    assert_eq!(zc.mode(), ViewMode::Fill);
}

#[test]
fn config_reclamp_keeps_content_center_in_custom() {
    let mut zc = control_with(Size::new(800.0, 600.0), Size::new(400.0, 200.0));
    zc.set_zoom(8.0);
    zc.set_translate(Vec2::new(10.0, 20.0));
    assert_eq!(zc.mode(), ViewMode::Custom);

    zc.set_config(ZoomConfig::new(0.01, 4.0, Duration::from_millis(500)).unwrap());
    assert_eq!(zc.zoom(), 4.0);
    assert_eq!(zc.translate(), Vec2::new(5.0, 10.0));
    assert_eq!(zc.mode(), ViewMode::Custom);
    assert!(!zc.needs_frame());
}
