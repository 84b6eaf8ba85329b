// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom about a point.
//!
//! All positions are in viewport coordinates. The anchor is the point that
//! translate is measured from (the viewport center for the built-in wheel
//! handling), because the render sink scales about the content center.

use kurbo::{Point, Vec2};

use crate::config::ZoomConfig;
use crate::state::ViewportState;

/// A zoom-at-point request.
///
/// The content point under `start` before zooming ends up under `target`
/// afterwards. With `start == target` this is the usual "zoom towards the
/// cursor".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomGesture {
    /// Multiplicative change in zoom, before clamping.
    pub factor: f64,
    /// Origin that translate is expressed relative to.
    pub anchor: Point,
    /// Handle position before zooming.
    pub start: Point,
    /// Handle position after zooming.
    pub target: Point,
}

impl ZoomGesture {
    /// Zoom by `factor` keeping the content under `position` in place.
    #[must_use]
    pub fn at(factor: f64, anchor: Point, position: Point) -> Self {
        Self {
            factor,
            anchor,
            start: position,
            target: position,
        }
    }
}

/// The zoom and translate a gesture resolves to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTarget {
    /// New zoom, always inside the configured range.
    pub zoom: f64,
    /// New translate.
    pub translate: Vec2,
}

/// Resolves `gesture` against the current `state`.
///
/// Pure: nothing is written. When no content is attached the translate
/// degenerates to zero.
#[must_use]
pub fn compute_zoom(
    gesture: &ZoomGesture,
    state: &ViewportState,
    config: &ZoomConfig,
    content_attached: bool,
) -> ZoomTarget {
    let start_zoom = state.zoom();
    let zoom = config.clamp_zoom(start_zoom * gesture.factor);
    if !content_attached {
        return ZoomTarget {
            zoom,
            translate: Vec2::ZERO,
        };
    }

    let start_translate = state.translate();
    let v = gesture.start - gesture.anchor;
    let v_target = gesture.target - gesture.anchor;

    // Content-space point under the start handle, then where it lands after scaling.
    let content_point = (v - start_translate) / start_zoom;
    let zoomed = content_point * zoom + start_translate;
    let delta = v_target - zoomed;

    ZoomTarget {
        zoom,
        translate: start_translate + delta,
    }
}
