// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom_control --heading-base-level=0

//! Understory Zoom Control: the headless core of a pan/zoom viewport widget.
//!
//! Given pointer, wheel, and mode-change input, this crate keeps a consistent
//! zoom + translate pair and animates transitions between states. It covers:
//! - Zooming about a point ([`compute_zoom`]).
//! - Animated transitions with supersession and settling ([`AnimationCoordinator`]).
//! - The fill / original / custom view modes ([`ModeStateMachine`]).
//! - Pointer panning with modifier rules ([`PanStateMachine`]).
//!
//! It does **not** render, lay out, or measure anything. Callers are expected to:
//! - Report content and viewport sizes as they change.
//! - Forward pointer and wheel events.
//! - Call [`ZoomControl::advance`] from their frame scheduler while
//!   [`ZoomControl::needs_frame`] is true.
//! - Apply [`ZoomControl::render_transform`] (scale about the content center,
//!   then translate) to the content.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Size};
//! use understory_zoom_control::{ContentMetrics, ViewMode, ZoomControl};
//!
//! let mut zc = ZoomControl::default();
//! zc.set_viewport_size(Size::new(800.0, 600.0));
//!
//! // Attaching content requests Fill.
//! zc.attach_content(ContentMetrics::new(Size::new(400.0, 400.0)));
//! while zc.advance(Duration::from_millis(16)) {}
//! assert_eq!(zc.mode(), ViewMode::Fill);
//! assert!((zc.zoom() - 1.5).abs() < 1e-9);
//!
//! // One wheel notch at the viewport center.
//! zc.on_wheel(120.0, Point::new(400.0, 300.0));
//! while zc.advance(Duration::from_millis(16)) {}
//! assert_eq!(zc.mode(), ViewMode::Custom);
//! assert!((zc.zoom() - 2.1).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Every write carries a [`WriteOrigin`]. Animation frames never change the
//!   mode; user writes always move it to [`ViewMode::Custom`].
//! - Overlapping zoom requests are tracked with completion tokens; the zoom
//!   settles when the last one completes, not when the first does.
//! - Degenerate sizes, non-finite targets, and input before content is
//!   attached are dropped and logged through the `log` facade; only
//!   configuration mistakes are reported as errors ([`ConfigError`]).
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod animation;
mod config;
mod control;
mod error;
mod mode;
mod pan;
mod state;
mod zoom;

pub use animation::{AnimatedProperty, AnimationCoordinator, AnimationFrame, RequestOutcome};
pub use config::{WheelZoom, ZoomConfig};
pub use control::ZoomControl;
pub use error::{ConfigError, Skipped};
pub use mode::{ContentMetrics, ModeEvent, ModeStateMachine, Retarget, Transition};
pub use pan::{DispatchPhase, Modifiers, PanStateMachine, PointerAction};
pub use state::{ModifierMode, ViewMode, ViewportState, WriteOrigin};
pub use zoom::{ZoomGesture, ZoomTarget, compute_zoom};
