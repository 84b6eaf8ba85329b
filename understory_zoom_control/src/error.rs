// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error and skip reasons.

use core::fmt;

/// Error returned when a [`ZoomConfig`](crate::ZoomConfig) is constructed with
/// values that cannot describe a usable zoom range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `min_zoom` was zero, negative, or not finite.
    NonPositiveMinZoom {
        /// The rejected minimum zoom.
        min_zoom: f64,
    },
    /// `max_zoom` was smaller than `min_zoom`, or not finite.
    InvertedZoomRange {
        /// The configured minimum zoom.
        min_zoom: f64,
        /// The rejected maximum zoom.
        max_zoom: f64,
    },
    /// The wheel tuning had a non-positive divisor or an empty factor range.
    InvalidWheelZoom,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMinZoom { min_zoom } => {
                write!(f, "min_zoom must be finite and greater than zero, got {min_zoom}")
            }
            Self::InvertedZoomRange { min_zoom, max_zoom } => write!(
                f,
                "max_zoom ({max_zoom}) must be finite and not less than min_zoom ({min_zoom})"
            ),
            Self::InvalidWheelZoom => f.write_str(
                "wheel zoom needs a positive divisor and 0 < min_factor <= max_factor",
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Why an operation was dropped without touching the viewport.
///
/// [`ZoomControl`](crate::ZoomControl) logs these and carries on; its public
/// operations never return them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skipped {
    /// Content or viewport has a zero (or non-finite) extent.
    DegenerateGeometry,
    /// A NaN or infinite animation target.
    InvalidAnimationTarget,
    /// No content is attached yet.
    NoContentAttached,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DegenerateGeometry => "degenerate content or viewport size",
            Self::InvalidAnimationTarget => "non-finite animation target",
            Self::NoContentAttached => "no content attached",
        })
    }
}
