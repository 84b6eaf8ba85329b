// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use crate::error::ConfigError;

/// Mapping from raw wheel deltas to per-tick zoom factors.
///
/// A wheel event with delta `d` zooms by
/// `clamp(d / divisor + 1, min_factor, max_factor)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelZoom {
    /// Wheel delta that corresponds to doubling the zoom (before clamping).
    pub divisor: f64,
    /// Smallest factor a single wheel tick may apply.
    pub min_factor: f64,
    /// Largest factor a single wheel tick may apply.
    pub max_factor: f64,
}

impl Default for WheelZoom {
    fn default() -> Self {
        Self {
            divisor: 300.0,
            min_factor: 0.2,
            max_factor: 2.0,
        }
    }
}

impl WheelZoom {
    /// Returns the zoom factor for a single wheel delta.
    #[must_use]
    pub fn factor(&self, delta: f64) -> f64 {
        (delta / self.divisor + 1.0).clamp(self.min_factor, self.max_factor)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.divisor.is_finite()
            && self.divisor > 0.0
            && self.min_factor.is_finite()
            && self.max_factor.is_finite()
            && self.min_factor > 0.0
            && self.min_factor <= self.max_factor;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidWheelZoom)
        }
    }
}

/// Host-provided settings for a [`ZoomControl`](crate::ZoomControl).
///
/// Construct with [`ZoomConfig::new`] so the zoom range is validated; the
/// default is `[0.01, 100]` with a 500 ms animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConfig {
    min_zoom: f64,
    max_zoom: f64,
    animation_duration: Duration,
    wheel: WheelZoom,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.01,
            max_zoom: 100.0,
            animation_duration: Duration::from_millis(500),
            wheel: WheelZoom::default(),
        }
    }
}

impl ZoomConfig {
    /// Creates a config, rejecting a zoom range that is empty or not positive.
    pub fn new(
        min_zoom: f64,
        max_zoom: f64,
        animation_duration: Duration,
    ) -> Result<Self, ConfigError> {
        if !min_zoom.is_finite() || min_zoom <= 0.0 {
            return Err(ConfigError::NonPositiveMinZoom { min_zoom });
        }
        if !max_zoom.is_finite() || max_zoom < min_zoom {
            return Err(ConfigError::InvertedZoomRange { min_zoom, max_zoom });
        }
        Ok(Self {
            min_zoom,
            max_zoom,
            animation_duration,
            wheel: WheelZoom::default(),
        })
    }

    /// Replaces the wheel tuning.
    pub fn with_wheel_zoom(mut self, wheel: WheelZoom) -> Result<Self, ConfigError> {
        wheel.validate()?;
        self.wheel = wheel;
        Ok(self)
    }

    /// Smallest allowed zoom.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Largest allowed zoom.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Length of every animated transition.
    #[must_use]
    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    /// Wheel tuning.
    #[must_use]
    pub fn wheel(&self) -> WheelZoom {
        self.wheel
    }

    /// Clamps `zoom` into `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wheel_factor_matches_scroll_notches() {
        let wheel = WheelZoom::default();
        assert!((wheel.factor(120.0) - 1.4).abs() < 1e-12, "one notch up");
        assert!((wheel.factor(-120.0) - 0.6).abs() < 1e-12, "one notch down");
        assert_eq!(wheel.factor(10_000.0), 2.0);
        assert_eq!(wheel.factor(-10_000.0), 0.2);
    }

    #[test]
    fn rejects_bad_zoom_ranges() {
        let d = Duration::from_millis(10);
        assert_eq!(
            ZoomConfig::new(0.0, 1.0, d),
            Err(ConfigError::NonPositiveMinZoom { min_zoom: 0.0 })
        );
        assert_eq!(
            ZoomConfig::new(2.0, 1.0, d),
            Err(ConfigError::InvertedZoomRange {
                min_zoom: 2.0,
                max_zoom: 1.0
            })
        );
        assert!(ZoomConfig::new(1.0, f64::INFINITY, d).is_err());
        assert!(ZoomConfig::new(1.0, 1.0, d).is_ok());
    }

    #[test]
    fn rejects_bad_wheel_tuning() {
        let config = ZoomConfig::default();
        let bad = WheelZoom {
            divisor: 0.0,
            ..WheelZoom::default()
        };
        assert_eq!(
            config.with_wheel_zoom(bad),
            Err(ConfigError::InvalidWheelZoom)
        );
        let flipped = WheelZoom {
            min_factor: 3.0,
            max_factor: 2.0,
            ..WheelZoom::default()
        };
        assert!(config.with_wheel_zoom(flipped).is_err());
    }
}
