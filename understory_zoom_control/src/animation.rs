// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-based interpolation of zoom and translate.
//!
//! The coordinator does not own a clock. The host's frame scheduler calls
//! [`AnimationCoordinator::advance`] with the elapsed time and applies the
//! returned [`AnimationFrame`].
//!
//! ## Supersession and settling
//!
//! A new request for a property replaces the one in flight and starts from the
//! value it had reached. A replaced zoom animation still holds its completion
//! token until its own duration runs out, so overlapping zoom requests finish
//! in any order. The zoom *settles* only when the last token is released:
//! that frame has [`AnimationFrame::settled`] set and the batch flag drops.

use core::time::Duration;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::error::Skipped;
use crate::zoom::ZoomTarget;

/// A property the coordinator can animate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Uniform zoom factor.
    Zoom,
    /// Horizontal translate.
    TranslateX,
    /// Vertical translate.
    TranslateY,
}

impl AnimatedProperty {
    fn index(self) -> usize {
        match self {
            Self::Zoom => 0,
            Self::TranslateX => 1,
            Self::TranslateY => 2,
        }
    }
}

/// Identifies one zoom animation until it completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct AnimationToken(u64);

/// Result of [`AnimationCoordinator::animate_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The animation is now in flight.
    Started,
    /// The target was NaN or infinite and nothing was scheduled.
    ///
    /// A rejected zoom request counts as completed at once; `settled` is
    /// true when no other zoom animation was still pending.
    Rejected {
        /// Whether the zoom settled as a consequence.
        settled: bool,
    },
}

/// Values produced by one [`AnimationCoordinator::advance`] step.
///
/// A `None` slot means the property is not animating.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationFrame {
    /// Interpolated zoom.
    pub zoom: Option<f64>,
    /// Interpolated horizontal translate.
    pub translate_x: Option<f64>,
    /// Interpolated vertical translate.
    pub translate_y: Option<f64>,
    /// The last pending zoom animation completed during this step.
    pub settled: bool,
}

impl AnimationFrame {
    fn slot(&mut self, property: AnimatedProperty) -> &mut Option<f64> {
        match property {
            AnimatedProperty::Zoom => &mut self.zoom,
            AnimatedProperty::TranslateX => &mut self.translate_x,
            AnimatedProperty::TranslateY => &mut self.translate_y,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Track {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    token: Option<AnimationToken>,
}

impl Track {
    fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * t
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// A superseded zoom animation still waiting for its completion.
#[derive(Clone, Copy, Debug)]
struct Retired {
    token: AnimationToken,
    remaining: Duration,
}

/// Drives zoom and translate toward their targets.
#[derive(Clone, Debug, Default)]
pub struct AnimationCoordinator {
    tracks: [Option<Track>; 3],
    retired: SmallVec<[Retired; 4]>,
    pending_zoom: HashSet<AnimationToken>,
    next_token: u64,
    batch_active: bool,
}

impl AnimationCoordinator {
    /// Creates an idle coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts animating `property` from `from` to `target` over `duration`.
    ///
    /// If the property is already animating, that animation is superseded and
    /// the new one starts from its current value instead of `from`.
    pub fn animate_to(
        &mut self,
        property: AnimatedProperty,
        from: f64,
        target: f64,
        duration: Duration,
    ) -> RequestOutcome {
        if !target.is_finite() {
            log::debug!(
                "rejected {property:?} animation to {target}: {}",
                Skipped::InvalidAnimationTarget
            );
            let settled = property == AnimatedProperty::Zoom && self.settle_if_idle();
            return RequestOutcome::Rejected { settled };
        }

        let slot = &mut self.tracks[property.index()];
        let from = match slot.take() {
            Some(previous) => {
                if let Some(token) = previous.token {
                    self.retired.push(Retired {
                        token,
                        remaining: previous.duration.saturating_sub(previous.elapsed),
                    });
                }
                previous.value()
            }
            None => from,
        };

        let token = (property == AnimatedProperty::Zoom).then(|| {
            let token = self.mint();
            self.pending_zoom.insert(token);
            token
        });
        log::trace!("animating {property:?} {from} -> {target} over {duration:?}");
        self.tracks[property.index()] = Some(Track {
            from,
            to: target,
            elapsed: Duration::ZERO,
            duration,
            token,
        });
        RequestOutcome::Started
    }

    /// Animates all three properties toward `target` as one batch.
    ///
    /// The batch flag stays up until the zoom settles; translate completions
    /// never clear it. Returns `true` if the zoom settled immediately because
    /// its target was rejected.
    pub fn trigger_batch(
        &mut self,
        current: ZoomTarget,
        target: ZoomTarget,
        duration: Duration,
    ) -> bool {
        self.batch_active = true;
        self.animate_to(
            AnimatedProperty::TranslateX,
            current.translate.x,
            target.translate.x,
            duration,
        );
        self.animate_to(
            AnimatedProperty::TranslateY,
            current.translate.y,
            target.translate.y,
            duration,
        );
        matches!(
            self.animate_to(AnimatedProperty::Zoom, current.zoom, target.zoom, duration),
            RequestOutcome::Rejected { settled: true }
        )
    }

    /// Advances every animation by `dt`.
    pub fn advance(&mut self, dt: Duration) -> AnimationFrame {
        let mut frame = AnimationFrame::default();
        let mut released = false;

        for property in [
            AnimatedProperty::Zoom,
            AnimatedProperty::TranslateX,
            AnimatedProperty::TranslateY,
        ] {
            let slot = &mut self.tracks[property.index()];
            let Some(track) = slot.as_mut() else {
                continue;
            };
            track.elapsed = track.elapsed.saturating_add(dt).min(track.duration);
            *frame.slot(property) = Some(track.value());
            if track.is_done() {
                if let Some(token) = track.token {
                    released |= self.pending_zoom.remove(&token);
                }
                *slot = None;
            }
        }

        let pending = &mut self.pending_zoom;
        self.retired.retain(|retired| {
            retired.remaining = retired.remaining.saturating_sub(dt);
            if retired.remaining.is_zero() {
                released |= pending.remove(&retired.token);
                false
            } else {
                true
            }
        });

        frame.settled = released && self.settle_if_idle();
        frame
    }

    /// Detaches the animation on `property`, if any.
    ///
    /// Cancelling zoom releases every pending zoom token, superseded ones
    /// included. Returns `true` if that settled the zoom.
    pub fn cancel(&mut self, property: AnimatedProperty) -> bool {
        self.tracks[property.index()] = None;
        if property != AnimatedProperty::Zoom {
            return false;
        }
        self.retired.clear();
        if self.pending_zoom.is_empty() {
            return false;
        }
        self.pending_zoom.clear();
        self.settle_if_idle()
    }

    /// Detaches every animation and drops the batch flag.
    pub fn cancel_all(&mut self) {
        self.tracks = [None; 3];
        self.retired.clear();
        self.pending_zoom.clear();
        self.batch_active = false;
    }

    /// Whether a batch is in flight (set by [`Self::trigger_batch`], cleared
    /// when the zoom settles).
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.batch_active
    }

    /// Whether `property` has a live animation.
    #[must_use]
    pub fn is_property_animating(&self, property: AnimatedProperty) -> bool {
        self.tracks[property.index()].is_some()
    }

    /// Number of zoom animations that have not completed yet, superseded
    /// ones included.
    #[must_use]
    pub fn pending_zoom_count(&self) -> usize {
        self.pending_zoom.len()
    }

    /// Target of the live animation on `property`.
    #[must_use]
    pub fn target(&self, property: AnimatedProperty) -> Option<f64> {
        self.tracks[property.index()].map(|track| track.to)
    }

    fn mint(&mut self) -> AnimationToken {
        let token = AnimationToken(self.next_token);
        self.next_token += 1;
        token
    }

    fn settle_if_idle(&mut self) -> bool {
        if !self.pending_zoom.is_empty() {
            return false;
        }
        log::debug!("zoom settled");
        self.batch_active = false;
        true
    }
}
