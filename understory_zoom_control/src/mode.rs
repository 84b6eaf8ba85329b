// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View-mode transitions: [`ViewMode::Fill`], [`ViewMode::Original`] and
//! [`ViewMode::Custom`].
//!
//! [`ModeStateMachine::transition`] is called after every event that may
//! affect the mode. It returns the next mode and whether the control has to
//! animate toward a new zoom/translate.

use kurbo::{Size, Vec2};

use crate::config::ZoomConfig;
use crate::error::Skipped;
use crate::state::{ViewMode, WriteOrigin};
use crate::zoom::ZoomTarget;

/// Sizes reported by the measurement collaborator for attached content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentMetrics {
    /// Natural size of the content.
    pub content_size: Size,
    /// Size the content presenter asked for during layout.
    pub desired_size: Size,
}

impl ContentMetrics {
    /// Content whose desired size equals its natural size.
    #[must_use]
    pub fn new(content_size: Size) -> Self {
        Self {
            content_size,
            desired_size: content_size,
        }
    }

    /// Translate at zoom `1.0` that centers the content within its desired size.
    #[must_use]
    pub fn initial_translate(&self) -> Vec2 {
        -(self.content_size.to_vec2() - self.desired_size.to_vec2()) / 2.0
    }
}

/// Something that may move the control between modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeEvent {
    /// The host asked for a mode.
    Request(ViewMode),
    /// Zoom or translate was written.
    Wrote(WriteOrigin),
    /// Content or viewport size changed.
    GeometryChanged,
}

/// What the control should do after a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Retarget {
    /// Leave zoom and translate alone.
    Keep,
    /// Animate toward this target.
    Animate(ZoomTarget),
    /// A target was wanted but could not be computed.
    Skip(Skipped),
}

/// Next mode plus the follow-up action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Mode after the event.
    pub mode: ViewMode,
    /// Follow-up for zoom and translate.
    pub retarget: Retarget,
}

/// Derives fill/original targets from the current content and viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModeStateMachine {
    content: Option<ContentMetrics>,
    viewport: Size,
}

impl ModeStateMachine {
    /// A machine with no content and an empty viewport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attached content, if any.
    #[must_use]
    pub fn content(&self) -> Option<ContentMetrics> {
        self.content
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Replaces the content metrics. Returns `true` if they changed.
    pub fn set_content(&mut self, content: Option<ContentMetrics>) -> bool {
        if self.content == content {
            return false;
        }
        self.content = content;
        true
    }

    /// Replaces the viewport size. Returns `true` if it changed.
    pub fn set_viewport(&mut self, viewport: Size) -> bool {
        if self.viewport == viewport {
            return false;
        }
        self.viewport = viewport;
        true
    }

    /// Applies `event` to `current`.
    #[must_use]
    pub fn transition(
        &self,
        current: ViewMode,
        event: ModeEvent,
        config: &ZoomConfig,
    ) -> Transition {
        match event {
            ModeEvent::Request(mode) => Transition {
                mode,
                retarget: match mode {
                    ViewMode::Fill => Self::retarget(self.fill_target(config)),
                    ViewMode::Original => Self::retarget(self.original_target(config)),
                    ViewMode::Custom => Retarget::Keep,
                },
            },
            ModeEvent::Wrote(WriteOrigin::User) => Transition {
                mode: ViewMode::Custom,
                retarget: Retarget::Keep,
            },
            ModeEvent::Wrote(WriteOrigin::Animation) => Transition {
                mode: current,
                retarget: Retarget::Keep,
            },
            ModeEvent::GeometryChanged if current == ViewMode::Fill => Transition {
                mode: current,
                retarget: Self::retarget(self.fill_target(config)),
            },
            ModeEvent::GeometryChanged => Transition {
                mode: current,
                retarget: Retarget::Keep,
            },
        }
    }

    /// Zoom and translate that aspect-fit the content into the viewport.
    pub fn fill_target(&self, config: &ZoomConfig) -> Result<ZoomTarget, Skipped> {
        let content = self.content.ok_or(Skipped::NoContentAttached)?;
        let size = content.content_size;
        if !is_usable(size) || !is_usable(self.viewport) {
            return Err(Skipped::DegenerateGeometry);
        }
        let fit = (self.viewport.width / size.width).min(self.viewport.height / size.height);
        let zoom = config.clamp_zoom(fit);
        Ok(ZoomTarget {
            zoom,
            translate: content.initial_translate() * zoom,
        })
    }

    /// Zoom `1.0` (clamped into range) with the content centered.
    pub fn original_target(&self, config: &ZoomConfig) -> Result<ZoomTarget, Skipped> {
        let content = self.content.ok_or(Skipped::NoContentAttached)?;
        Ok(ZoomTarget {
            zoom: config.clamp_zoom(1.0),
            translate: content.initial_translate(),
        })
    }

    fn retarget(target: Result<ZoomTarget, Skipped>) -> Retarget {
        match target {
            Ok(target) => Retarget::Animate(target),
            Err(reason) => Retarget::Skip(reason),
        }
    }
}

fn is_usable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}
