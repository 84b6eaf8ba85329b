// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Size, Vec2};

/// How the control positions its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Aspect-fit the content into the viewport and keep it fitted on resize.
    Fill,
    /// Show the content at zoom `1.0`.
    Original,
    /// Whatever the user last panned or zoomed to.
    #[default]
    Custom,
}

/// Pointer interaction currently in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ModifierMode {
    /// No interaction.
    #[default]
    None,
    /// Pointer drag is panning the content.
    Pan,
}

/// Who is writing to the viewport.
///
/// Animation-driven writes never change the [`ViewMode`]; user writes always
/// drop the control into [`ViewMode::Custom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOrigin {
    /// A frame of an animated transition.
    Animation,
    /// A direct, non-animated write from the host or from pointer panning.
    User,
}

/// Zoom, translate, and modes of a single control.
///
/// `revision` increases by one for every change that a render sink would need
/// to observe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    zoom: f64,
    translate: Vec2,
    mode: ViewMode,
    modifier_mode: ModifierMode,
    revision: u64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(1.0, Vec2::ZERO)
    }
}

impl ViewportState {
    /// Creates a state in [`ViewMode::Custom`] with no interaction active.
    #[must_use]
    pub fn new(zoom: f64, translate: Vec2) -> Self {
        Self {
            zoom,
            translate,
            mode: ViewMode::Custom,
            modifier_mode: ModifierMode::None,
            revision: 0,
        }
    }

    /// Current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current translation in viewport units.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Current view mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Current pointer interaction.
    #[must_use]
    pub fn modifier_mode(&self) -> ModifierMode {
        self.modifier_mode
    }

    /// Change counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Transform that the render sink applies to the content: scale about the
    /// content center, then translate.
    #[must_use]
    pub fn render_transform(&self, content_size: Size) -> Affine {
        let center = content_size.to_vec2() / 2.0;
        Affine::translate(self.translate + center)
            * Affine::scale(self.zoom)
            * Affine::translate(-center)
    }

    pub(crate) fn write_zoom(&mut self, zoom: f64) -> bool {
        if self.zoom == zoom {
            return false;
        }
        self.zoom = zoom;
        self.bump();
        true
    }

    pub(crate) fn write_translate(&mut self, translate: Vec2) -> bool {
        if self.translate == translate {
            return false;
        }
        self.translate = translate;
        self.bump();
        true
    }

    pub(crate) fn write_mode(&mut self, mode: ViewMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.bump();
        true
    }

    pub(crate) fn write_modifier_mode(&mut self, modifier_mode: ModifierMode) {
        if self.modifier_mode != modifier_mode {
            self.modifier_mode = modifier_mode;
            self.bump();
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
