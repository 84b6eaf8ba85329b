// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use kurbo::{Affine, Point, Size, Vec2};

use crate::animation::{AnimatedProperty, AnimationCoordinator};
use crate::config::ZoomConfig;
use crate::error::Skipped;
use crate::mode::{ContentMetrics, ModeEvent, ModeStateMachine, Retarget};
use crate::pan::{DispatchPhase, Modifiers, PanStateMachine, PointerAction};
use crate::state::{ModifierMode, ViewMode, ViewportState, WriteOrigin};
use crate::zoom::{ZoomGesture, ZoomTarget, compute_zoom};

type Observer = Box<dyn FnMut(&ViewportState)>;

/// Headless pan/zoom control.
///
/// Owns the [`ViewportState`] and routes every input through the zoom
/// computation, the mode and pan state machines, and the animation
/// coordinator. The host forwards input and size changes, calls
/// [`ZoomControl::advance`] once per frame while [`ZoomControl::needs_frame`]
/// is true, and applies [`ZoomControl::render_transform`] to its content.
pub struct ZoomControl {
    config: ZoomConfig,
    state: ViewportState,
    modes: ModeStateMachine,
    animation: AnimationCoordinator,
    pan: PanStateMachine,
    observer: Option<Observer>,
}

impl fmt::Debug for ZoomControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomControl")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("modes", &self.modes)
            .field("animation", &self.animation)
            .field("pan", &self.pan)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for ZoomControl {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomControl {
    /// Creates a control with no content, in [`ViewMode::Custom`], at zoom
    /// `1.0` pulled into the configured range.
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            state: ViewportState::new(config.clamp_zoom(1.0), Vec2::ZERO),
            modes: ModeStateMachine::new(),
            animation: AnimationCoordinator::new(),
            pan: PanStateMachine::default(),
            observer: None,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Replaces the settings. The zoom is pulled into the new range, with
    /// translate scaled as in [`ZoomControl::set_zoom`], and in
    /// [`ViewMode::Fill`] the content is refitted. The mode is kept.
    pub fn set_config(&mut self, config: ZoomConfig) {
        let before = self.state.revision();
        self.config = config;
        let old = self.state.zoom();
        let clamped = config.clamp_zoom(old);
        if clamped != old {
            self.animation.cancel(AnimatedProperty::Zoom);
            self.animation.cancel(AnimatedProperty::TranslateX);
            self.animation.cancel(AnimatedProperty::TranslateY);
            self.state.write_zoom(clamped);
            self.state.write_translate(self.state.translate() * (clamped / old));
        }
        self.run_transition(ModeEvent::GeometryChanged);
        self.notify_if_changed(before);
    }

    /// Snapshot of zoom, translate and modes.
    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Current zoom.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.state.zoom()
    }

    /// Current translate.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.state.translate()
    }

    /// Current view mode.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.state.mode()
    }

    /// Current pointer interaction.
    #[must_use]
    pub fn modifier_mode(&self) -> ModifierMode {
        self.state.modifier_mode()
    }

    /// Attached content, if any.
    #[must_use]
    pub fn content(&self) -> Option<ContentMetrics> {
        self.modes.content()
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.modes.viewport()
    }

    /// Whether an animated batch has not settled yet.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    /// Whether [`ZoomControl::advance`] still has work to do.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.animation.is_animating()
            || self.animation.pending_zoom_count() > 0
            || self.animation.is_property_animating(AnimatedProperty::TranslateX)
            || self.animation.is_property_animating(AnimatedProperty::TranslateY)
    }

    /// Number of zoom animations still in flight, superseded ones included.
    #[must_use]
    pub fn pending_zoom_count(&self) -> usize {
        self.animation.pending_zoom_count()
    }

    /// Transform for the attached content, or `None` without content.
    #[must_use]
    pub fn render_transform(&self) -> Option<Affine> {
        self.modes
            .content()
            .map(|content| self.state.render_transform(content.content_size))
    }

    /// Registers a callback that runs after every visible change.
    pub fn set_observer(&mut self, observer: impl FnMut(&ViewportState) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the change callback.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Attaches content and requests [`ViewMode::Fill`].
    pub fn attach_content(&mut self, content: ContentMetrics) {
        let before = self.state.revision();
        self.modes.set_content(Some(content));
        self.run_transition(ModeEvent::Request(ViewMode::Fill));
        self.notify_if_changed(before);
    }

    /// Drops the content. Animations stop, any pan ends and translate returns
    /// to zero.
    pub fn detach_content(&mut self) {
        let before = self.state.revision();
        if !self.modes.set_content(None) {
            return;
        }
        self.animation.cancel_all();
        self.pan.reset();
        self.state.write_modifier_mode(ModifierMode::None);
        self.state.write_translate(Vec2::ZERO);
        self.notify_if_changed(before);
    }

    /// Measurement update for the attached content.
    pub fn set_content_size(&mut self, content_size: Size, desired_size: Size) {
        if self.modes.content().is_none() {
            log::debug!("content size ignored: {}", Skipped::NoContentAttached);
            return;
        }
        let before = self.state.revision();
        if self.modes.set_content(Some(ContentMetrics {
            content_size,
            desired_size,
        })) {
            self.run_transition(ModeEvent::GeometryChanged);
        }
        self.notify_if_changed(before);
    }

    /// Viewport size update from the hosting element.
    pub fn set_viewport_size(&mut self, size: Size) {
        let before = self.state.revision();
        if self.modes.set_viewport(size) {
            self.run_transition(ModeEvent::GeometryChanged);
        }
        self.notify_if_changed(before);
    }

    /// Switches mode, animating toward the fill/original target.
    pub fn set_mode(&mut self, mode: ViewMode) {
        let before = self.state.revision();
        self.run_transition(ModeEvent::Request(mode));
        self.notify_if_changed(before);
    }

    /// Shorthand for `set_mode(ViewMode::Fill)`.
    pub fn zoom_to_fill(&mut self) {
        self.set_mode(ViewMode::Fill);
    }

    /// Shorthand for `set_mode(ViewMode::Original)`.
    pub fn zoom_to_original(&mut self) {
        self.set_mode(ViewMode::Original);
    }

    /// Sets the zoom directly, without animation.
    ///
    /// Translate is scaled by the same ratio so the content center stays put,
    /// and the mode becomes [`ViewMode::Custom`].
    pub fn set_zoom(&mut self, zoom: f64) {
        if !self.has_content("set_zoom") || !zoom.is_finite() {
            return;
        }
        let before = self.state.revision();
        let old = self.state.zoom();
        let zoom = self.config.clamp_zoom(zoom);
        if zoom == old {
            return;
        }
        self.apply_zoom(zoom, WriteOrigin::User);
        let ratio = zoom / old;
        self.apply_translate(self.state.translate() * ratio, WriteOrigin::User);
        self.notify_if_changed(before);
    }

    /// Sets the translate directly, without animation.
    pub fn set_translate(&mut self, translate: Vec2) {
        if !self.has_content("set_translate") || !translate.is_finite() {
            return;
        }
        let before = self.state.revision();
        self.apply_translate(translate, WriteOrigin::User);
        self.notify_if_changed(before);
    }

    /// Animated zoom about a point; see [`compute_zoom`].
    pub fn zoom_at(&mut self, gesture: ZoomGesture) {
        if !self.has_content("zoom_at") {
            return;
        }
        let before = self.state.revision();
        let target = compute_zoom(&gesture, &self.state, &self.config, true);
        self.start_batch(target);
        self.run_transition(ModeEvent::Request(ViewMode::Custom));
        self.notify_if_changed(before);
    }

    /// Wheel zoom toward `position`, anchored at the viewport center.
    pub fn on_wheel(&mut self, delta: f64, position: Point) {
        let anchor = (self.modes.viewport().to_vec2() / 2.0).to_point();
        let factor = self.config.wheel().factor(delta);
        self.zoom_at(ZoomGesture::at(factor, anchor, position));
    }

    /// Pointer-down; see [`PanStateMachine::on_pointer_down`].
    pub fn on_pointer_down(
        &mut self,
        phase: DispatchPhase,
        position: Point,
        modifiers: Modifiers,
    ) -> PointerAction {
        if !self.has_content("on_pointer_down") {
            return PointerAction::Ignore;
        }
        let action = self
            .pan
            .on_pointer_down(phase, position, modifiers, self.state.translate());
        if action == PointerAction::Capture {
            let before = self.state.revision();
            self.state.write_modifier_mode(ModifierMode::Pan);
            self.notify_if_changed(before);
        }
        action
    }

    /// Pointer-move; pans while a pan is active.
    pub fn on_pointer_move(&mut self, position: Point) {
        if let Some(translate) = self.pan.on_pointer_move(position) {
            let before = self.state.revision();
            self.apply_translate(translate, WriteOrigin::User);
            self.notify_if_changed(before);
        }
    }

    /// Pointer-up; ends an active pan.
    pub fn on_pointer_up(&mut self) -> PointerAction {
        let action = self.pan.on_pointer_up();
        if action == PointerAction::Release {
            let before = self.state.revision();
            self.state.write_modifier_mode(ModifierMode::None);
            self.notify_if_changed(before);
        }
        action
    }

    /// Advances animations by `dt` and applies the interpolated values.
    ///
    /// Returns [`ZoomControl::needs_frame`] after the step.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let before = self.state.revision();
        let frame = self.animation.advance(dt);
        if let Some(zoom) = frame.zoom {
            self.apply_zoom(zoom, WriteOrigin::Animation);
        }
        if frame.translate_x.is_some() || frame.translate_y.is_some() {
            let current = self.state.translate();
            let translate = Vec2::new(
                frame.translate_x.unwrap_or(current.x),
                frame.translate_y.unwrap_or(current.y),
            );
            self.apply_translate(translate, WriteOrigin::Animation);
        }
        if frame.settled {
            log::debug!("zoom committed at {}", self.state.zoom());
        }
        self.notify_if_changed(before);
        self.needs_frame()
    }

    fn has_content(&self, operation: &str) -> bool {
        let attached = self.modes.content().is_some();
        if !attached {
            log::debug!("{operation} ignored: {}", Skipped::NoContentAttached);
        }
        attached
    }

    fn apply_zoom(&mut self, zoom: f64, origin: WriteOrigin) {
        if origin == WriteOrigin::User {
            self.animation.cancel(AnimatedProperty::Zoom);
        }
        if self.state.write_zoom(self.config.clamp_zoom(zoom)) {
            self.run_transition(ModeEvent::Wrote(origin));
        }
    }

    fn apply_translate(&mut self, translate: Vec2, origin: WriteOrigin) {
        if origin == WriteOrigin::User {
            self.animation.cancel(AnimatedProperty::TranslateX);
            self.animation.cancel(AnimatedProperty::TranslateY);
        }
        let translate = if self.modes.content().is_some() {
            translate
        } else {
            Vec2::ZERO
        };
        if self.state.write_translate(translate) {
            self.run_transition(ModeEvent::Wrote(origin));
        }
    }

    fn run_transition(&mut self, event: ModeEvent) {
        let transition = self
            .modes
            .transition(self.state.mode(), event, &self.config);
        if self.state.write_mode(transition.mode) {
            log::debug!("mode -> {:?} after {event:?}", transition.mode);
        }
        match transition.retarget {
            Retarget::Keep => {}
            Retarget::Animate(target) => self.start_batch(target),
            Retarget::Skip(reason) => log::debug!("{event:?} not applied: {reason}"),
        }
    }

    fn start_batch(&mut self, target: ZoomTarget) {
        let current = ZoomTarget {
            zoom: self.state.zoom(),
            translate: self.state.translate(),
        };
        if self
            .animation
            .trigger_batch(current, target, self.config.animation_duration())
        {
            log::debug!("zoom target {} rejected, batch settled", target.zoom);
        }
    }

    fn notify_if_changed(&mut self, before: u64) {
        if self.state.revision() == before {
            return;
        }
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }
}
