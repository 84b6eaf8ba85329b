// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven panning.
//!
//! ## Usage
//!
//! 1) Forward pointer-down events for both dispatch phases to
//!    [`PanStateMachine::on_pointer_down`]. If it returns
//!    [`PointerAction::Capture`], capture the pointer.
//! 2) While panning, forward moves to [`PanStateMachine::on_pointer_move`] and
//!    write the returned translate directly.
//! 3) On pointer-up, call [`PanStateMachine::on_pointer_up`] and release the
//!    capture if it says so.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_zoom_control::{DispatchPhase, Modifiers, PanStateMachine, PointerAction};
//!
//! let mut pan = PanStateMachine::default();
//! let down = pan.on_pointer_down(
//!     DispatchPhase::Normal,
//!     Point::new(50.0, 50.0),
//!     Modifiers::empty(),
//!     Vec2::new(10.0, 0.0),
//! );
//! assert_eq!(down, PointerAction::Capture);
//!
//! let translate = pan.on_pointer_move(Point::new(70.0, 65.0)).unwrap();
//! assert_eq!(translate, Vec2::new(30.0, 15.0));
//!
//! assert_eq!(pan.on_pointer_up(), PointerAction::Release);
//! ```

use bitflags::bitflags;
use kurbo::{Point, Vec2};

use crate::state::ModifierMode;

bitflags! {
    /// Keyboard modifiers held while a pointer event is dispatched.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CONTROL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Platform meta key (Windows / Command / Super).
        const META = 1 << 3;
    }
}

/// Which dispatch pass a pointer-down arrived in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchPhase {
    /// Capture pass, before children see the event.
    Preview,
    /// Bubble pass, after children had their chance.
    Normal,
}

/// What the host should do with pointer capture after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    /// Nothing changed.
    Ignore,
    /// Panning started: capture the pointer and route moves here.
    Capture,
    /// Panning ended: release the capture.
    Release,
}

/// Tracks a pan drag from pointer-down to pointer-up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanStateMachine {
    mode: ModifierMode,
    /// Pointer position when the pan began.
    mouse_down: Point,
    /// Translate when the pan began.
    start_translate: Vec2,
}

impl PanStateMachine {
    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> ModifierMode {
        self.mode
    }

    /// Returns `true` while a pan is active.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.mode == ModifierMode::Pan
    }

    /// Handles a pointer-down.
    ///
    /// Without modifiers, panning starts on the normal phase. With Shift it
    /// starts on the preview phase so children cannot swallow it. Control and
    /// meta are left to host shortcuts; any other combination is ignored.
    pub fn on_pointer_down(
        &mut self,
        phase: DispatchPhase,
        position: Point,
        modifiers: Modifiers,
        translate: Vec2,
    ) -> PointerAction {
        if self.mode != ModifierMode::None {
            return PointerAction::Ignore;
        }
        let starts = if modifiers.is_empty() {
            phase == DispatchPhase::Normal
        } else if modifiers == Modifiers::SHIFT {
            phase == DispatchPhase::Preview
        } else {
            false
        };
        if !starts {
            return PointerAction::Ignore;
        }
        self.mode = ModifierMode::Pan;
        self.mouse_down = position;
        self.start_translate = translate;
        PointerAction::Capture
    }

    /// Returns the translate for the pointer at `position`, or `None` when
    /// not panning.
    pub fn on_pointer_move(&self, position: Point) -> Option<Vec2> {
        self.is_panning()
            .then(|| self.start_translate + (position - self.mouse_down))
    }

    /// Ends the pan, if one is active.
    pub fn on_pointer_up(&mut self) -> PointerAction {
        if !self.is_panning() {
            return PointerAction::Ignore;
        }
        self.mode = ModifierMode::None;
        PointerAction::Release
    }

    /// Drops an active pan without a pointer-up, for example when content
    /// goes away.
    pub fn reset(&mut self) -> PointerAction {
        self.on_pointer_up()
    }
}
