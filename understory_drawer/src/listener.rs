// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer notifications.
//!
//! A [`DrawerLayout`](crate::DrawerLayout) owns exactly one listener, supplied at
//! construction. Use `()` to ignore events, a `Vec<DrawerEvent>` to record them, or
//! implement [`DrawerListener`] directly.

use alloc::vec::Vec;

use crate::aggregator::MotionState;
use crate::registry::DrawerId;

/// Receives drawer notifications. Every method defaults to doing nothing.
pub trait DrawerListener {
    /// The drawer's offset changed. Fired on every position change, however small.
    fn on_drawer_slide(&mut self, drawer: DrawerId, offset: f64) {
        let _ = (drawer, offset);
    }

    /// The drawer settled fully open.
    fn on_drawer_opened(&mut self, drawer: DrawerId) {
        let _ = drawer;
    }

    /// The drawer settled fully closed.
    fn on_drawer_closed(&mut self, drawer: DrawerId) {
        let _ = drawer;
    }

    /// The consolidated motion state of the container changed.
    fn on_drawer_state_changed(&mut self, state: MotionState) {
        let _ = state;
    }
}

impl DrawerListener for () {}

impl<L: DrawerListener + ?Sized> DrawerListener for &mut L {
    fn on_drawer_slide(&mut self, drawer: DrawerId, offset: f64) {
        (**self).on_drawer_slide(drawer, offset);
    }

    fn on_drawer_opened(&mut self, drawer: DrawerId) {
        (**self).on_drawer_opened(drawer);
    }

    fn on_drawer_closed(&mut self, drawer: DrawerId) {
        (**self).on_drawer_closed(drawer);
    }

    fn on_drawer_state_changed(&mut self, state: MotionState) {
        (**self).on_drawer_state_changed(state);
    }
}

/// A recorded drawer notification.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawerEvent {
    /// See [`DrawerListener::on_drawer_slide`].
    Slide {
        /// The drawer that moved.
        drawer: DrawerId,
        /// Its new offset.
        offset: f64,
    },
    /// See [`DrawerListener::on_drawer_opened`].
    Opened(DrawerId),
    /// See [`DrawerListener::on_drawer_closed`].
    Closed(DrawerId),
    /// See [`DrawerListener::on_drawer_state_changed`].
    StateChanged(MotionState),
}

impl DrawerListener for Vec<DrawerEvent> {
    fn on_drawer_slide(&mut self, drawer: DrawerId, offset: f64) {
        self.push(DrawerEvent::Slide { drawer, offset });
    }

    fn on_drawer_opened(&mut self, drawer: DrawerId) {
        self.push(DrawerEvent::Opened(drawer));
    }

    fn on_drawer_closed(&mut self, drawer: DrawerId) {
        self.push(DrawerEvent::Closed(drawer));
    }

    fn on_drawer_state_changed(&mut self, state: MotionState) {
        self.push(DrawerEvent::StateChanged(state));
    }
}
