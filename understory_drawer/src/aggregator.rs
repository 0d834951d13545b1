// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container-wide motion state and boundary notifications.
//!
//! Every drawer reports its own [`MotionState`]. The container exposes a single
//! consolidated value: `Dragging` if any drawer is held by a pointer, else
//! `Settling` if any drawer is animating, else `Idle`. A user touching one drawer
//! therefore masks settle animations running on the others.
//!
//! ```rust
//! use understory_drawer::MotionState;
//! use understory_drawer::aggregator::consolidate;
//!
//! let state = consolidate([MotionState::Settling, MotionState::Dragging]);
//! assert_eq!(state, MotionState::Dragging);
//! assert_eq!(consolidate([MotionState::Idle; 3]), MotionState::Idle);
//! ```

use crate::listener::DrawerListener;
use crate::registry::DrawerId;
use crate::state::{Boundary, DrawerVisualState};

/// Motion state of a single drawer or of the whole container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Nothing is moving.
    #[default]
    Idle,
    /// A drawer is held by a pointer.
    Dragging,
    /// A drawer is animating toward a rest position.
    Settling,
}

/// Consolidates per-drawer states: `Dragging` beats `Settling` beats `Idle`.
#[must_use]
pub fn consolidate(states: impl IntoIterator<Item = MotionState>) -> MotionState {
    let mut result = MotionState::Idle;
    for state in states {
        match state {
            MotionState::Dragging => return MotionState::Dragging,
            MotionState::Settling => result = MotionState::Settling,
            MotionState::Idle => {}
        }
    }
    result
}

/// Scrim opacity: the largest offset among the drawers, or `0.0` with none.
#[must_use]
pub fn scrim_opacity(offsets: impl IntoIterator<Item = f64>) -> f64 {
    offsets.into_iter().fold(0.0, f64::max)
}

/// Tracks the consolidated motion state and emits transition notifications.
#[derive(Copy, Clone, Debug, Default)]
pub struct MotionAggregator {
    state: MotionState,
}

impl MotionAggregator {
    /// Creates an aggregator in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last consolidated state.
    #[must_use]
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Recomputes the consolidated state from every drawer's state.
    ///
    /// Notifies `listener` only when the consolidated value actually changes.
    pub fn recompute<L: DrawerListener + ?Sized>(
        &mut self,
        states: impl IntoIterator<Item = MotionState>,
        listener: &mut L,
    ) -> MotionState {
        let state = consolidate(states);
        if state != self.state {
            self.state = state;
            #[cfg(feature = "tracing")]
            tracing::debug!(?state, "drawer motion state changed");
            listener.on_drawer_state_changed(state);
        }
        state
    }

    /// Handles a drawer whose own state just returned to idle.
    ///
    /// Fires the opened or closed notification when the drawer rests on a boundary
    /// it was not already known to be at. Resting between the boundaries fires
    /// nothing.
    pub fn on_transition_to_idle<L: DrawerListener + ?Sized>(
        &self,
        drawer: DrawerId,
        boundary: Option<Boundary>,
        visual: &mut DrawerVisualState,
        listener: &mut L,
    ) -> Option<Boundary> {
        let crossed = visual.settle_at(boundary?)?;
        match crossed {
            Boundary::Open => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?drawer, "drawer opened");
                listener.on_drawer_opened(drawer);
            }
            Boundary::Closed => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?drawer, "drawer closed");
                listener.on_drawer_closed(drawer);
            }
        }
        Some(crossed)
    }
}
