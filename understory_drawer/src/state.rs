// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-drawer visual state.

/// Tolerance used when deciding whether a settled drawer sits on a boundary.
///
/// Applied in offset space against `0.0`/`1.0`, and in container units against
/// the edge's closed rest coordinate.
pub const BOUNDARY_EPSILON: f64 = 1e-4;

/// Which end of its range a resting drawer sits at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Only the handle is visible.
    Closed,
    /// The drawer is fully on screen.
    Open,
}

/// Mutable state tracked for every registered drawer.
///
/// Created with the drawer (closed, not known open) and dropped when the drawer is
/// unregistered. It survives layout passes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DrawerVisualState {
    /// Normalized openness in `[0, 1]`, derived from the drawer's position.
    pub offset: f64,
    /// Last open/closed status reported to the listener.
    pub known_open: bool,
    /// A pointer has grabbed the drawer but the capture has not been confirmed yet.
    pub peeking: bool,
}

impl DrawerVisualState {
    /// Creates the state of a freshly registered drawer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 0.0,
            known_open: false,
            peeking: false,
        }
    }

    /// Stores a new offset, clamped to `[0, 1]`.
    ///
    /// Returns `true` when the stored value changed.
    pub fn set_offset(&mut self, offset: f64) -> bool {
        let offset = offset.min(1.0).max(0.0);
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        true
    }

    /// Classifies the current offset against the two boundaries.
    ///
    /// `at_closed_rest` lets the caller report that the drawer's position equals its
    /// closed rest position, which counts as closed even when the edge's offset
    /// formula does not reach zero there.
    #[must_use]
    pub fn boundary(&self, at_closed_rest: bool) -> Option<Boundary> {
        if at_closed_rest || self.offset <= BOUNDARY_EPSILON {
            Some(Boundary::Closed)
        } else if self.offset >= 1.0 - BOUNDARY_EPSILON {
            Some(Boundary::Open)
        } else {
            None
        }
    }

    /// Records a settled boundary, returning it only if it differs from the last one
    /// reported.
    pub fn settle_at(&mut self, boundary: Boundary) -> Option<Boundary> {
        match boundary {
            Boundary::Closed if self.known_open => {
                self.known_open = false;
                Some(Boundary::Closed)
            }
            Boundary::Open if !self.known_open => {
                self.known_open = true;
                Some(Boundary::Open)
            }
            _ => None,
        }
    }
}
