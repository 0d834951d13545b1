// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer grab tracking: compute movement deltas for the pointer holding a drawer.
//!
//! ## Usage
//!
//! 1) Start a grab with [`PointerGrab::new`] when a pointer captures a drawer.
//! 2) On each move event, call [`PointerGrab::update`] to get the delta since the
//!    last sample; samples from other pointers are ignored.
//! 3) [`PointerGrab::total_offset`] gives the cumulative movement since the grab began.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_drawer::pointer::{PointerGrab, PointerId};
//!
//! let finger = PointerId(1);
//! let mut grab = PointerGrab::new(finger, Point::new(10.0, 20.0));
//!
//! let delta = grab.update(finger, Point::new(15.0, 25.0)).unwrap();
//! assert_eq!(delta.x, 5.0);
//!
//! // Another pointer moving does not disturb the grab.
//! assert!(grab.update(PointerId(2), Point::new(500.0, 0.0)).is_none());
//! assert_eq!(grab.total_offset().x, 5.0);
//! ```

use kurbo::{Point, Vec2};

/// Identifies one pointer (finger, pen or mouse) across its down/move/up events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// A pointer holding a drawer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerGrab {
    pointer: PointerId,
    start_pos: Point,
    last_pos: Point,
}

impl PointerGrab {
    /// Begins a grab by `pointer` at `pos`.
    #[must_use]
    pub fn new(pointer: PointerId, pos: Point) -> Self {
        Self {
            pointer,
            start_pos: pos,
            last_pos: pos,
        }
    }

    /// The pointer holding this grab.
    #[must_use]
    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// Returns `true` if `pointer` is the one holding this grab.
    #[must_use]
    pub fn is_held_by(&self, pointer: PointerId) -> bool {
        self.pointer == pointer
    }

    /// Feeds a new sample, returning the movement since the previous one.
    ///
    /// Returns `None` for samples from any other pointer.
    pub fn update(&mut self, pointer: PointerId, pos: Point) -> Option<Vec2> {
        if !self.is_held_by(pointer) {
            return None;
        }
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        Some(delta)
    }

    /// Movement since the grab began.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.last_pos - self.start_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: PointerId = PointerId(7);

    #[test]
    fn new_grab_has_no_offset() {
        let grab = PointerGrab::new(P, Point::new(10.0, 20.0));
        assert_eq!(grab.pointer(), P);
        assert_eq!(grab.total_offset(), Vec2::ZERO);
    }

    #[test]
    fn update_tracks_incremental_deltas() {
        let mut grab = PointerGrab::new(P, Point::new(0.0, 0.0));

        assert_eq!(grab.update(P, Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(grab.update(P, Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(grab.update(P, Point::new(10.0, 10.0)), Some(Vec2::new(2.0, 3.0)));

        assert_eq!(grab.total_offset(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn foreign_pointer_is_ignored() {
        let mut grab = PointerGrab::new(P, Point::new(0.0, 0.0));
        assert_eq!(grab.update(PointerId(8), Point::new(50.0, 50.0)), None);
        assert_eq!(grab.total_offset(), Vec2::ZERO);
        assert!(!grab.is_held_by(PointerId(8)));
    }
}
