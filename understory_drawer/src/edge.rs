// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container edges a drawer can be anchored to.

use kurbo::{Point, Vec2};

use crate::geometry::{BottomEdge, EdgeGeometry, LeftEdge, RightEdge, TopEdge};

/// The container side a drawer slides in from.
///
/// The edge is fixed when the drawer is registered and never changes afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Anchored to the left side; opens toward +x.
    Left,
    /// Anchored to the right side; opens toward -x.
    Right,
    /// Anchored to the top side; opens toward +y.
    Top,
    /// Anchored to the bottom side; opens toward -y.
    Bottom,
}

impl Edge {
    /// All four edges, in declaration order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Returns the axis this edge's drawers travel along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// Returns the geometry strategy for this edge.
    ///
    /// Drawers resolve this once at registration and keep the reference, so the
    /// per-edge branching happens here and nowhere else.
    #[must_use]
    pub fn geometry(self) -> &'static dyn EdgeGeometry {
        match self {
            Self::Left => &LeftEdge,
            Self::Right => &RightEdge,
            Self::Top => &TopEdge,
            Self::Bottom => &BottomEdge,
        }
    }
}

/// A single translation axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// Reads the coordinate of `point` along this axis.
    #[must_use]
    pub const fn coord(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Returns `point` with its coordinate along this axis replaced by `value`.
    ///
    /// The orthogonal coordinate is kept as is.
    #[must_use]
    pub const fn with_coord(self, point: Point, value: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(value, point.y),
            Self::Vertical => Point::new(point.x, value),
        }
    }

    /// Reads the component of `v` along this axis.
    #[must_use]
    pub const fn component(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }
}
