// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-edge drawer geometry: drag range, position clamping, offset mapping and
//! release targets.
//!
//! Every function here is pure. The inputs are bundled in [`DrawerGeometry`]:
//! the drawer's current size, its handle size and the container size. Each edge
//! is a zero-sized strategy implementing [`EdgeGeometry`]; callers obtain the
//! strategy once through [`Edge::geometry`] and keep it.
//!
//! ## Coordinates
//!
//! Drawer positions are the drawer's top-left corner in container coordinates.
//! A drawer only travels along its edge's [`Axis`]; the orthogonal coordinate is
//! passed through untouched by every operation.
//!
//! | Edge   | open coordinate        | closed coordinate        |
//! |--------|------------------------|--------------------------|
//! | Left   | `0`                    | `handle - width`         |
//! | Right  | `container_w - width`  | `container_w - handle`   |
//! | Top    | `0`                    | `handle - height`        |
//! | Bottom | `container_h - height` | `container_h - handle`   |
//!
//! ## Degenerate drawers
//!
//! A handle at least as large as the drawer's extent along its axis leaves a zero
//! drag range. That is legal: the open and closed coordinates coincide, clamping
//! always yields that single coordinate, and the offset is always `0.0`.

use core::fmt::Debug;

use kurbo::{Point, Rect, Size, Vec2};

use crate::edge::{Axis, Edge};

/// Inputs shared by all geometry operations for one drawer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawerGeometry {
    /// Current layout size of the drawer.
    pub size: Size,
    /// The always-visible part of the drawer, measured along its axis.
    pub handle_size: f64,
    /// Current size of the hosting container.
    pub container: Size,
}

impl DrawerGeometry {
    /// Bundles the geometry inputs.
    #[must_use]
    pub const fn new(size: Size, handle_size: f64, container: Size) -> Self {
        Self {
            size,
            handle_size,
            container,
        }
    }
}

/// Geometry strategy for one container edge.
///
/// Implementors supply the rest coordinates, the raw offset formula and the
/// opening direction for their edge; the provided methods build clamping,
/// offsets and release decisions on top of those.
pub trait EdgeGeometry: Debug + Sync {
    /// The edge this strategy serves.
    fn edge(&self) -> Edge;

    /// Axis coordinate of the fully-open position.
    fn open_coord(&self, geometry: &DrawerGeometry) -> f64;

    /// Axis coordinate of the fully-closed (handle only) position.
    fn closed_coord(&self, geometry: &DrawerGeometry) -> f64;

    /// Unclamped offset for an axis coordinate, assuming a non-zero drag range.
    fn raw_offset(&self, coord: f64, geometry: &DrawerGeometry) -> f64;

    /// `1.0` when opening moves toward larger coordinates, `-1.0` otherwise.
    fn opening_sign(&self) -> f64;

    /// Where the drawer's edge shadow sits for a drawer occupying `drawer`.
    fn shadow_rect(&self, drawer: Rect, handle_size: f64, shadow: Size) -> Rect;

    /// Axis the drawer moves along.
    fn axis(&self) -> Axis {
        self.edge().axis()
    }

    /// Drawer extent along its axis.
    fn extent(&self, geometry: &DrawerGeometry) -> f64 {
        match self.axis() {
            Axis::Horizontal => geometry.size.width,
            Axis::Vertical => geometry.size.height,
        }
    }

    /// Handle size limited to `[0, extent]`.
    fn effective_handle(&self, geometry: &DrawerGeometry) -> f64 {
        geometry.handle_size.max(0.0).min(self.extent(geometry).max(0.0))
    }

    /// Distance between the fully-closed and the fully-open position. Never negative.
    fn drag_range(&self, geometry: &DrawerGeometry) -> f64 {
        (self.extent(geometry) - self.effective_handle(geometry)).max(0.0)
    }

    /// Restricts `proposed` to the valid drag range along this edge's axis.
    ///
    /// The orthogonal coordinate is taken from `current`, so a drawer never
    /// leaves its rail.
    fn clamp(&self, proposed: Point, current: Point, geometry: &DrawerGeometry) -> Point {
        let axis = self.axis();
        let open = self.open_coord(geometry);
        let closed = self.closed_coord(geometry);
        let (lo, hi) = if open <= closed {
            (open, closed)
        } else {
            (closed, open)
        };
        let coord = axis.coord(proposed).min(hi).max(lo);
        axis.with_coord(current, coord)
    }

    /// Normalized openness in `[0, 1]` for a drawer at `position`.
    fn offset_from_position(&self, position: Point, geometry: &DrawerGeometry) -> f64 {
        if self.drag_range(geometry) <= 0.0 {
            return 0.0;
        }
        let offset = self.raw_offset(self.axis().coord(position), geometry);
        offset.min(1.0).max(0.0)
    }

    /// Fully-open position, keeping `current`'s orthogonal coordinate.
    fn open_position(&self, current: Point, geometry: &DrawerGeometry) -> Point {
        self.axis().with_coord(current, self.open_coord(geometry))
    }

    /// Fully-closed position, keeping `current`'s orthogonal coordinate.
    fn closed_position(&self, current: Point, geometry: &DrawerGeometry) -> Point {
        self.axis().with_coord(current, self.closed_coord(geometry))
    }

    /// Signed velocity along the opening direction; positive means opening.
    fn opening_velocity(&self, velocity: Vec2) -> f64 {
        self.axis().component(velocity) * self.opening_sign()
    }

    /// Decides where a released drawer settles.
    ///
    /// Velocities whose magnitude along the opening direction is below
    /// `min_velocity` count as zero. A positive opening velocity always opens;
    /// at rest the drawer opens only when `offset > 0.5`; anything else closes.
    fn release_target(
        &self,
        current: Point,
        offset: f64,
        velocity: Vec2,
        min_velocity: f64,
        geometry: &DrawerGeometry,
    ) -> Point {
        let mut v = self.opening_velocity(velocity);
        if v.abs() < min_velocity {
            v = 0.0;
        }
        if v > 0.0 || (v == 0.0 && offset > 0.5) {
            self.open_position(current, geometry)
        } else {
            self.closed_position(current, geometry)
        }
    }
}

/// Geometry for [`Edge::Left`].
#[derive(Copy, Clone, Debug, Default)]
pub struct LeftEdge;

/// Geometry for [`Edge::Right`].
#[derive(Copy, Clone, Debug, Default)]
pub struct RightEdge;

/// Geometry for [`Edge::Top`].
#[derive(Copy, Clone, Debug, Default)]
pub struct TopEdge;

/// Geometry for [`Edge::Bottom`].
#[derive(Copy, Clone, Debug, Default)]
pub struct BottomEdge;

impl EdgeGeometry for LeftEdge {
    fn edge(&self) -> Edge {
        Edge::Left
    }

    fn open_coord(&self, _geometry: &DrawerGeometry) -> f64 {
        0.0
    }

    fn closed_coord(&self, geometry: &DrawerGeometry) -> f64 {
        self.effective_handle(geometry) - geometry.size.width
    }

    fn raw_offset(&self, coord: f64, geometry: &DrawerGeometry) -> f64 {
        let range = self.drag_range(geometry);
        (range + coord) / range
    }

    fn opening_sign(&self) -> f64 {
        1.0
    }

    fn shadow_rect(&self, drawer: Rect, handle_size: f64, shadow: Size) -> Rect {
        let right = drawer.x1 - handle_size;
        Rect::new(right, drawer.y0, right + shadow.width, drawer.y1)
    }
}

impl EdgeGeometry for RightEdge {
    fn edge(&self) -> Edge {
        Edge::Right
    }

    fn open_coord(&self, geometry: &DrawerGeometry) -> f64 {
        geometry.container.width - geometry.size.width
    }

    fn closed_coord(&self, geometry: &DrawerGeometry) -> f64 {
        geometry.container.width - self.effective_handle(geometry)
    }

    // Normalized against the container edge, so a closed drawer with a handle
    // reports `handle / range` rather than zero.
    fn raw_offset(&self, coord: f64, geometry: &DrawerGeometry) -> f64 {
        (geometry.container.width - coord) / self.drag_range(geometry)
    }

    fn opening_sign(&self) -> f64 {
        -1.0
    }

    fn shadow_rect(&self, drawer: Rect, handle_size: f64, shadow: Size) -> Rect {
        let left = drawer.x0 + handle_size;
        Rect::new(left - shadow.width, drawer.y0, left, drawer.y1)
    }
}

impl EdgeGeometry for TopEdge {
    fn edge(&self) -> Edge {
        Edge::Top
    }

    fn open_coord(&self, _geometry: &DrawerGeometry) -> f64 {
        0.0
    }

    fn closed_coord(&self, geometry: &DrawerGeometry) -> f64 {
        self.effective_handle(geometry) - geometry.size.height
    }

    fn raw_offset(&self, coord: f64, geometry: &DrawerGeometry) -> f64 {
        let range = self.drag_range(geometry);
        (range + coord) / range
    }

    fn opening_sign(&self) -> f64 {
        1.0
    }

    fn shadow_rect(&self, drawer: Rect, handle_size: f64, shadow: Size) -> Rect {
        let bottom = drawer.y1 - handle_size;
        Rect::new(drawer.x0, bottom, drawer.x1, bottom + shadow.height)
    }
}

impl EdgeGeometry for BottomEdge {
    fn edge(&self) -> Edge {
        Edge::Bottom
    }

    fn open_coord(&self, geometry: &DrawerGeometry) -> f64 {
        geometry.container.height - geometry.size.height
    }

    fn closed_coord(&self, geometry: &DrawerGeometry) -> f64 {
        geometry.container.height - self.effective_handle(geometry)
    }

    fn raw_offset(&self, coord: f64, geometry: &DrawerGeometry) -> f64 {
        (geometry.container.height - coord) / self.drag_range(geometry)
    }

    fn opening_sign(&self) -> f64 {
        -1.0
    }

    fn shadow_rect(&self, drawer: Rect, handle_size: f64, shadow: Size) -> Rect {
        let top = drawer.y0 + handle_size;
        Rect::new(drawer.x0, top - shadow.height, drawer.x1, top)
    }
}
