// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-drawer drag/settle state machine.
//!
//! A [`DragResolver`] owns everything that belongs to one drawer: its surface key,
//! its edge strategy, size and position, its [`DrawerVisualState`], the pointer
//! grab holding it (if any) and its own [`SettleDriver`].
//!
//! ```text
//! Idle ──try_capture──▶ Captured ──move──▶ Dragging ──on_released──▶ Releasing
//!   ▲                       │                                            │
//!   │                       └────────────────on_released─────────────────┤
//!   │                                                                    ▼
//!   └────────────────────────── settle finished ◀──────────────────── Settling
//! ```
//!
//! Programmatic opens and closes go straight from `Idle` to `Settling`.
//!
//! Cross-drawer effects (closing the other drawers on capture, consolidating the
//! container state) live in [`DrawerLayout`](crate::DrawerLayout); a resolver only
//! ever touches its own drawer.

use core::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};

use crate::aggregator::MotionState;
use crate::edge::Edge;
use crate::geometry::{DrawerGeometry, EdgeGeometry};
use crate::pointer::{PointerGrab, PointerId};
use crate::settle::{SettleDriver, SettleStep};
use crate::state::{BOUNDARY_EPSILON, Boundary, DrawerVisualState};

/// Static description of a drawer at registration time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawerSpec {
    /// The edge the drawer is anchored to.
    pub edge: Edge,
    /// Initial layout size.
    pub size: Size,
    /// Always-visible handle size along the drawer's axis.
    pub handle_size: f64,
}

impl DrawerSpec {
    /// Describes a drawer on `edge` with the given size and handle.
    #[must_use]
    pub const fn new(edge: Edge, size: Size, handle_size: f64) -> Self {
        Self {
            edge,
            size,
            handle_size,
        }
    }
}

/// Where a resolver is in its drag/settle cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolverState {
    /// At rest.
    Idle,
    /// Held by a pointer that has not moved it yet.
    Captured,
    /// Being moved by a pointer.
    Dragging,
    /// Let go; the settle target is being resolved.
    Releasing,
    /// Animating toward a rest position.
    Settling,
}

impl ResolverState {
    /// The drag-helper state this resolver state reports to the container.
    #[must_use]
    pub const fn motion_state(self) -> MotionState {
        match self {
            Self::Idle => MotionState::Idle,
            Self::Captured | Self::Dragging => MotionState::Dragging,
            Self::Releasing | Self::Settling => MotionState::Settling,
        }
    }
}

/// Result of advancing a resolver by one animation frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SettleAdvance {
    /// New offset, if the drawer moved this frame.
    pub slide: Option<f64>,
    /// The settle completed this frame and the resolver is idle again.
    pub finished: bool,
}

/// Drag/settle state machine for one drawer.
#[derive(Debug)]
pub struct DragResolver<K, D> {
    surface: K,
    geometry: &'static dyn EdgeGeometry,
    size: Size,
    handle_size: f64,
    position: Point,
    visual: DrawerVisualState,
    state: ResolverState,
    grab: Option<PointerGrab>,
    driver: D,
}

impl<K: PartialEq, D: SettleDriver> DragResolver<K, D> {
    /// Binds a resolver to `surface`, placing the drawer at its closed position.
    #[must_use]
    pub fn new(surface: K, spec: DrawerSpec, container: Size, driver: D) -> Self {
        let geometry = spec.edge.geometry();
        let mut resolver = Self {
            surface,
            geometry,
            size: spec.size,
            handle_size: spec.handle_size,
            position: Point::ZERO,
            visual: DrawerVisualState::new(),
            state: ResolverState::Idle,
            grab: None,
            driver,
        };
        let g = resolver.drawer_geometry(container);
        resolver.position = geometry.closed_position(Point::ZERO, &g);
        resolver
    }

    /// The surface this resolver is bound to.
    #[must_use]
    pub fn surface(&self) -> &K {
        &self.surface
    }

    /// The drawer's edge.
    #[must_use]
    pub fn edge(&self) -> Edge {
        self.geometry.edge()
    }

    /// The drawer's current top-left position in container coordinates.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// The drawer's current layout size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The drawer's handle size.
    #[must_use]
    pub fn handle_size(&self) -> f64 {
        self.handle_size
    }

    /// The drawer's bounds in container coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// The drawer's visual state.
    #[must_use]
    pub fn visual(&self) -> &DrawerVisualState {
        &self.visual
    }

    /// Mutable access to the drawer's visual state.
    pub fn visual_mut(&mut self) -> &mut DrawerVisualState {
        &mut self.visual
    }

    /// Current state machine state.
    #[must_use]
    pub fn state(&self) -> ResolverState {
        self.state
    }

    /// State reported to the container-wide aggregation.
    #[must_use]
    pub fn motion_state(&self) -> MotionState {
        self.state.motion_state()
    }

    /// The pointer currently holding this drawer.
    #[must_use]
    pub fn grabbed_by(&self) -> Option<PointerId> {
        self.grab.map(|g| g.pointer())
    }

    /// Geometry inputs for this drawer inside a container of the given size.
    #[must_use]
    pub fn drawer_geometry(&self, container: Size) -> DrawerGeometry {
        DrawerGeometry::new(self.size, self.handle_size, container)
    }

    /// Drag range of this drawer inside `container`.
    #[must_use]
    pub fn drag_range(&self, container: Size) -> f64 {
        self.geometry.drag_range(&self.drawer_geometry(container))
    }

    /// Where the edge shadow of this drawer sits.
    #[must_use]
    pub fn shadow_rect(&self, container: Size, shadow: Size) -> Rect {
        let handle = self
            .geometry
            .effective_handle(&self.drawer_geometry(container));
        self.geometry.shadow_rect(self.rect(), handle, shadow)
    }

    /// Capture predicate: succeeds only for this resolver's own surface.
    ///
    /// On success the drawer is held by `pointer` and marked as peeking; any settle
    /// in progress stops where it is. A drawer already held by another pointer
    /// refuses the capture.
    pub fn try_capture(&mut self, surface: &K, pointer: PointerId, at: Point) -> bool {
        if *surface != self.surface {
            return false;
        }
        if self.grab.is_some_and(|g| !g.is_held_by(pointer)) {
            return false;
        }
        self.driver.abort();
        self.grab = Some(PointerGrab::new(pointer, at));
        self.state = ResolverState::Captured;
        self.visual.peeking = true;
        true
    }

    /// Confirms the capture.
    pub fn on_captured(&mut self) {
        self.visual.peeking = false;
    }

    /// Moves the drawer by the pointer's movement since its last sample.
    ///
    /// Returns the new offset when the drawer moved. Samples from pointers that do
    /// not hold this drawer are ignored.
    pub fn drag(&mut self, pointer: PointerId, pos: Point, container: Size) -> Option<f64> {
        let grab = self.grab.as_mut()?;
        let delta = grab.update(pointer, pos)?;
        self.state = ResolverState::Dragging;
        self.on_position_changed(self.position + delta, container)
    }

    /// Stores a new position, clamped to the edge's range, and recomputes the offset.
    ///
    /// Returns the new offset when the position actually changed, which is when a
    /// slide notification is due.
    pub fn on_position_changed(&mut self, proposed: Point, container: Size) -> Option<f64> {
        let g = self.drawer_geometry(container);
        let position = self.geometry.clamp(proposed, self.position, &g);
        if position == self.position {
            return None;
        }
        self.position = position;
        let offset = self.geometry.offset_from_position(position, &g);
        self.visual.set_offset(offset);
        Some(self.visual.offset)
    }

    /// Lets go of the drawer and starts settling toward the resolved target.
    ///
    /// `min_velocity` is the fling threshold below which `velocity` counts as zero.
    /// Returns the settle target.
    pub fn on_released(&mut self, velocity: Vec2, min_velocity: f64, container: Size) -> Point {
        self.grab = None;
        self.visual.peeking = false;
        self.state = ResolverState::Releasing;
        let g = self.drawer_geometry(container);
        let target =
            self.geometry
                .release_target(self.position, self.visual.offset, velocity, min_velocity, &g);
        let axis_velocity = self.geometry.axis().component(velocity);
        self.settle_to(target, axis_velocity, container);
        target
    }

    /// Starts an animated settle to the fully-open position.
    ///
    /// Returns `true` if an animation started.
    pub fn open(&mut self, container: Size) -> bool {
        let g = self.drawer_geometry(container);
        let target = self.geometry.open_position(self.position, &g);
        self.request_settle(target, container)
    }

    /// Starts an animated settle to the fully-closed position.
    ///
    /// A drawer already settling toward its closed position is left alone, and a
    /// drawer held by a pointer is let go first. Returns `true` if an animation
    /// started.
    pub fn close(&mut self, container: Size) -> bool {
        let g = self.drawer_geometry(container);
        let target = self.geometry.closed_position(self.position, &g);
        self.request_settle(target, container)
    }

    /// Returns `true` if the drawer is settling toward its closed position.
    #[must_use]
    pub fn is_closing(&self, container: Size) -> bool {
        let g = self.drawer_geometry(container);
        let closed = self.geometry.closed_coord(&g);
        self.state == ResolverState::Settling
            && self
                .driver
                .target()
                .is_some_and(|t| (t - closed).abs() <= BOUNDARY_EPSILON)
    }

    /// Ends a pointer grab without a fling, as if released at rest.
    pub fn cancel(&mut self, min_velocity: f64, container: Size) -> Option<Point> {
        self.grab?;
        Some(self.on_released(Vec2::ZERO, min_velocity, container))
    }

    /// Advances the settle animation by one frame.
    pub fn advance(&mut self, dt: Duration, container: Size) -> SettleAdvance {
        if self.state != ResolverState::Settling {
            return SettleAdvance::default();
        }
        let axis = self.geometry.axis();
        match self.driver.continue_settling(dt) {
            SettleStep::Moving(coord) => SettleAdvance {
                slide: self.on_position_changed(axis.with_coord(self.position, coord), container),
                finished: false,
            },
            SettleStep::Finished(coord) => {
                let slide =
                    self.on_position_changed(axis.with_coord(self.position, coord), container);
                self.state = ResolverState::Idle;
                SettleAdvance {
                    slide,
                    finished: true,
                }
            }
            SettleStep::Idle => {
                self.state = ResolverState::Idle;
                SettleAdvance {
                    slide: None,
                    finished: true,
                }
            }
        }
    }

    /// Classifies the resting drawer against its two boundaries.
    #[must_use]
    pub fn boundary(&self, container: Size) -> Option<Boundary> {
        let g = self.drawer_geometry(container);
        let coord = self.geometry.axis().coord(self.position);
        let at_closed_rest = (coord - self.geometry.closed_coord(&g)).abs() <= BOUNDARY_EPSILON;
        self.visual.boundary(at_closed_rest)
    }

    /// Applies a layout pass: new drawer size and/or container size.
    ///
    /// An idle drawer keeps its relative place along its range; a held drawer is only
    /// re-clamped. A settling drawer is re-clamped and its settle restarted toward the
    /// same rest position in the new geometry, so it may come to rest here (check
    /// [`state`](Self::state) afterwards). Returns the new offset if the drawer moved.
    pub fn apply_layout(&mut self, size: Size, old_container: Size, container: Size) -> Option<f64> {
        let old = self.drawer_geometry(old_container);
        let open = self.geometry.open_coord(&old);
        let closed = self.geometry.closed_coord(&old);
        let coord = self.geometry.axis().coord(self.position);
        let fraction = if open == closed {
            0.0
        } else {
            (coord - closed) / (open - closed)
        };
        let settling_to = if self.state == ResolverState::Settling {
            self.driver.target().map(|t| {
                if (t - open).abs() < (t - closed).abs() {
                    Boundary::Open
                } else {
                    Boundary::Closed
                }
            })
        } else {
            None
        };

        self.size = size;
        let new = self.drawer_geometry(container);
        let proposed = if self.state == ResolverState::Idle && self.grab.is_none() {
            let open = self.geometry.open_coord(&new);
            let closed = self.geometry.closed_coord(&new);
            self.geometry
                .axis()
                .with_coord(self.position, closed + fraction * (open - closed))
        } else {
            self.position
        };
        // Clamp against the new geometry even if the position itself is unchanged.
        let clamped = self.geometry.clamp(proposed, self.position, &new);
        let offset = self.geometry.offset_from_position(clamped, &new);
        let moved = clamped != self.position;
        self.position = clamped;
        if let Some(boundary) = settling_to {
            let target = match boundary {
                Boundary::Open => self.geometry.open_position(self.position, &new),
                Boundary::Closed => self.geometry.closed_position(self.position, &new),
            };
            #[cfg(feature = "tracing")]
            tracing::trace!(?boundary, "settle retargeted after layout");
            self.settle_to(target, 0.0, container);
        }
        let changed = self.visual.set_offset(offset);
        (moved || changed).then_some(self.visual.offset)
    }

    fn request_settle(&mut self, target: Point, container: Size) -> bool {
        if self.grab.take().is_some() {
            self.visual.peeking = false;
        }
        let axis = self.geometry.axis();
        if self.state == ResolverState::Settling
            && self
                .driver
                .target()
                .is_some_and(|t| (t - axis.coord(target)).abs() <= BOUNDARY_EPSILON)
        {
            return false;
        }
        self.settle_to(target, 0.0, container)
    }

    fn settle_to(&mut self, target: Point, velocity: f64, container: Size) -> bool {
        let axis = self.geometry.axis();
        let range = self.drag_range(container);
        self.driver
            .start(axis.coord(self.position), axis.coord(target), velocity, range);
        self.state = if self.driver.is_settling() {
            ResolverState::Settling
        } else {
            ResolverState::Idle
        };
        self.state == ResolverState::Settling
    }
}
