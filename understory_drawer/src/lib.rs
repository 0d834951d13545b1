// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drawer --heading-base-level=0

//! Understory Drawer: headless edge-drawer drag and settle state machine.
//!
//! This crate manages panels anchored to an edge of a container that the user can
//! drag out (open) or push back (closed), the way side navigation drawers and
//! bottom sheets behave. A drawer may keep a small handle visible while closed.
//! The crate owns the behavior only: it never draws or lays out anything itself.
//! The host feeds it pointer events, layout sizes and animation ticks, and reads
//! positions, offsets and the scrim color back.
//!
//! The pieces, bottom up:
//!
//! - [`edge`] and [`geometry`]: one [`EdgeGeometry`] strategy per edge, selected once
//!   per drawer. It knows where the drawer rests when open or closed, how a proposed
//!   position is clamped, how an offset is derived and where a release settles.
//! - [`state`]: a drawer's offset in `[0, 1]` and its last reported boundary.
//! - [`settle`]: the [`SettleDriver`] capability that animates a drawer toward a
//!   target, with [`EaseOutSettle`] as the stock implementation.
//! - [`resolver`]: the per-drawer [`DragResolver`] state machine.
//! - [`aggregator`]: consolidates every drawer's [`MotionState`] into one value.
//! - [`registry`]: generational [`DrawerId`] handles keyed by the host's surfaces.
//! - [`layout`]: the [`DrawerLayout`] container tying it all together, delivering
//!   notifications to a single [`DrawerListener`].
//!
//! ## Usage
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Size, Vec2};
//! use understory_drawer::{DrawerEvent, DrawerLayout, DrawerSpec, Edge, LayoutConfig, MotionState};
//! use understory_drawer::pointer::PointerId;
//!
//! let mut layout: DrawerLayout<u32, Vec<DrawerEvent>> =
//!     DrawerLayout::new(Size::new(800.0, 1200.0), LayoutConfig::default(), Vec::new());
//! let nav = layout
//!     .register(1, DrawerSpec::new(Edge::Left, Size::new(300.0, 1200.0), 0.0))
//!     .unwrap();
//! let sheet = layout
//!     .register(2, DrawerSpec::new(Edge::Bottom, Size::new(800.0, 400.0), 40.0))
//!     .unwrap();
//!
//! layout.open_drawer(nav).unwrap();
//! assert_eq!(layout.motion_state(), MotionState::Settling);
//! while layout.tick(Duration::from_millis(16)) {}
//! assert!(layout.is_open(nav).unwrap());
//! assert_eq!(layout.scrim_opacity(), 1.0);
//!
//! // Grabbing the sheet's handle closes the navigation drawer.
//! let finger = PointerId(7);
//! assert!(layout.pointer_down(finger, Some(&2), Point::new(400.0, 1180.0)));
//! assert_eq!(layout.motion_state(), MotionState::Dragging);
//! layout.pointer_move(finger, Point::new(400.0, 1000.0));
//! layout.pointer_up(finger, Vec2::new(0.0, -3000.0));
//! while layout.tick(Duration::from_millis(16)) {}
//!
//! assert!(layout.is_open(sheet).unwrap());
//! assert!(!layout.is_open(nav).unwrap());
//! assert_eq!(layout.motion_state(), MotionState::Idle);
//! ```
//!
//! ## Notifications
//!
//! Slide notifications fire on every position change. Opened and closed
//! notifications fire once per boundary, only when the drawer comes to rest on it.
//! The consolidated state notification fires only when the consolidated value
//! changes: `Dragging` wins over `Settling`, which wins over `Idle`.
//!
//! ## Features
//!
//! - `std` (default): Use the standard library in Kurbo and Peniko.
//! - `libm`: Use `libm` for float math in `no_std` builds.
//! - `tracing`: Emit `tracing` events for registration, capture, release and boundary
//!   transitions.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod aggregator;
pub mod config;
pub mod edge;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod listener;
pub mod pointer;
pub mod registry;
pub mod resolver;
pub mod settle;
pub mod state;

pub use aggregator::{MotionAggregator, MotionState};
pub use config::{DEFAULT_MIN_FLING_VELOCITY, DEFAULT_SCRIM_COLOR, LayoutConfig};
pub use edge::{Axis, Edge};
pub use error::DrawerError;
pub use geometry::{BottomEdge, DrawerGeometry, EdgeGeometry, LeftEdge, RightEdge, TopEdge};
pub use layout::DrawerLayout;
pub use listener::{DrawerEvent, DrawerListener};
pub use registry::{DrawerId, DrawerRegistry};
pub use resolver::{DragResolver, DrawerSpec, ResolverState, SettleAdvance};
pub use settle::{EaseOutSettle, SettleDriver, SettleStep};
pub use state::{BOUNDARY_EPSILON, Boundary, DrawerVisualState};
