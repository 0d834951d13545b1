// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer errors.

use core::fmt;

use crate::registry::DrawerId;

/// Errors reported by drawer registration and drawer operations.
///
/// None of these leave the container in a modified state: the rejected operation
/// simply did not happen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawerError {
    /// The surface is already registered as a drawer.
    DuplicateDrawer {
        /// The drawer the surface is registered as.
        existing: DrawerId,
    },
    /// The drawer handle does not refer to a registered drawer.
    UnknownDrawer(DrawerId),
    /// The drawer's handle covers its whole extent, so it has no drag range.
    ///
    /// Only queries that need a non-zero range report this; dragging and settling such
    /// a drawer quietly keep it at its single fixed position.
    DegenerateGeometry(DrawerId),
}

impl fmt::Display for DrawerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDrawer { existing } => {
                write!(f, "surface is already registered as drawer {existing:?}")
            }
            Self::UnknownDrawer(id) => write!(f, "drawer {id:?} is not registered"),
            Self::DegenerateGeometry(id) => {
                write!(f, "drawer {id:?} has a zero drag range")
            }
        }
    }
}

impl core::error::Error for DrawerError {}
