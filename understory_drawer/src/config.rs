// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container configuration.

use peniko::Color;

/// Default minimum fling velocity, in logical pixels per second.
pub const DEFAULT_MIN_FLING_VELOCITY: f64 = 400.0;

/// Default scrim color: black at alpha `0x99`.
pub const DEFAULT_SCRIM_COLOR: Color = Color::from_rgba8(0, 0, 0, 0x99);

/// Tunables for a [`DrawerLayout`](crate::DrawerLayout).
///
/// ```rust
/// use understory_drawer::LayoutConfig;
///
/// let config = LayoutConfig::default().with_density(2.0);
/// assert_eq!(config.fling_threshold(), 800.0);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct LayoutConfig {
    /// Release velocities slower than this (before density scaling) count as at rest.
    pub min_fling_velocity: f64,
    /// Display density factor applied to `min_fling_velocity`.
    pub density: f64,
    /// Scrim color at full opacity.
    pub scrim_color: Color,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            density: 1.0,
            scrim_color: DEFAULT_SCRIM_COLOR,
        }
    }
}

impl LayoutConfig {
    /// Sets the minimum fling velocity in logical pixels per second.
    #[must_use]
    pub fn with_min_fling_velocity(mut self, velocity: f64) -> Self {
        self.min_fling_velocity = velocity.abs();
        self
    }

    /// Sets the display density factor.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density.abs();
        self
    }

    /// Sets the scrim color.
    #[must_use]
    pub fn with_scrim_color(mut self, color: Color) -> Self {
        self.scrim_color = color;
        self
    }

    /// Density-scaled fling threshold in device pixels per second.
    #[must_use]
    pub fn fling_threshold(&self) -> f64 {
        self.min_fling_velocity * self.density
    }
}
