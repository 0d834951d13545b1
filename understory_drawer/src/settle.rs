// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle animation capability.
//!
//! A drawer that is released, or opened/closed programmatically, animates to its
//! target through a [`SettleDriver`]. The drawer machinery only chooses the
//! destination; the driver owns the interpolation curve. Each drawer gets its own
//! driver instance.
//!
//! Drivers are advanced by the host's frame loop through
//! [`DrawerLayout::tick`](crate::DrawerLayout::tick); nothing here blocks or sleeps.
//!
//! [`EaseOutSettle`] is the default driver: a quintic ease-out whose duration
//! scales with the distance left to travel, or with the release velocity when the
//! drawer was flung.

use core::time::Duration;

/// One frame of a settle animation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SettleStep {
    /// No settle is in progress.
    Idle,
    /// The settle advanced to this axis coordinate and needs more frames.
    Moving(f64),
    /// The settle reached its target coordinate and is complete.
    Finished(f64),
}

/// Animated transition primitive for a single axis coordinate.
pub trait SettleDriver {
    /// Starts animating from `from` to `to`.
    ///
    /// `velocity` is the release velocity along the axis (zero for programmatic
    /// moves) and `range` the drawer's full drag range, for drivers that scale
    /// their duration. A driver asked to move zero distance stays idle.
    fn start(&mut self, from: f64, to: f64, velocity: f64, range: f64);

    /// Advances the animation by `dt`.
    fn continue_settling(&mut self, dt: Duration) -> SettleStep;

    /// Stops the animation where it is.
    fn abort(&mut self);

    /// Returns `true` while a settle is in progress.
    fn is_settling(&self) -> bool;

    /// Destination of the settle in progress, if any.
    fn target(&self) -> Option<f64>;
}

/// Quintic ease-out settle driver.
///
/// Without a release velocity the duration is `base * (1 + distance / range)`;
/// with one it is four times the time the velocity would need to cover the
/// distance. Either way it is capped at the configured maximum.
#[derive(Clone, Debug)]
pub struct EaseOutSettle {
    base: Duration,
    max: Duration,
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
    active: bool,
}

impl Default for EaseOutSettle {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(256),
            max: Duration::from_millis(600),
            from: 0.0,
            to: 0.0,
            elapsed: 0.0,
            duration: 0.0,
            active: false,
        }
    }
}

impl EaseOutSettle {
    /// Creates a driver with the default 256 ms base and 600 ms maximum duration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base duration (builder pattern).
    #[must_use]
    pub fn with_base_duration(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }

    /// Sets the maximum duration (builder pattern).
    #[must_use]
    pub fn with_max_duration(mut self, max: Duration) -> Self {
        self.max = max;
        self
    }

    /// Duration of the settle in progress, in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration
    }

    fn settle_secs(&self, distance: f64, velocity: f64, range: f64) -> f64 {
        let secs = if velocity > 0.0 {
            4.0 * distance / velocity
        } else {
            let fraction = if range > 0.0 { distance / range } else { 0.0 };
            (fraction + 1.0) * self.base.as_secs_f64()
        };
        secs.min(self.max.as_secs_f64())
    }
}

fn ease_out_quint(t: f64) -> f64 {
    let u = 1.0 - t;
    1.0 - u * u * u * u * u
}

impl SettleDriver for EaseOutSettle {
    fn start(&mut self, from: f64, to: f64, velocity: f64, range: f64) {
        self.from = from;
        self.to = to;
        self.elapsed = 0.0;
        let distance = (to - from).abs();
        if distance == 0.0 {
            self.duration = 0.0;
            self.active = false;
            return;
        }
        self.duration = self.settle_secs(distance, velocity.abs(), range);
        self.active = true;
    }

    fn continue_settling(&mut self, dt: Duration) -> SettleStep {
        if !self.active {
            return SettleStep::Idle;
        }
        self.elapsed += dt.as_secs_f64();
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            self.active = false;
            return SettleStep::Finished(self.to);
        }
        let t = self.elapsed / self.duration;
        SettleStep::Moving(self.from + (self.to - self.from) * ease_out_quint(t))
    }

    fn abort(&mut self) {
        self.active = false;
    }

    fn is_settling(&self) -> bool {
        self.active
    }

    fn target(&self) -> Option<f64> {
        self.active.then_some(self.to)
    }
}
