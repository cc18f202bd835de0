//! Simulated time bookkeeping

use super::math::Scalar;

pub const DEFAULT_MIN_TIME_SCALE: Scalar = 0.01;
pub const DEFAULT_MAX_TIME_SCALE: Scalar = 1000.0;

/// Elapsed simulated time, time scale and pause state
///
/// Elapsed time only grows, and never while paused or for a non-positive delta.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    elapsed: Scalar,
    time_scale: Scalar,
    paused: bool,
    min_time_scale: Scalar,
    max_time_scale: Scalar,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0, DEFAULT_MIN_TIME_SCALE, DEFAULT_MAX_TIME_SCALE)
    }
}

impl SimulationClock {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(time_scale: Scalar, min_time_scale: Scalar, max_time_scale: Scalar) -> Self {
        let (min_time_scale, max_time_scale) = if min_time_scale <= max_time_scale {
            (min_time_scale, max_time_scale)
        } else {
            (max_time_scale, min_time_scale)
        };
        let mut clock = Self {
            elapsed: 0.0,
            time_scale: 1.0,
            paused: false,
            min_time_scale,
            max_time_scale,
        };
        clock.set_time_scale(time_scale);
        clock
    }

    /// Converts a wall-clock delta into a simulated step and accounts for it.
    ///
    /// Returns `None`, leaving the clock untouched, when paused or when the delta
    /// is not a positive finite number.
    pub fn advance(&mut self, wall_delta: Scalar) -> Option<Scalar> {
        if self.paused || !wall_delta.is_finite() || wall_delta <= 0.0 {
            return None;
        }
        let dt = wall_delta * self.time_scale;
        self.elapsed += dt;
        Some(dt)
    }

    pub fn elapsed_seconds(&self) -> Scalar {
        self.elapsed
    }

    pub fn time_scale(&self) -> Scalar {
        self.time_scale
    }

    /// Clamps into the configured range and returns the scale actually applied.
    ///
    /// A non-finite request leaves the scale unchanged.
    pub fn set_time_scale(&mut self, time_scale: Scalar) -> Scalar {
        if time_scale.is_finite() {
            self.time_scale = time_scale.clamp(self.min_time_scale, self.max_time_scale);
        }
        self.time_scale
    }

    pub fn scale_time(&mut self, factor: Scalar) -> Scalar {
        self.set_time_scale(self.time_scale * factor)
    }

    pub fn time_scale_range(&self) -> (Scalar, Scalar) {
        (self.min_time_scale, self.max_time_scale)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
