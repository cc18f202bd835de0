//! Wall-clock delta measurement for the frame driver

use crate::physics::math::Scalar;
use bevy::prelude::*;
use std::time::Duration;

/// Turns successive wall-clock readings into per-frame deltas
///
/// The first reading after creation or [`reanchor`](Self::reanchor) only
/// records a reference point. Resuming after a pause re-anchors, so the paused
/// interval is never handed to the engine as one large step.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FrameClock {
    last: Option<Duration>,
    max_delta: Scalar,
}

impl FrameClock {
    pub fn new(max_delta: Scalar) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Seconds since the previous reading, at most `max_delta`
    pub fn tick(&mut self, now: Duration) -> Option<Scalar> {
        let previous = self.last.replace(now)?;
        let delta = now.saturating_sub(previous).as_secs_f64();
        Some(delta.min(self.max_delta))
    }

    pub fn reanchor(&mut self) {
        self.last = None;
    }

    pub fn max_delta(&self) -> Scalar {
        self.max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_has_no_delta() {
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.tick(Duration::from_secs(10)), None);
        assert_eq!(clock.tick(Duration::from_millis(10_100)), Some(0.1));
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = FrameClock::new(0.25);
        clock.tick(Duration::ZERO);
        assert_eq!(clock.tick(Duration::from_secs(3)), Some(0.25));
    }

    #[test]
    fn test_reanchor_skips_gap() {
        let mut clock = FrameClock::new(100.0);
        clock.tick(Duration::from_secs(1));
        clock.reanchor();
        // A long pause in between
        assert_eq!(clock.tick(Duration::from_secs(60)), None);
        assert_eq!(clock.tick(Duration::from_millis(60_500)), Some(0.5));
    }

    #[test]
    fn test_clock_going_backwards_is_zero() {
        let mut clock = FrameClock::new(1.0);
        clock.tick(Duration::from_secs(5));
        assert_eq!(clock.tick(Duration::from_secs(4)), Some(0.0));
    }
}
