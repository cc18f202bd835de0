//! Bounded, distance-decimated position history

use super::math::{Scalar, Vector};
use std::collections::VecDeque;

/// Recent positions of one body, oldest first
///
/// A point is recorded only once the body has moved more than `min_spacing`
/// from the last recorded point (the anchor). Once `max_points` is exceeded
/// the oldest point is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailHistory {
    points: VecDeque<Vector>,
    anchor: Vector,
    max_points: usize,
    min_spacing: Scalar,
}

impl TrailHistory {
    /// `max_points` is raised to at least one.
    pub fn new(max_points: usize, min_spacing: Scalar, anchor: Vector) -> Self {
        let max_points = max_points.max(1);
        Self {
            points: VecDeque::with_capacity(max_points + 1),
            anchor,
            max_points,
            min_spacing,
        }
    }

    /// Records `position` if it lies farther than `min_spacing` from the anchor.
    ///
    /// Returns whether a point was recorded.
    pub fn maybe_record(&mut self, position: Vector) -> bool {
        if position.distance(self.anchor) <= self.min_spacing {
            return false;
        }

        self.points.push_back(position);
        self.anchor = position;
        while self.points.len() > self.max_points {
            self.points.pop_front();
        }
        true
    }

    /// Drops every point and moves the anchor to `anchor`.
    pub fn clear(&mut self, anchor: Vector) {
        self.points.clear();
        self.anchor = anchor;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Vector> + ExactSizeIterator {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<Vector> {
        self.points.back().copied()
    }

    pub fn anchor(&self) -> Vector {
        self.anchor
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn min_spacing(&self) -> Scalar {
        self.min_spacing
    }
}
