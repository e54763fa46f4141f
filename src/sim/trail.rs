//! Time-stamped ball trail for motion-blur rendering
//!
//! Samples are stored newest first. The oldest sample is only dropped once the
//! one after it is also past the horizon, so any time within the horizon is
//! always bracketed by two samples.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A recorded ball position and how long ago it was recorded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Seconds since the sample was taken
    pub age: f32,
}

/// Ball position history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    horizon: f32,
}

impl Trail {
    /// A trail that looks as if the ball has been resting at `pos` forever
    pub fn new(pos: Vec2, horizon: f32) -> Self {
        let mut points = VecDeque::with_capacity(64);
        points.push_back(TrailPoint { pos, age: 0.0 });
        points.push_back(TrailPoint { pos, age: horizon });
        Self { points, horizon }
    }

    pub fn horizon(&self) -> f32 {
        self.horizon
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Samples from newest to oldest
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Age every sample, record `pos` as the newest, trim the old end
    pub fn record(&mut self, pos: Vec2, elapsed: f32) {
        for point in self.points.iter_mut() {
            point.age += elapsed;
        }
        self.points.push_front(TrailPoint { pos, age: 0.0 });

        while self.points.len() >= 2 && self.points[self.points.len() - 2].age > self.horizon {
            self.points.pop_back();
        }
    }

    /// Interpolated ball position `age` seconds ago, or None if the trail does
    /// not reach that far back
    pub fn sample(&self, age: f32) -> Option<Vec2> {
        let (newer, older) = self.bracket(age)?;
        let span = older.age - newer.age;
        if span <= f32::EPSILON {
            return Some(newer.pos);
        }
        let t = (age - newer.age) / span;
        Some(newer.pos + (older.pos - newer.pos) * t)
    }

    /// Consecutive samples `(newer, older)` with `newer.age <= age <= older.age`
    pub fn bracket(&self, age: f32) -> Option<(TrailPoint, TrailPoint)> {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .find(|(newer, older)| newer.age <= age && age <= older.age)
            .map(|(newer, older)| (*newer, *older))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fresh_trail_brackets_horizon() {
        let trail = Trail::new(Vec2::new(1.0, 2.0), 1.3);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.sample(0.0), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(trail.sample(1.3), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(trail.sample(1.4), None);
    }

    #[test]
    fn test_record_orders_newest_first() {
        let mut trail = Trail::new(Vec2::ZERO, 1.0);
        trail.record(Vec2::new(1.0, 0.0), 0.1);
        trail.record(Vec2::new(2.0, 0.0), 0.1);

        let ages: Vec<f32> = trail.points().map(|p| p.age).collect();
        assert!(ages.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(trail.points().next().map(|p| p.pos), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_trim_keeps_one_bracketing_sample() {
        let mut trail = Trail::new(Vec2::ZERO, 0.5);
        for i in 0..20 {
            trail.record(Vec2::new(i as f32, 0.0), 0.1);
        }
        let points: Vec<_> = trail.points().copied().collect();
        let n = points.len();
        assert!(points[n - 2].age <= 0.5);
        assert!(points[n - 1].age > 0.5);
    }

    #[test]
    fn test_sample_interpolates() {
        let mut trail = Trail::new(Vec2::ZERO, 10.0);
        trail.record(Vec2::new(1.0, 0.0), 1.0);
        // newest (1,0) age 0, then (0,0) age 1
        let mid = trail.sample(0.5).unwrap();
        assert!((mid.x - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_trail_brackets_every_query(
            steps in proptest::collection::vec((0.0f32..0.2, -5.0f32..5.0), 1..200),
            query in 0.0f32..=1.3,
        ) {
            let mut trail = Trail::new(Vec2::ZERO, 1.3);
            for (dt, y) in steps {
                trail.record(Vec2::new(0.0, y), dt);
            }
            prop_assert!(trail.len() >= 2);
            prop_assert!(trail.bracket(query).is_some());
        }
    }
}
