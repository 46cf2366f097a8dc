//! Per-pixel screen positions for visualizers.
//!
//! A [`ScreenMap`] lists where each strip pixel appears on a 2D canvas, plus the
//! dot diameter a preview should draw.

use core::ops::Index;

use glam::Vec2;

/// Dot diameter used when none is given.
pub const DEFAULT_DIAMETER: f32 = 0.5;

/// Ordered pixel positions and a display diameter.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenMap {
    points: Vec<Vec2>,
    diameter: f32,
}

impl ScreenMap {
    /// Build a map from positions in pixel order.
    #[must_use]
    pub const fn new(points: Vec<Vec2>, diameter: f32) -> Self {
        Self { points, diameter }
    }

    /// Number of pixels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when the map has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dot diameter for previews.
    #[must_use]
    pub const fn diameter(&self) -> f32 {
        self.diameter
    }

    /// Positions in pixel order.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Position of pixel `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    /// Iterate `(index, position)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Vec2)> + '_ {
        self.points.iter().copied().enumerate()
    }

    /// Extent of the points: largest minus smallest coordinate on each axis.
    ///
    /// Zero for an empty map.
    #[must_use]
    pub fn bounds(&self) -> Vec2 {
        let Some(&first) = self.points.first() else {
            return Vec2::ZERO;
        };
        let (min, max) = self
            .points
            .iter()
            .fold((first, first), |(min, max), &point| (min.min(point), max.max(point)));
        max - min
    }
}

impl Index<usize> for ScreenMap {
    type Output = Vec2;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_span_the_points() {
        let map = ScreenMap::new(
            vec![Vec2::new(1.0, 0.0), Vec2::new(3.5, 2.0), Vec2::new(0.5, 1.0)],
            DEFAULT_DIAMETER,
        );
        assert_eq!(map.bounds(), Vec2::new(3.0, 2.0));
        assert_eq!(map.len(), 3);
        assert_eq!(map[1], Vec2::new(3.5, 2.0));
        assert_eq!(map.get(3), None);
    }

    #[test]
    fn empty_map_has_zero_bounds() {
        let map = ScreenMap::new(Vec::new(), 1.0);
        assert!(map.is_empty());
        assert_eq!(map.bounds(), Vec2::ZERO);
        assert_eq!(map.iter().count(), 0);
    }
}
