//! Index-to-position math for a wound strip.
//!
//! The unwrapped ribbon grows without bound in x; the wrapped surface folds x
//! onto `0..width`. Row (y) advances by one every `width` pixels and is never
//! affected by gaps.

use glam::Vec2;

use super::input::{CorkscrewInput, CorkscrewState};
use crate::tile::Tile2x2;

/// Pure geometry of a corkscrew: normalized input plus solved dimensions.
///
/// `HelixMap` holds no buffers or caches, so it is `Copy` and can be built in
/// `const` context.
///
/// ```rust
/// use led_corkscrew::corkscrew::{CorkscrewInput, Gap, HelixMap};
///
/// let map = HelixMap::new(CorkscrewInput::new(1.0, 3).with_gap(Gap::new(1, 0.5)));
/// assert_eq!(map.unwrapped(1.0).x, 3.0);
/// assert_eq!(map.wrapped(2.0).x, 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HelixMap {
    input: CorkscrewInput,
    state: CorkscrewState,
}

impl HelixMap {
    /// Normalize `input` and solve its dimensions.
    #[must_use]
    pub const fn new(input: CorkscrewInput) -> Self {
        let input = input.normalized();
        Self {
            state: input.state(),
            input,
        }
    }

    /// The normalized winding.
    #[must_use]
    pub const fn input(&self) -> CorkscrewInput {
        self.input
    }

    /// Solved grid dimensions.
    #[must_use]
    pub const fn state(&self) -> CorkscrewState {
        self.state
    }

    /// Cells per row.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.state.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.state.height
    }

    /// Number of pixels (at least 1).
    #[must_use]
    pub const fn len(&self) -> u16 {
        self.input.num_leds
    }

    /// Position of (possibly fractional) pixel `index` on the uncoiled ribbon.
    ///
    /// `index` is clamped to `0..=len-1`; NaN reads as `0`.
    #[must_use]
    pub fn unwrapped(&self, index: f32) -> Vec2 {
        let index = self.traversal_index(index);
        let num_leds = f32::from(self.input.num_leds);
        let width = f32::from(self.state.width);

        let progress = if self.input.num_leds > 1 {
            index / (num_leds - 1.0)
        } else {
            0.0
        };

        let gap = self.input.gap;
        let gap_offset = if gap.is_active(self.input.num_leds) {
            let gaps_passed = (index / f32::from(gap.every_n_leds)).floor();
            gaps_passed * gap.extra_width * width
        } else {
            0.0
        };

        Vec2::new(progress * num_leds + gap_offset, index / width)
    }

    /// Position of pixel `index` on the cylinder surface.
    ///
    /// `x` is in `0..width`; `y` equals the unwrapped row, which the solved
    /// dimensions keep below `height`.
    #[must_use]
    pub fn wrapped(&self, index: f32) -> Vec2 {
        let position = self.unwrapped(index);
        let width = f32::from(self.state.width);
        let mut x = position.x.rem_euclid(width);
        // rem_euclid can round up to exactly `width` for tiny negative inputs
        if x >= width {
            x = 0.0;
        }
        Vec2::new(x, position.y)
    }

    /// Bilinear tile for pixel `index`, folded onto the cylinder.
    #[must_use]
    pub fn tile(&self, index: f32) -> Tile2x2 {
        Tile2x2::splat(self.wrapped(index)).wrapped(self.state.width, self.state.height)
    }

    fn traversal_index(&self, index: f32) -> f32 {
        let last = f32::from(self.input.num_leds - 1);
        let index = if index.is_nan() { 0.0 } else { index.clamp(0.0, last) };
        if self.input.invert { last - index } else { index }
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::geometry::Point;

    use super::*;
    use crate::corkscrew::Gap;

    fn close(actual: f32, expected: f32) -> bool {
        (actual - expected).abs() < 1e-5
    }

    #[test]
    fn gap_of_half_a_turn_lands_every_pixel_on_column_zero() {
        let map = HelixMap::new(CorkscrewInput::new(1.0, 3).with_gap(Gap::new(1, 0.5)));
        assert_eq!(map.width(), 3);
        for (index, expected_x) in [(0.0, 0.0), (1.0, 3.0), (2.0, 6.0)] {
            assert!(close(map.unwrapped(index).x, expected_x), "index {index}");
            assert!(close(map.wrapped(index).x, 0.0), "index {index}");
        }
        assert!(close(map.unwrapped(1.0).y, 1.0 / 3.0));
        assert!(close(map.unwrapped(2.0).y, 2.0 / 3.0));
    }

    #[test]
    fn full_turn_gap_stays_within_one_turn_of_height() {
        let map = HelixMap::new(CorkscrewInput::new(1.0, 2).with_gap(Gap::new(1, 1.0)));
        let first = map.unwrapped(0.0);
        let second = map.unwrapped(1.0);
        assert_ne!(first, second);
        assert!(second.y <= 1.0);
        assert!((map.wrapped(1.0).x - map.wrapped(0.0).x).abs() < 0.1);
    }

    #[test]
    fn invert_mirrors_the_traversal() {
        let input = CorkscrewInput::new(2.0, 20);
        let forward = HelixMap::new(input);
        let backward = HelixMap::new(input.with_invert(true));
        assert_eq!(forward.state(), backward.state());
        for index in 0..20_u16 {
            let mirrored = f32::from(19 - index);
            assert_eq!(backward.unwrapped(f32::from(index)), forward.unwrapped(mirrored));
        }
    }

    #[test]
    fn out_of_range_indices_clamp() {
        let map = HelixMap::new(CorkscrewInput::new(2.0, 20));
        assert_eq!(map.unwrapped(-5.0), map.unwrapped(0.0));
        assert_eq!(map.unwrapped(100.0), map.unwrapped(19.0));
        assert_eq!(map.unwrapped(f32::NAN), map.unwrapped(0.0));
    }

    #[test]
    fn single_pixel_sits_at_origin() {
        let map = HelixMap::new(CorkscrewInput::new(3.0, 1));
        assert_eq!(map.unwrapped(0.0), Vec2::ZERO);
        assert_eq!(map.wrapped(0.0), Vec2::ZERO);
        assert_eq!(map.tile(0.0).origin(), Point::zero());
    }

    #[test]
    fn tiles_fold_onto_the_grid() {
        let map = HelixMap::new(CorkscrewInput::new(19.0, 288));
        for index in 0..288_u16 {
            for (point, _) in map.tile(f32::from(index) + 0.5).cells() {
                assert!((0..16).contains(&point.x), "index {index}: {point:?}");
                assert!((0..18).contains(&point.y), "index {index}: {point:?}");
            }
        }
    }
}
