//! 2×2 bilinear sampling tiles.
//!
//! A fractional position `(x, y)` touches the four integer cells around it. A
//! [`Tile2x2`] records those four cells and how much of the position falls on
//! each, as a byte weight out of 255.
//!
//! ```text
//!   (0,1) upper-left    (1,1) upper-right
//!   (0,0) lower-left    (1,0) lower-right
//! ```
//!
//! [`Tile2x2::splat`] builds the tile on an unbounded plane; [`Tile2x2::wrapped`]
//! folds it onto a cylinder surface (x wraps, y clamps).

use embedded_graphics::geometry::Point;
use glam::Vec2;

/// One tile cell: integer coordinate and weight out of 255.
pub type TileCell = (Point, u8);

/// Four neighboring cells and their bilinear weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tile2x2 {
    // Order: lower-left, lower-right, upper-left, upper-right.
    cells: [TileCell; 4],
}

impl Tile2x2 {
    /// Split a fractional position over its four neighbors.
    ///
    /// Weights are `(1-fx)(1-fy)`, `fx(1-fy)`, `(1-fx)fy` and `fx·fy`, each
    /// rounded to a byte, so they sum to 255 give or take rounding.
    ///
    /// ```rust
    /// use glam::Vec2;
    /// use led_corkscrew::tile::Tile2x2;
    ///
    /// let tile = Tile2x2::splat(Vec2::new(2.5, 1.0));
    /// assert_eq!(tile.at(0, 0).1, 128);
    /// assert_eq!(tile.at(1, 0).1, 128);
    /// assert_eq!(tile.at(0, 1).1, 0);
    /// ```
    #[must_use]
    pub fn splat(position: Vec2) -> Self {
        let floor = position.floor();
        let fraction = position - floor;
        let (x_index, y_index) = (floor.x as i32, floor.y as i32);
        let (fx, fy) = (fraction.x, fraction.y);

        let weight = |amount: f32| (amount * 255.0 + 0.5) as u8;

        Self {
            cells: [
                (Point::new(x_index, y_index), weight((1.0 - fx) * (1.0 - fy))),
                (Point::new(x_index + 1, y_index), weight(fx * (1.0 - fy))),
                (Point::new(x_index, y_index + 1), weight((1.0 - fx) * fy)),
                (Point::new(x_index + 1, y_index + 1), weight(fx * fy)),
            ],
        }
    }

    /// Fold the tile onto a cylinder `width` cells around and `height` rows tall.
    ///
    /// X coordinates wrap modulo `width`; y coordinates clamp to `0..height`.
    /// Weights are unchanged.
    #[must_use]
    pub fn wrapped(self, width: u16, height: u16) -> Self {
        let width = i32::from(width.max(1));
        let last_row = i32::from(height.max(1)) - 1;
        Self {
            cells: self.cells.map(|(point, weight)| {
                (
                    Point::new(point.x.rem_euclid(width), point.y.clamp(0, last_row)),
                    weight,
                )
            }),
        }
    }

    /// Cell at `(dx, dy)`, each `0` or `1`.
    ///
    /// # Panics
    ///
    /// Panics if `dx` or `dy` is greater than 1.
    #[must_use]
    pub const fn at(&self, dx: usize, dy: usize) -> TileCell {
        assert!(dx < 2 && dy < 2, "tile offsets must be 0 or 1");
        self.cells[dy * 2 + dx]
    }

    /// All four cells: lower-left, lower-right, upper-left, upper-right.
    #[must_use]
    pub const fn cells(&self) -> &[TileCell; 4] {
        &self.cells
    }

    /// The lower-left cell's coordinate.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.cells[0].0
    }

    /// The cell carrying the most weight (the first one on ties).
    #[must_use]
    pub fn heaviest(&self) -> TileCell {
        self.cells
            .iter()
            .copied()
            .fold(self.cells[0], |best, cell| if cell.1 > best.1 { cell } else { best })
    }

    /// Sum of the four weights (255 up to rounding).
    #[must_use]
    pub fn total_weight(&self) -> u16 {
        self.cells.iter().map(|&(_, weight)| u16::from(weight)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_position_puts_everything_on_origin() {
        let tile = Tile2x2::splat(Vec2::new(3.0, 2.0));
        assert_eq!(tile.origin(), Point::new(3, 2));
        assert_eq!(tile.at(0, 0), (Point::new(3, 2), 255));
        assert_eq!(tile.at(1, 1), (Point::new(4, 3), 0));
        assert_eq!(tile.heaviest(), (Point::new(3, 2), 255));
    }

    #[test]
    fn weights_sum_to_255_within_rounding() {
        for (x, y) in [(0.1, 0.9), (0.5, 0.5), (0.33, 0.66), (7.75, 0.2), (0.999, 0.001)] {
            let total = Tile2x2::splat(Vec2::new(x, y)).total_weight();
            assert!((253..=257).contains(&total), "({x}, {y}) summed to {total}");
        }
    }

    #[test]
    fn quarter_offsets_split_by_area() {
        let tile = Tile2x2::splat(Vec2::new(0.25, 0.5));
        // (0.75 * 0.5), (0.25 * 0.5), (0.75 * 0.5), (0.25 * 0.5)
        assert_eq!(tile.at(0, 0).1, 96);
        assert_eq!(tile.at(1, 0).1, 32);
        assert_eq!(tile.at(0, 1).1, 96);
        assert_eq!(tile.at(1, 1).1, 32);
    }

    #[test]
    fn wrapping_folds_x_and_clamps_y() {
        let tile = Tile2x2::splat(Vec2::new(3.5, 1.5)).wrapped(4, 2);
        assert_eq!(tile.at(0, 0).0, Point::new(3, 1));
        assert_eq!(tile.at(1, 0).0, Point::new(0, 1));
        assert_eq!(tile.at(0, 1).0, Point::new(3, 1));
        assert_eq!(tile.at(1, 1).0, Point::new(0, 1));

        let negative = Tile2x2::splat(Vec2::new(-0.5, 0.0)).wrapped(4, 2);
        assert_eq!(negative.origin(), Point::new(3, 0));
        assert_eq!(negative.at(1, 0).0, Point::new(0, 0));
    }

    #[test]
    fn heaviest_prefers_first_on_ties() {
        let tile = Tile2x2::splat(Vec2::new(0.5, 0.0));
        assert_eq!(tile.heaviest().0, Point::new(0, 0));
    }

    #[test]
    #[should_panic(expected = "tile offsets must be 0 or 1")]
    fn at_rejects_offsets_past_one() {
        let _ = Tile2x2::splat(Vec2::ZERO).at(2, 0);
    }
}
