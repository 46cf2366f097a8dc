//! Rectangular color grids: the corkscrew's own buffer and resampling sources.
//!
//! [`Grid`] is a run-time sized, row-major 2D buffer of [`RGB8`]. It implements
//! the [`embedded-graphics`](https://docs.rs/embedded-graphics) [`DrawTarget`]
//! so images can be drawn with primitives before being read into a corkscrew.
//!
//! Any type implementing [`ColorGrid`] can act as a resampling source, including
//! plain `[[RGB8; W]; H]` arrays.
//!
//! # Example
//!
//! ```rust
//! use embedded_graphics::{prelude::*, primitives::{PrimitiveStyle, Rectangle}};
//! use led_corkscrew::color::{Rgb888, colors};
//! use led_corkscrew::grid::Grid;
//!
//! let mut grid = Grid::new(16, 18);
//! Rectangle::new(Point::new(0, 0), Size::new(16, 2))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
//!     .draw(&mut grid)
//!     .expect("drawing into a grid cannot fail");
//!
//! assert_eq!(grid[(5, 1)], colors::RED);
//! ```

use core::{
    convert::Infallible,
    ops::{Index, IndexMut},
};

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888, prelude::*};
use itertools::iproduct;

use crate::color::{BLACK, RGB8, ToRgb8, ToRgb888};
use crate::{Error, Result};

pub use embedded_graphics::geometry::{Point, Size};

/// Read access to a rectangular grid of colors addressed by `(x, y)`.
///
/// This is all the corkscrew needs from an image it resamples.
pub trait ColorGrid {
    /// Number of columns.
    fn width(&self) -> u16;

    /// Number of rows.
    fn height(&self) -> u16;

    /// Color at `(x, y)`, or `None` outside the grid.
    fn get(&self, x: u16, y: u16) -> Option<RGB8>;

    /// Color at `(x, y)` with both coordinates clamped onto the grid.
    ///
    /// Returns black for an empty grid.
    fn get_clamped(&self, x: i32, y: i32) -> RGB8 {
        let (width, height) = (i32::from(self.width()), i32::from(self.height()));
        if width == 0 || height == 0 {
            return BLACK;
        }
        let x = x.clamp(0, width - 1) as u16;
        let y = y.clamp(0, height - 1) as u16;
        self.get(x, y).unwrap_or(BLACK)
    }
}

/// Run-time sized row-major color buffer.
///
/// `grid[(x, y)]` is the color at column `x`, row `y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    pixels: Vec<RGB8>,
}

impl Grid {
    /// Create a black grid.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, BLACK)
    }

    /// Create a grid filled with a single color.
    #[must_use]
    pub fn filled(width: u16, height: u16, color: RGB8) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            pixels: vec![color; len],
        }
    }

    /// Wrap an existing row-major vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GridSize`] if `pixels.len() != width * height`.
    pub fn from_vec(width: u16, height: u16, pixels: Vec<RGB8>) -> Result<Self> {
        if pixels.len() != usize::from(width) * usize::from(height) {
            return Err(Error::GridSize {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells (`width * height`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// `true` when the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Color at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<RGB8> {
        self.offset(x, y).and_then(|offset| self.pixels.get(offset)).copied()
    }

    /// Mutable color at `(x, y)`, or `None` outside the grid.
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut RGB8> {
        self.offset(x, y).and_then(|offset| self.pixels.get_mut(offset))
    }

    /// Set the color at `(x, y)`; writes outside the grid are ignored.
    pub fn set(&mut self, x: u16, y: u16, color: RGB8) {
        if let Some(pixel) = self.get_mut(x, y) {
            *pixel = color;
        }
    }

    /// Overwrite every cell with `color`.
    pub fn fill(&mut self, color: RGB8) {
        self.pixels.fill(color);
    }

    /// Overwrite every cell with black.
    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Row-major storage.
    #[must_use]
    pub fn as_slice(&self) -> &[RGB8] {
        &self.pixels
    }

    /// Mutable row-major storage.
    pub fn as_mut_slice(&mut self) -> &mut [RGB8] {
        &mut self.pixels
    }

    /// Iterate `((x, y), color)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = ((u16, u16), RGB8)> + '_ {
        iproduct!(0..self.height, 0..self.width)
            .map(|(y, x)| (x, y))
            .zip(self.pixels.iter().copied())
    }

    /// The grid as embedded-graphics pixels, ready to draw onto any
    /// `DrawTarget<Color = Rgb888>` such as a simulator display or another grid.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<Rgb888>> + '_ {
        self.enumerate().map(|((x, y), color)| {
            Pixel(Point::new(i32::from(x), i32::from(y)), color.to_rgb888())
        })
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }
}

impl ColorGrid for Grid {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn get(&self, x: u16, y: u16) -> Option<RGB8> {
        Self::get(self, x, y)
    }
}

impl<const W: usize, const H: usize> ColorGrid for [[RGB8; W]; H] {
    fn width(&self) -> u16 {
        u16::try_from(W).unwrap_or(u16::MAX)
    }

    fn height(&self) -> u16 {
        u16::try_from(H).unwrap_or(u16::MAX)
    }

    fn get(&self, x: u16, y: u16) -> Option<RGB8> {
        let row = self.as_slice().get(usize::from(y))?;
        row.as_slice().get(usize::from(x)).copied()
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = RGB8;

    fn index(&self, (x_index, y_index): (usize, usize)) -> &Self::Output {
        assert!(x_index < usize::from(self.width), "x_index must be within width");
        assert!(y_index < usize::from(self.height), "y_index must be within height");
        &self.pixels[y_index * usize::from(self.width) + x_index]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (x_index, y_index): (usize, usize)) -> &mut Self::Output {
        assert!(x_index < usize::from(self.width), "x_index must be within width");
        assert!(y_index < usize::from(self.height), "y_index must be within height");
        &mut self.pixels[y_index * usize::from(self.width) + x_index]
    }
}

impl OriginDimensions for Grid {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

impl DrawTarget for Grid {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let (Ok(x_index), Ok(y_index)) = (u16::try_from(coord.x), u16::try_from(coord.y)) {
                self.set(x_index, y_index, color.to_rgb8());
            }
        }
        Ok(())
    }
}
