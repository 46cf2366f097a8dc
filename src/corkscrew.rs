//! A device abstraction for LED strips wound into a helix around a cylinder.
//!
//! See [`Corkscrew`] for the engine and [`CorkscrewInput`] for the winding.
//!
//! A strip wrapped `total_turns` times around a pole behaves like a rectangular
//! panel `width` cells around and `height` rows tall, where one row is one
//! turn. [`Corkscrew`] solves those dimensions, maps each pixel index to its
//! place on the cylinder, and resamples ordinary rectangular images onto the
//! strip.
//!
//! # Example: draw a band, read it back per pixel
//!
//! ```rust
//! use embedded_graphics::{prelude::*, primitives::{PrimitiveStyle, Rectangle}};
//! use led_corkscrew::color::{Gamma, Rgb888, colors};
//! use led_corkscrew::corkscrew::{Corkscrew, CorkscrewInput};
//! use led_corkscrew::grid::Grid;
//!
//! let mut corkscrew = Corkscrew::new(CorkscrewInput::new(19.0, 288));
//! assert_eq!((corkscrew.cylinder_width(), corkscrew.cylinder_height()), (16, 18));
//!
//! // Author an image at the cylinder's own resolution: red on the bottom two turns.
//! let mut image = Grid::new(corkscrew.cylinder_width(), corkscrew.cylinder_height());
//! Rectangle::new(Point::zero(), Size::new(16, 2))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
//!     .draw(&mut image)
//!     .expect("drawing into a grid cannot fail");
//!
//! corkscrew.read_from(&image);
//! let strip = corkscrew.strip_colors(Gamma::Linear);
//! assert_eq!(strip[0], colors::RED);
//! assert_eq!(strip[287], colors::BLACK);
//! ```

mod input;
mod mapping;

use core::cell::OnceCell;
use std::collections::HashMap;

use glam::Vec2;

pub use input::{
    CorkscrewInput, CorkscrewState, DEFAULT_NUM_LEDS, DEFAULT_TOTAL_TURNS, Gap, solve_dimensions,
};
pub use mapping::HelixMap;

use crate::color::{Gamma, RGB8, blend_weighted};
use crate::grid::{ColorGrid, Grid};
use crate::screen_map::{DEFAULT_DIAMETER, ScreenMap};
use crate::tile::Tile2x2;
use crate::{Error, Result};

/// How [`Corkscrew::render_strip_with`] turns a pixel's tile into a color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sampling {
    /// Take the buffer color under the tile's heaviest cell.
    Nearest,
    /// Blend the buffer colors under all four tile cells by weight.
    #[default]
    Bilinear,
}

/// Helix mapping engine: geometry, a lazily allocated cylinder buffer, and a
/// tile cache.
///
/// The buffer is `width * height` colors, row-major, black until first written.
/// It is allocated on the first buffer access.
///
/// Tiles returned by [`Corkscrew::at_wrap`] are memoized by the exact bits of
/// the index. Caching can be switched off with
/// [`Corkscrew::set_caching_enabled`]; results are identical either way.
#[derive(Clone, Debug)]
pub struct Corkscrew {
    map: HelixMap,
    buffer: OnceCell<Grid>,
    tile_cache: HashMap<u32, Tile2x2>,
    caching_enabled: bool,
}

impl Corkscrew {
    /// Build an engine for `input`. Degenerate values are normalized.
    #[must_use]
    pub fn new(input: CorkscrewInput) -> Self {
        let map = HelixMap::new(input);
        log::debug!(
            "corkscrew: {} pixels over {} turns -> {}x{} cells",
            map.len(),
            map.input().total_turns,
            map.width(),
            map.height()
        );
        Self {
            map,
            buffer: OnceCell::new(),
            tile_cache: HashMap::new(),
            caching_enabled: true,
        }
    }

    /// Number of pixels on the strip.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.map.len() as usize
    }

    /// Cells per row (per turn).
    #[must_use]
    pub const fn cylinder_width(&self) -> u16 {
        self.map.width()
    }

    /// Number of rows.
    #[must_use]
    pub const fn cylinder_height(&self) -> u16 {
        self.map.height()
    }

    /// Solved dimensions.
    #[must_use]
    pub const fn state(&self) -> CorkscrewState {
        self.map.state()
    }

    /// The (normalized) winding this engine was built from.
    #[must_use]
    pub const fn input(&self) -> CorkscrewInput {
        self.map.input()
    }

    /// The cache-free geometry.
    #[must_use]
    pub const fn map(&self) -> HelixMap {
        self.map
    }

    /// Unwrapped (ribbon) position of pixel `index`.
    #[must_use]
    pub fn at_no_wrap(&self, index: f32) -> Vec2 {
        self.map.unwrapped(index)
    }

    /// Wrapped (cylinder) position of pixel `index`; `x` is in `0..width`.
    #[must_use]
    pub fn at_exact(&self, index: f32) -> Vec2 {
        self.map.wrapped(index)
    }

    /// Bilinear tile for pixel `index` on the cylinder, memoized while caching
    /// is enabled.
    pub fn at_wrap(&mut self, index: f32) -> Tile2x2 {
        if !self.caching_enabled {
            return self.map.tile(index);
        }
        let map = self.map;
        *self
            .tile_cache
            .entry(index.to_bits())
            .or_insert_with(|| map.tile(index))
    }

    /// Wrapped positions of every pixel, in strip order.
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + use<> {
        let map = self.map;
        (0..map.len()).map(move |index| map.wrapped(f32::from(index)))
    }

    /// Turn tile memoization on or off.
    ///
    /// Turning it off leaves stored tiles in place; turning it back on reuses them.
    pub fn set_caching_enabled(&mut self, enabled: bool) {
        log::debug!(
            "corkscrew: tile caching {} ({} tiles stored)",
            if enabled { "enabled" } else { "disabled" },
            self.tile_cache.len()
        );
        self.caching_enabled = enabled;
    }

    /// Whether [`Corkscrew::at_wrap`] memoizes.
    #[must_use]
    pub const fn is_caching_enabled(&self) -> bool {
        self.caching_enabled
    }

    /// The cylinder buffer, allocating it on first use.
    pub fn buffer(&self) -> &Grid {
        self.buffer.get_or_init(|| self.allocate_buffer())
    }

    /// The cylinder buffer, mutably, allocating it on first use.
    pub fn buffer_mut(&mut self) -> &mut Grid {
        self.buffer();
        self.buffer
            .get_mut()
            .expect("buffer was allocated above, so this cannot fail")
    }

    /// Row-major colors of the cylinder buffer.
    pub fn data(&self) -> &[RGB8] {
        self.buffer().as_slice()
    }

    /// Mutable row-major colors of the cylinder buffer.
    pub fn data_mut(&mut self) -> &mut [RGB8] {
        self.buffer_mut().as_mut_slice()
    }

    /// Set every buffer cell to `color`.
    pub fn fill_buffer(&mut self, color: RGB8) {
        self.buffer_mut().fill(color);
    }

    /// Set every buffer cell to black.
    pub fn clear_buffer(&mut self) {
        self.buffer_mut().clear();
    }

    /// Resample `source` into the buffer.
    ///
    /// Every cell a pixel's tile touches with non-zero weight is copied from
    /// the same cell of `source`, clamped onto `source`'s edges so the sizes
    /// need not match. Cells no pixel touches keep their previous color.
    pub fn read_from<G: ColorGrid + ?Sized>(&mut self, source: &G) {
        log::trace!(
            "corkscrew: resampling {}x{} source into {}x{}",
            source.width(),
            source.height(),
            self.map.width(),
            self.map.height()
        );
        for index in 0..self.map.len() {
            let tile = self.at_wrap(f32::from(index));
            let buffer = self.buffer_mut();
            for &(point, weight) in tile.cells() {
                if weight > 0 {
                    let color = source.get_clamped(point.x, point.y);
                    buffer.set(point.x as u16, point.y as u16, color);
                }
            }
        }
    }

    /// Wrapped positions of every pixel with the default dot diameter (0.5).
    #[must_use]
    pub fn to_screen_map(&self) -> ScreenMap {
        self.to_screen_map_with_diameter(DEFAULT_DIAMETER)
    }

    /// Wrapped positions of every pixel with a custom dot diameter.
    ///
    /// Point `i` equals [`Corkscrew::at_exact`]`(i)`.
    #[must_use]
    pub fn to_screen_map_with_diameter(&self, diameter: f32) -> ScreenMap {
        ScreenMap::new(self.positions().collect(), diameter)
    }

    /// Write one color per pixel into `strip`, blended bilinearly from the
    /// buffer and gamma corrected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StripLength`] if `strip.len()` differs from
    /// [`Corkscrew::size`].
    pub fn render_strip(&mut self, strip: &mut [RGB8], gamma: Gamma) -> Result<()> {
        self.render_strip_with(strip, gamma, Sampling::Bilinear)
    }

    /// Write one color per pixel into `strip`, read from the buffer with
    /// `sampling` and gamma corrected.
    ///
    /// Both modes read only cells [`Corkscrew::read_from`] writes for that
    /// pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StripLength`] if `strip.len()` differs from
    /// [`Corkscrew::size`].
    pub fn render_strip_with(
        &mut self,
        strip: &mut [RGB8],
        gamma: Gamma,
        sampling: Sampling,
    ) -> Result<()> {
        if strip.len() != self.size() {
            return Err(Error::StripLength {
                expected: self.size(),
                actual: strip.len(),
            });
        }
        for (index, pixel) in (0..self.map.len()).zip(strip.iter_mut()) {
            let tile = self.at_wrap(f32::from(index));
            *pixel = gamma.correct_rgb(sample(self.buffer(), &tile, sampling));
        }
        Ok(())
    }

    /// Like [`Corkscrew::render_strip`], into a new vector.
    #[must_use]
    pub fn strip_colors(&mut self, gamma: Gamma) -> Vec<RGB8> {
        let mut strip = vec![RGB8::default(); self.size()];
        self.render_strip(&mut strip, gamma)
            .expect("strip was sized to the corkscrew, so this cannot fail");
        strip
    }

    fn allocate_buffer(&self) -> Grid {
        log::debug!(
            "corkscrew: allocating {}x{} buffer",
            self.map.width(),
            self.map.height()
        );
        Grid::new(self.map.width(), self.map.height())
    }
}

fn sample(source: &Grid, tile: &Tile2x2, sampling: Sampling) -> RGB8 {
    match sampling {
        Sampling::Nearest => {
            let (point, _) = tile.heaviest();
            source.get_clamped(point.x, point.y)
        }
        Sampling::Bilinear => blend_weighted(
            tile.cells()
                .iter()
                .map(|&(point, weight)| (source.get_clamped(point.x, point.y), weight)),
        ),
    }
}
