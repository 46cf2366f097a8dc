//! Map an LED strip wound into a helix ("corkscrew") onto a rectangular image.
//!
//! A strip wrapped around a pole is addressed one pixel at a time, but it is
//! most naturally drawn as a picture: one row per turn, one column per step
//! around the pole. This crate bridges the two.
//!
//! - [`corkscrew::solve_dimensions`] finds the smallest-waste `width × height`
//!   grid for a turn count and pixel count, in `const` context if needed.
//! - [`Corkscrew`] maps pixel indices to unwrapped and wrapped positions,
//!   produces cached 2×2 bilinear [`tile::Tile2x2`]s, owns a lazily allocated
//!   cylinder buffer, and resamples any [`grid::ColorGrid`] into it.
//! - [`screen_map::ScreenMap`] exports per-pixel positions for previews.
//!
//! # Glossary
//!
//! - **Turn:** one revolution of the helix; one row of the grid.
//! - **Unwrapped position:** place on the helix uncoiled into a flat ribbon; x
//!   grows without bound.
//! - **Wrapped position:** the unwrapped position with x folded onto
//!   `0..width`.
//! - **Gap:** extra spacing, measured in turns, inserted every N pixels.
//! - **Tile:** the four grid cells around a fractional position and their
//!   byte weights.
//!
//! # Example
//!
//! ```rust
//! use led_corkscrew::{Corkscrew, CorkscrewInput};
//!
//! let mut corkscrew = Corkscrew::new(CorkscrewInput::new(2.0, 20));
//! assert_eq!(corkscrew.cylinder_width(), 10);
//! assert_eq!(corkscrew.cylinder_height(), 2);
//!
//! let tile = corkscrew.at_wrap(10.0);
//! assert_eq!(tile.origin().y, 1);
//! ```

pub mod color;
pub mod corkscrew;
mod error;
pub mod grid;
pub mod screen_map;
pub mod tile;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};

pub use crate::corkscrew::{Corkscrew, CorkscrewInput, CorkscrewState, Gap, Sampling};
pub use glam::Vec2;
