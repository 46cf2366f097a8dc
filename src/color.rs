//! Color types and conversions for corkscrew buffers and strip output.
//!
//! Buffers hold [`RGB8`] from `smart_leds`; sources authored with
//! [`embedded-graphics`](https://docs.rs/embedded-graphics) use [`Rgb888`].
//! [`ToRgb8`] and [`ToRgb888`] convert between the two.

use embedded_graphics::prelude::RgbColor;

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`, `CYAN`, `MAGENTA`, `ORANGE`, `PURPLE`.
#[doc(inline)]
pub use smart_leds::colors;

/// 8-bit-per-channel RGB color from `embedded_graphics`.
#[doc(inline)]
pub use embedded_graphics::pixelcolor::Rgb888;

/// RGB color type stored in corkscrew buffers.
pub use smart_leds::RGB8;

/// The zero color every buffer starts with.
pub const BLACK: RGB8 = RGB8::new(0, 0, 0);

/// Colors that can be stored in a corkscrew buffer.
///
/// Images drawn with embedded-graphics arrive as [`Rgb888`]; [`crate::grid::Grid`]
/// stores them through this trait.
///
/// ```rust
/// use led_corkscrew::color::{Rgb888, ToRgb8, RGB8};
///
/// assert_eq!(Rgb888::new(200, 0, 9).to_rgb8(), RGB8::new(200, 0, 9));
/// ```
pub trait ToRgb8 {
    /// Buffer color for this value.
    #[must_use]
    fn to_rgb8(self) -> RGB8;
}

impl ToRgb8 for Rgb888 {
    #[inline]
    fn to_rgb8(self) -> RGB8 {
        RGB8::new(self.r(), self.g(), self.b())
    }
}

/// Buffer colors handed back to embedded-graphics, as in
/// [`crate::grid::Grid::pixels`].
pub trait ToRgb888 {
    /// Drawing color for this value.
    #[must_use]
    fn to_rgb888(self) -> Rgb888;
}

impl ToRgb888 for RGB8 {
    #[inline]
    fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }
}

// ============================================================================
// Blending
// ============================================================================

/// Blend up to four colors by byte weights that sum to roughly 255.
///
/// Each channel is `round(sum(channel * weight) / 255)`, saturating at 255 so
/// rounding slack in the weights cannot overflow.
#[must_use]
pub fn blend_weighted(samples: impl IntoIterator<Item = (RGB8, u8)>) -> RGB8 {
    let (mut red, mut green, mut blue) = (0_u32, 0_u32, 0_u32);
    for (color, weight) in samples {
        let weight = u32::from(weight);
        red += u32::from(color.r) * weight;
        green += u32::from(color.g) * weight;
        blue += u32::from(color.b) * weight;
    }
    RGB8::new(scale_channel(red), scale_channel(green), scale_channel(blue))
}

fn scale_channel(weighted_sum: u32) -> u8 {
    let rounded = (weighted_sum + 127) / 255;
    u8::try_from(rounded).unwrap_or(u8::MAX)
}

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction applied when colors leave the cylinder buffer for the strip.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    #[default]
    Gamma2_2,
}

impl Gamma {
    /// Correct one 8-bit channel value.
    #[must_use]
    pub const fn correct(self, value: u8) -> u8 {
        match self {
            Self::Linear => value,
            Self::Gamma2_2 => GAMMA_2_2_TABLE[value as usize],
        }
    }

    /// Correct all three channels of a color.
    #[must_use]
    pub const fn correct_rgb(self, color: RGB8) -> RGB8 {
        RGB8::new(self.correct(color.r), self.correct(color.g), self.correct(color.b))
    }
}

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];
