//! Winding parameters and the compile-time dimension solver.
//!
//! A corkscrew is described by a [`CorkscrewInput`]: how many turns the strip
//! makes around the cylinder, how many pixels it has, whether it is wired
//! top-down, and an optional periodic [`Gap`]. [`solve_dimensions`] turns the
//! turn and pixel counts into the smallest rectangle that gives every pixel a
//! cell.
//!
//! Everything here is `const`, so dimensions can be checked at compile time:
//!
//! ```rust
//! use led_corkscrew::corkscrew::{CorkscrewInput, CorkscrewState, solve_dimensions};
//!
//! const FESTIVAL_STICK: CorkscrewState = solve_dimensions(19.0, 288);
//! const _: () = assert!(FESTIVAL_STICK.width == 16 && FESTIVAL_STICK.height == 18);
//!
//! // The run-time path goes through the same function.
//! assert_eq!(CorkscrewInput::new(19.0, 288).state(), FESTIVAL_STICK);
//! ```

use serde::{Deserialize, Serialize};

/// Turn count used by [`CorkscrewInput::default`].
pub const DEFAULT_TOTAL_TURNS: f32 = 19.0;

/// Pixel count used by [`CorkscrewInput::default`].
pub const DEFAULT_NUM_LEDS: u16 = 144;

/// Periodic extra spacing along the strip.
///
/// After every `every_n_leds` pixels the helix skips `extra_width` turns of
/// circumference before the next pixel. `extra_width` is measured in turns, so
/// `0.5` skips half the cylinder regardless of how many cells wide it is.
///
/// The default gap never triggers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gap {
    /// Pixels between gaps; `0` disables the gap.
    pub every_n_leds: u16,
    /// Circumference skipped at each gap, in turns. Never negative.
    pub extra_width: f32,
}

impl Gap {
    /// A gap that never triggers.
    pub const NONE: Self = Self {
        every_n_leds: 0,
        extra_width: 0.0,
    };

    /// Gap of `extra_width` turns after every `every_n_leds` pixels.
    ///
    /// Negative and NaN widths are stored as `0.0`.
    #[must_use]
    pub const fn new(every_n_leds: u16, extra_width: f32) -> Self {
        Self {
            every_n_leds,
            extra_width: non_negative(extra_width),
        }
    }

    /// `true` if this gap moves at least one pixel of a strip with `num_leds` pixels.
    #[must_use]
    pub const fn is_active(&self, num_leds: u16) -> bool {
        self.every_n_leds >= 1 && self.extra_width > 0.0 && num_leds > self.every_n_leds
    }
}

/// How a strip is wound: turns, pixel count, direction, and gap.
///
/// ```rust
/// use led_corkscrew::corkscrew::{CorkscrewInput, Gap};
///
/// const INPUT: CorkscrewInput = CorkscrewInput::new(1.0, 3).with_gap(Gap::new(1, 0.5));
/// assert_eq!(INPUT.state().width, 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CorkscrewInput {
    /// Full revolutions the strip makes around the cylinder.
    pub total_turns: f32,
    /// Number of pixels on the strip.
    pub num_leds: u16,
    /// Pixel 0 sits at the far end of the helix instead of the start.
    pub invert: bool,
    /// Periodic spacing.
    pub gap: Gap,
}

impl CorkscrewInput {
    /// Winding with the given turns and pixels, not inverted, no gap.
    #[must_use]
    pub const fn new(total_turns: f32, num_leds: u16) -> Self {
        Self {
            total_turns,
            num_leds,
            invert: false,
            gap: Gap::NONE,
        }
    }

    /// Same winding, traversed from the other end.
    #[must_use]
    pub const fn with_invert(self, invert: bool) -> Self {
        Self { invert, ..self }
    }

    /// Same winding with a gap.
    #[must_use]
    pub const fn with_gap(self, gap: Gap) -> Self {
        Self {
            gap: Gap::new(gap.every_n_leds, gap.extra_width),
            ..self
        }
    }

    /// Replace degenerate values with the smallest usable winding.
    ///
    /// Non-positive or NaN turns become `1.0`, zero pixels become `1`, and a
    /// negative gap width becomes `0.0`.
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self {
            total_turns: normalize_turns(self.total_turns),
            num_leds: normalize_leds(self.num_leds),
            invert: self.invert,
            gap: Gap::new(self.gap.every_n_leds, self.gap.extra_width),
        }
    }

    /// Grid dimensions for this winding. See [`solve_dimensions`].
    ///
    /// Only `total_turns` and `num_leds` are read. `gap` and `invert` move
    /// pixels within the grid but never resize it.
    ///
    /// ```rust
    /// use led_corkscrew::{CorkscrewInput, Gap};
    ///
    /// let plain = CorkscrewInput::new(2.0, 10);
    /// assert_eq!(plain.with_gap(Gap::new(3, 0.25)).state(), plain.state());
    /// ```
    #[must_use]
    pub const fn state(&self) -> CorkscrewState {
        solve_dimensions(self.total_turns, self.num_leds)
    }
}

impl Default for CorkscrewInput {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_TURNS, DEFAULT_NUM_LEDS)
    }
}

/// Rectangular grid derived from a [`CorkscrewInput`].
///
/// `width` is cells per turn, `height` is rows. `width * height` is at least the
/// pixel count, and neither is ever zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CorkscrewState {
    /// Cells per row (per turn).
    pub width: u16,
    /// Number of rows.
    pub height: u16,
}

impl CorkscrewState {
    /// Total number of cells (`width * height`).
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Cells no pixel needs: `width * height - num_leds`.
    #[must_use]
    pub const fn waste(&self, num_leds: u16) -> usize {
        self.cell_count().saturating_sub(num_leds as usize)
    }
}

/// Smallest-waste grid for `num_leds` pixels over `total_turns` turns.
///
/// Starts from `w0 = ceil(num_leds / total_turns)` (kept within `1..=num_leds`),
/// tries `w0`, `w0 - 1` and `w0 + 1`, and for each uses `height = ceil(num_leds / width)`.
/// The candidate with the fewest empty cells wins; ties go to the earlier
/// candidate in that order. Degenerate inputs are normalized first, as in
/// [`CorkscrewInput::normalized`].
///
/// Gaps do not enter here: a gap is measured in turns, so it changes where
/// pixels land, not how many cells a turn needs.
///
/// ```rust
/// use led_corkscrew::corkscrew::solve_dimensions;
///
/// const SQUARE: led_corkscrew::corkscrew::CorkscrewState = solve_dimensions(10.0, 100);
/// const _: () = assert!(SQUARE.width == 10 && SQUARE.height == 10);
/// ```
#[must_use]
pub const fn solve_dimensions(total_turns: f32, num_leds: u16) -> CorkscrewState {
    let total_turns = normalize_turns(total_turns);
    let num_leds = normalize_leds(num_leds) as u32;

    let mut nominal = ceil_to_u32(num_leds as f32 / total_turns);
    if nominal == 0 {
        nominal = 1;
    }
    if nominal > num_leds {
        nominal = num_leds;
    }

    let candidates = [nominal, nominal - 1, nominal + 1];
    let mut best_width = nominal;
    let mut best_height = div_ceil(num_leds, nominal);
    let mut best_waste = best_width * best_height - num_leds;

    let mut candidate_index = 1;
    while candidate_index < candidates.len() {
        let width = candidates[candidate_index];
        candidate_index += 1;
        if width == 0 || width > u16::MAX as u32 {
            continue;
        }
        let height = div_ceil(num_leds, width);
        let waste = width * height - num_leds;
        if waste < best_waste {
            best_width = width;
            best_height = height;
            best_waste = waste;
        }
    }

    CorkscrewState {
        width: best_width as u16,
        height: best_height as u16,
    }
}

const fn normalize_turns(total_turns: f32) -> f32 {
    // `!(x > 0.0)` also catches NaN.
    if !(total_turns > 0.0) {
        1.0
    } else {
        total_turns
    }
}

const fn normalize_leds(num_leds: u16) -> u16 {
    if num_leds == 0 { 1 } else { num_leds }
}

const fn non_negative(value: f32) -> f32 {
    if value > 0.0 { value } else { 0.0 }
}

const fn div_ceil(numerator: u32, denominator: u32) -> u32 {
    numerator.div_ceil(denominator)
}

/// `ceil` for non-negative floats, usable in `const` context.
///
/// Saturates at `u32::MAX`; non-positive and NaN inputs give `0`.
const fn ceil_to_u32(value: f32) -> u32 {
    if !(value > 0.0) {
        return 0;
    }
    let truncated = value as u32;
    if (truncated as f32) < value {
        truncated.saturating_add(1)
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_to_u32_matches_std_ceil() {
        for value in [0.25_f32, 1.0, 7.578_947, 15.157_895, 18.0, 100.5] {
            assert_eq!(ceil_to_u32(value), value.ceil() as u32, "value {value}");
        }
        assert_eq!(ceil_to_u32(-3.0), 0);
        assert_eq!(ceil_to_u32(f32::NAN), 0);
        assert_eq!(ceil_to_u32(1.0e12), u32::MAX);
    }

    #[test]
    fn ties_prefer_the_nominal_width() {
        // 144 / 19 -> w0 = 8 (8x18) ties with 9 (9x16); w0 wins.
        assert_eq!(
            solve_dimensions(19.0, 144),
            CorkscrewState {
                width: 8,
                height: 18
            }
        );
        // 4 / 2 -> w0 = 2 (2x2) ties with 1 (1x4); w0 wins.
        assert_eq!(
            solve_dimensions(2.0, 4),
            CorkscrewState {
                width: 2,
                height: 2
            }
        );
    }

    #[test]
    fn lower_neighbor_can_beat_nominal() {
        // 5 / 1.5 -> w0 = 4 wastes 3; 5x1 wastes none.
        assert_eq!(
            solve_dimensions(1.5, 5),
            CorkscrewState {
                width: 5,
                height: 1
            }
        );
    }

    #[test]
    fn fewer_than_one_turn_stays_within_pixel_count() {
        assert_eq!(
            solve_dimensions(0.5, 10),
            CorkscrewState {
                width: 10,
                height: 1
            }
        );
    }

    #[test]
    fn degenerate_inputs_normalize() {
        let one = CorkscrewState {
            width: 1,
            height: 1,
        };
        assert_eq!(solve_dimensions(0.0, 0), one);
        assert_eq!(solve_dimensions(-4.0, 1), one);
        assert_eq!(solve_dimensions(f32::NAN, 1), one);
        assert_eq!(
            solve_dimensions(0.0, 12),
            CorkscrewState {
                width: 12,
                height: 1
            }
        );

        let input = CorkscrewInput::new(-1.0, 0).with_gap(Gap::new(2, -0.5)).normalized();
        assert_eq!(input.total_turns, 1.0);
        assert_eq!(input.num_leds, 1);
        assert_eq!(input.gap.extra_width, 0.0);
    }

    #[test]
    fn gap_activity() {
        assert!(!Gap::NONE.is_active(100));
        assert!(!Gap::new(0, 0.5).is_active(100));
        assert!(!Gap::new(4, 0.0).is_active(100));
        assert!(!Gap::new(4, 0.5).is_active(4));
        assert!(Gap::new(4, 0.5).is_active(5));
        assert!(Gap::new(1, 0.5).is_active(3));
    }

    #[test]
    fn defaults_match_documented_values() {
        let input = CorkscrewInput::default();
        assert_eq!(input.total_turns, 19.0);
        assert_eq!(input.num_leds, 144);
        assert!(!input.invert);
        assert_eq!(input.gap, Gap::default());
        assert_eq!(Gap::default(), Gap::NONE);
    }

    #[test]
    fn waste_counts_empty_cells() {
        let state = solve_dimensions(1.0, 10);
        assert_eq!(state.cell_count(), 10);
        assert_eq!(state.waste(10), 0);
        assert_eq!(state.waste(7), 3);
    }
}
