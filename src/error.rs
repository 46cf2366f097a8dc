//! Error type shared by the fallible container operations.
//!
//! The geometry itself is total; errors only arise where a caller hands the
//! crate storage whose size does not match the corkscrew.

/// Errors returned by [`Grid`](crate::grid::Grid) construction and strip output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Error {
    /// A flat pixel vector did not hold exactly `width * height` colors.
    #[display("grid of {width}x{height} cannot hold {len} colors")]
    GridSize {
        /// Requested grid width.
        width: u16,
        /// Requested grid height.
        height: u16,
        /// Length of the vector that was supplied.
        len: usize,
    },
    /// A strip output slice did not hold one color per corkscrew pixel.
    #[display("strip holds {actual} pixels but the corkscrew maps {expected}")]
    StripLength {
        /// Pixel count of the corkscrew.
        expected: usize,
        /// Length of the slice that was supplied.
        actual: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_mismatch() {
        let err = Error::GridSize {
            width: 4,
            height: 3,
            len: 11,
        };
        assert_eq!(err.to_string(), "grid of 4x3 cannot hold 11 colors");

        let err = Error::StripLength {
            expected: 288,
            actual: 144,
        };
        assert_eq!(
            err.to_string(),
            "strip holds 144 pixels but the corkscrew maps 288"
        );
    }
}
