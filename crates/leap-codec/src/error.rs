//! Error type for the spatial codec.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The cube side is zero, not a power of two, or its volume overflows.
    #[error("cube dimension {0} is not a power of two")]
    InvalidDimension(usize),

    /// A caller supplied a stream whose length is not `dim³`.
    #[error("bit stream has {got} bits, cube volume is {expected}")]
    BitStreamLengthMismatch { expected: usize, got: usize },

    #[error("hardware pin map is not a permutation of 0..{volume}: {reason}")]
    InvalidPinMap { volume: usize, reason: String },

    #[error("hardware pin map wired for dimension {pin_map}, codec uses {codec}")]
    PinMapDimensionMismatch { codec: usize, pin_map: usize },

    #[error("access point index {0} out of range (expected 0..4)")]
    InvalidAccessPoint(usize),

    #[error("invalid bit character {0:?}, expected '0' or '1'")]
    InvalidBitText(char),
}
