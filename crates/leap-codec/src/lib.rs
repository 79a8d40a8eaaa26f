//! # leap-codec
//!
//! Spatial codec for LEAP voxel transmitters.
//!
//! A one-dimensional bit stream is laid onto the cells of a `dim × dim × dim`
//! LED cube along a three-dimensional Hilbert curve.  The curve preserves
//! locality: bits next to each other in the stream light cells next to each
//! other in the cube.
//!
//! The four receiver positions around the cube ([`AccessPoint`]) each see
//! the canonical curve turned by a multiple of 90° about the vertical axis.
//! Decoding always uses the canonical orientation, so a receiver at a
//! non-canonical position reconstructs a position-specific permutation of
//! the stream, its *directional fingerprint*.
//!
//! | Type | Role |
//! |---|---|
//! | [`HilbertCurve`] | voxel ↔ bit position bijection |
//! | [`SpatialFrame`] | one lit-up cube |
//! | [`HardwarePinMap`] | voxel ↔ transmitter wire permutation |
//! | [`SpatialCodec`] | encode / decode / hardware serialization |
//!
//! ## Quick start
//! ```rust
//! use leap_codec::{AccessPoint, BitStream, SpatialCodec};
//!
//! let codec = SpatialCodec::leap(2)?;
//! let bits: BitStream = "10100101".parse()?;
//! let frame = codec.encode(&bits, AccessPoint::Ap0)?;
//! assert_eq!(codec.decode(&frame), bits);
//! let wires = codec.hardware_map(&frame);
//! assert_eq!(wires.len(), 8);
//! # Ok::<(), leap_codec::CodecError>(())
//! ```

pub mod bits;
pub mod codec;
pub mod error;
pub mod frame;
pub mod grid;
pub mod hilbert;
pub mod orientation;
pub mod pin_map;

pub use bits::BitStream;
pub use codec::SpatialCodec;
pub use error::CodecError;
pub use frame::SpatialFrame;
pub use grid::{CubeDim, Voxel};
pub use hilbert::HilbertCurve;
pub use orientation::AccessPoint;
pub use pin_map::HardwarePinMap;
