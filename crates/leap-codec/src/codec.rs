//! The spatial codec: bit streams in, voxel frames out, and back.
//!
//! ```text
//!   bits ──encode(ap)──▶ SpatialFrame ──hardware_map──▶ wire-order bits
//!                             │
//!                             └──decode (always AP0)──▶ bits / fingerprint
//! ```
//!
//! Encoding looks up each voxel's bit position in the table of the requested
//! access point.  Decoding always uses the canonical AP0 table, whatever
//! orientation produced the frame: a receiver standing at AP`k` reads the
//! cube through its own rotation, so with the shared canonical convention it
//! recovers a permutation of the stream that is unique to its position.
//! That permutation is the directional fingerprint used to admit access
//! points.

use tracing::{debug, info};

use crate::bits::BitStream;
use crate::frame::SpatialFrame;
use crate::grid::CubeDim;
use crate::hilbert::HilbertCurve;
use crate::orientation::AccessPoint;
use crate::pin_map::HardwarePinMap;
use crate::CodecError;

/// Canonical curve, its three rotations, and the transmitter wiring.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct SpatialCodec {
    dim: CubeDim,
    orientations: [HilbertCurve; AccessPoint::COUNT],
    pin_map: HardwarePinMap,
}

impl SpatialCodec {
    pub fn new(dim: usize, pin_map: HardwarePinMap) -> Result<Self, CodecError> {
        let canonical = HilbertCurve::new(dim)?;
        let cube = canonical.dim();
        if pin_map.dim() != cube {
            return Err(CodecError::PinMapDimensionMismatch {
                codec: cube.side(),
                pin_map: pin_map.dim().side(),
            });
        }

        // Each access point sits a further quarter turn from the previous one.
        let ap1 = canonical.rotate_vertical();
        let ap2 = ap1.rotate_vertical();
        let ap3 = ap2.rotate_vertical();

        info!(dim = cube.side(), volume = cube.volume(), "spatial codec initialised");
        Ok(Self {
            dim: cube,
            orientations: [canonical, ap1, ap2, ap3],
            pin_map,
        })
    }

    /// Codec wired with the LEAP v2 layered pin map.
    pub fn leap(dim: usize) -> Result<Self, CodecError> {
        Self::new(dim, HardwarePinMap::leap_layered(dim)?)
    }

    pub fn dim(&self) -> CubeDim {
        self.dim
    }

    /// Number of bits carried by one frame, `dim³`.
    pub fn frame_bits(&self) -> usize {
        self.dim.volume()
    }

    pub fn pin_map(&self) -> &HardwarePinMap {
        &self.pin_map
    }

    /// Curve table for `ap`.
    pub fn orientation(&self, ap: AccessPoint) -> &HilbertCurve {
        &self.orientations[ap.index()]
    }

    /// The three non-canonical tables, AP1 to AP3.
    pub fn rotations(&self) -> &[HilbertCurve] {
        &self.orientations[1..]
    }

    fn check_len(&self, got: usize) -> Result<(), CodecError> {
        let expected = self.dim.volume();
        if got != expected {
            return Err(CodecError::BitStreamLengthMismatch { expected, got });
        }
        Ok(())
    }

    /// Place `bits` on the cube as seen from `ap`.
    pub fn encode(&self, bits: &BitStream, ap: AccessPoint) -> Result<SpatialFrame, CodecError> {
        self.check_len(bits.len())?;
        let table = self.orientation(ap);
        let mut frame = SpatialFrame::new(self.dim);
        for v in self.dim.voxels() {
            if bits[table.index(v)] {
                frame.set(v);
            }
        }
        Ok(frame)
    }

    /// Read a frame back with the canonical AP0 table.
    pub fn decode(&self, frame: &SpatialFrame) -> BitStream {
        let canonical = self.orientation(AccessPoint::Ap0);
        let mut bits = BitStream::zeros(self.dim.volume());
        for v in frame.lit() {
            bits.set(canonical.index(v), true);
        }
        bits
    }

    /// Serialize a frame in transmitter wire order.
    pub fn hardware_map(&self, frame: &SpatialFrame) -> BitStream {
        (0..self.dim.volume())
            .map(|wire| frame.read(self.pin_map.voxel(wire)))
            .collect()
    }

    /// Rebuild the frame a wire-order stream lights up.
    pub fn frame_from_hardware(&self, wires: &BitStream) -> Result<SpatialFrame, CodecError> {
        self.check_len(wires.len())?;
        let mut frame = SpatialFrame::new(self.dim);
        for (wire, bit) in wires.iter().enumerate() {
            if bit {
                frame.set(self.pin_map.voxel(wire));
            }
        }
        Ok(frame)
    }

    /// What a receiver at `ap` reconstructs when `bits` is transmitted
    /// towards it: `decode(encode(bits, ap))`.
    pub fn fingerprint(&self, bits: &BitStream, ap: AccessPoint) -> Result<BitStream, CodecError> {
        let frame = self.encode(bits, ap)?;
        Ok(self.decode(&frame))
    }

    /// Index permutation `π` with `fingerprint(b, ap)[i] == b[π[i]]`.
    ///
    /// Identity for AP0.
    pub fn fingerprint_permutation(&self, ap: AccessPoint) -> Vec<usize> {
        let canonical = self.orientation(AccessPoint::Ap0);
        let table = self.orientation(ap);
        let mut perm = vec![0usize; self.dim.volume()];
        for v in self.dim.voxels() {
            perm[canonical.index(v)] = table.index(v);
        }
        debug!(%ap, "fingerprint permutation derived");
        perm
    }
}
