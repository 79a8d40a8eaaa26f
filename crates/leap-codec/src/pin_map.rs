//! Hardware pin maps: the wiring between grid voxels and transmitter wires.
//!
//! The LEAP v2 cubes are wired layer by layer from the bottom up.  Inside a
//! layer the wire numbers run left to right along a row, starting from the
//! row nearest the front of the board, which is the *last* row of the grid:
//!
//! ```text
//! Bottom layer 0    Layer 1           Layer 2           Top layer 3
//! 12 13 14 15       28 29 30 31       44 45 46 47       60 61 62 63
//!  8  9 10 11       24 25 26 27       40 41 42 43       56 57 58 59
//!  4  5  6  7       20 21 22 23       36 37 38 39       52 53 54 55
//!  0  1  2  3       16 17 18 19       32 33 34 35       48 49 50 51
//! ```

use crate::grid::{CubeDim, Voxel};
use crate::CodecError;

/// A permutation voxel → wire index, together with its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwarePinMap {
    dim: CubeDim,
    wire_of: Vec<usize>,
    voxel_of_wire: Vec<Voxel>,
}

impl HardwarePinMap {
    /// Build from a flat layer-major table of wire indices.
    pub fn from_flat(dim: usize, wires: Vec<usize>) -> Result<Self, CodecError> {
        let dim = CubeDim::new(dim)?;
        let volume = dim.volume();
        if wires.len() != volume {
            return Err(CodecError::InvalidPinMap {
                volume,
                reason: format!("table has {} entries", wires.len()),
            });
        }

        let mut voxel_of_wire: Vec<Option<Voxel>> = vec![None; volume];
        for (offset, &wire) in wires.iter().enumerate() {
            let slot = voxel_of_wire.get_mut(wire).ok_or_else(|| CodecError::InvalidPinMap {
                volume,
                reason: format!("wire {wire} out of range"),
            })?;
            if slot.is_some() {
                return Err(CodecError::InvalidPinMap {
                    volume,
                    reason: format!("wire {wire} used twice"),
                });
            }
            *slot = Some(dim.voxel(offset));
        }

        // Length matches and no wire repeats, so every slot is filled.
        let voxel_of_wire = voxel_of_wire.into_iter().flatten().collect();
        Ok(Self {
            dim,
            wire_of: wires,
            voxel_of_wire,
        })
    }

    /// Build from a nested `[layer][row][col]` table.
    pub fn from_table(table: &[Vec<Vec<usize>>]) -> Result<Self, CodecError> {
        let side = table.len();
        let square = table
            .iter()
            .all(|layer| layer.len() == side && layer.iter().all(|row| row.len() == side));
        if !square {
            return Err(CodecError::InvalidPinMap {
                volume: side.saturating_mul(side).saturating_mul(side),
                reason: "table is not a cube".to_string(),
            });
        }
        let flat = table.iter().flatten().flatten().copied().collect();
        Self::from_flat(side, flat)
    }

    /// The LEAP v2 wiring for a cube of side `dim`:
    /// `layer·dim² + (dim−1−row)·dim + col`.
    pub fn leap_layered(dim: usize) -> Result<Self, CodecError> {
        let cube = CubeDim::new(dim)?;
        let wires = cube
            .voxels()
            .map(|v| v.x * dim * dim + (dim - 1 - v.y) * dim + v.z)
            .collect();
        Self::from_flat(dim, wires)
    }

    /// Wire index equals the layer-major voxel offset.
    pub fn row_major(dim: usize) -> Result<Self, CodecError> {
        let cube = CubeDim::new(dim)?;
        Self::from_flat(dim, (0..cube.volume()).collect())
    }

    pub fn dim(&self) -> CubeDim {
        self.dim
    }

    /// Wire driving voxel `v`.  Panics if `v` is outside the cube.
    pub fn wire(&self, v: Voxel) -> usize {
        self.wire_of[self.dim.offset(v)]
    }

    /// Voxel on wire `w`.  Panics if `w >= dim³`.
    pub fn voxel(&self, w: usize) -> Voxel {
        self.voxel_of_wire[w]
    }
}
