//! Voxel frames: one fully populated cube for one transmission instant.

use crate::grid::{CubeDim, Voxel};

/// A `dim³` grid of bits, all zero on construction.
///
/// Frames are created by [`SpatialCodec::encode`](crate::SpatialCodec::encode)
/// and consumed straight away by decode or hardware serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialFrame {
    dim: CubeDim,
    cells: Vec<bool>,
}

impl SpatialFrame {
    pub fn new(dim: CubeDim) -> Self {
        Self {
            dim,
            cells: vec![false; dim.volume()],
        }
    }

    pub fn dim(&self) -> CubeDim {
        self.dim
    }

    /// Write `bit` at `v`.  Panics if `v` is outside the cube.
    pub fn write(&mut self, v: Voxel, bit: bool) {
        let i = self.dim.offset(v);
        self.cells[i] = bit;
    }

    /// Light the cell at `v`.
    pub fn set(&mut self, v: Voxel) {
        self.write(v, true);
    }

    /// Panics if `v` is outside the cube.
    pub fn read(&self, v: Voxel) -> bool {
        self.cells[self.dim.offset(v)]
    }

    /// The whole grid, layer-major.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn count_ones(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Lit voxels in layer-major order.
    pub fn lit(&self) -> impl Iterator<Item = Voxel> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, lit)| **lit)
            .map(|(i, _)| self.dim.voxel(i))
    }
}
