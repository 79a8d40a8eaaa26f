//! Cube geometry shared by every table in the codec.
//!
//! Grids are stored layer-major: the first axis (`x`) is the vertical axis of
//! the transmitter (bottom layer = 0), `y` is the row inside a layer and `z`
//! the column.  All tables in this crate flatten a voxel with
//! [`CubeDim::offset`], so a flat `Vec` can be indexed by voxel directly.

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// A cell of the cube.  `x` is the vertical (layer) axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voxel {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Voxel {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Manhattan distance between two voxels.
    pub fn manhattan(&self, other: &Voxel) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }
}

/// A validated cube side length: a power of two whose volume fits in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CubeDim {
    side: usize,
    volume: usize,
}

impl CubeDim {
    pub fn new(side: usize) -> Result<Self, CodecError> {
        if !side.is_power_of_two() {
            return Err(CodecError::InvalidDimension(side));
        }
        let volume = side
            .checked_mul(side)
            .and_then(|sq| sq.checked_mul(side))
            .ok_or(CodecError::InvalidDimension(side))?;
        Ok(Self { side, volume })
    }

    /// Side length of the cube.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of cells, `side³`.
    pub fn volume(&self) -> usize {
        self.volume
    }

    /// Curve order `log2(side)`.
    pub fn order(&self) -> u32 {
        self.side.trailing_zeros()
    }

    pub fn contains(&self, v: Voxel) -> bool {
        v.x < self.side && v.y < self.side && v.z < self.side
    }

    /// Flat layer-major offset of `v`.
    ///
    /// # Panics
    /// If `v` lies outside the cube.  Every caller iterates `[0, side)³`, so
    /// an out-of-range voxel is a bug rather than bad input.
    pub fn offset(&self, v: Voxel) -> usize {
        assert!(self.contains(v), "voxel {v:?} outside cube of side {}", self.side);
        (v.x * self.side + v.y) * self.side + v.z
    }

    /// Inverse of [`offset`](Self::offset).
    pub fn voxel(&self, offset: usize) -> Voxel {
        assert!(offset < self.volume, "offset {offset} outside cube volume {}", self.volume);
        let z = offset % self.side;
        let y = (offset / self.side) % self.side;
        let x = offset / (self.side * self.side);
        Voxel { x, y, z }
    }

    /// All voxels in layer-major order.
    pub fn voxels(&self) -> impl Iterator<Item = Voxel> + '_ {
        (0..self.volume).map(move |i| self.voxel(i))
    }
}

impl TryFrom<usize> for CubeDim {
    type Error = CodecError;

    fn try_from(side: usize) -> Result<Self, Self::Error> {
        Self::new(side)
    }
}

impl From<CubeDim> for usize {
    fn from(dim: CubeDim) -> usize {
        dim.side
    }
}
