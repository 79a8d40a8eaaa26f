//! Three-dimensional Hilbert curve tables.
//!
//! The curve is built by octree subdivision.  A cube of side `s` is split
//! into eight octants of side `s/2` which are visited in Hilbert order; each
//! octant carries its own frame of three signed unit step vectors, permuted
//! and flipped per octant so the curve never jumps between consecutive
//! indices.  At side 1 the current voxel receives the next linear index.
//!
//! Construction uses an explicit worklist instead of recursion, so the table
//! is produced by a pure function and the running index lives on the stack
//! of [`HilbertCurve::new`] only.

use tracing::debug;

use crate::grid::{CubeDim, Voxel};
use crate::CodecError;

type Axis = [i64; 3];

/// One pending sub-cube of the subdivision.
struct Octant {
    side: i64,
    origin: Axis,
    axes: [Axis; 3],
}

/// Bijection between linear bit positions and voxels of a `dim³` cube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HilbertCurve {
    dim: CubeDim,
    /// Linear index for each voxel, layer-major.
    index_of: Vec<usize>,
    /// Voxel for each linear index.
    voxel_of: Vec<Voxel>,
}

impl HilbertCurve {
    /// Build the canonical curve for a cube of side `dim`.
    pub fn new(dim: usize) -> Result<Self, CodecError> {
        let dim = CubeDim::new(dim)?;
        let index_of = build_table(dim);
        let curve = Self::from_index_table(dim, index_of);
        debug!(dim = dim.side(), order = dim.order(), "hilbert curve built");
        Ok(curve)
    }

    fn from_index_table(dim: CubeDim, index_of: Vec<usize>) -> Self {
        let mut voxel_of = vec![Voxel::new(0, 0, 0); dim.volume()];
        for (offset, &index) in index_of.iter().enumerate() {
            voxel_of[index] = dim.voxel(offset);
        }
        Self { dim, index_of, voxel_of }
    }

    pub fn dim(&self) -> CubeDim {
        self.dim
    }

    /// Linear index assigned to `v`.
    ///
    /// # Panics
    /// If `v` lies outside the cube.
    pub fn index(&self, v: Voxel) -> usize {
        self.index_of[self.dim.offset(v)]
    }

    /// Voxel holding linear index `i`.  Panics if `i >= dim³`.
    pub fn voxel(&self, i: usize) -> Voxel {
        self.voxel_of[i]
    }

    /// The flat layer-major index table.
    pub fn as_slice(&self) -> &[usize] {
        &self.index_of
    }

    /// The curve as seen after a 90° turn about the vertical axis.
    ///
    /// Each layer is transposed and then has its columns reversed, i.e.
    /// `rotated[l][r][c] = self[l][dim-1-c][r]`.
    pub fn rotate_vertical(&self) -> Self {
        let n = self.dim.side();
        let index_of = self
            .dim
            .voxels()
            .map(|v| self.index(Voxel::new(v.x, n - 1 - v.z, v.y)))
            .collect();
        Self::from_index_table(self.dim, index_of)
    }
}

fn build_table(dim: CubeDim) -> Vec<usize> {
    let mut table = vec![0usize; dim.volume()];
    let mut next = 0usize;
    let mut stack = vec![Octant {
        side: dim.side() as i64,
        origin: [0, 0, 0],
        axes: [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
    }];

    while let Some(Octant { side, origin, axes }) = stack.pop() {
        if side == 1 {
            let v = Voxel::new(origin[0] as usize, origin[1] as usize, origin[2] as usize);
            table[dim.offset(v)] = next;
            next += 1;
            continue;
        }

        let h = side / 2;
        // Negative step vectors walk back from the far face of the octant.
        let mut p = origin;
        for axis in &axes {
            for i in 0..3 {
                if axis[i] < 0 {
                    p[i] -= h * axis[i];
                }
            }
        }

        let [a, b, c] = axes;
        let at = |steps: &[Axis]| -> Axis {
            let mut q = p;
            for s in steps {
                for i in 0..3 {
                    q[i] += h * s[i];
                }
            }
            q
        };

        let children = [
            (at(&[]), [b, c, a]),
            (at(&[a]), [c, a, b]),
            (at(&[a, b]), [c, a, b]),
            (at(&[b]), [neg(a), neg(b), c]),
            (at(&[b, c]), [neg(a), neg(b), c]),
            (at(&[a, b, c]), [neg(c), a, neg(b)]),
            (at(&[a, c]), [neg(c), a, neg(b)]),
            (at(&[c]), [b, neg(c), neg(a)]),
        ];
        // Reverse so the first octant is popped first.
        for (origin, axes) in children.into_iter().rev() {
            stack.push(Octant { side: h, origin, axes });
        }
    }

    debug_assert_eq!(next, dim.volume());
    table
}

fn neg(v: Axis) -> Axis {
    [-v[0], -v[1], -v[2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bijective(curve: &HilbertCurve) {
        let mut seen = vec![false; curve.dim().volume()];
        for &i in curve.as_slice() {
            assert!(!seen[i], "index {i} assigned twice");
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn unit_cube_has_single_cell() {
        let curve = HilbertCurve::new(1).unwrap();
        assert_eq!(curve.as_slice(), &[0]);
        assert_eq!(curve.rotate_vertical().as_slice(), &[0]);
    }

    #[test]
    fn canonical_order_for_side_two() {
        let curve = HilbertCurve::new(2).unwrap();
        // Layer-major: (0,0,0) (0,0,1) (0,1,0) (0,1,1) (1,0,0) ...
        assert_eq!(curve.as_slice(), &[0, 7, 3, 4, 1, 6, 2, 5]);
        assert_eq!(curve.voxel(0), Voxel::new(0, 0, 0));
        assert_eq!(curve.voxel(7), Voxel::new(0, 0, 1));
    }

    #[test]
    fn bijective_for_supported_sizes() {
        for dim in [1, 2, 4, 8, 16] {
            assert_bijective(&HilbertCurve::new(dim).unwrap());
        }
    }

    #[test]
    fn consecutive_indices_are_adjacent() {
        for dim in [2, 4, 8, 16] {
            let curve = HilbertCurve::new(dim).unwrap();
            for i in 0..curve.dim().volume() - 1 {
                let d = curve.voxel(i).manhattan(&curve.voxel(i + 1));
                assert_eq!(d, 1, "dim {dim}: indices {i} and {} are {d} apart", i + 1);
            }
        }
    }

    #[test]
    fn curve_starts_at_origin() {
        let curve = HilbertCurve::new(8).unwrap();
        assert_eq!(curve.index(Voxel::new(0, 0, 0)), 0);
    }

    #[test]
    fn four_quarter_turns_is_identity() {
        let curve = HilbertCurve::new(4).unwrap();
        let full = curve
            .rotate_vertical()
            .rotate_vertical()
            .rotate_vertical()
            .rotate_vertical();
        assert_eq!(full, curve);
    }

    #[test]
    fn rotation_keeps_layers() {
        let curve = HilbertCurve::new(4).unwrap();
        let turned = curve.rotate_vertical();
        assert_bijective(&turned);
        for i in 0..64 {
            assert_eq!(curve.voxel(i).x, turned.voxel(i).x, "index {i} changed layer");
        }
    }

    #[test]
    fn rejects_invalid_dimension() {
        assert_eq!(HilbertCurve::new(6), Err(CodecError::InvalidDimension(6)));
        assert_eq!(HilbertCurve::new(0), Err(CodecError::InvalidDimension(0)));
    }
}
