/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use phpost_array_types::{M33, V3};

use crate::core::lattice::Lattice;

// NOTE: Operators are in units of the cell they were derived for; applying
//       them to a different cell (e.g. a supercell of the one handed to the
//       symmetry finder) is only valid when that cell shares the full
//       translation group.

/// The rotation part of a spacegroup operation, in fractional units.
///
/// Stored in the conventional column-acting form: a fractional position
/// (thought of as a column) maps to `W x`.  Row-vector code should use
/// [`FracRot::float_t`] and multiply on the right.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FracRot {
    w: [[i32; 3]; 3],
}

/// The translation part of a spacegroup operation, in fractional units.
#[derive(Debug, Clone, PartialEq)]
pub struct FracTrans(V3);

/// A spacegroup operation on fractional positions.
#[derive(Debug, Clone, PartialEq)]
pub struct FracOp {
    pub rot: FracRot,
    pub trans: FracTrans,
}

fn det_i32(m: &[[i32; 3]; 3]) -> i32 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

impl FracRot {
    pub fn eye() -> Self
    { FracRot { w: [[1, 0, 0], [0, 1, 0], [0, 0, 1]] } }

    /// Construct from a matrix `W` that acts on fractional columns.
    ///
    /// # Panics
    /// Panics unless `abs(det(W)) == 1`.
    pub fn new(w: &[[i32; 3]; 3]) -> FracRot {
        assert_eq!(det_i32(w).abs(), 1, "rotation is not unimodular: {:?}", w);
        FracRot { w: *w }
    }

    pub fn matrix(&self) -> &[[i32; 3]; 3]
    { &self.w }

    /// The transpose as floats, for multiplying fractional rows on the right.
    pub fn float_t(&self) -> M33
    { M33::from_fn(|r, c| f64::from(self.w[c][r])) }

    /// The cartesian form of the rotation, in the column-acting convention
    /// (`R Φ R^T` is how a 3x3 cartesian tensor block transforms).
    ///
    /// With lattice rows `L`, this is `L^T W L^{-T}`.
    pub fn cart_rot(&self, lattice: &Lattice) -> M33 {
        let lt = lattice.matrix().t();
        let w = M33::from_fn(|r, c| f64::from(self.w[r][c]));
        &(&lt * &w) * &lattice.inverse_matrix().t()
    }

    pub fn transform_fracs(&self, fracs: &[V3]) -> Vec<V3> {
        let t = self.float_t();
        fracs.iter().map(|v| v * &t).collect()
    }
}

impl Default for FracRot {
    fn default() -> Self
    { Self::eye() }
}

impl FracTrans {
    pub fn eye() -> Self
    { FracTrans(V3::zero()) }

    pub fn from_vector(v: V3) -> Self
    { FracTrans(v) }

    pub fn vector(&self) -> &V3
    { &self.0 }
}

impl Default for FracTrans {
    fn default() -> Self
    { Self::eye() }
}

impl FracOp {
    pub fn eye() -> Self
    { FracOp { rot: FracRot::eye(), trans: FracTrans::eye() } }

    pub fn new(rot: FracRot, trans: FracTrans) -> Self
    { FracOp { rot, trans } }

    pub fn transform_fracs(&self, fracs: &[V3]) -> Vec<V3> {
        let mut out = self.rot.transform_fracs(fracs);
        for v in &mut out {
            *v += *self.trans.vector();
        }
        out
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn rot_transform() {
        let r = FracRot::new(&[
            [0, -1, 0],
            [1,  0, 0],
            [0,  0, 1],
        ]);
        assert_eq!(
            r.transform_fracs(&[V3([1.0, 5.0, 7.0])]),
            vec![V3([-5.0, 1.0, 7.0])],
        );
    }

    #[test]
    fn cart_rot_in_cubic_cell_is_the_frac_rot() {
        let r = FracRot::new(&[
            [0, -1, 0],
            [1,  0, 0],
            [0,  0, 1],
        ]);
        let lattice = Lattice::cubic(3.37);
        let cart = r.cart_rot(&lattice);
        for i in 0..3 {
            for j in 0..3 {
                assert!((cart[i][j] - f64::from(r.matrix()[i][j])).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn cart_rot_is_orthogonal_in_skewed_cell() {
        // hexagonal cell; sixfold rotation
        let lattice = Lattice::from(&[
            [1.0, 0.0, 0.0],
            [-0.5, 0.75f64.sqrt(), 0.0],
            [0.0, 0.0, 1.6],
        ]);
        let r = FracRot::new(&[
            [1, -1, 0],
            [1,  0, 0],
            [0,  0, 1],
        ]);
        let cart = r.cart_rot(&lattice);
        let should_be_eye = &cart * &cart.t();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((should_be_eye[i][j] - expected).abs() < 1e-10,
                    "not orthogonal: {:?}", should_be_eye);
            }
        }
    }

    #[test]
    fn op_translates_after_rotating() {
        let op = FracOp::new(
            FracRot::new(&[
                [0, -1, 0],
                [1,  0, 0],
                [0,  0, 1],
            ]),
            FracTrans::from_vector(V3([0.5, 0.0, 0.25])),
        );
        let out = op.transform_fracs(&[V3([0.25, 0.0, 0.0])]);
        assert_eq!(out, vec![V3([0.5, 0.25, 0.25])]);
    }
}
