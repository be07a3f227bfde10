/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Fixed-size 3d vector and matrix types.
//!
//! Everything in this workspace that isn't an `n_atoms`-sized array is a
//! 3-vector or a 3x3 matrix, so rather than pull in a general linear algebra
//! crate we provide exactly those two types, with the row-centric conventions
//! used throughout the workspace:
//!
//! * positions are row vectors;
//! * `v * &m` multiplies a row vector on the left of a matrix;
//! * a matrix whose rows are lattice vectors maps fractional rows to
//!   cartesian rows by right-multiplication.

pub use self::types::{V3, M33};
mod types;

pub use self::ops::dot;
mod ops;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_roundtrip() {
        let m = M33::from_array([
            [2.0, 2.0, 0.0],
            [0.0, 4.0, 0.0],
            [0.0, 0.0, 2.0],
        ]);
        let inv = m.inv();
        assert_eq!(&m * &inv, M33::eye());
        assert_eq!(&inv * &m, M33::eye());
    }

    #[test]
    fn det_of_transpose() {
        let m = M33::from_array([
            [1.0, 4.0, 0.5],
            [0.0, 2.0, 1.0],
            [3.0, 0.0, 2.0],
        ]);
        assert!((m.det() - m.t().det()).abs() < 1e-12);
    }

    #[test]
    fn row_vector_convention() {
        let m = M33::from_array([
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        // rows transform as rows
        assert_eq!(V3([1.0, 2.0, 3.0]) * &m, V3([2.0, 1.0, 3.0]));
    }

    #[test]
    fn cross_handedness() {
        let x = V3([1.0, 0.0, 0.0]);
        let y = V3([0.0, 1.0, 0.0]);
        assert_eq!(x.cross(&y), V3([0.0, 0.0, 1.0]));
    }
}
