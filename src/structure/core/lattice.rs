/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::ops::{Div, Mul};

use phpost_array_types::{M33, V3};

/// Defines a vector basis for periodic boundary conditions in three dimensions.
///
/// The matrix rows are the lattice vectors.  A `Lattice` is the thing you
/// multiply "fractional" row vectors against to produce "cartesian" row
/// vectors; the inverse is precomputed so that the reverse conversion is a
/// multiplication as well.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    matrix: M33,
    inverse: M33,
}

impl Lattice {
    /// Create a lattice from a matrix where the rows are lattice vectors.
    pub fn new(matrix: &M33) -> Self {
        let inverse = matrix.inv();
        Self { matrix: *matrix, inverse }
    }

    /// Matrix where lattice vectors are rows.
    #[inline]
    pub fn matrix(&self) -> &M33
    { &self.matrix }

    /// The (precomputed) inverse of `matrix()`.
    #[inline]
    pub fn inverse_matrix(&self) -> &M33
    { &self.inverse }

    #[inline]
    pub fn vectors(&self) -> &[V3; 3]
    { &self.matrix.0 }

    pub fn norms(&self) -> [f64; 3]
    { [self.matrix[0].norm(), self.matrix[1].norm(), self.matrix[2].norm()] }

    /// The (positive) volume of the cell.
    pub fn volume(&self) -> f64
    { self.matrix.det().abs() }
}

/// Helper constructors
impl Lattice {
    /// The identity lattice.
    #[inline]
    pub fn eye() -> Self
    { Self::cubic(1.0) }

    #[inline]
    pub fn diagonal(&[a, b, c]: &[f64; 3]) -> Self
    { Self::orthorhombic(a, b, c) }

    /// A cubic lattice ((a, a, a), (90, 90, 90))
    #[inline]
    pub fn cubic(a: f64) -> Self
    { Self::orthorhombic(a, a, a) }

    /// An orthorhombic lattice ((a, b, c), (90, 90, 90))
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Self
    { Self::from(&[[a, 0.0, 0.0], [0.0, b, 0.0], [0.0, 0.0, c]]) }

    // who needs quickcheck
    /// Generate a random lattice for tests.  Uniform in `[-x, x]` per element,
    /// rejecting nearly-singular draws.
    #[cfg(test)]
    pub fn random_uniform(max: f64) -> Self {
        loop {
            let matrix = M33::from_fn(|_, _| (rand::random::<f64>() - 0.5) * 2.0 * max);
            if matrix.det().abs() > 1e-2 * max.powi(3) {
                return Lattice::new(&matrix);
            }
        }
    }
}

/// Defaults to the identity matrix.
impl Default for Lattice {
    #[inline]
    fn default() -> Lattice
    { Lattice::eye() }
}

impl<'a> From<&'a [[f64; 3]; 3]> for Lattice {
    #[inline(always)]
    fn from(m: &'a [[f64; 3]; 3]) -> Self
    { Lattice::new(&M33::from_array(*m)) }
}

// `frac * &lattice` and `cart / &lattice`; deliberately the only two
// multiplications provided, since those are the only two meanings a
// Lattice has in this workspace.

impl<'b> Mul<&'b Lattice> for V3 {
    type Output = V3;

    #[inline]
    fn mul(self, lattice: &'b Lattice) -> V3
    { self * lattice.matrix() }
}

impl<'a, 'b> Mul<&'b Lattice> for &'a V3 {
    type Output = V3;

    #[inline]
    fn mul(self, lattice: &'b Lattice) -> V3
    { *self * lattice.matrix() }
}

impl<'b> Div<&'b Lattice> for V3 {
    type Output = V3;

    #[inline]
    fn div(self, lattice: &'b Lattice) -> V3
    { self * lattice.inverse_matrix() }
}

impl<'a, 'b> Div<&'b Lattice> for &'a V3 {
    type Output = V3;

    #[inline]
    fn div(self, lattice: &'b Lattice) -> V3
    { *self * lattice.inverse_matrix() }
}
