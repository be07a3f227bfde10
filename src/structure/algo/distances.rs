/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Minimum-image geometry.
//!
//! Correct so long as the Voronoi cell of the lattice is contained within
//! one cell image in each direction; that holds for every cell this tool
//! chain sees in practice (reduced supercells of physical crystals).

use phpost_array_types::V3;

use crate::core::coords::Coords;
use crate::core::lattice::Lattice;

/// The shortest cartesian vector equivalent to `frac_b - frac_a`
/// under lattice translations.
pub fn nearest_image_vector(lattice: &Lattice, frac_a: &V3, frac_b: &V3) -> V3 {
    let diff = (frac_b - frac_a).map(|x| x - x.round());

    let mut best: Option<V3> = None;
    for &a in &[-1.0, 0.0, 1.0] {
        for &b in &[-1.0, 0.0, 1.0] {
            for &c in &[-1.0, 0.0, 1.0] {
                let cart = (diff + V3([a, b, c])) * lattice;
                let keep = match best {
                    None => true,
                    Some(v) => cart.sqnorm() < v.sqnorm(),
                };
                if keep {
                    best = Some(cart);
                }
            }
        }
    }
    best.expect("(BUG) empty image search!?")
}

pub fn nearest_image_distance(lattice: &Lattice, frac_a: &V3, frac_b: &V3) -> f64
{ nearest_image_vector(lattice, frac_a, frac_b).norm() }

/// All pairwise minimum-image distances, as a dense row-major matrix.
pub fn distance_matrix(coords: &Coords) -> Vec<Vec<f64>> {
    let fracs = coords.to_fracs();
    let lattice = coords.lattice();

    let n = fracs.len();
    let mut out = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = nearest_image_distance(lattice, &fracs[i], &fracs[j]);
            out[i][j] = d;
            out[j][i] = d;
        }
    }
    out
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::core::coords::CoordsKind;

    #[test]
    fn wraps_across_the_cell_boundary() {
        let lattice = Lattice::cubic(4.0);
        let a = V3([0.05, 0.0, 0.0]);
        let b = V3([0.95, 0.0, 0.0]);
        assert!((nearest_image_distance(&lattice, &a, &b) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn symmetric_matrix_with_zero_diagonal() {
        let lattice = Lattice::orthorhombic(3.0, 4.0, 5.0);
        let coords = Coords::new(lattice, CoordsKind::Fracs(vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.5, 0.5, 0.5]),
            V3([0.25, 0.0, 0.75]),
        ]));
        let m = distance_matrix(&coords);
        for i in 0..3 {
            assert_eq!(m[i][i], 0.0);
            for j in 0..3 {
                assert_eq!(m[i][j], m[j][i]);
            }
        }
    }

    #[test]
    fn skewed_cell_beats_naive_rounding() {
        // a cell where the nearest image is not found by coordinate-wise
        // rounding alone
        let lattice = Lattice::from(&[
            [1.0, 0.0, 0.0],
            [0.9, 0.1, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        let a = V3([0.0, 0.0, 0.0]);
        let b = V3([0.5, 0.5, 0.0]);
        let d = nearest_image_distance(&lattice, &a, &b);

        // brute force over a wider image range for reference
        let fa = a * &lattice;
        let mut best = f64::INFINITY;
        for ia in -3..4 {
            for ib in -3..4 {
                let v = (b + V3([ia as f64, ib as f64, 0.0])) * &lattice - fa;
                best = best.min(v.norm());
            }
        }
        assert!((d - best).abs() < 1e-12);
    }
}
