/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Mesh-sampled atomic volumes.
//!
//! A cheap, convergence-controlled alternative to the exact Voronoi cells:
//! sample the cell on a uniform fractional grid and hand each sample point
//! to its nearest atom (split evenly on ties).  Converges to the Voronoi
//! volumes as the mesh is refined.

use itertools::iproduct;
use phpost_array_types::V3;

use crate::core::coords::Coords;

/// Sampled per-atom volumes on an `n0 x n1 x n2` grid.
///
/// `prec` is the distance slack (in cartesian units) within which sample
/// points count as tied between atoms.
pub fn sampled_volumes(coords: &Coords, mesh: [usize; 3], prec: f64) -> Vec<f64> {
    assert!(mesh.iter().all(|&m| m >= 1), "bad mesh: {:?}", mesh);

    let lattice = coords.lattice();
    let fracs = coords.to_fracs();
    let n = fracs.len();

    let mut weights = vec![0.0f64; n];
    let mut distances = vec![0.0f64; n];
    for (i0, i1, i2) in iproduct!(0..mesh[0], 0..mesh[1], 0..mesh[2]) {
        let sample = V3([
            i0 as f64 / mesh[0] as f64,
            i1 as f64 / mesh[1] as f64,
            i2 as f64 / mesh[2] as f64,
        ]);

        for (atom, frac) in fracs.iter().enumerate() {
            let diff = (sample - frac).map(|x| x - x.round());
            distances[atom] = (diff * lattice).norm();
        }
        let nearest = distances.iter().cloned().fold(f64::INFINITY, f64::min);

        let close: Vec<usize> = (0..n)
            .filter(|&atom| distances[atom] - nearest < prec)
            .collect();
        for &atom in &close {
            weights[atom] += 1.0 / close.len() as f64;
        }
    }

    let num_samples = (mesh[0] * mesh[1] * mesh[2]) as f64;
    let cell_volume = lattice.volume();
    weights.iter().map(|w| w / num_samples * cell_volume).collect()
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::core::coords::CoordsKind;
    use crate::core::lattice::Lattice;

    #[test]
    fn weights_always_partition_the_cell() {
        // regardless of mesh resolution, the sum is exactly the cell volume
        let coords = Coords::new(Lattice::cubic(4.0), CoordsKind::Fracs(vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.4, 0.5, 0.5]),
            V3([0.7, 0.1, 0.9]),
        ]));
        for &mesh in &[[3, 3, 3], [8, 8, 8]] {
            let vols = sampled_volumes(&coords, mesh, 1e-6);
            let total: f64 = vols.iter().sum();
            assert!((total - 64.0).abs() < 1e-9, "{:?}", vols);
        }
    }

    #[test]
    fn symmetric_sites_share_evenly() {
        // CsCl arrangement: by symmetry the two atoms tie on every sample
        // point that is equidistant, and the volumes come out equal
        let coords = Coords::new(Lattice::cubic(4.0), CoordsKind::Fracs(vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.5, 0.5, 0.5]),
        ]));
        let vols = sampled_volumes(&coords, [6, 6, 6], 1e-6);
        assert!((vols[0] - vols[1]).abs() < 1e-9, "{:?}", vols);
        assert!((vols[0] - 32.0).abs() < 1e-9, "{:?}", vols);
    }

    #[test]
    fn refines_toward_the_voronoi_volumes() {
        let coords = Coords::new(Lattice::cubic(3.0), CoordsKind::Fracs(vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.3, 0.0, 0.0]),
            V3([0.6, 0.0, 0.0]),
        ]));
        let exact = crate::algo::voronoi::cell_volumes(&coords).unwrap();
        let sampled = sampled_volumes(&coords, [30, 10, 10], 1e-6);
        for (a, b) in exact.iter().zip(&sampled) {
            assert!((a - b).abs() / a < 0.1, "{:?} vs {:?}", exact, sampled);
        }
    }
}
