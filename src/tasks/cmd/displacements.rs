/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::path::Path;

use phpost_array_types::V3;
use phpost_structure::Structure;
use phpost_structure_io::Poscar;

use crate::FailResult;
use crate::filetypes::sites::{self, SiteTable};

/// Squared atomic displacements of a structure from its ideal counterpart.
///
/// The mean displacement (drift) is subtracted first: a relaxation is free
/// to translate the whole cell, and that translation is not disorder.
pub fn run(poscar_path: &Path, ideal_path: &Path, output: &Path) -> FailResult<()>
{Ok({
    let structure = Poscar::from_path(poscar_path)?.structure;
    let ideal = Poscar::from_path(ideal_path)?.structure;
    ensure!(structure.num_atoms() == ideal.num_atoms(),
        "the structures differ in size");

    let sad = squared_displacements(&structure, &ideal);

    sites::write(phpost_fs_util::create_text(output)?, &SiteTable {
        title: "SAD_(A^2)",
        header_lines: &[],
        elements: structure.elements(),
        values: &sad,
        with_sqrt_average: true,
    })?;
    info!("wrote squared displacements to '{}'", output.display());
})}

/// Squared displacement per site, Å², minimum-image, drift-corrected.
pub fn squared_displacements(structure: &Structure, ideal: &Structure) -> Vec<f64> {
    let fracs = structure.to_fracs();
    let fracs_ideal = ideal.to_fracs();
    let lattice = structure.lattice();

    let origin = {
        let mut sum = V3::zero();
        for (a, b) in fracs.iter().zip(&fracs_ideal) {
            sum += (a - b).map(|x| x - x.round());
        }
        sum / fracs.len() as f64
    };

    fracs.iter().zip(&fracs_ideal)
        .map(|(a, b)| {
            let diff = (a - b - origin).map(|x| x - x.round());
            (diff * lattice).sqnorm()
        })
        .collect()
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use phpost_structure::{Coords, CoordsKind, Element, Lattice};

    fn structure_at(fracs: Vec<V3>) -> Structure {
        let n = fracs.len();
        Structure::new(
            Coords::new(Lattice::cubic(4.0), CoordsKind::Fracs(fracs)),
            vec![Element::from_symbol("W").unwrap(); n],
        )
    }

    #[test]
    fn pure_drift_gives_zero() {
        let ideal = structure_at(vec![V3([0.0, 0.0, 0.0]), V3([0.5, 0.5, 0.5])]);
        let drifted = structure_at(vec![V3([0.1, 0.0, 0.0]), V3([0.6, 0.5, 0.5])]);
        for &sad in &squared_displacements(&drifted, &ideal) {
            assert!(sad < 1e-20, "sad = {}", sad);
        }
    }

    #[test]
    fn opposite_displacements_split_evenly() {
        let ideal = structure_at(vec![V3([0.25, 0.0, 0.0]), V3([0.75, 0.0, 0.0])]);
        // one atom +0.05, the other -0.05 along x; no net drift
        let distorted = structure_at(vec![V3([0.30, 0.0, 0.0]), V3([0.70, 0.0, 0.0])]);
        let sad = squared_displacements(&distorted, &ideal);
        // 0.05 * 4 = 0.2 A displacement each
        for &v in &sad {
            assert!((v - 0.04).abs() < 1e-12, "sad = {:?}", sad);
        }
    }

    #[test]
    fn wraps_across_the_boundary() {
        let ideal = structure_at(vec![V3([0.01, 0.0, 0.0]), V3([0.5, 0.0, 0.0])]);
        // first atom relaxes to just below 1.0, which is a small negative
        // displacement, not a huge positive one
        let distorted = structure_at(vec![V3([0.99, 0.0, 0.0]), V3([0.52, 0.0, 0.0])]);
        let sad = squared_displacements(&distorted, &ideal);
        assert!(sad.iter().all(|&v| v < 0.1), "sad = {:?}", sad);
    }
}
