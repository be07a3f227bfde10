/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::path::Path;

use phpost_structure::{volume_mesh, voronoi};
use phpost_structure_io::Poscar;

use crate::FailResult;
use crate::filetypes::sites::{self, SiteTable};

/// Per-atom volume statistics, by exact Voronoi cells or by mesh sampling.
pub fn run(poscar_path: &Path, mesh: Option<[usize; 3]>) -> FailResult<()>
{Ok({
    let structure = Poscar::from_path(poscar_path)?.structure;

    let (volumes, filename, header_lines) = match mesh {
        None => {
            let volumes = voronoi::cell_volumes(structure.coords())?;
            (volumes, "atomic_volume.dat".to_string(), vec![])
        },
        Some(mesh) => {
            let volumes = volume_mesh::sampled_volumes(structure.coords(), mesh, 1e-6);
            let filename = format!("atomic_volume_{}_{}_{}.dat", mesh[0], mesh[1], mesh[2]);
            let header = format!("{} {} {}", mesh[0], mesh[1], mesh[2]);
            (volumes, filename, vec![header])
        },
    };

    let total: f64 = volumes.iter().sum();
    let cell = structure.lattice().volume();
    debug!("sum of atomic volumes: {} (cell: {})", total, cell);
    if (total - cell).abs() > 1e-6 * cell {
        // the mesh estimator is exact-by-construction here too, so this
        // indicates a real problem rather than discretization error
        warn!("atomic volumes sum to {} but the cell volume is {}", total, cell);
    }

    sites::write(phpost_fs_util::create_text(&filename)?, &SiteTable {
        title: "Voronoi_volume",
        header_lines: &header_lines,
        elements: structure.elements(),
        values: &volumes,
        with_sqrt_average: false,
    })?;
    info!("wrote atomic volumes to '{}'", filename);
})}
