/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

pub mod fc_average;
pub mod fc_reduce;
pub mod fc_distribution;
pub mod fc_enlarge;
pub mod eos_fit;
pub mod debye;
pub mod volumes;
pub mod displacements;
pub mod band_path;

use phpost_array_types::V3;
use phpost_structure::{FracOp, Structure};

use crate::FailResult;

/// Shared default for site-matching tolerances, in cartesian length units.
pub const DEFAULT_SYMPREC: f64 = 1e-5;

/// Read a `phonopy --sym` YAML file and return its operators.
pub fn read_symmetry_ops(path: &std::path::Path) -> FailResult<Vec<FracOp>>
{Ok({
    let yaml = phpost_phonopy_io::symmetry_yaml::read(phpost_fs_util::open_text(path)?)?;
    info!("{}: space group {} ({}), {} operations",
        path.display(),
        yaml.space_group_type,
        yaml.space_group_number,
        yaml.space_group_operations.len());
    yaml.frac_ops()
})}

/// The index of the atom sitting at a fractional position, within `symprec`.
pub fn index_of_position(structure: &Structure, position: &V3, symprec: f64) -> FailResult<usize>
{Ok({
    let lattice = structure.lattice();
    let fracs = structure.to_fracs();
    let found = fracs.iter().position(|frac| {
        let diff = (frac - position).map(|x| x - x.round());
        (diff * lattice).norm() < symprec
    });
    match found {
        Some(index) => index,
        None => bail!("no atom at position {:?} (within {})", position, symprec),
    }
})}
