/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::path::Path;

use phpost_array_types::M33;
use phpost_fc::{analyze_distribution, ForceConstants};
use phpost_structure::find_perm;
use phpost_structure_io::Poscar;

use crate::FailResult;
use crate::cmd::read_symmetry_ops;
use crate::filetypes::fc_values;

/// Tabulate the symmetry orbit of one force-constant block.
///
/// `poscar_path` is the disordered structure the force constants belong to;
/// `ideal_path` its ordered (averaged) counterpart, whose symmetry generates
/// the orbit of the anchor pair `(a1, a2)`.
pub fn run(
    poscar_path: &Path,
    ideal_path: &Path,
    fc_path: &Path,
    sym_path: &Path,
    (a1, a2): (usize, usize),
    symprec: f64,
    output: &Path,
) -> FailResult<()>
{Ok({
    let structure = Poscar::from_path(poscar_path)?.structure;
    let ideal = Poscar::from_path(ideal_path)?.structure;
    ensure!(structure.num_atoms() == ideal.num_atoms(),
        "the disordered and ideal structures differ in size");

    let fc = ForceConstants::from_path(fc_path)?;

    let ops = read_symmetry_ops(sym_path)?;
    let mappings = find_perm::of_spacegroup(ideal.coords(), &ops, symprec)?;
    debug!("computed {} atom mappings", mappings.len());
    let cart_rots: Vec<M33> = ops.iter()
        .map(|op| op.rot.cart_rot(ideal.lattice()))
        .collect();

    let rows = analyze_distribution(&fc, &structure, &mappings, &cart_rots, (a1, a2))?;
    fc_values::write(phpost_fs_util::create_text(output)?, &rows)?;
    info!("wrote {} distribution rows to '{}'", rows.len(), output.display());
})}
