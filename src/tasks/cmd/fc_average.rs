/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::path::Path;

use phpost_fc::{average, ForceConstants};
use phpost_structure::{find_perm, Permute};
use phpost_structure_io::Poscar;

use crate::FailResult;

/// Average several force-constant files over their common structure.
///
/// The structures must all describe the same configuration, possibly with
/// differently-ordered atoms (relaxation output tends to shuffle them);
/// the first file's order is canonical.  Writes each reindexed input as
/// `FORCE_CONSTANTS_{i}` and the mean as `FORCE_CONSTANTS_AVERAGE`.
pub fn run(
    poscar_paths: &[&Path],
    fc_paths: &[&Path],
    weights: Option<Vec<f64>>,
    symprec: f64,
) -> FailResult<()>
{Ok({
    ensure!(poscar_paths.len() == fc_paths.len(),
        "got {} structures but {} force constant files",
        poscar_paths.len(), fc_paths.len());
    ensure!(!poscar_paths.is_empty(), "nothing to average");

    let canonical = Poscar::from_path(poscar_paths[0])?.structure;

    let mut reindexed = Vec::with_capacity(fc_paths.len());
    for (poscar_path, fc_path) in poscar_paths.iter().zip(fc_paths) {
        let structure = Poscar::from_path(poscar_path)?.structure;
        ensure!(structure.num_atoms() == canonical.num_atoms(),
            "'{}' does not match the first structure in size", poscar_path.display());

        let mut fc = ForceConstants::from_path(fc_path)?;
        ensure!(fc.num_atoms() == structure.num_atoms(),
            "'{}' does not match its structure in size", fc_path.display());
        fc.symmetrize();

        let perm = find_perm::of_positions(structure.coords(), canonical.coords(), symprec)?;
        reindexed.push(fc.permuted_by(&perm));
    }

    for (i, fc) in reindexed.iter().enumerate() {
        fc.to_path(format!("FORCE_CONSTANTS_{}", i))?;
    }

    let mean = average(&reindexed, weights.as_ref().map(|w| &w[..]))?;
    mean.to_path("FORCE_CONSTANTS_AVERAGE")?;
    info!("averaged {} sets of force constants", reindexed.len());
})}
