/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::path::Path;

use serde::Deserialize;

use phpost_array_types::V3;
use phpost_fc::{reduce, ForceConstants, PairRule};
use phpost_structure::find_perm;
use phpost_structure_io::Poscar;

use crate::FailResult;
use crate::cmd::{index_of_position, read_symmetry_ops};

/// The pair-selection input file.
///
/// ```yaml
/// pairs:
///   - [[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]]
/// symprec: 1.0e-5    # optional
/// ```
#[derive(Debug, Deserialize)]
struct PairsFile {
    pairs: Vec<[[f64; 3]; 2]>,
    #[serde(default)]
    symprec: Option<f64>,
}

pub fn run(
    poscar_path: &Path,
    fc_path: &Path,
    sym_path: &Path,
    pairs_path: &Path,
    rule: PairRule,
    output: &Path,
) -> FailResult<()>
{Ok({
    let structure = Poscar::from_path(poscar_path)?.structure;
    let fc = ForceConstants::from_path(fc_path)?;
    ensure!(fc.num_atoms() == structure.num_atoms(),
        "force constants are for {} atoms but the structure has {}",
        fc.num_atoms(), structure.num_atoms());

    let pairs_file: PairsFile = serde_yaml::from_reader(phpost_fs_util::open_text(pairs_path)?)?;
    ensure!(!pairs_file.pairs.is_empty(), "no pairs given");
    let symprec = pairs_file.symprec.unwrap_or(crate::cmd::DEFAULT_SYMPREC);

    let pairs = pairs_file.pairs.iter()
        .map(|&[a, b]| FailResult::Ok((
            index_of_position(&structure, &V3(a), symprec)?,
            index_of_position(&structure, &V3(b), symprec)?,
        )))
        .collect::<FailResult<Vec<_>>>()?;
    debug!("selected atom pairs: {:?}", pairs);

    let ops = read_symmetry_ops(sym_path)?;
    let mappings = find_perm::of_spacegroup(structure.coords(), &ops, symprec)?;

    let mut reduced = reduce(&fc, &mappings, &pairs, rule)?;
    reduced.impose_translational_invariance();
    reduced.to_path(output)?;
    info!("wrote reduced force constants to '{}'", output.display());
})}
