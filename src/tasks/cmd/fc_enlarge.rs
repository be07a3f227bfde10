/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use phpost_fc::{enlarge, ForceConstants};
use phpost_structure::{randomize, Element};
use phpost_structure_io::Poscar;

use crate::FailResult;

/// The fc-enlarge config file.
///
/// ```yaml
/// structure: POSCAR
/// force_constants: FORCE_CONSTANTS
/// enlargement: [2, 2, 2]
/// symprec: 1.0e-5
/// # optional decoration of the enlarged cell:
/// substitutions:
///   - replaced: Fe
///     targets: { Cr: 0.5, Ni: 0.5 }
/// random_seed: 42
/// ```
#[derive(Debug, Deserialize)]
struct Config {
    #[serde(default = "default_structure")]
    structure: String,
    #[serde(default = "default_force_constants")]
    force_constants: String,
    enlargement: [usize; 3],
    #[serde(default = "default_symprec")]
    symprec: f64,
    #[serde(default)]
    substitutions: Vec<SubstitutionConfig>,
    #[serde(default)]
    random_seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SubstitutionConfig {
    replaced: String,
    targets: BTreeMap<String, f64>,
}

fn default_structure() -> String { "POSCAR".to_string() }
fn default_force_constants() -> String { "FORCE_CONSTANTS".to_string() }
fn default_symprec() -> f64 { crate::cmd::DEFAULT_SYMPREC }

pub fn run(config_path: &Path) -> FailResult<()>
{Ok({
    let config: Config = serde_yaml::from_reader(phpost_fs_util::open_text(config_path)?)?;
    info!("enlargement: {:?}", config.enlargement);

    let poscar = Poscar::from_path(&config.structure)?;
    let fc = ForceConstants::from_path(&config.force_constants)?;

    let (enlarged, enlarged_fc) =
        enlarge(&fc, &poscar.structure, config.enlargement, config.symprec)?;

    Poscar::from_structure(poscar.comment.clone(), enlarged.clone())
        .to_path("POSCAR_ENLARGED")?;
    enlarged_fc.to_path("FORCE_CONSTANTS_ENLARGED")?;

    if !config.substitutions.is_empty() {
        let substitutions = config.substitutions.iter()
            .map(|sub| FailResult::Ok(randomize::Substitution {
                replaced: Element::from_symbol(&sub.replaced)?,
                targets: sub.targets.iter()
                    .map(|(symbol, &ratio)| FailResult::Ok((Element::from_symbol(symbol)?, ratio)))
                    .collect::<FailResult<Vec<_>>>()?,
            }))
            .collect::<FailResult<Vec<_>>>()?;

        let decorated =
            randomize::randomized_configuration(&enlarged, &substitutions, config.random_seed)?;
        Poscar::from_structure(poscar.comment, decorated)
            .to_path("POSCAR_ENLARGED_DISORDERED")?;
        info!("wrote a randomized decoration of the enlarged cell");
    }
})}
