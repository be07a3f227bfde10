/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::io::prelude::*;
use std::path::Path;

use phpost_array_types::V3;
use phpost_structure::{Coords, CoordsKind, Element, Lattice, Structure};

use vasp_poscar as imp;

use crate::FailResult;

//--------------------------------------------------------------------------------------
// public API

/// A POSCAR, as this workspace understands one: a structure plus the
/// title comment.
#[derive(Debug, Clone)]
pub struct Poscar {
    pub comment: String,
    pub structure: Structure,
}

impl Poscar {
    pub fn from_structure(comment: impl Into<String>, structure: Structure) -> Self
    { Poscar { comment: comment.into(), structure } }

    /// Reads a POSCAR from an open file.
    ///
    /// This forcibly reads to EOF because it must construct a BufReader.
    pub fn from_reader(mut f: impl Read) -> FailResult<Self> {
        let out = load_txt(&mut std::io::BufReader::new(&mut f))?;
        f.read_to_end(&mut vec![])?;
        Ok(out)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FailResult<Self>
    {Ok({
        use failure::ResultExt;
        let file = std::fs::File::open(path.as_ref())
            .with_context(|_| format!("while opening file: '{}'", path.as_ref().display()))?;
        Self::from_reader(file)
            .with_context(|_| format!("while reading POSCAR: '{}'", path.as_ref().display()))?
    })}

    /// Writes a POSCAR to an open file.
    pub fn to_writer(&self, mut w: impl Write) -> FailResult<()>
    { dump(&mut w, &self.comment, &self.structure) }

    pub fn to_path(&self, path: impl AsRef<Path>) -> FailResult<()>
    {Ok({
        use failure::ResultExt;
        let file = std::fs::File::create(path.as_ref())
            .with_context(|_| format!("could not create file: '{}'", path.as_ref().display()))?;
        self.to_writer(std::io::BufWriter::new(file))
            .with_context(|_| format!("while writing POSCAR: '{}'", path.as_ref().display()))?
    })}
}

//--------------------------------------------------------------------------------------
// implementation

// monomorphic
fn dump(w: &mut dyn Write, title: &str, structure: &Structure) -> FailResult<()>
{Ok({
    write!(w, "{}",
        imp::Builder::new()
            .comment(title)
            .lattice_vectors(&structure.lattice().matrix().as_array())
            .positions(imp::Coords::Frac(
                structure.to_fracs().into_iter().map(V3::into_array).collect::<Vec<_>>(),
            ))
            .site_symbols(structure.elements().iter().map(|&elem| elem.symbol()))
            .build()?,
    )?;
})}

fn load_txt(f: &mut dyn BufRead) -> FailResult<Poscar>
{Ok({
    use vasp_poscar::failure::ResultExt;
    let poscar = imp::Poscar::from_reader(f).compat()?;

    let comment = poscar.comment().to_string();
    let lattice = Lattice::from(&poscar.scaled_lattice_vectors());
    let coords = match poscar.scaled_positions() {
        imp::Coords::Cart(p) => CoordsKind::Carts(p.iter().map(|&v| V3(v)).collect()),
        imp::Coords::Frac(p) => CoordsKind::Fracs(p.iter().map(|&v| V3(v)).collect()),
    };

    let group_elems = {
        // we need symbols, but prior to VASP 5 they were not even part of
        // the format, so some programs don't write them where they belong.
        // Sometimes they are used as the title comment (by phonopy, ASE...).
        let group_symbols: Vec<String> = match poscar.group_symbols() {
            Some(iter) => iter.map(|s| s.to_string()).collect(),
            None => {
                let symbols: Vec<_> =
                    poscar.comment().split_whitespace().map(|s| s.to_string()).collect();
                ensure!(
                    symbols.len() == poscar.group_counts().count(),
                    "Symbols must be given either in the standard location or the POSCAR comment."
                );
                // pray for the best.  If they're not the group symbols, it is at least
                // unlikely that the next step will erroneously "succeed"
                symbols
            },
        };
        group_symbols.into_iter()
            .map(|sym| Element::from_symbol(&sym))
            .collect::<Result<Vec<Element>, _>>()?
    };

    let elements: Vec<Element> = {
        itertools::zip_eq(poscar.group_counts(), group_elems)
            .flat_map(|(c, elem)| std::iter::repeat(elem).take(c))
            .collect()
    };

    assert_eq!(elements.len(), coords.len());
    let structure = Structure::new(Coords::new(lattice, coords), elements);
    Poscar { comment, structure }
})}
