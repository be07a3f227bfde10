/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use phpost_array_types::V3;

use crate::core::lattice::Lattice;
use crate::oper::perm::{Perm, Permute};

/// A list of positions that knows whether it is fractional or cartesian.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordsKind {
    Carts(Vec<V3>),
    Fracs(Vec<V3>),
}

impl CoordsKind {
    pub fn len(&self) -> usize {
        match self {
            CoordsKind::Carts(v) => v.len(),
            CoordsKind::Fracs(v) => v.len(),
        }
    }

    pub fn to_carts(&self, lattice: &Lattice) -> Vec<V3> {
        match self {
            CoordsKind::Carts(v) => v.clone(),
            CoordsKind::Fracs(v) => v.iter().map(|x| x * lattice).collect(),
        }
    }

    pub fn to_fracs(&self, lattice: &Lattice) -> Vec<V3> {
        match self {
            CoordsKind::Carts(v) => v.iter().map(|x| x / lattice).collect(),
            CoordsKind::Fracs(v) => v.clone(),
        }
    }
}

/// Positions together with the lattice that gives them meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Coords {
    lattice: Lattice,
    coords: CoordsKind,
}

impl Coords {
    pub fn new(lattice: Lattice, coords: CoordsKind) -> Self
    { Coords { lattice, coords } }

    pub fn num_atoms(&self) -> usize
    { self.coords.len() }

    pub fn lattice(&self) -> &Lattice
    { &self.lattice }

    pub fn to_carts(&self) -> Vec<V3>
    { self.coords.to_carts(&self.lattice) }

    pub fn to_fracs(&self) -> Vec<V3>
    { self.coords.to_fracs(&self.lattice) }

    /// Reduces all fractional coordinates into `[0.0, 1.0)`.
    pub fn reduce_positions(&mut self) {
        let mut fracs = self.to_fracs();
        for v in &mut fracs {
            // twice, because a tiny negative value maps to 1.0 the first time
            *v = v.map(|x| x - x.floor()).map(|x| x - x.floor());
        }
        self.coords = CoordsKind::Fracs(fracs);
    }

    pub fn translate_frac(&mut self, t: &V3) {
        let mut fracs = self.to_fracs();
        for v in &mut fracs {
            *v += *t;
        }
        self.coords = CoordsKind::Fracs(fracs);
    }
}

impl Permute for Coords {
    fn permuted_by(self, perm: &Perm) -> Coords {
        let Coords { lattice, coords } = self;
        let coords = match coords {
            CoordsKind::Carts(v) => CoordsKind::Carts(v.permuted_by(perm)),
            CoordsKind::Fracs(v) => CoordsKind::Fracs(v.permuted_by(perm)),
        };
        Coords { lattice, coords }
    }
}
