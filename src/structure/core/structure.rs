/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use phpost_array_types::V3;

use crate::core::coords::Coords;
use crate::core::lattice::Lattice;
use crate::element::Element;
use crate::oper::perm::{Perm, Permute};

/// [`Coords`] together with per-atom element metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub(crate) coords: Coords,
    pub(crate) elements: Vec<Element>,
}

impl Structure {
    /// # Panics
    /// Panics if the lengths disagree.
    pub fn new(coords: Coords, elements: Vec<Element>) -> Self {
        assert_eq!(coords.num_atoms(), elements.len());
        Structure { coords, elements }
    }

    pub fn num_atoms(&self) -> usize
    { self.coords.num_atoms() }

    pub fn lattice(&self) -> &Lattice
    { self.coords.lattice() }

    pub fn coords(&self) -> &Coords
    { &self.coords }

    pub fn elements(&self) -> &[Element]
    { &self.elements }

    pub fn to_carts(&self) -> Vec<V3>
    { self.coords.to_carts() }

    pub fn to_fracs(&self) -> Vec<V3>
    { self.coords.to_fracs() }

    pub fn symbols(&self) -> Vec<&'static str>
    { self.elements.iter().map(|e| e.symbol()).collect() }

    pub fn with_elements(self, elements: Vec<Element>) -> Self {
        assert_eq!(self.coords.num_atoms(), elements.len());
        Structure { coords: self.coords, elements }
    }

    pub fn into_parts(self) -> (Coords, Vec<Element>)
    { (self.coords, self.elements) }
}

impl Permute for Structure {
    fn permuted_by(self, perm: &Perm) -> Structure {
        let Structure { coords, elements } = self;
        Structure {
            coords: coords.permuted_by(perm),
            elements: elements.permuted_by(perm),
        }
    }
}
