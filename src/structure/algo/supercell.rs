/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Diagonal supercell construction.
//!
//! Only diagonal enlargement matrices are supported; that is what the
//! force-constant enlargement pipeline produces and consumes, and general
//! integer matrices would buy nothing but bookkeeping.

use phpost_array_types::{M33, V3};

use crate::core::coords::{Coords, CoordsKind};
use crate::core::lattice::Lattice;
use crate::core::structure::Structure;

/// Records the construction of a supercell, so that supercell atoms
/// can be traced back to the cell they came from.
///
/// Atom ordering: all images of original atom 0 first, then all images of
/// atom 1, and so on; images run over `(ia, ib, ic)` with `ic` fastest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupercellToken {
    dims: [usize; 3],
    num_prim: usize,
}

impl SupercellToken {
    pub fn dims(&self) -> [usize; 3]
    { self.dims }

    pub fn num_prim_atoms(&self) -> usize
    { self.num_prim }

    pub fn num_images(&self) -> usize
    { self.dims[0] * self.dims[1] * self.dims[2] }

    pub fn num_supercell_atoms(&self) -> usize
    { self.num_prim * self.num_images() }

    /// Original-cell atom index of each supercell atom.
    pub fn atom_prim_indices(&self) -> Vec<usize> {
        let images = self.num_images();
        (0..self.num_supercell_atoms()).map(|i| i / images).collect()
    }

    pub fn prim_index(&self, super_index: usize) -> usize
    { super_index / self.num_images() }

    /// The integer cell offset of each supercell atom, in original-cell units.
    pub fn image_offsets(&self) -> Vec<V3> {
        let [na, nb, nc] = self.dims;
        let mut offsets = Vec::with_capacity(self.num_supercell_atoms());
        for _ in 0..self.num_prim {
            for ia in 0..na {
                for ib in 0..nb {
                    for ic in 0..nc {
                        offsets.push(V3([ia as f64, ib as f64, ic as f64]));
                    }
                }
            }
        }
        offsets
    }
}

/// Replicate a structure along its own lattice vectors.
pub fn diagonal(dims: [usize; 3], structure: &Structure) -> (Structure, SupercellToken) {
    assert!(dims.iter().all(|&d| d >= 1), "bad supercell dims: {:?}", dims);

    let token = SupercellToken { dims, num_prim: structure.num_atoms() };

    let scale = M33::from_array([
        [dims[0] as f64, 0.0, 0.0],
        [0.0, dims[1] as f64, 0.0],
        [0.0, 0.0, dims[2] as f64],
    ]);
    let super_lattice = Lattice::new(&(&scale * structure.lattice().matrix()));

    let prim_fracs = structure.to_fracs();
    let inv_dims = V3([1.0 / dims[0] as f64, 1.0 / dims[1] as f64, 1.0 / dims[2] as f64]);

    let mut fracs = Vec::with_capacity(token.num_supercell_atoms());
    let mut elements = Vec::with_capacity(token.num_supercell_atoms());
    for (frac, &element) in prim_fracs.iter().zip(structure.elements()) {
        for ia in 0..dims[0] {
            for ib in 0..dims[1] {
                for ic in 0..dims[2] {
                    let offset = V3([ia as f64, ib as f64, ic as f64]);
                    fracs.push((*frac + offset).mul_diag(&inv_dims));
                    elements.push(element);
                }
            }
        }
    }

    let coords = Coords::new(super_lattice, CoordsKind::Fracs(fracs));
    (Structure::new(coords, elements), token)
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn simple_cubic(symbol: &str) -> Structure {
        let coords = Coords::new(
            Lattice::cubic(2.0),
            CoordsKind::Fracs(vec![V3([0.0, 0.0, 0.0])]),
        );
        Structure::new(coords, vec![Element::from_symbol(symbol).unwrap()])
    }

    #[test]
    fn counts_and_volume() {
        let prim = simple_cubic("Cu");
        let (sc, token) = diagonal([2, 3, 1], &prim);
        assert_eq!(sc.num_atoms(), 6);
        assert_eq!(token.num_supercell_atoms(), 6);
        assert!((sc.lattice().volume() - 6.0 * prim.lattice().volume()).abs() < 1e-12);
    }

    #[test]
    fn index_maps_agree_with_ordering() {
        let coords = Coords::new(
            Lattice::cubic(2.0),
            CoordsKind::Fracs(vec![V3([0.0, 0.0, 0.0]), V3([0.5, 0.5, 0.5])]),
        );
        let prim = Structure::new(coords, vec![
            Element::from_symbol("Na").unwrap(),
            Element::from_symbol("Cl").unwrap(),
        ]);
        let (sc, token) = diagonal([1, 1, 2], &prim);

        assert_eq!(token.atom_prim_indices(), vec![0, 0, 1, 1]);
        assert_eq!(sc.symbols(), vec!["Na", "Na", "Cl", "Cl"]);

        // the image offsets and prim indices reconstruct the frac coords
        let prim_fracs = prim.to_fracs();
        let offsets = token.image_offsets();
        for (i, frac) in sc.to_fracs().iter().enumerate() {
            let p = token.prim_index(i);
            let expect = V3([
                (prim_fracs[p][0] + offsets[i][0]) / 1.0,
                (prim_fracs[p][1] + offsets[i][1]) / 1.0,
                (prim_fracs[p][2] + offsets[i][2]) / 2.0,
            ]);
            assert!((frac - &expect).norm() < 1e-12);
        }
    }
}
