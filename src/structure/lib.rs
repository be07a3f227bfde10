/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Periodic structures and the index bookkeeping done on them.
//!
//! The heart of this crate is the combination of [`Perm`] with
//! [`find_perm`]: symmetry operations and site correspondences are both
//! represented as validated permutations of atom indices, which downstream
//! code then applies to coordinate lists, metadata lists, and force-constant
//! matrices alike.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;
#[macro_use] extern crate lazy_static;

pub type FailResult<T> = Result<T, failure::Error>;

mod core;
mod oper;
mod algo;
mod element;

//---------------------------
// public reexports; API

pub use crate::core::lattice::Lattice;
pub use crate::core::coords::{Coords, CoordsKind};
pub use crate::core::structure::Structure;

pub use crate::element::{Element, ElementParseError};

pub use crate::oper::perm::{Perm, Permute, InvalidPermError};
pub use crate::oper::symmops::{FracRot, FracTrans, FracOp};

pub use crate::algo::find_perm::{self, PositionMatchError};
pub use crate::algo::distances::{nearest_image_vector, nearest_image_distance, distance_matrix};
pub use crate::algo::supercell::{self, SupercellToken};
pub use crate::algo::voronoi;
pub use crate::algo::volume_mesh;
pub use crate::algo::randomize;

/// First-appearance-ordered list of distinct symbols, and for each atom the
/// index of its symbol in that list.
pub fn symbol_types(elements: &[Element]) -> (Vec<Element>, Vec<usize>) {
    let mut types: Vec<Element> = vec![];
    let numbers = elements.iter().map(|&elem| {
        match types.iter().position(|&t| t == elem) {
            Some(i) => i,
            None => {
                types.push(elem);
                types.len() - 1
            },
        }
    }).collect();
    (types, numbers)
}
