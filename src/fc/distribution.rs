/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The distribution of force constants over a symmetry orbit.
//!
//! In a disordered structure sitting on an ideal (averaged) geometry, sites
//! that are equivalent under the *ideal* symmetry carry *different* force
//! constants, because their chemical environments differ.  This module
//! collects, for one anchor pair of sites, every symmetry image of that pair
//! with its block rotated back into the anchor frame, so that the spread of
//! the values can be inspected directly.

use phpost_array_types::M33;
use phpost_structure::{distance_matrix, Element, Perm, Structure};

use crate::{FailResult, ForceConstants};

/// One symmetry image of the anchor pair.
#[derive(Debug, Clone)]
pub struct DistributionRow {
    /// Chemical symbols of the pair, from the disordered structure.
    pub elements: (Element, Element),
    /// Minimum-image distance between the pair, in the disordered structure.
    pub distance: f64,
    /// The pair's block, rotated into the anchor frame.
    pub tensor: M33,
}

/// Collect the orbit of the anchor pair `(a1, a2)`.
///
/// `mappings` and `cart_rots` come from the *ideal* structure's symmetry
/// operations (one entry each per operation, same order); `structure` is the
/// disordered structure the force constants belong to.
pub fn analyze_distribution(
    fc: &ForceConstants,
    structure: &Structure,
    mappings: &[Perm],
    cart_rots: &[M33],
    (a1, a2): (usize, usize),
) -> FailResult<Vec<DistributionRow>>
{Ok({
    let n = structure.num_atoms();
    ensure!(fc.num_atoms() == n,
        "force constants are for {} atoms but the structure has {}", fc.num_atoms(), n);
    ensure!(a1 < n && a2 < n, "anchor pair ({}, {}) out of range", a1, a2);
    ensure!(mappings.len() == cart_rots.len(),
        "got {} mappings but {} rotations", mappings.len(), cart_rots.len());
    ensure!(mappings.iter().all(|m| m.len() == n),
        "mapping length does not match the structure");

    let elements = structure.elements();
    let distances = distance_matrix(structure.coords());

    let mut rows = Vec::with_capacity(mappings.len());
    for (mapping, rot) in mappings.iter().zip(cart_rots) {
        // the atoms that the operation carries onto the anchor sites
        let inverse = mapping.inverted();
        let i0 = inverse.index_source(a1);
        let i1 = inverse.index_source(a2);

        let rotated = &(rot * &fc[(i0, i1)]) * &rot.t();
        rows.push(DistributionRow {
            elements: (elements[i0], elements[i1]),
            distance: distances[i0][i1],
            tensor: rotated,
        });
    }
    rows
})}
