/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Position matching.
//!
//! Everything downstream of symmetry in this workspace consumes atom-index
//! permutations rather than operators, so this module is where operators
//! (and differently-ordered files) get turned into [`Perm`]s, with the
//! convention:
//!
//! > `mapping.index_source(i) = j` means the source atom `j` lands on the
//! > site of the target atom `i`,
//!
//! which makes `source.permuted_by(&mapping)` coincide with the target
//! site-for-site.

use failure::Backtrace;
use phpost_array_types::V3;

use crate::core::coords::Coords;
use crate::core::lattice::Lattice;
use crate::oper::perm::Perm;
use crate::oper::symmops::FracOp;

#[derive(Debug, Fail)]
pub enum PositionMatchError {
    #[fail(display = "positions are too dissimilar")]
    NoMatch(Backtrace),
    #[fail(display = "multiple positions mapped to the same index")]
    DuplicateMatch(Backtrace),
}

/// Find the `Perm` that reorders `source` onto the sites of `target`.
///
/// Both must be in units of `lattice`; sites correspond when they coincide
/// within `tol` (cartesian, minimum image).
pub fn match_positions(
    lattice: &Lattice,
    source_fracs: &[V3],
    target_fracs: &[V3],
    tol: f64,
) -> Result<Perm, PositionMatchError>
{Ok({
    assert_eq!(source_fracs.len(), target_fracs.len());
    let n = target_fracs.len();

    let close = |a: &V3, b: &V3| {
        let diff = (a - b).map(|x| x - x.round());
        let cart = diff * lattice;
        cart.sqnorm() < tol * tol
    };

    let mut used = vec![false; n];
    let mut mapping = Vec::with_capacity(n);
    for target in target_fracs {
        let mut found = None;
        for (j, source) in source_fracs.iter().enumerate() {
            if close(source, target) {
                match used[j] {
                    true => return Err(PositionMatchError::DuplicateMatch(Backtrace::new())),
                    false => {
                        found = Some(j);
                        break;
                    },
                }
            }
        }
        match found {
            None => return Err(PositionMatchError::NoMatch(Backtrace::new())),
            Some(j) => {
                used[j] = true;
                mapping.push(j);
            },
        }
    }

    Perm::from_vec(mapping).expect("(BUG) invalid perm without match error!?")
})}

/// Find the `Perm` that reorders `source` onto the sites of `target`.
///
/// This is how differently-ordered structure files describing the same
/// configuration are brought into a canonical order.
pub fn of_positions(
    source: &Coords,
    target: &Coords,
    tol: f64,
) -> Result<Perm, PositionMatchError>
{
    // both sets of fracs are interpreted in the target lattice; inputs are
    // expected to describe the same cell up to relaxation-scale noise
    match_positions(target.lattice(), &source.to_fracs(), &target.to_fracs(), tol)
}

/// Compute atom mappings for all operators in a spacegroup.
///
/// `mappings[k].index_source(i) = j` means operator `k` moves atom `j` onto
/// the site of atom `i`.  The inverse mappings used by the distribution
/// analysis are `mappings[k].inverted()`.
///
/// Every operator is validated by construction: an operator that does not
/// actually permute the sites within `tol` produces an error here rather
/// than silent nonsense downstream.
pub fn of_spacegroup(
    prim: &Coords,
    ops: &[FracOp],
    tol: f64,
) -> Result<Vec<Perm>, PositionMatchError>
{Ok({
    let fracs = prim.to_fracs();
    let lattice = prim.lattice();

    let mut perms = Vec::with_capacity(ops.len());
    for op in ops {
        let transformed = op.transform_fracs(&fracs);
        perms.push(match_positions(lattice, &transformed, &fracs, tol)?);
    }
    trace!("computed mappings for {} operators", perms.len());
    perms
})}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::core::coords::CoordsKind;
    use crate::oper::perm::Permute;
    use crate::oper::symmops::{FracRot, FracTrans};

    fn random_fracs(n: usize) -> Vec<V3> {
        (0..n).map(|_| V3([rand::random(), rand::random(), rand::random()])).collect()
    }

    #[test]
    fn recovers_a_random_shuffle() {
        for _ in 0..5 {
            let lattice = Lattice::random_uniform(3.0);
            let original = random_fracs(16);
            let perm = Perm::random(16);
            let shuffled = original.clone().permuted_by(&perm);

            let found = match_positions(&lattice, &shuffled, &original, 1e-6).unwrap();
            // applying the found perm to the shuffle must recover the target
            assert_eq!(shuffled.permuted_by(&found), original);
        }
    }

    #[test]
    fn no_match_is_an_error() {
        let lattice = Lattice::cubic(4.0);
        let a = vec![V3([0.0, 0.0, 0.0]), V3([0.5, 0.5, 0.5])];
        let b = vec![V3([0.0, 0.0, 0.0]), V3([0.25, 0.25, 0.25])];
        match match_positions(&lattice, &a, &b, 1e-5) {
            Err(PositionMatchError::NoMatch(_)) => {},
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn coincident_sites_are_an_error() {
        let lattice = Lattice::cubic(4.0);
        let a = vec![V3([0.0, 0.0, 0.0]), V3([0.0, 0.0, 0.0])];
        let b = vec![V3([0.0, 0.0, 0.0]), V3([0.0, 0.0, 0.0])];
        match match_positions(&lattice, &a, &b, 1e-5) {
            Err(PositionMatchError::DuplicateMatch(_)) => {},
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn spacegroup_mappings_satisfy_their_defining_property() {
        // rocksalt-like four-site cell; fourfold rotation about z through origin
        let lattice = Lattice::cubic(4.0);
        let fracs = vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.5, 0.0, 0.0]),
            V3([0.0, 0.5, 0.0]),
            V3([0.5, 0.5, 0.0]),
        ];
        let coords = Coords::new(lattice, CoordsKind::Fracs(fracs.clone()));
        let ops = vec![
            FracOp::eye(),
            FracOp::new(
                FracRot::new(&[[0, -1, 0], [1, 0, 0], [0, 0, 1]]),
                FracTrans::eye(),
            ),
        ];

        let mappings = of_spacegroup(&coords, &ops, 1e-5).unwrap();
        assert_eq!(mappings[0], Perm::eye(4));

        for (op, mapping) in ops.iter().zip(&mappings) {
            let transformed = op.transform_fracs(&fracs);
            let relabeled = transformed.permuted_by(mapping);
            for (a, b) in relabeled.iter().zip(&fracs) {
                let diff = (a - b).map(|x| x - x.round());
                assert!((diff * coords.lattice()).norm() < 1e-10);
            }
        }
    }
}
