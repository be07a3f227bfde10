/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Zeroing out force constants by symmetry orbit.
//!
//! Given a few anchor pairs of atoms, the symmetry mappings expand each pair
//! into its full orbit, and either only those pair blocks survive (`Keep`)
//! or exactly those pair blocks are zeroed (`Remove`).  Working with whole
//! orbits is what keeps the result compatible with the symmetry the
//! mappings came from.

use phpost_structure::Perm;

use crate::{FailResult, ForceConstants};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PairRule {
    /// Zero everything *except* the orbits of the given pairs.
    Keep,
    /// Zero *exactly* the orbits of the given pairs.
    Remove,
}

/// Apply `rule` to the orbits of `pairs` under `mappings`.
///
/// Every mapping must have the same length as the matrix.  The caller is
/// expected to follow up with `impose_translational_invariance`; this
/// function leaves the diagonal blocks untouched (`Keep` keeps them).
pub fn reduce(
    fc: &ForceConstants,
    mappings: &[Perm],
    pairs: &[(usize, usize)],
    rule: PairRule,
) -> FailResult<ForceConstants>
{Ok({
    let n = fc.num_atoms();
    ensure!(!mappings.is_empty(), "no symmetry mappings given");
    ensure!(mappings.iter().all(|m| m.len() == n),
        "mapping length does not match the force constants");
    for &(a, b) in pairs {
        ensure!(a < n && b < n, "pair ({}, {}) out of range for {} atoms", a, b, n);
    }

    // the orbit of every anchor pair, both ways around
    let mut selected = vec![false; n * n];
    for mapping in mappings {
        for &(a, b) in pairs {
            let i = mapping.index_source(a);
            let j = mapping.index_source(b);
            selected[i * n + j] = true;
            selected[j * n + i] = true;
        }
    }

    let mut out = match rule {
        PairRule::Keep => ForceConstants::zeros(n),
        PairRule::Remove => fc.clone(),
    };
    for i in 0..n {
        for j in 0..n {
            if selected[i * n + j] {
                out[(i, j)] = match rule {
                    PairRule::Keep => fc[(i, j)],
                    PairRule::Remove => Default::default(),
                };
            }
        }
    }
    // `Keep` zeroes the diagonal along with everything else unless the
    // diagonal was selected; restore it so that both rules agree on it
    if rule == PairRule::Keep {
        for i in 0..n {
            if !selected[i * n + i] {
                out[(i, i)] = fc[(i, i)];
            }
        }
    }
    out
})}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::tests::random_fc;
    use phpost_array_types::M33;

    // a 4-site cell with a single non-trivial mapping that swaps 0<->1, 2<->3
    fn swap_mappings() -> Vec<Perm> {
        vec![
            Perm::eye(4),
            Perm::from_vec(vec![1, 0, 3, 2]).unwrap(),
        ]
    }

    #[test]
    fn keep_and_remove_partition_the_matrix() {
        let fc = {
            let mut fc = random_fc(4);
            fc.symmetrize();
            fc
        };
        let pairs = [(0, 2)];
        let kept = reduce(&fc, &swap_mappings(), &pairs, PairRule::Keep).unwrap();
        let removed = reduce(&fc, &swap_mappings(), &pairs, PairRule::Remove).unwrap();

        for i in 0..4 {
            for j in 0..4 {
                let sum = kept[(i, j)] + removed[(i, j)];
                let expect = match i == j {
                    // both rules keep the diagonal
                    true => fc[(i, j)] + fc[(i, j)],
                    false => fc[(i, j)],
                };
                for r in 0..3 {
                    assert!((sum[r] - expect[r]).norm() < 1e-15,
                        "mismatch at ({}, {})", i, j);
                }
            }
        }
    }

    #[test]
    fn orbit_is_selected_both_ways() {
        let fc = random_fc(4);
        let removed = reduce(&fc, &swap_mappings(), &[(0, 2)], PairRule::Remove).unwrap();

        // orbit of (0, 2) under {e, swap} is {(0,2), (1,3)} plus transposes
        for &(i, j) in &[(0, 2), (2, 0), (1, 3), (3, 1)] {
            assert_eq!(removed[(i, j)], M33::zero());
        }
        // untouched pair
        assert_eq!(removed[(0, 1)], fc[(0, 1)]);
    }

    #[test]
    fn out_of_range_pair_is_an_error() {
        let fc = random_fc(2);
        assert!(reduce(&fc, &[Perm::eye(2)], &[(0, 5)], PairRule::Keep).is_err());
    }
}
