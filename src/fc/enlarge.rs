/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Enlarging a force-constant matrix to a bigger supercell.
//!
//! A supercell force-constant block `Φ[i, j]` lumps together the couplings
//! of atom `i` with *every* periodic image of atom `j`.  Enlarging the cell
//! by a diagonal factor makes some of those images distinct atoms, so each
//! block has to be split up again.  Following the usual shortest-vector
//! convention, the coupling is assigned to the image(s) of `j` nearest to
//! `i`, shared evenly on ties; an enlarged pair then collects the shortest
//! vectors that are congruent to its own cell offset.
//!
//! Self blocks are not replicated at all: the diagonal is rebuilt from
//! scratch by the translational-invariance correction, which is the only
//! consistent choice since a supercell diagonal cannot be unfolded.

use std::collections::HashMap;

use itertools::iproduct;
use phpost_array_types::V3;
use phpost_structure::{supercell, Structure};

use crate::{FailResult, ForceConstants};

/// Replicate `fc` onto the `[na, nb, nc]` diagonal enlargement of its cell.
///
/// Returns the enlarged structure along with the enlarged matrix.  The
/// result is exactly periodic, permutation-symmetric, and has zero row sums.
pub fn enlarge(
    fc: &ForceConstants,
    structure: &Structure,
    dims: [usize; 3],
    symprec: f64,
) -> FailResult<(Structure, ForceConstants)>
{Ok({
    let n = structure.num_atoms();
    ensure!(fc.num_atoms() == n,
        "force constants are for {} atoms but the structure has {}", fc.num_atoms(), n);
    ensure!(dims.iter().all(|&d| d >= 1), "bad enlargement {:?}", dims);

    let (enlarged, token) = supercell::diagonal(dims, structure);

    // Shortest lattice translations for every original pair, as integer
    // offsets of the original cell.  A span of two cells covers every case
    // where the minimum-image convention itself is meaningful.
    let fracs = structure.to_fracs();
    let lattice = structure.lattice();
    let shortest = |i: usize, j: usize| -> Vec<[i64; 3]> {
        let mut best = f64::INFINITY;
        let mut ties: Vec<[i64; 3]> = vec![];
        for (ta, tb, tc) in iproduct!(-2i64..3, -2i64..3, -2i64..3) {
            let t = V3([ta as f64, tb as f64, tc as f64]);
            let d = ((fracs[j] + t - fracs[i]) * lattice).norm();
            if d < best - symprec {
                best = d;
                ties.clear();
            }
            if d < best + symprec {
                ties.push([ta, tb, tc]);
            }
        }
        ties
    };

    // per original pair: cell offset (mod dims) -> share of the block
    let mut shares: Vec<HashMap<[usize; 3], f64>> = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let mut map = HashMap::new();
            if i != j {
                let ties = shortest(i, j);
                let weight = 1.0 / ties.len() as f64;
                for t in ties {
                    let key = [
                        t[0].rem_euclid(dims[0] as i64) as usize,
                        t[1].rem_euclid(dims[1] as i64) as usize,
                        t[2].rem_euclid(dims[2] as i64) as usize,
                    ];
                    *map.entry(key).or_insert(0.0) += weight;
                }
            }
            shares.push(map);
        }
    }

    let offsets: Vec<[usize; 3]> = token.image_offsets().iter()
        .map(|o| [o[0] as usize, o[1] as usize, o[2] as usize])
        .collect();

    let big_n = token.num_supercell_atoms();
    let mut out = ForceConstants::zeros(big_n);
    for big_i in 0..big_n {
        let i = token.prim_index(big_i);
        for big_j in 0..big_n {
            if big_i == big_j {
                continue;
            }
            let j = token.prim_index(big_j);
            let rel = [
                (offsets[big_j][0] + dims[0] - offsets[big_i][0]) % dims[0],
                (offsets[big_j][1] + dims[1] - offsets[big_i][1]) % dims[1],
                (offsets[big_j][2] + dims[2] - offsets[big_i][2]) % dims[2],
            ];
            if let Some(&share) = shares[i * n + j].get(&rel) {
                out[(big_i, big_j)] = fc[(i, j)] * share;
            }
        }
    }

    out.symmetrize();
    out.impose_translational_invariance();

    info!("enlarged force constants: {} -> {} atoms", n, big_n);
    (enlarged, out)
})}
