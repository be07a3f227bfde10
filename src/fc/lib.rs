/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The force-constant matrix and its index gymnastics.
//!
//! A force-constant matrix is an `n x n` matrix of cartesian 3x3 blocks,
//! `Φ[i, j]`, describing the harmonic coupling between atoms `i` and `j` of
//! a supercell.  Two constraints matter to every transformation here:
//!
//! * **permutation symmetry**: `Φ[i, j] == Φ[j, i]ᵀ`;
//! * **translational invariance**: `Σ_j Φ[i, j] == 0` for every row `i`.
//!
//! Transformations that reindex atoms are expressed through [`Perm`], so a
//! force-constant matrix can be reordered with the very same object that
//! reorders the structure it belongs to.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;

use std::ops::{Index, IndexMut};
use std::path::Path;

use phpost_array_types::M33;
use phpost_structure::{Perm, Permute};

pub type FailResult<T> = Result<T, failure::Error>;

pub use crate::average::average;
mod average;

pub use crate::reduce::{reduce, PairRule};
mod reduce;

pub use crate::distribution::{analyze_distribution, DistributionRow};
mod distribution;

pub use crate::enlarge::enlarge;
mod enlarge;

/// A dense matrix of 3x3 force-constant blocks, row-major by atom pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceConstants {
    num_atoms: usize,
    blocks: Vec<M33>,
}

impl ForceConstants {
    pub fn zeros(num_atoms: usize) -> Self
    { ForceConstants { num_atoms, blocks: vec![M33::zero(); num_atoms * num_atoms] } }

    /// # Panics
    /// Panics unless `blocks.len() == num_atoms * num_atoms`.
    pub fn from_blocks(num_atoms: usize, blocks: Vec<M33>) -> Self {
        assert_eq!(blocks.len(), num_atoms * num_atoms);
        ForceConstants { num_atoms, blocks }
    }

    pub fn num_atoms(&self) -> usize
    { self.num_atoms }

    pub fn blocks(&self) -> &[M33]
    { &self.blocks }

    /// Sum of a row of blocks.  Zero for a translationally invariant matrix.
    pub fn row_sum(&self, i: usize) -> M33 {
        (0..self.num_atoms).fold(M33::zero(), |acc, j| acc + self[(i, j)])
    }

    /// Impose `Φ[i, j] == Φ[j, i]ᵀ` by averaging the two.
    ///
    /// Idempotent; exact for input that already satisfies the symmetry.
    pub fn symmetrize(&mut self) {
        for i in 0..self.num_atoms {
            for j in i..self.num_atoms {
                let mean = (self[(i, j)] + self[(j, i)].t()) / 2.0;
                self[(i, j)] = mean;
                self[(j, i)] = mean.t();
            }
        }
    }

    /// Impose `Σ_j Φ[i, j] == 0` by overwriting the diagonal blocks.
    ///
    /// The correction is interleaved with symmetrization: diagonal fixes
    /// spoil permutation symmetry and symmetrization spoils the row sums, so
    /// the two are alternated and the diagonal gets the last word.  The
    /// result has exactly zero row sums and is permutation-symmetric to the
    /// extent the input was compatible with both constraints.
    pub fn impose_translational_invariance(&mut self) {
        for _ in 0..2 {
            self.fix_diagonal();
            self.symmetrize();
        }
        self.fix_diagonal();
    }

    // diagonal block := -(sum of off-diagonal blocks of the row)
    fn fix_diagonal(&mut self) {
        for i in 0..self.num_atoms {
            let sum = (0..self.num_atoms)
                .filter(|&j| j != i)
                .fold(M33::zero(), |acc, j| acc + self[(i, j)]);
            self[(i, i)] = -sum;
        }
    }

    /// Largest deviation from permutation symmetry, for diagnostics.
    pub fn permutation_symmetry_error(&self) -> f64 {
        let mut worst = 0.0f64;
        for i in 0..self.num_atoms {
            for j in 0..self.num_atoms {
                let diff = self[(i, j)] - self[(j, i)].t();
                for row in 0..3 {
                    for col in 0..3 {
                        worst = worst.max(diff[row][col].abs());
                    }
                }
            }
        }
        worst
    }
}

impl Index<(usize, usize)> for ForceConstants {
    type Output = M33;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &M33
    { &self.blocks[i * self.num_atoms + j] }
}

impl IndexMut<(usize, usize)> for ForceConstants {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut M33
    { &mut self.blocks[i * self.num_atoms + j] }
}

/// Applies an atom permutation to both axes.  Blocks move; their cartesian
/// contents do not rotate.
impl Permute for ForceConstants {
    fn permuted_by(self, perm: &Perm) -> ForceConstants {
        assert_eq!(self.num_atoms, perm.len(),
            "Incorrect permutation length: {} vs {}", self.num_atoms, perm.len());

        let n = self.num_atoms;
        let mut out = ForceConstants::zeros(n);
        for i in 0..n {
            for j in 0..n {
                out[(i, j)] = self[(perm.index_source(i), perm.index_source(j))];
            }
        }
        out
    }
}

// file I/O, in phonopy's format
impl ForceConstants {
    pub fn read(r: impl std::io::BufRead) -> FailResult<Self>
    {Ok({
        let (n, blocks) = phpost_phonopy_io::force_constants::read(r)?;
        ForceConstants::from_blocks(n, blocks)
    })}

    pub fn from_path(path: impl AsRef<Path>) -> FailResult<Self> {
        trace!("reading force constants from '{}'", path.as_ref().display());
        Self::read(phpost_fs_util::open_text(path.as_ref())?)
    }

    pub fn write(&self, w: impl std::io::Write) -> FailResult<()>
    { phpost_phonopy_io::force_constants::write(w, self.num_atoms, &self.blocks) }

    pub fn to_path(&self, path: impl AsRef<Path>) -> FailResult<()> {
        trace!("writing force constants to '{}'", path.as_ref().display());
        self.write(phpost_fs_util::create_text(path.as_ref())?)
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use phpost_array_types::V3;

    pub(crate) fn random_fc(n: usize) -> ForceConstants {
        let blocks = (0..n * n)
            .map(|_| M33::from_fn(|_, _| rand::random::<f64>() - 0.5))
            .collect();
        ForceConstants::from_blocks(n, blocks)
    }

    #[test]
    fn symmetrize_is_idempotent() {
        let mut fc = random_fc(4);
        fc.symmetrize();
        assert!(fc.permutation_symmetry_error() < 1e-14);

        let again = {
            let mut again = fc.clone();
            again.symmetrize();
            again
        };
        assert_eq!(fc, again);
    }

    #[test]
    fn translational_invariance_zeroes_row_sums() {
        let mut fc = random_fc(5);
        fc.symmetrize();
        fc.impose_translational_invariance();

        for i in 0..5 {
            let sum = fc.row_sum(i);
            for r in 0..3 {
                assert!((sum[r] - V3::zero()).norm() < 1e-12, "row {}: {:?}", i, sum);
            }
        }
    }

    #[test]
    fn permutation_moves_blocks_together() {
        let fc = random_fc(4);
        let perm = Perm::random(4);
        let permuted = fc.clone().permuted_by(&perm);

        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(
                    permuted[(i, j)],
                    fc[(perm.index_source(i), perm.index_source(j))],
                );
            }
        }
    }

    #[test]
    fn permutation_roundtrip() {
        let fc = random_fc(6);
        let perm = Perm::random(6);
        let back = fc.clone().permuted_by(&perm).permuted_by(&perm.inverted());
        assert_eq!(fc, back);
    }
}
