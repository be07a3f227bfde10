/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Least-squares fitting of an EOS to energy-volume samples.
//!
//! Levenberg-style damped Gauss-Newton over the four model parameters,
//! with a central-difference Jacobian.  Four parameters and a smooth model
//! make this a very tame problem; the damping exists for the first few
//! steps from the crude initial guess, not for conditioning heroics.

use crate::FailResult;
use crate::models::{Eos, Params};

const MAX_ITERATIONS: u32 = 200;
const REL_COST_TOLERANCE: f64 = 1e-14;
const MAX_LAMBDA: f64 = 1e10;

#[derive(Debug, Clone)]
pub struct FitSummary {
    pub eos: Eos,
    pub params: Params,
    /// Root-mean-square misfit of the energies.
    pub rmse: f64,
    pub num_points: usize,
}

/// Fit `eos` to the samples.
///
/// The initial guess is the lowest sampled energy, a bulk modulus of 1
/// (about right for solids in eV/Å³), a pressure derivative of 4, and the
/// volume of the lowest sample; the same guess the reference tooling uses.
pub fn fit(eos: Eos, volumes: &[f64], energies: &[f64]) -> FailResult<FitSummary>
{Ok({
    ensure!(volumes.len() == energies.len(),
        "got {} volumes but {} energies", volumes.len(), energies.len());
    ensure!(volumes.len() >= 4, "at least 4 points are needed, got {}", volumes.len());
    ensure!(volumes.iter().all(|v| v.is_finite() && *v > 0.0), "non-positive volume");
    ensure!(energies.iter().all(|e| e.is_finite()), "non-finite energy");

    let imin = {
        let mut imin = 0;
        for (i, &e) in energies.iter().enumerate() {
            if e < energies[imin] {
                imin = i;
            }
        }
        imin
    };
    let mut params = Params {
        e0: energies[imin],
        b0: 1.0,
        bp0: 4.0,
        v0: volumes[imin],
    };

    let cost_of = |p: &Params| -> f64 {
        volumes.iter().zip(energies)
            .map(|(&v, &e)| {
                let r = eos.energy(v, p) - e;
                r * r
            })
            .sum()
    };

    let mut cost = cost_of(&params);
    let mut lambda = 1e-3;
    for iteration in 0..MAX_ITERATIONS {
        let jacobian = jacobian(eos, volumes, &params);
        let residuals: Vec<f64> = volumes.iter().zip(energies)
            .map(|(&v, &e)| eos.energy(v, &params) - e)
            .collect();

        // normal equations: (JᵀJ + λ diag(JᵀJ)) δ = -Jᵀr
        let mut jtj = [[0.0f64; 4]; 4];
        let mut jtr = [0.0f64; 4];
        for (row, &r) in jacobian.iter().zip(&residuals) {
            for a in 0..4 {
                jtr[a] += row[a] * r;
                for b in 0..4 {
                    jtj[a][b] += row[a] * row[b];
                }
            }
        }

        let step = loop {
            let mut lhs = jtj;
            for a in 0..4 {
                // keep the damping meaningful for parameters with zero slope
                // (BM2's bp0 column is identically zero)
                lhs[a][a] += lambda * jtj[a][a].max(1e-12);
            }
            let rhs = [-jtr[0], -jtr[1], -jtr[2], -jtr[3]];
            match solve4(lhs, rhs) {
                Some(step) => break step,
                None => {
                    lambda *= 10.0;
                    if lambda > MAX_LAMBDA {
                        bail!("singular normal equations while fitting {}", eos);
                    }
                },
            }
        };

        let trial = Params {
            e0: params.e0 + step[0],
            b0: params.b0 + step[1],
            bp0: params.bp0 + step[2],
            v0: params.v0 + step[3],
        };
        let trial_cost = cost_of(&trial);

        if trial_cost.is_finite() && trial_cost < cost {
            let relative_drop = (cost - trial_cost) / cost.max(1e-300);
            params = trial;
            cost = trial_cost;
            lambda = (lambda * 0.1).max(1e-12);
            if relative_drop < REL_COST_TOLERANCE {
                trace!("eos fit converged after {} iterations", iteration + 1);
                break;
            }
        } else {
            lambda *= 10.0;
            if lambda > MAX_LAMBDA {
                // the step cannot be made small enough to help; we are done
                break;
            }
        }
    }

    ensure!(params.v0 > 0.0 && params.b0 > 0.0,
        "eos fit ran into an unphysical minimum (V0 = {:.6}, B0 = {:.6})",
        params.v0, params.b0);

    FitSummary {
        eos,
        params,
        rmse: (cost / volumes.len() as f64).sqrt(),
        num_points: volumes.len(),
    }
})}

// d(energy)/d(param) per sample, central differences
fn jacobian(eos: Eos, volumes: &[f64], params: &Params) -> Vec<[f64; 4]> {
    let p = [params.e0, params.b0, params.bp0, params.v0];
    volumes.iter()
        .map(|&v| {
            let mut row = [0.0f64; 4];
            for a in 0..4 {
                let h = 1e-6 * p[a].abs().max(1e-3);
                let at = |value: f64| {
                    let mut q = p;
                    q[a] = value;
                    eos.energy(v, &Params { e0: q[0], b0: q[1], bp0: q[2], v0: q[3] })
                };
                row[a] = (at(p[a] + h) - at(p[a] - h)) / (2.0 * h);
            }
            row
        })
        .collect()
}

// Gaussian elimination with partial pivoting; None on (near-)singularity.
fn solve4(mut a: [[f64; 4]; 4], mut b: [f64; 4]) -> Option<[f64; 4]> {
    for col in 0..4 {
        let pivot = (col..4).max_by(|&x, &y| {
            a[x][col].abs().partial_cmp(&a[y][col].abs()).unwrap()
        })?;
        if a[pivot][col].abs() < 1e-300 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..4 {
            let factor = a[row][col] / a[col][col];
            for k in col..4 {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0f64; 4];
    for row in (0..4).rev() {
        let mut acc = b[row];
        for k in (row + 1)..4 {
            acc -= a[row][k] * x[k];
        }
        x[row] = acc / a[row][row];
    }
    x.iter().all(|v| v.is_finite()).then(|| x)
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    fn samples(eos: Eos, p: &Params, lo: f64, hi: f64, count: usize) -> (Vec<f64>, Vec<f64>) {
        let volumes: Vec<f64> = (0..count)
            .map(|i| lo + (hi - lo) * i as f64 / (count - 1) as f64)
            .collect();
        let energies = volumes.iter().map(|&v| eos.energy(v, p)).collect();
        (volumes, energies)
    }

    #[test]
    fn recovers_exact_parameters() {
        let truth = Params { e0: -5.2, b0: 0.85, bp0: 4.6, v0: 16.2 };
        for &eos in &[Eos::Vinet, Eos::BirchMurnaghan3, Eos::Murnaghan] {
            let (volumes, energies) = samples(eos, &truth, 13.0, 20.0, 15);
            let summary = fit(eos, &volumes, &energies).unwrap();

            assert!(summary.rmse < 1e-8, "{}: rmse {}", eos, summary.rmse);
            assert!((summary.params.e0 - truth.e0).abs() < 1e-6, "{}", eos);
            assert!((summary.params.v0 - truth.v0).abs() < 1e-4, "{}", eos);
            assert!((summary.params.b0 - truth.b0).abs() < 1e-4, "{}", eos);
            assert!((summary.params.bp0 - truth.bp0).abs() < 1e-2, "{}", eos);
        }
    }

    #[test]
    fn bm2_ignores_bp0() {
        let truth = Params { e0: -3.0, b0: 1.1, bp0: 4.0, v0: 11.0 };
        let (volumes, energies) = samples(Eos::BirchMurnaghan2, &truth, 9.0, 13.5, 12);
        let summary = fit(Eos::BirchMurnaghan2, &volumes, &energies).unwrap();

        assert!(summary.rmse < 1e-8);
        assert!((summary.params.b0 - truth.b0).abs() < 1e-4);
        // untouched initial guess
        assert_eq!(summary.params.bp0, 4.0);
    }

    #[test]
    fn noise_shows_up_as_rmse() {
        let truth = Params { e0: -5.0, b0: 0.9, bp0: 4.2, v0: 15.0 };
        let (volumes, mut energies) = samples(Eos::Vinet, &truth, 12.0, 18.0, 21);
        for (i, e) in energies.iter_mut().enumerate() {
            // deterministic "noise", alternating sign
            *e += 1e-4 * if i % 2 == 0 { 1.0 } else { -1.0 };
        }
        let summary = fit(Eos::Vinet, &volumes, &energies).unwrap();
        assert!(summary.rmse > 1e-5);
        assert!(summary.rmse < 1e-3);
        assert!((summary.params.v0 - truth.v0).abs() < 0.1);
    }

    #[test]
    fn too_few_points_is_an_error() {
        assert!(fit(Eos::Vinet, &[10.0, 11.0], &[0.0, 0.1]).is_err());
    }

    #[test]
    fn mismatched_lengths_are_an_error() {
        assert!(fit(Eos::Vinet, &[10.0, 11.0, 12.0], &[0.0, 0.1]).is_err());
    }
}
