/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use phpost_array_types::M33;

use crate::{FailResult, ForceConstants};

/// Weighted mean of force-constant matrices.
///
/// The inputs must already be in a common atom order (see
/// `find_perm::of_positions` for how differently-ordered files get there).
/// With `weights: None` all matrices count equally.
pub fn average(fcs: &[ForceConstants], weights: Option<&[f64]>) -> FailResult<ForceConstants>
{Ok({
    ensure!(!fcs.is_empty(), "no force constants to average");
    let n = fcs[0].num_atoms();
    ensure!(fcs.iter().all(|fc| fc.num_atoms() == n),
        "force constant matrices disagree in size");

    let weights: Vec<f64> = match weights {
        Some(ws) => {
            ensure!(ws.len() == fcs.len(),
                "got {} weights for {} force constant matrices", ws.len(), fcs.len());
            ensure!(ws.iter().all(|&w| w >= 0.0), "negative weight");
            ws.to_vec()
        },
        None => vec![1.0; fcs.len()],
    };
    let total: f64 = weights.iter().sum();
    ensure!(total > 0.0, "weights sum to zero");

    let mut out = ForceConstants::zeros(n);
    for i in 0..n {
        for j in 0..n {
            let mut acc = M33::zero();
            for (fc, &w) in fcs.iter().zip(&weights) {
                acc += fc[(i, j)] * w;
            }
            out[(i, j)] = acc / total;
        }
    }
    out
})}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::tests::random_fc;

    #[test]
    fn equal_weights_recover_the_mean() {
        let a = random_fc(3);
        let b = random_fc(3);
        let avg = average(&[a.clone(), b.clone()], None).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expect = (a[(i, j)] + b[(i, j)]) / 2.0;
                let diff = avg[(i, j)] - expect;
                for r in 0..3 {
                    assert!(diff[r].norm() < 1e-14);
                }
            }
        }
    }

    #[test]
    fn weights_bias_the_mean() {
        let a = random_fc(2);
        let b = random_fc(2);
        // all weight on b
        let avg = average(&[a, b.clone()], Some(&[0.0, 1.0])).unwrap();
        assert_eq!(avg, b);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let a = random_fc(2);
        let b = random_fc(3);
        assert!(average(&[a, b], None).is_err());
    }

    #[test]
    fn weight_count_mismatch_is_an_error() {
        let a = random_fc(2);
        let b = random_fc(2);
        assert!(average(&[a, b], Some(&[1.0])).is_err());
    }
}
