/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The Debye temperature and its Poisson-ratio factor.

use std::f64::consts::PI;

use crate::FailResult;
use crate::consts;

/// The scaling factor `f(ν)` relating sound velocities to the Debye
/// average, for Poisson ratio `ν`.
pub fn f_nu(nu: f64) -> f64 {
    let t0 = (2.0 / 3.0) * (1.0 + nu) / (1.0 - 2.0 * nu);
    let t1 = (1.0 / 3.0) * (1.0 + nu) / (1.0 - nu);
    let mean = (2.0 * t0.powf(1.5) + t1.powf(1.5)) / 3.0;
    mean.powf(-1.0 / 3.0)
}

/// Invert [`f_nu`] by bisection on `ν ∈ [-0.999, 0.499]`.
///
/// `f(ν)` is strictly decreasing on that interval, so any value in range
/// has exactly one preimage; values outside the range are an error.
pub fn inv_f_nu(f: f64) -> FailResult<f64>
{Ok({
    let (mut lo, mut hi) = (-0.999f64, 0.499f64);
    ensure!(f_nu(hi) <= f && f <= f_nu(lo),
        "f(nu) = {} is outside the representable range [{:.6}, {:.6}]",
        f, f_nu(hi), f_nu(lo));

    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        match f_nu(mid) >= f {
            true => lo = mid,
            false => hi = mid,
        }
        if hi - lo < 1e-15 {
            break;
        }
    }
    0.5 * (lo + hi)
})}

/// Debye temperature in K.
///
/// `volume` in Å³ per atom, `bulk_modulus` in eV/Å³, `mass` in Da.
pub fn debye_temperature(volume: f64, bulk_modulus: f64, mass: f64, poisson: f64) -> f64 {
    let v_si = volume * ANGSTROM3_M3;
    let b_si = bulk_modulus * consts::EV_J / ANGSTROM3_M3;
    let m_si = mass * consts::DA_KG;

    consts::HBAR_J / consts::KB_J
        * f_nu(poisson)
        * (6.0 * PI * PI).powf(1.0 / 3.0)
        * v_si.powf(1.0 / 6.0)
        * (b_si / m_si).sqrt()
}

/// Volume scaling of the Debye temperature at constant Gruneisen parameter.
pub fn debye_from_gruneisen(volume: f64, v0: f64, theta0: f64, gruneisen: f64) -> f64
{ theta0 * (v0 / volume).powf(gruneisen) }

const ANGSTROM3_M3: f64 = consts::ANGSTROM_M * consts::ANGSTROM_M * consts::ANGSTROM_M;

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn f_nu_at_common_values() {
        // f is 1 when both branch terms are 1; that happens nowhere, but
        // the curve is gentle around nu = 0.25 and pinned by monotonicity
        assert!(f_nu(0.25) > f_nu(0.3));
        assert!(f_nu(0.0) > f_nu(0.25));
        // hard limits
        assert!(f_nu(0.4999) < 0.1);
    }

    #[test]
    fn inv_f_nu_roundtrip() {
        for &nu in &[-0.5, 0.0, 0.2, 0.25, 0.33, 0.45] {
            let back = inv_f_nu(f_nu(nu)).unwrap();
            assert!((back - nu).abs() < 1e-10, "nu = {}: got {}", nu, back);
        }
    }

    #[test]
    fn inv_f_nu_out_of_range() {
        assert!(inv_f_nu(1e6).is_err());
    }

    #[test]
    fn debye_temperature_of_aluminum_scale() {
        // Al: V = 16.6 A^3/atom, B = 76 GPa = 0.4744 eV/A^3, M = 26.98 Da.
        // The textbook Debye temperature is ~400 K; the bulk-modulus-only
        // estimate with nu = 0.35 lands in the same region.
        let theta = debye_temperature(16.6, 0.4744, 26.98, 0.35);
        assert!(300.0 < theta && theta < 500.0, "theta = {}", theta);
    }

    #[test]
    fn heavier_is_colder() {
        let light = debye_temperature(16.0, 0.5, 30.0, 0.25);
        let heavy = debye_temperature(16.0, 0.5, 120.0, 0.25);
        assert!((light / heavy - 2.0).abs() < 1e-12);
    }

    #[test]
    fn gruneisen_scaling() {
        let theta0 = 400.0;
        assert_eq!(debye_from_gruneisen(10.0, 10.0, theta0, 2.0), theta0);
        // expansion softens
        assert!(debye_from_gruneisen(11.0, 10.0, theta0, 2.0) < theta0);
    }
}
