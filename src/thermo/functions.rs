/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The Debye function and per-atom thermodynamic potentials.

use crate::consts::KB_EV;

/// The third-order Debye function `D₃(x) = (3/x³) ∫₀ˣ t³/(eᵗ-1) dt`.
///
/// `D₃(0) = 1`; decays like `π⁴/(5x³)` for large `x`.
pub fn debye3(x: f64) -> f64 {
    assert!(x >= 0.0, "negative Debye argument");
    if x == 0.0 {
        return 1.0;
    }

    // the integrand falls off like t³e⁻ᵗ; past 60 the remainder is far
    // below the quadrature tolerance
    let cut = x.min(60.0);
    let integral = adaptive_simpson(&|t: f64| {
        match t == 0.0 {
            true => 0.0,
            false => t * t * t / t.exp_m1(),
        }
    }, 0.0, cut, 1e-13, 40);

    3.0 / (x * x * x) * integral
}

/// Helmholtz free energy per atom, eV.
pub fn helmholtz_energy(temperature: f64, debye: f64) -> f64 {
    let zero_point = 9.0 * KB_EV * debye / 8.0;
    if temperature == 0.0 {
        return zero_point;
    }
    let x = debye / temperature;
    zero_point + KB_EV * temperature * (3.0 * (-(-x).exp_m1()).ln() - debye3(x))
}

/// Internal energy per atom, eV.
pub fn internal_energy(temperature: f64, debye: f64) -> f64 {
    let zero_point = 9.0 * KB_EV * debye / 8.0;
    if temperature == 0.0 {
        return zero_point;
    }
    let x = debye / temperature;
    zero_point + 3.0 * KB_EV * temperature * debye3(x)
}

/// Entropy per atom, eV/K.
pub fn entropy(temperature: f64, debye: f64) -> f64 {
    if temperature == 0.0 {
        return 0.0;
    }
    let x = debye / temperature;
    KB_EV * (4.0 * debye3(x) - 3.0 * (-(-x).exp_m1()).ln())
}

// plain adaptive Simpson with interval bisection
fn adaptive_simpson(f: &dyn Fn(f64) -> f64, a: f64, b: f64, tol: f64, depth: u32) -> f64 {
    fn simpson(f: &dyn Fn(f64) -> f64, a: f64, fa: f64, b: f64, fb: f64) -> (f64, f64) {
        let m = 0.5 * (a + b);
        let fm = f(m);
        ((b - a) / 6.0 * (fa + 4.0 * fm + fb), fm)
    }

    fn recurse(
        f: &dyn Fn(f64) -> f64,
        a: f64, fa: f64,
        b: f64, fb: f64,
        whole: f64, fm: f64,
        tol: f64, depth: u32,
    ) -> f64 {
        let m = 0.5 * (a + b);
        let (left, flm) = simpson(f, a, fa, m, fm);
        let (right, frm) = simpson(f, m, fm, b, fb);
        let delta = left + right - whole;
        if depth == 0 || delta.abs() <= 15.0 * tol {
            left + right + delta / 15.0
        } else {
            recurse(f, a, fa, m, fm, left, flm, tol / 2.0, depth - 1)
                + recurse(f, m, fm, b, fb, right, frm, tol / 2.0, depth - 1)
        }
    }

    let (fa, fb) = (f(a), f(b));
    let (whole, fm) = simpson(f, a, fa, b, fb);
    recurse(f, a, fa, b, fb, whole, fm, tol, depth)
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn debye3_limits() {
        assert_eq!(debye3(0.0), 1.0);
        // small-x expansion: 1 - 3x/8 + x^2/20
        let x = 1e-3;
        let expect = 1.0 - 3.0 * x / 8.0 + x * x / 20.0;
        assert!((debye3(x) - expect).abs() < 1e-10);
        // large-x tail: pi^4 / (5 x^3)
        let x = 80.0;
        let expect = PI.powi(4) / (5.0 * x * x * x);
        assert!((debye3(x) - expect).abs() / expect < 1e-6);
    }

    #[test]
    fn debye3_known_value() {
        // D3(1), e.g. Abramowitz & Stegun
        assert!((debye3(1.0) - 0.674_415_0).abs() < 1e-6);
    }

    #[test]
    fn zero_temperature_forms() {
        let theta = 400.0;
        let zero_point = 9.0 * KB_EV * theta / 8.0;
        assert_eq!(helmholtz_energy(0.0, theta), zero_point);
        assert_eq!(internal_energy(0.0, theta), zero_point);
        assert_eq!(entropy(0.0, theta), 0.0);
    }

    #[test]
    fn u_equals_f_plus_ts() {
        let theta = 400.0;
        for &t in &[1.0, 50.0, 300.0, 1000.0, 5000.0] {
            let f = helmholtz_energy(t, theta);
            let u = internal_energy(t, theta);
            let s = entropy(t, theta);
            assert!((u - (f + t * s)).abs() < 1e-12,
                "T = {}: U = {}, F + TS = {}", t, u, f + t * s);
        }
    }

    #[test]
    fn dulong_petit_at_high_temperature() {
        let theta = 400.0;
        let t = 40_000.0;
        let h = 1.0;
        let cv = (internal_energy(t + h, theta) - internal_energy(t - h, theta)) / (2.0 * h);
        assert!((cv / (3.0 * KB_EV) - 1.0).abs() < 1e-3, "cv = {}", cv);
    }

    #[test]
    fn entropy_goes_as_t_cubed_at_low_temperature() {
        let theta = 400.0;
        let t = theta / 50.0;
        let ratio = entropy(t, theta) / entropy(t / 2.0, theta);
        assert!((ratio - 8.0).abs() < 0.05, "ratio = {}", ratio);
    }

    #[test]
    fn entropy_is_positive_and_increasing() {
        let theta = 300.0;
        let mut last = 0.0;
        for &t in &[10.0, 50.0, 100.0, 300.0, 900.0] {
            let s = entropy(t, theta);
            assert!(s > last);
            last = s;
        }
    }
}
