/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::fmt;
use std::str::FromStr;

use crate::FailResult;

/// Equation-of-state parameters.
///
/// Every model carries all four; `BirchMurnaghan2` simply never reads
/// `bp0` (its pressure derivative is pinned at 4), so a fit of that model
/// reports `bp0` unchanged from the initial guess.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Params {
    /// Energy at the minimum.
    pub e0: f64,
    /// Bulk modulus at the minimum.
    pub b0: f64,
    /// Pressure derivative of the bulk modulus.
    pub bp0: f64,
    /// Volume at the minimum.
    pub v0: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Eos {
    Vinet,
    BirchMurnaghan2,
    BirchMurnaghan3,
    Murnaghan,
}

impl FromStr for Eos {
    type Err = failure::Error;

    fn from_str(s: &str) -> FailResult<Eos> {
        match s {
            "vinet" | "Vinet" => Ok(Eos::Vinet),
            "bm2" | "BM2" => Ok(Eos::BirchMurnaghan2),
            "bm3" | "BM3" => Ok(Eos::BirchMurnaghan3),
            "murnaghan" | "Murnaghan" => Ok(Eos::Murnaghan),
            _ => bail!("unknown equation of state: {:?}", s),
        }
    }
}

impl fmt::Display for Eos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Eos::Vinet => "Vinet",
            Eos::BirchMurnaghan2 => "BM2",
            Eos::BirchMurnaghan3 => "BM3",
            Eos::Murnaghan => "Murnaghan",
        };
        write!(f, "{}", name)
    }
}

impl Eos {
    /// Energy at volume `v`.
    pub fn energy(&self, v: f64, p: &Params) -> f64 {
        match self {
            Eos::Vinet => {
                let x = (v / p.v0).powf(1.0 / 3.0);
                let xi = 1.5 * (p.bp0 - 1.0);
                p.e0 + 9.0 * p.b0 * p.v0 / (xi * xi)
                    * (1.0 + (xi * (1.0 - x) - 1.0) * (xi * (1.0 - x)).exp())
            },
            Eos::BirchMurnaghan2 => {
                let x23 = (p.v0 / v).powf(2.0 / 3.0);
                p.e0 + (9.0 / 8.0) * p.b0 * p.v0 * (x23 - 1.0) * (x23 - 1.0)
            },
            Eos::BirchMurnaghan3 => {
                let x23 = (p.v0 / v).powf(2.0 / 3.0);
                p.e0 + (9.0 / 16.0) * p.b0 * p.v0
                    * ((x23 - 1.0).powi(3) * p.bp0
                        + (x23 - 1.0).powi(2) * (6.0 - 4.0 * x23))
            },
            Eos::Murnaghan => {
                let x = (p.v0 / v).powf(p.bp0);
                p.e0 + p.b0 * v / p.bp0 * (x / (p.bp0 - 1.0) + 1.0)
                    - p.b0 * p.v0 / (p.bp0 - 1.0)
            },
        }
    }

    /// Pressure at volume `v` (`-dE/dV`), in closed form.
    pub fn pressure(&self, v: f64, p: &Params) -> f64 {
        match self {
            Eos::Vinet => {
                let x = (v / p.v0).powf(1.0 / 3.0);
                let xi = 1.5 * (p.bp0 - 1.0);
                3.0 * p.b0 * (1.0 - x) / (x * x) * (xi * (1.0 - x)).exp()
            },
            Eos::BirchMurnaghan2 => {
                let x = p.v0 / v;
                1.5 * p.b0 * (x.powf(7.0 / 3.0) - x.powf(5.0 / 3.0))
            },
            Eos::BirchMurnaghan3 => {
                let x = p.v0 / v;
                let c = 0.75 * (p.bp0 - 4.0);
                1.5 * p.b0 * (x.powf(7.0 / 3.0) - x.powf(5.0 / 3.0))
                    * (1.0 + c * (x.powf(2.0 / 3.0) - 1.0))
            },
            Eos::Murnaghan => {
                let x = (p.v0 / v).powf(p.bp0);
                p.b0 / p.bp0 * (x - 1.0)
            },
        }
    }

    /// Bulk modulus at volume `v` (`-V dP/dV`), in closed form.
    pub fn bulk_modulus(&self, v: f64, p: &Params) -> f64 {
        match self {
            Eos::Vinet => {
                let x = (v / p.v0).powf(1.0 / 3.0);
                let xi = 1.5 * (p.bp0 - 1.0);
                p.b0 * (xi * (1.0 - x)).exp()
                    * ((2.0 - x) / (x * x) + xi * (1.0 - x) / x)
            },
            Eos::BirchMurnaghan2 => {
                let x = p.v0 / v;
                p.b0 * (3.5 * x.powf(7.0 / 3.0) - 2.5 * x.powf(5.0 / 3.0))
            },
            Eos::BirchMurnaghan3 => {
                let x = p.v0 / v;
                let c = 0.75 * (p.bp0 - 4.0);
                1.5 * p.b0 * (
                    ((7.0 / 3.0) * x.powf(7.0 / 3.0) - (5.0 / 3.0) * x.powf(5.0 / 3.0))
                        * (1.0 + c * (x.powf(2.0 / 3.0) - 1.0))
                    + (2.0 * c / 3.0) * (x.powi(3) - x.powf(7.0 / 3.0))
                )
            },
            Eos::Murnaghan => {
                p.b0 * (p.v0 / v).powf(p.bp0)
            },
        }
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    const MODELS: &[Eos] = &[
        Eos::Vinet,
        Eos::BirchMurnaghan2,
        Eos::BirchMurnaghan3,
        Eos::Murnaghan,
    ];

    const P: Params = Params { e0: 0.0, b0: 1.0, bp0: 4.0, v0: 10.0 };

    // five-point stencil
    fn slope(h: f64, x: f64, mut f: impl FnMut(f64) -> f64) -> f64 {
        (f(x - 2.0 * h) - 8.0 * f(x - h) + 8.0 * f(x + h) - f(x + 2.0 * h)) / (12.0 * h)
    }

    #[test]
    fn at_the_minimum() {
        for &eos in MODELS {
            assert!((eos.energy(P.v0, &P) - P.e0).abs() < 1e-12, "{}", eos);
            assert!(eos.pressure(P.v0, &P).abs() < 1e-12, "{}", eos);
            assert!((eos.bulk_modulus(P.v0, &P) - P.b0).abs() < 1e-10, "{}", eos);
        }
    }

    #[test]
    fn pressure_is_minus_de_dv() {
        for &eos in MODELS {
            let mut v = 8.0;
            while v <= 12.0 {
                let numerical = -slope(1e-4, v, |x| eos.energy(x, &P));
                let analytic = eos.pressure(v, &P);
                assert!((numerical - analytic).abs() < 1e-9,
                    "{} at V={}: {} vs {}", eos, v, numerical, analytic);
                v += 0.25;
            }
        }
    }

    #[test]
    fn bulk_modulus_is_minus_v_dp_dv() {
        for &eos in MODELS {
            let mut v = 8.0;
            while v <= 12.0 {
                let numerical = -v * slope(1e-4, v, |x| eos.pressure(x, &P));
                let analytic = eos.bulk_modulus(v, &P);
                assert!((numerical - analytic).abs() < 1e-9,
                    "{} at V={}: {} vs {}", eos, v, numerical, analytic);
                v += 0.25;
            }
        }
    }

    #[test]
    fn third_order_reduces_to_second_at_bp_4() {
        // with B' = 4 the third-order Birch-Murnaghan energy collapses
        // to the second-order form
        let mut v = 8.0;
        while v <= 12.0 {
            let a = Eos::BirchMurnaghan2.energy(v, &P);
            let b = Eos::BirchMurnaghan3.energy(v, &P);
            assert!((a - b).abs() < 1e-12);
            v += 0.5;
        }
    }

    #[test]
    fn names_parse() {
        assert_eq!("Vinet".parse::<Eos>().unwrap(), Eos::Vinet);
        assert_eq!("bm3".parse::<Eos>().unwrap(), Eos::BirchMurnaghan3);
        assert!("sludge".parse::<Eos>().is_err());
    }
}
