/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::io::prelude::*;
use std::path::Path;

use phpost_thermo::debye::{debye_temperature, f_nu};
use phpost_thermo::functions::{entropy, helmholtz_energy, internal_energy};

use crate::FailResult;

pub struct Args {
    /// Å³ per atom.
    pub volume: f64,
    /// eV/Å³.
    pub bulk_modulus: f64,
    /// Mean atomic mass, Da.
    pub mass: f64,
    pub poisson: f64,
    pub t_max: f64,
    pub t_step: f64,
}

/// Debye temperature plus an F/U/S table over a temperature grid.
pub fn run(args: &Args, output: &Path) -> FailResult<()>
{Ok({
    let Args { volume, bulk_modulus, mass, poisson, t_max, t_step } = *args;
    ensure!(volume > 0.0, "non-positive volume");
    ensure!(bulk_modulus > 0.0, "non-positive bulk modulus");
    ensure!(mass > 0.0, "non-positive mass");
    ensure!(-1.0 < poisson && poisson < 0.5, "Poisson ratio out of range");
    ensure!(t_max >= 0.0 && t_step > 0.0, "bad temperature grid");

    let theta = debye_temperature(volume, bulk_modulus, mass, poisson);
    info!("f(nu) = {:.9}", f_nu(poisson));
    info!("Debye temperature: {:.3} K", theta);

    let mut w = phpost_fs_util::create_text(output)?;
    writeln!(w, "# Debye_temperature_(K) {:18.12}", theta)?;
    writeln!(w, "#{:>11} {:>18} {:>18} {:>18}",
        "T_(K)", "F_(eV/atom)", "U_(eV/atom)", "S_(eV/K/atom)")?;

    let mut t = 0.0;
    while t <= t_max + 1e-9 {
        writeln!(w, "{:>12.3} {:>18.12} {:>18.12} {:>18.12e}",
            t,
            helmholtz_energy(t, theta),
            internal_energy(t, theta),
            entropy(t, theta))?;
        t += t_step;
    }
    info!("wrote thermal properties to '{}'", output.display());
})}
