/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Physical constants (CODATA 2014).

/// Boltzmann constant, eV/K.
pub const KB_EV: f64 = 8.617_330_3e-5;

/// Boltzmann constant, J/K.
pub const KB_J: f64 = 1.380_648_52e-23;

/// Reduced Planck constant, J s.
pub const HBAR_J: f64 = 1.054_571_800e-34;

/// Unified atomic mass unit, kg.
pub const DA_KG: f64 = 1.660_539_040e-27;

/// Electron volt, J.
pub const EV_J: f64 = 1.602_176_620_8e-19;

/// Ångström, m.
pub const ANGSTROM_M: f64 = 1e-10;
