/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Debye-model thermodynamics.
//!
//! Workspace unit conventions: volumes in Å³, bulk moduli in eV/Å³,
//! masses in Da, temperatures in K, energies/entropies per atom in eV and
//! eV/K.  SI creeps in only inside [`debye::debye_temperature`], where the
//! Debye temperature formula wants it.

#[macro_use] extern crate failure;

pub type FailResult<T> = Result<T, failure::Error>;

pub mod consts;
pub mod debye;
pub mod functions;
