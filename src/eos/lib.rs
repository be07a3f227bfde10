/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Equations of state for energy-volume curves.
//!
//! Units are whatever the caller feeds in; with energies in eV and volumes
//! in Å³ the bulk moduli come out in eV/Å³ (multiply by 160.21766 for GPa).

#[macro_use] extern crate failure;
#[macro_use] extern crate log;

pub type FailResult<T> = Result<T, failure::Error>;

pub use crate::models::{Eos, Params};
mod models;

pub use crate::fit::{fit, FitSummary};
mod fit;
