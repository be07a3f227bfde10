/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate failure;

pub type FailResult<T> = Result<T, failure::Error>;

pub use crate::filetypes::{conf, Conf};
pub use crate::filetypes::band_conf;
pub use crate::filetypes::force_constants;
pub use crate::filetypes::symmetry_yaml::{self, SymmetryYaml};

mod filetypes;
