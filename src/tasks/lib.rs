/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The glue layer: argument parsing, logging, file orchestration.
//!
//! Each binary in the workspace is a thin shim over one function in
//! [`entry_points`]; everything with actual semantics lives in the library
//! crates, and everything in here is allowed to know about files, flags,
//! and output layout.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;

pub type FailResult<T> = Result<T, failure::Error>;

pub mod entry_points;

pub mod bands;

mod ui;
mod cmd;
mod filetypes;
