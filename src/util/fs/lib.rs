/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Thin wrappers around `std::fs` whose errors name the file.
//!
//! A bare `io::Error` from five directory levels down is useless in a tool
//! that touches a dozen input files per run; these helpers exist so that
//! every `?` in the workspace produces a message a user can act on.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use failure::ResultExt;

pub type FailResult<T> = Result<T, failure::Error>;

/// Wrapper around `File::open` that adds context.
pub fn open(path: impl AsRef<Path>) -> FailResult<File>
{Ok({
    File::open(path.as_ref())
        .with_context(|_| format!("while opening file: '{}'", path.as_ref().display()))?
})}

/// Wrapper around `File::open` that adds context and makes a `BufReader`.
pub fn open_text(path: impl AsRef<Path>) -> FailResult<BufReader<File>>
{ open(path).map(BufReader::new) }

/// Wrapper around `File::create` that adds context.
pub fn create(path: impl AsRef<Path>) -> FailResult<File>
{Ok({
    File::create(path.as_ref())
        .with_context(|_| format!("could not create file: '{}'", path.as_ref().display()))?
})}

/// Wrapper around `File::create` that adds context and makes a `BufWriter`.
pub fn create_text(path: impl AsRef<Path>) -> FailResult<BufWriter<File>>
{ create(path).map(BufWriter::new) }

/// Wrapper around `std::fs::create_dir` that adds context.
pub fn create_dir(dir: impl AsRef<Path>) -> FailResult<()>
{Ok({
    fs::create_dir(dir.as_ref())
        .with_context(|_| format!("could not create directory '{}'", dir.as_ref().display()))?
})}

/// Wrapper around `std::fs::canonicalize` that adds context.
pub fn canonicalize(path: impl AsRef<Path>) -> FailResult<PathBuf>
{Ok({
    fs::canonicalize(path.as_ref())
        .with_context(|_| format!("could not normalize: '{}'", path.as_ref().display()))?
})}

/// Read a whole file into a string, with context.
pub fn read_to_string(path: impl AsRef<Path>) -> FailResult<String>
{Ok({
    fs::read_to_string(path.as_ref())
        .with_context(|_| format!("while reading file: '{}'", path.as_ref().display()))?
})}
