/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::io::prelude::*;
use std::path::Path;

use phpost_phonopy_io::band_conf;

use crate::FailResult;
use crate::bands;

/// Print the band path of a space group; optionally write the phonopy
/// BAND tags to a conf file.
pub fn run(spg_number: u32, points_per_segment: u32, output: Option<&Path>) -> FailResult<()>
{Ok({
    let path = bands::band_path(spg_number)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "# space group {}", path.spg_number)?;
    writeln!(out, "# points")?;
    for (name, q) in &path.points {
        writeln!(out, "{:<4} {:>8.5} {:>8.5} {:>8.5}", name, q[0], q[1], q[2])?;
    }
    writeln!(out, "# path")?;
    for (from, to, label) in &path.legs {
        match label {
            Some(label) => writeln!(out, "{:<4} -> {:<4} {}", from, to, label)?,
            None => writeln!(out, "{:<4} -> {:<4}", from, to)?,
        }
    }

    if let Some(output) = output {
        band_conf::write(
            phpost_fs_util::create_text(output)?,
            &path.segments(),
            Some(points_per_segment),
        )?;
        info!("wrote band tags to '{}'", output.display());
    }
})}
