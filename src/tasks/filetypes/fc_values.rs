/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The `fc_values.dat` table produced by the distribution analysis.

use std::io::prelude::*;

use phpost_fc::DistributionRow;

use crate::FailResult;

pub fn write<W: Write>(mut w: W, rows: &[DistributionRow]) -> FailResult<()>
{Ok({
    write!(w, "{:<4}{:<4}{:<22}", "e0", "e1", "distance")?;
    write!(w, "{}", " ".repeat(4))?;
    for label in &["xx", "xy", "xz", "yx", "yy", "yz", "zx", "zy", "zz"] {
        write!(w, "{:<22}", label)?;
    }
    writeln!(w)?;

    for row in rows {
        write!(w, "{:<4}{:<4}", row.elements.0.symbol(), row.elements.1.symbol())?;
        write!(w, "{:>22.15}", row.distance)?;
        write!(w, "{}", " ".repeat(4))?;
        for r in 0..3 {
            for c in 0..3 {
                write!(w, "{:>22.15}", row.tensor[r][c])?;
            }
        }
        writeln!(w)?;
    }
})}
