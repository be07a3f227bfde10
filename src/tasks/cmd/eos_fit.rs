/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::io::prelude::*;
use std::path::Path;

use phpost_eos::{fit, Eos};

use crate::FailResult;

/// eV/Å³ to GPa.
const EV_A3_GPA: f64 = 160.217_662_08;

/// Fit an EOS to a two-column `volume energy` file and print the summary.
pub fn run(data_path: &Path, eos: Eos) -> FailResult<()>
{Ok({
    let (volumes, energies) = read_ev_data(data_path)?;
    info!("read {} energy-volume points from '{}'", volumes.len(), data_path.display());

    let summary = fit(eos, &volumes, &energies)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{:<8}{:>20}", "EOS", summary.eos)?;
    writeln!(out, "{:<8}{:>20.12}", "F0", summary.params.e0)?;
    writeln!(out, "{:<8}{:>20.12}", "V0", summary.params.v0)?;
    writeln!(out, "{:<8}{:>20.12}", "B0", summary.params.b0)?;
    writeln!(out, "{:<8}{:>20.12}", "B0_GPa", summary.params.b0 * EV_A3_GPA)?;
    writeln!(out, "{:<8}{:>20.12}", "Bp0", summary.params.bp0)?;
    writeln!(out, "{:<8}{:>20.12e}", "F_RMSE", summary.rmse)?;
    writeln!(out, "{:<8}{:>20}", "NV", summary.num_points)?;
})}

/// Two whitespace-separated columns; `#` comments and blank lines ignored.
fn read_ev_data(path: &Path) -> FailResult<(Vec<f64>, Vec<f64>)>
{Ok({
    let text = phpost_fs_util::read_to_string(path)?;

    let mut volumes = vec![];
    let mut energies = vec![];
    for (lineno, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        ensure!(fields.len() == 2,
            "{}:{}: expected 'volume energy', got {:?}", path.display(), lineno + 1, line);
        volumes.push(fields[0].parse::<f64>()?);
        energies.push(fields[1].parse::<f64>()?);
    }
    (volumes, energies)
})}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn data_file_parsing() {
        let dir = std::env::temp_dir();
        let path = dir.join("phpost-eos-fit-test.dat");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            writeln!(f, "# V (A^3)   E (eV)").unwrap();
            writeln!(f, "10.0 -4.0").unwrap();
            writeln!(f, "").unwrap();
            writeln!(f, "11.0 -4.2  # comment").unwrap();
        }
        let (volumes, energies) = read_ev_data(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(volumes, vec![10.0, 11.0]);
        assert_eq!(energies, vec![-4.0, -4.2]);
    }
}
