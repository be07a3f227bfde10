/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use std::collections::HashMap;
use std::io::prelude::*;

pub mod force_constants {
    //! The FORCE_CONSTANTS text format.
    //!
    //! ```text
    //! N [N]
    //! i j              (1-based atom indices)
    //! xx xy xz
    //! yx yy yz
    //! zx zy zz
    //! ...one such block per pair, row-major...
    //! ```

    use super::*;
    use phpost_array_types::{M33, V3};

    /// Read a FORCE_CONSTANTS file into `n` and `n * n` row-major blocks.
    pub fn read<R: BufRead>(mut r: R) -> FailResult<(usize, Vec<M33>)>
    { _read(&mut r) }

    // Monomorphic to keep all the parsing code generated inside this crate
    fn _read(r: &mut dyn BufRead) -> FailResult<(usize, Vec<M33>)>
    {Ok({
        let mut words = Words::new(r);

        // phonopy >= 2 writes "N N" for (rows, columns); older files have
        // a lone "N".  Only square matrices are meaningful here.
        let header = words.line()?;
        let n: usize = match &header[..] {
            [n] => n.parse()?,
            [rows, cols] => {
                ensure!(rows == cols,
                    "non-square FORCE_CONSTANTS ({} x {}) are not supported", rows, cols);
                rows.parse()?
            },
            _ => bail!("malformed FORCE_CONSTANTS header"),
        };

        let mut blocks = vec![M33::zero(); n * n];
        let mut seen = vec![false; n * n];
        for _ in 0..n * n {
            let (i, j) = {
                let pair = words.line()?;
                ensure!(pair.len() == 2, "expected an atom index pair, got {:?}", pair);
                let i: usize = pair[0].parse()?;
                let j: usize = pair[1].parse()?;
                ensure!(1 <= i && i <= n && 1 <= j && j <= n,
                    "atom pair ({}, {}) out of range for {} atoms", i, j, n);
                (i - 1, j - 1)
            };
            ensure!(!seen[i * n + j], "duplicate block for atom pair ({}, {})", i + 1, j + 1);
            seen[i * n + j] = true;

            let mut block = M33::zero();
            for row in 0..3 {
                let fields = words.line()?;
                ensure!(fields.len() == 3, "expected 3 tensor components, got {:?}", fields);
                block[row] = V3([
                    fields[0].parse()?,
                    fields[1].parse()?,
                    fields[2].parse()?,
                ]);
            }
            blocks[i * n + j] = block;
        }
        ensure!(seen.iter().all(|&b| b), "missing blocks in FORCE_CONSTANTS");

        (n, blocks)
    })}

    /// Write a FORCE_CONSTANTS file from `n * n` row-major blocks.
    pub fn write<W: Write>(mut w: W, n: usize, blocks: &[M33]) -> FailResult<()>
    {Ok({
        assert_eq!(blocks.len(), n * n);

        writeln!(w, "{} {}", n, n)?;
        for i in 0..n {
            for j in 0..n {
                writeln!(w, "{} {}", i + 1, j + 1)?; // NOTE: phonopy indexes atoms from 1
                let block = &blocks[i * n + j];
                for row in 0..3 {
                    writeln!(w, "{:22.15}{:22.15}{:22.15}",
                        block[row][0], block[row][1], block[row][2])?;
                }
            }
        }
    })}

    // whitespace-separated fields, skipping blank lines
    struct Words<'a> {
        reader: &'a mut dyn BufRead,
    }

    impl<'a> Words<'a> {
        fn new(reader: &'a mut dyn BufRead) -> Self
        { Words { reader } }

        fn line(&mut self) -> FailResult<Vec<String>> {
            loop {
                let mut buf = String::new();
                if self.reader.read_line(&mut buf)? == 0 {
                    bail!("unexpected end of FORCE_CONSTANTS file");
                }
                let fields: Vec<String> =
                    buf.split_whitespace().map(|s| s.to_string()).collect();
                if !fields.is_empty() {
                    return Ok(fields);
                }
            }
        }
    }

    #[cfg(test)]
    #[deny(unused)]
    mod tests {
        use super::*;

        const TWO_ATOMS: &str = "\
2
1 1
1.0 0.0 0.0
0.0 1.0 0.0
0.0 0.0 1.0
1 2
-1.0 0.0 0.0
0.0 -1.0 0.0
0.0 0.0 -1.0
2 1
-1.0 0.0 0.0
0.0 -1.0 0.0
0.0 0.0 -1.0
2 2
1.0 0.0 0.0
0.0 1.0 0.0
0.0 0.0 1.0
";

        #[test]
        fn read_simple() {
            let (n, blocks) = read(TWO_ATOMS.as_bytes()).unwrap();
            assert_eq!(n, 2);
            assert_eq!(blocks[0 * 2 + 0], M33::eye());
            assert_eq!(blocks[0 * 2 + 1], -M33::eye());
        }

        #[test]
        fn roundtrip() {
            let (n, blocks) = read(TWO_ATOMS.as_bytes()).unwrap();
            let mut buffer = vec![];
            write(&mut buffer, n, &blocks).unwrap();
            let (n2, blocks2) = read(&buffer[..]).unwrap();
            assert_eq!(n, n2);
            assert_eq!(blocks, blocks2);
        }

        #[test]
        fn truncated_file_is_an_error() {
            let text = "2\n1 1\n1.0 0.0 0.0\n";
            assert!(read(text.as_bytes()).is_err());
        }

        #[test]
        fn two_field_header() {
            let text = TWO_ATOMS.replacen("2\n", "2 2\n", 1);
            let (n, _) = read(text.as_bytes()).unwrap();
            assert_eq!(n, 2);
        }
    }
}

pub mod symmetry_yaml {
    //! Parsed `phonopy --sym` output.

    use super::*;
    use phpost_array_types::V3;
    use phpost_structure::{FracOp, FracRot, FracTrans};
    use serde::Deserialize;

    /// Spacegroup operator from the YAML file.
    #[derive(Debug, Clone, Deserialize)]
    pub struct Operation {
        pub rotation: [[i32; 3]; 3],
        pub translation: [f64; 3],
    }

    /// A parsed --sym output.
    #[derive(Debug, Clone, Deserialize)]
    pub struct SymmetryYaml {
        pub space_group_type: String,
        pub space_group_number: u32,
        pub point_group_type: String,
        pub space_group_operations: Vec<Operation>,
    }

    impl SymmetryYaml {
        /// The operators, in a form the rest of the workspace can apply.
        pub fn frac_ops(&self) -> Vec<FracOp> {
            self.space_group_operations.iter()
                .map(|op| FracOp::new(
                    FracRot::new(&op.rotation),
                    FracTrans::from_vector(V3(op.translation)),
                ))
                .collect()
        }
    }

    pub fn read<R: Read>(mut r: R) -> FailResult<SymmetryYaml>
    { _read(&mut r) }

    // Monomorphic to keep all the yaml parsing code generated inside this crate
    fn _read(r: &mut dyn Read) -> FailResult<SymmetryYaml>
    {Ok({ serde_yaml::from_reader(r)? })}

    #[cfg(test)]
    #[deny(unused)]
    mod tests {
        use super::*;

        const EXAMPLE: &str = "\
space_group_type: 'Pm-3m'
space_group_number: 221
point_group_type: 'm-3m'
space_group_operations:
- rotation:
  - [1, 0, 0]
  - [0, 1, 0]
  - [0, 0, 1]
  translation: [0.0, 0.0, 0.0]
- rotation:
  - [0, -1, 0]
  - [1, 0, 0]
  - [0, 0, 1]
  translation: [0.5, 0.0, 0.0]
";

        #[test]
        fn read_example() {
            let yaml = read(EXAMPLE.as_bytes()).unwrap();
            assert_eq!(yaml.space_group_number, 221);
            assert_eq!(yaml.space_group_operations.len(), 2);

            let ops = yaml.frac_ops();
            assert_eq!(ops[0], FracOp::eye());
            assert_eq!(ops[1].trans.vector()[0], 0.5);
        }
    }
}

/// Type representing a phonopy conf file.
///
/// In reality, valid conf files are only a subset of this.
/// For instance, be wary of inserting a value that contains
/// a `'#'` (the comment delimiter).
pub type Conf = HashMap<String, String>;
pub mod conf {
    use super::*;

    pub fn read<R: BufRead>(file: R) -> FailResult<Conf>
    {Ok({
        let mut out = HashMap::new();
        for line in file.lines() {
            let line = line?;
            let mut line = &line[..];

            if line.trim().is_empty() {
                continue;
            }

            if let Some(i) = line.bytes().position(|c| c == b'#') {
                line = &line[..i];
                if line.trim().is_empty() {
                    continue;
                }
            }

            if let Some(i) = line.bytes().position(|c| c == b'=') {
                let key = line[..i].trim();
                let value = line[i + 1..].trim();
                out.insert(key.to_string(), value.to_string());
            } else {
                bail!("Can't read conf line: {:?}", line)
            }
        }
        out
    })}

    pub fn write<W: Write>(mut w: W, conf: &Conf) -> FailResult<()>
    {Ok({
        for (key, val) in conf {
            ensure!(key.bytes().all(|c| c != b'='), "'=' in conf key");
            writeln!(w, "{} = {}", key, val)?
        }
    })}

    #[cfg(test)]
    #[deny(unused)]
    mod tests {
        use super::*;

        #[test]
        fn comments_and_blanks() {
            let text = "\
# a comment
DIM = 2 2 2

ATOM_NAME = Fe Al # trailing comment
";
            let conf = read(text.as_bytes()).unwrap();
            assert_eq!(conf["DIM"], "2 2 2");
            assert_eq!(conf["ATOM_NAME"], "Fe Al");
            assert_eq!(conf.len(), 2);
        }

        #[test]
        fn missing_equals_is_an_error() {
            assert!(read("DIM 2 2 2\n".as_bytes()).is_err());
        }
    }
}

pub mod band_conf {
    //! Writes the BAND tags of a phonopy conf file from a band path.

    use super::*;
    use phpost_array_types::V3;

    /// Write `BAND`/`BAND_LABELS` (and `BAND_POINTS`) conf lines.
    ///
    /// `segments` are runs of connected q-points; a discontinuity in the
    /// path starts a new segment (phonopy separates those with a comma).
    pub fn write<W: Write>(
        mut w: W,
        segments: &[Vec<(String, V3)>],
        points_per_segment: Option<u32>,
    ) -> FailResult<()>
    {Ok({
        ensure!(!segments.is_empty(), "empty band path");
        for segment in segments {
            ensure!(segment.len() >= 2, "band path segment with fewer than two points");
        }

        let fmt_q = |q: &V3| format!("{} {} {}", q[0], q[1], q[2]);

        let band: Vec<String> = segments.iter()
            .map(|segment| {
                segment.iter().map(|(_, q)| fmt_q(q)).collect::<Vec<_>>().join("  ")
            })
            .collect();
        writeln!(w, "BAND = {}", band.join(", "))?;

        let labels: Vec<String> = segments.iter()
            .map(|segment| {
                segment.iter().map(|(name, _)| name.clone()).collect::<Vec<_>>().join(" ")
            })
            .collect();
        writeln!(w, "BAND_LABELS = {}", labels.join(", "))?;

        if let Some(points) = points_per_segment {
            writeln!(w, "BAND_POINTS = {}", points)?;
        }
    })}

}
