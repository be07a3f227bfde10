/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The per-site `.dat` layout shared by the volume and displacement tools:
//! one row per atom, then statistics over all atoms and per species.

use std::io::prelude::*;

use phpost_structure::Element;

use crate::FailResult;

pub struct SiteTable<'a> {
    /// Column title, e.g. `Voronoi_volume` or `SAD_(A^2)`.
    pub title: &'a str,
    /// Extra `# ...` lines before the table (the mesh tool records its mesh).
    pub header_lines: &'a [String],
    pub elements: &'a [Element],
    pub values: &'a [f64],
    /// Also print the `sqrt(average)` row (wanted for squared displacements).
    pub with_sqrt_average: bool,
}

pub fn write<W: Write>(mut w: W, table: &SiteTable<'_>) -> FailResult<()>
{Ok({
    let SiteTable { title, header_lines, elements, values, with_sqrt_average } = *table;
    assert_eq!(elements.len(), values.len());

    for line in header_lines {
        writeln!(w, "# {}", line)?;
    }

    write!(w, "#{}", " ".repeat(21))?;
    writeln!(w, "{:<18}", title)?;
    for (i, (element, value)) in elements.iter().zip(values).enumerate() {
        writeln!(w, "atom {:>11} {:<5}{:>18.12}", i, element.symbol(), value)?;
    }
    writeln!(w)?;

    write_statistics(&mut w, "", values, with_sqrt_average)?;

    let (types, numbers) = phpost_structure::symbol_types(elements);
    for (type_index, element) in types.iter().enumerate() {
        let subset: Vec<f64> = numbers.iter().zip(values)
            .filter(|&(&n, _)| n == type_index)
            .map(|(_, &v)| v)
            .collect();
        write_statistics(&mut w, element.symbol(), &subset, with_sqrt_average)?;
    }
})}

fn write_statistics<W: Write>(
    mut w: W,
    symbol: &str,
    values: &[f64],
    with_sqrt_average: bool,
) -> FailResult<()>
{Ok({
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    let average = sum / n;
    let sd = {
        let var = values.iter().map(|v| (v - average) * (v - average)).sum::<f64>() / n;
        var.sqrt()
    };
    let abs: Vec<f64> = values.iter().map(|v| v.abs()).collect();
    let abs_sum: f64 = abs.iter().sum();
    let abs_average = abs_sum / n;
    let abs_sd = {
        let var = abs.iter().map(|v| (v - abs_average) * (v - abs_average)).sum::<f64>() / n;
        var.sqrt()
    };

    let mut row = |label: &str, value: f64| {
        writeln!(w, "{:<16} {:<5}{:>18.12}", label, symbol, value)
    };
    row("sum", sum)?;
    row("average", average)?;
    if with_sqrt_average {
        row("sqrt(average)", average.sqrt())?;
    }
    row("s.d.", sd)?;
    row("absolute_sum", abs_sum)?;
    row("absolute_average", abs_average)?;
    row("absolute_s.d.", abs_sd)?;
    writeln!(w)?;
})}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn layout_smoke_test() {
        let elements = vec![
            Element::from_symbol("Fe").unwrap(),
            Element::from_symbol("Al").unwrap(),
            Element::from_symbol("Fe").unwrap(),
        ];
        let values = vec![10.0, 12.0, 14.0];

        let mut buffer = vec![];
        write(&mut buffer, &SiteTable {
            title: "Voronoi_volume",
            header_lines: &[],
            elements: &elements,
            values: &values,
            with_sqrt_average: false,
        }).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Voronoi_volume"));
        assert!(text.contains("atom           0 Fe "));
        // all-atom statistics come before the per-species blocks
        let sum_all = text.find("sum              ").unwrap();
        let sum_fe = text.find("sum              Fe").unwrap();
        assert!(sum_all < sum_fe);
        // Fe subset: sum 24, average 12
        assert!(text.contains("average          Fe"));
        assert!(text.contains("12.000000000000"));
    }

    #[test]
    fn sqrt_average_row_is_optional() {
        let elements = vec![Element::from_symbol("Cu").unwrap()];
        let values = vec![4.0];

        let mut with = vec![];
        write(&mut with, &SiteTable {
            title: "SAD_(A^2)",
            header_lines: &[],
            elements: &elements,
            values: &values,
            with_sqrt_average: true,
        }).unwrap();
        let text = String::from_utf8(with).unwrap();
        assert!(text.contains("sqrt(average)"));
        assert!(text.contains("2.000000000000"));
    }
}
