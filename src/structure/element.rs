/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::collections::HashMap;
use std::fmt;

use failure::Backtrace;

/// Represents a specific atomic number.
///
/// Only elements in the table below are supported, which enables
/// methods to return `&'static str`.
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Element(u16);

#[derive(Debug, Fail)]
#[fail(display = "Unable to parse element symbol: {:?}", text)]
pub struct ElementParseError {
    text: String,
    backtrace: Backtrace,
}

// (symbol, standard atomic weight in Da)
//
// Weights follow the 2013 IUPAC standard values, abridged to four
// significant decimals; radioactive entries carry the mass number of the
// most stable isotope.
const TABLE: &[(&str, f64)] = &[
    ("H", 1.008), ("He", 4.0026),
    ("Li", 6.94), ("Be", 9.0122), ("B", 10.81), ("C", 12.011),
    ("N", 14.007), ("O", 15.999), ("F", 18.998), ("Ne", 20.180),
    ("Na", 22.990), ("Mg", 24.305), ("Al", 26.982), ("Si", 28.085),
    ("P", 30.974), ("S", 32.06), ("Cl", 35.45), ("Ar", 39.948),
    ("K", 39.098), ("Ca", 40.078), ("Sc", 44.956), ("Ti", 47.867),
    ("V", 50.942), ("Cr", 51.996), ("Mn", 54.938), ("Fe", 55.845),
    ("Co", 58.933), ("Ni", 58.693), ("Cu", 63.546), ("Zn", 65.38),
    ("Ga", 69.723), ("Ge", 72.630), ("As", 74.922), ("Se", 78.971),
    ("Br", 79.904), ("Kr", 83.798),
    ("Rb", 85.468), ("Sr", 87.62), ("Y", 88.906), ("Zr", 91.224),
    ("Nb", 92.906), ("Mo", 95.95), ("Tc", 98.0), ("Ru", 101.07),
    ("Rh", 102.91), ("Pd", 106.42), ("Ag", 107.87), ("Cd", 112.41),
    ("In", 114.82), ("Sn", 118.71), ("Sb", 121.76), ("Te", 127.60),
    ("I", 126.90), ("Xe", 131.29),
    ("Cs", 132.91), ("Ba", 137.33), ("La", 138.91), ("Ce", 140.12),
    ("Pr", 140.91), ("Nd", 144.24), ("Pm", 145.0), ("Sm", 150.36),
    ("Eu", 151.96), ("Gd", 157.25), ("Tb", 158.93), ("Dy", 162.50),
    ("Ho", 164.93), ("Er", 167.26), ("Tm", 168.93), ("Yb", 173.05),
    ("Lu", 174.97), ("Hf", 178.49), ("Ta", 180.95), ("W", 183.84),
    ("Re", 186.21), ("Os", 190.23), ("Ir", 192.22), ("Pt", 195.08),
    ("Au", 196.97), ("Hg", 200.59), ("Tl", 204.38), ("Pb", 207.2),
    ("Bi", 208.98), ("Po", 209.0), ("At", 210.0), ("Rn", 222.0),
    ("Fr", 223.0), ("Ra", 226.0), ("Ac", 227.0), ("Th", 232.04),
    ("Pa", 231.04), ("U", 238.03), ("Np", 237.0), ("Pu", 244.0),
];

lazy_static! {
    static ref SYMBOL_TO_NUMBER: HashMap<&'static str, u16> = {
        TABLE.iter().enumerate()
            .map(|(i, &(symbol, _))| (symbol, (i + 1) as u16))
            .collect()
    };
}

impl Element {
    pub fn from_symbol(s: &str) -> Result<Self, ElementParseError> {
        match SYMBOL_TO_NUMBER.get(s) {
            Some(&n) => Ok(Element(n)),
            None => Err(ElementParseError {
                text: s.to_string(),
                backtrace: Backtrace::new(),
            }),
        }
    }

    pub fn from_atomic_number(n: u32) -> Option<Self> {
        match 1 <= n && n as usize <= TABLE.len() {
            true => Some(Element(n as u16)),
            false => None,
        }
    }

    pub fn atomic_number(&self) -> u32
    { self.0.into() }

    pub fn symbol(&self) -> &'static str
    { TABLE[(self.0 - 1) as usize].0 }

    /// Standard atomic weight, in Da.
    pub fn mass(&self) -> f64
    { TABLE[(self.0 - 1) as usize].1 }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { write!(f, "Element({})", self.symbol()) }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { write!(f, "{}", self.symbol()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_roundtrip() {
        let fe = Element::from_symbol("Fe").unwrap();
        assert_eq!(fe.symbol(), "Fe");
        assert_eq!(fe.atomic_number(), 26);
        assert!((fe.mass() - 55.845).abs() < 1e-12);
    }

    #[test]
    fn unknown_symbol() {
        assert!(Element::from_symbol("Xx").is_err());
        assert!(Element::from_symbol("fe").is_err());
    }
}
