/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Randomized site occupation.
//!
//! Replaces the atoms of one species with a mix of species at prescribed
//! fractions; used to decorate an averaged ("ideal") structure with an
//! explicit disordered configuration.

use rand::{Rng, SeedableRng, StdRng};

use crate::FailResult;
use crate::core::structure::Structure;
use crate::element::Element;

/// One substitution rule: which species to replace, and the target fractions
/// of what takes its place.  Fractions are normalized by their sum.
#[derive(Debug, Clone)]
pub struct Substitution {
    pub replaced: Element,
    pub targets: Vec<(Element, f64)>,
}

/// Apply every substitution to a copy of the structure.
///
/// Counts are `round(n * fraction)`; if the rounded counts do not add up to
/// the number of replaced sites, the fractions are incommensurate with the
/// cell and this is an error (the caller should adjust the fractions or the
/// cell size rather than get a silently skewed composition).
pub fn randomized_configuration(
    structure: &Structure,
    substitutions: &[Substitution],
    seed: Option<u64>,
) -> FailResult<Structure>
{Ok({
    let mut rng: StdRng = match seed {
        Some(seed) => {
            // StdRng::from_seed wants usize words
            SeedableRng::from_seed(&[seed as usize][..])
        },
        None => StdRng::new()?,
    };

    let mut elements = structure.elements().to_vec();
    for sub in substitutions {
        let mut indices: Vec<usize> = elements.iter().enumerate()
            .filter(|&(_, &e)| e == sub.replaced)
            .map(|(i, _)| i)
            .collect();
        let num_replaced = indices.len();
        ensure!(num_replaced > 0, "no {} sites to replace", sub.replaced);
        rng.shuffle(&mut indices);

        let sum_ratio: f64 = sub.targets.iter().map(|&(_, r)| r).sum();
        let mut start = 0;
        for &(target, ratio) in &sub.targets {
            let count = (num_replaced as f64 * ratio / sum_ratio).round() as usize;
            ensure!(start + count <= num_replaced,
                "rounded counts for {} exceed the number of its sites", sub.replaced);
            for &i in &indices[start..start + count] {
                elements[i] = target;
            }
            start += count;
        }
        ensure!(start == num_replaced,
            "fractions for {} leave {} of {} sites unassigned; \
             adjust the fractions or the cell size",
            sub.replaced, num_replaced - start, num_replaced);
    }

    structure.clone().with_elements(elements)
})}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::core::coords::{Coords, CoordsKind};
    use crate::core::lattice::Lattice;
    use phpost_array_types::V3;

    fn chain_of(symbol: &str, n: usize) -> Structure {
        let fracs = (0..n).map(|i| V3([i as f64 / n as f64, 0.0, 0.0])).collect();
        let coords = Coords::new(Lattice::cubic(n as f64), CoordsKind::Fracs(fracs));
        Structure::new(coords, vec![Element::from_symbol(symbol).unwrap(); n])
    }

    fn count(structure: &Structure, symbol: &str) -> usize {
        structure.symbols().iter().filter(|&&s| s == symbol).count()
    }

    #[test]
    fn composition_is_exact() {
        let structure = chain_of("Fe", 8);
        let out = randomized_configuration(&structure, &[Substitution {
            replaced: Element::from_symbol("Fe").unwrap(),
            targets: vec![
                (Element::from_symbol("Cr").unwrap(), 0.75),
                (Element::from_symbol("Ni").unwrap(), 0.25),
            ],
        }], Some(42)).unwrap();

        assert_eq!(count(&out, "Cr"), 6);
        assert_eq!(count(&out, "Ni"), 2);
        assert_eq!(count(&out, "Fe"), 0);
        // positions are untouched
        assert_eq!(out.to_fracs(), structure.to_fracs());
    }

    #[test]
    fn same_seed_same_configuration() {
        let structure = chain_of("Al", 12);
        let subs = vec![Substitution {
            replaced: Element::from_symbol("Al").unwrap(),
            targets: vec![
                (Element::from_symbol("Ti").unwrap(), 0.5),
                (Element::from_symbol("Al").unwrap(), 0.5),
            ],
        }];
        let a = randomized_configuration(&structure, &subs, Some(7)).unwrap();
        let b = randomized_configuration(&structure, &subs, Some(7)).unwrap();
        assert_eq!(a.symbols(), b.symbols());
    }

    #[test]
    fn incommensurate_fractions_are_an_error() {
        let structure = chain_of("Fe", 3);
        let result = randomized_configuration(&structure, &[Substitution {
            replaced: Element::from_symbol("Fe").unwrap(),
            targets: vec![
                (Element::from_symbol("Cr").unwrap(), 0.5),
                (Element::from_symbol("Ni").unwrap(), 0.5),
            ],
        }], Some(0));
        assert!(result.is_err());
    }
}
