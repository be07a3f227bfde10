/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use failure::Backtrace;

/// Represents a reordering operation on atoms.
///
/// The representation is comparable to indexing with an integer array in
/// numpy: if the `k`th element of the permutation vector is `value`, then
/// applying the permutation *pulls* the data at index `value` into index `k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Perm(Vec<usize>);

#[derive(Debug, Fail)]
#[fail(display = "Tried to construct an invalid permutation.")]
pub struct InvalidPermError(Backtrace);

impl Perm {
    pub fn eye(n: usize) -> Perm
    { Perm((0..n).collect()) }

    pub fn len(&self) -> usize
    { self.0.len() }

    /// This performs O(n log n) validation on the data
    /// to verify that it satisfies the invariants of Perm.
    pub fn from_vec(vec: Vec<usize>) -> Result<Perm, InvalidPermError> {
        if !Self::validate_data(&vec) {
            return Err(InvalidPermError(Backtrace::new()));
        }
        Ok(Perm(vec))
    }

    #[must_use = "doesn't assert"]
    fn validate_data(xs: &[usize]) -> bool {
        let mut vec = xs.to_vec();
        vec.sort();
        vec.into_iter().eq(0..xs.len())
    }

    pub fn into_vec(self) -> Vec<usize>
    { self.0 }

    pub fn indices(&self) -> &[usize]
    { &self.0 }

    /// Where the data at `i` comes from when this perm is applied. O(1).
    pub fn index_source(&self, i: usize) -> usize
    { self.0[i] }

    #[must_use = "not an in-place operation"]
    pub fn inverted(&self) -> Perm {
        let mut inv = vec![usize::max_value(); self.0.len()];
        for (k, &from) in self.0.iter().enumerate() {
            inv[from] = k;
        }
        debug_assert!(Self::validate_data(&inv));
        Perm(inv)
    }

    /// Compute the `Perm` that, when applied to the input slice,
    /// would (stably) sort it.
    pub fn argsort<T: Ord>(xs: &[T]) -> Perm {
        let mut perm: Vec<_> = (0..xs.len()).collect();
        perm.sort_by(|&a, &b| xs[a].cmp(&xs[b]));
        Perm(perm)
    }

    pub fn random(n: usize) -> Perm {
        use rand::Rng;

        let mut perm: Vec<_> = (0..n).collect();
        rand::thread_rng().shuffle(&mut perm);
        Perm(perm)
    }
}

impl Perm {
    /// Flipped group operator.
    ///
    /// `a.then(b) == b.of(a)`, and more naturally,
    /// `x.permuted_by(a).permuted_by(b) == x.permuted_by(a.then(b))`.
    pub fn then(&self, other: &Perm) -> Perm
    { Perm(self.0.clone().permuted_by(other)) }

    /// Conventional group operator.
    pub fn of(&self, other: &Perm) -> Perm
    { other.then(self) }
}

pub trait Permute: Sized {
    // awkward name, but it makes two things clear beyond a
    // shadow of a doubt:
    // - The receiver gets permuted, not the argument.
    //   (relevant when Self is Perm)
    // - The permutation is not in-place.
    fn permuted_by(self, perm: &Perm) -> Self;
}

impl<T> Permute for Vec<T> {
    fn permuted_by(self, perm: &Perm) -> Vec<T> {
        assert_eq!(self.len(), perm.len(),
            "Incorrect permutation length: {} vs {}",
            self.len(), perm.len());

        let mut src: Vec<Option<T>> = self.into_iter().map(Some).collect();
        perm.0.iter()
            .map(|&from| src[from].take().expect("(BUG) invalid Perm!?"))
            .collect()
    }
}

impl Permute for Perm {
    fn permuted_by(self, perm: &Perm) -> Perm
    { Perm(self.0.permuted_by(perm)) }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn perm_inverse() {
        let perm = Perm::random(20);
        let inv = perm.inverted();

        assert_eq!(perm.clone().permuted_by(&inv), Perm::eye(20));
        assert_eq!(inv.permuted_by(&perm), Perm::eye(20));
    }

    #[test]
    fn invalid_perm() {
        assert!(Perm::from_vec(vec![0, 1, 3, 3]).is_err());
        assert!(Perm::from_vec(vec![1, 2, 3]).is_err());
    }

    #[test]
    #[should_panic(expected = "permutation length")]
    fn incompatible_perm() {
        let _ = vec![4, 2, 1].permuted_by(&Perm::eye(2));
    }

    #[test]
    fn pull_semantics() {
        let xs = vec!["a", "b", "c", "d"];
        let perm = Perm::from_vec(vec![3, 0, 1, 2]).unwrap();
        assert_eq!(xs.permuted_by(&perm), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn permute_associativity() {
        let xy = Perm::from_vec(vec![1, 0, 2]).unwrap();
        let zx = Perm::from_vec(vec![2, 1, 0]).unwrap();
        let xyzx = Perm::from_vec(vec![2, 0, 1]).unwrap();
        assert_eq!(xy.then(&zx), xyzx);
        assert_eq!(zx.of(&xy), xyzx);
        assert_eq!(
            vec![0, 1, 2].permuted_by(&xy).permuted_by(&zx),
            vec![0, 1, 2].permuted_by(&xyzx));
    }

    #[test]
    fn argsort_sorts() {
        let xs = vec![30, 10, 20, 10];
        let perm = Perm::argsort(&xs);
        assert_eq!(xs.permuted_by(&perm), vec![10, 10, 20, 30]);
    }
}
