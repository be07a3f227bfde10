/* ************************************************************************ **
** This file is part of phpost, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::types::{M33, V3};

pub fn dot(a: &V3, b: &V3) -> f64
{ a.dot(b) }

// elementwise vector ops, by value and by reference on the right
// (the by-ref forms exist because iterators tend to produce references)

impl Add for V3 {
    type Output = V3;

    fn add(self, other: V3) -> V3
    { V3([self[0] + other[0], self[1] + other[1], self[2] + other[2]]) }
}

impl<'a> Add<&'a V3> for V3 {
    type Output = V3;

    fn add(self, other: &'a V3) -> V3
    { self + *other }
}

impl Sub for V3 {
    type Output = V3;

    fn sub(self, other: V3) -> V3
    { V3([self[0] - other[0], self[1] - other[1], self[2] - other[2]]) }
}

impl<'a> Sub<&'a V3> for V3 {
    type Output = V3;

    fn sub(self, other: &'a V3) -> V3
    { self - *other }
}

impl<'a, 'b> Sub<&'b V3> for &'a V3 {
    type Output = V3;

    fn sub(self, other: &'b V3) -> V3
    { *self - *other }
}

impl Neg for V3 {
    type Output = V3;

    fn neg(self) -> V3
    { V3([-self[0], -self[1], -self[2]]) }
}

impl Mul<f64> for V3 {
    type Output = V3;

    fn mul(self, k: f64) -> V3
    { self.map(|x| x * k) }
}

impl Mul<V3> for f64 {
    type Output = V3;

    fn mul(self, v: V3) -> V3
    { v * self }
}

impl Div<f64> for V3 {
    type Output = V3;

    fn div(self, k: f64) -> V3
    { self.map(|x| x / k) }
}

impl AddAssign for V3 {
    fn add_assign(&mut self, other: V3)
    { *self = *self + other; }
}

impl SubAssign for V3 {
    fn sub_assign(&mut self, other: V3)
    { *self = *self - other; }
}

impl MulAssign<f64> for V3 {
    fn mul_assign(&mut self, k: f64)
    { *self = *self * k; }
}

impl DivAssign<f64> for V3 {
    fn div_assign(&mut self, k: f64)
    { *self = *self / k; }
}

// row vector times matrix

impl<'a> Mul<&'a M33> for V3 {
    type Output = V3;

    fn mul(self, m: &'a M33) -> V3
    { V3::from_fn(|c| self[0] * m[0][c] + self[1] * m[1][c] + self[2] * m[2][c]) }
}

impl<'a, 'b> Mul<&'b M33> for &'a V3 {
    type Output = V3;

    fn mul(self, m: &'b M33) -> V3
    { *self * m }
}

// matrix times matrix

impl<'a, 'b> Mul<&'b M33> for &'a M33 {
    type Output = M33;

    fn mul(self, other: &'b M33) -> M33
    { M33::from_rows([&self[0] * other, &self[1] * other, &self[2] * other]) }
}

// matrix scaling and sums (used by the blocked force-constant arithmetic)

impl Add for M33 {
    type Output = M33;

    fn add(self, other: M33) -> M33
    { M33([self[0] + other[0], self[1] + other[1], self[2] + other[2]]) }
}

impl<'a, 'b> Add<&'b M33> for &'a M33 {
    type Output = M33;

    fn add(self, other: &'b M33) -> M33
    { *self + *other }
}

impl Sub for M33 {
    type Output = M33;

    fn sub(self, other: M33) -> M33
    { M33([self[0] - other[0], self[1] - other[1], self[2] - other[2]]) }
}

impl Neg for M33 {
    type Output = M33;

    fn neg(self) -> M33
    { self.map(|x| -x) }
}

impl Mul<f64> for M33 {
    type Output = M33;

    fn mul(self, k: f64) -> M33
    { self.map(|x| x * k) }
}

impl Div<f64> for M33 {
    type Output = M33;

    fn div(self, k: f64) -> M33
    { self.map(|x| x / k) }
}

impl AddAssign for M33 {
    fn add_assign(&mut self, other: M33)
    { *self = *self + other; }
}

impl SubAssign for M33 {
    fn sub_assign(&mut self, other: M33)
    { *self = *self - other; }
}
