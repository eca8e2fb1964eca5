//! Constant-time equality for derived keys.

use core::ops::{BitAnd, Not};

/// A boolean that is either `0` or `1`, produced without branching on secret
/// data.
#[derive(Debug, Clone, Copy)]
pub struct Choice(u8);

impl Choice {
    #[inline]
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self.0
    }
}

impl From<Choice> for bool {
    #[inline]
    fn from(value: Choice) -> Self {
        debug_assert!((value.0 == 0) | (value.0 == 1));
        value.0 != 0
    }
}

impl BitAnd for Choice {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        (self.0 & rhs.0).into()
    }
}

impl Not for Choice {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        (1 & (!self.0)).into()
    }
}

// keeps the optimizer from turning the mask arithmetic back into branches.
#[cfg(not(feature = "core_hint_black_box"))]
#[inline(never)]
fn black_box(input: u8) -> u8 {
    debug_assert!((input == 0) | (input == 1));
    unsafe { core::ptr::read_volatile(&input) }
}

#[cfg(feature = "core_hint_black_box")]
#[inline(never)]
fn black_box(input: u8) -> u8 {
    debug_assert!((input == 0) | (input == 1));
    core::hint::black_box(input)
}

impl From<u8> for Choice {
    #[inline]
    fn from(value: u8) -> Self {
        Self(black_box(value))
    }
}

#[allow(clippy::module_name_repetitions)]
pub trait ConstantTimeEq {
    fn ct_eq(&self, other: &Self) -> Choice;

    #[inline]
    fn ct_ne(&self, other: &Self) -> Choice {
        !self.ct_eq(other)
    }
}

/// Slices of different lengths compare unequal immediately; the length of a
/// derived key is not secret.
impl<T: ConstantTimeEq> ConstantTimeEq for [T] {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        if self.len() != other.len() {
            return Choice::from(0);
        }
        self.iter()
            .zip(other.iter())
            .fold(Choice::from(1), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

impl ConstantTimeEq for u8 {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        let x = self ^ other;
        let y = (x | x.wrapping_neg()) >> 7;
        (y ^ 1).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes() {
        for a in 0..=255u8 {
            assert!(bool::from(a.ct_eq(&a)));
            assert!(bool::from(a.ct_ne(&a.wrapping_add(1))));
        }
    }

    #[test]
    fn slices() {
        let a: &[u8] = b"derived key";
        assert!(bool::from(a.ct_eq(b"derived key")));
        assert!(!bool::from(a.ct_eq(b"derived kez")));
        assert!(!bool::from(a.ct_eq(b"derived")));
        assert!(bool::from(<[u8]>::ct_eq(&[], &[])));
    }
}
