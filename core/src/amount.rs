use std::{
    fmt::{Debug, Display},
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// Raw amount of the ledger currency (128 bit unsigned)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    raw: u128,
}

impl Amount {
    pub const MAX: Amount = Amount::raw(u128::MAX);
    pub const ZERO: Amount = Amount::raw(0);

    pub const fn raw(value: u128) -> Self {
        Self { raw: value }
    }

    pub const fn nano(value: u128) -> Self {
        Self {
            raw: value * 10u128.pow(30),
        }
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    pub fn number(&self) -> u128 {
        self.raw
    }

    pub fn to_be_bytes(&self) -> [u8; 16] {
        self.raw.to_be_bytes()
    }

    pub fn checked_sub(&self, other: Amount) -> Option<Amount> {
        self.raw.checked_sub(other.raw).map(Amount::raw)
    }

    pub fn checked_add(&self, other: Amount) -> Option<Amount> {
        self.raw.checked_add(other.raw).map(Amount::raw)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount::raw(value)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::raw(self.raw + rhs.raw)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.raw += rhs.raw;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount::raw(self.raw - rhs.raw)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.raw -= rhs.raw;
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.raw, f)
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.raw, f)
    }
}
