// A lot of this code is taken from the cosmwasm-std crate, which is licensed under the Apache
// License 2.0 - https://github.com/CosmWasm/cosmwasm.

#![no_std]

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    DivideByZero,
    Overflow,
}

/// Signed fixed-point decimal with 18 decimal places.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Decimal(i128);

impl Decimal {
    const DECIMAL_FRACTIONAL: i128 = 1_000_000_000_000_000_000i128; // 1*10**18
    /// The number of decimal places. Since decimal types are fixed-point rather than
    /// floating-point, this is a constant.
    pub const DECIMAL_PLACES: u32 = 18;

    /// Convert basis points (x/10000) into Decimal
    pub fn bps(x: i64) -> Self {
        Self((x as i128) * 100_000_000_000_000)
    }

    /// Returns the ratio (numerator / denominator) as a Decimal
    pub fn checked_from_ratio(
        numerator: impl Into<i128>,
        denominator: impl Into<i128>,
    ) -> Result<Self, Error> {
        let numerator = numerator.into();
        let denominator = denominator.into();
        if denominator == 0 {
            return Err(Error::DivideByZero);
        }

        numerator
            .checked_mul(Self::DECIMAL_FRACTIONAL)
            .map(|scaled| Decimal(scaled / denominator))
            .ok_or(Error::Overflow)
    }

    /// Multiplies an integer amount by this decimal, truncating towards zero.
    pub fn checked_mul(self, amount: i128) -> Result<i128, Error> {
        if amount == 0 || self.0 == 0 {
            return Ok(0);
        }
        amount
            .checked_mul(self.0)
            .map(|product| product / Self::DECIMAL_FRACTIONAL)
            .ok_or(Error::Overflow)
    }

    /// The number of decimal places. This is a constant value for now
    /// but this could potentially change as the type evolves.
    #[must_use]
    #[inline]
    pub const fn decimal_places(&self) -> u32 {
        Self::DECIMAL_PLACES
    }

    /// Returns the value scaled to `precision` decimal places, truncating the rest.
    ///
    /// `Decimal::bps(1_700).to_i128_with_precision(4)` is `1700`, i.e. the value in
    /// basis points.
    pub fn to_i128_with_precision(&self, precision: impl Into<i32>) -> i128 {
        let precision = precision.into();
        let divisor = 10i128.pow((self.decimal_places() as i32 - precision) as u32);
        self.0 / divisor
    }
}
