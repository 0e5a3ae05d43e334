use vonvault_decimal::Decimal;

use crate::{
    constants::{MAX_BPS, ONE_UNIT, ROUNDING_EPSILON},
    error::EngineError,
};

/// Whole currency units to atomic units
pub const fn units(amount: i128) -> i128 {
    amount * ONE_UNIT
}

pub fn validate_bps(bps: i64) -> Result<(), EngineError> {
    if !(0..=MAX_BPS).contains(&bps) {
        return Err(EngineError::InvalidBps);
    }
    Ok(())
}

/// `amount * bps / 10_000`, truncated. Amounts too large to scale are rejected.
pub fn apply_bps(amount: i128, bps: i64) -> Result<i128, EngineError> {
    Decimal::bps(bps)
        .checked_mul(amount)
        .map_err(|_| EngineError::InvalidAmount)
}

pub fn checked_add(a: i128, b: i128) -> Result<i128, EngineError> {
    a.checked_add(b).ok_or(EngineError::InvalidAmount)
}

/// Share of `part` in `total` in basis points, truncated. Zero for an empty total.
pub fn share_bps(part: i128, total: i128) -> Result<i64, EngineError> {
    if total == 0 {
        return Ok(0);
    }
    let scaled = part
        .checked_mul(MAX_BPS as i128)
        .ok_or(EngineError::InvalidAmount)?;
    Ok((scaled / total) as i64)
}

/// Rounds an atomic amount half away from zero to whole cents. Only meant for the
/// presentation boundary, totals are always summed at full precision.
pub fn to_cents(amount: i128) -> i128 {
    let half = ROUNDING_EPSILON / 2;
    if amount < 0 {
        -((-amount + half) / ROUNDING_EPSILON)
    } else {
        (amount + half) / ROUNDING_EPSILON
    }
}

/// Absolute difference of two amounts is within one cent
pub fn is_within_epsilon(a: i128, b: i128) -> bool {
    (a - b).abs() <= ROUNDING_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn units_scale_by_decimals() {
        assert_eq!(units(0), 0);
        assert_eq!(units(1), 10_000_000);
        assert_eq!(units(1_000), 10_000_000_000);
    }

    #[test_case(0; "zero")]
    #[test_case(75; "staking fee")]
    #[test_case(10_000; "one hundred percent")]
    fn valid_bps(bps: i64) {
        assert_eq!(validate_bps(bps), Ok(()));
    }

    #[test_case(-1; "negative")]
    #[test_case(10_001; "above one hundred percent")]
    fn invalid_bps(bps: i64) {
        assert_eq!(validate_bps(bps), Err(EngineError::InvalidBps));
    }

    #[test_case(36_986_301_369, 369_863; "rounds down below half a cent")]
    #[test_case(36_986_350_000, 369_864; "rounds half up")]
    #[test_case(6_250_000_000, 62_500; "exact cents")]
    #[test_case(-49_999, 0; "tiny negative rounds to zero")]
    #[test_case(-150_000, -2; "negative half rounds away from zero")]
    fn rounding_to_cents(amount: i128, cents: i128) {
        assert_eq!(to_cents(amount), cents);
    }

    #[test_case(units(1_000), 75, 75_000_000; "staking fee")]
    #[test_case(units(50_000), 1_500, units(7_500); "vip apy")]
    #[test_case(0, 2_000, 0; "nothing staked")]
    fn applying_bps(amount: i128, bps: i64, expected: i128) {
        assert_eq!(apply_bps(amount, bps), Ok(expected));
    }

    #[test]
    fn oversized_amounts_are_rejected() {
        assert_eq!(apply_bps(i128::MAX / 100, 2_000), Err(EngineError::InvalidAmount));
        assert_eq!(checked_add(i128::MAX, 1), Err(EngineError::InvalidAmount));
        assert_eq!(share_bps(i128::MAX, i128::MAX), Err(EngineError::InvalidAmount));
    }

    #[test_case(units(25_000), units(40_000), 6_250; "usdc share")]
    #[test_case(1, 3, 3_333; "truncated")]
    #[test_case(units(5), 0, 0; "empty total")]
    fn shares_in_bps(part: i128, total: i128, expected: i64) {
        assert_eq!(share_bps(part, total), Ok(expected));
    }

    #[test]
    fn epsilon_comparison() {
        assert!(is_within_epsilon(units(100), units(100) + ROUNDING_EPSILON));
        assert!(!is_within_epsilon(units(100), units(100) + ROUNDING_EPSILON + 1));
    }
}
