use soroban_sdk::contracttype;
use vonvault_decimal::Decimal;

use crate::{
    constants::{MONTHS_PER_YEAR, SECONDS_PER_DAY},
    error::EngineError,
    types::StakePosition,
    utils::{apply_bps, checked_add},
};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldProjection {
    pub principal: i128,
    pub apy_bps: i64,
    /// Days counted towards accrual, never more than the term
    pub days_accrued: u64,
    pub accrued_interest: i128,
    pub monthly_income: i128,
    pub projected_annual: i128,
    pub total_at_maturity: i128,
}

/// Simple (non-compounding) interest over a fixed term.
///
/// Accrual stops at the end of the term. A zero or negative APY earns nothing.
pub fn project_yield(
    principal: i128,
    apy_bps: i64,
    days_elapsed: u64,
    term_days: u64,
) -> Result<YieldProjection, EngineError> {
    if principal < 0 {
        return Err(EngineError::InvalidAmount);
    }
    if term_days == 0 {
        return Err(EngineError::InvalidTerm);
    }

    let days_accrued = days_elapsed.min(term_days);
    let projected_annual = if apy_bps > 0 {
        apply_bps(principal, apy_bps)?
    } else {
        0
    };
    let accrued_interest = Decimal::checked_from_ratio(days_accrued, term_days)
        .and_then(|elapsed| elapsed.checked_mul(projected_annual))
        .map_err(|_| EngineError::InvalidAmount)?;

    Ok(YieldProjection {
        principal,
        apy_bps,
        days_accrued,
        accrued_interest,
        monthly_income: projected_annual / MONTHS_PER_YEAR,
        projected_annual,
        total_at_maturity: checked_add(principal, projected_annual)?,
    })
}

/// Whole days between `start` and `now`, zero if `now` is before `start`.
pub fn days_elapsed(start: u64, now: u64) -> u64 {
    now.saturating_sub(start) / SECONDS_PER_DAY
}

/// Projection of a single position as of `now`, over the position's own term. Interest
/// accrues on the principal net of the service fee.
pub fn project_position(position: &StakePosition, now: u64) -> Result<YieldProjection, EngineError> {
    project_yield(
        position.invested()?,
        position.apy_bps,
        days_elapsed(position.start_date, now),
        position.term_days()?,
    )
}
