use soroban_sdk::contracttype;

use crate::{
    config::EngineConfig,
    constants::SECONDS_PER_DAY,
    error::EngineError,
    fees::calculate_staking_fee,
    tiers::resolve_tier,
    types::{PositionStatus, StakePosition, TierName, Token},
    utils::checked_add,
    yields::project_yield,
};

/// Preview of a new stake before it is opened.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeQuote {
    pub gross: i128,
    pub service_fee: i128,
    pub net: i128,
    /// Tier reached once this stake is added to the current total
    pub tier: TierName,
    pub apy_bps: i64,
    pub monthly_income: i128,
    pub projected_annual: i128,
    pub total_at_maturity: i128,
    pub start_date: u64,
    pub maturity_date: u64,
}

impl StakeQuote {
    /// Opens the quoted stake. The principal is the gross amount and counts towards the
    /// tier, the recorded service fee is left out of the interest.
    pub fn into_position(self, id: u64, token: Token) -> StakePosition {
        StakePosition {
            id,
            principal: self.gross,
            service_fee: self.service_fee,
            token,
            tier: self.tier,
            apy_bps: self.apy_bps,
            start_date: self.start_date,
            maturity_date: self.maturity_date,
            status: PositionStatus::Active,
        }
    }
}

pub fn maturity_date(start: u64, term_days: u64) -> Result<u64, EngineError> {
    term_days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|term| start.checked_add(term))
        .ok_or(EngineError::InvalidTerm)
}

/// Checks a new stake against the admission rules and prices it.
///
/// The APY is taken from the tier of `current_total_staked + gross`, so a stake that
/// lifts the member into a higher tier is opened at that tier's rate. The income figures
/// are projected on the amount left after the service fee.
pub fn quote_stake(
    config: &EngineConfig,
    current_total_staked: i128,
    gross: i128,
    now: u64,
) -> Result<StakeQuote, EngineError> {
    if gross < 0 || current_total_staked < 0 {
        return Err(EngineError::InvalidAmount);
    }
    if gross < config.min_stake {
        return Err(EngineError::StakeBelowMinimum);
    }
    if gross > config.max_stake {
        return Err(EngineError::StakeAboveMaximum);
    }

    let tier = resolve_tier(config, checked_add(current_total_staked, gross)?)?;
    if !tier.staking_enabled {
        return Err(EngineError::StakingDisabled);
    }

    let fee = calculate_staking_fee(config, gross)?;
    let projection = project_yield(fee.net, tier.apy_bps, 0, config.term_days)?;
    let maturity_date = maturity_date(now, config.term_days)?;

    Ok(StakeQuote {
        gross,
        service_fee: fee.fee,
        net: fee.net,
        tier: tier.name,
        apy_bps: tier.apy_bps,
        monthly_income: projection.monthly_income,
        projected_annual: projection.projected_annual,
        total_at_maturity: projection.total_at_maturity,
        start_date: now,
        maturity_date,
    })
}
