use soroban_sdk::{contracttype, Map, Vec};

use crate::{
    config::EngineConfig,
    constants::{DAYS_PER_MONTH, SECONDS_PER_DAY},
    error::EngineError,
    tiers::{progress_to_next_tier, resolve_tier, NextTier},
    types::{PositionStatus, StakePosition, TierName, Token},
    utils::{checked_add, is_within_epsilon, share_bps},
    yields::project_position,
};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Portfolio {
    /// Positions with their status as of the aggregation time
    pub positions: Vec<StakePosition>,
    pub total_staked: i128,
    pub total_accrued: i128,
    /// Principal-weighted APY of the active positions
    pub blended_apy_bps: i64,
    pub monthly_income: i128,
    pub current_tier: TierName,
    pub next_tier: NextTier,
    pub amount_to_next_tier: i128,
    pub tier_progress_bps: i64,
    pub active_count: u32,
    pub matured_count: u32,
    pub claimed_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthlyProjection {
    pub month: u32,
    pub principal: i128,
    pub earnings: i128,
    pub total_value: i128,
    pub monthly_income: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reconciliation {
    pub computed_staked: i128,
    pub computed_accrued: i128,
    /// reported - computed
    pub staked_diff: i128,
    pub accrued_diff: i128,
    pub consistent: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenShare {
    pub token: Token,
    pub amount: i128,
    pub share_bps: i64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierShare {
    pub tier: TierName,
    pub amount: i128,
    pub share_bps: i64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusBreakdown {
    pub status: PositionStatus,
    pub count: u32,
    /// Principal of the positions in this status
    pub value: i128,
    /// Share of `value` in everything ever staked
    pub share_bps: i64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PortfolioAnalytics {
    /// One entry per status: active, matured, claimed
    pub by_status: Vec<StatusBreakdown>,
    /// Active principal per tier the positions were opened in
    pub by_tier: Vec<TierShare>,
    /// Active principal per stablecoin
    pub by_token: Vec<TokenShare>,
    /// Principal of every position, claimed ones included
    pub total_invested: i128,
    pub total_fees_paid: i128,
    /// Interest accrued so far, claimed positions included
    pub total_earned: i128,
    /// total_earned / total_invested
    pub roi_bps: i64,
}

#[derive(Default)]
struct Totals {
    staked: i128,
    accrued: i128,
    weighted_apy: i128,
    monthly_income: i128,
    active: u32,
    matured: u32,
    claimed: u32,
}

impl Totals {
    fn add(&mut self, position: &StakePosition, now: u64) -> Result<PositionStatus, EngineError> {
        let status = position.status_at(now);
        match status {
            PositionStatus::Active => {
                let projection = project_position(position, now)?;
                let weighted = position
                    .principal
                    .checked_mul(position.apy_bps as i128)
                    .ok_or(EngineError::InvalidAmount)?;
                self.staked = checked_add(self.staked, position.principal)?;
                self.weighted_apy = checked_add(self.weighted_apy, weighted)?;
                self.monthly_income = checked_add(self.monthly_income, projection.monthly_income)?;
                self.accrued = checked_add(self.accrued, projection.accrued_interest)?;
                self.active += 1;
            }
            PositionStatus::Matured => {
                let projection = project_position(position, now)?;
                self.accrued = checked_add(self.accrued, projection.accrued_interest)?;
                self.matured += 1;
            }
            PositionStatus::Claimed => {
                position.invested()?;
                self.claimed += 1;
            }
        }

        Ok(status)
    }

    fn blended_apy_bps(&self) -> i64 {
        if self.staked == 0 {
            return 0;
        }
        (self.weighted_apy / self.staked) as i64
    }
}

/// Folds a member's positions into portfolio figures as of `now`.
///
/// Pure: the same positions and time always give the same portfolio.
pub fn aggregate(
    config: &EngineConfig,
    positions: &Vec<StakePosition>,
    now: u64,
) -> Result<Portfolio, EngineError> {
    let mut totals = Totals::default();
    let mut snapshot = Vec::new(positions.env());
    for position in positions.iter() {
        let status = totals.add(&position, now)?;
        snapshot.push_back(StakePosition { status, ..position });
    }

    let current = resolve_tier(config, totals.staked)?;
    let progress = progress_to_next_tier(config, totals.staked, &current)?;

    Ok(Portfolio {
        positions: snapshot,
        total_staked: totals.staked,
        total_accrued: totals.accrued,
        blended_apy_bps: totals.blended_apy_bps(),
        monthly_income: totals.monthly_income,
        current_tier: current.name,
        next_tier: progress.next_tier,
        amount_to_next_tier: progress.amount_remaining,
        tier_progress_bps: progress.percent_complete_bps,
        active_count: totals.active,
        matured_count: totals.matured,
        claimed_count: totals.claimed,
    })
}

/// Portfolio value at the end of each of the next `months` months, assuming nothing
/// is claimed or added in between. Months are 30 days long and the principal is what
/// is paid back at maturity, i.e. net of service fees.
pub fn monthly_projections(
    positions: &Vec<StakePosition>,
    now: u64,
    months: u32,
) -> Result<Vec<MonthlyProjection>, EngineError> {
    let mut projections = Vec::new(positions.env());

    for month in 1..=months {
        let at = (month as u64)
            .checked_mul(DAYS_PER_MONTH * SECONDS_PER_DAY)
            .and_then(|offset| now.checked_add(offset))
            .ok_or(EngineError::InvalidTerm)?;
        let mut principal = 0i128;
        let mut earnings = 0i128;
        let mut monthly_income = 0i128;

        for position in positions.iter() {
            let invested = position.invested()?;
            if position.status_at(now) == PositionStatus::Claimed {
                continue;
            }

            let projection = project_position(&position, at)?;
            principal = checked_add(principal, invested)?;
            earnings = checked_add(earnings, projection.accrued_interest)?;
            if position.status_at(at) == PositionStatus::Active {
                monthly_income = checked_add(monthly_income, projection.monthly_income)?;
            }
        }

        projections.push_back(MonthlyProjection {
            month,
            principal,
            earnings,
            total_value: checked_add(principal, earnings)?,
            monthly_income,
        });
    }

    Ok(projections)
}

/// Active principal per stablecoin, with each token's share of the active total.
/// Tokens without an active position are left out.
pub fn staked_by_token(
    positions: &Vec<StakePosition>,
    now: u64,
) -> Result<Vec<TokenShare>, EngineError> {
    let env = positions.env();
    let mut amounts: Map<Token, i128> = Map::new(env);
    let mut total = 0i128;

    for position in positions.iter() {
        position.invested()?;
        if position.status_at(now) != PositionStatus::Active {
            continue;
        }
        let staked = amounts.get(position.token).unwrap_or(0);
        amounts.set(position.token, checked_add(staked, position.principal)?);
        total = checked_add(total, position.principal)?;
    }

    let mut distribution = Vec::new(env);
    for (token, amount) in amounts.iter() {
        distribution.push_back(TokenShare {
            token,
            amount,
            share_bps: share_bps(amount, total)?,
        });
    }

    Ok(distribution)
}

/// Breakdown of everything a member ever staked: per status, per opening tier and per
/// token, with the fees paid and the return earned so far.
pub fn analytics(
    positions: &Vec<StakePosition>,
    now: u64,
) -> Result<PortfolioAnalytics, EngineError> {
    let env = positions.env();
    let statuses = [
        PositionStatus::Active,
        PositionStatus::Matured,
        PositionStatus::Claimed,
    ];
    let mut counts = [0u32; 3];
    let mut values = [0i128; 3];
    let mut tiers: Map<TierName, i128> = Map::new(env);
    let mut active_total = 0i128;
    let mut total_invested = 0i128;
    let mut total_fees_paid = 0i128;
    let mut total_earned = 0i128;

    for position in positions.iter() {
        let status = position.status_at(now);
        let projection = project_position(&position, now)?;
        let index = match status {
            PositionStatus::Active => 0,
            PositionStatus::Matured => 1,
            PositionStatus::Claimed => 2,
        };
        counts[index] += 1;
        values[index] = checked_add(values[index], position.principal)?;

        total_invested = checked_add(total_invested, position.principal)?;
        total_fees_paid = checked_add(total_fees_paid, position.service_fee)?;
        total_earned = checked_add(total_earned, projection.accrued_interest)?;

        if status == PositionStatus::Active {
            let staked = tiers.get(position.tier).unwrap_or(0);
            tiers.set(position.tier, checked_add(staked, position.principal)?);
            active_total = checked_add(active_total, position.principal)?;
        }
    }

    let mut by_status = Vec::new(env);
    for (index, status) in statuses.into_iter().enumerate() {
        by_status.push_back(StatusBreakdown {
            status,
            count: counts[index],
            value: values[index],
            share_bps: share_bps(values[index], total_invested)?,
        });
    }

    let mut by_tier = Vec::new(env);
    for (tier, amount) in tiers.iter() {
        by_tier.push_back(TierShare {
            tier,
            amount,
            share_bps: share_bps(amount, active_total)?,
        });
    }

    Ok(PortfolioAnalytics {
        by_status,
        by_tier,
        by_token: staked_by_token(positions, now)?,
        total_invested,
        total_fees_paid,
        total_earned,
        roi_bps: share_bps(total_earned, total_invested)?,
    })
}

/// Positions with their status as of `now`, optionally narrowed to one status. Kept in
/// the order given, sorting is left to the caller.
pub fn history(
    positions: &Vec<StakePosition>,
    now: u64,
    status: Option<PositionStatus>,
) -> Vec<StakePosition> {
    let mut filtered = Vec::new(positions.env());
    for position in positions.iter() {
        let position = position.with_status_at(now);
        if status.map_or(true, |wanted| wanted == position.status) {
            filtered.push_back(position);
        }
    }

    filtered
}

/// Compares totals aggregated elsewhere (e.g. server side) with the totals recomputed
/// from the positions themselves.
pub fn reconcile(
    config: &EngineConfig,
    positions: &Vec<StakePosition>,
    now: u64,
    reported_staked: i128,
    reported_accrued: i128,
) -> Result<Reconciliation, EngineError> {
    if reported_staked < 0 || reported_accrued < 0 {
        return Err(EngineError::InvalidAmount);
    }

    let portfolio = aggregate(config, positions, now)?;
    Ok(Reconciliation {
        computed_staked: portfolio.total_staked,
        computed_accrued: portfolio.total_accrued,
        staked_diff: reported_staked - portfolio.total_staked,
        accrued_diff: reported_accrued - portfolio.total_accrued,
        consistent: is_within_epsilon(reported_staked, portfolio.total_staked)
            && is_within_epsilon(reported_accrued, portfolio.total_accrued),
    })
}
