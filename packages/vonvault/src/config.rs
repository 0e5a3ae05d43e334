use soroban_sdk::{contracttype, map, Env, Map, String, Vec};

use crate::{
    constants::{
        DEFAULT_MAX_STAKE, DEFAULT_MIN_STAKE, DEFAULT_STAKING_FEE_BPS,
        DEFAULT_SWAP_PLATFORM_FEE_BPS, DEFAULT_TERM_DAYS, MAX_BPS, MAX_TERM_DAYS,
    },
    error::EngineError,
    types::{Network, Tier, TierName},
    utils::{units, validate_bps},
};

/// Everything the engine needs besides its inputs. Validated once when installed,
/// the calculators assume a validated config.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    /// Ordered from lowest to highest tier
    pub tiers: Vec<Tier>,
    pub term_days: u64,
    pub staking_fee_bps: i64,
    pub swap_fee_bps_by_tier: Map<TierName, i64>,
    pub swap_platform_fee_bps: i64,
    pub gas_estimate_by_network: Map<Network, i128>,
    /// Smallest single stake accepted
    pub min_stake: i128,
    /// Largest single stake accepted
    pub max_stake: i128,
}

impl EngineConfig {
    pub fn with_defaults(env: &Env) -> Self {
        EngineConfig {
            tiers: default_tiers(env),
            term_days: DEFAULT_TERM_DAYS,
            staking_fee_bps: DEFAULT_STAKING_FEE_BPS,
            swap_fee_bps_by_tier: map![
                env,
                (TierName::Club, 80),
                (TierName::Premium, 60),
                (TierName::Vip, 40),
                (TierName::Elite, 25)
            ],
            swap_platform_fee_bps: DEFAULT_SWAP_PLATFORM_FEE_BPS,
            gas_estimate_by_network: map![
                env,
                (Network::Ethereum, units(15)),
                (Network::Polygon, units(2)),
                (Network::Bsc, units(1))
            ],
            min_stake: DEFAULT_MIN_STAKE,
            max_stake: DEFAULT_MAX_STAKE,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        validate_tiers(&self.tiers)?;

        if self.term_days == 0 || self.term_days > MAX_TERM_DAYS {
            return Err(EngineError::InvalidTerm);
        }

        validate_bps(self.staking_fee_bps)?;
        // a stake must keep something to earn interest on
        if self.staking_fee_bps == MAX_BPS {
            return Err(EngineError::InvalidBps);
        }
        validate_bps(self.swap_platform_fee_bps)?;
        for (_, rate) in self.swap_fee_bps_by_tier.iter() {
            validate_bps(rate)?;
        }

        if self.gas_estimate_by_network.values().iter().any(|gas| gas < 0) {
            return Err(EngineError::InvalidAmount);
        }
        if self.min_stake < 0 || self.max_stake < self.min_stake {
            return Err(EngineError::InvalidAmount);
        }

        Ok(())
    }
}

/// Checks that the tiers start at zero, are sorted by name and APY, and that every
/// tier begins right after the previous one ends. Only the last tier is unbounded.
fn validate_tiers(tiers: &Vec<Tier>) -> Result<(), EngineError> {
    let first = tiers.first().ok_or(EngineError::InconsistentTierBounds)?;
    if first.min_amount != 0 {
        return Err(EngineError::InconsistentTierBounds);
    }

    let mut previous: Option<Tier> = None;
    for tier in tiers.iter() {
        validate_bps(tier.apy_bps)?;

        if let Some(prev) = previous {
            let prev_max = prev.max_amount.ok_or(EngineError::InconsistentTierBounds)?;
            if prev.name >= tier.name
                || prev.apy_bps > tier.apy_bps
                || prev_max < prev.min_amount
                || prev_max.checked_add(1) != Some(tier.min_amount)
            {
                return Err(EngineError::InconsistentTierBounds);
            }
        }
        previous = Some(tier);
    }

    match previous {
        Some(Tier {
            max_amount: None, ..
        }) => Ok(()),
        _ => Err(EngineError::InconsistentTierBounds),
    }
}

/// Bounds are given in whole units. The upper bound covers every fraction of its last
/// unit, so 999 means up to 999.9999999.
fn tier(
    env: &Env,
    name: TierName,
    (min, max): (i128, Option<i128>),
    apy_bps: i64,
    color: &str,
    benefits: &[&str],
) -> Tier {
    let mut list = Vec::new(env);
    for benefit in benefits {
        list.push_back(String::from_str(env, benefit));
    }

    Tier {
        name,
        min_amount: units(min),
        max_amount: max.map(|max| units(max + 1) - 1),
        apy_bps,
        staking_enabled: name != TierName::Basic,
        color: String::from_str(env, color),
        benefits: list,
    }
}

pub fn default_tiers(env: &Env) -> Vec<Tier> {
    let mut tiers = Vec::new(env);
    tiers.push_back(tier(
        env,
        TierName::Basic,
        (0, Some(999)),
        0,
        "#9CA3AF",
        &["Wallet Connection", "Platform Access", "Basic Support"],
    ));
    tiers.push_back(tier(
        env,
        TierName::Club,
        (1_000, Some(9_999)),
        800,
        "#10B981",
        &["8% APY", "Monthly Interest", "Community Access", "Email Support"],
    ));
    tiers.push_back(tier(
        env,
        TierName::Premium,
        (10_000, Some(49_999)),
        1_200,
        "#3B82F6",
        &["12% APY", "Monthly Interest", "Priority Support", "Advanced Analytics"],
    ));
    tiers.push_back(tier(
        env,
        TierName::Vip,
        (50_000, Some(199_999)),
        1_500,
        "#8B5CF6",
        &["15% APY", "Monthly Interest", "VIP Support", "Exclusive Events"],
    ));
    tiers.push_back(tier(
        env,
        TierName::Elite,
        (200_000, None),
        2_000,
        "#F59E0B",
        &[
            "20% APY",
            "Monthly Interest",
            "Personal Manager",
            "Early Access",
            "Premium Events",
        ],
    ));
    tiers
}
