use soroban_sdk::contracttype;
use vonvault_decimal::{Decimal, Error};

use crate::{
    config::EngineConfig,
    constants::MAX_BPS,
    error::EngineError,
    types::{Tier, TierName},
};

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NextTier {
    /// Top tier reached
    Maxed,
    Tier(TierName),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierProgress {
    pub current_tier: TierName,
    pub next_tier: NextTier,
    pub amount_remaining: i128,
    pub percent_complete_bps: i64,
}

/// Returns the tier a total principal belongs to.
///
/// Tiers are scanned from the highest threshold down, so an amount sitting exactly on a
/// boundary lands in the higher tier.
pub fn resolve_tier(config: &EngineConfig, principal: i128) -> Result<Tier, EngineError> {
    if principal < 0 {
        return Err(EngineError::InvalidAmount);
    }

    for index in (0..config.tiers.len()).rev() {
        if let Some(tier) = config.tiers.get(index) {
            if tier.min_amount <= principal {
                return Ok(tier);
            }
        }
    }

    Err(EngineError::InconsistentTierBounds)
}

pub fn tier_by_name(config: &EngineConfig, name: TierName) -> Result<Tier, EngineError> {
    config
        .tiers
        .iter()
        .find(|tier| tier.name == name)
        .ok_or(EngineError::UnknownRateKey)
}

pub fn next_tier(config: &EngineConfig, current: &Tier) -> Option<Tier> {
    config
        .tiers
        .iter()
        .find(|tier| tier.min_amount > current.min_amount)
}

pub fn progress_to_next_tier(
    config: &EngineConfig,
    principal: i128,
    current: &Tier,
) -> Result<TierProgress, EngineError> {
    if principal < 0 {
        return Err(EngineError::InvalidAmount);
    }

    let Some(next) = next_tier(config, current) else {
        return Ok(TierProgress {
            current_tier: current.name,
            next_tier: NextTier::Maxed,
            amount_remaining: 0,
            percent_complete_bps: MAX_BPS,
        });
    };

    let band = next.min_amount - current.min_amount;
    let progressed = (principal - current.min_amount).clamp(0, band);
    let percent_complete =
        Decimal::checked_from_ratio(progressed, band).map_err(|err| match err {
            Error::DivideByZero => EngineError::InconsistentTierBounds,
            Error::Overflow => EngineError::InvalidAmount,
        })?;

    Ok(TierProgress {
        current_tier: current.name,
        next_tier: NextTier::Tier(next.name),
        amount_remaining: (next.min_amount - principal).max(0),
        percent_complete_bps: percent_complete.to_i128_with_precision(4) as i64,
    })
}

/// Resolves the tier of `principal` and how far it is from the next one.
pub fn tier_progress(config: &EngineConfig, principal: i128) -> Result<TierProgress, EngineError> {
    let current = resolve_tier(config, principal)?;
    progress_to_next_tier(config, principal, &current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::units;
    use pretty_assertions::assert_eq;
    use soroban_sdk::Env;
    use test_case::test_case;

    #[test_case(0, TierName::Basic; "zero is basic")]
    #[test_case(999, TierName::Basic; "top of basic")]
    #[test_case(1_000, TierName::Club; "boundary belongs to the higher tier")]
    #[test_case(9_999, TierName::Club; "top of club")]
    #[test_case(10_000, TierName::Premium; "premium boundary")]
    #[test_case(49_999, TierName::Premium; "top of premium")]
    #[test_case(50_000, TierName::Vip; "vip boundary")]
    #[test_case(199_999, TierName::Vip; "top of vip")]
    #[test_case(200_000, TierName::Elite; "elite boundary")]
    #[test_case(250_001, TierName::Elite; "elite has no upper bound")]
    fn resolves_tier_by_amount(amount: i128, expected: TierName) {
        let env = Env::default();
        let config = EngineConfig::with_defaults(&env);

        assert_eq!(resolve_tier(&config, units(amount)).unwrap().name, expected);
    }

    #[test]
    fn fractional_amount_below_boundary_stays_in_lower_tier() {
        let env = Env::default();
        let config = EngineConfig::with_defaults(&env);

        let tier = resolve_tier(&config, units(1_000) - 1).unwrap();
        assert_eq!(tier.name, TierName::Basic);
    }

    #[test]
    fn negative_principal_is_invalid() {
        let env = Env::default();
        let config = EngineConfig::with_defaults(&env);

        assert_eq!(resolve_tier(&config, -1), Err(EngineError::InvalidAmount));
        assert_eq!(tier_progress(&config, -1), Err(EngineError::InvalidAmount));
    }

    #[test]
    fn every_amount_resolves_to_a_tier_containing_it() {
        let env = Env::default();
        env.cost_estimate().budget().reset_unlimited();
        let config = EngineConfig::with_defaults(&env);

        let mut amount = 0i128;
        while amount <= units(300_000) {
            let tier = resolve_tier(&config, amount).unwrap();
            assert!(tier.contains(amount));
            amount += units(1_000) + 1;
        }
    }

    #[test]
    fn apy_never_decreases_with_principal() {
        let env = Env::default();
        env.cost_estimate().budget().reset_unlimited();
        let config = EngineConfig::with_defaults(&env);

        let mut previous_apy = 0i64;
        let mut amount = 0i128;
        while amount <= units(300_000) {
            let apy = resolve_tier(&config, amount).unwrap().apy_bps;
            assert!(apy >= previous_apy);
            previous_apy = apy;
            amount += units(2_500);
        }
    }

    #[test]
    fn lookup_by_name() {
        let env = Env::default();
        let mut config = EngineConfig::with_defaults(&env);

        assert_eq!(
            tier_by_name(&config, TierName::Vip).unwrap().apy_bps,
            1_500
        );

        config.tiers.pop_back();
        assert_eq!(
            tier_by_name(&config, TierName::Elite),
            Err(EngineError::UnknownRateKey)
        );
    }

    #[test]
    fn progress_within_vip_band() {
        let env = Env::default();
        let config = EngineConfig::with_defaults(&env);

        assert_eq!(
            tier_progress(&config, units(75_500)).unwrap(),
            TierProgress {
                current_tier: TierName::Vip,
                next_tier: NextTier::Tier(TierName::Elite),
                amount_remaining: units(124_500),
                percent_complete_bps: 1_700,
            }
        );
    }

    #[test]
    fn progress_at_start_of_band() {
        let env = Env::default();
        let config = EngineConfig::with_defaults(&env);

        assert_eq!(
            tier_progress(&config, 0).unwrap(),
            TierProgress {
                current_tier: TierName::Basic,
                next_tier: NextTier::Tier(TierName::Club),
                amount_remaining: units(1_000),
                percent_complete_bps: 0,
            }
        );
    }

    #[test]
    fn top_tier_is_maxed_out() {
        let env = Env::default();
        let config = EngineConfig::with_defaults(&env);

        assert_eq!(
            tier_progress(&config, units(1_000_000)).unwrap(),
            TierProgress {
                current_tier: TierName::Elite,
                next_tier: NextTier::Maxed,
                amount_remaining: 0,
                percent_complete_bps: 10_000,
            }
        );
    }

    #[test]
    fn progress_of_large_principal_in_top_tier() {
        let env = Env::default();
        let config = EngineConfig::with_defaults(&env);

        let progress = tier_progress(&config, i128::MAX).unwrap();
        assert_eq!(progress.next_tier, NextTier::Maxed);
        assert_eq!(progress.percent_complete_bps, MAX_BPS);
    }

    #[test]
    fn progress_is_clamped_for_mismatched_tier() {
        let env = Env::default();
        let config = EngineConfig::with_defaults(&env);
        let club = tier_by_name(&config, TierName::Club).unwrap();

        let progress = progress_to_next_tier(&config, units(20_000), &club).unwrap();
        assert_eq!(progress.percent_complete_bps, 10_000);
        assert_eq!(progress.amount_remaining, 0);

        let progress = progress_to_next_tier(&config, units(500), &club).unwrap();
        assert_eq!(progress.percent_complete_bps, 0);
    }
}
