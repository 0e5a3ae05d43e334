use soroban_sdk::contracttype;

use crate::{
    config::EngineConfig,
    error::EngineError,
    types::{Network, TierName},
    utils::{apply_bps, checked_add},
};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingFee {
    pub gross: i128,
    pub fee: i128,
    pub net: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapFee {
    pub gross: i128,
    pub tier: TierName,
    pub network: Network,
    pub tier_fee: i128,
    pub platform_fee: i128,
    pub gas_fee: i128,
    pub total_fees: i128,
    pub net: i128,
}

/// Flat service fee charged on every new stake, independent of the tier.
pub fn calculate_staking_fee(config: &EngineConfig, gross: i128) -> Result<StakingFee, EngineError> {
    if gross < 0 {
        return Err(EngineError::InvalidAmount);
    }

    let fee = apply_bps(gross, config.staking_fee_bps)?;
    Ok(StakingFee {
        gross,
        fee,
        net: gross - fee,
    })
}

/// Cost of converting a non-stakeable asset into a stakeable stablecoin: a tier
/// dependent rate, the platform partner rate and a flat gas estimate for the network.
///
/// Tiers and networks missing from the rate tables are rejected, there is no fallback
/// network.
pub fn calculate_swap_fee(
    config: &EngineConfig,
    gross: i128,
    tier: TierName,
    network: Network,
) -> Result<SwapFee, EngineError> {
    if gross < 0 {
        return Err(EngineError::InvalidAmount);
    }

    let tier_rate = config
        .swap_fee_bps_by_tier
        .get(tier)
        .ok_or(EngineError::UnknownRateKey)?;
    let gas_fee = config
        .gas_estimate_by_network
        .get(network)
        .ok_or(EngineError::UnknownRateKey)?;

    let tier_fee = apply_bps(gross, tier_rate)?;
    let platform_fee = apply_bps(gross, config.swap_platform_fee_bps)?;
    let total_fees = checked_add(checked_add(tier_fee, platform_fee)?, gas_fee)?;
    if total_fees > gross {
        return Err(EngineError::FeesExceedAmount);
    }

    Ok(SwapFee {
        gross,
        tier,
        network,
        tier_fee,
        platform_fee,
        gas_fee,
        total_fees,
        net: gross - total_fees,
    })
}
