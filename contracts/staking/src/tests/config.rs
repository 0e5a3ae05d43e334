use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, Address, Env};
use vonvault::{
    types::{Network, TierName},
    utils::units,
    EngineConfig,
};

use super::setup::{default_env, deploy_staking_contract};
use crate::{
    contract::{VonVaultStaking, VonVaultStakingClient},
    error::ContractError,
};

#[test]
fn initialize_installs_the_default_table() {
    let env = default_env();
    let admin = Address::generate(&env);

    let staking = deploy_staking_contract(&env, admin.clone(), None);

    assert_eq!(staking.query_config(), EngineConfig::with_defaults(&env));
    assert_eq!(staking.query_admin(), admin);
    assert_eq!(staking.query_tiers().len(), 5);
}

#[test]
fn initialize_with_custom_config() {
    let env = default_env();
    let mut config = EngineConfig::with_defaults(&env);
    config.term_days = 180;
    config.staking_fee_bps = 50;

    let staking = deploy_staking_contract(&env, None, Some(config.clone()));

    assert_eq!(staking.query_config(), config);
}

#[test]
fn initializing_twice_is_not_allowed() {
    let env = default_env();
    let admin = Address::generate(&env);

    let staking = deploy_staking_contract(&env, admin.clone(), None);

    assert_eq!(
        staking.try_initialize(&admin, &None),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn initialize_rejects_inconsistent_tiers() {
    let env = default_env();
    let mut config = EngineConfig::with_defaults(&env);
    let mut vip = config.tiers.get(3).unwrap();
    vip.min_amount = units(60_000);
    config.tiers.set(3, vip);

    let staking = VonVaultStakingClient::new(&env, &env.register(VonVaultStaking, ()));

    assert_eq!(
        staking.try_initialize(&Address::generate(&env), &Some(config)),
        Err(Ok(ContractError::InconsistentTierBounds))
    );
    assert_eq!(
        staking.try_query_config(),
        Err(Ok(ContractError::ConfigNotSet))
    );
}

#[test]
fn update_config_replaces_rates() {
    let env = default_env();
    let staking = deploy_staking_contract(&env, None, None);

    let mut config = EngineConfig::with_defaults(&env);
    config.swap_fee_bps_by_tier.set(TierName::Vip, 30);
    config.gas_estimate_by_network.set(Network::Ethereum, units(20));
    staking.update_config(&config);

    let swap = staking.calculate_swap_fee(&units(1_000), &TierName::Vip, &Network::Ethereum);
    assert_eq!(swap.tier_fee, units(3));
    assert_eq!(swap.gas_fee, units(20));
    assert_eq!(staking.query_config(), config);
}

#[test]
fn update_config_rejects_invalid_bps() {
    let env = default_env();
    let staking = deploy_staking_contract(&env, None, None);

    let mut config = EngineConfig::with_defaults(&env);
    config.staking_fee_bps = 10_001;

    assert_eq!(
        staking.try_update_config(&config),
        Err(Ok(ContractError::InvalidBps))
    );
    assert_eq!(staking.query_config().staking_fee_bps, 75);
}

#[test]
#[should_panic(expected = "Error(Auth, InvalidAction)")]
fn update_config_unauthorized() {
    let env = Env::default();
    let staking = deploy_staking_contract(&env, None, None);

    let mut config = EngineConfig::with_defaults(&env);
    config.term_days = 30;
    staking.update_config(&config);
}
