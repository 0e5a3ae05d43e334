use soroban_sdk::{testutils::Address as _, Address};

use super::setup::{default_env, deploy_staking_contract};
use crate::error::ContractError;

#[test]
fn update_admin_successfully() {
    let env = default_env();
    let admin = Address::generate(&env);
    let new_admin = Address::generate(&env);

    let staking = deploy_staking_contract(&env, admin.clone(), None);

    assert_eq!(staking.update_admin(&new_admin), new_admin);
    assert_eq!(staking.query_admin(), new_admin);
}

#[test]
fn update_admin_fails_when_new_admin_is_same_as_current() {
    let env = default_env();
    let admin = Address::generate(&env);

    let staking = deploy_staking_contract(&env, admin.clone(), None);

    assert_eq!(
        staking.try_update_admin(&admin),
        Err(Ok(ContractError::SameAdmin))
    );
    assert_eq!(staking.query_admin(), admin);
}

#[test]
#[should_panic(expected = "Error(Auth, InvalidAction)")]
fn update_admin_unauthorized() {
    let env = soroban_sdk::Env::default();
    let staking = deploy_staking_contract(&env, None, None);

    staking.update_admin(&Address::generate(&env));
}
