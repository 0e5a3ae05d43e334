use soroban_sdk::{contracttype, log, panic_with_error, Address, Env, Vec};
use vonvault::{
    ttl::{
        INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL, PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    },
    types::StakePosition,
    EngineConfig,
};

use crate::error::ContractError;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Config,
    Initialized,
    NextPositionId,
    /// Open positions of a member, active or matured
    Positions(Address),
    /// Claimed positions of a member, in claim order
    History(Address),
}

pub fn get_config(env: &Env) -> Result<EngineConfig, ContractError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::ConfigNotSet)?;
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);

    Ok(config)
}

pub fn save_config(env: &Env, config: &EngineConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

fn load_positions(env: &Env, key: &DataKey) -> Vec<StakePosition> {
    let positions = env
        .storage()
        .persistent()
        .get(key)
        .unwrap_or_else(|| Vec::new(env));
    env.storage().persistent().has(key).then(|| {
        env.storage().persistent().extend_ttl(
            key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    });

    positions
}

fn store_positions(env: &Env, key: &DataKey, positions: &Vec<StakePosition>) {
    if positions.is_empty() {
        env.storage().persistent().remove(key);
        return;
    }
    env.storage().persistent().set(key, positions);
    env.storage().persistent().extend_ttl(
        key,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}

/// Open positions of `user` in creation order, empty for a member that never staked.
pub fn get_positions(env: &Env, user: &Address) -> Vec<StakePosition> {
    load_positions(env, &DataKey::Positions(user.clone()))
}

pub fn save_positions(env: &Env, user: &Address, positions: &Vec<StakePosition>) {
    store_positions(env, &DataKey::Positions(user.clone()), positions);
}

pub fn get_history(env: &Env, user: &Address) -> Vec<StakePosition> {
    load_positions(env, &DataKey::History(user.clone()))
}

pub fn save_history(env: &Env, user: &Address, history: &Vec<StakePosition>) {
    store_positions(env, &DataKey::History(user.clone()), history);
}

/// Every position of `user`: open ones first, then the claimed ones.
pub fn get_all_positions(env: &Env, user: &Address) -> Vec<StakePosition> {
    let mut positions = get_positions(env, user);
    positions.append(&get_history(env, user));
    positions
}

pub mod utils {
    use super::*;

    pub fn is_initialized(e: &Env) -> bool {
        e.storage()
            .instance()
            .get(&DataKey::Initialized)
            .unwrap_or(false)
    }

    pub fn set_initialized(e: &Env) {
        e.storage().instance().set(&DataKey::Initialized, &true);
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
    }

    pub fn save_admin(e: &Env, address: &Address) {
        e.storage().instance().set(&DataKey::Admin, address);
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
    }

    pub fn get_admin(e: &Env) -> Address {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);

        e.storage().instance().get(&DataKey::Admin).unwrap_or_else(|| {
            log!(e, "Staking: Admin not set");
            panic_with_error!(&e, ContractError::AdminNotSet)
        })
    }

    /// Hands out position ids, unique across all members and never reused.
    pub fn next_position_id(e: &Env) -> u64 {
        let id = e
            .storage()
            .instance()
            .get(&DataKey::NextPositionId)
            .unwrap_or(1u64);
        e.storage()
            .instance()
            .set(&DataKey::NextPositionId, &(id + 1));
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::VonVaultStaking;
    use soroban_sdk::{testutils::Address as _, vec};
    use vonvault::types::{PositionStatus, TierName, Token};

    #[test]
    #[should_panic(expected = "Error(Contract, #601)")]
    fn get_admin_before_initialize() {
        let env = Env::default();
        let contract = env.register(VonVaultStaking, ());

        env.as_contract(&contract, || {
            utils::get_admin(&env);
        });
    }

    #[test]
    fn config_not_set() {
        let env = Env::default();
        let contract = env.register(VonVaultStaking, ());

        env.as_contract(&contract, || {
            assert_eq!(get_config(&env), Err(ContractError::ConfigNotSet));
        });
    }

    #[test]
    fn position_ids_are_sequential() {
        let env = Env::default();
        let contract = env.register(VonVaultStaking, ());

        env.as_contract(&contract, || {
            assert_eq!(utils::next_position_id(&env), 1);
            assert_eq!(utils::next_position_id(&env), 2);
            assert_eq!(utils::next_position_id(&env), 3);
        });
    }

    #[test]
    fn unknown_member_has_no_positions() {
        let env = Env::default();
        let contract = env.register(VonVaultStaking, ());

        env.as_contract(&contract, || {
            let user = Address::generate(&env);
            assert!(get_positions(&env, &user).is_empty());
            assert!(get_history(&env, &user).is_empty());
            assert!(get_all_positions(&env, &user).is_empty());
        });
    }

    #[test]
    fn emptied_position_list_is_removed() {
        let env = Env::default();
        let contract = env.register(VonVaultStaking, ());

        env.as_contract(&contract, || {
            let user = Address::generate(&env);
            let key = DataKey::Positions(user.clone());
            let position = StakePosition {
                id: 1,
                principal: 10_000_000_000,
                service_fee: 75_000_000,
                token: Token::Usdc,
                tier: TierName::Club,
                apy_bps: 800,
                start_date: 0,
                maturity_date: 365 * 86_400,
                status: PositionStatus::Active,
            };

            save_positions(&env, &user, &vec![&env, position]);
            assert!(env.storage().persistent().has(&key));

            save_positions(&env, &user, &Vec::new(&env));
            assert!(!env.storage().persistent().has(&key));
        });
    }
}
