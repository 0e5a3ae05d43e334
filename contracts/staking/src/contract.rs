use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env, Vec};
use vonvault::{
    fees::{self, StakingFee, SwapFee},
    portfolio::{
        self, MonthlyProjection, Portfolio, PortfolioAnalytics, Reconciliation, TokenShare,
    },
    stake::{self, StakeQuote},
    tiers::{self, TierProgress},
    types::{Network, PositionStatus, StakePosition, Tier, TierName, Token},
    utils::checked_add,
    yields::{self, YieldProjection},
    EngineConfig,
};

use crate::{
    error::ContractError,
    storage::{
        get_all_positions, get_config, get_history, get_positions, save_config, save_history,
        save_positions,
        utils::{get_admin, is_initialized, next_position_id, save_admin, set_initialized},
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "VonVault membership tiers, yield projections and stake registry"
);

#[contract]
pub struct VonVaultStaking;

pub trait VonVaultStakingTrait {
    // Installs the admin and the engine config. `None` installs the default tier table
    // and fee schedule.
    fn initialize(
        env: Env,
        admin: Address,
        config: Option<EngineConfig>,
    ) -> Result<(), ContractError>;

    fn update_config(env: Env, config: EngineConfig) -> Result<(), ContractError>;

    fn update_admin(env: Env, new_admin: Address) -> Result<Address, ContractError>;

    // Opens a position at the APY of the tier the sender reaches with this stake.
    fn create_stake(
        env: Env,
        sender: Address,
        token: Token,
        amount: i128,
    ) -> Result<StakePosition, ContractError>;

    // Moves a matured position to the member's history and returns the amount invested
    // plus earnings.
    fn claim(env: Env, sender: Address, position_id: u64) -> Result<i128, ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Result<EngineConfig, ContractError>;

    fn query_admin(env: Env) -> Address;

    fn query_tiers(env: Env) -> Result<Vec<Tier>, ContractError>;

    fn resolve_tier(env: Env, principal: i128) -> Result<Tier, ContractError>;

    fn progress_to_next_tier(env: Env, principal: i128) -> Result<TierProgress, ContractError>;

    // Projection over the configured term
    fn project_yield(
        env: Env,
        principal: i128,
        apy_bps: i64,
        days_elapsed: u64,
    ) -> Result<YieldProjection, ContractError>;

    fn calculate_staking_fee(env: Env, gross: i128) -> Result<StakingFee, ContractError>;

    fn calculate_swap_fee(
        env: Env,
        gross: i128,
        tier: TierName,
        network: Network,
    ) -> Result<SwapFee, ContractError>;

    // Preview of `create_stake` for the given member, nothing is stored.
    fn quote_stake(env: Env, user: Address, amount: i128) -> Result<StakeQuote, ContractError>;

    // Aggregates positions supplied by the caller, e.g. records kept off chain.
    fn aggregate(env: Env, positions: Vec<StakePosition>) -> Result<Portfolio, ContractError>;

    // Open and claimed positions, optionally only those with the given status.
    fn query_positions(
        env: Env,
        user: Address,
        status: Option<PositionStatus>,
    ) -> Vec<StakePosition>;

    fn query_portfolio(env: Env, user: Address) -> Result<Portfolio, ContractError>;

    fn query_monthly_projections(
        env: Env,
        user: Address,
        months: u32,
    ) -> Result<Vec<MonthlyProjection>, ContractError>;

    fn query_staked_by_token(env: Env, user: Address) -> Result<Vec<TokenShare>, ContractError>;

    fn query_analytics(env: Env, user: Address) -> Result<PortfolioAnalytics, ContractError>;

    // Checks totals reported by an off chain aggregator against the stored positions.
    fn reconcile(
        env: Env,
        user: Address,
        reported_staked: i128,
        reported_accrued: i128,
    ) -> Result<Reconciliation, ContractError>;
}

#[contractimpl]
impl VonVaultStakingTrait for VonVaultStaking {
    fn initialize(
        env: Env,
        admin: Address,
        config: Option<EngineConfig>,
    ) -> Result<(), ContractError> {
        if is_initialized(&env) {
            log!(
                &env,
                "Staking: Initialize: initializing contract twice is not allowed"
            );
            return Err(ContractError::AlreadyInitialized);
        }

        let config = config.unwrap_or_else(|| EngineConfig::with_defaults(&env));
        if let Err(err) = config.validate() {
            log!(&env, "Staking: Initialize: invalid engine config");
            return Err(err.into());
        }

        set_initialized(&env);
        save_admin(&env, &admin);
        save_config(&env, &config);

        env.events().publish(("initialize", "admin"), &admin);

        Ok(())
    }

    fn update_config(env: Env, config: EngineConfig) -> Result<(), ContractError> {
        let admin = get_admin(&env);
        admin.require_auth();

        if let Err(err) = config.validate() {
            log!(&env, "Staking: Update config: invalid engine config");
            return Err(err.into());
        }
        save_config(&env, &config);

        env.events()
            .publish(("update_config", "tiers"), config.tiers.len());
        env.events()
            .publish(("update_config", "term_days"), config.term_days);

        Ok(())
    }

    fn update_admin(env: Env, new_admin: Address) -> Result<Address, ContractError> {
        let admin = get_admin(&env);
        admin.require_auth();

        if admin == new_admin {
            log!(&env, "Staking: Update admin: new admin is the current admin");
            return Err(ContractError::SameAdmin);
        }
        save_admin(&env, &new_admin);

        env.events()
            .publish(("update_admin", "previous_admin"), admin);
        env.events()
            .publish(("update_admin", "new_admin"), &new_admin);

        Ok(new_admin)
    }

    fn create_stake(
        env: Env,
        sender: Address,
        token: Token,
        amount: i128,
    ) -> Result<StakePosition, ContractError> {
        sender.require_auth();

        let config = get_config(&env)?;
        let now = env.ledger().timestamp();
        let mut positions = get_positions(&env, &sender);
        let before = portfolio::aggregate(&config, &positions, now)?;

        let quote = stake::quote_stake(&config, before.total_staked, amount, now).map_err(
            |err| {
                log!(
                    &env,
                    "Staking: Create stake: stake of {} rejected, {} already staked",
                    amount,
                    before.total_staked
                );
                ContractError::from(err)
            },
        )?;

        let position = quote
            .clone()
            .into_position(next_position_id(&env), token);
        positions.push_back(position.clone());
        save_positions(&env, &sender, &positions);

        env.events().publish(("create_stake", "user"), &sender);
        env.events().publish(("create_stake", "token"), token);
        env.events().publish(("create_stake", "amount"), amount);
        env.events()
            .publish(("create_stake", "service_fee"), quote.service_fee);
        env.events()
            .publish(("create_stake", "position_id"), position.id);
        if quote.tier != before.current_tier {
            env.events().publish(("tier_changed", "user"), &sender);
            env.events()
                .publish(("tier_changed", "tier"), quote.tier);
        }

        Ok(position)
    }

    fn claim(env: Env, sender: Address, position_id: u64) -> Result<i128, ContractError> {
        sender.require_auth();

        let now = env.ledger().timestamp();
        let mut positions = get_positions(&env, &sender);
        let Some(index) = positions.iter().position(|p| p.id == position_id) else {
            if get_history(&env, &sender).iter().any(|p| p.id == position_id) {
                log!(
                    &env,
                    "Staking: Claim: position {} was already claimed",
                    position_id
                );
                return Err(ContractError::PositionAlreadyClaimed);
            }
            log!(
                &env,
                "Staking: Claim: position {} not found for the sender",
                position_id
            );
            return Err(ContractError::PositionNotFound);
        };
        let index = index as u32;
        let position = positions
            .get(index)
            .ok_or(ContractError::PositionNotFound)?;

        match position.status_at(now) {
            PositionStatus::Active => {
                log!(
                    &env,
                    "Staking: Claim: position {} matures at {}",
                    position_id,
                    position.maturity_date
                );
                return Err(ContractError::PositionNotMatured);
            }
            PositionStatus::Claimed => {
                log!(
                    &env,
                    "Staking: Claim: position {} was already claimed",
                    position_id
                );
                return Err(ContractError::PositionAlreadyClaimed);
            }
            PositionStatus::Matured => {}
        }

        let projection = yields::project_position(&position, now)?;
        let claimed = checked_add(position.invested()?, projection.accrued_interest)?;

        positions.remove(index);
        save_positions(&env, &sender, &positions);
        let mut history = get_history(&env, &sender);
        history.push_back(StakePosition {
            status: PositionStatus::Claimed,
            ..position
        });
        save_history(&env, &sender, &history);

        env.events().publish(("claim", "user"), &sender);
        env.events().publish(("claim", "position_id"), position_id);
        env.events().publish(("claim", "amount"), claimed);

        Ok(claimed)
    }

    fn query_config(env: Env) -> Result<EngineConfig, ContractError> {
        get_config(&env)
    }

    fn query_admin(env: Env) -> Address {
        get_admin(&env)
    }

    fn query_tiers(env: Env) -> Result<Vec<Tier>, ContractError> {
        Ok(get_config(&env)?.tiers)
    }

    fn resolve_tier(env: Env, principal: i128) -> Result<Tier, ContractError> {
        let config = get_config(&env)?;
        Ok(tiers::resolve_tier(&config, principal)?)
    }

    fn progress_to_next_tier(env: Env, principal: i128) -> Result<TierProgress, ContractError> {
        let config = get_config(&env)?;
        Ok(tiers::tier_progress(&config, principal)?)
    }

    fn project_yield(
        env: Env,
        principal: i128,
        apy_bps: i64,
        days_elapsed: u64,
    ) -> Result<YieldProjection, ContractError> {
        let config = get_config(&env)?;
        Ok(yields::project_yield(
            principal,
            apy_bps,
            days_elapsed,
            config.term_days,
        )?)
    }

    fn calculate_staking_fee(env: Env, gross: i128) -> Result<StakingFee, ContractError> {
        let config = get_config(&env)?;
        Ok(fees::calculate_staking_fee(&config, gross)?)
    }

    fn calculate_swap_fee(
        env: Env,
        gross: i128,
        tier: TierName,
        network: Network,
    ) -> Result<SwapFee, ContractError> {
        let config = get_config(&env)?;
        fees::calculate_swap_fee(&config, gross, tier, network).map_err(|err| {
            log!(
                &env,
                "Staking: Swap fee: no quote for {} on the requested tier and network",
                gross
            );
            err.into()
        })
    }

    fn quote_stake(env: Env, user: Address, amount: i128) -> Result<StakeQuote, ContractError> {
        let config = get_config(&env)?;
        let now = env.ledger().timestamp();
        let positions = get_positions(&env, &user);
        let current = portfolio::aggregate(&config, &positions, now)?;

        Ok(stake::quote_stake(
            &config,
            current.total_staked,
            amount,
            now,
        )?)
    }

    fn aggregate(env: Env, positions: Vec<StakePosition>) -> Result<Portfolio, ContractError> {
        let config = get_config(&env)?;
        Ok(portfolio::aggregate(
            &config,
            &positions,
            env.ledger().timestamp(),
        )?)
    }

    fn query_positions(
        env: Env,
        user: Address,
        status: Option<PositionStatus>,
    ) -> Vec<StakePosition> {
        portfolio::history(
            &get_all_positions(&env, &user),
            env.ledger().timestamp(),
            status,
        )
    }

    fn query_portfolio(env: Env, user: Address) -> Result<Portfolio, ContractError> {
        let config = get_config(&env)?;
        let positions = get_all_positions(&env, &user);

        Ok(portfolio::aggregate(
            &config,
            &positions,
            env.ledger().timestamp(),
        )?)
    }

    fn query_monthly_projections(
        env: Env,
        user: Address,
        months: u32,
    ) -> Result<Vec<MonthlyProjection>, ContractError> {
        let positions = get_positions(&env, &user);
        Ok(portfolio::monthly_projections(
            &positions,
            env.ledger().timestamp(),
            months,
        )?)
    }

    fn query_staked_by_token(env: Env, user: Address) -> Result<Vec<TokenShare>, ContractError> {
        let positions = get_positions(&env, &user);
        Ok(portfolio::staked_by_token(
            &positions,
            env.ledger().timestamp(),
        )?)
    }

    fn query_analytics(env: Env, user: Address) -> Result<PortfolioAnalytics, ContractError> {
        let positions = get_all_positions(&env, &user);
        Ok(portfolio::analytics(&positions, env.ledger().timestamp())?)
    }

    fn reconcile(
        env: Env,
        user: Address,
        reported_staked: i128,
        reported_accrued: i128,
    ) -> Result<Reconciliation, ContractError> {
        let config = get_config(&env)?;
        let positions = get_all_positions(&env, &user);

        let reconciliation = portfolio::reconcile(
            &config,
            &positions,
            env.ledger().timestamp(),
            reported_staked,
            reported_accrued,
        )?;
        if !reconciliation.consistent {
            log!(
                &env,
                "Staking: Reconcile: reported totals differ by {} staked and {} accrued",
                reconciliation.staked_diff,
                reconciliation.accrued_diff
            );
        }

        Ok(reconciliation)
    }
}
