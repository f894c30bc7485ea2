use soroban_sdk::{contract, contractimpl, contractmeta, log, panic_with_error, Address, Env, Vec};
use staking::{
    constants::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD},
    error::ErrorCode,
    types::{ConfigEpoch, RewardParams, StakeSnapshot},
    validate_bps,
};

use crate::{
    controller,
    events::StakingFactoryEvents,
    factory::StakingFactoryTrait,
    history,
    msg::{ClaimedReward, ConfigResponse, MemberResponse},
    storage::{
        get_config, get_member, get_pending_withdrawal, get_pool, is_initialized, save_config,
        set_initialized, Config, Member, PendingWithdrawal, Pool,
    },
};

contractmeta!(
    key = "Description",
    val = "Multi-tenant staking pools with epoch-replayed rewards"
);

#[contract]
pub struct StakingFactory;

#[contractimpl]
impl StakingFactoryTrait for StakingFactory {
    fn initialize(env: Env, admin: Address, fee_vault: Address, protocol_fee_bps: i64) {
        if is_initialized(&env) {
            log!(
                &env,
                "Staking Factory: Initialize: initializing contract twice is not allowed"
            );
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        validate_bps!(protocol_fee_bps);

        set_initialized(&env);

        save_config(
            &env,
            Config {
                admin: admin.clone(),
                fee_vault: fee_vault.clone(),
                protocol_fee_bps,
                pools_count: 0,
            },
        );

        StakingFactoryEvents::initialize(&env, admin, fee_vault, protocol_fee_bps);
    }

    fn update_config(env: Env, fee_vault: Option<Address>, protocol_fee_bps: Option<i64>) {
        let mut config = match get_config(&env) {
            Ok(config) => config,
            Err(error) => panic_with_error!(&env, error),
        };
        config.admin.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        if let Some(fee_vault) = fee_vault {
            config.fee_vault = fee_vault;
        }
        if let Some(protocol_fee_bps) = protocol_fee_bps {
            validate_bps!(protocol_fee_bps);
            config.protocol_fee_bps = protocol_fee_bps;
        }

        save_config(&env, config);
    }

    // ################################################################
    //                             Pools
    // ################################################################

    fn create_pool(
        env: Env,
        authority: Address,
        stake_asset: Address,
        reward_asset: Address,
        unstake_timelock: u64,
        reward_params: RewardParams,
    ) -> Result<u32, ErrorCode> {
        authority.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::pool::create_pool(
            &env,
            authority,
            stake_asset,
            reward_asset,
            unstake_timelock,
            reward_params,
        )
    }

    fn change_config(
        env: Env,
        pool_id: u32,
        sender: Address,
        reward_params: RewardParams,
    ) -> Result<(), ErrorCode> {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::pool::change_config(&env, pool_id, sender, reward_params)
    }

    fn update_unstake_timelock(
        env: Env,
        pool_id: u32,
        sender: Address,
        unstake_timelock: u64,
    ) -> Result<(), ErrorCode> {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::pool::update_unstake_timelock(&env, pool_id, sender, unstake_timelock)
    }

    fn fund_rewards(
        env: Env,
        pool_id: u32,
        sender: Address,
        amount: i128,
    ) -> Result<(), ErrorCode> {
        sender.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::pool::fund_rewards(&env, pool_id, sender, amount)
    }

    // ################################################################
    //                             Members
    // ################################################################

    fn register_member(env: Env, pool_id: u32, beneficiary: Address) -> Result<(), ErrorCode> {
        beneficiary.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::member::register_member(&env, pool_id, beneficiary)
    }

    fn deposit(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), ErrorCode> {
        beneficiary.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::member::deposit(&env, pool_id, beneficiary, amount)
    }

    fn stake(env: Env, pool_id: u32, beneficiary: Address, amount: i128) -> Result<(), ErrorCode> {
        beneficiary.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::member::stake(&env, pool_id, beneficiary, amount)
    }

    fn claim_reward(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
    ) -> Result<ClaimedReward, ErrorCode> {
        beneficiary.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::member::claim_reward(&env, pool_id, beneficiary)
    }

    fn start_unstake(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), ErrorCode> {
        beneficiary.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::member::start_unstake(&env, pool_id, beneficiary, amount)
    }

    fn end_unstake(env: Env, pool_id: u32, beneficiary: Address) -> Result<(), ErrorCode> {
        beneficiary.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::member::end_unstake(&env, pool_id, beneficiary)
    }

    fn withdraw(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), ErrorCode> {
        beneficiary.require_auth();
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        controller::member::withdraw(&env, pool_id, beneficiary, amount)
    }

    // ################################################################
    //                             Queries
    // ################################################################

    fn query_config(env: Env) -> Result<ConfigResponse, ErrorCode> {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        Ok(ConfigResponse {
            config: get_config(&env)?,
        })
    }

    fn query_admin(env: Env) -> Result<Address, ErrorCode> {
        Ok(get_config(&env)?.admin)
    }

    fn query_pools_count(env: Env) -> Result<u32, ErrorCode> {
        Ok(get_config(&env)?.pools_count)
    }

    fn query_pool(env: Env, pool_id: u32) -> Result<Pool, ErrorCode> {
        get_pool(&env, pool_id)
    }

    fn query_all_pools(env: Env) -> Result<Vec<Pool>, ErrorCode> {
        let config = get_config(&env)?;

        let mut pools = Vec::new(&env);
        for pool_id in 0..config.pools_count {
            pools.push_back(get_pool(&env, pool_id)?);
        }

        Ok(pools)
    }

    fn query_config_history(env: Env, pool_id: u32) -> Result<Vec<ConfigEpoch>, ErrorCode> {
        let pool = get_pool(&env, pool_id)?;
        Ok(history::config_history(&env, &pool))
    }

    fn query_stakes_history(env: Env, pool_id: u32) -> Result<Vec<StakeSnapshot>, ErrorCode> {
        let pool = get_pool(&env, pool_id)?;
        Ok(history::stakes_history(&env, &pool))
    }

    fn query_member(env: Env, pool_id: u32, beneficiary: Address) -> Result<Member, ErrorCode> {
        get_member(&env, pool_id, &beneficiary)
    }

    fn query_member_info(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
    ) -> Result<MemberResponse, ErrorCode> {
        let pool = get_pool(&env, pool_id)?;
        let member = get_member(&env, pool_id, &beneficiary)?;
        let pending_reward =
            controller::reward::pending_reward(&env, &pool, &member, env.ledger().timestamp())?;

        Ok(MemberResponse {
            member,
            pending_reward,
        })
    }

    fn query_pending_withdrawal(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
    ) -> Option<PendingWithdrawal> {
        get_pending_withdrawal(&env, pool_id, &beneficiary)
    }

    fn query_pending_reward(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
    ) -> Result<i128, ErrorCode> {
        let pool = get_pool(&env, pool_id)?;
        let member = get_member(&env, pool_id, &beneficiary)?;

        controller::reward::pending_reward(&env, &pool, &member, env.ledger().timestamp())
    }
}
