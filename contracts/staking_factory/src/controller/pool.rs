use soroban_sdk::{log, Address, Env};
use staking::{
    error::{ErrorCode, StakingResult},
    math::safe_math::SafeMath,
    safe_increment,
    types::RewardParams,
    validate,
};

use crate::{
    events::StakingFactoryEvents,
    history,
    storage::{get_config, get_pool, save_config, save_pool, utils, Pool},
};

pub fn create_pool(
    env: &Env,
    authority: Address,
    stake_asset: Address,
    reward_asset: Address,
    unstake_timelock: u64,
    reward_params: RewardParams,
) -> StakingResult<u32> {
    let mut config = get_config(env)?;
    reward_params.validate_fields(env)?;

    let now = env.ledger().timestamp();
    let pool_id = config.pools_count;

    let mut pool = Pool {
        id: pool_id,
        authority: authority.clone(),
        stake_asset: stake_asset.clone(),
        reward_asset: reward_asset.clone(),
        unstake_timelock,
        reward_params,
        stakes_sum: 0,
        stake_vault: 0,
        reward_vault: 0,
        config_epochs: 0,
        stake_snapshots: 0,
        created_at: now,
    };
    history::push_config_epoch(env, &mut pool, reward_params, now)?;
    config.pools_count = pool_id.safe_add(1, env)?;

    save_pool(env, &pool);
    save_config(env, config);

    StakingFactoryEvents::create_pool(
        env,
        pool_id,
        authority,
        stake_asset,
        reward_asset,
        unstake_timelock,
        reward_params,
    );

    Ok(pool_id)
}

fn validate_authority(env: &Env, pool: &Pool, sender: &Address) -> StakingResult {
    validate!(
        env,
        pool.authority == *sender,
        ErrorCode::Unauthorized,
        "Staking Factory: sender is not the authority of pool {}",
        pool.id
    )
}

pub fn change_config(
    env: &Env,
    pool_id: u32,
    sender: Address,
    reward_params: RewardParams,
) -> StakingResult {
    let mut pool = get_pool(env, pool_id)?;
    validate_authority(env, &pool, &sender)?;

    validate!(
        env,
        pool.reward_params.is_same_kind(&reward_params),
        ErrorCode::CannotChangeStakingType,
        "Staking Factory: pool {} reward model cannot change",
        pool_id
    )?;
    reward_params.validate_fields(env)?;

    let now = env.ledger().timestamp();
    history::push_config_epoch(env, &mut pool, reward_params, now)?;
    pool.reward_params = reward_params;
    save_pool(env, &pool);

    StakingFactoryEvents::change_config(env, pool_id, now, reward_params);

    Ok(())
}

pub fn update_unstake_timelock(
    env: &Env,
    pool_id: u32,
    sender: Address,
    unstake_timelock: u64,
) -> StakingResult {
    let mut pool = get_pool(env, pool_id)?;
    validate_authority(env, &pool, &sender)?;

    pool.unstake_timelock = unstake_timelock;
    save_pool(env, &pool);

    StakingFactoryEvents::update_unstake_timelock(env, pool_id, unstake_timelock);

    Ok(())
}

pub fn fund_rewards(env: &Env, pool_id: u32, sender: Address, amount: i128) -> StakingResult {
    let mut pool = get_pool(env, pool_id)?;
    validate!(
        env,
        amount > 0,
        ErrorCode::InvalidAmount,
        "Staking Factory: reward funding must be positive"
    )?;

    utils::transfer_token(
        env,
        &pool.reward_asset,
        &sender,
        &env.current_contract_address(),
        amount,
    )?;
    safe_increment!(env, pool.reward_vault, amount);
    save_pool(env, &pool);

    log!(env, "pool {} reward vault {}", pool_id, pool.reward_vault);
    StakingFactoryEvents::fund_rewards(env, pool_id, sender, amount, pool.reward_vault);

    Ok(())
}
