use soroban_sdk::{log, Address, Env};
use staking::{
    error::{ErrorCode, StakingResult},
    math::safe_math::SafeMath,
    safe_decrement, safe_increment, validate,
};

use crate::{
    controller::reward,
    events::StakingFactoryEvents,
    history,
    msg::ClaimedReward,
    storage::{
        get_config, get_member, get_pending_withdrawal, get_pool, has_member,
        remove_pending_withdrawal, save_member, save_pending_withdrawal, save_pool, utils, Member,
        PendingWithdrawal, Pool,
    },
};

fn validate_amount(env: &Env, amount: i128) -> StakingResult {
    validate!(
        env,
        amount > 0,
        ErrorCode::InvalidAmount,
        "Staking Factory: amount must be positive, got {}",
        amount
    )
}

/// Applies a change of `pool.stakes_sum` to the snapshot history when the
/// reward model depends on it
fn record_stakes_sum(env: &Env, pool: &mut Pool, now: u64) -> StakingResult {
    if pool.reward_params.tracks_stakes() {
        history::push_stake_snapshot(env, pool, now)?;
    }
    Ok(())
}

pub fn register_member(env: &Env, pool_id: u32, beneficiary: Address) -> StakingResult {
    get_pool(env, pool_id)?;
    validate!(
        env,
        !has_member(env, pool_id, &beneficiary),
        ErrorCode::MemberAlreadyExists,
        "Staking Factory: member already registered in pool {}",
        pool_id
    )?;

    save_member(env, &Member::new(pool_id, beneficiary.clone()));

    StakingFactoryEvents::register_member(env, pool_id, beneficiary);

    Ok(())
}

pub fn deposit(env: &Env, pool_id: u32, beneficiary: Address, amount: i128) -> StakingResult {
    let mut pool = get_pool(env, pool_id)?;
    let mut member = get_member(env, pool_id, &beneficiary)?;
    validate_amount(env, amount)?;

    utils::transfer_token(
        env,
        &pool.stake_asset,
        &beneficiary,
        &env.current_contract_address(),
        amount,
    )?;

    safe_increment!(env, member.available, amount);
    safe_increment!(env, member.total_deposited, amount);
    safe_increment!(env, pool.stake_vault, amount);

    save_member(env, &member);
    save_pool(env, &pool);

    StakingFactoryEvents::deposit(env, pool_id, beneficiary, amount);

    Ok(())
}

pub fn stake(env: &Env, pool_id: u32, beneficiary: Address, amount: i128) -> StakingResult {
    let mut pool = get_pool(env, pool_id)?;
    let mut member = get_member(env, pool_id, &beneficiary)?;
    validate_amount(env, amount)?;
    validate!(
        env,
        amount <= member.available,
        ErrorCode::InsufficientBalance,
        "Staking Factory: stake {} exceeds available {}",
        amount,
        member.available
    )?;

    let now = env.ledger().timestamp();
    reward::settle(env, &pool, &mut member, now)?;

    safe_decrement!(env, member.available, amount);
    safe_increment!(env, member.staked, amount);
    safe_increment!(env, pool.stakes_sum, amount);
    record_stakes_sum(env, &mut pool, now)?;

    save_member(env, &member);
    save_pool(env, &pool);

    StakingFactoryEvents::stake(env, pool_id, beneficiary, amount, pool.stakes_sum);

    Ok(())
}

pub fn start_unstake(env: &Env, pool_id: u32, beneficiary: Address, amount: i128) -> StakingResult {
    let mut pool = get_pool(env, pool_id)?;
    let mut member = get_member(env, pool_id, &beneficiary)?;
    validate!(
        env,
        !member.unstake_active,
        ErrorCode::UnstakeActive,
        "Staking Factory: an unstake is already pending until {}",
        member.unstake_unlock_ts
    )?;
    validate_amount(env, amount)?;
    validate!(
        env,
        amount <= member.staked,
        ErrorCode::InsufficientBalance,
        "Staking Factory: unstake {} exceeds staked {}",
        amount,
        member.staked
    )?;

    let now = env.ledger().timestamp();
    let unlock_ts = now.safe_add(pool.unstake_timelock, env)?;
    reward::settle(env, &pool, &mut member, now)?;

    safe_decrement!(env, member.staked, amount);
    safe_increment!(env, member.pending, amount);
    safe_decrement!(env, pool.stakes_sum, amount);
    record_stakes_sum(env, &mut pool, now)?;

    member.unstake_active = true;
    member.unstake_unlock_ts = unlock_ts;

    save_pending_withdrawal(
        env,
        pool_id,
        &beneficiary,
        &PendingWithdrawal {
            amount,
            start_ts: now,
            unlock_ts,
        },
    );
    save_member(env, &member);
    save_pool(env, &pool);

    StakingFactoryEvents::start_unstake(env, pool_id, beneficiary, amount, unlock_ts);

    Ok(())
}

pub fn end_unstake(env: &Env, pool_id: u32, beneficiary: Address) -> StakingResult {
    get_pool(env, pool_id)?;
    let mut member = get_member(env, pool_id, &beneficiary)?;

    let withdrawal = match get_pending_withdrawal(env, pool_id, &beneficiary) {
        Some(withdrawal) if member.unstake_active => withdrawal,
        _ => {
            log!(env, "Staking Factory: no unstake in progress");
            return Err(ErrorCode::UnstakeInactive);
        }
    };

    let now = env.ledger().timestamp();
    validate!(
        env,
        now >= withdrawal.unlock_ts,
        ErrorCode::UnstakeTimelock,
        "Staking Factory: unstake locked until {}, now {}",
        withdrawal.unlock_ts,
        now
    )?;

    safe_decrement!(env, member.pending, withdrawal.amount);
    safe_increment!(env, member.available, withdrawal.amount);
    member.unstake_active = false;
    member.unstake_unlock_ts = 0;

    remove_pending_withdrawal(env, pool_id, &beneficiary);
    save_member(env, &member);

    StakingFactoryEvents::end_unstake(env, pool_id, beneficiary, withdrawal.amount);

    Ok(())
}

pub fn withdraw(env: &Env, pool_id: u32, beneficiary: Address, amount: i128) -> StakingResult {
    let mut pool = get_pool(env, pool_id)?;
    let mut member = get_member(env, pool_id, &beneficiary)?;
    validate_amount(env, amount)?;
    validate!(
        env,
        amount <= member.available,
        ErrorCode::InsufficientBalance,
        "Staking Factory: withdraw {} exceeds available {}",
        amount,
        member.available
    )?;

    utils::transfer_token(
        env,
        &pool.stake_asset,
        &env.current_contract_address(),
        &beneficiary,
        amount,
    )?;

    safe_decrement!(env, member.available, amount);
    safe_increment!(env, member.total_withdrawn, amount);
    safe_decrement!(env, pool.stake_vault, amount);

    save_member(env, &member);
    save_pool(env, &pool);

    StakingFactoryEvents::withdraw(env, pool_id, beneficiary, amount);

    Ok(())
}

pub fn claim_reward(env: &Env, pool_id: u32, beneficiary: Address) -> StakingResult<ClaimedReward> {
    let config = get_config(env)?;
    let mut pool = get_pool(env, pool_id)?;
    let mut member = get_member(env, pool_id, &beneficiary)?;
    validate!(
        env,
        member.last_reward_ts.is_some(),
        ErrorCode::NotStaked,
        "Staking Factory: nothing was ever staked in pool {}",
        pool_id
    )?;

    let now = env.ledger().timestamp();
    let accrual = reward::accrue(env, &pool, &member, now)?;
    let total = member.unclaimed_rewards.safe_add(accrual.reward, env)?;
    let (to_beneficiary, factory_fee) = reward::split_fee(env, total, config.protocol_fee_bps)?;

    validate!(
        env,
        total <= pool.reward_vault,
        ErrorCode::InsufficientFunds,
        "Staking Factory: reward {} exceeds pool {} reward vault {}",
        total,
        pool_id,
        pool.reward_vault
    )?;

    let contract = env.current_contract_address();
    if factory_fee > 0 {
        utils::transfer_token(env, &pool.reward_asset, &contract, &config.fee_vault, factory_fee)?;
    }
    if to_beneficiary > 0 {
        utils::transfer_token(env, &pool.reward_asset, &contract, &beneficiary, to_beneficiary)?;
    }

    safe_decrement!(env, pool.reward_vault, total);
    safe_increment!(env, member.total_claimed, total);
    member.unclaimed_rewards = 0;
    reward::advance(&mut member, &accrual);

    save_member(env, &member);
    save_pool(env, &pool);

    StakingFactoryEvents::claim_reward(
        env,
        pool_id,
        beneficiary,
        total,
        to_beneficiary,
        factory_fee,
    );

    Ok(ClaimedReward {
        total,
        to_beneficiary,
        factory_fee,
    })
}
