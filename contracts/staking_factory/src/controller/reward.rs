use soroban_sdk::Env;
use staking::{
    constants::MAX_BPS,
    error::StakingResult,
    math::{
        casting::Cast,
        reward::{calculate_reward, mul_div_floor, proportional_accrual, Accrual},
        safe_math::SafeMath,
    },
    safe_increment,
    types::RewardParams,
};

use crate::{
    history,
    storage::{Member, Pool},
};

/// Reward `member` accrued since its cursor. Reads history, writes nothing.
pub fn accrue(env: &Env, pool: &Pool, member: &Member, now: u64) -> StakingResult<Accrual> {
    if let RewardParams::Proportional(params) = pool.reward_params {
        let latest = history::latest_stake_snapshot(env, pool);
        return proportional_accrual(
            env,
            member.staked,
            member.reward_per_stake,
            &latest,
            &params,
            now,
        );
    }

    let cursor = match member.last_reward_ts {
        Some(cursor) => cursor,
        None => {
            return Ok(Accrual {
                cursor: now,
                ..Default::default()
            })
        }
    };

    let epochs = history::config_epochs_since(env, pool, cursor);
    calculate_reward(env, member.staked, cursor, now, &epochs)
}

/// Moves the cursor and the paid index of `member` to `accrual`
pub fn advance(member: &mut Member, accrual: &Accrual) {
    member.last_reward_ts = Some(accrual.cursor);
    member.reward_per_stake = accrual.reward_per_stake;
}

/// Moves the accrual into `unclaimed_rewards` ahead of a stake change. The
/// first settlement only starts the cursor.
pub fn settle(env: &Env, pool: &Pool, member: &mut Member, now: u64) -> StakingResult {
    let accrual = accrue(env, pool, member, now)?;
    safe_increment!(env, member.unclaimed_rewards, accrual.reward);
    advance(member, &accrual);

    Ok(())
}

/// Unclaimed plus freshly accrued reward, before fees
pub fn pending_reward(env: &Env, pool: &Pool, member: &Member, now: u64) -> StakingResult<i128> {
    let accrual = accrue(env, pool, member, now)?;
    member.unclaimed_rewards.safe_add(accrual.reward, env)
}

/// Returns `(to_beneficiary, factory_fee)`, the fee rounded down
pub fn split_fee(env: &Env, total: i128, protocol_fee_bps: i64) -> StakingResult<(i128, i128)> {
    let fee = mul_div_floor(
        env,
        total,
        protocol_fee_bps.cast::<i128>(env)?,
        MAX_BPS.cast::<i128>(env)?,
    )?;

    Ok((total.safe_sub(fee, env)?, fee))
}
