use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{log, Env, Vec};

use crate::{
    constants::REWARD_PER_STAKE_SCALE,
    error::{ErrorCode, StakingResult},
    math::{casting::Cast, safe_math::SafeMath},
    types::{ConfigEpoch, FixedParams, InterestRateParams, ProportionalParams, RewardParams, StakeSnapshot},
};

/// Outcome of replaying a member's history up to `now`
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Accrual {
    pub reward: i128,
    /// Timestamp up to which the reward has been settled
    pub cursor: u64,
    /// Proportional index the member has been paid up to, zero for the other models
    pub reward_per_stake: i128,
}

/// floor(x * y / denominator)
pub fn mul_div_floor(env: &Env, x: i128, y: i128, denominator: i128) -> StakingResult<i128> {
    match x.fixed_mul_floor(y, denominator) {
        Some(result) => Ok(result),
        None => {
            log!(env, "Math error thrown at {}:{}", file!(), line!());
            Err(ErrorCode::MathError)
        }
    }
}

/// Replays `epochs` (oldest first, the first one containing `cursor`) and
/// returns the reward a member holding `staked` accrued between `cursor` and
/// `now` under the per-member models.
///
/// Proportional epochs add nothing here, their reward comes from the pool's
/// reward-per-stake index through `proportional_accrual`. The member's stake
/// is assumed constant over the whole interval: every balance change settles
/// first.
pub fn calculate_reward(
    env: &Env,
    staked: i128,
    cursor: u64,
    now: u64,
    epochs: &Vec<ConfigEpoch>,
) -> StakingResult<Accrual> {
    let mut accrual = Accrual {
        cursor,
        ..Default::default()
    };

    for i in 0..epochs.len() {
        let epoch = epochs.get_unchecked(i);
        let next_start = epochs.get(i + 1).map(|next| next.start_ts);

        let epoch_end = next_start.unwrap_or(now).min(now);
        let start = epoch.start_ts.max(accrual.cursor);
        if start >= epoch_end {
            continue;
        }

        let (reward, cursor) = match epoch.reward_params {
            RewardParams::InterestRate(params) => {
                (interest_rate_reward(env, staked, &params, start, epoch_end)?, epoch_end)
            }
            RewardParams::Proportional(_) => (0, epoch_end),
            RewardParams::Fixed(params) => {
                fixed_reward(env, staked, &params, start, epoch_end, next_start.is_some())?
            }
        };

        accrual.reward = accrual.reward.safe_add(reward, env)?;
        accrual.cursor = cursor;
    }

    Ok(accrual)
}

pub fn interest_rate_reward(
    env: &Env,
    staked: i128,
    params: &InterestRateParams,
    start: u64,
    end: u64,
) -> StakingResult<i128> {
    if staked <= 0 {
        return Ok(0);
    }

    let elapsed = end.safe_sub(start, env)?.cast::<i128>(env)?;
    let rate_time = params.num.cast::<i128>(env)?.safe_mul(elapsed, env)?;

    mul_div_floor(env, staked, rate_time, params.denom.cast::<i128>(env)?)
}

/// Extends the index of `snapshot`, the latest one, to `now`: the budget of
/// `params` released since the snapshot, divided by its stakes sum. An empty
/// pool leaves the index where it is.
pub fn reward_per_stake_at(
    env: &Env,
    snapshot: &StakeSnapshot,
    params: &ProportionalParams,
    now: u64,
) -> StakingResult<i128> {
    if snapshot.stakes_sum <= 0 || now <= snapshot.start_ts {
        return Ok(snapshot.reward_per_stake);
    }

    let elapsed = (now - snapshot.start_ts).cast::<i128>(env)?;
    let released = elapsed.safe_mul(REWARD_PER_STAKE_SCALE, env)?;
    let denominator = params
        .reward_period
        .cast::<i128>(env)?
        .safe_mul(snapshot.stakes_sum, env)?;
    let increase = mul_div_floor(env, params.total_amount, released, denominator)?;

    snapshot.reward_per_stake.safe_add(increase, env)
}

/// Reward of a member holding `staked` since the index stood at `paid`,
/// settled up to `now`. Costs one snapshot however many stake changes the
/// pool went through since.
pub fn proportional_accrual(
    env: &Env,
    staked: i128,
    paid: i128,
    latest: &StakeSnapshot,
    params: &ProportionalParams,
    now: u64,
) -> StakingResult<Accrual> {
    let reward_per_stake = reward_per_stake_at(env, latest, params, now)?;
    let reward = if staked > 0 {
        mul_div_floor(
            env,
            staked,
            reward_per_stake.safe_sub(paid, env)?,
            REWARD_PER_STAKE_SCALE,
        )?
    } else {
        0
    };

    Ok(Accrual {
        reward,
        cursor: now,
        reward_per_stake,
    })
}

/// Returns the reward and the new cursor. Only whole periods are paid while
/// the epoch is open, so the cursor stays on the last period boundary. A
/// closed epoch pays its trailing partial period pro rata.
pub fn fixed_reward(
    env: &Env,
    staked: i128,
    params: &FixedParams,
    start: u64,
    end: u64,
    epoch_closed: bool,
) -> StakingResult<(i128, u64)> {
    if staked <= 0 || staked < params.required_amount {
        return Ok((0, end));
    }

    let periods = end.safe_sub(start, env)?.safe_div(params.required_period, env)?;
    let mut reward = periods.cast::<i128>(env)?.safe_mul(params.reward_amount, env)?;
    let mut cursor = start.safe_add(periods.safe_mul(params.required_period, env)?, env)?;

    if epoch_closed && cursor < end {
        let remainder = (end - cursor).cast::<i128>(env)?;
        let partial = mul_div_floor(
            env,
            params.reward_amount,
            remainder,
            params.required_period.cast::<i128>(env)?,
        )?;
        reward = reward.safe_add(partial, env)?;
        cursor = end;
    }

    Ok((reward, cursor))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use soroban_sdk::{vec, Env};

    use super::*;

    const SCALE: i128 = REWARD_PER_STAKE_SCALE;

    fn epoch(params: RewardParams, start_ts: u64) -> ConfigEpoch {
        ConfigEpoch {
            reward_params: params,
            start_ts,
            stakes_index: 0,
        }
    }

    fn snapshot(start_ts: u64, stakes_sum: i128, reward_per_stake: i128) -> StakeSnapshot {
        StakeSnapshot {
            start_ts,
            stakes_sum,
            reward_per_stake,
        }
    }

    fn settled(reward: i128, cursor: u64) -> Accrual {
        Accrual {
            reward,
            cursor,
            reward_per_stake: 0,
        }
    }

    fn interest(num: u64, denom: u64) -> RewardParams {
        RewardParams::InterestRate(InterestRateParams { num, denom })
    }

    fn proportional(total_amount: i128, reward_period: u64) -> ProportionalParams {
        ProportionalParams {
            total_amount,
            reward_period,
        }
    }

    fn fixed(required_amount: i128, required_period: u64, reward_amount: i128) -> RewardParams {
        RewardParams::Fixed(FixedParams {
            required_amount,
            required_period,
            reward_amount,
        })
    }

    #[test]
    fn interest_rate_single_epoch() {
        let env = Env::default();
        let epochs = vec![&env, epoch(interest(1337, 100), 0)];

        let accrual = calculate_reward(&env, 100, 10, 14, &epochs).unwrap();

        assert_eq!(accrual, settled(5348, 14));
    }

    #[test]
    fn interest_rate_spans_config_change() {
        let env = Env::default();
        let epochs = vec![
            &env,
            epoch(interest(10, 100), 0),
            epoch(interest(20, 100), 10),
        ];

        // 100 * 10 * 5 / 100 + 100 * 20 * 5 / 100
        let accrual = calculate_reward(&env, 100, 5, 15, &epochs).unwrap();

        assert_eq!(accrual, settled(150, 15));
    }

    #[test]
    fn interest_rate_truncates() {
        let env = Env::default();
        let epochs = vec![&env, epoch(interest(1, 3), 0)];

        let accrual = calculate_reward(&env, 10, 0, 1, &epochs).unwrap();

        assert_eq!(accrual.reward, 3);
    }

    #[test]
    fn nothing_accrues_without_elapsed_time() {
        let env = Env::default();
        let epochs = vec![&env, epoch(interest(10, 100), 0)];

        let accrual = calculate_reward(&env, 100, 7, 7, &epochs).unwrap();

        assert_eq!(accrual, settled(0, 7));
    }

    #[test]
    fn reward_per_stake_releases_budget_over_period() {
        let env = Env::default();
        let params = proportional(100, 10);

        // 100 * 4 / (10 * 200) per staked unit
        let index = reward_per_stake_at(&env, &snapshot(0, 200, 0), &params, 4).unwrap();

        assert_eq!(index, SCALE / 5);
    }

    #[test]
    fn reward_per_stake_holds_on_empty_pool() {
        let env = Env::default();
        let params = proportional(100, 10);

        let index = reward_per_stake_at(&env, &snapshot(0, 0, 7 * SCALE), &params, 50).unwrap();

        assert_eq!(index, 7 * SCALE);
    }

    #[test]
    fn proportional_single_staker_takes_budget() {
        let env = Env::default();
        let params = proportional(100, 10);

        let accrual =
            proportional_accrual(&env, 100, 0, &snapshot(0, 100, 0), &params, 10).unwrap();

        assert_eq!(
            accrual,
            Accrual {
                reward: 100,
                cursor: 10,
                reward_per_stake: SCALE,
            }
        );
    }

    #[test]
    fn proportional_follows_stakes_sum_changes() {
        let env = Env::default();
        let params = proportional(100, 10);
        // alone for 5s, then another 300 joins
        let joined = reward_per_stake_at(&env, &snapshot(0, 100, 0), &params, 5).unwrap();
        let latest = snapshot(5, 400, joined);

        // 100 * 100 * 5 / (10 * 100) + 100 * 100 * 5 / (10 * 400)
        let first = proportional_accrual(&env, 100, 0, &latest, &params, 10).unwrap();
        // 300 * 100 * 5 / (10 * 400)
        let second = proportional_accrual(&env, 300, joined, &latest, &params, 10).unwrap();

        assert_eq!(first.reward, 50 + 12);
        assert_eq!(second.reward, 37);
        assert_eq!(first.reward_per_stake, second.reward_per_stake);
    }

    #[test]
    fn proportional_pays_nothing_twice() {
        let env = Env::default();
        let params = proportional(100, 10);
        let latest = snapshot(0, 100, 0);

        let first = proportional_accrual(&env, 100, 0, &latest, &params, 6).unwrap();
        let second =
            proportional_accrual(&env, 100, first.reward_per_stake, &latest, &params, 6).unwrap();

        assert_eq!(first.reward, 60);
        assert_eq!(second.reward, 0);
    }

    #[test]
    fn proportional_epochs_leave_replay_untouched() {
        let env = Env::default();
        let epochs = vec![
            &env,
            epoch(RewardParams::Proportional(proportional(100, 10)), 0),
        ];

        let accrual = calculate_reward(&env, 100, 0, 10, &epochs).unwrap();

        assert_eq!(accrual, settled(0, 10));
    }

    #[test]
    fn fixed_pays_whole_periods_only() {
        let env = Env::default();
        let epochs = vec![&env, epoch(fixed(100, 10, 100), 0)];

        let early = calculate_reward(&env, 100, 0, 9, &epochs).unwrap();
        assert_eq!(early, settled(0, 0));

        let later = calculate_reward(&env, 100, 0, 25, &epochs).unwrap();
        assert_eq!(later, settled(200, 20));
    }

    #[test]
    fn fixed_below_requirement_breaks_continuity() {
        let env = Env::default();
        let epochs = vec![&env, epoch(fixed(100, 10, 100), 0)];

        let accrual = calculate_reward(&env, 99, 0, 30, &epochs).unwrap();

        assert_eq!(accrual, settled(0, 30));
    }

    #[test]
    fn fixed_closed_epoch_pays_partial_period() {
        let env = Env::default();
        let epochs = vec![
            &env,
            epoch(fixed(100, 10, 100), 0),
            epoch(fixed(100, 10, 50), 15),
        ];

        // 1 full period + half a period of the first epoch, then one period of the second
        let accrual = calculate_reward(&env, 100, 0, 25, &epochs).unwrap();

        assert_eq!(accrual, settled(100 + 50 + 50, 25));
    }

    #[test]
    fn fixed_keeps_partial_progress_between_claims() {
        let env = Env::default();
        let epochs = vec![&env, epoch(fixed(100, 10, 100), 0)];

        let first = calculate_reward(&env, 100, 0, 15, &epochs).unwrap();
        let second = calculate_reward(&env, 100, first.cursor, 20, &epochs).unwrap();

        assert_eq!(first, settled(100, 10));
        assert_eq!(second, settled(100, 20));
    }

    #[test]
    fn overflow_is_reported() {
        let env = Env::default();
        let epochs = vec![&env, epoch(interest(u64::MAX, 1), 0)];

        let result = calculate_reward(&env, i128::MAX, 0, 10, &epochs);

        assert_eq!(result, Err(ErrorCode::MathError));
    }
}
