use soroban_sdk::{log, Env, Vec};
use staking::{
    constants::{
        MAX_CONFIG_EPOCHS, MAX_STAKE_SNAPSHOTS, PERSISTENT_BUMP_AMOUNT,
        PERSISTENT_LIFETIME_THRESHOLD,
    },
    error::{ErrorCode, StakingResult},
    math::{reward::reward_per_stake_at, safe_math::SafeMath},
    types::{ConfigEpoch, RewardParams, StakeSnapshot},
    validate,
};

use crate::storage::{DataKey, Pool};

// ################################################################
//                          Config epochs
// ################################################################

pub fn get_config_epoch(env: &Env, pool_id: u32, index: u32) -> ConfigEpoch {
    let key = DataKey::ConfigEpoch(pool_id, index);
    let epoch = env
        .storage()
        .persistent()
        .get(&key)
        .expect("Config epoch not set");
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);

    epoch
}

fn save_config_epoch(env: &Env, pool_id: u32, index: u32, epoch: &ConfigEpoch) {
    let key = DataKey::ConfigEpoch(pool_id, index);
    env.storage().persistent().set(&key, epoch);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Opens a config epoch at `now`. An epoch that started in the same second
/// has not accrued anything yet and gets its params replaced instead.
pub fn push_config_epoch(
    env: &Env,
    pool: &mut Pool,
    reward_params: RewardParams,
    now: u64,
) -> StakingResult {
    if pool.config_epochs > 0 {
        let last_index = pool.config_epochs - 1;
        let mut last = get_config_epoch(env, pool.id, last_index);
        if last.start_ts == now {
            last.reward_params = reward_params;
            save_config_epoch(env, pool.id, last_index, &last);
            return Ok(());
        }
    }

    validate!(
        env,
        pool.config_epochs < MAX_CONFIG_EPOCHS,
        ErrorCode::HistoryCapacityExceeded,
        "pool {} reached {} config epochs",
        pool.id,
        MAX_CONFIG_EPOCHS
    )?;

    let stakes_index = if reward_params.tracks_stakes() {
        push_stake_snapshot(env, pool, now)?
    } else {
        0
    };

    let index = pool.config_epochs;
    save_config_epoch(
        env,
        pool.id,
        index,
        &ConfigEpoch {
            reward_params,
            start_ts: now,
            stakes_index,
        },
    );
    pool.config_epochs = index.safe_add(1, env)?;

    Ok(())
}

/// Config epochs overlapping `[cursor, now]`, oldest first. Walks back from
/// the newest epoch so only the history since `cursor` is read.
pub fn config_epochs_since(env: &Env, pool: &Pool, cursor: u64) -> Vec<ConfigEpoch> {
    let mut epochs = Vec::new(env);
    let mut index = pool.config_epochs;
    while index > 0 {
        index -= 1;
        let epoch = get_config_epoch(env, pool.id, index);
        let start_ts = epoch.start_ts;
        epochs.push_front(epoch);
        if start_ts <= cursor {
            break;
        }
    }

    epochs
}

pub fn config_history(env: &Env, pool: &Pool) -> Vec<ConfigEpoch> {
    let mut epochs = Vec::new(env);
    for index in 0..pool.config_epochs {
        epochs.push_back(get_config_epoch(env, pool.id, index));
    }

    epochs
}

// ################################################################
//                         Stake snapshots
// ################################################################

fn snapshot_slot(sequence: u32) -> u32 {
    sequence % MAX_STAKE_SNAPSHOTS
}

fn get_stake_snapshot(env: &Env, pool_id: u32, sequence: u32) -> StakeSnapshot {
    let key = DataKey::StakeSnapshot(pool_id, snapshot_slot(sequence));
    let snapshot = env
        .storage()
        .persistent()
        .get(&key)
        .expect("Stake snapshot not set");
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);

    snapshot
}

fn save_stake_snapshot(env: &Env, pool_id: u32, sequence: u32, snapshot: &StakeSnapshot) {
    let key = DataKey::StakeSnapshot(pool_id, snapshot_slot(sequence));
    env.storage().persistent().set(&key, snapshot);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Snapshot in force now. A pool that never recorded one has been empty
/// since it was created.
pub fn latest_stake_snapshot(env: &Env, pool: &Pool) -> StakeSnapshot {
    match pool.stake_snapshots.checked_sub(1) {
        Some(last) => get_stake_snapshot(env, pool.id, last),
        None => StakeSnapshot {
            start_ts: pool.created_at,
            stakes_sum: pool.stakes_sum,
            reward_per_stake: 0,
        },
    }
}

/// Records the pool's current staked sum as of `now` and returns the
/// snapshot sequence number. The reward-per-stake index is carried forward
/// under `pool.reward_params`, so it has to run before a config change
/// replaces them. Several changes within one second collapse into one entry.
pub fn push_stake_snapshot(env: &Env, pool: &mut Pool, now: u64) -> StakingResult<u32> {
    let previous = pool
        .stake_snapshots
        .checked_sub(1)
        .map(|last| (last, get_stake_snapshot(env, pool.id, last)));

    let reward_per_stake = match (&previous, pool.reward_params) {
        (Some((_, last)), RewardParams::Proportional(params)) => {
            reward_per_stake_at(env, last, &params, now)?
        }
        (Some((_, last)), _) => last.reward_per_stake,
        (None, _) => 0,
    };
    let snapshot = StakeSnapshot {
        start_ts: now,
        stakes_sum: pool.stakes_sum,
        reward_per_stake,
    };

    if let Some((last, previous)) = previous {
        if previous.start_ts == now {
            save_stake_snapshot(env, pool.id, last, &snapshot);
            return Ok(last);
        }
    }

    let sequence = pool.stake_snapshots;
    save_stake_snapshot(env, pool.id, sequence, &snapshot);
    pool.stake_snapshots = sequence.safe_add(1, env)?;
    log!(env, "pool {} stakes sum {} at {}", pool.id, pool.stakes_sum, now);

    Ok(sequence)
}

/// Retained snapshots, oldest first. Only the last `MAX_STAKE_SNAPSHOTS`
/// survive.
pub fn stakes_history(env: &Env, pool: &Pool) -> Vec<StakeSnapshot> {
    let mut snapshots = Vec::new(env);
    let first = pool.stake_snapshots.saturating_sub(MAX_STAKE_SNAPSHOTS);
    for sequence in first..pool.stake_snapshots {
        snapshots.push_back(get_stake_snapshot(env, pool.id, sequence));
    }

    snapshots
}
