use soroban_sdk::contracttype;

use crate::types::RewardParams;

/// Reward parameters in force from `start_ts` until the next epoch starts
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigEpoch {
    pub reward_params: RewardParams,
    pub start_ts: u64,
    /// Sequence number of the stake snapshot opening this epoch
    pub stakes_index: u32,
}

/// Pool staked sum in force from `start_ts` until the next snapshot
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeSnapshot {
    pub start_ts: u64,
    pub stakes_sum: i128,
    /// Proportional reward paid per staked unit since the pool opened, scaled
    /// by `REWARD_PER_STAKE_SCALE`, as of `start_ts`
    pub reward_per_stake: i128,
}
