use soroban_sdk::{Address, Env, Vec};
use staking::{
    error::ErrorCode,
    types::{ConfigEpoch, RewardParams, StakeSnapshot},
};

use crate::{
    msg::{ClaimedReward, ConfigResponse, MemberResponse},
    storage::{Member, PendingWithdrawal, Pool},
};

pub trait StakingFactoryTrait {
    fn initialize(env: Env, admin: Address, fee_vault: Address, protocol_fee_bps: i64);

    // Allows the admin set during initialization to change fee settings
    fn update_config(env: Env, fee_vault: Option<Address>, protocol_fee_bps: Option<i64>);

    // ################################################################
    //                             POOLS
    // ################################################################

    fn create_pool(
        env: Env,
        authority: Address,
        stake_asset: Address,
        reward_asset: Address,
        unstake_timelock: u64,
        reward_params: RewardParams,
    ) -> Result<u32, ErrorCode>;

    fn change_config(
        env: Env,
        pool_id: u32,
        sender: Address,
        reward_params: RewardParams,
    ) -> Result<(), ErrorCode>;

    fn update_unstake_timelock(
        env: Env,
        pool_id: u32,
        sender: Address,
        unstake_timelock: u64,
    ) -> Result<(), ErrorCode>;

    fn fund_rewards(env: Env, pool_id: u32, sender: Address, amount: i128)
        -> Result<(), ErrorCode>;

    // ################################################################
    //                             MEMBERS
    // ################################################################

    fn register_member(env: Env, pool_id: u32, beneficiary: Address) -> Result<(), ErrorCode>;

    fn deposit(env: Env, pool_id: u32, beneficiary: Address, amount: i128)
        -> Result<(), ErrorCode>;

    fn stake(env: Env, pool_id: u32, beneficiary: Address, amount: i128) -> Result<(), ErrorCode>;

    fn claim_reward(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
    ) -> Result<ClaimedReward, ErrorCode>;

    fn start_unstake(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), ErrorCode>;

    fn end_unstake(env: Env, pool_id: u32, beneficiary: Address) -> Result<(), ErrorCode>;

    fn withdraw(env: Env, pool_id: u32, beneficiary: Address, amount: i128)
        -> Result<(), ErrorCode>;

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_config(env: Env) -> Result<ConfigResponse, ErrorCode>;

    fn query_admin(env: Env) -> Result<Address, ErrorCode>;

    fn query_pools_count(env: Env) -> Result<u32, ErrorCode>;

    fn query_pool(env: Env, pool_id: u32) -> Result<Pool, ErrorCode>;

    fn query_all_pools(env: Env) -> Result<Vec<Pool>, ErrorCode>;

    fn query_config_history(env: Env, pool_id: u32) -> Result<Vec<ConfigEpoch>, ErrorCode>;

    fn query_stakes_history(env: Env, pool_id: u32) -> Result<Vec<StakeSnapshot>, ErrorCode>;

    fn query_member(env: Env, pool_id: u32, beneficiary: Address) -> Result<Member, ErrorCode>;

    fn query_member_info(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
    ) -> Result<MemberResponse, ErrorCode>;

    fn query_pending_withdrawal(
        env: Env,
        pool_id: u32,
        beneficiary: Address,
    ) -> Option<PendingWithdrawal>;

    fn query_pending_reward(env: Env, pool_id: u32, beneficiary: Address)
        -> Result<i128, ErrorCode>;
}
