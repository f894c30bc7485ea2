use soroban_sdk::{Address, Env, Symbol};
use staking::types::RewardParams;

pub struct StakingFactoryEvents {}

impl StakingFactoryEvents {
    // Factory Events

    /// Emitted when the factory is initialized
    ///
    /// - topics - `["initialize", admin: Address]`
    /// - data - `[fee_vault: Address, protocol_fee_bps: i64]`
    pub fn initialize(env: &Env, admin: Address, fee_vault: Address, protocol_fee_bps: i64) {
        let topics = (Symbol::new(env, "initialize"), admin);
        env.events().publish(topics, (fee_vault, protocol_fee_bps));
    }

    // Pool Events

    /// Emitted when a tenant creates a pool
    ///
    /// - topics - `["create_pool", pool_id: u32, authority: Address]`
    /// - data - `[stake_asset: Address, reward_asset: Address, unstake_timelock: u64, reward_params: RewardParams]`
    pub fn create_pool(
        env: &Env,
        pool_id: u32,
        authority: Address,
        stake_asset: Address,
        reward_asset: Address,
        unstake_timelock: u64,
        reward_params: RewardParams,
    ) {
        let topics = (Symbol::new(env, "create_pool"), pool_id, authority);
        env.events().publish(
            topics,
            (stake_asset, reward_asset, unstake_timelock, reward_params),
        );
    }

    /// Emitted when the pool authority changes reward params
    ///
    /// - topics - `["change_config", pool_id: u32]`
    /// - data - `[ts: u64, reward_params: RewardParams]`
    pub fn change_config(env: &Env, pool_id: u32, ts: u64, reward_params: RewardParams) {
        let topics = (Symbol::new(env, "change_config"), pool_id);
        env.events().publish(topics, (ts, reward_params));
    }

    /// - topics - `["update_unstake_timelock", pool_id: u32]`
    /// - data - `unstake_timelock: u64`
    pub fn update_unstake_timelock(env: &Env, pool_id: u32, unstake_timelock: u64) {
        let topics = (Symbol::new(env, "update_unstake_timelock"), pool_id);
        env.events().publish(topics, unstake_timelock);
    }

    /// Emitted when reward tokens are added to a pool's reward vault
    ///
    /// - topics - `["fund_rewards", pool_id: u32, sender: Address]`
    /// - data - `[amount: i128, reward_vault: i128]`
    pub fn fund_rewards(env: &Env, pool_id: u32, sender: Address, amount: i128, reward_vault: i128) {
        let topics = (Symbol::new(env, "fund_rewards"), pool_id, sender);
        env.events().publish(topics, (amount, reward_vault));
    }

    // Member Events

    /// - topics - `["register_member", pool_id: u32, beneficiary: Address]`
    /// - data - ()
    pub fn register_member(env: &Env, pool_id: u32, beneficiary: Address) {
        let topics = (Symbol::new(env, "register_member"), pool_id, beneficiary);
        env.events().publish(topics, ());
    }

    /// - topics - `["deposit", pool_id: u32, beneficiary: Address]`
    /// - data - `amount: i128`
    pub fn deposit(env: &Env, pool_id: u32, beneficiary: Address, amount: i128) {
        let topics = (Symbol::new(env, "deposit"), pool_id, beneficiary);
        env.events().publish(topics, amount);
    }

    /// Emitted when available balance moves into the active stake
    ///
    /// - topics - `["stake", pool_id: u32, beneficiary: Address]`
    /// - data - `[amount: i128, stakes_sum: i128]`
    pub fn stake(env: &Env, pool_id: u32, beneficiary: Address, amount: i128, stakes_sum: i128) {
        let topics = (Symbol::new(env, "stake"), pool_id, beneficiary);
        env.events().publish(topics, (amount, stakes_sum));
    }

    /// Emitted when a member claims rewards
    ///
    /// - topics - `["claim_reward", pool_id: u32, beneficiary: Address]`
    /// - data - `[total: i128, to_beneficiary: i128, factory_fee: i128]`
    pub fn claim_reward(
        env: &Env,
        pool_id: u32,
        beneficiary: Address,
        total: i128,
        to_beneficiary: i128,
        factory_fee: i128,
    ) {
        let topics = (Symbol::new(env, "claim_reward"), pool_id, beneficiary);
        env.events().publish(topics, (total, to_beneficiary, factory_fee));
    }

    /// Emitted when stake enters the unstake timelock
    ///
    /// - topics - `["start_unstake", pool_id: u32, beneficiary: Address]`
    /// - data - `[amount: i128, unlock_ts: u64]`
    pub fn start_unstake(env: &Env, pool_id: u32, beneficiary: Address, amount: i128, unlock_ts: u64) {
        let topics = (Symbol::new(env, "start_unstake"), pool_id, beneficiary);
        env.events().publish(topics, (amount, unlock_ts));
    }

    /// - topics - `["end_unstake", pool_id: u32, beneficiary: Address]`
    /// - data - `amount: i128`
    pub fn end_unstake(env: &Env, pool_id: u32, beneficiary: Address, amount: i128) {
        let topics = (Symbol::new(env, "end_unstake"), pool_id, beneficiary);
        env.events().publish(topics, amount);
    }

    /// - topics - `["withdraw", pool_id: u32, beneficiary: Address]`
    /// - data - `amount: i128`
    pub fn withdraw(env: &Env, pool_id: u32, beneficiary: Address, amount: i128) {
        let topics = (Symbol::new(env, "withdraw"), pool_id, beneficiary);
        env.events().publish(topics, amount);
    }
}
