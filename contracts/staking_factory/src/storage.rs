use soroban_sdk::{contracttype, log, Address, Env};
use staking::{
    constants::{
        INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
        PERSISTENT_LIFETIME_THRESHOLD,
    },
    error::{ErrorCode, StakingResult},
    types::RewardParams,
};

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    Initialized,
    Pool(u32),
    ConfigEpoch(u32, u32),
    StakeSnapshot(u32, u32),
    Member(u32, Address),
    PendingWithdrawal(u32, Address),
}

// ################################################################
//                             Config
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Receives the protocol fee skimmed from every claim
    pub fee_vault: Address,
    pub protocol_fee_bps: i64,
    pub pools_count: u32,
}

pub fn save_config(env: &Env, config: Config) {
    env.storage().persistent().set(&DataKey::Config, &config);
    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_config(env: &Env) -> StakingResult<Config> {
    let config = match env.storage().persistent().get(&DataKey::Config) {
        Some(config) => config,
        None => {
            log!(env, "Staking Factory: Config not set");
            return Err(ErrorCode::NotInitialized);
        }
    };
    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    Ok(config)
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// ################################################################
//                             Pool
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub authority: Address,
    pub stake_asset: Address,
    pub reward_asset: Address,
    pub unstake_timelock: u64,
    /// Active params, mirrors the newest config epoch
    pub reward_params: RewardParams,
    pub stakes_sum: i128,
    /// Stake tokens held for members (available + staked + pending)
    pub stake_vault: i128,
    /// Reward tokens funded for this pool and not yet claimed
    pub reward_vault: i128,
    pub config_epochs: u32,
    /// Snapshots ever recorded, the history keeps the newest `MAX_STAKE_SNAPSHOTS`
    pub stake_snapshots: u32,
    pub created_at: u64,
}

pub fn save_pool(env: &Env, pool: &Pool) {
    let key = DataKey::Pool(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_pool(env: &Env, pool_id: u32) -> StakingResult<Pool> {
    let key = DataKey::Pool(pool_id);
    let pool = match env.storage().persistent().get(&key) {
        Some(pool) => pool,
        None => {
            log!(env, "Staking Factory: Pool {} not found", pool_id);
            return Err(ErrorCode::PoolNotFound);
        }
    };
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);

    Ok(pool)
}

// ################################################################
//                             Member
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Member {
    pub pool_id: u32,
    pub beneficiary: Address,
    pub available: i128,
    pub staked: i128,
    pub pending: i128,
    /// Settled by stake/start_unstake, paid out on the next claim
    pub unclaimed_rewards: i128,
    /// None until the first stake
    pub last_reward_ts: Option<u64>,
    /// Proportional pools only: pool reward-per-stake index at the cursor
    pub reward_per_stake: i128,
    pub unstake_active: bool,
    pub unstake_unlock_ts: u64,
    pub total_deposited: i128,
    pub total_withdrawn: i128,
    pub total_claimed: i128,
}

impl Member {
    pub fn new(pool_id: u32, beneficiary: Address) -> Self {
        Member {
            pool_id,
            beneficiary,
            available: 0,
            staked: 0,
            pending: 0,
            unclaimed_rewards: 0,
            last_reward_ts: None,
            reward_per_stake: 0,
            unstake_active: false,
            unstake_unlock_ts: 0,
            total_deposited: 0,
            total_withdrawn: 0,
            total_claimed: 0,
        }
    }
}

pub fn has_member(env: &Env, pool_id: u32, beneficiary: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Member(pool_id, beneficiary.clone()))
}

pub fn save_member(env: &Env, member: &Member) {
    let key = DataKey::Member(member.pool_id, member.beneficiary.clone());
    env.storage().persistent().set(&key, member);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_member(env: &Env, pool_id: u32, beneficiary: &Address) -> StakingResult<Member> {
    let key = DataKey::Member(pool_id, beneficiary.clone());
    let member = match env.storage().persistent().get(&key) {
        Some(member) => member,
        None => {
            log!(
                env,
                "Staking Factory: Member {} not registered in pool {}",
                beneficiary.clone(),
                pool_id
            );
            return Err(ErrorCode::MemberNotFound);
        }
    };
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);

    Ok(member)
}

// ################################################################
//                       Pending Withdrawal
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingWithdrawal {
    pub amount: i128,
    pub start_ts: u64,
    /// Fixed when the unstake starts, later timelock updates do not move it
    pub unlock_ts: u64,
}

pub fn save_pending_withdrawal(
    env: &Env,
    pool_id: u32,
    beneficiary: &Address,
    withdrawal: &PendingWithdrawal,
) {
    let key = DataKey::PendingWithdrawal(pool_id, beneficiary.clone());
    env.storage().persistent().set(&key, withdrawal);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_pending_withdrawal(
    env: &Env,
    pool_id: u32,
    beneficiary: &Address,
) -> Option<PendingWithdrawal> {
    let key = DataKey::PendingWithdrawal(pool_id, beneficiary.clone());
    let withdrawal: PendingWithdrawal = env.storage().persistent().get(&key)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);

    Some(withdrawal)
}

pub fn remove_pending_withdrawal(env: &Env, pool_id: u32, beneficiary: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::PendingWithdrawal(pool_id, beneficiary.clone()));
}

// ################################################################
//                             Utils
// ################################################################

pub mod utils {
    use soroban_sdk::{log, token, Address, Env};
    use staking::error::{ErrorCode, StakingResult};

    /// Moves `amount` of `asset` through the token contract, surfacing any
    /// failure as `InsufficientFunds`
    pub fn transfer_token(
        env: &Env,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> StakingResult {
        let token_client = token::Client::new(env, asset);
        match token_client.try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(
                    env,
                    "Staking Factory: transfer of {} from {} failed",
                    amount,
                    from.clone()
                );
                Err(ErrorCode::InsufficientFunds)
            }
        }
    }
}
