// Ledger TTLs, expressed in ledgers (~5s each)
pub const DAY_IN_LEDGERS: u32 = 17280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

// Fees
pub const MAX_BPS: i64 = 10_000;
pub const DEFAULT_PROTOCOL_FEE_BPS: i64 = 300;

// History

/// Upper bound on config epochs a single pool may accumulate
pub const MAX_CONFIG_EPOCHS: u32 = 256;


/// Stake snapshots kept per pool, older ones are overwritten
pub const MAX_STAKE_SNAPSHOTS: u32 = 256;

/// Fixed-point scale of the proportional reward-per-stake index
pub const REWARD_PER_STAKE_SCALE: i128 = 1_000_000_000_000;
