use soroban_sdk::contracterror;

pub type StakingResult<T = ()> = Result<T, ErrorCode>;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ErrorCode {
    // Factory
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,

    // Pool config
    #[doc = "A divisor or period parameter is zero"]
    ZeroParameter = 10,
    #[doc = "Reward model variant cannot change after pool creation"]
    CannotChangeStakingType = 11,
    HistoryCapacityExceeded = 12,
    PoolNotFound = 13,

    // Member ledger
    InvalidAmount = 20,
    InsufficientBalance = 21,
    InsufficientFunds = 22,
    MemberNotFound = 23,
    MemberAlreadyExists = 24,
    #[doc = "Claim attempted by a member that never staked"]
    NotStaked = 25,

    // Unstake timelock
    UnstakeActive = 30,
    UnstakeInactive = 31,
    UnstakeTimelock = 32,

    // Math
    MathError = 40,
    CastingFailure = 41,
}
