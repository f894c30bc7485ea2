use soroban_sdk::contracttype;

use crate::storage::{Config, Member};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigResponse {
    pub config: Config,
}

/// Split of a claimed reward between the member and the fee vault
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClaimedReward {
    pub total: i128,
    pub to_beneficiary: i128,
    pub factory_fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberResponse {
    pub member: Member,
    /// Unclaimed plus accrued since the last settlement, before fees
    pub pending_reward: i128,
}
