use core::mem;

use soroban_sdk::{contracttype, Env};

use crate::{
    error::{ErrorCode, StakingResult},
    validate,
};

/// Linear accrual: `staked * num * seconds / denom`
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InterestRateParams {
    pub num: u64,
    pub denom: u64,
}

/// `total_amount` is distributed every `reward_period` seconds across all
/// stakers, pro rata to their share of the pool's staked sum
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProportionalParams {
    pub total_amount: i128,
    pub reward_period: u64,
}

/// Pays `reward_amount` for every `required_period` seconds a member keeps at
/// least `required_amount` staked
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedParams {
    pub required_amount: i128,
    pub required_period: u64,
    pub reward_amount: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewardParams {
    InterestRate(InterestRateParams),
    Proportional(ProportionalParams),
    Fixed(FixedParams),
}

impl RewardParams {
    pub fn validate_fields(&self, env: &Env) -> StakingResult {
        match self {
            RewardParams::InterestRate(params) => {
                validate!(
                    env,
                    params.denom != 0,
                    ErrorCode::ZeroParameter,
                    "interest rate denom must be non-zero"
                )
            }
            RewardParams::Proportional(params) => {
                validate!(
                    env,
                    params.reward_period != 0,
                    ErrorCode::ZeroParameter,
                    "reward period must be non-zero"
                )?;
                validate!(
                    env,
                    params.total_amount >= 0,
                    ErrorCode::InvalidAmount,
                    "total amount must not be negative"
                )
            }
            RewardParams::Fixed(params) => {
                validate!(
                    env,
                    params.required_period != 0,
                    ErrorCode::ZeroParameter,
                    "required period must be non-zero"
                )?;
                validate!(
                    env,
                    params.required_amount >= 0 && params.reward_amount >= 0,
                    ErrorCode::InvalidAmount,
                    "fixed reward amounts must not be negative"
                )
            }
        }
    }

    /// True when both params use the same reward model, whatever their values
    pub fn is_same_kind(&self, other: &RewardParams) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// Whether accrual depends on the pool's staked sum over time
    pub fn tracks_stakes(&self) -> bool {
        matches!(self, RewardParams::Proportional(_))
    }
}
