extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation},
    Address, Env, IntoVal, Symbol,
};
use staking::error::ErrorCode;

use super::setup::{interest_rate, proportional, set_time, PoolSetup, POOL_START};
use crate::storage::Member;

fn assert_balances_consistent(setup: &PoolSetup, members: &[&Address]) {
    let mut staked_sum = 0i128;
    for user in members {
        let member = setup.factory.query_member(&setup.pool_id, user);
        assert_eq!(
            member.available + member.staked + member.pending,
            member.total_deposited - member.total_withdrawn
        );
        staked_sum += member.staked;
    }
    assert_eq!(setup.factory.query_pool(&setup.pool_id).stakes_sum, staked_sum);
}

#[test]
fn register_member_starts_empty() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = PoolSetup::new(&env, interest_rate(10, 100));
    let user = setup.member(&env, 0);

    assert_eq!(
        setup.factory.query_member(&setup.pool_id, &user),
        Member {
            pool_id: setup.pool_id,
            beneficiary: user.clone(),
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
    );
    assert_eq!(
        setup.factory.try_register_member(&setup.pool_id, &user),
        Err(Ok(ErrorCode::MemberAlreadyExists))
    );
}

#[test]
fn operations_require_registration() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = PoolSetup::new(&env, interest_rate(10, 100));
    let user = Address::generate(&env);

    assert_eq!(
        setup.factory.try_deposit(&setup.pool_id, &user, &10),
        Err(Ok(ErrorCode::MemberNotFound))
    );
    assert_eq!(
        setup.factory.try_claim_reward(&setup.pool_id, &user),
        Err(Ok(ErrorCode::MemberNotFound))
    );
}

#[test]
fn deposit() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = PoolSetup::new(&env, interest_rate(10, 100));
    let user = setup.member(&env, 1_000);

    setup.factory.deposit(&setup.pool_id, &user, &600);

    assert_eq!(
        env.auths(),
        [(
            user.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    setup.factory.address.clone(),
                    Symbol::new(&env, "deposit"),
                    (setup.pool_id, &user, 600i128).into_val(&env),
                )),
                sub_invocations: std::vec![AuthorizedInvocation {
                    function: AuthorizedFunction::Contract((
                        setup.stake_token.address.clone(),
                        symbol_short!("transfer"),
                        (&user, &setup.factory.address, 600i128).into_val(&env),
                    )),
                    sub_invocations: std::vec![],
                }],
            },
        ),]
    );

    let member = setup.factory.query_member(&setup.pool_id, &user);
    assert_eq!(member.available, 600);
    assert_eq!(member.total_deposited, 600);
    assert_eq!(setup.factory.query_pool(&setup.pool_id).stake_vault, 600);
    assert_eq!(setup.stake_token.balance(&user), 400);
    assert_eq!(setup.stake_token.balance(&setup.factory.address), 600);
}

#[test]
fn deposit_rejects_invalid_amounts() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = PoolSetup::new(&env, interest_rate(10, 100));
    let user = setup.member(&env, 100);

    assert_eq!(
        setup.factory.try_deposit(&setup.pool_id, &user, &0),
        Err(Ok(ErrorCode::InvalidAmount))
    );
    assert_eq!(
        setup.factory.try_deposit(&setup.pool_id, &user, &-5),
        Err(Ok(ErrorCode::InvalidAmount))
    );
    assert_eq!(
        setup.factory.try_deposit(&setup.pool_id, &user, &101),
        Err(Ok(ErrorCode::InsufficientFunds))
    );
    assert_eq!(setup.factory.query_member(&setup.pool_id, &user).available, 0);
}

#[test]
fn stake_whole_available_balance() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = PoolSetup::new(&env, interest_rate(10, 100));
    let user = setup.member(&env, 100);
    setup.factory.deposit(&setup.pool_id, &user, &100);

    assert_eq!(
        setup.factory.try_stake(&setup.pool_id, &user, &101),
        Err(Ok(ErrorCode::InsufficientBalance))
    );

    setup.factory.stake(&setup.pool_id, &user, &100);

    let member = setup.factory.query_member(&setup.pool_id, &user);
    assert_eq!(member.available, 0);
    assert_eq!(member.staked, 100);
    assert_eq!(member.last_reward_ts, Some(POOL_START));
    assert_eq!(setup.factory.query_pool(&setup.pool_id).stakes_sum, 100);
}

#[test]
fn stake_rejects_non_positive_amount() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = PoolSetup::new(&env, interest_rate(10, 100));
    let user = setup.member(&env, 100);
    setup.factory.deposit(&setup.pool_id, &user, &100);

    assert_eq!(
        setup.factory.try_stake(&setup.pool_id, &user, &0),
        Err(Ok(ErrorCode::InvalidAmount))
    );
    assert_eq!(setup.factory.query_member(&setup.pool_id, &user).last_reward_ts, None);
}

#[test]
fn withdraw_returns_available_tokens() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = PoolSetup::new(&env, interest_rate(10, 100));
    let user = setup.member(&env, 100);
    setup.factory.deposit(&setup.pool_id, &user, &100);
    setup.factory.stake(&setup.pool_id, &user, &60);

    assert_eq!(
        setup.factory.try_withdraw(&setup.pool_id, &user, &41),
        Err(Ok(ErrorCode::InsufficientBalance))
    );

    setup.factory.withdraw(&setup.pool_id, &user, &40);

    let member = setup.factory.query_member(&setup.pool_id, &user);
    assert_eq!(member.available, 0);
    assert_eq!(member.staked, 60);
    assert_eq!(member.total_withdrawn, 40);
    assert_eq!(setup.stake_token.balance(&user), 40);
    assert_eq!(setup.factory.query_pool(&setup.pool_id).stake_vault, 60);
}

#[test]
fn claim_before_staking_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = PoolSetup::new(&env, interest_rate(10, 100));
    let user = setup.member(&env, 100);
    setup.factory.deposit(&setup.pool_id, &user, &100);

    set_time(&env, POOL_START + 10);
    assert_eq!(
        setup.factory.try_claim_reward(&setup.pool_id, &user),
        Err(Ok(ErrorCode::NotStaked))
    );
}

#[test]
fn balances_stay_consistent_across_members() {
    let env = Env::default();
    env.mock_all_auths();

    let setup = PoolSetup::new(&env, proportional(1_000, 100));
    let alice = setup.member(&env, 500);
    let bob = setup.member(&env, 300);
    let members = [&alice, &bob];

    setup.factory.deposit(&setup.pool_id, &alice, &500);
    setup.factory.stake(&setup.pool_id, &alice, &400);
    assert_balances_consistent(&setup, &members);

    set_time(&env, POOL_START + 5);
    setup.factory.deposit(&setup.pool_id, &bob, &300);
    setup.factory.stake(&setup.pool_id, &bob, &300);
    assert_balances_consistent(&setup, &members);

    set_time(&env, POOL_START + 20);
    setup.factory.start_unstake(&setup.pool_id, &alice, &150);
    setup.factory.withdraw(&setup.pool_id, &alice, &100);
    assert_balances_consistent(&setup, &members);

    set_time(&env, POOL_START + 200);
    setup.factory.end_unstake(&setup.pool_id, &alice);
    setup.factory.claim_reward(&setup.pool_id, &bob);
    setup.factory.start_unstake(&setup.pool_id, &bob, &300);
    assert_balances_consistent(&setup, &members);

    let pool = setup.factory.query_pool(&setup.pool_id);
    assert_eq!(pool.stakes_sum, 250);
    assert_eq!(pool.stake_vault, 700);
    assert_eq!(setup.stake_token.balance(&setup.factory.address), 700);
}
