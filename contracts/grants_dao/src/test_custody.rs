extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::testutils::{create_grant, pool, setup, setup_funded, text};
use crate::{Error, Status};

#[test]
fn test_withdraw_moves_unallocated_funds() {
    let s = setup_funded(1_000);
    let treasury = Address::generate(&s.env);

    s.client.withdraw(&s.admin, &treasury, &400, &s.token.address);

    assert_eq!(s.token.balance(&treasury), 400);
    assert_eq!(pool(&s), 600);
    assert_eq!(s.client.pool_balance(&s.token.address), 600);
}

#[test]
fn test_withdraw_checks_solvency_and_amount() {
    let s = setup_funded(100);
    let treasury = Address::generate(&s.env);

    assert_eq!(
        s.client
            .try_withdraw(&s.admin, &treasury, &101, &s.token.address),
        Err(Ok(Error::InsufficientBalance))
    );
    assert_eq!(
        s.client.try_withdraw(&s.admin, &treasury, &0, &s.token.address),
        Err(Ok(Error::InvalidAmount))
    );
    assert_eq!(pool(&s), 100);
}

#[test]
fn test_non_admin_cannot_withdraw() {
    let s = setup_funded(100);
    let thief = Address::generate(&s.env);

    assert_eq!(
        s.client.try_withdraw(&thief, &thief, &100, &s.token.address),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(s.token.balance(&thief), 0);
}

#[test]
fn test_pool_is_shared_across_grants() {
    // No per-grant escrow: the second grant drains what the first relied on.
    let s = setup_funded(300);
    let a = Address::generate(&s.env);
    let b = Address::generate(&s.env);
    create_grant(&s, "A", &[200], &a);
    create_grant(&s, "B", &[200], &b);

    s.client.progress_grant(&s.admin, &text(&s.env, "A"));

    assert_eq!(
        s.client.try_progress_grant(&s.admin, &text(&s.env, "B")),
        Err(Ok(Error::InsufficientBalance))
    );
    assert_eq!(
        s.client.get_grant(&text(&s.env, "B")).status,
        Status::Active
    );
}

#[test]
fn test_init_only_once_and_admin_transfer() {
    let s = setup();
    let successor = Address::generate(&s.env);

    assert_eq!(
        s.client.try_init(&successor),
        Err(Ok(Error::AlreadyInitialized))
    );
    assert_eq!(s.client.admin(), s.admin);

    s.client.transfer_admin(&s.admin, &successor);
    assert_eq!(s.client.admin(), successor);

    // The previous administrator has lost the capability.
    assert_eq!(
        s.client.try_transfer_admin(&s.admin, &s.admin),
        Err(Ok(Error::Unauthorized))
    );
    let receiver = Address::generate(&s.env);
    let result = s.client.try_create_grant(
        &s.admin,
        &text(&s.env, "X"),
        &text(&s.env, "t"),
        &text(&s.env, "d"),
        &crate::testutils::amounts(&s.env, &[1]),
        &s.token.address,
        &text(&s.env, "p"),
        &receiver,
    );
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
}
