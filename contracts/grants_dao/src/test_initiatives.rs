extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::invariants::{
    assert_conserved, assert_initiative_invariants, assert_initiative_unchanged,
};
use crate::testutils::{amounts, create_initiative, pool, setup, setup_funded, text};
use crate::{Error, Status};

#[test]
fn test_create_initiative_has_no_beneficiary() {
    let s = setup();

    let initiative = create_initiative(&s, "UIOP", &[250, 250, 250, 250]);

    assert_eq!(initiative.receiver, None);
    assert_eq!(initiative.status, Status::Active);
    assert_eq!(s.client.count_initiatives(), 1);
    assert_eq!(s.client.get_initiative(&text(&s.env, "UIOP")), initiative);
    assert_eq!(
        s.client.initiative_milestones(&text(&s.env, "UIOP")),
        amounts(&s.env, &[250, 250, 250, 250])
    );
}

#[test]
fn test_create_initiative_rejects_duplicate_key() {
    let s = setup();
    create_initiative(&s, "UIOP", &[250]);

    let result = s.client.try_create_initiative(
        &s.admin,
        &text(&s.env, "UIOP"),
        &text(&s.env, "t"),
        &text(&s.env, "d"),
        &amounts(&s.env, &[1]),
        &s.token.address,
    );

    assert_eq!(result, Err(Ok(Error::DuplicateKey)));
    assert_eq!(s.client.count_initiatives(), 1);
}

#[test]
fn test_non_admin_cannot_create_initiative() {
    let s = setup();
    let stranger = Address::generate(&s.env);

    let result = s.client.try_create_initiative(
        &stranger,
        &text(&s.env, "UIOP"),
        &text(&s.env, "t"),
        &text(&s.env, "d"),
        &amounts(&s.env, &[1]),
        &s.token.address,
    );

    assert_eq!(result, Err(Ok(Error::Unauthorized)));
}

#[test]
fn test_unassigned_initiative_cannot_release() {
    let s = setup_funded(10_000);
    let key = text(&s.env, "UIOP");
    create_initiative(&s, "UIOP", &[250, 250]);
    let before = s.client.get_initiative(&key);

    assert_eq!(
        s.client.try_progress_initiative(&s.admin, &key),
        Err(Ok(Error::NotAssigned))
    );
    assert_eq!(
        s.client.try_complete_initiative(&s.admin, &key),
        Err(Ok(Error::NotAssigned))
    );

    assert_initiative_unchanged(&before, &s.client.get_initiative(&key));
    assert_eq!(pool(&s), 10_000);
}

#[test]
fn test_assigned_initiative_progresses_to_completion() {
    let s = setup_funded(100_000);
    let receiver = Address::generate(&s.env);
    let key = text(&s.env, "UIOP");
    create_initiative(&s, "UIOP", &[250, 500, 100, 2000]);

    let initiative = s.client.assign_initiative(&s.admin, &key, &receiver);
    assert_eq!(initiative.receiver, Some(receiver.clone()));

    let first = s.client.progress_initiative(&s.admin, &key);
    assert_eq!(first.current_milestone, 1);
    assert_eq!(s.token.balance(&receiver), 250);
    assert_eq!(pool(&s), 99_750);

    for _ in 0..3 {
        s.client.progress_initiative(&s.admin, &key);
    }
    let done = s.client.get_initiative(&key);
    assert_eq!(done.current_milestone, 4);
    assert_eq!(done.status, Status::Completed);
    assert_initiative_invariants(&done);
    assert_conserved(100_000, pool(&s), s.token.balance(&receiver));
    assert_eq!(s.token.balance(&receiver), 2850);

    assert_eq!(
        s.client.try_progress_initiative(&s.admin, &key),
        Err(Ok(Error::NotActive))
    );
}

#[test]
fn test_assign_is_also_reassignment() {
    let s = setup_funded(10_000);
    let first = Address::generate(&s.env);
    let second = Address::generate(&s.env);
    let key = text(&s.env, "UIOP");
    create_initiative(&s, "UIOP", &[300, 700]);

    s.client.assign_initiative(&s.admin, &key, &first);
    s.client.progress_initiative(&s.admin, &key);
    s.client.assign_initiative(&s.admin, &key, &second);
    s.client.progress_initiative(&s.admin, &key);

    assert_eq!(s.token.balance(&first), 300);
    assert_eq!(s.token.balance(&second), 700);
}

#[test]
fn test_initiative_insufficient_balance_changes_nothing() {
    let s = setup_funded(200);
    let receiver = Address::generate(&s.env);
    let key = text(&s.env, "UIOP");
    create_initiative(&s, "UIOP", &[250]);
    s.client.assign_initiative(&s.admin, &key, &receiver);
    let before = s.client.get_initiative(&key);

    assert_eq!(
        s.client.try_progress_initiative(&s.admin, &key),
        Err(Ok(Error::InsufficientBalance))
    );

    assert_initiative_unchanged(&before, &s.client.get_initiative(&key));
    assert_eq!(pool(&s), 200);
}

#[test]
fn test_complete_initiative_pays_remaining() {
    let s = setup_funded(5_000);
    let receiver = Address::generate(&s.env);
    let key = text(&s.env, "UIOP");
    create_initiative(&s, "UIOP", &[1_000, 1_000, 1_000]);
    s.client.assign_initiative(&s.admin, &key, &receiver);
    s.client.progress_initiative(&s.admin, &key);

    let done = s.client.complete_initiative(&s.admin, &key);

    assert_eq!(done.status, Status::Completed);
    assert_eq!(done.current_milestone, 3);
    assert_eq!(s.token.balance(&receiver), 3_000);
    assert_eq!(pool(&s), 2_000);
}

#[test]
fn test_cancelled_initiative_is_frozen() {
    let s = setup_funded(5_000);
    let receiver = Address::generate(&s.env);
    let key = text(&s.env, "UIOP");
    create_initiative(&s, "UIOP", &[1_000, 1_000]);

    let cancelled = s
        .client
        .cancel_initiative(&s.admin, &key, &Some(text(&s.env, "scope dropped")));
    assert_eq!(cancelled.status, Status::Cancelled);

    assert_eq!(
        s.client.try_assign_initiative(&s.admin, &key, &receiver),
        Err(Ok(Error::NotActive))
    );
    assert_eq!(
        s.client.try_progress_initiative(&s.admin, &key),
        Err(Ok(Error::NotActive))
    );
    assert_eq!(
        s.client.try_complete_initiative(&s.admin, &key),
        Err(Ok(Error::NotActive))
    );
    assert_eq!(s.client.get_initiative(&key).receiver, None);
    assert_eq!(pool(&s), 5_000);
}

#[test]
fn test_unknown_initiative() {
    let s = setup();
    let key = text(&s.env, "MISSING");
    let receiver = Address::generate(&s.env);

    assert_eq!(
        s.client.try_assign_initiative(&s.admin, &key, &receiver),
        Err(Ok(Error::NotFound))
    );
    assert_eq!(
        s.client.try_cancel_initiative(&s.admin, &key, &None),
        Err(Ok(Error::NotFound))
    );
    assert_eq!(
        s.client.try_initiative_milestones(&key),
        Err(Ok(Error::NotFound))
    );
}
