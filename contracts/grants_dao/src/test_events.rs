extern crate std;

use soroban_sdk::{testutils::Address as _, Address, TryIntoVal};

use crate::events::{
    AdminChanged, Cancelled, Completed, MilestoneReleased, NewCompetition, NewGrant,
    NewInitiative, Reassigned, Withdrawal,
};
use crate::testutils::{
    amounts, create_competition, create_grant, create_initiative, events_named, generate,
    setup, setup_funded, text,
};

#[test]
fn test_new_grant_event() {
    let s = setup();
    let receiver = Address::generate(&s.env);

    create_grant(&s, "QWERTY", &[250, 250, 250, 250], &receiver);

    let published = events_named(&s, "new_grant");
    let last = published.last().expect("no new_grant event");
    let event: NewGrant = last.try_into_val(&s.env).unwrap();
    assert_eq!(
        event,
        NewGrant {
            key: text(&s.env, "QWERTY"),
            proposer: text(&s.env, "Danijel"),
            receiver,
        }
    );
}

#[test]
fn test_milestone_release_events() {
    let s = setup_funded(10_000);
    let receiver = Address::generate(&s.env);
    let key = text(&s.env, "QWERTY");
    create_grant(&s, "QWERTY", &[250, 500], &receiver);

    s.client.progress_grant(&s.admin, &key);
    let released = events_named(&s, "grant_milestone_released");
    let event: MilestoneReleased = released.last().unwrap().try_into_val(&s.env).unwrap();
    assert_eq!(
        event,
        MilestoneReleased {
            key: key.clone(),
            amount: 250,
            receiver: receiver.clone(),
            currency: s.token.address.clone(),
        }
    );
    assert!(events_named(&s, "grant_completed").is_empty());

    s.client.progress_grant(&s.admin, &key);
    let released = events_named(&s, "grant_milestone_released");
    let event: MilestoneReleased = released.last().unwrap().try_into_val(&s.env).unwrap();
    assert_eq!(event.amount, 500);
    let completed = events_named(&s, "grant_completed");
    let event: Completed = completed.last().unwrap().try_into_val(&s.env).unwrap();
    assert_eq!(event, Completed { key });
}

#[test]
fn test_reassign_and_cancel_grant_events() {
    let s = setup();
    let receiver = Address::generate(&s.env);
    let successor = Address::generate(&s.env);
    let key = text(&s.env, "QWERTY");
    create_grant(&s, "QWERTY", &[250], &receiver);

    s.client.reassign_grant(&s.admin, &key, &successor);
    let event: Reassigned = events_named(&s, "grant_reassigned")
        .last()
        .unwrap()
        .try_into_val(&s.env)
        .unwrap();
    assert_eq!(
        event,
        Reassigned {
            key: key.clone(),
            receiver: successor,
        }
    );

    s.client.cancel_grant(&s.admin, &key, &None);
    let event: Cancelled = events_named(&s, "grant_cancelled")
        .last()
        .unwrap()
        .try_into_val(&s.env)
        .unwrap();
    assert_eq!(
        event,
        Cancelled {
            key,
            reason: text(&s.env, ""),
        }
    );
}

#[test]
fn test_initiative_events() {
    let s = setup_funded(1_000);
    let receiver = Address::generate(&s.env);
    let key = text(&s.env, "UIOP");

    create_initiative(&s, "UIOP", &[400]);
    let event: NewInitiative = events_named(&s, "new_initiative")
        .last()
        .unwrap()
        .try_into_val(&s.env)
        .unwrap();
    assert_eq!(event, NewInitiative { key: key.clone() });

    s.client.assign_initiative(&s.admin, &key, &receiver);
    let event: Reassigned = events_named(&s, "initiative_assigned")
        .last()
        .unwrap()
        .try_into_val(&s.env)
        .unwrap();
    assert_eq!(event.receiver, receiver);

    s.client.progress_initiative(&s.admin, &key);
    let event: MilestoneReleased = events_named(&s, "initiative_milestone_released")
        .last()
        .unwrap()
        .try_into_val(&s.env)
        .unwrap();
    assert_eq!(event.amount, 400);
    assert_eq!(event.receiver, receiver);
    assert!(!events_named(&s, "initiative_completed").is_empty());
}

#[test]
fn test_competition_events() {
    let s = setup_funded(1_000);
    let key = text(&s.env, "HACK");

    create_competition(&s, "HACK", &[600, 400]);
    let event: NewCompetition = events_named(&s, "new_competition")
        .last()
        .unwrap()
        .try_into_val(&s.env)
        .unwrap();
    assert_eq!(
        event,
        NewCompetition {
            key: key.clone(),
            total_bounty: 1_000,
            place_amounts: amounts(&s.env, &[600, 400]),
        }
    );

    s.client
        .complete_competition(&s.admin, &key, &generate(&s.env, 2));
    let event: Completed = events_named(&s, "competition_completed")
        .last()
        .unwrap()
        .try_into_val(&s.env)
        .unwrap();
    assert_eq!(event, Completed { key });
}

#[test]
fn test_competition_cancel_publishes_only_cancellation() {
    let s = setup_funded(1_000);
    let key = text(&s.env, "HACK");

    create_competition(&s, "HACK", &[600, 400]);
    s.client
        .cancel_competition(&s.admin, &key, &Some(text(&s.env, "no entries")));

    let event: Cancelled = events_named(&s, "competition_cancelled")
        .last()
        .unwrap()
        .try_into_val(&s.env)
        .unwrap();
    assert_eq!(
        event,
        Cancelled {
            key,
            reason: text(&s.env, "no entries"),
        }
    );
    assert!(events_named(&s, "competition_completed").is_empty());
}

#[test]
fn test_withdrawal_and_admin_events() {
    let s = setup_funded(1_000);
    let to = Address::generate(&s.env);
    let successor = Address::generate(&s.env);

    s.client.withdraw(&s.admin, &to, &250, &s.token.address);
    let event: Withdrawal = events_named(&s, "withdrawal")
        .last()
        .unwrap()
        .try_into_val(&s.env)
        .unwrap();
    assert_eq!(
        event,
        Withdrawal {
            to,
            amount: 250,
            currency: s.token.address.clone(),
        }
    );

    s.client.transfer_admin(&s.admin, &successor);
    let event: AdminChanged = events_named(&s, "admin_changed")
        .last()
        .unwrap()
        .try_into_val(&s.env)
        .unwrap();
    assert_eq!(
        event,
        AdminChanged {
            previous: s.admin.clone(),
            admin: successor,
        }
    );
}
