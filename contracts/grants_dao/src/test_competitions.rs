extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::invariants::assert_competition_invariants;
use crate::testutils::{amounts, create_competition, generate, pool, setup, setup_funded, text};
use crate::{Error, Status};

#[test]
fn test_create_competition() {
    let s = setup();

    let competition = create_competition(&s, "HACK", &[400, 300, 150, 150]);

    assert_eq!(competition.status, Status::Active);
    assert_eq!(competition.total_bounty, 1_000);
    assert_eq!(s.client.count_competitions(), 1);
    assert_eq!(s.client.get_competition(&text(&s.env, "HACK")), competition);
    assert_competition_invariants(&competition);
}

#[test]
fn test_create_competition_validation() {
    let s = setup();
    create_competition(&s, "HACK", &[400]);

    let duplicate = s.client.try_create_competition(
        &s.admin,
        &text(&s.env, "HACK"),
        &text(&s.env, "t"),
        &text(&s.env, "d"),
        &s.token.address,
        &0,
        &amounts(&s.env, &[1]),
    );
    assert_eq!(duplicate, Err(Ok(Error::DuplicateKey)));

    let no_places = s.client.try_create_competition(
        &s.admin,
        &text(&s.env, "EMPTY"),
        &text(&s.env, "t"),
        &text(&s.env, "d"),
        &s.token.address,
        &0,
        &amounts(&s.env, &[]),
    );
    assert_eq!(no_places, Err(Ok(Error::InvalidSchedule)));

    let negative_bounty = s.client.try_create_competition(
        &s.admin,
        &text(&s.env, "NEG"),
        &text(&s.env, "t"),
        &text(&s.env, "d"),
        &s.token.address,
        &-1,
        &amounts(&s.env, &[1]),
    );
    assert_eq!(negative_bounty, Err(Ok(Error::InvalidAmount)));

    let stranger = Address::generate(&s.env);
    let unauthorized = s.client.try_create_competition(
        &stranger,
        &text(&s.env, "OTHER"),
        &text(&s.env, "t"),
        &text(&s.env, "d"),
        &s.token.address,
        &0,
        &amounts(&s.env, &[1]),
    );
    assert_eq!(unauthorized, Err(Ok(Error::Unauthorized)));

    assert_eq!(s.client.count_competitions(), 1);
}

#[test]
fn test_complete_competition_requires_one_winner_per_place() {
    let s = setup_funded(1_000);
    let key = text(&s.env, "HACK");
    create_competition(&s, "HACK", &[400, 300, 150, 150]);

    let too_few = generate(&s.env, 3);
    assert_eq!(
        s.client.try_complete_competition(&s.admin, &key, &too_few),
        Err(Ok(Error::WinnersLengthInvalid))
    );
    assert_eq!(pool(&s), 1_000);

    let winners = generate(&s.env, 4);
    let done = s.client.complete_competition(&s.admin, &key, &winners);

    assert_eq!(done.status, Status::Completed);
    let expected = [400i128, 300, 150, 150];
    for (winner, prize) in winners.iter().zip(expected) {
        assert_eq!(s.token.balance(&winner), prize);
    }
    assert_eq!(pool(&s), 0);
}

#[test]
fn test_underfunded_competition_pays_nobody() {
    let s = setup_funded(999);
    let key = text(&s.env, "HACK");
    create_competition(&s, "HACK", &[400, 300, 150, 150]);
    let winners = generate(&s.env, 4);

    assert_eq!(
        s.client.try_complete_competition(&s.admin, &key, &winners),
        Err(Ok(Error::InsufficientBalance))
    );

    for winner in winners.iter() {
        assert_eq!(s.token.balance(&winner), 0);
    }
    assert_eq!(pool(&s), 999);
    assert_eq!(s.client.get_competition(&key).status, Status::Active);
}

#[test]
fn test_terminal_competitions_cannot_complete() {
    let s = setup_funded(10_000);
    let done = text(&s.env, "DONE");
    let dropped = text(&s.env, "DROPPED");
    create_competition(&s, "DONE", &[100]);
    create_competition(&s, "DROPPED", &[100]);
    let winners = generate(&s.env, 1);

    s.client.complete_competition(&s.admin, &done, &winners);
    s.client.cancel_competition(&s.admin, &dropped, &None);

    assert_eq!(
        s.client.try_complete_competition(&s.admin, &done, &winners),
        Err(Ok(Error::NotActive))
    );
    assert_eq!(
        s.client.try_complete_competition(&s.admin, &dropped, &winners),
        Err(Ok(Error::NotActive))
    );
    assert_eq!(
        s.client.try_cancel_competition(&s.admin, &done, &None),
        Err(Ok(Error::NotActive))
    );
    assert_eq!(pool(&s), 9_900);
}

#[test]
fn test_unknown_competition() {
    let s = setup_funded(1_000);
    let key = text(&s.env, "MISSING");
    let winners = generate(&s.env, 1);

    assert_eq!(
        s.client.try_complete_competition(&s.admin, &key, &winners),
        Err(Ok(Error::NotFound))
    );
    assert_eq!(
        s.client.try_cancel_competition(&s.admin, &key, &None),
        Err(Ok(Error::NotFound))
    );
    assert_eq!(s.client.try_get_competition(&key), Err(Ok(Error::NotFound)));
}
