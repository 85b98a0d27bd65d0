//! # Competition registry
//!
//! A competition pays out once: every ranked winner in the same call, or
//! nobody. The number of ranks is fixed at creation by the length of
//! `place_amounts`.

use soroban_sdk::{Address, Env, String, Vec};

use crate::custodian;
use crate::events::{self, Family};
use crate::storage::{
    has_competition, insert_competition, load_competition_config, load_competition_status,
    save_competition_status,
};
use crate::types::{Competition, Status};
use crate::Error;

pub fn create(
    env: &Env,
    key: String,
    title: String,
    description: String,
    currency: Address,
    total_bounty: i128,
    place_amounts: Vec<i128>,
) -> Result<Competition, Error> {
    if has_competition(env, &key) {
        return Err(Error::DuplicateKey);
    }
    if total_bounty < 0 {
        return Err(Error::InvalidAmount);
    }
    if place_amounts.is_empty() {
        return Err(Error::InvalidSchedule);
    }
    let mut total: i128 = 0;
    for amount in place_amounts.iter() {
        if amount <= 0 {
            return Err(Error::InvalidSchedule);
        }
        total = total.checked_add(amount).ok_or(Error::InvalidSchedule)?;
    }

    let competition = Competition {
        key,
        title,
        description,
        currency,
        total_bounty,
        place_amounts,
        status: Status::Active,
    };
    insert_competition(env, &competition);

    events::new_competition(
        env,
        &competition.key,
        competition.total_bounty,
        &competition.place_amounts,
    );
    Ok(competition)
}

/// Pay `place_amounts[i]` to `winners[i]` for every rank and close.
pub fn complete(env: &Env, key: &String, winners: Vec<Address>) -> Result<Competition, Error> {
    let config = load_competition_config(env, key)?;
    let status = load_competition_status(env, key)?;
    if status != Status::Active {
        return Err(Error::NotActive);
    }
    if winners.len() != config.place_amounts.len() {
        return Err(Error::WinnersLengthInvalid);
    }

    custodian::pay_batch(env, &config.currency, &winners, &config.place_amounts)?;

    save_competition_status(env, key, Status::Completed);
    events::completed(env, Family::Competition, key);
    Ok(Competition::from_parts(config, Status::Completed))
}

pub fn cancel(env: &Env, key: &String, reason: String) -> Result<Competition, Error> {
    let config = load_competition_config(env, key)?;
    let status = load_competition_status(env, key)?;
    if status == Status::Completed {
        return Err(Error::NotActive);
    }

    save_competition_status(env, key, Status::Cancelled);
    events::cancelled(env, Family::Competition, key, &reason);
    Ok(Competition::from_parts(config, Status::Cancelled))
}
