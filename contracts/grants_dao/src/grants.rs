//! # Grant registry
//!
//! Lifecycle of grants: creation with a fixed milestone schedule and a
//! beneficiary, stepwise release, beneficiary reassignment, cancellation and
//! fast-forward completion.
//!
//! Every operation validates all of its preconditions before the first
//! write or transfer, so a failed call leaves storage and balances untouched.

use soroban_sdk::{Address, Env, String, Vec};

use crate::custodian;
use crate::events::{self, Family, Payee};
use crate::schedule;
use crate::storage::{
    has_grant, insert_grant, load_grant_config, load_grant_state, save_grant_state,
};
use crate::types::{Grant, Status};
use crate::Error;

#[allow(clippy::too_many_arguments)]
pub fn create(
    env: &Env,
    key: String,
    title: String,
    description: String,
    milestones: Vec<i128>,
    currency: Address,
    proposer: String,
    receiver: Address,
) -> Result<Grant, Error> {
    if has_grant(env, &key) {
        return Err(Error::DuplicateKey);
    }
    schedule::validate(&milestones)?;

    let grant = Grant {
        key,
        title,
        description,
        milestones,
        current_milestone: 0,
        status: Status::Active,
        currency,
        proposer,
        receiver,
    };
    insert_grant(env, &grant);

    events::new_grant(env, &grant.key, &grant.proposer, &grant.receiver);
    Ok(grant)
}

/// Release the next tranche to the current beneficiary.
///
/// Releasing the last tranche also completes the grant in the same call:
/// the stored state goes straight from `(len - 1, Active)` to
/// `(len, Completed)`.
pub fn progress(env: &Env, key: &String) -> Result<Grant, Error> {
    let config = load_grant_config(env, key)?;
    let mut state = load_grant_state(env, key)?;
    if state.status != Status::Active {
        return Err(Error::NotActive);
    }
    let amount = schedule::next_tranche(&config.milestones, state.current_milestone)?;

    custodian::pay(env, &config.currency, &state.receiver, amount)?;

    state.current_milestone += 1;
    let finished = state.current_milestone == config.milestones.len();
    if finished {
        state.status = Status::Completed;
    }
    save_grant_state(env, key, &state);

    events::milestone_released(
        env,
        Payee::Grant,
        key,
        amount,
        &state.receiver,
        &config.currency,
    );
    if finished {
        events::completed(env, Family::Grant, key);
    }
    Ok(Grant::from_parts(config, state))
}

/// Point future releases at `receiver`. Tranches already paid stay where
/// they went.
pub fn reassign(env: &Env, key: &String, receiver: Address) -> Result<Grant, Error> {
    let config = load_grant_config(env, key)?;
    let mut state = load_grant_state(env, key)?;
    if state.status != Status::Active {
        return Err(Error::NotActive);
    }

    state.receiver = receiver;
    save_grant_state(env, key, &state);

    events::assigned(env, Payee::Grant, key, &state.receiver);
    Ok(Grant::from_parts(config, state))
}

/// Cancel the grant. Cancelling an already-cancelled grant is accepted and
/// re-publishes the event; a completed grant stays completed.
pub fn cancel(env: &Env, key: &String, reason: String) -> Result<Grant, Error> {
    let config = load_grant_config(env, key)?;
    let mut state = load_grant_state(env, key)?;
    if state.status == Status::Completed {
        return Err(Error::NotActive);
    }

    state.status = Status::Cancelled;
    save_grant_state(env, key, &state);

    events::cancelled(env, Family::Grant, key, &reason);
    Ok(Grant::from_parts(config, state))
}

/// Pay every remaining tranche at once and close the grant.
pub fn complete(env: &Env, key: &String) -> Result<Grant, Error> {
    let config = load_grant_config(env, key)?;
    let mut state = load_grant_state(env, key)?;
    if state.status != Status::Active {
        return Err(Error::NotActive);
    }
    let amount = schedule::remaining(&config.milestones, state.current_milestone)?;

    custodian::pay(env, &config.currency, &state.receiver, amount)?;

    state.current_milestone = config.milestones.len();
    state.status = Status::Completed;
    save_grant_state(env, key, &state);

    events::completed(env, Family::Grant, key);
    Ok(Grant::from_parts(config, state))
}

pub fn milestones(env: &Env, key: &String) -> Result<Vec<i128>, Error> {
    Ok(load_grant_config(env, key)?.milestones)
}
