//! # Initiative registry
//!
//! Initiatives follow the grant lifecycle with one difference: they are
//! created without a beneficiary, and neither [`progress`] nor [`complete`]
//! releases anything until [`assign`] has set one.

use soroban_sdk::{Address, Env, String, Vec};

use crate::custodian;
use crate::events::{self, Family, Payee};
use crate::schedule;
use crate::storage::{
    has_initiative, insert_initiative, load_initiative_config, load_initiative_state,
    save_initiative_state,
};
use crate::types::{Initiative, Status};
use crate::Error;

pub fn create(
    env: &Env,
    key: String,
    title: String,
    description: String,
    milestones: Vec<i128>,
    currency: Address,
) -> Result<Initiative, Error> {
    if has_initiative(env, &key) {
        return Err(Error::DuplicateKey);
    }
    schedule::validate(&milestones)?;

    let initiative = Initiative {
        key,
        title,
        description,
        milestones,
        current_milestone: 0,
        status: Status::Active,
        currency,
        receiver: None,
    };
    insert_initiative(env, &initiative);

    events::new_initiative(env, &initiative.key);
    Ok(initiative)
}

/// Set or replace the beneficiary. This is also the reassignment path.
pub fn assign(env: &Env, key: &String, receiver: Address) -> Result<Initiative, Error> {
    let config = load_initiative_config(env, key)?;
    let mut state = load_initiative_state(env, key)?;
    if state.status != Status::Active {
        return Err(Error::NotActive);
    }

    state.receiver = Some(receiver.clone());
    save_initiative_state(env, key, &state);

    events::assigned(env, Payee::Initiative, key, &receiver);
    Ok(Initiative::from_parts(config, state))
}

/// Release the next tranche; the last one also completes the initiative.
pub fn progress(env: &Env, key: &String) -> Result<Initiative, Error> {
    let config = load_initiative_config(env, key)?;
    let mut state = load_initiative_state(env, key)?;
    if state.status != Status::Active {
        return Err(Error::NotActive);
    }
    let receiver = state.receiver.clone().ok_or(Error::NotAssigned)?;
    let amount = schedule::next_tranche(&config.milestones, state.current_milestone)?;

    custodian::pay(env, &config.currency, &receiver, amount)?;

    state.current_milestone += 1;
    let finished = state.current_milestone == config.milestones.len();
    if finished {
        state.status = Status::Completed;
    }
    save_initiative_state(env, key, &state);

    events::milestone_released(
        env,
        Payee::Initiative,
        key,
        amount,
        &receiver,
        &config.currency,
    );
    if finished {
        events::completed(env, Family::Initiative, key);
    }
    Ok(Initiative::from_parts(config, state))
}

pub fn cancel(env: &Env, key: &String, reason: String) -> Result<Initiative, Error> {
    let config = load_initiative_config(env, key)?;
    let mut state = load_initiative_state(env, key)?;
    if state.status == Status::Completed {
        return Err(Error::NotActive);
    }

    state.status = Status::Cancelled;
    save_initiative_state(env, key, &state);

    events::cancelled(env, Family::Initiative, key, &reason);
    Ok(Initiative::from_parts(config, state))
}

/// Pay every remaining tranche to the assigned beneficiary and close.
pub fn complete(env: &Env, key: &String) -> Result<Initiative, Error> {
    let config = load_initiative_config(env, key)?;
    let mut state = load_initiative_state(env, key)?;
    if state.status != Status::Active {
        return Err(Error::NotActive);
    }
    let receiver = state.receiver.clone().ok_or(Error::NotAssigned)?;
    let amount = schedule::remaining(&config.milestones, state.current_milestone)?;

    custodian::pay(env, &config.currency, &receiver, amount)?;

    state.current_milestone = config.milestones.len();
    state.status = Status::Completed;
    save_initiative_state(env, key, &state);

    events::completed(env, Family::Initiative, key);
    Ok(Initiative::from_parts(config, state))
}

pub fn milestones(env: &Env, key: &String) -> Result<Vec<i128>, Error> {
    Ok(load_initiative_config(env, key)?.milestones)
}
