//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the Grants DAO.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                | Type      | Description                     |
//! |--------------------|-----------|---------------------------------|
//! | `Admin`            | `Address` | Administrator of the DAO        |
//! | `GrantCount`       | `u32`     | Number of grants ever created   |
//! | `InitiativeCount`  | `u32`     | Number of initiatives created   |
//! | `CompetitionCount` | `u32`     | Number of competitions created  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type                | Description                  |
//! |----------------------|---------------------|------------------------------|
//! | `GrantConfig(key)`   | `GrantConfig`       | Immutable grant data         |
//! | `GrantState(key)`    | `GrantState`        | Index, status, beneficiary   |
//! | `InitConfig(key)`    | `InitiativeConfig`  | Immutable initiative data    |
//! | `InitState(key)`     | `InitiativeState`   | Index, status, beneficiary   |
//! | `CompConfig(key)`    | `CompetitionConfig` | Immutable competition data   |
//! | `CompStatus(key)`    | `Status`            | Competition status           |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Entities are never removed: terminal entities stay readable for audit.

use soroban_sdk::{contracttype, Address, Env, String};

use crate::types::{
    Competition, CompetitionConfig, Grant, GrantConfig, GrantState, Initiative,
    InitiativeConfig, InitiativeState, Status,
};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Keys of different entity families never collide, so a grant and an
/// initiative may share the same caller-supplied key.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    GrantCount,
    InitiativeCount,
    CompetitionCount,
    GrantConfig(String),
    GrantState(String),
    InitConfig(String),
    InitState(String),
    CompConfig(String),
    CompStatus(String),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

/// Retrieve the administrator, if the contract has been initialised.
pub fn get_admin(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Admin)
}

fn read_count(env: &Env, key: &DataKey) -> u32 {
    bump_instance(env);
    env.storage().instance().get(key).unwrap_or(0)
}

fn increment_count(env: &Env, key: &DataKey) {
    let current = read_count(env, key);
    env.storage().instance().set(key, &(current + 1));
}

pub fn grant_count(env: &Env) -> u32 {
    read_count(env, &DataKey::GrantCount)
}

pub fn initiative_count(env: &Env) -> u32 {
    read_count(env, &DataKey::InitiativeCount)
}

pub fn competition_count(env: &Env) -> u32 {
    read_count(env, &DataKey::CompetitionCount)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn write<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

fn read<V>(env: &Env, key: &DataKey) -> Result<V, Error>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value: V = env
        .storage()
        .persistent()
        .get(key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, key);
    Ok(value)
}

// Grants

pub fn has_grant(env: &Env, key: &String) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::GrantConfig(key.clone()))
}

/// Save config and initial state for a new grant and bump the grant counter.
pub fn insert_grant(env: &Env, grant: &Grant) {
    let config = GrantConfig {
        key: grant.key.clone(),
        title: grant.title.clone(),
        description: grant.description.clone(),
        milestones: grant.milestones.clone(),
        currency: grant.currency.clone(),
        proposer: grant.proposer.clone(),
    };
    let state = GrantState {
        current_milestone: grant.current_milestone,
        status: grant.status,
        receiver: grant.receiver.clone(),
    };
    write(env, &DataKey::GrantConfig(grant.key.clone()), &config);
    write(env, &DataKey::GrantState(grant.key.clone()), &state);
    increment_count(env, &DataKey::GrantCount);
}

pub fn load_grant_config(env: &Env, key: &String) -> Result<GrantConfig, Error> {
    read(env, &DataKey::GrantConfig(key.clone()))
}

pub fn load_grant_state(env: &Env, key: &String) -> Result<GrantState, Error> {
    read(env, &DataKey::GrantState(key.clone()))
}

pub fn save_grant_state(env: &Env, key: &String, state: &GrantState) {
    write(env, &DataKey::GrantState(key.clone()), state);
}

/// Load the full `Grant` by combining config and state.
pub fn load_grant(env: &Env, key: &String) -> Result<Grant, Error> {
    let config = load_grant_config(env, key)?;
    let state = load_grant_state(env, key)?;
    Ok(Grant::from_parts(config, state))
}

// Initiatives

pub fn has_initiative(env: &Env, key: &String) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::InitConfig(key.clone()))
}

pub fn insert_initiative(env: &Env, initiative: &Initiative) {
    let config = InitiativeConfig {
        key: initiative.key.clone(),
        title: initiative.title.clone(),
        description: initiative.description.clone(),
        milestones: initiative.milestones.clone(),
        currency: initiative.currency.clone(),
    };
    let state = InitiativeState {
        current_milestone: initiative.current_milestone,
        status: initiative.status,
        receiver: initiative.receiver.clone(),
    };
    write(env, &DataKey::InitConfig(initiative.key.clone()), &config);
    write(env, &DataKey::InitState(initiative.key.clone()), &state);
    increment_count(env, &DataKey::InitiativeCount);
}

pub fn load_initiative_config(env: &Env, key: &String) -> Result<InitiativeConfig, Error> {
    read(env, &DataKey::InitConfig(key.clone()))
}

pub fn load_initiative_state(env: &Env, key: &String) -> Result<InitiativeState, Error> {
    read(env, &DataKey::InitState(key.clone()))
}

pub fn save_initiative_state(env: &Env, key: &String, state: &InitiativeState) {
    write(env, &DataKey::InitState(key.clone()), state);
}

pub fn load_initiative(env: &Env, key: &String) -> Result<Initiative, Error> {
    let config = load_initiative_config(env, key)?;
    let state = load_initiative_state(env, key)?;
    Ok(Initiative::from_parts(config, state))
}

// Competitions

pub fn has_competition(env: &Env, key: &String) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::CompConfig(key.clone()))
}

pub fn insert_competition(env: &Env, competition: &Competition) {
    let config = CompetitionConfig {
        key: competition.key.clone(),
        title: competition.title.clone(),
        description: competition.description.clone(),
        currency: competition.currency.clone(),
        total_bounty: competition.total_bounty,
        place_amounts: competition.place_amounts.clone(),
    };
    write(env, &DataKey::CompConfig(competition.key.clone()), &config);
    write(
        env,
        &DataKey::CompStatus(competition.key.clone()),
        &competition.status,
    );
    increment_count(env, &DataKey::CompetitionCount);
}

pub fn load_competition_config(env: &Env, key: &String) -> Result<CompetitionConfig, Error> {
    read(env, &DataKey::CompConfig(key.clone()))
}

pub fn load_competition_status(env: &Env, key: &String) -> Result<Status, Error> {
    read(env, &DataKey::CompStatus(key.clone()))
}

pub fn save_competition_status(env: &Env, key: &String, status: Status) {
    write(env, &DataKey::CompStatus(key.clone()), &status);
}

pub fn load_competition(env: &Env, key: &String) -> Result<Competition, Error> {
    let config = load_competition_config(env, key)?;
    let status = load_competition_status(env, key)?;
    Ok(Competition::from_parts(config, status))
}
