//! # Grants DAO Contract
//!
//! Custody and milestone-gated disbursement of a pooled token balance for a
//! grants-and-incentives program. A single administrator records funding
//! commitments and triggers every release; the contract enforces solvency
//! and the lifecycle of each commitment.
//!
//! | Family       | Entry Point(s)                                                   |
//! |--------------|------------------------------------------------------------------|
//! | Bootstrap    | [`GrantsDao::init`], `transfer_admin`, `admin`                   |
//! | Grants       | `create_grant`, `progress_grant`, `reassign_grant`, `cancel_grant`, `complete_grant` |
//! | Initiatives  | `create_initiative`, `assign_initiative`, `progress_initiative`, `cancel_initiative`, `complete_initiative` |
//! | Competitions | `create_competition`, `complete_competition`, `cancel_competition` |
//! | Custody      | `withdraw`, `pool_balance`                                       |
//! | Queries      | `get_*`, `count_*`, `grant_milestones`, `initiative_milestones`  |
//!
//! ## Architecture
//!
//! Authorization lives in [`access`], payouts in [`custodian`], storage in
//! [`storage`]. Each entity family has its own registry module (`grants`,
//! `initiatives`, `competitions`); registries never call each other. This
//! file holds only the entry points, which check the administrator and
//! delegate.
//!
//! Every entry point either applies all of its writes and transfers or
//! returns an error before the first one.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};

pub mod access;
mod competitions;
mod custodian;
pub mod events;
mod grants;
mod initiatives;
mod schedule;
mod storage;
mod types;

#[cfg(test)]
mod test_competitions;
#[cfg(test)]
mod test_custody;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_initiatives;
#[cfg(test)]
mod testutils;

pub use types::{Competition, Grant, Initiative, Status};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized         = 1,
    DuplicateKey         = 2,
    NotFound             = 3,
    NotActive            = 4,
    MilestonesExhausted  = 5,
    NotAssigned          = 6,
    InsufficientBalance  = 7,
    WinnersLengthInvalid = 8,
    NotInitialized       = 9,
    AlreadyInitialized   = 10,
    InvalidSchedule      = 11,
    InvalidAmount        = 12,
    Overflow             = 13,
}

#[contract]
pub struct GrantsDao;

fn reason_or_empty(env: &Env, reason: Option<String>) -> String {
    reason.unwrap_or_else(|| String::from_str(env, ""))
}

#[contractimpl]
impl GrantsDao {
    // ─────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract and set its administrator.
    ///
    /// Must be called exactly once after deployment; until then every
    /// mutating entry point fails with `Unauthorized`.
    pub fn init(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        access::init_admin(&env, &admin)
    }

    /// Hand the administrator capability to `new_admin`.
    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        access::transfer_admin(&env, &caller, &new_admin)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        access::admin(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Grants
    // ─────────────────────────────────────────────────────────

    /// Record a new grant paying `milestones` in order to `receiver`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_grant(
        env: Env,
        caller: Address,
        key: String,
        title: String,
        description: String,
        milestones: Vec<i128>,
        currency: Address,
        proposer: String,
        receiver: Address,
    ) -> Result<Grant, Error> {
        access::require_admin(&env, &caller)?;
        grants::create(
            &env,
            key,
            title,
            description,
            milestones,
            currency,
            proposer,
            receiver,
        )
    }

    /// Release the grant's next milestone. The final release also completes it.
    pub fn progress_grant(env: Env, caller: Address, key: String) -> Result<Grant, Error> {
        access::require_admin(&env, &caller)?;
        grants::progress(&env, &key)
    }

    pub fn reassign_grant(
        env: Env,
        caller: Address,
        key: String,
        receiver: Address,
    ) -> Result<Grant, Error> {
        access::require_admin(&env, &caller)?;
        grants::reassign(&env, &key, receiver)
    }

    /// Cancel a grant. `reason` defaults to the empty string.
    pub fn cancel_grant(
        env: Env,
        caller: Address,
        key: String,
        reason: Option<String>,
    ) -> Result<Grant, Error> {
        access::require_admin(&env, &caller)?;
        let reason = reason_or_empty(&env, reason);
        grants::cancel(&env, &key, reason)
    }

    /// Pay all remaining milestones at once and complete the grant.
    pub fn complete_grant(env: Env, caller: Address, key: String) -> Result<Grant, Error> {
        access::require_admin(&env, &caller)?;
        grants::complete(&env, &key)
    }

    // ─────────────────────────────────────────────────────────
    // Initiatives
    // ─────────────────────────────────────────────────────────

    /// Record a new initiative. It has no beneficiary until assigned.
    pub fn create_initiative(
        env: Env,
        caller: Address,
        key: String,
        title: String,
        description: String,
        milestones: Vec<i128>,
        currency: Address,
    ) -> Result<Initiative, Error> {
        access::require_admin(&env, &caller)?;
        initiatives::create(&env, key, title, description, milestones, currency)
    }

    /// Set or replace the initiative's beneficiary.
    pub fn assign_initiative(
        env: Env,
        caller: Address,
        key: String,
        receiver: Address,
    ) -> Result<Initiative, Error> {
        access::require_admin(&env, &caller)?;
        initiatives::assign(&env, &key, receiver)
    }

    pub fn progress_initiative(
        env: Env,
        caller: Address,
        key: String,
    ) -> Result<Initiative, Error> {
        access::require_admin(&env, &caller)?;
        initiatives::progress(&env, &key)
    }

    pub fn cancel_initiative(
        env: Env,
        caller: Address,
        key: String,
        reason: Option<String>,
    ) -> Result<Initiative, Error> {
        access::require_admin(&env, &caller)?;
        let reason = reason_or_empty(&env, reason);
        initiatives::cancel(&env, &key, reason)
    }

    pub fn complete_initiative(
        env: Env,
        caller: Address,
        key: String,
    ) -> Result<Initiative, Error> {
        access::require_admin(&env, &caller)?;
        initiatives::complete(&env, &key)
    }

    // ─────────────────────────────────────────────────────────
    // Competitions
    // ─────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    pub fn create_competition(
        env: Env,
        caller: Address,
        key: String,
        title: String,
        description: String,
        currency: Address,
        total_bounty: i128,
        place_amounts: Vec<i128>,
    ) -> Result<Competition, Error> {
        access::require_admin(&env, &caller)?;
        competitions::create(
            &env,
            key,
            title,
            description,
            currency,
            total_bounty,
            place_amounts,
        )
    }

    /// Pay every ranked winner in one call. `winners[0]` takes first place.
    pub fn complete_competition(
        env: Env,
        caller: Address,
        key: String,
        winners: Vec<Address>,
    ) -> Result<Competition, Error> {
        access::require_admin(&env, &caller)?;
        competitions::complete(&env, &key, winners)
    }

    pub fn cancel_competition(
        env: Env,
        caller: Address,
        key: String,
        reason: Option<String>,
    ) -> Result<Competition, Error> {
        access::require_admin(&env, &caller)?;
        let reason = reason_or_empty(&env, reason);
        competitions::cancel(&env, &key, reason)
    }

    // ─────────────────────────────────────────────────────────
    // Custody
    // ─────────────────────────────────────────────────────────

    /// Move pool funds not tied to any commitment out of the contract.
    pub fn withdraw(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
        currency: Address,
    ) -> Result<(), Error> {
        access::require_admin(&env, &caller)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        custodian::pay(&env, &currency, &to, amount)?;
        events::withdrawal(&env, &to, amount, &currency);
        Ok(())
    }

    /// The contract's balance in `currency`.
    pub fn pool_balance(env: Env, currency: Address) -> i128 {
        custodian::balance(&env, &currency)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_grant(env: Env, key: String) -> Result<Grant, Error> {
        storage::load_grant(&env, &key)
    }

    pub fn get_initiative(env: Env, key: String) -> Result<Initiative, Error> {
        storage::load_initiative(&env, &key)
    }

    pub fn get_competition(env: Env, key: String) -> Result<Competition, Error> {
        storage::load_competition(&env, &key)
    }

    pub fn count_grants(env: Env) -> u32 {
        storage::grant_count(&env)
    }

    pub fn count_initiatives(env: Env) -> u32 {
        storage::initiative_count(&env)
    }

    pub fn count_competitions(env: Env) -> u32 {
        storage::competition_count(&env)
    }

    pub fn grant_milestones(env: Env, key: String) -> Result<Vec<i128>, Error> {
        grants::milestones(&env, &key)
    }

    pub fn initiative_milestones(env: Env, key: String) -> Result<Vec<i128>, Error> {
        initiatives::milestones(&env, &key)
    }
}
