//! # Types
//!
//! Shared data structures used across all modules of the Grants DAO contract.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! Grants and initiatives are internally stored as two separate ledger entries:
//!
//! - `*Config`: written once at creation; never mutated. Holds the title,
//!   description, milestone schedule and payment currency.
//! - `*State`: written on every progression, reassignment, cancellation and
//!   completion. Holds only the milestone index, status and beneficiary.
//!
//! The public API exposes the reconstructed [`Grant`] / [`Initiative`] structs.
//! Competitions follow the same pattern with [`CompetitionConfig`] and a bare
//! [`Status`] entry.
//!
//! ### Status as a Finite-State Machine
//!
//! ```text
//! Active ──► Completed
//!    └─────► Cancelled
//! ```
//!
//! `Completed` and `Cancelled` are terminal: nothing leaves them.

use soroban_sdk::{contracttype, Address, String, Vec};

/// Lifecycle status shared by every entity family.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    /// Accepting lifecycle operations; funds may be released.
    Active,
    /// Closed by the administrator without (fully) paying out.
    Cancelled,
    /// Every tranche, or the whole prize pool, has been paid.
    Completed,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Active)
    }
}

// ── Grants ───────────────────────────────────────────────────────────

/// Immutable grant configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantConfig {
    pub key: String,
    pub title: String,
    pub description: String,
    pub milestones: Vec<i128>,
    pub currency: Address,
    pub proposer: String,
}

/// Mutable grant state, updated by every lifecycle call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantState {
    pub current_milestone: u32,
    pub status: Status,
    pub receiver: Address,
}

/// Full on-chain representation of a grant.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grant {
    /// Caller-supplied unique key (e.g. a content hash).
    pub key: String,
    pub title: String,
    pub description: String,
    /// Ordered tranche amounts; released strictly in sequence.
    pub milestones: Vec<i128>,
    /// Index of the next tranche to release. Equals `milestones.len()` once
    /// every tranche has been paid.
    pub current_milestone: u32,
    pub status: Status,
    /// Token contract the tranches are paid in.
    pub currency: Address,
    /// Free-text label of whoever proposed the grant. Not an identity.
    pub proposer: String,
    /// Current beneficiary.
    pub receiver: Address,
}

impl Grant {
    pub fn from_parts(config: GrantConfig, state: GrantState) -> Self {
        Grant {
            key: config.key,
            title: config.title,
            description: config.description,
            milestones: config.milestones,
            current_milestone: state.current_milestone,
            status: state.status,
            currency: config.currency,
            proposer: config.proposer,
            receiver: state.receiver,
        }
    }
}

// ── Initiatives ──────────────────────────────────────────────────────

/// Immutable initiative configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitiativeConfig {
    pub key: String,
    pub title: String,
    pub description: String,
    pub milestones: Vec<i128>,
    pub currency: Address,
}

/// Mutable initiative state. `receiver` stays `None` until assigned.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitiativeState {
    pub current_milestone: u32,
    pub status: Status,
    pub receiver: Option<Address>,
}

/// Full on-chain representation of an initiative.
///
/// Same lifecycle as a [`Grant`], but created without a beneficiary: it
/// cannot release funds until `assign_initiative` has been called.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Initiative {
    pub key: String,
    pub title: String,
    pub description: String,
    pub milestones: Vec<i128>,
    pub current_milestone: u32,
    pub status: Status,
    pub currency: Address,
    pub receiver: Option<Address>,
}

impl Initiative {
    pub fn from_parts(config: InitiativeConfig, state: InitiativeState) -> Self {
        Initiative {
            key: config.key,
            title: config.title,
            description: config.description,
            milestones: config.milestones,
            current_milestone: state.current_milestone,
            status: state.status,
            currency: config.currency,
            receiver: state.receiver,
        }
    }
}

// ── Competitions ─────────────────────────────────────────────────────

/// Immutable competition configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompetitionConfig {
    pub key: String,
    pub title: String,
    pub description: String,
    pub currency: Address,
    pub total_bounty: i128,
    pub place_amounts: Vec<i128>,
}

/// Full on-chain representation of a competition.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Competition {
    pub key: String,
    pub title: String,
    pub description: String,
    pub currency: Address,
    /// Advertised prize pool. Informational; not checked against
    /// `place_amounts`.
    pub total_bounty: i128,
    /// Prize per rank, first place first. Its length fixes how many winners
    /// `complete_competition` expects.
    pub place_amounts: Vec<i128>,
    pub status: Status,
}

impl Competition {
    pub fn from_parts(config: CompetitionConfig, status: Status) -> Self {
        Competition {
            key: config.key,
            title: config.title,
            description: config.description,
            currency: config.currency,
            total_bounty: config.total_bounty,
            place_amounts: config.place_amounts,
            status,
        }
    }
}
