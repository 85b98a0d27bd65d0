//! # Events
//!
//! Every state change publishes exactly one event per fact, with topics
//! `(event_name, key)` and one of the payload structs below as data.
//! Payout events are published after the token transfer succeeded.
//!
//! | Topic name                      | Payload               |
//! |---------------------------------|-----------------------|
//! | `new_grant`                     | [`NewGrant`]          |
//! | `grant_milestone_released`      | [`MilestoneReleased`] |
//! | `grant_reassigned`              | [`Reassigned`]        |
//! | `grant_cancelled`               | [`Cancelled`]         |
//! | `grant_completed`               | [`Completed`]         |
//! | `new_initiative`                | [`NewInitiative`]     |
//! | `initiative_assigned`           | [`Reassigned`]        |
//! | `initiative_milestone_released` | [`MilestoneReleased`] |
//! | `initiative_cancelled`          | [`Cancelled`]         |
//! | `initiative_completed`          | [`Completed`]         |
//! | `new_competition`               | [`NewCompetition`]    |
//! | `competition_completed`         | [`Completed`]         |
//! | `competition_cancelled`         | [`Cancelled`]         |
//! | `withdrawal`                    | [`Withdrawal`]        |
//! | `admin_changed`                 | [`AdminChanged`]      |

use soroban_sdk::{contracttype, Address, Env, String, Symbol, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewGrant {
    pub key: String,
    pub proposer: String,
    pub receiver: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewInitiative {
    pub key: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewCompetition {
    pub key: String,
    pub total_bounty: i128,
    pub place_amounts: Vec<i128>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneReleased {
    pub key: String,
    pub amount: i128,
    pub receiver: Address,
    pub currency: Address,
}

/// Beneficiary change for a grant (reassignment) or initiative (assignment).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reassigned {
    pub key: String,
    pub receiver: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cancelled {
    pub key: String,
    pub reason: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Completed {
    pub key: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawal {
    pub to: Address,
    pub amount: i128,
    pub currency: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChanged {
    pub previous: Address,
    pub admin: Address,
}

/// Entity family an event belongs to; selects the topic prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Family {
    Grant,
    Initiative,
    Competition,
}

/// Families that pay a schedule to a beneficiary. Competitions have neither,
/// so they cannot name a release or assignment topic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Payee {
    Grant,
    Initiative,
}

#[derive(Clone, Copy)]
enum Lifecycle {
    New,
    Cancelled,
    Completed,
}

#[derive(Clone, Copy)]
enum Payout {
    Released,
    Assigned,
}

impl Family {
    fn topic(self, env: &Env, fact: Lifecycle) -> Symbol {
        let name = match (self, fact) {
            (Family::Grant, Lifecycle::New) => "new_grant",
            (Family::Grant, Lifecycle::Cancelled) => "grant_cancelled",
            (Family::Grant, Lifecycle::Completed) => "grant_completed",
            (Family::Initiative, Lifecycle::New) => "new_initiative",
            (Family::Initiative, Lifecycle::Cancelled) => "initiative_cancelled",
            (Family::Initiative, Lifecycle::Completed) => "initiative_completed",
            (Family::Competition, Lifecycle::New) => "new_competition",
            (Family::Competition, Lifecycle::Cancelled) => "competition_cancelled",
            (Family::Competition, Lifecycle::Completed) => "competition_completed",
        };
        Symbol::new(env, name)
    }
}

impl Payee {
    fn topic(self, env: &Env, fact: Payout) -> Symbol {
        let name = match (self, fact) {
            (Payee::Grant, Payout::Released) => "grant_milestone_released",
            (Payee::Grant, Payout::Assigned) => "grant_reassigned",
            (Payee::Initiative, Payout::Released) => "initiative_milestone_released",
            (Payee::Initiative, Payout::Assigned) => "initiative_assigned",
        };
        Symbol::new(env, name)
    }
}

pub fn new_grant(env: &Env, key: &String, proposer: &String, receiver: &Address) {
    env.events().publish(
        (Family::Grant.topic(env, Lifecycle::New), key.clone()),
        NewGrant {
            key: key.clone(),
            proposer: proposer.clone(),
            receiver: receiver.clone(),
        },
    );
}

pub fn new_initiative(env: &Env, key: &String) {
    env.events().publish(
        (Family::Initiative.topic(env, Lifecycle::New), key.clone()),
        NewInitiative { key: key.clone() },
    );
}

pub fn new_competition(env: &Env, key: &String, total_bounty: i128, place_amounts: &Vec<i128>) {
    env.events().publish(
        (Family::Competition.topic(env, Lifecycle::New), key.clone()),
        NewCompetition {
            key: key.clone(),
            total_bounty,
            place_amounts: place_amounts.clone(),
        },
    );
}

pub fn milestone_released(
    env: &Env,
    family: Payee,
    key: &String,
    amount: i128,
    receiver: &Address,
    currency: &Address,
) {
    env.events().publish(
        (family.topic(env, Payout::Released), key.clone()),
        MilestoneReleased {
            key: key.clone(),
            amount,
            receiver: receiver.clone(),
            currency: currency.clone(),
        },
    );
}

pub fn assigned(env: &Env, family: Payee, key: &String, receiver: &Address) {
    env.events().publish(
        (family.topic(env, Payout::Assigned), key.clone()),
        Reassigned {
            key: key.clone(),
            receiver: receiver.clone(),
        },
    );
}

pub fn cancelled(env: &Env, family: Family, key: &String, reason: &String) {
    env.events().publish(
        (family.topic(env, Lifecycle::Cancelled), key.clone()),
        Cancelled {
            key: key.clone(),
            reason: reason.clone(),
        },
    );
}

pub fn completed(env: &Env, family: Family, key: &String) {
    env.events().publish(
        (family.topic(env, Lifecycle::Completed), key.clone()),
        Completed { key: key.clone() },
    );
}

pub fn withdrawal(env: &Env, to: &Address, amount: i128, currency: &Address) {
    env.events().publish(
        (Symbol::new(env, "withdrawal"),),
        Withdrawal {
            to: to.clone(),
            amount,
            currency: currency.clone(),
        },
    );
}

pub fn admin_changed(env: &Env, previous: &Address, admin: &Address) {
    env.events().publish(
        (Symbol::new(env, "admin_changed"),),
        AdminChanged {
            previous: previous.clone(),
            admin: admin.clone(),
        },
    );
}
