//! Domain events and the append-only journal that records them.
//!
//! Names match the topics published by the `grants_dao` contract so that
//! consumers can treat both deployments alike.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Account, Amount, Currency, EntityKey};

/// Every observable state change. Emitted only by operations that succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    NewGrant {
        key: EntityKey,
        proposer: String,
        receiver: Account,
    },
    GrantMilestoneReleased {
        key: EntityKey,
        amount: Amount,
        receiver: Account,
        currency: Currency,
    },
    GrantReassigned {
        key: EntityKey,
        receiver: Account,
    },
    GrantCancelled {
        key: EntityKey,
        reason: String,
    },
    GrantCompleted {
        key: EntityKey,
    },
    NewInitiative {
        key: EntityKey,
    },
    InitiativeAssigned {
        key: EntityKey,
        receiver: Account,
    },
    InitiativeMilestoneReleased {
        key: EntityKey,
        amount: Amount,
        receiver: Account,
        currency: Currency,
    },
    InitiativeCancelled {
        key: EntityKey,
        reason: String,
    },
    InitiativeCompleted {
        key: EntityKey,
    },
    NewCompetition {
        key: EntityKey,
        total_bounty: Amount,
        place_amounts: Vec<Amount>,
    },
    CompetitionCompleted {
        key: EntityKey,
    },
    CompetitionCancelled {
        key: EntityKey,
        reason: String,
    },
    Withdrawal {
        to: Account,
        amount: Amount,
        currency: Currency,
    },
}

impl DomainEvent {
    /// Return the short topic identifier for this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewGrant { .. } => "new_grant",
            Self::GrantMilestoneReleased { .. } => "grant_milestone_released",
            Self::GrantReassigned { .. } => "grant_reassigned",
            Self::GrantCancelled { .. } => "grant_cancelled",
            Self::GrantCompleted { .. } => "grant_completed",
            Self::NewInitiative { .. } => "new_initiative",
            Self::InitiativeAssigned { .. } => "initiative_assigned",
            Self::InitiativeMilestoneReleased { .. } => "initiative_milestone_released",
            Self::InitiativeCancelled { .. } => "initiative_cancelled",
            Self::InitiativeCompleted { .. } => "initiative_completed",
            Self::NewCompetition { .. } => "new_competition",
            Self::CompetitionCompleted { .. } => "competition_completed",
            Self::CompetitionCancelled { .. } => "competition_cancelled",
            Self::Withdrawal { .. } => "withdrawal",
        }
    }
}

/// A journaled event with its position and wall-clock time.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub seq: u64,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: DomainEvent,
}

#[derive(Debug, Default)]
pub struct Journal {
    records: Vec<EventRecord>,
}

impl Journal {
    /// Append a batch produced by one successful operation, in order.
    pub fn append(&mut self, events: Vec<DomainEvent>) {
        let recorded_at = Utc::now();
        for event in events {
            let seq = self.records.len() as u64 + 1;
            self.records.push(EventRecord {
                seq,
                recorded_at,
                event,
            });
        }
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }
}
