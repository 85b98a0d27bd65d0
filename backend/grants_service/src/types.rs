//! Entity model shared by the registries, the facade and the REST layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

/// Token amount. Amounts are unsigned; zero-valued tranches are rejected at
/// creation.
pub type Amount = u128;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Caller-supplied opaque identifier, unique within one entity family.
    EntityKey
);
string_id!(
    /// Holder identity on the token ledger (beneficiaries, the custodian).
    Account
);
string_id!(
    /// Token ledger a payout is drawn from.
    Currency
);

impl Account {
    /// A payout target must name a holder. Blank identities are only ever
    /// used for anonymous callers.
    pub fn ensure_valid(&self) -> LedgerResult<()> {
        if self.0.trim().is_empty() {
            return Err(LedgerError::InvalidAccount);
        }
        Ok(())
    }
}

/// Lifecycle status shared by every entity family.
///
/// ```text
/// Active ──► Completed
///    └─────► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Cancelled,
    Completed,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Active)
    }
}

/// Non-empty ordered list of strictly positive amounts whose total fits in
/// [`Amount`]. Immutable once built.
///
/// Used both as a grant/initiative milestone schedule and as a competition's
/// per-rank prize table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Amount>", into = "Vec<Amount>")]
pub struct Tranches {
    amounts: Vec<Amount>,
}

pub type MilestoneSchedule = Tranches;
pub type PlaceAmounts = Tranches;

impl Tranches {
    pub fn new(amounts: Vec<Amount>) -> LedgerResult<Self> {
        if amounts.is_empty() {
            return Err(LedgerError::InvalidSchedule(
                "at least one amount is required".to_string(),
            ));
        }
        let mut total: Amount = 0;
        for (index, amount) in amounts.iter().enumerate() {
            if *amount == 0 {
                return Err(LedgerError::InvalidSchedule(format!(
                    "amount at position {index} is zero"
                )));
            }
            total = total
                .checked_add(*amount)
                .ok_or_else(|| LedgerError::InvalidSchedule("total overflows".to_string()))?;
        }
        Ok(Self { amounts })
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn get(&self, index: usize) -> Option<Amount> {
        self.amounts.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Amount] {
        &self.amounts
    }

    /// Sum of the amounts at `from..`. Cannot overflow: the full sum was
    /// checked at construction.
    pub fn remaining_from(&self, from: usize) -> Amount {
        self.amounts.iter().skip(from).sum()
    }
}

impl TryFrom<Vec<Amount>> for Tranches {
    type Error = LedgerError;

    fn try_from(amounts: Vec<Amount>) -> LedgerResult<Self> {
        Self::new(amounts)
    }
}

impl From<Tranches> for Vec<Amount> {
    fn from(tranches: Tranches) -> Self {
        tranches.amounts
    }
}

// ─────────────────────────────────────────────────────────
// Entities
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub key: EntityKey,
    pub title: String,
    pub description: String,
    pub milestones: MilestoneSchedule,
    /// Index of the next tranche; equals `milestones.len()` once all are paid.
    pub current_milestone: usize,
    pub status: Status,
    pub currency: Currency,
    /// Free text; not an identity.
    pub proposer: String,
    pub receiver: Account,
}

/// A grant without a proposer whose beneficiary is assigned after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiative {
    pub key: EntityKey,
    pub title: String,
    pub description: String,
    pub milestones: MilestoneSchedule,
    pub current_milestone: usize,
    pub status: Status,
    pub currency: Currency,
    pub receiver: Option<Account>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub key: EntityKey,
    pub title: String,
    pub description: String,
    pub currency: Currency,
    /// Advertised prize pool; informational only.
    pub total_bounty: Amount,
    /// Prize per rank, first place first.
    pub place_amounts: PlaceAmounts,
    pub status: Status,
}

// ─────────────────────────────────────────────────────────
// Creation requests
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct GrantDraft {
    pub key: EntityKey,
    pub title: String,
    pub description: String,
    pub milestones: Vec<Amount>,
    pub currency: Currency,
    pub proposer: String,
    pub receiver: Account,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitiativeDraft {
    pub key: EntityKey,
    pub title: String,
    pub description: String,
    pub milestones: Vec<Amount>,
    pub currency: Currency,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompetitionDraft {
    pub key: EntityKey,
    pub title: String,
    pub description: String,
    pub currency: Currency,
    pub total_bounty: Amount,
    pub place_amounts: Vec<Amount>,
}
