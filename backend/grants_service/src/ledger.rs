//! The ledger facade.
//!
//! Owns every registry, the custodian and the event journal behind one
//! `RwLock`. Mutations take the write lock for their whole duration, so each
//! is serialized and observed atomically; queries share the read lock. The
//! administrator check runs before the lock is taken and before any state
//! is read.

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth::Authorizer;
use crate::custodian::FundsCustodian;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::{DomainEvent, EventRecord, Journal};
use crate::registry::{CompetitionRegistry, GrantRegistry, InitiativeRegistry};
use crate::token::TokenLedger;
use crate::types::{
    Account, Amount, Competition, CompetitionDraft, Currency, EntityKey, Grant, GrantDraft,
    Initiative, InitiativeDraft,
};

pub struct LedgerState<L> {
    grants: GrantRegistry,
    initiatives: InitiativeRegistry,
    competitions: CompetitionRegistry,
    custodian: FundsCustodian<L>,
    journal: Journal,
}

pub struct Ledger<L> {
    authorizer: Box<dyn Authorizer>,
    state: RwLock<LedgerState<L>>,
}

impl<L: TokenLedger> Ledger<L> {
    pub fn new(authorizer: Box<dyn Authorizer>, custodian: FundsCustodian<L>) -> Self {
        Self {
            authorizer,
            state: RwLock::new(LedgerState {
                grants: GrantRegistry::default(),
                initiatives: InitiativeRegistry::default(),
                competitions: CompetitionRegistry::default(),
                custodian,
                journal: Journal::default(),
            }),
        }
    }

    /// Run `op` under the write lock. Its events reach the journal only if
    /// it succeeds.
    async fn mutate<T, F>(&self, caller: &Account, name: &'static str, op: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut LedgerState<L>, &mut Vec<DomainEvent>) -> LedgerResult<T>,
    {
        if !self.authorizer.is_admin(caller) {
            warn!(op = name, %caller, "Rejected: caller is not an administrator");
            return Err(LedgerError::Unauthorized);
        }

        let mut state = self.state.write().await;
        let mut events = Vec::new();
        match op(&mut *state, &mut events) {
            Ok(value) => {
                info!(op = name, %caller, events = events.len(), "Applied");
                state.journal.append(events);
                Ok(value)
            }
            Err(e) => {
                warn!(op = name, %caller, error = %e, "Rejected");
                Err(e)
            }
        }
    }

    // ─────────────────────────────────────────────────────────
    // Grants
    // ─────────────────────────────────────────────────────────

    pub async fn create_grant(&self, caller: &Account, draft: GrantDraft) -> LedgerResult<Grant> {
        self.mutate(caller, "create_grant", |s, ev| s.grants.create(draft, ev))
            .await
    }

    pub async fn progress_grant(&self, caller: &Account, key: &EntityKey) -> LedgerResult<Grant> {
        self.mutate(caller, "progress_grant", |s, ev| {
            s.grants.progress(key, &mut s.custodian, ev)
        })
        .await
    }

    pub async fn reassign_grant(
        &self,
        caller: &Account,
        key: &EntityKey,
        receiver: Account,
    ) -> LedgerResult<Grant> {
        self.mutate(caller, "reassign_grant", |s, ev| {
            s.grants.reassign(key, receiver, ev)
        })
        .await
    }

    pub async fn cancel_grant(
        &self,
        caller: &Account,
        key: &EntityKey,
        reason: Option<String>,
    ) -> LedgerResult<Grant> {
        self.mutate(caller, "cancel_grant", |s, ev| {
            s.grants.cancel(key, reason.unwrap_or_default(), ev)
        })
        .await
    }

    pub async fn complete_grant(&self, caller: &Account, key: &EntityKey) -> LedgerResult<Grant> {
        self.mutate(caller, "complete_grant", |s, ev| {
            s.grants.complete(key, &mut s.custodian, ev)
        })
        .await
    }

    pub async fn get_grant(&self, key: &EntityKey) -> LedgerResult<Grant> {
        self.state.read().await.grants.get(key).cloned()
    }

    pub async fn count_grants(&self) -> usize {
        self.state.read().await.grants.count()
    }

    pub async fn grant_milestones(&self, key: &EntityKey) -> LedgerResult<Vec<Amount>> {
        let state = self.state.read().await;
        Ok(state.grants.get(key)?.milestones.as_slice().to_vec())
    }

    // ─────────────────────────────────────────────────────────
    // Initiatives
    // ─────────────────────────────────────────────────────────

    pub async fn create_initiative(
        &self,
        caller: &Account,
        draft: InitiativeDraft,
    ) -> LedgerResult<Initiative> {
        self.mutate(caller, "create_initiative", |s, ev| {
            s.initiatives.create(draft, ev)
        })
        .await
    }

    pub async fn assign_initiative(
        &self,
        caller: &Account,
        key: &EntityKey,
        receiver: Account,
    ) -> LedgerResult<Initiative> {
        self.mutate(caller, "assign_initiative", |s, ev| {
            s.initiatives.assign(key, receiver, ev)
        })
        .await
    }

    pub async fn progress_initiative(
        &self,
        caller: &Account,
        key: &EntityKey,
    ) -> LedgerResult<Initiative> {
        self.mutate(caller, "progress_initiative", |s, ev| {
            s.initiatives.progress(key, &mut s.custodian, ev)
        })
        .await
    }

    pub async fn cancel_initiative(
        &self,
        caller: &Account,
        key: &EntityKey,
        reason: Option<String>,
    ) -> LedgerResult<Initiative> {
        self.mutate(caller, "cancel_initiative", |s, ev| {
            s.initiatives.cancel(key, reason.unwrap_or_default(), ev)
        })
        .await
    }

    pub async fn complete_initiative(
        &self,
        caller: &Account,
        key: &EntityKey,
    ) -> LedgerResult<Initiative> {
        self.mutate(caller, "complete_initiative", |s, ev| {
            s.initiatives.complete(key, &mut s.custodian, ev)
        })
        .await
    }

    pub async fn get_initiative(&self, key: &EntityKey) -> LedgerResult<Initiative> {
        self.state.read().await.initiatives.get(key).cloned()
    }

    pub async fn count_initiatives(&self) -> usize {
        self.state.read().await.initiatives.count()
    }

    pub async fn initiative_milestones(&self, key: &EntityKey) -> LedgerResult<Vec<Amount>> {
        let state = self.state.read().await;
        Ok(state.initiatives.get(key)?.milestones.as_slice().to_vec())
    }

    // ─────────────────────────────────────────────────────────
    // Competitions
    // ─────────────────────────────────────────────────────────

    pub async fn create_competition(
        &self,
        caller: &Account,
        draft: CompetitionDraft,
    ) -> LedgerResult<Competition> {
        self.mutate(caller, "create_competition", |s, ev| {
            s.competitions.create(draft, ev)
        })
        .await
    }

    pub async fn complete_competition(
        &self,
        caller: &Account,
        key: &EntityKey,
        winners: Vec<Account>,
    ) -> LedgerResult<Competition> {
        self.mutate(caller, "complete_competition", |s, ev| {
            s.competitions.complete(key, winners, &mut s.custodian, ev)
        })
        .await
    }

    pub async fn cancel_competition(
        &self,
        caller: &Account,
        key: &EntityKey,
        reason: Option<String>,
    ) -> LedgerResult<Competition> {
        self.mutate(caller, "cancel_competition", |s, ev| {
            s.competitions.cancel(key, reason.unwrap_or_default(), ev)
        })
        .await
    }

    pub async fn get_competition(&self, key: &EntityKey) -> LedgerResult<Competition> {
        self.state.read().await.competitions.get(key).cloned()
    }

    pub async fn count_competitions(&self) -> usize {
        self.state.read().await.competitions.count()
    }

    // ─────────────────────────────────────────────────────────
    // Custody & audit
    // ─────────────────────────────────────────────────────────

    pub async fn withdraw(
        &self,
        caller: &Account,
        to: &Account,
        amount: Amount,
        currency: &Currency,
    ) -> LedgerResult<()> {
        self.mutate(caller, "withdraw", |s, ev| {
            s.custodian.withdraw(to, amount, currency, ev)
        })
        .await
    }

    pub async fn pool_balance(&self, currency: &Currency) -> Amount {
        self.state.read().await.custodian.balance(currency)
    }

    /// Token-ledger balance of any holder, beneficiaries included.
    pub async fn balance_of(&self, currency: &Currency, holder: &Account) -> Amount {
        self.state
            .read()
            .await
            .custodian
            .ledger()
            .balance_of(currency, holder)
    }

    pub async fn events(&self) -> Vec<EventRecord> {
        self.state.read().await.journal.records().to_vec()
    }
}
