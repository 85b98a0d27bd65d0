use std::collections::BTreeMap;

use crate::custodian::FundsCustodian;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::DomainEvent;
use crate::token::TokenLedger;
use crate::types::{Account, EntityKey, Grant, GrantDraft, MilestoneSchedule, Status};

use super::{ensure_active, ensure_cancellable, next_tranche};

#[derive(Debug, Default)]
pub struct GrantRegistry {
    grants: BTreeMap<EntityKey, Grant>,
}

impl GrantRegistry {
    pub fn create(
        &mut self,
        draft: GrantDraft,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Grant> {
        if self.grants.contains_key(&draft.key) {
            return Err(LedgerError::DuplicateKey(draft.key));
        }
        let milestones = MilestoneSchedule::new(draft.milestones)?;
        draft.receiver.ensure_valid()?;

        let grant = Grant {
            key: draft.key,
            title: draft.title,
            description: draft.description,
            milestones,
            current_milestone: 0,
            status: Status::Active,
            currency: draft.currency,
            proposer: draft.proposer,
            receiver: draft.receiver,
        };
        self.grants.insert(grant.key.clone(), grant.clone());

        events.push(DomainEvent::NewGrant {
            key: grant.key.clone(),
            proposer: grant.proposer.clone(),
            receiver: grant.receiver.clone(),
        });
        Ok(grant)
    }

    /// Release the next tranche; the last one also completes the grant.
    pub fn progress<L: TokenLedger>(
        &mut self,
        key: &EntityKey,
        custodian: &mut FundsCustodian<L>,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Grant> {
        let grant = self.entry(key)?;
        ensure_active(grant.status, key)?;
        let amount = next_tranche(&grant.milestones, grant.current_milestone, key)?;

        custodian.pay(&grant.currency, &grant.receiver, amount)?;

        grant.current_milestone += 1;
        let finished = grant.current_milestone == grant.milestones.len();
        if finished {
            grant.status = Status::Completed;
        }

        events.push(DomainEvent::GrantMilestoneReleased {
            key: key.clone(),
            amount,
            receiver: grant.receiver.clone(),
            currency: grant.currency.clone(),
        });
        if finished {
            events.push(DomainEvent::GrantCompleted { key: key.clone() });
        }
        Ok(grant.clone())
    }

    pub fn reassign(
        &mut self,
        key: &EntityKey,
        receiver: Account,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Grant> {
        let grant = self.entry(key)?;
        ensure_active(grant.status, key)?;
        receiver.ensure_valid()?;

        grant.receiver = receiver;

        events.push(DomainEvent::GrantReassigned {
            key: key.clone(),
            receiver: grant.receiver.clone(),
        });
        Ok(grant.clone())
    }

    pub fn cancel(
        &mut self,
        key: &EntityKey,
        reason: String,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Grant> {
        let grant = self.entry(key)?;
        ensure_cancellable(grant.status, key)?;

        grant.status = Status::Cancelled;

        events.push(DomainEvent::GrantCancelled {
            key: key.clone(),
            reason,
        });
        Ok(grant.clone())
    }

    /// Pay every remaining tranche in one transfer and close the grant.
    pub fn complete<L: TokenLedger>(
        &mut self,
        key: &EntityKey,
        custodian: &mut FundsCustodian<L>,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Grant> {
        let grant = self.entry(key)?;
        ensure_active(grant.status, key)?;
        let amount = grant.milestones.remaining_from(grant.current_milestone);

        if amount > 0 {
            custodian.pay(&grant.currency, &grant.receiver, amount)?;
        }

        grant.current_milestone = grant.milestones.len();
        grant.status = Status::Completed;

        events.push(DomainEvent::GrantCompleted { key: key.clone() });
        Ok(grant.clone())
    }

    pub fn get(&self, key: &EntityKey) -> LedgerResult<&Grant> {
        self.grants
            .get(key)
            .ok_or_else(|| LedgerError::NotFound(key.clone()))
    }

    pub fn count(&self) -> usize {
        self.grants.len()
    }

    fn entry(&mut self, key: &EntityKey) -> LedgerResult<&mut Grant> {
        self.grants
            .get_mut(key)
            .ok_or_else(|| LedgerError::NotFound(key.clone()))
    }
}
