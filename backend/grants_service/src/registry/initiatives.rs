//! Initiatives follow the grant lifecycle, except that they start without a
//! beneficiary and release nothing until one has been assigned.

use std::collections::BTreeMap;

use crate::custodian::FundsCustodian;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::DomainEvent;
use crate::token::TokenLedger;
use crate::types::{Account, EntityKey, Initiative, InitiativeDraft, MilestoneSchedule, Status};

use super::{ensure_active, ensure_cancellable, next_tranche};

#[derive(Debug, Default)]
pub struct InitiativeRegistry {
    initiatives: BTreeMap<EntityKey, Initiative>,
}

impl InitiativeRegistry {
    pub fn create(
        &mut self,
        draft: InitiativeDraft,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Initiative> {
        if self.initiatives.contains_key(&draft.key) {
            return Err(LedgerError::DuplicateKey(draft.key));
        }
        let milestones = MilestoneSchedule::new(draft.milestones)?;

        let initiative = Initiative {
            key: draft.key,
            title: draft.title,
            description: draft.description,
            milestones,
            current_milestone: 0,
            status: Status::Active,
            currency: draft.currency,
            receiver: None,
        };
        self.initiatives
            .insert(initiative.key.clone(), initiative.clone());

        events.push(DomainEvent::NewInitiative {
            key: initiative.key.clone(),
        });
        Ok(initiative)
    }

    /// Set or replace the beneficiary.
    pub fn assign(
        &mut self,
        key: &EntityKey,
        receiver: Account,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Initiative> {
        let initiative = self.entry(key)?;
        ensure_active(initiative.status, key)?;
        receiver.ensure_valid()?;

        initiative.receiver = Some(receiver.clone());

        events.push(DomainEvent::InitiativeAssigned {
            key: key.clone(),
            receiver,
        });
        Ok(initiative.clone())
    }

    pub fn progress<L: TokenLedger>(
        &mut self,
        key: &EntityKey,
        custodian: &mut FundsCustodian<L>,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Initiative> {
        let initiative = self.entry(key)?;
        ensure_active(initiative.status, key)?;
        let receiver = initiative
            .receiver
            .clone()
            .ok_or_else(|| LedgerError::NotAssigned(key.clone()))?;
        let amount = next_tranche(&initiative.milestones, initiative.current_milestone, key)?;

        custodian.pay(&initiative.currency, &receiver, amount)?;

        initiative.current_milestone += 1;
        let finished = initiative.current_milestone == initiative.milestones.len();
        if finished {
            initiative.status = Status::Completed;
        }

        events.push(DomainEvent::InitiativeMilestoneReleased {
            key: key.clone(),
            amount,
            receiver,
            currency: initiative.currency.clone(),
        });
        if finished {
            events.push(DomainEvent::InitiativeCompleted { key: key.clone() });
        }
        Ok(initiative.clone())
    }

    pub fn cancel(
        &mut self,
        key: &EntityKey,
        reason: String,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Initiative> {
        let initiative = self.entry(key)?;
        ensure_cancellable(initiative.status, key)?;

        initiative.status = Status::Cancelled;

        events.push(DomainEvent::InitiativeCancelled {
            key: key.clone(),
            reason,
        });
        Ok(initiative.clone())
    }

    pub fn complete<L: TokenLedger>(
        &mut self,
        key: &EntityKey,
        custodian: &mut FundsCustodian<L>,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Initiative> {
        let initiative = self.entry(key)?;
        ensure_active(initiative.status, key)?;
        let receiver = initiative
            .receiver
            .clone()
            .ok_or_else(|| LedgerError::NotAssigned(key.clone()))?;
        let amount = initiative
            .milestones
            .remaining_from(initiative.current_milestone);

        if amount > 0 {
            custodian.pay(&initiative.currency, &receiver, amount)?;
        }

        initiative.current_milestone = initiative.milestones.len();
        initiative.status = Status::Completed;

        events.push(DomainEvent::InitiativeCompleted { key: key.clone() });
        Ok(initiative.clone())
    }

    pub fn get(&self, key: &EntityKey) -> LedgerResult<&Initiative> {
        self.initiatives
            .get(key)
            .ok_or_else(|| LedgerError::NotFound(key.clone()))
    }

    pub fn count(&self) -> usize {
        self.initiatives.len()
    }

    fn entry(&mut self, key: &EntityKey) -> LedgerResult<&mut Initiative> {
        self.initiatives
            .get_mut(key)
            .ok_or_else(|| LedgerError::NotFound(key.clone()))
    }
}
