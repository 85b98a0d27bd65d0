//! A competition pays out once: every ranked winner in the same operation,
//! or nobody.

use std::collections::BTreeMap;

use crate::custodian::FundsCustodian;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::DomainEvent;
use crate::token::TokenLedger;
use crate::types::{Account, Amount, Competition, CompetitionDraft, EntityKey, PlaceAmounts, Status};

use super::{ensure_active, ensure_cancellable};

#[derive(Debug, Default)]
pub struct CompetitionRegistry {
    competitions: BTreeMap<EntityKey, Competition>,
}

impl CompetitionRegistry {
    pub fn create(
        &mut self,
        draft: CompetitionDraft,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Competition> {
        if self.competitions.contains_key(&draft.key) {
            return Err(LedgerError::DuplicateKey(draft.key));
        }
        let place_amounts = PlaceAmounts::new(draft.place_amounts)?;

        let competition = Competition {
            key: draft.key,
            title: draft.title,
            description: draft.description,
            currency: draft.currency,
            total_bounty: draft.total_bounty,
            place_amounts,
            status: Status::Active,
        };
        self.competitions
            .insert(competition.key.clone(), competition.clone());

        events.push(DomainEvent::NewCompetition {
            key: competition.key.clone(),
            total_bounty: competition.total_bounty,
            place_amounts: competition.place_amounts.as_slice().to_vec(),
        });
        Ok(competition)
    }

    /// Pay `place_amounts[i]` to `winners[i]` for every rank and close.
    pub fn complete<L: TokenLedger>(
        &mut self,
        key: &EntityKey,
        winners: Vec<Account>,
        custodian: &mut FundsCustodian<L>,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Competition> {
        let competition = self.entry(key)?;
        ensure_active(competition.status, key)?;
        let expected = competition.place_amounts.len();
        if winners.len() != expected {
            return Err(LedgerError::WinnersLengthInvalid {
                expected,
                actual: winners.len(),
            });
        }
        for winner in &winners {
            winner.ensure_valid()?;
        }

        let payouts: Vec<(Account, Amount)> = winners
            .into_iter()
            .zip(competition.place_amounts.as_slice().iter().copied())
            .collect();
        custodian.pay_batch(&competition.currency, &payouts)?;

        competition.status = Status::Completed;

        events.push(DomainEvent::CompetitionCompleted { key: key.clone() });
        Ok(competition.clone())
    }

    pub fn cancel(
        &mut self,
        key: &EntityKey,
        reason: String,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<Competition> {
        let competition = self.entry(key)?;
        ensure_cancellable(competition.status, key)?;

        competition.status = Status::Cancelled;

        events.push(DomainEvent::CompetitionCancelled {
            key: key.clone(),
            reason,
        });
        Ok(competition.clone())
    }

    pub fn get(&self, key: &EntityKey) -> LedgerResult<&Competition> {
        self.competitions
            .get(key)
            .ok_or_else(|| LedgerError::NotFound(key.clone()))
    }

    pub fn count(&self) -> usize {
        self.competitions.len()
    }

    fn entry(&mut self, key: &EntityKey) -> LedgerResult<&mut Competition> {
        self.competitions
            .get_mut(key)
            .ok_or_else(|| LedgerError::NotFound(key.clone()))
    }
}
