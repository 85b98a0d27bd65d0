//! Pool custody: every payout leaves through here.

use tracing::{debug, error};

use crate::errors::{LedgerError, LedgerResult};
use crate::events::DomainEvent;
use crate::token::TokenLedger;
use crate::types::{Account, Amount, Currency};

pub struct FundsCustodian<L> {
    ledger: L,
    account: Account,
}

impl<L: TokenLedger> FundsCustodian<L> {
    pub fn new(ledger: L, account: Account) -> Self {
        Self { ledger, account }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn balance(&self, currency: &Currency) -> Amount {
        self.ledger.balance_of(currency, &self.account)
    }

    pub fn ensure_solvent(&self, currency: &Currency, amount: Amount) -> LedgerResult<()> {
        let available = self.balance(currency);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        Ok(())
    }

    pub fn pay(&mut self, currency: &Currency, to: &Account, amount: Amount) -> LedgerResult<()> {
        self.ensure_solvent(currency, amount)?;
        self.ledger
            .transfer(currency, &self.account, to, amount)
            .map_err(|_| LedgerError::InsufficientBalance {
                required: amount,
                available: self.ledger.balance_of(currency, &self.account),
            })?;
        debug!(%currency, %to, amount = %amount, "custodian paid");
        Ok(())
    }

    /// Pay several recipients from one currency. The pool must cover the sum
    /// before the first transfer. If a transfer still fails partway, the
    /// payouts already made are moved back so the batch has no effect.
    pub fn pay_batch(
        &mut self,
        currency: &Currency,
        payouts: &[(Account, Amount)],
    ) -> LedgerResult<()> {
        let total = payouts
            .iter()
            .try_fold(0 as Amount, |acc, (_, amount)| acc.checked_add(*amount))
            .ok_or(LedgerError::Overflow)?;
        self.ensure_solvent(currency, total)?;
        for (paid, (to, amount)) in payouts.iter().enumerate() {
            if let Err(err) = self.pay(currency, to, *amount) {
                self.refund(currency, &payouts[..paid]);
                return Err(err);
            }
        }
        Ok(())
    }

    fn refund(&mut self, currency: &Currency, payouts: &[(Account, Amount)]) {
        for (from, amount) in payouts.iter().rev() {
            match self.ledger.transfer(currency, from, &self.account, *amount) {
                Ok(()) => debug!(%currency, %from, amount = %amount, "custodian refunded"),
                Err(err) => {
                    error!(%currency, %from, amount = %amount, %err, "custodian refund failed")
                }
            }
        }
    }

    /// Move uncommitted pool funds to `to`.
    pub fn withdraw(
        &mut self,
        to: &Account,
        amount: Amount,
        currency: &Currency,
        events: &mut Vec<DomainEvent>,
    ) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        to.ensure_valid()?;
        self.pay(currency, to, amount)?;
        events.push(DomainEvent::Withdrawal {
            to: to.clone(),
            amount,
            currency: currency.clone(),
        });
        Ok(())
    }
}
