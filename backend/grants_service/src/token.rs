//! Token ledger seam.
//!
//! The service never holds balances itself; it asks a [`TokenLedger`] to move
//! funds out of the custodian account. [`InMemoryLedger`] backs the binary
//! and the tests.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{Account, Amount, Currency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Insufficient funds")]
pub struct InsufficientFunds;

pub trait TokenLedger: Send + Sync {
    fn balance_of(&self, currency: &Currency, holder: &Account) -> Amount;

    /// Move `amount` from `from` to `to`. Either the whole amount moves or
    /// nothing does. A ledger may refuse a transfer even when `balance_of`
    /// covers it; callers paying several holders must undo earlier legs.
    fn transfer(
        &mut self,
        currency: &Currency,
        from: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<(), InsufficientFunds>;
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(Currency, Account), Amount>,
}

impl InMemoryLedger {
    /// Credit `to` out of thin air. Seeds pool balances at startup.
    pub fn mint(&mut self, currency: &Currency, to: &Account, amount: Amount) {
        let balance = self
            .balances
            .entry((currency.clone(), to.clone()))
            .or_default();
        *balance = balance.saturating_add(amount);
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, currency: &Currency, holder: &Account) -> Amount {
        self.balances
            .get(&(currency.clone(), holder.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &mut self,
        currency: &Currency,
        from: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<(), InsufficientFunds> {
        let available = self.balance_of(currency, from);
        let remaining = available.checked_sub(amount).ok_or(InsufficientFunds)?;
        self.balances
            .insert((currency.clone(), from.clone()), remaining);
        self.mint(currency, to, amount);
        Ok(())
    }
}
