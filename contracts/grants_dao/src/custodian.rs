//! # Funds custodian
//!
//! The contract's own address holds the custodial pool, one balance per
//! payment currency. There is no per-entity escrow: every solvency check
//! reads the contract's *total* balance in the currency at payout time.
//!
//! Registries never talk to a token contract directly; all outflows go
//! through [`pay`] or [`pay_batch`].

use soroban_sdk::{log, token, Address, Env, Vec};

use crate::Error;

/// Custodial balance held in `currency`.
pub fn balance(env: &Env, currency: &Address) -> i128 {
    token::Client::new(env, currency).balance(&env.current_contract_address())
}

/// Fail with `InsufficientBalance` unless the pool covers `amount`.
pub fn ensure_solvent(env: &Env, currency: &Address, amount: i128) -> Result<(), Error> {
    if balance(env, currency) < amount {
        return Err(Error::InsufficientBalance);
    }
    Ok(())
}

/// Transfer `amount` of `currency` from the pool to `to`.
///
/// Nothing is transferred when the pool cannot cover the amount.
pub fn pay(env: &Env, currency: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    ensure_solvent(env, currency, amount)?;
    token::Client::new(env, currency).transfer(&env.current_contract_address(), to, &amount);
    log!(env, "custodian paid", amount);
    Ok(())
}

/// Pay `amounts[i]` to `recipients[i]` for every `i`, or nobody.
///
/// A single solvency gate covers the whole batch before the first transfer.
pub fn pay_batch(
    env: &Env,
    currency: &Address,
    recipients: &Vec<Address>,
    amounts: &Vec<i128>,
) -> Result<(), Error> {
    if recipients.len() != amounts.len() {
        return Err(Error::WinnersLengthInvalid);
    }
    let mut total: i128 = 0;
    for amount in amounts.iter() {
        total = total.checked_add(amount).ok_or(Error::Overflow)?;
    }
    ensure_solvent(env, currency, total)?;

    let client = token::Client::new(env, currency);
    let pool = env.current_contract_address();
    for (recipient, amount) in recipients.iter().zip(amounts.iter()) {
        client.transfer(&pool, &recipient, &amount);
    }
    log!(env, "custodian paid batch", total, recipients.len());
    Ok(())
}
