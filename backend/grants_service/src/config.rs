//! Application configuration loaded from environment variables.

use std::collections::BTreeSet;

use crate::errors::{Result, ServiceError};
use crate::types::{Account, Amount, Currency};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the REST API server
    pub api_port: u16,
    /// Callers allowed to mutate the ledger (comma-separated `ADMIN_CALLERS`)
    pub admin_callers: BTreeSet<Account>,
    /// Token-ledger account holding the pooled funds
    pub custodian_account: Account,
    /// Opening pool balances, `currency:amount` pairs (for the in-memory ledger)
    pub pool_seed: Vec<(Currency, Amount)>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let admins = env_var("ADMIN_CALLERS").map_err(|_| {
            ServiceError::Config("ADMIN_CALLERS environment variable is required".to_string())
        })?;

        Ok(Config {
            api_port: env_var("API_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .map_err(|_| ServiceError::Config("Invalid API_PORT".to_string()))?,
            admin_callers: parse_admins(&admins)?,
            custodian_account: Account::new(
                env_var("CUSTODIAN_ACCOUNT").unwrap_or_else(|_| "treasury".to_string()),
            ),
            pool_seed: parse_pool_seed(&env_var("POOL_SEED").unwrap_or_default())?,
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| ServiceError::Config(format!("Missing env var: {key}")))
}

pub fn parse_admins(raw: &str) -> Result<BTreeSet<Account>> {
    let admins: BTreeSet<Account> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Account::from)
        .collect();
    if admins.is_empty() {
        return Err(ServiceError::Config(
            "ADMIN_CALLERS must name at least one caller".to_string(),
        ));
    }
    Ok(admins)
}

pub fn parse_pool_seed(raw: &str) -> Result<Vec<(Currency, Amount)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (currency, amount) = pair
                .split_once(':')
                .ok_or_else(|| ServiceError::Config(format!("Invalid POOL_SEED entry: {pair}")))?;
            let amount: Amount = amount
                .trim()
                .parse()
                .map_err(|_| ServiceError::Config(format!("Invalid POOL_SEED amount: {pair}")))?;
            Ok((Currency::from(currency.trim()), amount))
        })
        .collect()
}
