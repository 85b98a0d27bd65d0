//! Administrator checks.
//!
//! The ledger consults an [`Authorizer`] before touching state; any caller it
//! does not recognise is rejected with `Unauthorized`.

use std::collections::BTreeSet;

use crate::types::Account;

pub trait Authorizer: Send + Sync {
    fn is_admin(&self, caller: &Account) -> bool;
}

/// Fixed set of administrator identities, loaded from `ADMIN_CALLERS`.
#[derive(Debug, Clone, Default)]
pub struct AdminSet {
    admins: BTreeSet<Account>,
}

impl AdminSet {
    pub fn new(admins: impl IntoIterator<Item = Account>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }
}

impl Authorizer for AdminSet {
    fn is_admin(&self, caller: &Account) -> bool {
        self.admins.contains(caller)
    }
}

#[cfg(test)]
pub struct AllowAll;

#[cfg(test)]
impl Authorizer for AllowAll {
    fn is_admin(&self, _caller: &Account) -> bool {
        true
    }
}

#[cfg(test)]
pub struct DenyAll;

#[cfg(test)]
impl Authorizer for DenyAll {
    fn is_admin(&self, _caller: &Account) -> bool {
        false
    }
}
