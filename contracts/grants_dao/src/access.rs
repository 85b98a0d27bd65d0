//! # Access control
//!
//! The DAO has exactly one administrator, stored in instance storage by
//! [`init_admin`]. Every mutating entry point passes its `caller` through
//! [`require_admin`] before touching any state.
//!
//! The check fails closed: a contract that was never initialised has no
//! administrator, so nobody passes.

use soroban_sdk::{Address, Env};

use crate::events;
use crate::storage::{get_admin, has_admin, set_admin};
use crate::Error;

/// Store the first administrator. Fails if one is already set.
pub fn init_admin(env: &Env, admin: &Address) -> Result<(), Error> {
    if has_admin(env) {
        return Err(Error::AlreadyInitialized);
    }
    set_admin(env, admin);
    Ok(())
}

/// `true` if `caller` is the current administrator.
pub fn is_admin(env: &Env, caller: &Address) -> bool {
    match get_admin(env) {
        Some(admin) => admin == *caller,
        None => false,
    }
}

/// Require `caller` to have signed the invocation and to be the administrator.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if !is_admin(env, caller) {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Hand the administrator capability to `new_admin`.
///
/// The previous administrator loses it immediately.
pub fn transfer_admin(env: &Env, caller: &Address, new_admin: &Address) -> Result<(), Error> {
    require_admin(env, caller)?;
    set_admin(env, new_admin);
    events::admin_changed(env, caller, new_admin);
    Ok(())
}

/// Current administrator.
pub fn admin(env: &Env) -> Result<Address, Error> {
    get_admin(env).ok_or(Error::NotInitialized)
}
