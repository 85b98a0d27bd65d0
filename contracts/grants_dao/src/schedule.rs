//! Milestone schedule arithmetic shared by grants and initiatives.
//!
//! A schedule is validated once at creation (non-empty, every tranche
//! strictly positive, total representable as `i128`), so the sums taken
//! later over any suffix of it cannot overflow.

use soroban_sdk::Vec;

use crate::Error;

/// Validate a milestone schedule and return its total.
pub fn validate(milestones: &Vec<i128>) -> Result<i128, Error> {
    if milestones.is_empty() {
        return Err(Error::InvalidSchedule);
    }
    let mut total: i128 = 0;
    for amount in milestones.iter() {
        if amount <= 0 {
            return Err(Error::InvalidSchedule);
        }
        total = total.checked_add(amount).ok_or(Error::InvalidSchedule)?;
    }
    Ok(total)
}

/// The tranche released by the next progression.
pub fn next_tranche(milestones: &Vec<i128>, current: u32) -> Result<i128, Error> {
    milestones.get(current).ok_or(Error::MilestonesExhausted)
}

/// Sum of every tranche not yet released.
pub fn remaining(milestones: &Vec<i128>, current: u32) -> Result<i128, Error> {
    let mut total: i128 = 0;
    for index in current..milestones.len() {
        let amount = milestones.get(index).ok_or(Error::MilestonesExhausted)?;
        total = total.checked_add(amount).ok_or(Error::Overflow)?;
    }
    Ok(total)
}
