//! Per-family entity registries.
//!
//! A registry owns the entities of one family and applies their lifecycle
//! rules. Operations push the events they emit into a caller-owned buffer,
//! and only after every check and transfer has succeeded. Registries never
//! call each other.

mod competitions;
mod grants;
mod initiatives;

pub use competitions::CompetitionRegistry;
pub use grants::GrantRegistry;
pub use initiatives::InitiativeRegistry;

use crate::errors::{LedgerError, LedgerResult};
use crate::types::{Amount, EntityKey, MilestoneSchedule, Status};

fn ensure_active(status: Status, key: &EntityKey) -> LedgerResult<()> {
    if status.is_terminal() {
        return Err(LedgerError::NotActive(key.clone()));
    }
    Ok(())
}

/// Cancelling is allowed from any state except `Completed`.
fn ensure_cancellable(status: Status, key: &EntityKey) -> LedgerResult<()> {
    if status == Status::Completed {
        return Err(LedgerError::NotActive(key.clone()));
    }
    Ok(())
}

fn next_tranche(
    milestones: &MilestoneSchedule,
    current: usize,
    key: &EntityKey,
) -> LedgerResult<Amount> {
    milestones
        .get(current)
        .ok_or_else(|| LedgerError::MilestonesExhausted(key.clone()))
}
