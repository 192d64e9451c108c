//! Resolves qualification slots against a stage's standings.

use crate::error::{Result, SimError};
use crate::models::{SlotRef, TeamIdx};

/// A [`SlotRef`] bound to the ordinal of its group within a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSlot {
    /// Index into the stage's standings list.
    pub group: usize,
    pub slot: SlotRef,
}

/// Ranked teams per group for one stage, indexed like the stage's groups.
pub type StageStandings = Vec<Vec<TeamIdx>>;

/// Team currently holding `slot`, i.e. `standings[group][rank - 1]`.
pub fn resolve_slot(slot: &CompiledSlot, standings: &[Vec<TeamIdx>]) -> Result<TeamIdx> {
    let ranked = standings.get(slot.group).map(Vec::as_slice).unwrap_or(&[]);

    ranked.get(slot.slot.position()).copied().ok_or_else(|| SimError::SlotOutOfRange {
        slot: slot.slot.to_string(),
        available: ranked.len(),
    })
}
