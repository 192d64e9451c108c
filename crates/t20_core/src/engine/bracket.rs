//! Compiled tournament structure.
//!
//! `Bracket::compile` validates a [`Topology`] once, before any trial, and
//! turns names and slot strings into indices so the trial loop never parses
//! or looks anything up by name.

use super::slot_resolver::CompiledSlot;
use crate::error::{Result, SimError};
use crate::models::{Roster, SlotRef, TeamIdx, Topology};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Teams per group that advance to the Super 8.
pub const QUALIFIERS_PER_GROUP: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledGroup {
    pub name: String,
    pub teams: Vec<TeamIdx>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSuper8Group {
    pub name: String,
    /// Group-stage slots filling this group, in listed order.
    pub slots: Vec<CompiledSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bracket {
    pub tournament: String,
    pub roster: Roster,
    pub groups: Vec<CompiledGroup>,
    pub super8: Vec<CompiledSuper8Group>,
    /// Two semifinals; the winner of the first is listed first in the final.
    pub semi_finals: [[CompiledSlot; 2]; 2],
}

impl Bracket {
    pub fn compile(topology: &Topology) -> Result<Self> {
        let roster = topology.roster();
        let groups = compile_groups(topology, &roster)?;

        let group_sizes: BTreeMap<&str, (usize, usize)> = groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name.as_str(), (i, g.teams.len())))
            .collect();
        let super8 = compile_super8(topology, &group_sizes)?;

        let super8_sizes: BTreeMap<&str, (usize, usize)> = super8
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name.as_str(), (i, g.slots.len())))
            .collect();
        let semi_finals = compile_semi_finals(topology, &super8_sizes)?;

        debug!(
            tournament = %topology.tournament,
            teams = roster.len(),
            groups = groups.len(),
            super8_groups = super8.len(),
            "bracket compiled"
        );

        Ok(Self { tournament: topology.tournament.clone(), roster, groups, super8, semi_finals })
    }

    /// Matches played per trial.
    pub fn matches_per_trial(&self) -> usize {
        let round_robin = |k: usize| k * k.saturating_sub(1) / 2;
        self.groups.iter().map(|g| round_robin(g.teams.len())).sum::<usize>()
            + self.super8.iter().map(|g| round_robin(g.slots.len())).sum::<usize>()
            + 3
    }
}

fn compile_groups(topology: &Topology, roster: &Roster) -> Result<Vec<CompiledGroup>> {
    if topology.groups.is_empty() {
        return Err(SimError::malformed("no groups defined"));
    }

    let mut seen = HashSet::new();
    let mut groups = Vec::with_capacity(topology.groups.len());

    for (name, members) in &topology.groups {
        if members.len() < QUALIFIERS_PER_GROUP {
            return Err(SimError::malformed(format!(
                "group {name} has {} team(s), needs at least {QUALIFIERS_PER_GROUP}",
                members.len()
            )));
        }

        let mut teams = Vec::with_capacity(members.len());
        for team in members {
            if team.as_str().trim().is_empty() {
                return Err(SimError::malformed(format!("group {name} has an empty team name")));
            }
            if !seen.insert(team) {
                return Err(SimError::malformed(format!("team {team} is listed more than once")));
            }
            let idx = roster
                .index_of(team.as_str())
                .ok_or_else(|| SimError::malformed(format!("team {team} missing from roster")))?;
            teams.push(idx);
        }

        groups.push(CompiledGroup { name: name.clone(), teams });
    }

    Ok(groups)
}

/// Parse `raw` and bind it to a group of the previous stage.
///
/// `sizes` maps group name to `(ordinal, team count)`; `max_rank` caps the
/// rank further (e.g. to the number of qualifiers).
fn compile_slot(
    raw: &str,
    sizes: &BTreeMap<&str, (usize, usize)>,
    max_rank: usize,
    context: &str,
) -> Result<CompiledSlot> {
    let slot = SlotRef::parse(raw)?;

    let &(group, size) = sizes.get(slot.group.as_str()).ok_or_else(|| {
        SimError::malformed(format!("{context}: slot '{raw}' names unknown group {}", slot.group))
    })?;

    let limit = size.min(max_rank);
    if slot.rank > limit {
        return Err(SimError::malformed(format!(
            "{context}: slot '{raw}' asks for rank {} but only {limit} can be resolved",
            slot.rank
        )));
    }

    Ok(CompiledSlot { group, slot })
}

fn compile_super8(
    topology: &Topology,
    group_sizes: &BTreeMap<&str, (usize, usize)>,
) -> Result<Vec<CompiledSuper8Group>> {
    if topology.super8.groups.is_empty() {
        return Err(SimError::malformed("no Super 8 groups defined"));
    }

    let mut used = HashSet::new();
    let mut super8 = Vec::with_capacity(topology.super8.groups.len());

    for (name, raw_slots) in &topology.super8.groups {
        if raw_slots.len() < 2 {
            return Err(SimError::malformed(format!(
                "Super 8 group {name} has {} slot(s), needs at least 2",
                raw_slots.len()
            )));
        }

        let context = format!("Super 8 group {name}");
        let mut slots = Vec::with_capacity(raw_slots.len());
        for raw in raw_slots {
            let compiled = compile_slot(raw, group_sizes, QUALIFIERS_PER_GROUP, &context)?;
            if !used.insert(compiled.slot.clone()) {
                return Err(SimError::malformed(format!("{context}: slot '{raw}' used twice")));
            }
            slots.push(compiled);
        }

        super8.push(CompiledSuper8Group { name: name.clone(), slots });
    }

    Ok(super8)
}

fn compile_semi_finals(
    topology: &Topology,
    super8_sizes: &BTreeMap<&str, (usize, usize)>,
) -> Result<[[CompiledSlot; 2]; 2]> {
    let raw = &topology.knockout.semi_finals;
    if raw.len() != 2 {
        return Err(SimError::malformed(format!(
            "expected exactly 2 semi-final pairs, got {}",
            raw.len()
        )));
    }

    let mut used = HashSet::new();
    let mut compile_pair = |pair: &Vec<String>, index: usize| -> Result<[CompiledSlot; 2]> {
        let context = format!("semi-final {}", index + 1);
        let [first, second] = pair.as_slice() else {
            return Err(SimError::malformed(format!(
                "{context}: expected 2 slots, got {}",
                pair.len()
            )));
        };

        let mut compile = |raw: &String| -> Result<CompiledSlot> {
            let compiled = compile_slot(raw, super8_sizes, usize::MAX, &context)?;
            if !used.insert(compiled.slot.clone()) {
                return Err(SimError::malformed(format!("{context}: slot '{raw}' used twice")));
            }
            Ok(compiled)
        };

        Ok([compile(first)?, compile(second)?])
    };

    Ok([compile_pair(&raw[0], 0)?, compile_pair(&raw[1], 1)?])
}
