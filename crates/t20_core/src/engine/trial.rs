//! One complete trial of the tournament.
//!
//! Phases run in a fixed order with no way back:
//!
//! ```text
//! GroupStage → Qualification → Super8Stage → Semifinals → Final → Done
//! ```
//!
//! All per-trial state lives in [`Trial`] and is dropped with it.

use super::bracket::{Bracket, QUALIFIERS_PER_GROUP};
use super::match_resolver::MatchResolver;
use super::slot_resolver::{resolve_slot, StageStandings};
use super::stage::play_round_robin;
use crate::error::Result;
use crate::models::TeamIdx;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    GroupStage,
    Qualification,
    Super8Stage,
    Semifinals,
    Final,
    Done,
}

impl Phase {
    /// Following phase; `Done` is terminal.
    pub fn next(self) -> Phase {
        use Phase::*;
        match self {
            GroupStage => Qualification,
            Qualification => Super8Stage,
            Super8Stage => Semifinals,
            Semifinals => Final,
            Final => Done,
            Done => Done,
        }
    }
}

/// How far a team got in a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    Super8,
    Semifinal,
    Final,
    Champion,
}

impl Milestone {
    pub const ALL: [Milestone; 4] =
        [Milestone::Super8, Milestone::Semifinal, Milestone::Final, Milestone::Champion];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeEvent {
    pub team: TeamIdx,
    pub milestone: Milestone,
}

/// Events emitted by one trial, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialOutcome {
    pub events: Vec<OutcomeEvent>,
}

impl TrialOutcome {
    pub fn teams_reaching(&self, milestone: Milestone) -> impl Iterator<Item = TeamIdx> + '_ {
        self.events.iter().filter(move |e| e.milestone == milestone).map(|e| e.team)
    }

    pub fn champion(&self) -> Option<TeamIdx> {
        self.teams_reaching(Milestone::Champion).next()
    }
}

struct Trial<'a> {
    bracket: &'a Bracket,
    resolver: &'a MatchResolver<'a>,
    group_standings: StageStandings,
    super8_standings: StageStandings,
    semifinal_winners: Vec<TeamIdx>,
    outcome: TrialOutcome,
}

impl<'a> Trial<'a> {
    fn new(bracket: &'a Bracket, resolver: &'a MatchResolver<'a>) -> Self {
        Self {
            bracket,
            resolver,
            group_standings: Vec::with_capacity(bracket.groups.len()),
            super8_standings: Vec::with_capacity(bracket.super8.len()),
            semifinal_winners: Vec::with_capacity(2),
            outcome: TrialOutcome { events: Vec::with_capacity(bracket.groups.len() * 2 + 7) },
        }
    }

    fn emit(&mut self, team: TeamIdx, milestone: Milestone) {
        self.outcome.events.push(OutcomeEvent { team, milestone });
    }

    fn step<R: Rng + ?Sized>(&mut self, phase: Phase, rng: &mut R) -> Result<()> {
        let (bracket, resolver) = (self.bracket, self.resolver);

        match phase {
            Phase::GroupStage => {
                for group in &bracket.groups {
                    let table = play_round_robin(&group.teams, resolver, rng)?;
                    self.group_standings.push(table.ranked_teams());
                }
            }
            Phase::Qualification => {
                for g in 0..self.group_standings.len() {
                    for q in 0..QUALIFIERS_PER_GROUP {
                        let team = self.group_standings[g][q];
                        self.emit(team, Milestone::Super8);
                    }
                }
            }
            Phase::Super8Stage => {
                for group in &bracket.super8 {
                    let teams = group
                        .slots
                        .iter()
                        .map(|slot| resolve_slot(slot, &self.group_standings))
                        .collect::<Result<Vec<_>>>()?;
                    let table = play_round_robin(&teams, resolver, rng)?;
                    self.super8_standings.push(table.ranked_teams());
                }
            }
            Phase::Semifinals => {
                for [first, second] in &bracket.semi_finals {
                    let team_a = resolve_slot(first, &self.super8_standings)?;
                    let team_b = resolve_slot(second, &self.super8_standings)?;
                    self.emit(team_a, Milestone::Semifinal);
                    self.emit(team_b, Milestone::Semifinal);

                    let outcome = resolver.play(team_a, team_b, rng)?;
                    self.semifinal_winners.push(outcome.winner);
                }
            }
            Phase::Final => {
                let (team_a, team_b) = (self.semifinal_winners[0], self.semifinal_winners[1]);
                self.emit(team_a, Milestone::Final);
                self.emit(team_b, Milestone::Final);

                let outcome = resolver.play(team_a, team_b, rng)?;
                self.emit(outcome.winner, Milestone::Champion);
            }
            Phase::Done => {}
        }
        Ok(())
    }
}

/// Run one trial from the group stage to the champion.
pub fn run_trial<R: Rng + ?Sized>(
    bracket: &Bracket,
    resolver: &MatchResolver<'_>,
    rng: &mut R,
) -> Result<TrialOutcome> {
    let mut trial = Trial::new(bracket, resolver);
    let mut phase = Phase::GroupStage;

    while phase != Phase::Done {
        trial.step(phase, rng)?;
        phase = phase.next();
    }

    Ok(trial.outcome)
}
