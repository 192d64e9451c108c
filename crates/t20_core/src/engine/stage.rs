//! Round-robin stage simulation and ranking.
//!
//! The same routine runs every group-stage group and every Super-8 group.
//! Ranking keys, in order:
//! 1. points (desc)
//! 2. net-run-rate proxy (desc)
//! 3. entry order in the input team list (asc)

use super::match_resolver::MatchResolver;
use crate::error::Result;
use crate::models::TeamIdx;
use rand::Rng;
use std::cmp::Ordering;

pub const POINTS_PER_WIN: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct StandingRow {
    pub team: TeamIdx,
    /// Position of the team in the stage's input list; final tie-breaker.
    pub entry_order: usize,
    pub played: u32,
    pub won: u32,
    pub points: u32,
    pub net_run_rate: f64,
}

impl StandingRow {
    fn new(team: TeamIdx, entry_order: usize) -> Self {
        Self { team, entry_order, played: 0, won: 0, points: 0, net_run_rate: 0.0 }
    }
}

/// Final table of one round robin, best team first.
#[derive(Debug, Clone, PartialEq)]
pub struct StageTable {
    pub rows: Vec<StandingRow>,
    pub matches_played: usize,
}

impl StageTable {
    pub fn ranked_teams(&self) -> Vec<TeamIdx> {
        self.rows.iter().map(|r| r.team).collect()
    }

    pub fn total_points(&self) -> u32 {
        self.rows.iter().map(|r| r.points).sum()
    }
}

/// Ordering used for standings; `Less` means `a` ranks above `b`.
pub fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.net_run_rate.total_cmp(&a.net_run_rate))
        .then_with(|| a.entry_order.cmp(&b.entry_order))
}

/// Play every unordered pair of `teams` once and rank the result.
///
/// Fixtures run in `(i, j)` order with `i < j`; the team listed first is
/// the "A" side of the probability lookup.
pub fn play_round_robin<R>(
    teams: &[TeamIdx],
    resolver: &MatchResolver<'_>,
    rng: &mut R,
) -> Result<StageTable>
where
    R: Rng + ?Sized,
{
    let mut rows: Vec<StandingRow> =
        teams.iter().enumerate().map(|(i, &team)| StandingRow::new(team, i)).collect();
    let mut matches_played = 0;

    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            let outcome = resolver.play(teams[i], teams[j], rng)?;
            let margin = resolver.margin(&outcome, rng);

            let (winner, loser) = if outcome.winner == teams[i] { (i, j) } else { (j, i) };

            rows[winner].won += 1;
            rows[winner].points += POINTS_PER_WIN;
            rows[winner].net_run_rate += margin;
            rows[loser].net_run_rate -= margin;
            rows[winner].played += 1;
            rows[loser].played += 1;

            matches_played += 1;
        }
    }

    rows.sort_unstable_by(compare_rows);

    Ok(StageTable { rows, matches_played })
}
