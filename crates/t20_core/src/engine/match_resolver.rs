//! Single-match resolution: winner draw and net-run-rate proxy margin.

use super::config::MarginModel;
use crate::error::{Result, SimError};
use crate::models::TeamIdx;
use crate::probability::ProbabilityMatrix;
use rand::Rng;
use std::fmt::Display;

/// Draw the winner of `team_a` vs `team_b`.
///
/// `team_a` wins when a uniform draw in `[0, 1)` is strictly below
/// `p_a_wins`. A probability outside `[0, 1]` is fatal.
pub fn draw_winner<T, R>(team_a: T, team_b: T, p_a_wins: f64, rng: &mut R) -> Result<T>
where
    T: Copy + Display,
    R: Rng + ?Sized,
{
    if !(0.0..=1.0).contains(&p_a_wins) {
        return Err(SimError::InvalidProbability {
            team: team_a.to_string(),
            opponent: team_b.to_string(),
            value: p_a_wins,
        });
    }

    if rng.gen::<f64>() < p_a_wins {
        Ok(team_a)
    } else {
        Ok(team_b)
    }
}

/// Net-run-rate proxy for a win whose pre-match probability was
/// `winner_probability`. Always `>= model.floor`.
pub fn margin_proxy<R>(winner_probability: f64, model: &MarginModel, rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    let strength = (winner_probability - 0.5).abs() * 2.0;
    let noise = rng.gen_range(-model.noise..=model.noise);
    (model.base + model.scale * strength + noise).max(model.floor)
}

/// Outcome of one resolved match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub winner: TeamIdx,
    pub loser: TeamIdx,
    /// Pre-match probability of the result that happened.
    pub winner_probability: f64,
}

/// Resolves matches between roster teams against a compiled probability
/// matrix.
#[derive(Debug, Clone, Copy)]
pub struct MatchResolver<'a> {
    matrix: &'a ProbabilityMatrix,
    margin: &'a MarginModel,
}

impl<'a> MatchResolver<'a> {
    pub fn new(matrix: &'a ProbabilityMatrix, margin: &'a MarginModel) -> Self {
        Self { matrix, margin }
    }

    /// Play `team_a` vs `team_b` using the stored `P(team_a beats team_b)`.
    pub fn play<R: Rng + ?Sized>(
        &self,
        team_a: TeamIdx,
        team_b: TeamIdx,
        rng: &mut R,
    ) -> Result<MatchOutcome> {
        let p_a = self.matrix.get(team_a, team_b);
        let winner = draw_winner(team_a, team_b, p_a, rng)?;

        Ok(if winner == team_a {
            MatchOutcome { winner: team_a, loser: team_b, winner_probability: p_a }
        } else {
            MatchOutcome { winner: team_b, loser: team_a, winner_probability: 1.0 - p_a }
        })
    }

    /// Margin credited to the winner (and debited from the loser).
    pub fn margin<R: Rng + ?Sized>(&self, outcome: &MatchOutcome, rng: &mut R) -> f64 {
        margin_proxy(outcome.winner_probability, self.margin, rng)
    }
}
