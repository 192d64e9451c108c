use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// Opaque team identifier (e.g. "India").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TeamId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for TeamId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Dense index of a team inside a [`Roster`].
pub type TeamIdx = usize;

/// Every team taking part in a tournament, sorted by name.
///
/// The sorted order defines [`TeamIdx`] values and the tie order of the
/// final odds table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    teams: Vec<TeamId>,
    index: HashMap<TeamId, TeamIdx>,
}

impl Roster {
    pub fn new<I>(teams: I) -> Self
    where
        I: IntoIterator<Item = TeamId>,
    {
        let mut teams: Vec<TeamId> = teams.into_iter().collect();
        teams.sort();
        teams.dedup();

        let index = teams.iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();
        Self { teams, index }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn index_of(&self, team: &str) -> Option<TeamIdx> {
        self.index.get(team).copied()
    }

    pub fn team(&self, idx: TeamIdx) -> &TeamId {
        &self.teams[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamId> {
        self.teams.iter()
    }

    /// All ordered pairs `(team, opponent)` with `team != opponent`.
    pub fn ordered_pairs(&self) -> impl Iterator<Item = (&TeamId, &TeamId)> {
        self.teams.iter().flat_map(move |a| {
            self.teams.iter().filter(move |b| *b != a).map(move |b| (a, b))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_sorted_and_deduped() {
        let roster = Roster::new(["Nepal", "India", "Canada", "India"].map(TeamId::from));

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.team(0).as_str(), "Canada");
        assert_eq!(roster.index_of("India"), Some(1));
        assert_eq!(roster.index_of("Oman"), None);
    }

    #[test]
    fn test_ordered_pairs_cover_both_directions() {
        let roster = Roster::new(["A", "B", "C"].map(TeamId::from));
        let pairs: Vec<(String, String)> = roster
            .ordered_pairs()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();

        assert_eq!(pairs.len(), 6);
        assert!(pairs.contains(&("A".to_string(), "B".to_string())));
        assert!(pairs.contains(&("B".to_string(), "A".to_string())));
        assert!(!pairs.iter().any(|(a, b)| a == b));
    }
}
