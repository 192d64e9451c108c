use crate::error::{Result, SimError};
use std::fmt;
use std::str::FromStr;

/// Reference to "the team ranked `rank` in group `group`" for the current
/// trial's standings.
///
/// Two spellings are accepted:
/// - `"<group>_<rank>"`, e.g. `"S1_1"` (Super-8 standings)
/// - `"<group><rank>"` with the rank as trailing digits, e.g. `"A1"`, `"B2"`
///
/// `rank` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub group: String,
    pub rank: usize,
}

impl SlotRef {
    pub fn new(group: impl Into<String>, rank: usize) -> Self {
        Self { group: group.into(), rank }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();

        let (group, rank) = match raw.rsplit_once('_') {
            Some((group, rank)) => (group, rank),
            None => {
                let split = raw
                    .char_indices()
                    .rev()
                    .take_while(|(_, c)| c.is_ascii_digit())
                    .last()
                    .map(|(i, _)| i)
                    .ok_or_else(|| {
                        SimError::malformed(format!("slot '{raw}' has no rank digits"))
                    })?;
                raw.split_at(split)
            }
        };

        if group.is_empty() {
            return Err(SimError::malformed(format!("slot '{raw}' has no group name")));
        }

        let rank: usize = rank
            .parse()
            .map_err(|_| SimError::malformed(format!("slot '{raw}' has an invalid rank")))?;
        if rank == 0 {
            return Err(SimError::malformed(format!("slot '{raw}' ranks are 1-based")));
        }

        Ok(Self::new(group, rank))
    }

    /// Zero-based position in a standings list.
    pub fn position(&self) -> usize {
        self.rank - 1
    }
}

impl FromStr for SlotRef {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.group, self.rank)
    }
}
