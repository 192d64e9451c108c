//! Tournament topology as supplied by the caller.
//!
//! ```json
//! {
//!   "tournament": "T20WC",
//!   "groups": { "A": ["India", "Pakistan", "USA"], "B": ["..."] },
//!   "super8": { "groups": { "S1": ["A1", "B2"], "S2": ["B1", "A2"] } },
//!   "knockout": { "semi_finals": [["S1_1", "S2_2"], ["S2_1", "S1_2"]] }
//! }
//! ```
//!
//! Maps are `BTreeMap`s so groups are always simulated in name order, which
//! keeps the random draw sequence independent of the input key order.

use super::team::{Roster, TeamId};
use crate::error::{Result, SimError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_TOURNAMENT_NAME: &str = "T20WC";

fn default_tournament() -> String {
    DEFAULT_TOURNAMENT_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Topology {
    /// Display name echoed back in simulation responses.
    #[serde(default = "default_tournament")]
    pub tournament: String,
    /// Group-stage membership: group name -> teams.
    pub groups: BTreeMap<String, Vec<TeamId>>,
    pub super8: Super8Config,
    pub knockout: KnockoutConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Super8Config {
    /// Super-8 group name -> group-stage slot references (`"A1"`, `"B2"`, ...).
    pub groups: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KnockoutConfig {
    /// Exactly two pairs of Super-8 slot references (`"S1_1"`, ...).
    pub semi_finals: Vec<Vec<String>>,
}

impl Topology {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SimError::malformed(format!("invalid topology JSON: {e}")))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| SimError::malformed(format!("invalid topology YAML: {e}")))
    }

    /// Parse a topology document, picking YAML for `.yaml`/`.yml` paths and
    /// JSON otherwise.
    pub fn from_str_for_path(content: &str, path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(content),
            _ => Self::from_json(content),
        }
    }

    /// Every team appearing in the group stage.
    pub fn roster(&self) -> Roster {
        Roster::new(self.groups.values().flatten().cloned())
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Topology)
    }
}
