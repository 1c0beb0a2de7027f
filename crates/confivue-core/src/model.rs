//! Core data model types for confivue.
//!
//! These are the types shared by the catalog, the engine and the API:
//! items, age bands, response records and the qualitative score bands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client age category constraining which items are eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "7-10")]
    Child,
    #[serde(rename = "11-13")]
    EarlyTeen,
    #[serde(rename = "14-19")]
    Teen,
}

impl AgeBand {
    /// All age bands in ascending order.
    pub const ALL: [AgeBand; 3] = [AgeBand::Child, AgeBand::EarlyTeen, AgeBand::Teen];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBand::Child => "7-10",
            AgeBand::EarlyTeen => "11-13",
            AgeBand::Teen => "14-19",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "7-10" => Ok(AgeBand::Child),
            "11-13" => Ok(AgeBand::EarlyTeen),
            "14-19" => Ok(AgeBand::Teen),
            other => Err(format!(
                "unknown age band: {other} (expected 7-10, 11-13 or 14-19)"
            )),
        }
    }
}

/// Trim and lowercase user-supplied enum text.
fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

/// How an item is presented to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemFormat {
    Likert,
    Pictorial,
}

impl fmt::Display for ItemFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemFormat::Likert => write!(f, "likert"),
            ItemFormat::Pictorial => write!(f, "pictorial"),
        }
    }
}

/// When in a programme the assessment is taken. Recorded, never scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Baseline,
    Mid,
    Post,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Baseline => write!(f, "baseline"),
            Mode::Mid => write!(f, "mid"),
            Mode::Post => write!(f, "post"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "baseline" => Ok(Mode::Baseline),
            "mid" => Ok(Mode::Mid),
            "post" => Ok(Mode::Post),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// A single assessment item from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: String,
    /// Age band this item is written for.
    pub age_band: AgeBand,
    /// Free-text category label (e.g. "resilience").
    pub domain: String,
    /// Presentation format.
    pub format: ItemFormat,
    /// Display text.
    pub stem: String,
    /// Ordered answer options.
    #[serde(default)]
    pub options: Vec<String>,
}

/// Lowest accepted response category.
pub const MIN_CATEGORY: u8 = 0;
/// Highest accepted response category.
pub const MAX_CATEGORY: u8 = 4;

/// A recorded answer to a presented item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub item_id: String,
    /// Likert-style rating in `0..=4`.
    pub category: u8,
    /// Response time in milliseconds, if the client measured it.
    #[serde(default)]
    pub rt_ms: Option<u64>,
}

/// The item handed to a client by `next_item`.
///
/// An empty `item_id` is the termination signal: the session has been
/// completed and there is nothing more to present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextItem {
    pub item_id: String,
    pub format: ItemFormat,
    pub stem: String,
    pub options: Vec<String>,
    pub domain: String,
}

impl NextItem {
    /// The "no more items" marker.
    pub fn exhausted() -> Self {
        Self {
            item_id: String::new(),
            format: ItemFormat::Likert,
            stem: String::new(),
            options: Vec::new(),
            domain: String::new(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.item_id.is_empty()
    }
}

impl From<&Item> for NextItem {
    fn from(item: &Item) -> Self {
        Self {
            item_id: item.id.clone(),
            format: item.format,
            stem: item.stem.clone(),
            options: item.options.clone(),
            domain: item.domain.clone(),
        }
    }
}

/// Qualitative label derived from the scaled score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Emerging,
    Growing,
    Thriving,
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::Emerging => write!(f, "Emerging"),
            Band::Growing => write!(f, "Growing"),
            Band::Thriving => write!(f, "Thriving"),
        }
    }
}
