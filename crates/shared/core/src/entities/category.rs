use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Client service tier attached to each trade
///
/// The input column is free text; anything unrecognized (or absent) maps to
/// `Unknown` so the row still aggregates under a stable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientCategory {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Unknown,
}

impl ClientCategory {
    /// Parse a category label, case-insensitive
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "bronze" => ClientCategory::Bronze,
            "silver" => ClientCategory::Silver,
            "gold" => ClientCategory::Gold,
            "platinum" => ClientCategory::Platinum,
            _ => ClientCategory::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientCategory::Bronze => "bronze",
            ClientCategory::Silver => "silver",
            ClientCategory::Gold => "gold",
            ClientCategory::Platinum => "platinum",
            ClientCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ClientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
