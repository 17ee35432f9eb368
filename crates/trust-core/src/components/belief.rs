//! Belief Component

use serde::{Deserialize, Serialize};
use std::fmt;
use trust_events::{NEGATIVE_CODE, NEUTRAL_CODE, POSITIVE_CODE};

/// The opinion a node currently holds
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Belief {
    /// Uncommitted, the state every node starts in
    #[default]
    Neutral,
    Positive,
    Negative,
}

impl Belief {
    /// Single-character code used by the text map and the snapshot feed
    pub fn code(self) -> char {
        match self {
            Belief::Neutral => NEUTRAL_CODE,
            Belief::Positive => POSITIVE_CODE,
            Belief::Negative => NEGATIVE_CODE,
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            NEUTRAL_CODE => Some(Belief::Neutral),
            POSITIVE_CODE => Some(Belief::Positive),
            NEGATIVE_CODE => Some(Belief::Negative),
            _ => None,
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Belief::Neutral
    }
}

impl fmt::Display for Belief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
