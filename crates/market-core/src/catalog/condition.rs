//! Item condition tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "used-like-new", alias = "used-likenew")]
    UsedLikeNew,
    #[serde(rename = "used-good")]
    UsedGood,
    #[serde(rename = "used-fair")]
    UsedFair,
    #[serde(rename = "used-poor")]
    UsedPoor,
}

impl Condition {
    /// Every condition, best first.
    pub const ALL: [Condition; 5] = [
        Condition::New,
        Condition::UsedLikeNew,
        Condition::UsedGood,
        Condition::UsedFair,
        Condition::UsedPoor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::UsedLikeNew => "used-like-new",
            Condition::UsedGood => "used-good",
            Condition::UsedFair => "used-fair",
            Condition::UsedPoor => "used-poor",
        }
    }

    /// Parse a URL or catalog tag. `used-likenew` is the filter panel's
    /// spelling and is accepted as well.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Some(Condition::New),
            "used-like-new" | "used-likenew" => Some(Condition::UsedLikeNew),
            "used-good" => Some(Condition::UsedGood),
            "used-fair" => Some(Condition::UsedFair),
            "used-poor" => Some(Condition::UsedPoor),
            _ => None,
        }
    }

    /// Label shown in the filter panel.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "New",
            Condition::UsedLikeNew => "Like New",
            Condition::UsedGood => "Good",
            Condition::UsedFair => "Fair",
            Condition::UsedPoor => "Poor",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
