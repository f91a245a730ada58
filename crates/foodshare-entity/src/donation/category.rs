//! Donation category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of food categories a donation can carry.
///
/// The Turkish labels used by earlier clients are accepted as input
/// aliases; output always uses the English label. Input goes through
/// [`FromStr`] in every position (query strings and JSON bodies alike).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DonationCategory {
    /// Food fit for human consumption.
    #[serde(rename = "clean food")]
    CleanFood,
    /// Leftovers suitable for animals or composting.
    #[serde(rename = "waste food")]
    WasteFood,
}

impl DonationCategory {
    /// Every category, in declaration order.
    pub const ALL: [DonationCategory; 2] = [Self::CleanFood, Self::WasteFood];

    /// Return the canonical label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CleanFood => "clean food",
            Self::WasteFood => "waste food",
        }
    }
}

impl fmt::Display for DonationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for DonationCategory {
    type Error = foodshare_core::AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for DonationCategory {
    type Err = foodshare_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clean food" | "clean_food" | "temiz yemek" => Ok(Self::CleanFood),
            "waste food" | "waste_food" | "atık yemek" => Ok(Self::WasteFood),
            _ => Err(foodshare_core::AppError::validation(format!(
                "Invalid category: '{s}'. Expected one of: clean food, waste food"
            ))),
        }
    }
}
