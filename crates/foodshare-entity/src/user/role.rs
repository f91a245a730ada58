//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of participant a user registered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Offers surplus food.
    Donor,
    /// Collects clean food for people.
    Recipient,
    /// Collects leftovers for animal shelters.
    ShelterVolunteer,
}

impl UserRole {
    /// Every role, in declaration order.
    pub const ALL: [UserRole; 3] = [Self::Donor, Self::Recipient, Self::ShelterVolunteer];

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donor => "donor",
            Self::Recipient => "recipient",
            Self::ShelterVolunteer => "shelter_volunteer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = foodshare_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "donor" => Ok(Self::Donor),
            "recipient" => Ok(Self::Recipient),
            "shelter_volunteer" => Ok(Self::ShelterVolunteer),
            _ => Err(foodshare_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: donor, recipient, shelter_volunteer"
            ))),
        }
    }
}
