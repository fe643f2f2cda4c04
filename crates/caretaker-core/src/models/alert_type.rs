//! Alert type tokens reported by devices

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type of an emergency event.
///
/// The token set is open: tokens without a dedicated variant are kept verbatim
/// in [`AlertType::Other`] so they round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertType {
    FallDetected,
    ProlongedInactivity,
    ShortHum,
    LongHum,
    GestureLeft,
    GestureRight,
    Other(String),
}

impl AlertType {
    /// Parse a wire token. Matching is exact, like the devices emit them.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "FALL_DETECTED" => Self::FallDetected,
            "PROLONGED_INACTIVITY" => Self::ProlongedInactivity,
            "SHORT_HUM" => Self::ShortHum,
            "LONG_HUM" => Self::LongHum,
            "GESTURE_LEFT" => Self::GestureLeft,
            "GESTURE_RIGHT" => Self::GestureRight,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire token for this type
    #[must_use]
    pub fn as_token(&self) -> &str {
        match self {
            Self::FallDetected => "FALL_DETECTED",
            Self::ProlongedInactivity => "PROLONGED_INACTIVITY",
            Self::ShortHum => "SHORT_HUM",
            Self::LongHum => "LONG_HUM",
            Self::GestureLeft => "GESTURE_LEFT",
            Self::GestureRight => "GESTURE_RIGHT",
            Self::Other(token) => token,
        }
    }
}

impl From<String> for AlertType {
    fn from(value: String) -> Self {
        Self::from_token(&value)
    }
}

impl From<AlertType> for String {
    fn from(value: AlertType) -> Self {
        match value {
            AlertType::Other(token) => token,
            known => known.as_token().to_string(),
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}
