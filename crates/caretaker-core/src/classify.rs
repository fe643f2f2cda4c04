//! Alert classification: urgency, display label, and surface body.
//!
//! Pure and total. Every token, known or not, yields a deterministic result.

use serde::Serialize;

use crate::models::AlertType;
use crate::util::title_case_token;

/// Label prefix for urgent alerts
pub const URGENT_MARKER: &str = "⚠️🆘";
/// Label prefix for every other alert
pub const STANDARD_MARKER: &str = "🚨";

const URGENT_BODY: &str = "Immediate attention required!";
const BLANK_TYPE_BODY: &str = "Emergency detected";
const BLANK_TYPE_NAME: &str = "Emergency Alert";

/// Urgency of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AlertCategory {
    Urgent,
    Standard,
}

/// Icon hint for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertIcon {
    Warning,
    Info,
    Phone,
    Bell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: AlertCategory,
    pub label: String,
    pub icon: AlertIcon,
}

/// Classify an alert type.
#[must_use]
pub fn classify(alert_type: &AlertType) -> Classification {
    let (category, icon) = match alert_type {
        AlertType::FallDetected => (AlertCategory::Urgent, AlertIcon::Warning),
        AlertType::ProlongedInactivity => (AlertCategory::Urgent, AlertIcon::Info),
        AlertType::ShortHum | AlertType::LongHum => (AlertCategory::Standard, AlertIcon::Phone),
        AlertType::GestureLeft | AlertType::GestureRight | AlertType::Other(_) => {
            (AlertCategory::Standard, AlertIcon::Bell)
        }
    };

    Classification {
        category,
        label: label_for(category, alert_type.as_token()),
        icon,
    }
}

/// Classify a raw wire token.
#[must_use]
pub fn classify_token(token: &str) -> Classification {
    classify(&AlertType::from_token(token))
}

/// Body text shown under the label on a raised surface.
#[must_use]
pub fn surface_body(category: AlertCategory, alert_type: &AlertType) -> String {
    match category {
        AlertCategory::Urgent => URGENT_BODY.to_string(),
        AlertCategory::Standard => {
            let token = alert_type.as_token();
            if token.trim().is_empty() {
                BLANK_TYPE_BODY.to_string()
            } else {
                token.to_string()
            }
        }
    }
}

fn label_for(category: AlertCategory, token: &str) -> String {
    let marker = match category {
        AlertCategory::Urgent => URGENT_MARKER,
        AlertCategory::Standard => STANDARD_MARKER,
    };
    let name = if token.trim().is_empty() {
        BLANK_TYPE_NAME.to_string()
    } else {
        title_case_token(token)
    };
    format!("{marker} {name}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fall_and_inactivity_are_urgent() {
        let fall = classify(&AlertType::FallDetected);
        assert_eq!(fall.category, AlertCategory::Urgent);
        assert_eq!(fall.label, "⚠️🆘 Fall Detected");
        assert_eq!(fall.icon, AlertIcon::Warning);

        let inactivity = classify(&AlertType::ProlongedInactivity);
        assert_eq!(inactivity.category, AlertCategory::Urgent);
        assert_eq!(inactivity.label, "⚠️🆘 Prolonged Inactivity");
        assert_eq!(inactivity.icon, AlertIcon::Info);
    }

    #[test]
    fn other_known_types_are_standard() {
        let hum = classify(&AlertType::LongHum);
        assert_eq!(hum.category, AlertCategory::Standard);
        assert_eq!(hum.label, "🚨 Long Hum");
        assert_eq!(hum.icon, AlertIcon::Phone);

        let gesture = classify(&AlertType::GestureRight);
        assert_eq!(gesture.label, "🚨 Gesture Right");
        assert_eq!(gesture.icon, AlertIcon::Bell);
    }

    #[test]
    fn unknown_tokens_fall_back_to_standard_with_split_label() {
        let classification = classify_token("PANIC_BUTTON_PRESSED");
        assert_eq!(classification.category, AlertCategory::Standard);
        assert_eq!(classification.label, "🚨 Panic Button Pressed");
        assert_eq!(classify_token("PANIC_BUTTON_PRESSED"), classification);
    }

    #[test]
    fn blank_token_still_gets_a_label() {
        let classification = classify_token("");
        assert_eq!(classification.category, AlertCategory::Standard);
        assert_eq!(classification.label, "🚨 Emergency Alert");
    }

    #[test]
    fn surface_body_depends_on_category() {
        assert_eq!(
            surface_body(AlertCategory::Urgent, &AlertType::ProlongedInactivity),
            "Immediate attention required!"
        );
        assert_eq!(
            surface_body(AlertCategory::Standard, &AlertType::ShortHum),
            "SHORT_HUM"
        );
        assert_eq!(
            surface_body(AlertCategory::Standard, &AlertType::Other(String::new())),
            "Emergency detected"
        );
    }
}
