//! Data models for Caretaker

mod alert;
mod alert_type;

pub use alert::{AlertId, AlertRecord, AlertSnapshot, AlertWire, NewAlert, DEFAULT_DEVICE_ID};
pub use alert_type::AlertType;
