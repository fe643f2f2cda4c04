//! Alert record and snapshot models

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AlertType;

/// Device id stamped on alerts that arrive without one.
pub const DEFAULT_DEVICE_ID: &str = "wearable_01";

/// Key of an alert in the remote store.
///
/// Always non-blank: a blank key is not addressable, so there is no way to
/// construct one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AlertId(String);

impl AlertId {
    /// Parse a store key, rejecting blank values.
    ///
    /// Keys are opaque: a non-blank key is kept byte for byte, whitespace
    /// included.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    /// Generate a fresh time-ordered key. Only stores assign ids.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored shape of an alert; the id is the key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertWire {
    #[serde(rename = "type", default)]
    pub alert_type: String,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// One reported emergency event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRecord {
    pub id: AlertId,
    pub alert_type: AlertType,
    /// Only ever moves from `false` to `true`.
    pub acknowledged: bool,
    /// Creation time set by the producer (Unix ms)
    pub timestamp: i64,
    pub device_id: Option<String>,
}

impl AlertRecord {
    /// Attach the store key to a wire record.
    #[must_use]
    pub fn from_wire(id: AlertId, wire: AlertWire) -> Self {
        Self {
            id,
            alert_type: AlertType::from(wire.alert_type),
            acknowledged: wire.acknowledged,
            timestamp: wire.timestamp,
            device_id: wire.device_id,
        }
    }

    #[must_use]
    pub fn to_wire(&self) -> AlertWire {
        AlertWire {
            alert_type: self.alert_type.as_token().to_string(),
            acknowledged: self.acknowledged,
            timestamp: self.timestamp,
            device_id: self.device_id.clone(),
        }
    }
}

/// The entire remote alert collection at one instant. Not a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertSnapshot {
    records: BTreeMap<AlertId, AlertRecord>,
}

impl AlertSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from wire entries keyed by store key.
    ///
    /// Entries under a blank key are dropped.
    pub fn from_wire(entries: impl IntoIterator<Item = (String, AlertWire)>) -> Self {
        let mut snapshot = Self::new();
        for (key, wire) in entries {
            match AlertId::parse(&key) {
                Some(id) => snapshot.insert(AlertRecord::from_wire(id, wire)),
                None => tracing::warn!("dropping alert stored under a blank key"),
            }
        }
        snapshot
    }

    /// Decode a JSON collection payload.
    ///
    /// `null` is an empty collection. Entries that cannot be decoded are
    /// dropped individually; only a payload that is not an object fails.
    pub fn from_json(payload: &str) -> crate::Result<Self> {
        let raw: Option<BTreeMap<String, serde_json::Value>> = serde_json::from_str(payload)?;
        let entries = raw.unwrap_or_default().into_iter().filter_map(|(key, value)| {
            match serde_json::from_value::<AlertWire>(value) {
                Ok(wire) => Some((key, wire)),
                Err(error) => {
                    tracing::warn!(key = %key, "dropping undecodable alert entry: {}", error);
                    None
                }
            }
        });
        Ok(Self::from_wire(entries))
    }

    /// Wire representation keyed by id
    #[must_use]
    pub fn to_wire(&self) -> BTreeMap<String, AlertWire> {
        self.records
            .iter()
            .map(|(id, record)| (id.to_string(), record.to_wire()))
            .collect()
    }

    pub fn insert(&mut self, record: AlertRecord) {
        self.records.insert(record.id.clone(), record);
    }

    #[must_use]
    pub fn get(&self, id: &AlertId) -> Option<&AlertRecord> {
        self.records.get(id)
    }

    /// Records in ascending id order
    pub fn records(&self) -> impl Iterator<Item = &AlertRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<AlertRecord> for AlertSnapshot {
    fn from_iter<I: IntoIterator<Item = AlertRecord>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for record in iter {
            snapshot.insert(record);
        }
        snapshot
    }
}

/// Alert report accepted by the ingestion gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    #[serde(rename = "type", default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
}

impl NewAlert {
    pub fn new(alert_type: impl Into<String>) -> Self {
        Self {
            alert_type: Some(alert_type.into()),
            device_id: None,
        }
    }

    #[must_use]
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Turn the report into the record a store should create.
    ///
    /// Fails when the type is missing or blank. The device id falls back to
    /// `default_device_id`.
    pub fn into_wire(self, now_ms: i64, default_device_id: &str) -> crate::Result<AlertWire> {
        let alert_type = crate::util::normalize_text_option(self.alert_type)
            .ok_or_else(|| crate::Error::InvalidInput("Missing alert type".to_string()))?;
        let device_id = crate::util::normalize_text_option(self.device_id)
            .unwrap_or_else(|| default_device_id.to_string());

        Ok(AlertWire {
            alert_type,
            acknowledged: false,
            timestamp: now_ms,
            device_id: Some(device_id),
        })
    }
}
