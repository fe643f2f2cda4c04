//! Alert repository implementation

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::models::{AlertId, AlertRecord, AlertSnapshot, AlertWire, NewAlert};

/// Trait for durable alert storage operations
pub trait AlertRepository {
    /// Create a new alert with a store-assigned id
    fn create(&self, alert: NewAlert, now_ms: i64, default_device_id: &str)
        -> Result<AlertRecord>;

    /// Get an alert by ID
    fn get(&self, id: &AlertId) -> Result<Option<AlertRecord>>;

    /// The whole collection
    fn snapshot(&self) -> Result<AlertSnapshot>;

    /// Set the acknowledged flag. Overwrites; calling it twice is harmless.
    fn set_acknowledged(&self, id: &AlertId) -> Result<()>;

    /// Number of stored alerts
    fn count(&self) -> Result<usize>;
}

/// `SQLite` implementation of `AlertRepository`
pub struct SqliteAlertRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteAlertRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse the stored key and wire shape from a database row
    fn parse_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, AlertWire)> {
        Ok((
            row.get(0)?,
            AlertWire {
                alert_type: row.get(1)?,
                acknowledged: row.get::<_, i32>(2)? != 0,
                timestamp: row.get(3)?,
                device_id: row.get(4)?,
            },
        ))
    }
}

impl AlertRepository for SqliteAlertRepository<'_> {
    fn create(
        &self,
        alert: NewAlert,
        now_ms: i64,
        default_device_id: &str,
    ) -> Result<AlertRecord> {
        let wire = alert.into_wire(now_ms, default_device_id)?;
        let record = AlertRecord::from_wire(AlertId::generate(), wire);

        self.conn.execute(
            "INSERT INTO alerts (id, type, acknowledged, timestamp, device_id) VALUES (?, ?, ?, ?, ?)",
            params![
                record.id.as_str(),
                record.alert_type.as_token(),
                i32::from(record.acknowledged),
                record.timestamp,
                record.device_id,
            ],
        )?;

        Ok(record)
    }

    fn get(&self, id: &AlertId) -> Result<Option<AlertRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, type, acknowledged, timestamp, device_id FROM alerts WHERE id = ?",
                params![id.as_str()],
                Self::parse_row,
            )
            .optional()?;

        Ok(row.map(|(_, wire)| AlertRecord::from_wire(id.clone(), wire)))
    }

    fn snapshot(&self) -> Result<AlertSnapshot> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, type, acknowledged, timestamp, device_id FROM alerts")?;
        let rows = stmt
            .query_map([], Self::parse_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(AlertSnapshot::from_wire(rows))
    }

    fn set_acknowledged(&self, id: &AlertId) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE alerts SET acknowledged = 1 WHERE id = ?",
            params![id.as_str()],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM alerts", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| Error::Database("negative alert count".to_string()))
    }
}
