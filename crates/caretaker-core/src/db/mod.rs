//! Durable alert storage

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{AlertRepository, SqliteAlertRepository};
