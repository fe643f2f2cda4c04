//! caretaker-core - Core library for Caretaker
//!
//! This crate contains the alert models, the synchronization engine that turns
//! remote alert snapshots into caretaker-facing views and surfaces, and the
//! durable alert store shared by the gateway and the caretaker host.

pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;
pub mod sync;
pub mod util;

pub use error::{Error, FeedError, NotifierError, RemoteWriteError, Result};
pub use models::{AlertId, AlertRecord, AlertSnapshot, AlertType};
