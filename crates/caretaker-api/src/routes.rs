use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use caretaker_core::db::{AlertRepository, Database, SqliteAlertRepository};
use caretaker_core::models::{AlertId, AlertWire, NewAlert};
use caretaker_core::util::unix_timestamp_millis_now;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db: Database) -> Self {
        Self {
            config,
            db: Arc::new(Mutex::new(db)),
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/alert", post(create_alert))
        .route("/alerts", get(list_alerts))
        .route("/alerts/{id}", get(get_alert))
        .route("/alerts/{id}/acknowledge", post(acknowledge_alert))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
    alerts: usize,
}

async fn healthz(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let db = state.db.lock().await;
    let alerts = SqliteAlertRepository::new(db.connection()).count()?;
    Ok(Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
        alerts,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedAlert {
    alert_key: String,
}

async fn create_alert(
    State(state): State<AppState>,
    Json(request): Json<NewAlert>,
) -> Result<Json<CreatedAlert>, AppError> {
    let db = state.db.lock().await;
    let record = SqliteAlertRepository::new(db.connection()).create(
        request,
        unix_timestamp_millis_now(),
        &state.config.default_device_id,
    )?;

    tracing::info!(
        alert_id = %record.id,
        device_id = record.device_id.as_deref().unwrap_or("unknown"),
        "Alert received: {}",
        record.alert_type
    );
    Ok(Json(CreatedAlert {
        alert_key: record.id.to_string(),
    }))
}

async fn list_alerts(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, AlertWire>>, AppError> {
    let db = state.db.lock().await;
    let snapshot = SqliteAlertRepository::new(db.connection()).snapshot()?;
    Ok(Json(snapshot.to_wire()))
}

async fn get_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AlertWire>, AppError> {
    let id = parse_alert_id(&id)?;
    let db = state.db.lock().await;
    let record = SqliteAlertRepository::new(db.connection())
        .get(&id)?
        .ok_or_else(|| AppError::NotFound(format!("alert {id}")))?;
    Ok(Json(record.to_wire()))
}

async fn acknowledge_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_alert_id(&id)?;
    let db = state.db.lock().await;
    SqliteAlertRepository::new(db.connection()).set_acknowledged(&id)?;
    tracing::info!(alert_id = %id, "Alert acknowledged");
    Ok(StatusCode::NO_CONTENT)
}

fn parse_alert_id(raw: &str) -> Result<AlertId, AppError> {
    AlertId::parse(raw).ok_or_else(|| AppError::bad_request("alert id must not be empty"))
}
