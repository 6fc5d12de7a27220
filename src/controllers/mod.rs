//! Defines controller functions that correspond to individual routes

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

pub mod car;
pub mod destination;
pub mod extra;
pub mod reservation;

/// Check if the webserver is functional
pub(crate) async fn healthcheck() -> (StatusCode, Json<Value>) {
	(StatusCode::OK, Json(json!({ "status": "ok" })))
}
