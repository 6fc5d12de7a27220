//! # Carbook backend library

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;

use crate::mailer::Mailer;
use crate::store::Store;

mod config;

pub mod controllers;
pub mod error;
pub mod mailer;
pub mod models;
pub mod phone;
pub mod pricing;
pub mod routes;
pub mod schemas;
pub mod store;

pub use config::*;

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config: Config,
	pub store:  Store,
	pub mailer: Mailer,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for Store {
	fn from_ref(input: &AppState) -> Self { input.store.clone() }
}

impl FromRef<AppState> for Mailer {
	fn from_ref(input: &AppState) -> Self { input.mailer.clone() }
}
