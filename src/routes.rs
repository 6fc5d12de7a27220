use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::car::{
	create_car,
	create_rate_period,
	delete_car,
	delete_rate_period,
	get_availability,
	get_car,
	get_cars,
	get_rate_periods,
	update_car,
	update_rate_period,
};
use crate::controllers::destination::{
	create_destination,
	delete_destination,
	get_destinations,
};
use crate::controllers::extra::{
	create_extra,
	delete_extra,
	get_extras,
	update_extra,
};
use crate::controllers::healthcheck;
use crate::controllers::reservation::{
	approve_reservation,
	create_reservation,
	delete_reservation,
	get_reservation,
	get_reservations,
	update_reservation,
};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/cars", car_routes())
		.nest("/extras", extra_routes())
		.nest("/destinations", destination_routes())
		.nest("/reservations", reservation_routes());

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

/// Car catalog routes, with seasonal rates and availability nested per car
fn car_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_cars).post(create_car))
		.route("/{id}", get(get_car).patch(update_car).delete(delete_car))
		.route("/{id}/availability", get(get_availability))
		.route(
			"/{id}/rate-periods",
			get(get_rate_periods).post(create_rate_period),
		)
		.route(
			"/{id}/rate-periods/{period_id}",
			patch(update_rate_period).delete(delete_rate_period),
		)
}

/// Extra catalog routes
fn extra_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_extras).post(create_extra))
		.route("/{id}", patch(update_extra).delete(delete_extra))
}

/// Destination routes
fn destination_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_destinations).post(create_destination))
		.route("/{id}", delete(delete_destination))
}

/// Reservation routes
fn reservation_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_reservations).post(create_reservation))
		.route(
			"/{id}",
			get(get_reservation)
				.patch(update_reservation)
				.delete(delete_reservation),
		)
		.route("/{id}/approve", post(approve_reservation))
}
