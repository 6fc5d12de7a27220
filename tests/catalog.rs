use axum::http::StatusCode;
use carbook::schemas::car::CarDetailResponse;
use carbook::schemas::destination::DestinationResponse;
use carbook::schemas::extra::ExtraResponse;
use carbook::schemas::reservation::ReservationResponse;
use rust_decimal::Decimal;
use serde_json::json;

mod common;

use common::TestEnv;

#[tokio::test(flavor = "multi_thread")]
async fn create_and_list_extras() {
	let env = TestEnv::new();

	for (name, price) in [("Child seat", "2.50"), ("GPS", "5")] {
		let response = env
			.app
			.post("/extras")
			.json(&json!({ "name": name, "price": price }))
			.await;

		assert_eq!(response.status_code(), StatusCode::CREATED);
	}

	let extras = env.app.get("/extras").await.json::<Vec<ExtraResponse>>();

	assert_eq!(extras.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_extra_blank_name() {
	let env = TestEnv::new();

	let response = env
		.app
		.post("/extras")
		.json(&json!({ "name": "", "price": "5" }))
		.await;

	let body = response.text();

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(
		body.contains("extra name must be between 1 and 200 characters long"),
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_extra() {
	let env = TestEnv::new();

	let extra = env
		.app
		.post("/extras")
		.json(&json!({ "name": "GPS", "price": "5" }))
		.await
		.json::<ExtraResponse>();

	let response = env
		.app
		.patch(&format!("/extras/{}", extra.id))
		.json(&json!({ "price": "7.50" }))
		.await;

	let body = response.json::<ExtraResponse>();

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(body.name, "GPS");
	assert_eq!(body.price, Decimal::new(750, 2));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_extra() {
	let env = TestEnv::new();

	let extra = env
		.app
		.post("/extras")
		.json(&json!({ "name": "GPS", "price": "5" }))
		.await
		.json::<ExtraResponse>();

	let response = env.app.delete(&format!("/extras/{}", extra.id)).await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let extras = env.app.get("/extras").await.json::<Vec<ExtraResponse>>();

	assert!(extras.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_extra_keeps_existing_snapshots() {
	let env = TestEnv::new();

	let car = env
		.app
		.post("/cars")
		.json(&json!({ "name": "Fiat 500", "price": "40" }))
		.await
		.json::<CarDetailResponse>();

	let extra = env
		.app
		.post("/extras")
		.json(&json!({ "name": "GPS", "price": "5" }))
		.await
		.json::<ExtraResponse>();

	let reservation = env
		.app
		.post("/reservations")
		.json(&json!({
			"carId": car.id,
			"pickupAt": "2026-07-01T10:00:00",
			"returnAt": "2026-07-03T10:00:00",
			"extras": [{ "id": extra.id }],
		}))
		.await
		.json::<ReservationResponse>();

	env.app.delete(&format!("/extras/{}", extra.id)).await;

	let body = env
		.app
		.get(&format!("/reservations/{}", reservation.id))
		.await
		.json::<ReservationResponse>();

	assert_eq!(body.extras.len(), 1);
	assert_eq!(body.extras[0].name, "GPS");
	assert_eq!(body.total_price, Some(Decimal::from(90)));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_list_destinations() {
	let env = TestEnv::new();

	let response = env
		.app
		.post("/destinations")
		.json(&json!({ "name": "Tirana Airport" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let destinations = env
		.app
		.get("/destinations")
		.await
		.json::<Vec<DestinationResponse>>();

	assert_eq!(destinations.len(), 1);
	assert_eq!(destinations[0].name, "Tirana Airport");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_destination() {
	let env = TestEnv::new();

	let destination = env
		.app
		.post("/destinations")
		.json(&json!({ "name": "Tirana Airport" }))
		.await
		.json::<DestinationResponse>();

	let response =
		env.app.delete(&format!("/destinations/{}", destination.id)).await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let missing = env.app.delete("/destinations/42").await;

	assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_destination_unlinks_reservations() {
	let env = TestEnv::new();

	let car = env
		.app
		.post("/cars")
		.json(&json!({ "name": "Fiat 500", "price": "40" }))
		.await
		.json::<CarDetailResponse>();

	let destination = env
		.app
		.post("/destinations")
		.json(&json!({ "name": "Tirana Airport" }))
		.await
		.json::<DestinationResponse>();

	let reservation = env
		.app
		.post("/reservations")
		.json(&json!({
			"carId": car.id,
			"destinationId": destination.id,
			"pickupAt": "2026-07-01T10:00:00",
			"returnAt": "2026-07-03T10:00:00",
		}))
		.await
		.json::<ReservationResponse>();

	assert_eq!(reservation.destination_id, Some(destination.id));

	env.app.delete(&format!("/destinations/{}", destination.id)).await;

	let body = env
		.app
		.get(&format!("/reservations/{}", reservation.id))
		.await
		.json::<ReservationResponse>();

	assert_eq!(body.destination_id, None);

	// An edit that never mentions the destination still goes through
	let response = env
		.app
		.patch(&format!("/reservations/{}", reservation.id))
		.json(&json!({ "returnAt": "2026-07-04T10:00:00" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn healthcheck() {
	let env = TestEnv::new();

	let response = env.app.get("/healthcheck").await;

	assert_eq!(response.status_code(), StatusCode::OK);
}
