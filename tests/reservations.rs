use axum::http::StatusCode;
use carbook::models::ReservationStatus;
use carbook::schemas::car::CarDetailResponse;
use carbook::schemas::extra::ExtraResponse;
use carbook::schemas::pagination::PaginationResponse;
use carbook::schemas::reservation::ReservationResponse;
use rust_decimal::Decimal;
use serde_json::json;

mod common;

use common::TestEnv;

async fn create_car(env: &TestEnv, price: Option<&str>) -> i32 {
	env.app
		.post("/cars")
		.json(&json!({ "name": "Skoda Fabia", "price": price }))
		.await
		.json::<CarDetailResponse>()
		.id
}

async fn create_extra(env: &TestEnv, name: &str, price: &str) -> i32 {
	env.app
		.post("/extras")
		.json(&json!({ "name": name, "price": price }))
		.await
		.json::<ExtraResponse>()
		.id
}

async fn count_reservations(env: &TestEnv) -> usize {
	env.app
		.get("/reservations")
		.await
		.json::<PaginationResponse<Vec<ReservationResponse>>>()
		.total
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_starts_pending() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;

	// A status sent by the client is ignored; new bookings always await
	// approval
	let response = env
		.expect_mail_to(&["bookings@carbook.local"], async || {
			env.app
				.post("/reservations")
				.json(&json!({
					"carId": car_id,
					"customerName": "Ana Hoxha",
					"email": "ana@example.com",
					"pickupAt": "2026-07-01T10:00:00",
					"returnAt": "2026-07-03T10:00:00",
					"status": "approved",
				}))
				.await
		})
		.await;

	let body = response.json::<ReservationResponse>();

	assert_eq!(response.status_code(), StatusCode::CREATED);
	assert_eq!(body.status, ReservationStatus::Pending);
	assert_eq!(body.customer_name, Some("Ana Hoxha".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn the_business_mail_lists_the_request_details() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;

	let response = env
		.expect_mail_to(&["bookings@carbook.local"], async || {
			env.app
				.post("/reservations")
				.json(&json!({
					"carId": car_id,
					"customerName": "Besnik Hoxha",
					"phoneNumber": "069 222 3344",
					"email": "besnik@example.com",
					"pickupAt": "2026-07-01T10:00:00",
					"returnAt": "2026-07-03T10:00:00",
				}))
				.await
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let mail = env.last_mail();

	assert!(mail.contains("New Car Reservation Request"));
	assert!(mail.contains("New reservation request received"));
	assert!(mail.contains("Customer: Besnik Hoxha"));
	assert!(mail.contains("Phone: +355692223344"));
	assert!(mail.contains("Car: Skoda Fabia"));
	assert!(mail.contains("Pickup: 2026-07-01 10:00"));
	assert!(mail.contains("Status: Pending"));
}

#[tokio::test(flavor = "multi_thread")]
async fn reservation_totals_follow_the_daily_rate() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;
	let extra_id = create_extra(&env, "Child seat", "2.50").await;

	env.app
		.post(&format!("/cars/{car_id}/rate-periods"))
		.json(&json!({
			"startDate": "2026-07-01",
			"endDate": "2026-08-01",
			"pricePerDay": "80",
		}))
		.await;

	// June 29 and 30 fall back to the base price, July 1 hits the summer
	// rate, and the return day itself is never charged
	let response = env
		.app
		.post("/reservations")
		.json(&json!({
			"carId": car_id,
			"pickupAt": "2026-06-29T10:00:00",
			"returnAt": "2026-07-02T10:00:00",
			"extras": [{ "id": extra_id }],
		}))
		.await;

	let body = response.json::<ReservationResponse>();

	assert_eq!(response.status_code(), StatusCode::CREATED);
	assert_eq!(body.total_days, Some(3));
	assert_eq!(body.car_price_total, Some(Decimal::from(180)));
	assert_eq!(body.total_price, Some(Decimal::new(18750, 2)));
}

#[tokio::test(flavor = "multi_thread")]
async fn extras_keep_their_booking_time_price() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;
	let extra_id = create_extra(&env, "Child seat", "2.50").await;

	let reservation = env
		.app
		.post("/reservations")
		.json(&json!({
			"carId": car_id,
			"pickupAt": "2026-07-01T10:00:00",
			"returnAt": "2026-07-03T10:00:00",
			"extras": [{ "id": extra_id }],
		}))
		.await
		.json::<ReservationResponse>();

	env.app
		.patch(&format!("/extras/{extra_id}"))
		.json(&json!({ "price": "99" }))
		.await;

	let response =
		env.app.get(&format!("/reservations/{}", reservation.id)).await;

	let body = response.json::<ReservationResponse>();

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(body.extras[0].price, Decimal::new(250, 2));
	assert_eq!(body.total_price, Some(Decimal::new(10500, 2)));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_unknown_extra() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;

	let response = env
		.expect_no_mail(async || {
			env.app
				.post("/reservations")
				.json(&json!({
					"carId": car_id,
					"pickupAt": "2026-07-01T10:00:00",
					"returnAt": "2026-07-03T10:00:00",
					"extras": [{ "id": 42 }],
				}))
				.await
		})
		.await;

	let body = response.text();

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(body.contains("unknown extra"));
	assert_eq!(count_reservations(&env).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_invalid_phone() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;

	let response = env
		.expect_no_mail(async || {
			env.app
				.post("/reservations")
				.json(&json!({
					"carId": car_id,
					"phoneNumber": "banana",
					"pickupAt": "2026-07-01T10:00:00",
					"returnAt": "2026-07-03T10:00:00",
				}))
				.await
		})
		.await;

	let body = response.text();

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(body.contains("invalid phone number"));
	assert_eq!(count_reservations(&env).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn phone_numbers_are_canonicalized() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;

	let response = env
		.app
		.post("/reservations")
		.json(&json!({
			"carId": car_id,
			"phoneNumber": "069 222 3344",
			"pickupAt": "2026-07-01T10:00:00",
			"returnAt": "2026-07-03T10:00:00",
		}))
		.await;

	let body = response.json::<ReservationResponse>();

	assert_eq!(response.status_code(), StatusCode::CREATED);
	assert_eq!(body.phone_number, Some("+355692223344".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_without_any_rate() {
	let env = TestEnv::new();
	let car_id = create_car(&env, None).await;

	// A car without a base price and no covering period cannot be priced,
	// and an unpriceable booking must never be saved as zero
	let response = env
		.app
		.post("/reservations")
		.json(&json!({
			"carId": car_id,
			"pickupAt": "2026-07-01T10:00:00",
			"returnAt": "2026-07-03T10:00:00",
		}))
		.await;

	let body = response.text();

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(body.contains("no price is defined"));
	assert_eq!(count_reservations(&env).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_without_dates() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;

	let response = env
		.app
		.post("/reservations")
		.json(&json!({ "carId": car_id, "customerName": "Ana Hoxha" }))
		.await;

	let body = response.json::<ReservationResponse>();

	assert_eq!(response.status_code(), StatusCode::CREATED);
	assert_eq!(body.status, ReservationStatus::Pending);
	assert_eq!(body.total_days, None);
	assert_eq!(body.total_price, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_inverted_window() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;

	let response = env
		.app
		.post("/reservations")
		.json(&json!({
			"carId": car_id,
			"pickupAt": "2026-07-03T10:00:00",
			"returnAt": "2026-07-01T10:00:00",
		}))
		.await;

	let body = response.text();

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(body.contains("the return date must be after the pickup date"));
}

#[tokio::test(flavor = "multi_thread")]
async fn pending_reservations_may_overlap() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;

	for _ in 0..2 {
		let response = env
			.app
			.post("/reservations")
			.json(&json!({
				"carId": car_id,
				"pickupAt": "2026-07-01T10:00:00",
				"returnAt": "2026-07-03T10:00:00",
			}))
			.await;

		assert_eq!(response.status_code(), StatusCode::CREATED);
	}

	assert_eq!(count_reservations(&env).await, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_reservation_reprices() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;

	let reservation = env
		.app
		.post("/reservations")
		.json(&json!({
			"carId": car_id,
			"pickupAt": "2026-07-01T10:00:00",
			"returnAt": "2026-07-03T10:00:00",
		}))
		.await
		.json::<ReservationResponse>();

	assert_eq!(reservation.total_days, Some(2));

	let response = env
		.app
		.patch(&format!("/reservations/{}", reservation.id))
		.json(&json!({ "returnAt": "2026-07-05T10:00:00" }))
		.await;

	let body = response.json::<ReservationResponse>();

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(body.total_days, Some(4));
	assert_eq!(body.car_price_total, Some(Decimal::from(200)));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_unknown_destination() {
	let env = TestEnv::new();
	let car_id = create_car(&env, Some("50")).await;

	let response = env
		.app
		.post("/reservations")
		.json(&json!({
			"carId": car_id,
			"destinationId": 42,
			"pickupAt": "2026-07-01T10:00:00",
			"returnAt": "2026-07-03T10:00:00",
		}))
		.await;

	let body = response.text();

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(body.contains("destination 42 does not exist"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_reservations_filtered() {
	let env = TestEnv::new();
	let first_car = create_car(&env, Some("50")).await;
	let second_car = create_car(&env, Some("60")).await;

	for car_id in [first_car, second_car] {
		env.app
			.post("/reservations")
			.json(&json!({
				"carId": car_id,
				"pickupAt": "2026-07-01T10:00:00",
				"returnAt": "2026-07-03T10:00:00",
			}))
			.await;
	}

	let by_car = env
		.app
		.get("/reservations")
		.add_query_param("car", first_car)
		.await
		.json::<PaginationResponse<Vec<ReservationResponse>>>();

	assert_eq!(by_car.total, 1);
	assert_eq!(by_car.data[0].car_id, first_car);

	env.app
		.post(&format!("/reservations/{}/approve", by_car.data[0].id))
		.await;

	let approved = env
		.app
		.get("/reservations")
		.add_query_param("status", "approved")
		.await
		.json::<PaginationResponse<Vec<ReservationResponse>>>();

	assert_eq!(approved.total, 1);
	assert_eq!(approved.data[0].status, ReservationStatus::Approved);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_missing_reservation() {
	let env = TestEnv::new();

	let response = env.app.get("/reservations/42").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
