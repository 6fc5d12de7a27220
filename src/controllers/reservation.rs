use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::Config;
use crate::error::Error;
use crate::mailer::Mailer;
use crate::models::{Car, Reservation, ReservationFilter};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::reservation::{
	CreateReservationRequest,
	ReservationResponse,
	UpdateReservationRequest,
};
use crate::store::Store;

#[instrument(skip(store))]
pub async fn get_reservations(
	State(store): State<Store>,
	Query(filter): Query<ReservationFilter>,
	Query(p_opts): Query<PaginationOptions>,
) -> Result<impl IntoResponse, Error> {
	let (total, reservations) =
		Reservation::page(filter, p_opts.limit(), p_opts.offset(), &store);
	let reservations: Vec<ReservationResponse> =
		reservations.into_iter().map(Into::into).collect();

	let response = p_opts.paginate(total, reservations);

	Ok((StatusCode::OK, Json(response)))
}

/// Create a new reservation and notify the business mailbox
///
/// The mail is best-effort; a full queue or a broken SMTP link never fails
/// the booking itself.
#[instrument(skip(store, mailer))]
pub async fn create_reservation(
	State(config): State<Config>,
	State(store): State<Store>,
	State(mailer): State<Mailer>,
	Json(request): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let reservation = request
		.to_insertable()
		.insert(&config.default_phone_country, &store)?;

	let notified = Car::get_by_id(reservation.car_id, &store).and_then(|car| {
		mailer.send_reservation_received(
			&config.business_email,
			&reservation,
			&car.name,
		)
	});

	if let Err(err) = notified {
		warn!("could not send reservation received mail -- {err:?}");
	}

	let response = ReservationResponse::from(reservation);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(store))]
pub async fn get_reservation(
	State(store): State<Store>,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let reservation = Reservation::get_by_id(r_id, &store)?;
	let response = ReservationResponse::from(reservation);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn update_reservation(
	State(config): State<Config>,
	State(store): State<Store>,
	Path(r_id): Path<i32>,
	Json(request): Json<UpdateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let reservation = request
		.to_update()
		.apply_to(r_id, &config.default_phone_country, &store)?;
	let response = ReservationResponse::from(reservation);

	Ok((StatusCode::OK, Json(response)))
}

/// Approve a reservation and notify the customer
///
/// The customer mail goes out only when this call actually flips the status
/// to approved, and only if the reservation carries an email address.
/// Re-approving is a quiet no-op.
#[instrument(skip(store, mailer))]
pub async fn approve_reservation(
	State(store): State<Store>,
	State(mailer): State<Mailer>,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let (reservation, newly_approved) = Reservation::approve(r_id, &store)?;

	if newly_approved && reservation.email.is_some() {
		let notified = Car::get_by_id(reservation.car_id, &store)
			.and_then(|car| {
				mailer.send_reservation_approved(&reservation, &car.name)
			});

		if let Err(err) = notified {
			warn!("could not send reservation approved mail -- {err:?}");
		}
	}

	let response = ReservationResponse::from(reservation);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn delete_reservation(
	State(store): State<Store>,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	Reservation::delete_by_id(r_id, &store)?;

	Ok(StatusCode::NO_CONTENT)
}
