use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::error::Error;
use crate::models::{Car, RatePeriod, Reservation};
use crate::schemas::car::{
	CarDetailResponse,
	CarResponse,
	CreateCarRequest,
	UpdateCarRequest,
};
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::rate_period::{
	CreateRatePeriodRequest,
	RatePeriodResponse,
	UpdateRatePeriodRequest,
};
use crate::schemas::reservation::{AvailabilityQuery, AvailabilityResponse};
use crate::store::Store;

#[instrument(skip(store))]
pub async fn get_cars(
	State(store): State<Store>,
	Query(p_opts): Query<PaginationOptions>,
) -> Result<impl IntoResponse, Error> {
	let (total, cars) = Car::page(p_opts.limit(), p_opts.offset(), &store);
	let cars: Vec<CarResponse> = cars.into_iter().map(Into::into).collect();

	let response = p_opts.paginate(total, cars);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn create_car(
	State(store): State<Store>,
	Json(request): Json<CreateCarRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let car = request.to_insertable().insert(&store);
	let response = CarDetailResponse::from((car, Vec::new()));

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(store))]
pub async fn get_car(
	State(store): State<Store>,
	Path(car_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let car = Car::get_by_id(car_id, &store)?;
	let periods = RatePeriod::for_car(car_id, &store)?;
	let response = CarDetailResponse::from((car, periods));

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn update_car(
	State(store): State<Store>,
	Path(car_id): Path<i32>,
	Json(request): Json<UpdateCarRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let car = request.to_update().apply_to(car_id, &store)?;
	let periods = RatePeriod::for_car(car_id, &store)?;
	let response = CarDetailResponse::from((car, periods));

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn delete_car(
	State(store): State<Store>,
	Path(car_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	Car::delete_by_id(car_id, &store)?;

	Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(store))]
pub async fn get_rate_periods(
	State(store): State<Store>,
	Path(car_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let periods = RatePeriod::for_car(car_id, &store)?;
	let response: Vec<RatePeriodResponse> =
		periods.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn create_rate_period(
	State(store): State<Store>,
	Path(car_id): Path<i32>,
	Json(request): Json<CreateRatePeriodRequest>,
) -> Result<impl IntoResponse, Error> {
	let period = request.to_insertable().insert(car_id, &store)?;
	let response = RatePeriodResponse::from(period);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(store))]
pub async fn update_rate_period(
	State(store): State<Store>,
	Path((car_id, period_id)): Path<(i32, i32)>,
	Json(request): Json<UpdateRatePeriodRequest>,
) -> Result<impl IntoResponse, Error> {
	let period = request.to_update().apply_to(car_id, period_id, &store)?;
	let response = RatePeriodResponse::from(period);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn delete_rate_period(
	State(store): State<Store>,
	Path((car_id, period_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
	RatePeriod::delete_by_id(car_id, period_id, &store)?;

	Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(store))]
pub async fn get_availability(
	State(store): State<Store>,
	Path(car_id): Path<i32>,
	Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, Error> {
	let available = Reservation::car_is_available(
		car_id,
		query.pickup,
		query.return_at,
		&store,
	)?;

	Ok((StatusCode::OK, Json(AvailabilityResponse { available })))
}
