use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::error::Error;
use crate::models::Destination;
use crate::schemas::destination::{
	CreateDestinationRequest,
	DestinationResponse,
};
use crate::store::Store;

#[instrument(skip(store))]
pub async fn get_destinations(
	State(store): State<Store>,
) -> Result<impl IntoResponse, Error> {
	let destinations: Vec<DestinationResponse> =
		Destination::all(&store).into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(destinations)))
}

#[instrument(skip(store))]
pub async fn create_destination(
	State(store): State<Store>,
	Json(request): Json<CreateDestinationRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let destination = request.to_insertable().insert(&store);
	let response = DestinationResponse::from(destination);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(store))]
pub async fn delete_destination(
	State(store): State<Store>,
	Path(dest_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	Destination::delete_by_id(dest_id, &store)?;

	Ok(StatusCode::NO_CONTENT)
}
