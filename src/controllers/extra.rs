use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::error::Error;
use crate::models::Extra;
use crate::schemas::extra::{
	CreateExtraRequest,
	ExtraResponse,
	UpdateExtraRequest,
};
use crate::store::Store;

#[instrument(skip(store))]
pub async fn get_extras(
	State(store): State<Store>,
) -> Result<impl IntoResponse, Error> {
	let extras: Vec<ExtraResponse> =
		Extra::all(&store).into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(extras)))
}

#[instrument(skip(store))]
pub async fn create_extra(
	State(store): State<Store>,
	Json(request): Json<CreateExtraRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let extra = request.to_insertable().insert(&store);
	let response = ExtraResponse::from(extra);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(store))]
pub async fn update_extra(
	State(store): State<Store>,
	Path(extra_id): Path<i32>,
	Json(request): Json<UpdateExtraRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let extra = request.to_update().apply_to(extra_id, &store)?;
	let response = ExtraResponse::from(extra);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(store))]
pub async fn delete_extra(
	State(store): State<Store>,
	Path(extra_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	Extra::delete_by_id(extra_id, &store)?;

	Ok(StatusCode::NO_CONTENT)
}
