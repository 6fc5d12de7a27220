use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

use crate::models::{
	ExtraSnapshot,
	NewReservation,
	Reservation,
	ReservationStatus,
	UpdateReservation,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraSnapshotResponse {
	pub id:    i32,
	pub name:  String,
	pub price: Decimal,
}

impl From<ExtraSnapshot> for ExtraSnapshotResponse {
	fn from(value: ExtraSnapshot) -> Self {
		Self { id: value.id, name: value.name, price: value.price }
	}
}

#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
	pub id:              i32,
	pub car_id:          i32,
	pub destination_id:  Option<i32>,
	pub customer_name:   Option<String>,
	pub phone_number:    Option<String>,
	pub email:           Option<String>,
	pub pickup_at:       Option<NaiveDateTime>,
	pub return_at:       Option<NaiveDateTime>,
	pub status:          ReservationStatus,
	pub extras:          Vec<ExtraSnapshotResponse>,
	pub total_days:      Option<i64>,
	pub car_price_total: Option<Decimal>,
	pub total_price:     Option<Decimal>,
	pub created_at:      NaiveDateTime,
}

impl From<Reservation> for ReservationResponse {
	fn from(value: Reservation) -> Self {
		Self {
			id:              value.id,
			car_id:          value.car_id,
			destination_id:  value.destination_id,
			customer_name:   value.customer_name,
			phone_number:    value.phone_number,
			email:           value.email,
			pickup_at:       value.pickup_at,
			return_at:       value.return_at,
			status:          value.status,
			extras:          value
				.extras
				.into_iter()
				.map(ExtraSnapshotResponse::from)
				.collect(),
			total_days:      value.total_days,
			car_price_total: value.car_price_total,
			total_price:     value.total_price,
			created_at:      value.created_at,
		}
	}
}

/// A reference to a catalog extra by id
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ExtraRef {
	pub id: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
	pub car_id:         i32,
	pub destination_id: Option<i32>,
	#[validate(length(
		min = 1,
		max = 200,
		message = "customer name must be between 1 and 200 characters long",
		code = "customer-name-length"
	))]
	pub customer_name:  Option<String>,
	pub phone_number:   Option<String>,
	#[validate(email(
		message = "email must be a valid email address",
		code = "email-invalid"
	))]
	pub email:          Option<String>,
	pub pickup_at:      Option<NaiveDateTime>,
	pub return_at:      Option<NaiveDateTime>,
	#[serde(default)]
	pub extras:         Vec<ExtraRef>,
}

impl CreateReservationRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewReservation {
		NewReservation {
			car_id:         self.car_id,
			destination_id: self.destination_id,
			customer_name:  self.customer_name,
			phone_number:   self.phone_number,
			email:          self.email,
			pickup_at:      self.pickup_at,
			return_at:      self.return_at,
			extra_ids:      self.extras.into_iter().map(|e| e.id).collect(),
		}
	}
}

/// Changes to an existing reservation
///
/// Status is deliberately absent; the only way to change it is the approval
/// endpoint.
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
	pub car_id:         Option<i32>,
	pub destination_id: Option<i32>,
	#[validate(length(
		min = 1,
		max = 200,
		message = "customer name must be between 1 and 200 characters long",
		code = "customer-name-length"
	))]
	pub customer_name:  Option<String>,
	pub phone_number:   Option<String>,
	#[validate(email(
		message = "email must be a valid email address",
		code = "email-invalid"
	))]
	pub email:          Option<String>,
	pub pickup_at:      Option<NaiveDateTime>,
	pub return_at:      Option<NaiveDateTime>,
	pub extras:         Option<Vec<ExtraRef>>,
}

impl UpdateReservationRequest {
	#[must_use]
	pub fn to_update(self) -> UpdateReservation {
		UpdateReservation {
			car_id:         self.car_id,
			destination_id: self.destination_id,
			customer_name:  self.customer_name,
			phone_number:   self.phone_number,
			email:          self.email,
			pickup_at:      self.pickup_at,
			return_at:      self.return_at,
			extra_ids:      self
				.extras
				.map(|extras| extras.into_iter().map(|e| e.id).collect()),
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct AvailabilityQuery {
	pub pickup:    NaiveDateTime,
	#[serde(rename = "return")]
	pub return_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct AvailabilityResponse {
	pub available: bool,
}
