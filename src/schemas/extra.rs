use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{Extra, NewExtra, UpdateExtra};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraResponse {
	pub id:    i32,
	pub name:  String,
	pub price: Decimal,
}

impl From<Extra> for ExtraResponse {
	fn from(value: Extra) -> Self {
		Self { id: value.id, name: value.name, price: value.price }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExtraRequest {
	#[validate(length(
		min = 1,
		max = 200,
		message = "extra name must be between 1 and 200 characters long",
		code = "extra-name-length"
	))]
	pub name:  String,
	pub price: Decimal,
}

impl CreateExtraRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewExtra {
		NewExtra { name: self.name, price: self.price }
	}
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExtraRequest {
	#[validate(length(
		min = 1,
		max = 200,
		message = "extra name must be between 1 and 200 characters long",
		code = "extra-name-length"
	))]
	pub name:  Option<String>,
	pub price: Option<Decimal>,
}

impl UpdateExtraRequest {
	#[must_use]
	pub fn to_update(self) -> UpdateExtra {
		UpdateExtra { name: self.name, price: self.price }
	}
}
