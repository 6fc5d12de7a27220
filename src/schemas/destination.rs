use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{Destination, NewDestination};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationResponse {
	pub id:   i32,
	pub name: String,
}

impl From<Destination> for DestinationResponse {
	fn from(value: Destination) -> Self {
		Self { id: value.id, name: value.name }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDestinationRequest {
	#[validate(length(
		min = 1,
		max = 200,
		message = "destination name must be between 1 and 200 characters long",
		code = "destination-name-length"
	))]
	pub name: String,
}

impl CreateDestinationRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewDestination {
		NewDestination { name: self.name }
	}
}
