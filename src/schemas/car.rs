use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use validator_derive::Validate;

use crate::models::{Car, NewCar, RatePeriod, UpdateCar};
use crate::schemas::rate_period::RatePeriodResponse;

/// A car as it appears in the paginated list
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
	pub id:    i32,
	pub name:  String,
	pub price: Option<Decimal>,
}

impl From<Car> for CarResponse {
	fn from(value: Car) -> Self {
		Self { id: value.id, name: value.name, price: value.price }
	}
}

/// A single car with everything needed to price a booking against it
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDetailResponse {
	pub id:           i32,
	pub name:         String,
	pub detail:       Option<String>,
	pub price:        Option<Decimal>,
	pub seats:        Option<i32>,
	pub doors:        Option<i32>,
	pub transmission: Option<String>,
	pub fuel:         Option<String>,

	pub rate_periods: Vec<RatePeriodResponse>,
}

impl From<(Car, Vec<RatePeriod>)> for CarDetailResponse {
	fn from((car, periods): (Car, Vec<RatePeriod>)) -> Self {
		Self {
			id:           car.id,
			name:         car.name,
			detail:       car.detail,
			price:        car.price,
			seats:        car.seats,
			doors:        car.doors,
			transmission: car.transmission,
			fuel:         car.fuel,

			rate_periods: periods.into_iter().map(Into::into).collect(),
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
	#[validate(length(
		min = 1,
		max = 200,
		message = "car name must be between 1 and 200 characters long",
		code = "car-name-length"
	))]
	pub name:         String,
	pub detail:       Option<String>,
	pub price:        Option<Decimal>,
	pub seats:        Option<i32>,
	pub doors:        Option<i32>,
	pub transmission: Option<String>,
	pub fuel:         Option<String>,
}

impl CreateCarRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewCar {
		NewCar {
			name:         self.name,
			detail:       self.detail,
			price:        self.price,
			seats:        self.seats,
			doors:        self.doors,
			transmission: self.transmission,
			fuel:         self.fuel,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
	#[validate(length(
		min = 1,
		max = 200,
		message = "car name must be between 1 and 200 characters long",
		code = "car-name-length"
	))]
	pub name:         Option<String>,
	pub detail:       Option<String>,
	pub price:        Option<Decimal>,
	pub seats:        Option<i32>,
	pub doors:        Option<i32>,
	pub transmission: Option<String>,
	pub fuel:         Option<String>,
}

impl UpdateCarRequest {
	#[must_use]
	pub fn to_update(self) -> UpdateCar {
		UpdateCar {
			name:         self.name,
			detail:       self.detail,
			price:        self.price,
			seats:        self.seats,
			doors:        self.doors,
			transmission: self.transmission,
			fuel:         self.fuel,
		}
	}
}
