use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{NewRatePeriod, RatePeriod, UpdateRatePeriod};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatePeriodResponse {
	pub id:            i32,
	pub car_id:        i32,
	pub start_date:    NaiveDate,
	pub end_date:      NaiveDate,
	pub price_per_day: Decimal,
}

impl From<RatePeriod> for RatePeriodResponse {
	fn from(value: RatePeriod) -> Self {
		Self {
			id:            value.id,
			car_id:        value.car_id,
			start_date:    value.start_date,
			end_date:      value.end_date,
			price_per_day: value.price_per_day,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatePeriodRequest {
	pub start_date:    NaiveDate,
	pub end_date:      NaiveDate,
	pub price_per_day: Decimal,
}

impl CreateRatePeriodRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewRatePeriod {
		NewRatePeriod {
			start_date:    self.start_date,
			end_date:      self.end_date,
			price_per_day: self.price_per_day,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatePeriodRequest {
	pub start_date:    Option<NaiveDate>,
	pub end_date:      Option<NaiveDate>,
	pub price_per_day: Option<Decimal>,
}

impl UpdateRatePeriodRequest {
	#[must_use]
	pub fn to_update(self) -> UpdateRatePeriod {
		UpdateRatePeriod {
			start_date:    self.start_date,
			end_date:      self.end_date,
			price_per_day: self.price_per_day,
		}
	}
}
