use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, RatePeriodError};
use crate::store::{Store, Tables};

/// A seasonal daily rate for one car
///
/// Periods are half-open: `start_date` is the first covered day and
/// `end_date` is the first day no longer covered. Periods of the same car
/// never overlap, so at most one period applies to any given day.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RatePeriod {
	pub id:            i32,
	pub car_id:        i32,
	pub start_date:    NaiveDate,
	pub end_date:      NaiveDate,
	pub price_per_day: Decimal,
}

impl RatePeriod {
	/// Whether this period covers the given day
	#[must_use]
	pub fn covers(&self, day: NaiveDate) -> bool {
		self.start_date <= day && day < self.end_date
	}

	/// Get all rate periods of a car, earliest first
	#[instrument(skip(store))]
	pub fn for_car(car_id: i32, store: &Store) -> Result<Vec<Self>, Error> {
		store.read(|tables| {
			if !tables.cars.contains_key(&car_id) {
				return Err(Error::NotFound(format!("no car with id {car_id}")));
			}

			Ok(Self::for_car_in(tables, car_id))
		})
	}

	pub(crate) fn for_car_in(tables: &Tables, car_id: i32) -> Vec<Self> {
		let mut periods: Vec<Self> = tables
			.rate_periods
			.values()
			.filter(|period| period.car_id == car_id)
			.cloned()
			.collect();

		periods.sort_by_key(|period| period.start_date);

		periods
	}

	/// Delete a rate period of a car given its id
	#[instrument(skip(store))]
	pub fn delete_by_id(
		car_id: i32,
		period_id: i32,
		store: &Store,
	) -> Result<(), Error> {
		store.write(|tables| {
			let known = tables
				.rate_periods
				.get(&period_id)
				.is_some_and(|period| period.car_id == car_id);

			if !known {
				return Err(Error::NotFound(format!(
					"car {car_id} has no rate period with id {period_id}"
				)));
			}

			tables.rate_periods.remove(&period_id);

			info!("deleted rate period with id {period_id}");

			Ok(())
		})
	}
}

/// Check that a period range is well formed
fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), RatePeriodError> {
	if end <= start {
		return Err(RatePeriodError::InvertedRange { start, end });
	}

	Ok(())
}

/// Check a candidate range against the other periods of the car
///
/// Reports the range of the first conflicting sibling. Since ranges are
/// half-open, a period starting exactly where another ends is fine.
fn check_no_overlap(
	tables: &Tables,
	car_id: i32,
	start: NaiveDate,
	end: NaiveDate,
	exclude: Option<i32>,
) -> Result<(), RatePeriodError> {
	let conflict = tables
		.rate_periods
		.values()
		.filter(|period| period.car_id == car_id)
		.filter(|period| Some(period.id) != exclude)
		.find(|period| period.start_date < end && period.end_date > start);

	if let Some(sibling) = conflict {
		return Err(RatePeriodError::Overlapping {
			start: sibling.start_date,
			end:   sibling.end_date,
		});
	}

	Ok(())
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewRatePeriod {
	pub start_date:    NaiveDate,
	pub end_date:      NaiveDate,
	pub price_per_day: Decimal,
}

impl NewRatePeriod {
	/// Insert this [`NewRatePeriod`] for the given car
	#[instrument(skip(store))]
	pub fn insert(self, car_id: i32, store: &Store) -> Result<RatePeriod, Error> {
		check_range(self.start_date, self.end_date)?;

		store.write(|tables| {
			if !tables.cars.contains_key(&car_id) {
				return Err(Error::NotFound(format!("no car with id {car_id}")));
			}

			check_no_overlap(
				tables,
				car_id,
				self.start_date,
				self.end_date,
				None,
			)?;

			let id = tables.rate_period_ids.next_id();

			let period = RatePeriod {
				id,
				car_id,
				start_date: self.start_date,
				end_date: self.end_date,
				price_per_day: self.price_per_day,
			};

			tables.rate_periods.insert(id, period.clone());

			info!("created rate period with id {id} for car {car_id}");

			Ok(period)
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdateRatePeriod {
	pub start_date:    Option<NaiveDate>,
	pub end_date:      Option<NaiveDate>,
	pub price_per_day: Option<Decimal>,
}

impl UpdateRatePeriod {
	/// Update a rate period of a car with the given changes
	///
	/// The merged range is re-checked in full, so an update can neither
	/// invert a period nor move it onto a sibling.
	#[instrument(skip(store))]
	pub fn apply_to(
		self,
		car_id: i32,
		period_id: i32,
		store: &Store,
	) -> Result<RatePeriod, Error> {
		store.write(|tables| {
			let current = tables
				.rate_periods
				.get(&period_id)
				.filter(|period| period.car_id == car_id)
				.cloned()
				.ok_or_else(|| {
					Error::NotFound(format!(
						"car {car_id} has no rate period with id {period_id}"
					))
				})?;

			let start_date = self.start_date.unwrap_or(current.start_date);
			let end_date = self.end_date.unwrap_or(current.end_date);

			check_range(start_date, end_date)?;
			check_no_overlap(
				tables,
				car_id,
				start_date,
				end_date,
				Some(period_id),
			)?;

			let period = RatePeriod {
				start_date,
				end_date,
				price_per_day: self
					.price_per_day
					.unwrap_or(current.price_per_day),
				..current
			};

			tables.rate_periods.insert(period_id, period.clone());

			info!("updated rate period with id {period_id}");

			Ok(period)
		})
	}
}
