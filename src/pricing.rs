//! Rental price computation
//!
//! Pricing is a pure function over the booking window, the car's base
//! price, its seasonal rate periods, and the extras snapshotted onto the
//! reservation. Callers resolve all of those up front; nothing in here
//! touches the store.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{ExtraSnapshot, RatePeriod};

/// Any error related to computing a rental price
#[derive(Debug, Error)]
pub enum PricingError {
	/// A booked day falls outside every rate period and the car carries no
	/// base price to fall back on
	#[error("no price is defined for a day of the requested period")]
	Undefined { date: chrono::NaiveDate },
}

/// The cost breakdown of one booking window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quote {
	/// Charged calendar days
	pub total_days: i64,
	/// Cost of the car alone over the window
	pub car_total:  Decimal,
	/// Car cost plus all extras
	pub total:      Decimal,
}

/// Price a booking window day by day
///
/// Every calendar day from the pickup date up to but excluding the return
/// date is charged at the covering rate period's price, or at the base
/// price when no period covers it. The return day itself is free, and a
/// window that spans no full day prices to zero. Each extra costs its
/// snapshot price once per charged day.
///
/// A window with either end missing is priced as the zero [`Quote`] so a
/// draft reservation can be saved before its dates are known.
///
/// # Errors
/// Fails if any charged day has neither a covering rate period nor a base
/// price to fall back on
pub fn quote(
	pickup_at: Option<NaiveDateTime>,
	return_at: Option<NaiveDateTime>,
	base_price: Option<Decimal>,
	rate_periods: &[RatePeriod],
	extras: &[ExtraSnapshot],
) -> Result<Quote, PricingError> {
	let (Some(pickup_at), Some(return_at)) = (pickup_at, return_at) else {
		return Ok(Quote::default());
	};

	let mut total_days = 0_i64;
	let mut car_total = Decimal::ZERO;

	let days = pickup_at
		.date()
		.iter_days()
		.take_while(|day| *day < return_at.date());

	for day in days {
		let rate = rate_periods
			.iter()
			.find(|period| period.covers(day))
			.map(|period| period.price_per_day)
			.or(base_price)
			.ok_or(PricingError::Undefined { date: day })?;

		total_days += 1;
		car_total += rate;
	}

	let extras_total = extras
		.iter()
		.map(|extra| extra.price * Decimal::from(total_days))
		.sum::<Decimal>();

	Ok(Quote { total_days, car_total, total: car_total + extras_total })
}
