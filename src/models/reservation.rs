use chrono::NaiveDateTime;
use lettre::message::Mailbox;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ReservationError};
use crate::models::{Extra, RatePeriod};
use crate::store::{Store, Tables};
use crate::{phone, pricing};

/// The lifecycle state of a [`Reservation`]
///
/// Only approved reservations compete for a car's calendar; pending ones
/// may coexist and overlap freely.
#[derive(
	Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
	#[default]
	Pending,
	Approved,
}

impl ReservationStatus {
	/// Validate a status change against the transition table
	///
	/// Returns whether the change is an actual transition; moving to the
	/// current status is allowed and reported as a no-op so approvals stay
	/// idempotent. Everything outside the table, including un-approval, is
	/// rejected.
	pub fn transition_to(self, to: Self) -> Result<bool, ReservationError> {
		match (self, to) {
			(from, to) if from == to => Ok(false),
			(Self::Pending, Self::Approved) => Ok(true),
			(from, to) => {
				Err(ReservationError::InvalidTransition { from, to })
			},
		}
	}
}

impl std::fmt::Display for ReservationStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Pending => write!(f, "pending"),
			Self::Approved => write!(f, "approved"),
		}
	}
}

/// The id, name, and price of a catalog [`Extra`] as they were at booking
/// time
///
/// Catalog edits after that moment never touch the snapshot, so stored
/// totals keep matching what the customer agreed to.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ExtraSnapshot {
	pub id:    i32,
	pub name:  String,
	pub price: Decimal,
}

impl From<&Extra> for ExtraSnapshot {
	fn from(extra: &Extra) -> Self {
		Self {
			id:    extra.id,
			name:  extra.name.clone(),
			price: extra.price,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
	pub car:    Option<i32>,
	pub status: Option<ReservationStatus>,
}

/// A booking of one car over one window of time
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Reservation {
	pub id:              i32,
	pub car_id:          i32,
	pub destination_id:  Option<i32>,
	pub customer_name:   Option<String>,
	pub phone_number:    Option<String>,
	pub email:           Option<String>,
	pub pickup_at:       Option<NaiveDateTime>,
	pub return_at:       Option<NaiveDateTime>,
	pub extras:          Vec<ExtraSnapshot>,
	pub status:          ReservationStatus,
	pub total_days:      Option<i64>,
	pub car_price_total: Option<Decimal>,
	pub total_price:     Option<Decimal>,
	pub created_at:      NaiveDateTime,
}

impl TryFrom<&Reservation> for Mailbox {
	type Error = Error;

	fn try_from(value: &Reservation) -> Result<Mailbox, Error> {
		match &value.email {
			Some(email) => {
				Ok(Mailbox::new(value.customer_name.clone(), email.parse()?))
			},
			None => {
				error!(
					"mailer error -- reservation {} has no email address",
					value.id
				);

				Err(Error::InternalServerError)
			},
		}
	}
}

impl Reservation {
	/// Whether this reservation occupies any part of the given window
	///
	/// Windows are half-open, so a reservation ending exactly when the
	/// window starts does not conflict. A reservation without dates
	/// occupies nothing.
	#[must_use]
	pub fn conflicts_with(
		&self,
		pickup_at: NaiveDateTime,
		return_at: NaiveDateTime,
	) -> bool {
		match (self.pickup_at, self.return_at) {
			(Some(own_pickup), Some(own_return)) => {
				own_pickup < return_at && own_return > pickup_at
			},
			_ => false,
		}
	}

	/// Whether a car is free of approved reservations over a window
	///
	/// `exclude` removes one reservation from the comparison set so a
	/// reservation can be checked against everyone but itself.
	fn car_available_in(
		tables: &Tables,
		car_id: i32,
		pickup_at: NaiveDateTime,
		return_at: NaiveDateTime,
		exclude: Option<i32>,
	) -> bool {
		tables
			.reservations
			.values()
			.filter(|reservation| reservation.car_id == car_id)
			.filter(|reservation| {
				reservation.status == ReservationStatus::Approved
			})
			.filter(|reservation| Some(reservation.id) != exclude)
			.all(|reservation| {
				!reservation.conflicts_with(pickup_at, return_at)
			})
	}

	/// Answer an availability query for a car over a window
	///
	/// # Errors
	/// Fails if the car does not exist or the window is inverted
	#[instrument(skip(store))]
	pub fn car_is_available(
		car_id: i32,
		pickup_at: NaiveDateTime,
		return_at: NaiveDateTime,
		store: &Store,
	) -> Result<bool, Error> {
		if return_at <= pickup_at {
			return Err(ReservationError::ReturnNotAfterPickup {
				pickup: pickup_at,
				ret:    return_at,
			}
			.into());
		}

		store.read(|tables| {
			if !tables.cars.contains_key(&car_id) {
				return Err(Error::NotFound(format!("no car with id {car_id}")));
			}

			Ok(Self::car_available_in(
				tables, car_id, pickup_at, return_at, None,
			))
		})
	}

	/// Get a [`Reservation`] given its id
	#[instrument(skip(store))]
	pub fn get_by_id(r_id: i32, store: &Store) -> Result<Self, Error> {
		store.read(|tables| {
			tables.reservations.get(&r_id).cloned().ok_or_else(|| {
				Error::NotFound(format!("no reservation with id {r_id}"))
			})
		})
	}

	/// Get one page of reservations matching the filter along with the
	/// unpaginated total
	#[instrument(skip(store))]
	pub fn page(
		filter: ReservationFilter,
		limit: usize,
		offset: usize,
		store: &Store,
	) -> (usize, Vec<Self>) {
		store.read(|tables| {
			let matching: Vec<&Self> = tables
				.reservations
				.values()
				.filter(|reservation| {
					filter.car.is_none_or(|car_id| reservation.car_id == car_id)
				})
				.filter(|reservation| {
					filter
						.status
						.is_none_or(|status| reservation.status == status)
				})
				.collect();

			let total = matching.len();
			let page = matching
				.into_iter()
				.skip(offset)
				.take(limit)
				.cloned()
				.collect();

			(total, page)
		})
	}

	/// Approve a [`Reservation`]
	///
	/// The guards and the status write run as one transaction: approval
	/// requires a valid window and no overlap with the car's other approved
	/// reservations, and the derived totals are recomputed along with the
	/// status. Approving an already-approved reservation is a no-op.
	///
	/// Returns the saved reservation and whether this call performed the
	/// pending-to-approved change, so the caller can notify the customer
	/// exactly once.
	#[instrument(skip(store))]
	pub fn approve(r_id: i32, store: &Store) -> Result<(Self, bool), Error> {
		store.write(|tables| {
			let current = tables
				.reservations
				.get(&r_id)
				.cloned()
				.ok_or_else(|| {
					Error::NotFound(format!("no reservation with id {r_id}"))
				})?;

			let transitioned =
				current.status.transition_to(ReservationStatus::Approved)?;

			if !transitioned {
				return Ok((current, false));
			}

			let (Some(pickup), Some(ret)) =
				(current.pickup_at, current.return_at)
			else {
				return Err(ReservationError::MissingDates.into());
			};

			if ret <= pickup {
				return Err(ReservationError::ReturnNotAfterPickup {
					pickup,
					ret,
				}
				.into());
			}

			if !Self::car_available_in(
				tables,
				current.car_id,
				pickup,
				ret,
				Some(r_id),
			) {
				return Err(ReservationError::CarUnavailable {
					pickup,
					ret,
				}
				.into());
			}

			let (total_days, car_price_total, total_price) = priced_fields(
				tables,
				current.car_id,
				current.pickup_at,
				current.return_at,
				&current.extras,
			)?;

			let approved = Self {
				status: ReservationStatus::Approved,
				total_days,
				car_price_total,
				total_price,
				..current
			};

			tables.reservations.insert(r_id, approved.clone());

			info!("approved reservation with id {r_id}");

			Ok((approved, true))
		})
	}

	/// Delete a [`Reservation`] given its id
	#[instrument(skip(store))]
	pub fn delete_by_id(r_id: i32, store: &Store) -> Result<(), Error> {
		store.write(|tables| {
			if tables.reservations.remove(&r_id).is_none() {
				return Err(Error::NotFound(format!(
					"no reservation with id {r_id}"
				)));
			}

			info!("deleted reservation with id {r_id}");

			Ok(())
		})
	}
}

/// Check that a booking window is well formed
///
/// Windows with either end missing pass; only a present-but-inverted pair
/// is rejected.
fn check_window(
	pickup_at: Option<NaiveDateTime>,
	return_at: Option<NaiveDateTime>,
) -> Result<(), ReservationError> {
	if let (Some(pickup), Some(ret)) = (pickup_at, return_at) {
		if ret <= pickup {
			return Err(ReservationError::ReturnNotAfterPickup { pickup, ret });
		}
	}

	Ok(())
}

/// Resolve requested extras to catalog snapshots
fn resolve_extras(
	tables: &Tables,
	extra_ids: &[i32],
) -> Result<Vec<ExtraSnapshot>, Error> {
	extra_ids
		.iter()
		.map(|&extra_id| {
			tables
				.extras
				.get(&extra_id)
				.map(ExtraSnapshot::from)
				.ok_or_else(|| ReservationError::UnknownExtra(extra_id).into())
		})
		.collect()
}

/// Recompute the derived price fields for a reservation about to be saved
///
/// Totals only exist once both dates are known; a dateless draft keeps
/// them unset rather than carrying a misleading zero.
fn priced_fields(
	tables: &Tables,
	car_id: i32,
	pickup_at: Option<NaiveDateTime>,
	return_at: Option<NaiveDateTime>,
	extras: &[ExtraSnapshot],
) -> Result<(Option<i64>, Option<Decimal>, Option<Decimal>), Error> {
	let car = tables.cars.get(&car_id).ok_or_else(|| {
		Error::ValidationError(format!("car {car_id} does not exist"))
	})?;

	if pickup_at.is_none() || return_at.is_none() {
		return Ok((None, None, None));
	}

	let periods = RatePeriod::for_car_in(tables, car_id);
	let quote =
		pricing::quote(pickup_at, return_at, car.price, &periods, extras)?;

	Ok((Some(quote.total_days), Some(quote.car_total), Some(quote.total)))
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NewReservation {
	pub car_id:         i32,
	pub destination_id: Option<i32>,
	pub customer_name:  Option<String>,
	pub phone_number:   Option<String>,
	pub email:          Option<String>,
	pub pickup_at:      Option<NaiveDateTime>,
	pub return_at:      Option<NaiveDateTime>,
	pub extra_ids:      Vec<i32>,
}

impl NewReservation {
	/// Insert this [`NewReservation`]
	///
	/// New reservations always start out pending; no status a client sends
	/// along is honored. The phone number is canonicalized, the window is
	/// checked, extras are snapshotted from the catalog, and the totals are
	/// computed, all before anything is persisted. Pending reservations may
	/// overlap approved ones; the conflict surfaces at approval time.
	#[instrument(skip(store))]
	pub fn insert(
		self,
		default_phone_country: &str,
		store: &Store,
	) -> Result<Reservation, Error> {
		let phone_number = self
			.phone_number
			.as_deref()
			.map(|raw| phone::normalize(raw, default_phone_country))
			.transpose()?;

		check_window(self.pickup_at, self.return_at)?;

		store.write(|tables| {
			if let Some(dest_id) = self.destination_id {
				if !tables.destinations.contains_key(&dest_id) {
					return Err(Error::ValidationError(format!(
						"destination {dest_id} does not exist"
					)));
				}
			}

			let extras = resolve_extras(tables, &self.extra_ids)?;

			let (total_days, car_price_total, total_price) = priced_fields(
				tables,
				self.car_id,
				self.pickup_at,
				self.return_at,
				&extras,
			)?;

			let id = tables.reservation_ids.next_id();

			let reservation = Reservation {
				id,
				car_id: self.car_id,
				destination_id: self.destination_id,
				customer_name: self.customer_name,
				phone_number,
				email: self.email,
				pickup_at: self.pickup_at,
				return_at: self.return_at,
				extras,
				status: ReservationStatus::Pending,
				total_days,
				car_price_total,
				total_price,
				created_at: chrono::Utc::now().naive_utc(),
			};

			tables.reservations.insert(id, reservation.clone());

			info!("created reservation with id {id}");

			Ok(reservation)
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdateReservation {
	pub car_id:         Option<i32>,
	pub destination_id: Option<i32>,
	pub customer_name:  Option<String>,
	pub phone_number:   Option<String>,
	pub email:          Option<String>,
	pub pickup_at:      Option<NaiveDateTime>,
	pub return_at:      Option<NaiveDateTime>,
	pub extra_ids:      Option<Vec<i32>>,
}

impl UpdateReservation {
	/// Update a [`Reservation`] with the given changes
	///
	/// The merged state is re-validated and re-priced as a whole. Moving an
	/// approved reservation to another car or window re-runs the overlap
	/// guard against everyone but itself, so edits cannot manufacture a
	/// double booking. Status is not editable here; transitions go through
	/// [`Reservation::approve`].
	#[instrument(skip(store))]
	pub fn apply_to(
		self,
		target_id: i32,
		default_phone_country: &str,
		store: &Store,
	) -> Result<Reservation, Error> {
		let normalized_phone = self
			.phone_number
			.as_deref()
			.map(|raw| phone::normalize(raw, default_phone_country))
			.transpose()?;

		store.write(|tables| {
			let current = tables
				.reservations
				.get(&target_id)
				.cloned()
				.ok_or_else(|| {
					Error::NotFound(format!(
						"no reservation with id {target_id}"
					))
				})?;

			let car_id = self.car_id.unwrap_or(current.car_id);
			let destination_id = self.destination_id.or(current.destination_id);
			let pickup_at = self.pickup_at.or(current.pickup_at);
			let return_at = self.return_at.or(current.return_at);

			check_window(pickup_at, return_at)?;

			if let Some(dest_id) = destination_id {
				if !tables.destinations.contains_key(&dest_id) {
					return Err(Error::ValidationError(format!(
						"destination {dest_id} does not exist"
					)));
				}
			}

			let extras = match &self.extra_ids {
				Some(extra_ids) => resolve_extras(tables, extra_ids)?,
				None => current.extras.clone(),
			};

			if current.status == ReservationStatus::Approved {
				let (Some(pickup), Some(ret)) = (pickup_at, return_at) else {
					return Err(ReservationError::MissingDates.into());
				};

				if !Reservation::car_available_in(
					tables,
					car_id,
					pickup,
					ret,
					Some(target_id),
				) {
					return Err(ReservationError::CarUnavailable {
						pickup,
						ret,
					}
					.into());
				}
			}

			let (total_days, car_price_total, total_price) = priced_fields(
				tables, car_id, pickup_at, return_at, &extras,
			)?;

			let reservation = Reservation {
				car_id,
				destination_id,
				customer_name: self.customer_name.or(current.customer_name),
				phone_number: normalized_phone.or(current.phone_number),
				email: self.email.or(current.email),
				pickup_at,
				return_at,
				extras,
				total_days,
				car_price_total,
				total_price,
				..current
			};

			tables.reservations.insert(target_id, reservation.clone());

			info!("updated reservation with id {target_id}");

			Ok(reservation)
		})
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;
	use crate::models::NewCar;

	fn at(d: u32, h: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2026, 1, d)
			.unwrap()
			.and_hms_opt(h, 0, 0)
			.unwrap()
	}

	fn approved_between(pickup: NaiveDateTime, ret: NaiveDateTime) -> Reservation {
		Reservation {
			id:              1,
			car_id:          1,
			destination_id:  None,
			customer_name:   None,
			phone_number:    None,
			email:           None,
			pickup_at:       Some(pickup),
			return_at:       Some(ret),
			extras:          Vec::new(),
			status:          ReservationStatus::Approved,
			total_days:      None,
			car_price_total: None,
			total_price:     None,
			created_at:      at(1, 0),
		}
	}

	#[test]
	fn touching_windows_do_not_conflict() {
		let first = approved_between(at(1, 10), at(2, 10));

		assert!(!first.conflicts_with(at(2, 10), at(3, 10)));

		let second = approved_between(at(2, 10), at(3, 10));

		assert!(!second.conflicts_with(at(1, 10), at(2, 10)));
	}

	#[test]
	fn contained_windows_conflict_both_ways() {
		let outer = approved_between(at(1, 10), at(2, 10));

		assert!(outer.conflicts_with(at(1, 9), at(1, 11)));

		let inner = approved_between(at(1, 9), at(1, 11));

		assert!(inner.conflicts_with(at(1, 10), at(2, 10)));
	}

	#[test]
	fn dateless_reservations_never_conflict() {
		let mut draft = approved_between(at(1, 10), at(2, 10));
		draft.return_at = None;

		assert!(!draft.conflicts_with(at(1, 0), at(5, 0)));
	}

	#[test]
	fn the_transition_table_is_enforced() {
		use ReservationStatus::{Approved, Pending};

		assert_eq!(Pending.transition_to(Approved).unwrap(), true);
		assert_eq!(Pending.transition_to(Pending).unwrap(), false);
		assert_eq!(Approved.transition_to(Approved).unwrap(), false);

		let rejected = Approved.transition_to(Pending);

		assert!(matches!(
			rejected,
			Err(ReservationError::InvalidTransition { .. })
		));
	}

	#[test]
	fn availability_excludes_only_the_given_reservation() {
		let store = Store::new();

		let car = NewCar {
			name:         "Corsa".to_string(),
			detail:       None,
			price:        Some(Decimal::from(40)),
			seats:        None,
			doors:        None,
			transmission: None,
			fuel:         None,
		}
		.insert(&store);

		let reservation = NewReservation {
			car_id: car.id,
			pickup_at: Some(at(1, 10)),
			return_at: Some(at(3, 10)),
			..Default::default()
		}
		.insert("355", &store)
		.unwrap();

		let (_, newly_approved) =
			Reservation::approve(reservation.id, &store).unwrap();
		assert!(newly_approved);

		let free =
			Reservation::car_is_available(car.id, at(2, 0), at(4, 0), &store)
				.unwrap();
		assert!(!free);

		store.read(|tables| {
			assert!(Reservation::car_available_in(
				tables,
				car.id,
				at(2, 0),
				at(4, 0),
				Some(reservation.id),
			));
		});
	}
}
