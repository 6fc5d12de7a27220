use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::store::Store;

/// A rentable vehicle
///
/// The base `price` is the fallback daily rate for days no
/// [`RatePeriod`](crate::models::RatePeriod) covers. It may be absent, in
/// which case every booked day must fall inside a rate period or pricing
/// fails.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Car {
	pub id:           i32,
	pub name:         String,
	pub detail:       Option<String>,
	pub price:        Option<Decimal>,
	pub seats:        Option<i32>,
	pub doors:        Option<i32>,
	pub transmission: Option<String>,
	pub fuel:         Option<String>,
}

impl Car {
	/// Get a [`Car`] given its id
	#[instrument(skip(store))]
	pub fn get_by_id(car_id: i32, store: &Store) -> Result<Self, Error> {
		store.read(|tables| {
			tables.cars.get(&car_id).cloned().ok_or_else(|| {
				Error::NotFound(format!("no car with id {car_id}"))
			})
		})
	}

	/// Get one page of the car list along with the unpaginated total
	#[instrument(skip(store))]
	pub fn page(limit: usize, offset: usize, store: &Store) -> (usize, Vec<Self>) {
		store.read(|tables| {
			let total = tables.cars.len();
			let cars = tables
				.cars
				.values()
				.skip(offset)
				.take(limit)
				.cloned()
				.collect();

			(total, cars)
		})
	}

	/// Delete a [`Car`] given its id
	///
	/// Deleting a car also deletes its rate periods and its reservations.
	#[instrument(skip(store))]
	pub fn delete_by_id(car_id: i32, store: &Store) -> Result<(), Error> {
		store.write(|tables| {
			if tables.cars.remove(&car_id).is_none() {
				return Err(Error::NotFound(format!("no car with id {car_id}")));
			}

			tables.rate_periods.retain(|_, period| period.car_id != car_id);
			tables
				.reservations
				.retain(|_, reservation| reservation.car_id != car_id);

			info!("deleted car with id {car_id} and its dependents");

			Ok(())
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewCar {
	pub name:         String,
	pub detail:       Option<String>,
	pub price:        Option<Decimal>,
	pub seats:        Option<i32>,
	pub doors:        Option<i32>,
	pub transmission: Option<String>,
	pub fuel:         Option<String>,
}

impl NewCar {
	/// Insert this [`NewCar`]
	#[instrument(skip(store))]
	pub fn insert(self, store: &Store) -> Car {
		store.write(|tables| {
			let id = tables.car_ids.next_id();

			let car = Car {
				id,
				name: self.name,
				detail: self.detail,
				price: self.price,
				seats: self.seats,
				doors: self.doors,
				transmission: self.transmission,
				fuel: self.fuel,
			};

			tables.cars.insert(id, car.clone());

			info!("created car with id {id}");

			car
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdateCar {
	pub name:         Option<String>,
	pub detail:       Option<String>,
	pub price:        Option<Decimal>,
	pub seats:        Option<i32>,
	pub doors:        Option<i32>,
	pub transmission: Option<String>,
	pub fuel:         Option<String>,
}

impl UpdateCar {
	/// Update a [`Car`] with the given changes
	///
	/// A changed base price only affects reservations saved afterwards;
	/// stored totals are never rewritten behind a booking.
	#[instrument(skip(store))]
	pub fn apply_to(self, target_id: i32, store: &Store) -> Result<Car, Error> {
		store.write(|tables| {
			let car = tables.cars.get_mut(&target_id).ok_or_else(|| {
				Error::NotFound(format!("no car with id {target_id}"))
			})?;

			if let Some(name) = self.name {
				car.name = name;
			}
			car.detail = self.detail.or(car.detail.take());
			car.price = self.price.or(car.price);
			car.seats = self.seats.or(car.seats);
			car.doors = self.doors.or(car.doors);
			car.transmission = self.transmission.or(car.transmission.take());
			car.fuel = self.fuel.or(car.fuel.take());

			info!("updated car with id {target_id}");

			Ok(car.clone())
		})
	}
}
