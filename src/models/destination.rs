use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::store::Store;

/// A pickup or dropoff location a reservation can point at
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Destination {
	pub id:   i32,
	pub name: String,
}

impl Destination {
	/// Get all destinations
	#[instrument(skip(store))]
	pub fn all(store: &Store) -> Vec<Self> {
		store.read(|tables| tables.destinations.values().cloned().collect())
	}

	/// Delete a [`Destination`] given its id
	///
	/// Reservations pointing at the destination survive with their
	/// reference cleared, so later edits never trip over a destination
	/// that no longer exists
	#[instrument(skip(store))]
	pub fn delete_by_id(dest_id: i32, store: &Store) -> Result<(), Error> {
		store.write(|tables| {
			if tables.destinations.remove(&dest_id).is_none() {
				return Err(Error::NotFound(format!(
					"no destination with id {dest_id}"
				)));
			}

			for reservation in tables.reservations.values_mut() {
				if reservation.destination_id == Some(dest_id) {
					reservation.destination_id = None;
				}
			}

			info!("deleted destination with id {dest_id}");

			Ok(())
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewDestination {
	pub name: String,
}

impl NewDestination {
	/// Insert this [`NewDestination`]
	#[instrument(skip(store))]
	pub fn insert(self, store: &Store) -> Destination {
		store.write(|tables| {
			let id = tables.destination_ids.next_id();

			let destination = Destination { id, name: self.name };

			tables.destinations.insert(id, destination.clone());

			info!("created destination with id {id}");

			destination
		})
	}
}
