use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::store::Store;

/// A bookable add-on from the catalog, priced per rental day
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Extra {
	pub id:    i32,
	pub name:  String,
	pub price: Decimal,
}

impl Extra {
	/// Get the full extras catalog
	#[instrument(skip(store))]
	pub fn all(store: &Store) -> Vec<Self> {
		store.read(|tables| tables.extras.values().cloned().collect())
	}

	/// Delete an [`Extra`] given its id
	///
	/// Reservations keep the snapshot they took of this extra; only future
	/// bookings lose access to it.
	#[instrument(skip(store))]
	pub fn delete_by_id(extra_id: i32, store: &Store) -> Result<(), Error> {
		store.write(|tables| {
			if tables.extras.remove(&extra_id).is_none() {
				return Err(Error::NotFound(format!(
					"no extra with id {extra_id}"
				)));
			}

			info!("deleted extra with id {extra_id}");

			Ok(())
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewExtra {
	pub name:  String,
	pub price: Decimal,
}

impl NewExtra {
	/// Insert this [`NewExtra`]
	#[instrument(skip(store))]
	pub fn insert(self, store: &Store) -> Extra {
		store.write(|tables| {
			let id = tables.extra_ids.next_id();

			let extra = Extra { id, name: self.name, price: self.price };

			tables.extras.insert(id, extra.clone());

			info!("created extra with id {id}");

			extra
		})
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UpdateExtra {
	pub name:  Option<String>,
	pub price: Option<Decimal>,
}

impl UpdateExtra {
	/// Update an [`Extra`] with the given changes
	#[instrument(skip(store))]
	pub fn apply_to(self, target_id: i32, store: &Store) -> Result<Extra, Error> {
		store.write(|tables| {
			let extra = tables.extras.get_mut(&target_id).ok_or_else(|| {
				Error::NotFound(format!("no extra with id {target_id}"))
			})?;

			if let Some(name) = self.name {
				extra.name = name;
			}
			if let Some(price) = self.price {
				extra.price = price;
			}

			info!("updated extra with id {target_id}");

			Ok(extra.clone())
		})
	}
}
