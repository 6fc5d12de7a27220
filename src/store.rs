//! In-memory persistence for the booking domain
//!
//! The pricing and availability rules live in the models; this module only
//! owns the tables and the locking discipline around them.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::{Car, Destination, Extra, RatePeriod, Reservation};

/// Monotonically increasing id allocator for one table
#[derive(Debug, Default)]
pub(crate) struct IdSequence(i32);

impl IdSequence {
	pub(crate) fn next_id(&mut self) -> i32 {
		self.0 += 1;
		self.0
	}
}

/// The backing tables, keyed by id
///
/// Ids start at 1 and are never reused within the lifetime of a store.
#[derive(Debug, Default)]
pub struct Tables {
	pub(crate) cars:         BTreeMap<i32, Car>,
	pub(crate) rate_periods: BTreeMap<i32, RatePeriod>,
	pub(crate) extras:       BTreeMap<i32, Extra>,
	pub(crate) destinations: BTreeMap<i32, Destination>,
	pub(crate) reservations: BTreeMap<i32, Reservation>,

	pub(crate) car_ids:         IdSequence,
	pub(crate) rate_period_ids: IdSequence,
	pub(crate) extra_ids:       IdSequence,
	pub(crate) destination_ids: IdSequence,
	pub(crate) reservation_ids: IdSequence,
}

/// Shared handle to the backing tables
///
/// Cloning is cheap; all clones view the same tables.
#[derive(Clone, Debug, Default)]
pub struct Store {
	inner: Arc<RwLock<Tables>>,
}

impl Store {
	#[must_use]
	pub fn new() -> Self { Self::default() }

	/// Run a read-only query against the tables
	pub fn read<T>(&self, query: impl FnOnce(&Tables) -> T) -> T {
		query(&self.inner.read())
	}

	/// Run a transaction against the tables
	///
	/// The closure holds the exclusive lock for its full duration, so a
	/// validate-and-save that runs inside a single `write` call is atomic
	/// with respect to every concurrent reader and writer. Closures must
	/// leave the tables untouched when they return an error.
	pub fn write<T>(&self, transaction: impl FnOnce(&mut Tables) -> T) -> T {
		transaction(&mut self.inner.write())
	}
}
