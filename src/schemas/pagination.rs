use serde::{Deserialize, Deserializer, Serialize};

use crate::schemas::BoundedU32Visitor;

const fn page_default() -> u32 { 1 }

const fn per_page_default() -> u32 { 12 }

/// Pagination request parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
	#[serde(default = "page_default", deserialize_with = "ds_page_bounds")]
	pub page:     u32,
	#[serde(
		default = "per_page_default",
		deserialize_with = "ds_per_page_bounds"
	)]
	pub per_page: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse<T> {
	pub page:     u32,
	pub per_page: u32,
	pub total:    usize,
	pub data:     T,
}

impl Default for PaginationOptions {
	fn default() -> Self { Self { page: 1, per_page: 12 } }
}

impl PaginationOptions {
	/// Wrap one page of data in a [`PaginationResponse`] echoing the
	/// current parameters
	pub fn paginate<T>(&self, total: usize, data: T) -> PaginationResponse<T> {
		PaginationResponse {
			page: self.page,
			per_page: self.per_page,
			total,
			data,
		}
	}

	/// The number of records on a full page
	#[inline]
	#[must_use]
	pub fn limit(&self) -> usize { self.per_page as usize }

	/// The number of records to skip before this page
	///
	/// Widens before multiplying; the maximum page times the maximum page
	/// size overflows u32
	#[inline]
	#[must_use]
	pub fn offset(&self) -> usize {
		(self.page as usize - 1) * self.per_page as usize
	}
}

/// Deserialization visitor for `page` bounds.
fn ds_page_bounds<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
	d.deserialize_u32(BoundedU32Visitor { start: 1, end: u32::MAX })
}

/// Deserialization visitor for `perPage` bounds.
fn ds_per_page_bounds<'de, D: Deserializer<'de>>(
	d: D,
) -> Result<u32, D::Error> {
	d.deserialize_u32(BoundedU32Visitor { start: 1, end: 50 })
}
