//! Request and response bodies for the HTTP surface

use serde::de::Visitor;

pub mod car;
pub mod destination;
pub mod extra;
pub mod pagination;
pub mod rate_period;
pub mod reservation;

/// A visitor for bounded u32 values.
struct BoundedU32Visitor {
	start: u32,
	end:   u32,
}

impl Visitor<'_> for BoundedU32Visitor {
	type Value = u32;

	fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "a number between {} and {}", self.start, self.end)
	}

	fn visit_u32<E>(self, v: u32) -> Result<Self::Value, E>
	where
		E: serde::de::Error,
	{
		if (self.start..=self.end).contains(&v) {
			Ok(v)
		} else {
			Err(E::custom(format_args!(
				"invalid value: {v}, expected a number between {} and {}",
				self.start, self.end,
			)))
		}
	}
}
