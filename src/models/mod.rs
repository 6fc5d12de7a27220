//! Domain model definitions

mod car;
mod destination;
mod extra;
mod rate_period;
mod reservation;

pub use car::*;
pub use destination::*;
pub use extra::*;
pub use rate_period::*;
pub use reservation::*;
