//! Reservation notification emails
//!
//! Bodies are plain-text askama templates; the copy mirrors what the rental
//! desk sends by hand.

use askama::Template;
use chrono::NaiveDateTime;
use lettre::Address;
use lettre::message::Mailbox;

use crate::error::Error;
use crate::mailer::Mailer;
use crate::models::Reservation;

#[derive(Clone, Debug, Template)]
#[template(path = "reservation_received.txt")]
struct ReservationReceivedTemplate {
	customer_name: String,
	phone_number:  String,
	email:         String,
	car_name:      String,
	pickup_at:     String,
	return_at:     String,
}

#[derive(Clone, Debug, Template)]
#[template(path = "reservation_approved.txt")]
struct ReservationApprovedTemplate {
	customer_name: String,
	car_name:      String,
	pickup_at:     String,
	return_at:     String,
}

fn moment(value: Option<NaiveDateTime>) -> String {
	value.map_or_else(
		|| "-".to_string(),
		|at| at.format("%Y-%m-%d %H:%M").to_string(),
	)
}

fn or_dash(value: Option<&str>) -> String { value.unwrap_or("-").to_string() }

impl Mailer {
	/// Notify the rental desk that a new reservation request came in
	///
	/// Queued without waiting; a full queue is the caller's problem to log,
	/// never a reason to fail the booking.
	#[instrument(skip(self))]
	pub(crate) fn send_reservation_received(
		&self,
		business_email: &Address,
		reservation: &Reservation,
		car_name: &str,
	) -> Result<(), Error> {
		let body = ReservationReceivedTemplate {
			customer_name: or_dash(reservation.customer_name.as_deref()),
			phone_number:  or_dash(reservation.phone_number.as_deref()),
			email:         or_dash(reservation.email.as_deref()),
			car_name:      car_name.to_string(),
			pickup_at:     moment(reservation.pickup_at),
			return_at:     moment(reservation.return_at),
		};

		let mail = self.try_build_message(
			Mailbox::new(None, business_email.clone()),
			"New Car Reservation Request",
			&body.render()?,
		)?;

		self.try_send(mail)?;

		info!(
			"queued new-reservation notification for reservation {}",
			reservation.id
		);

		Ok(())
	}

	/// Email the customer that their reservation is approved
	///
	/// Callers must skip reservations without an email address and must
	/// only call this on the pending-to-approved edge; approval is emailed
	/// once, not on every save.
	#[instrument(skip(self))]
	pub(crate) fn send_reservation_approved(
		&self,
		reservation: &Reservation,
		car_name: &str,
	) -> Result<(), Error> {
		let body = ReservationApprovedTemplate {
			customer_name: or_dash(reservation.customer_name.as_deref()),
			car_name:      car_name.to_string(),
			pickup_at:     moment(reservation.pickup_at),
			return_at:     moment(reservation.return_at),
		};

		let mail = self.try_build_message(
			reservation,
			"Your car reservation is approved",
			&body.render()?,
		)?;

		self.try_send(mail)?;

		info!(
			"queued approval notification for reservation {}",
			reservation.id
		);

		Ok(())
	}
}
