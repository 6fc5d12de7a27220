//! Application-wide error types and [`From`] impls

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::ReservationStatus;
use crate::phone::PhoneError;
use crate::pricing::PricingError;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Any error related to normalizing a phone number
	#[error(transparent)]
	PhoneError(#[from] PhoneError),
	/// Any error related to computing a rental price
	#[error(transparent)]
	PricingError(#[from] PricingError),
	/// Any error related to a rate period of a car
	#[error(transparent)]
	RatePeriodError(#[from] RatePeriodError),
	/// Any error related to saving or approving a reservation
	#[error(transparent)]
	ReservationError(#[from] ReservationError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// Codes are append-only; a code must never be reused once it has been
	/// assigned, otherwise clients matching on it will silently break
	fn code(&self) -> i32 {
		match self {
			Self::InternalServerError => 1,
			Self::NotFound(_) => 2,
			Self::ValidationError(_) => 3,
			Self::ReservationError(e) => {
				match e {
					ReservationError::MissingDates => 4,
					ReservationError::ReturnNotAfterPickup { .. } => 5,
					ReservationError::CarUnavailable { .. } => 6,
					ReservationError::InvalidTransition { .. } => 7,
					ReservationError::UnknownExtra(_) => 8,
				}
			},
			Self::RatePeriodError(e) => {
				match e {
					RatePeriodError::InvertedRange { .. } => 9,
					RatePeriodError::Overlapping { .. } => 10,
				}
			},
			Self::PricingError(PricingError::Undefined { .. }) => 11,
			Self::PhoneError(PhoneError::Invalid(_)) => 12,
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::NotFound(m) | Self::ValidationError(m) => Some(m.to_owned()),
			Self::ReservationError(e) => {
				match e {
					ReservationError::ReturnNotAfterPickup { pickup, ret } => {
						Some(
							serde_json::json!({
								"pickupAt": pickup,
								"returnAt": ret,
							})
							.to_string(),
						)
					},
					ReservationError::CarUnavailable { pickup, ret } => {
						Some(
							serde_json::json!({
								"pickupAt": pickup,
								"returnAt": ret,
							})
							.to_string(),
						)
					},
					ReservationError::InvalidTransition { from, to } => {
						Some(
							serde_json::json!({"from": from, "to": to})
								.to_string(),
						)
					},
					ReservationError::UnknownExtra(id) => {
						Some(serde_json::json!({"id": id}).to_string())
					},
					ReservationError::MissingDates => None,
				}
			},
			Self::RatePeriodError(e) => {
				match e {
					RatePeriodError::InvertedRange { start, end }
					| RatePeriodError::Overlapping { start, end } => {
						Some(
							serde_json::json!({
								"startDate": start,
								"endDate": end,
							})
							.to_string(),
						)
					},
				}
			},
			Self::PricingError(PricingError::Undefined { date }) => {
				Some(serde_json::json!({"date": date}).to_string())
			},
			Self::PhoneError(PhoneError::Invalid(raw)) => Some(raw.to_owned()),
			Self::InternalServerError => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ReservationError(ReservationError::CarUnavailable {
				..
			})
			| Self::RatePeriodError(RatePeriodError::Overlapping { .. }) => {
				StatusCode::CONFLICT
			},
			Self::PhoneError(_)
			| Self::PricingError(_)
			| Self::RatePeriodError(_)
			| Self::ReservationError(_)
			| Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to saving or approving a reservation
#[derive(Debug, Error)]
pub enum ReservationError {
	/// Approval was requested while the pickup or return date is unset
	#[error("a pickup and return date are required before approval")]
	MissingDates,
	/// The return date does not lie after the pickup date
	#[error("the return date must be after the pickup date")]
	ReturnNotAfterPickup { pickup: NaiveDateTime, ret: NaiveDateTime },
	/// The car already has an approved reservation in the requested window
	#[error("the car is already reserved for this period")]
	CarUnavailable { pickup: NaiveDateTime, ret: NaiveDateTime },
	/// The requested status change is not part of the transition table
	#[error("a reservation cannot go from '{from}' to '{to}'")]
	InvalidTransition { from: ReservationStatus, to: ReservationStatus },
	/// An extra was requested that does not exist in the catalog
	#[error("unknown extra")]
	UnknownExtra(i32),
}

/// Any error related to a rate period of a car
#[derive(Debug, Error)]
pub enum RatePeriodError {
	/// The end date does not lie after the start date
	#[error("a rate period must end after it starts")]
	InvertedRange { start: chrono::NaiveDate, end: chrono::NaiveDate },
	/// The period overlaps another rate period of the same car
	#[error("the period overlaps an existing rate period")]
	Overlapping { start: chrono::NaiveDate, end: chrono::NaiveDate },
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Malformed email
	#[error("invalid email -- {0:?}")]
	InvalidEmail(lettre::address::AddressError),
	/// Generic mailer error
	#[error("mail error -- {0:?}")]
	MailError(lettre::error::Error),
	/// Mail queue is full
	#[error("mail queue full -- {0:?}")]
	MailQueueFull(mpsc::error::TrySendError<lettre::Message>),
	/// Mailer stopped unexpectedly
	#[error("mailer stopped -- {0:?}")]
	MailerStopped(mpsc::error::SendError<lettre::Message>),
	/// Mail template failed to render
	#[error("template error -- {0:?}")]
	TemplateError(askama::Error),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let repr = err
			.field_errors()
			.values()
			.flat_map(|errs| errs.iter().map(ToString::to_string))
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

// Lets an already-built Mailbox act as a mail receiver
impl From<std::convert::Infallible> for Error {
	fn from(value: std::convert::Infallible) -> Self { match value {} }
}

impl From<askama::Error> for Error {
	fn from(err: askama::Error) -> Self {
		InternalServerError::TemplateError(err).into()
	}
}

impl From<lettre::address::AddressError> for Error {
	fn from(err: lettre::address::AddressError) -> Self {
		InternalServerError::InvalidEmail(err).into()
	}
}

impl From<lettre::error::Error> for Error {
	fn from(err: lettre::error::Error) -> Self {
		InternalServerError::MailError(err).into()
	}
}

impl From<mpsc::error::SendError<lettre::Message>> for Error {
	fn from(err: mpsc::error::SendError<lettre::Message>) -> Self {
		InternalServerError::MailerStopped(err).into()
	}
}

impl From<mpsc::error::TrySendError<lettre::Message>> for Error {
	fn from(err: mpsc::error::TrySendError<lettre::Message>) -> Self {
		InternalServerError::MailQueueFull(err).into()
	}
}
