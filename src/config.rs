use std::sync::Arc;

use lettre::Address;

use crate::mailer::StubMailbox;

#[derive(Clone, Debug)]
pub struct Config {
	pub email_address:         Address,
	pub email_smtp_server:     String,
	pub email_smtp_password:   String,
	pub email_queue_size:      usize,
	pub business_email:        Address,
	pub default_phone_country: String,
	pub server_port:           u16,
}

impl Config {
	fn get_env_var_or(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	/// Create a new [`Config`] from environment variables
	///
	/// Every variable has a default so the server can boot in development
	/// and in tests without a populated environment
	///
	/// # Panics
	/// Panics if an environment variable is set to an unparseable value
	#[must_use]
	pub fn from_env() -> Self {
		let email_address =
			Self::get_env_var_or("EMAIL_ADDRESS", "noreply@carbook.local")
				.parse::<Address>()
				.expect("INVALID EMAIL_ADDRESS");

		let email_smtp_server =
			Self::get_env_var_or("EMAIL_SMTP_SERVER", "stub");
		let email_smtp_password =
			Self::get_env_var_or("EMAIL_SMTP_PASSWORD", "");

		let email_queue_size = Self::get_env_var_or("EMAIL_QUEUE_SIZE", "32")
			.parse::<usize>()
			.expect("INVALID EMAIL_QUEUE_SIZE");

		let business_email =
			Self::get_env_var_or("BUSINESS_EMAIL", "bookings@carbook.local")
				.parse::<Address>()
				.expect("INVALID BUSINESS_EMAIL");

		let default_phone_country =
			Self::get_env_var_or("DEFAULT_PHONE_COUNTRY", "355");

		let server_port = Self::get_env_var_or("SERVER_PORT", "8000")
			.parse::<u16>()
			.expect("INVALID SERVER_PORT");

		Self {
			email_address,
			email_smtp_server,
			email_smtp_password,
			email_queue_size,
			business_email,
			default_phone_country,
			server_port,
		}
	}

	/// Create a stub mailbox for this config if one is needed
	///
	/// Returns `None` unless the config selects the stub mail transport
	#[must_use]
	pub fn create_stub_mailbox(&self) -> Option<Arc<StubMailbox>> {
		if self.email_smtp_server == "stub" {
			Some(Arc::new(StubMailbox::default()))
		} else {
			None
		}
	}
}
