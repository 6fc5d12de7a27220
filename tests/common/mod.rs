use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use carbook::mailer::{Mailer, StubMailbox};
use carbook::store::Store;
use carbook::{AppState, Config, routes};
use lettre::Address;

#[allow(dead_code)]
pub struct TestEnv {
	pub app:          TestServer,
	pub stub_mailbox: Arc<StubMailbox>,
}

impl TestEnv {
	/// Get a test environment with a stub mailbox for running tests
	///
	/// # Panics
	/// Panics if building a test server or mailbox fails
	pub fn new() -> Self {
		let config = Config::from_env();

		let stub_mailbox = config.create_stub_mailbox();

		let mailer = Mailer::new(&config, stub_mailbox.clone());

		let state = AppState { config, store: Store::new(), mailer };
		let app = routes::get_app_router(state);

		let test_server = TestServer::builder().build(app).unwrap();

		TestEnv { app: test_server, stub_mailbox: stub_mailbox.unwrap() }
	}

	/// Run a request and assert exactly one mail goes out to the given
	/// receivers
	#[allow(dead_code)]
	pub async fn expect_mail_to<F, R, T>(&self, receivers: &[&str], f: F) -> T
	where
		F: FnOnce() -> R,
		R: Future<Output = T>,
	{
		let outbox_size = { self.stub_mailbox.mailbox.lock().len() };

		let result = f().await;

		// Wait for up to 1 second or until a condvar notification is received
		// to make sure no queued emails are missed
		let mut mailbox = self.stub_mailbox.mailbox.lock();
		if mailbox.len() == outbox_size {
			let wait_res = self
				.stub_mailbox
				.signal
				.wait_for(&mut mailbox, Duration::from_secs(1));

			assert!(!wait_res.timed_out(), "timed out waiting for email");
		}

		assert_eq!(
			mailbox.len(),
			outbox_size + 1,
			"expected an email to be sent"
		);

		let last_mail = mailbox.last().unwrap();
		let receivers = receivers
			.iter()
			.map(|e| e.parse().unwrap())
			.collect::<Vec<Address>>();

		assert_eq!(last_mail.envelope().to(), receivers, "unexpected receivers");

		result
	}

	/// The last delivered mail, formatted as one RFC 5322 string
	///
	/// Call after [`Self::expect_mail_to`] so the mail has landed
	#[allow(dead_code)]
	pub fn last_mail(&self) -> String {
		let mailbox = self.stub_mailbox.mailbox.lock();
		let mail = mailbox.last().expect("the outbox is empty");

		String::from_utf8_lossy(&mail.formatted()).to_string()
	}

	/// Run a request and assert no mail goes out
	#[allow(dead_code)]
	pub async fn expect_no_mail<F, R, T>(&self, f: F) -> T
	where
		F: FnOnce() -> R,
		R: Future<Output = T>,
	{
		let outbox_size = { self.stub_mailbox.mailbox.lock().len() };

		let result = f().await;

		// Wait for up to 1 second or until a condvar notification is received
		// to make sure no queued emails are missed
		let mut mailbox = self.stub_mailbox.mailbox.lock();
		if mailbox.len() == outbox_size {
			self.stub_mailbox
				.signal
				.wait_for(&mut mailbox, Duration::from_secs(1));
		}

		assert_eq!(outbox_size, mailbox.len(), "expected no emails to be sent");

		result
	}
}
