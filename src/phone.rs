//! Phone number canonicalization
//!
//! Reservations store phone numbers in E.164 form (`+` followed by the
//! country code and subscriber number) regardless of how the customer typed
//! them. Numbers without an international prefix are interpreted against a
//! configurable default country.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Characters customers commonly mix into phone numbers
static SEPARATORS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[\s./\-()]+").unwrap());

/// The significant part of a number after stripping prefixes
static DIGITS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Any error related to normalizing a phone number
#[derive(Debug, Error)]
pub enum PhoneError {
	/// The input cannot be interpreted as a dialable phone number
	#[error("invalid phone number")]
	Invalid(String),
}

/// Normalize a phone number to its canonical E.164 form
///
/// Accepts international numbers (`+CC...` or `00CC...`), national numbers
/// with a trunk zero (`0...`), and bare national numbers; the latter two are
/// prefixed with `default_country`. Separator characters (spaces, dots,
/// dashes, slashes, parentheses) are stripped.
///
/// # Errors
/// Fails if the input contains anything but digits, prefixes, and
/// separators, or if the resulting number has an impossible length or a
/// leading zero on its country code
pub fn normalize(
	raw: &str,
	default_country: &str,
) -> Result<String, PhoneError> {
	let stripped = SEPARATORS.replace_all(raw.trim(), "");
	let default_country = default_country.trim_start_matches('+');

	let significant = if let Some(rest) = stripped.strip_prefix('+') {
		rest.to_string()
	} else if let Some(rest) = stripped.strip_prefix("00") {
		rest.to_string()
	} else if let Some(rest) = stripped.strip_prefix('0') {
		format!("{default_country}{rest}")
	} else {
		format!("{default_country}{stripped}")
	};

	// E.164 numbers carry 15 digits at most; anything under 8 cannot hold
	// a country code and a subscriber number
	if !DIGITS.is_match(&significant)
		|| !(8..=15).contains(&significant.len())
		|| significant.starts_with('0')
	{
		return Err(PhoneError::Invalid(raw.to_string()));
	}

	Ok(format!("+{significant}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalizes_international_numbers() {
		assert_eq!(
			normalize("+355 69 123 4567", "355").unwrap(),
			"+355691234567"
		);
		assert_eq!(
			normalize("00355-69-123-4567", "355").unwrap(),
			"+355691234567"
		);
	}

	#[test]
	fn prefixes_national_numbers_with_the_default_country() {
		assert_eq!(normalize("069 123 4567", "355").unwrap(), "+355691234567");
		assert_eq!(normalize("691234567", "355").unwrap(), "+355691234567");
		assert_eq!(normalize("691234567", "+355").unwrap(), "+355691234567");
	}

	#[test]
	fn strips_separator_characters() {
		assert_eq!(
			normalize("(069) 123.45/67", "355").unwrap(),
			"+355691234567"
		);
	}

	#[test]
	fn rejects_letters_and_stray_symbols() {
		assert!(normalize("069 CALL ME", "355").is_err());
		assert!(normalize("+355#691234567", "355").is_err());
		assert!(normalize("", "355").is_err());
	}

	#[test]
	fn rejects_impossible_lengths() {
		assert!(normalize("+1234567", "355").is_err());
		assert!(normalize("+1234567890123456", "355").is_err());
	}

	#[test]
	fn rejects_a_zero_country_code() {
		assert!(normalize("+0123456789", "355").is_err());
	}
}
