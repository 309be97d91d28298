use crate::config::ParsingMode;
use crate::error::{ErrorKind, Result, TagError};
use crate::macros::err;

use std::fmt::Display;
use std::str::FromStr;

/// A subset of the ISO 8601 timestamp format, at whatever precision the source provided
///
/// Dates are written back at the precision they were read with, so a year-only date stays
/// year-only.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct Timestamp {
	/// The year, always present
	pub year: u16,
	/// Month of the year (1-12)
	pub month: Option<u8>,
	/// Day of the month (1-31)
	pub day: Option<u8>,
	/// Hour (0-23)
	pub hour: Option<u8>,
	/// Minute (0-59)
	pub minute: Option<u8>,
	/// Second (0-59)
	pub second: Option<u8>,
}

impl Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:04}", self.year)?;

		let segments = [
			('-', self.month),
			('-', self.day),
			('T', self.hour),
			(':', self.minute),
			(':', self.second),
		];

		// Each segment depends on the previous one
		for (separator, segment) in segments {
			let Some(value) = segment else {
				break;
			};

			write!(f, "{separator}{value:02}")?;
		}

		Ok(())
	}
}

impl FromStr for Timestamp {
	type Err = TagError;

	fn from_str(s: &str) -> Result<Self> {
		Timestamp::parse(s, ParsingMode::BestAttempt)?
			.ok_or_else(|| TagError::new(ErrorKind::BadTimestamp("Timestamp is empty")))
	}
}

impl Timestamp {
	/// The maximum length of a timestamp in bytes
	pub const MAX_LENGTH: usize = 19;

	/// Create a year-only timestamp
	pub fn from_year(year: u16) -> Self {
		Self {
			year,
			..Self::default()
		}
	}

	/// Parse a [`Timestamp`]
	///
	/// A missing or malformed segment ends the timestamp at the previous segment, unless
	/// `parse_mode` is [`ParsingMode::Strict`].
	///
	/// # Errors
	///
	/// * The year is not exactly 4 digits
	/// * [`ParsingMode::Strict`] and any segment is malformed
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::config::ParsingMode;
	/// use tagwright::tag::Timestamp;
	///
	/// # fn main() -> tagwright::error::Result<()> {
	/// let date = Timestamp::parse("2024-06", ParsingMode::Strict)?.unwrap();
	/// assert_eq!(date.year, 2024);
	/// assert_eq!(date.month, Some(6));
	/// assert_eq!(date.day, None);
	/// # Ok(()) }
	/// ```
	pub fn parse(input: &str, parse_mode: ParsingMode) -> Result<Option<Self>> {
		let input = if parse_mode == ParsingMode::Strict {
			input
		} else {
			input.trim()
		};

		if input.is_empty() {
			if parse_mode == ParsingMode::Strict {
				err!(BadTimestamp("Timestamp is empty"))
			}

			return Ok(None);
		}

		let bytes = input.as_bytes();
		if bytes.len() > Self::MAX_LENGTH && parse_mode == ParsingMode::Strict {
			err!(BadTimestamp("Timestamp is too long"))
		}

		if bytes.len() < 4 || !bytes[..4].iter().all(u8::is_ascii_digit) {
			err!(BadTimestamp(
				"Encountered an invalid year length (should be 4 digits)"
			))
		}

		let mut timestamp = Timestamp::from_year(digits_value(&bytes[..4]));
		let mut rest = &bytes[4..];

		let slots: [(u8, &mut Option<u8>); 5] = [
			(b'-', &mut timestamp.month),
			(b'-', &mut timestamp.day),
			(b'T', &mut timestamp.hour),
			(b':', &mut timestamp.minute),
			(b':', &mut timestamp.second),
		];

		for (separator, slot) in slots {
			match Self::segment(&mut rest, separator, parse_mode)? {
				Some(value) => *slot = Some(value),
				None => break,
			}
		}

		if !rest.is_empty() && parse_mode == ParsingMode::Strict {
			err!(BadTimestamp("Timestamp has trailing data"))
		}

		timestamp.verify()?;
		Ok(Some(timestamp))
	}

	// Reads `<separator><2 digits>`, tolerating " 6" and "6" outside of strict mode
	fn segment(rest: &mut &[u8], separator: u8, parse_mode: ParsingMode) -> Result<Option<u8>> {
		let Some((&first, tail)) = rest.split_first() else {
			return Ok(None);
		};

		if first != separator {
			if parse_mode == ParsingMode::Strict {
				err!(BadTimestamp("Expected a separator"))
			}

			return Ok(None);
		}

		let mut consumed = 0;
		let mut value = None;
		for &byte in tail.iter().take(2) {
			match byte {
				b'0'..=b'9' => value = Some(value.unwrap_or(0) * 10 + (byte - b'0')),
				b' ' if parse_mode != ParsingMode::Strict => {},
				_ => break,
			}

			consumed += 1;
		}

		if parse_mode == ParsingMode::Strict && consumed != 2 {
			err!(BadTimestamp("Timestamp segment is too short"))
		}

		match value {
			Some(value) => {
				*rest = &tail[consumed..];
				Ok(Some(value))
			},
			None => Ok(None),
		}
	}

	pub(crate) fn verify(&self) -> Result<()> {
		fn in_range(field: Option<u8>, range: std::ops::RangeInclusive<u8>) -> bool {
			field.is_none_or(|value| range.contains(&value))
		}

		if self.year > 9999
			|| !in_range(self.month, 1..=12)
			|| !in_range(self.day, 1..=31)
			|| !in_range(self.hour, 0..=23)
			|| !in_range(self.minute, 0..=59)
			|| !in_range(self.second, 0..=59)
		{
			err!(BadTimestamp(
				"Timestamp contains segment(s) that exceed their limits"
			))
		}

		Ok(())
	}
}

fn digits_value(digits: &[u8]) -> u16 {
	digits
		.iter()
		.fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'))
}
