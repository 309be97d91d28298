use crate::error::Result;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

/// The contents of a popularimeter (`POPM`) frame
///
/// A tag can contain multiple POPM frames, but there must only be
/// one with the same email address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopularimeterFrame {
	/// An email address of the user performing the rating
	pub email: String,
	/// A rating of 1-255, where 1 is the worst and 255 is the best.
	/// A rating of 0 is unknown.
	pub rating: u8,
	/// A play counter for the user. It is to be incremented each time the file is played.
	pub counter: u64,
}

impl PopularimeterFrame {
	/// Create a new [`PopularimeterFrame`]
	pub fn new(email: impl Into<String>, rating: u8, counter: u64) -> Self {
		Self {
			email: email.into(),
			rating,
			counter,
		}
	}

	/// Read a [`PopularimeterFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Email is improperly encoded
	/// * Rating is missing
	pub fn parse<R>(reader: &mut R) -> Result<Self>
	where
		R: Read,
	{
		let email = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(TextEncoding::Latin1)
				.terminated(true),
		)?;
		let rating = reader.read_u8()?;

		let mut counter_content = Vec::new();
		reader.read_to_end(&mut counter_content)?;

		let counter;
		let remaining_size = counter_content.len();
		if remaining_size > 8 {
			counter = u64::MAX;
		} else {
			let mut counter_bytes = [0; 8];
			let counter_start_pos = 8 - remaining_size;

			counter_bytes[counter_start_pos..].copy_from_slice(&counter_content);
			counter = u64::from_be_bytes(counter_bytes);
		}

		Ok(Self {
			email: email.content,
			rating,
			counter,
		})
	}

	/// Convert a [`PopularimeterFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * `lossy` is disabled and the email contains characters outside of Latin-1
	pub fn as_bytes(&self, lossy: bool) -> Result<Vec<u8>> {
		let mut content = Vec::with_capacity(self.email.len() + 9);
		content.extend(TextEncoding::Latin1.encode(&self.email, true, lossy)?);
		content.push(self.rating);

		// When the counter reaches all one's, one byte is inserted in front of the counter
		// thus making the counter eight bits bigger
		if let Ok(counter) = u32::try_from(self.counter) {
			content.extend(counter.to_be_bytes());
		} else {
			let counter_bytes = self.counter.to_be_bytes();
			let i = counter_bytes.iter().position(|b| *b != 0).unwrap_or(4);

			content.extend(&counter_bytes[i..]);
		}

		Ok(content)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_popm(popm: &PopularimeterFrame) {
		let email = popm.email.clone();
		let counter = popm.counter;

		let popm_bytes = popm.as_bytes(false).unwrap();
		assert_eq!(&popm_bytes[..email.len()], email.as_bytes());
		assert_eq!(popm_bytes[email.len()], 0);
		assert_eq!(popm_bytes[email.len() + 1], popm.rating);

		let counter_len = if u32::try_from(counter).is_ok() {
			4
		} else {
			let counter_bytes = counter.to_be_bytes();
			let i = counter_bytes.iter().position(|b| *b != 0).unwrap_or(4);
			counter_bytes.len() - i
		};

		assert_eq!(popm_bytes[email.len() + 2..].len(), counter_len);
		assert_eq!(&PopularimeterFrame::parse(&mut &popm_bytes[..]).unwrap(), popm);
	}

	#[test_log::test]
	fn write_popm() {
		test_popm(&PopularimeterFrame::new("foo@bar.com", 255, u64::from(u32::MAX)));
		test_popm(&PopularimeterFrame::new("baz@qux.com", 196, u64::from(u32::MAX) + 1));
	}
}
