use crate::error::Result;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// An ID3v2 private frame (`PRIV`)
///
/// This frame is used to contain information from a software producer that
/// its program uses and does not fit into the other frames.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PrivateFrame {
	/// A URL containing an email address, or a link to a location where an email can be found,
	/// that belongs to the organisation responsible for the frame
	pub owner: String,
	/// Binary data
	pub private_data: Vec<u8>,
}

impl PrivateFrame {
	/// Create a new [`PrivateFrame`]
	pub fn new(owner: impl Into<String>, private_data: Vec<u8>) -> Self {
		Self {
			owner: owner.into(),
			private_data,
		}
	}

	/// Read a [`PrivateFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Failure to read from `reader`
	pub fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Ok(owner) = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(TextEncoding::Latin1)
				.terminated(true),
		) else {
			return Ok(None);
		};

		let mut private_data = Vec::new();
		reader.read_to_end(&mut private_data)?;

		Ok(Some(PrivateFrame {
			owner: owner.content,
			private_data,
		}))
	}

	/// Convert a [`PrivateFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * `lossy` is disabled and the owner contains characters outside of Latin-1
	pub fn as_bytes(&self, lossy: bool) -> Result<Vec<u8>> {
		let mut content = Vec::with_capacity(self.owner.len() + 1 + self.private_data.len());
		content.extend(TextEncoding::Latin1.encode(&self.owner, true, lossy)?);
		content.extend_from_slice(&self.private_data);

		Ok(content)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn priv_round_trip() {
		let bytes = b"foo@bar.com\x00some data";

		let parsed = PrivateFrame::parse(&mut &bytes[..]).unwrap().unwrap();
		assert_eq!(
			parsed,
			PrivateFrame::new("foo@bar.com", b"some data".to_vec())
		);
		assert_eq!(parsed.as_bytes(false).unwrap(), bytes);
	}
}
