use crate::error::Result;
use crate::id3::v2::FrameId;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// An ID3v2 URL frame (`W***`)
///
/// URL frames never carry a text encoding byte, the URL is always Latin-1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlLinkFrame {
	/// The frame ID
	pub id: FrameId,
	/// The URL
	pub url: String,
}

impl UrlLinkFrame {
	/// Create a new [`UrlLinkFrame`]
	pub fn new(id: FrameId, url: impl Into<String>) -> Self {
		Self {
			id,
			url: url.into(),
		}
	}

	/// Read an [`UrlLinkFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Unable to read the content
	pub fn parse<R>(reader: &mut R, id: FrameId) -> Result<Option<Self>>
	where
		R: Read,
	{
		let url = decode_text(
			reader,
			TextDecodeOptions::new().encoding(TextEncoding::Latin1),
		)?;
		if url.bytes_read == 0 {
			return Ok(None);
		}

		Ok(Some(UrlLinkFrame {
			id,
			url: url.content,
		}))
	}

	/// Convert an [`UrlLinkFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * `lossy` is disabled and the URL contains characters outside of Latin-1
	pub fn as_bytes(&self, lossy: bool) -> Result<Vec<u8>> {
		Ok(TextEncoding::Latin1.encode(&self.url, false, lossy)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn no_encoding_byte() {
		let frame = UrlLinkFrame::new(FrameId::new("WOAR").unwrap(), "https://example.com");
		assert_eq!(frame.as_bytes(false).unwrap(), b"https://example.com");

		let parsed = UrlLinkFrame::parse(&mut &b"https://example.com"[..], frame.id.clone())
			.unwrap()
			.unwrap();
		assert_eq!(parsed, frame);
	}
}
