use super::decode_following;
use crate::error::Result;
use crate::id3::v2::frame::content::{encoding_for, verify_encoding};
use crate::id3::v2::header::Id3v2Version;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

/// An extended ID3v2 text frame (`TXXX`)
///
/// This is used to store user defined text, told apart by the description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedTextFrame {
	/// The encoding of the description and content
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
}

impl ExtendedTextFrame {
	/// Create a new [`ExtendedTextFrame`]
	pub fn new(
		encoding: TextEncoding,
		description: impl Into<String>,
		content: impl Into<String>,
	) -> Self {
		Self {
			encoding,
			description: description.into(),
			content: content.into(),
		}
	}

	/// Read an [`ExtendedTextFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Unable to decode the text
	///
	/// ID3v2.2:
	///
	/// * The encoding is not [`TextEncoding::Latin1`] or [`TextEncoding::UTF16`]
	pub fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Ok(encoding_byte) = reader.read_u8() else {
			return Ok(None);
		};

		let encoding = verify_encoding(encoding_byte, version)?;
		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;

		// It's possible for the description to be the only string with a BOM
		let content = decode_following(reader, encoding, &description, false)?.content;

		Ok(Some(ExtendedTextFrame {
			encoding,
			description: description.content,
			content,
		}))
	}

	/// Convert an [`ExtendedTextFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * `lossy` is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = encoding_for(self.encoding, version);

		let mut bytes = vec![encoding as u8];
		bytes.extend(encoding.encode(&self.description, true, lossy)?);
		bytes.extend(encoding.encode(&self.content, false, lossy)?);

		Ok(bytes)
	}
}
