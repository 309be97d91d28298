use crate::error::Result;
use crate::id3::v2::frame::content::{encoding_for, verify_encoding};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::FrameId;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

/// An ID3v2 text frame
///
/// Multiple values are kept exactly as stored, separated by `'\0'`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextInformationFrame {
	/// The frame ID
	pub id: FrameId,
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The text itself
	pub value: String,
}

impl TextInformationFrame {
	/// Create a new [`TextInformationFrame`]
	pub fn new(id: FrameId, encoding: TextEncoding, value: impl Into<String>) -> Self {
		Self {
			id,
			encoding,
			value: value.into(),
		}
	}

	/// Read a [`TextInformationFrame`] from a slice
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
	pub fn parse<R>(reader: &mut R, id: FrameId, version: Id3v2Version) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Ok(encoding_byte) = reader.read_u8() else {
			return Ok(None);
		};

		let encoding = verify_encoding(encoding_byte, version)?;
		let value = decode_text(reader, TextDecodeOptions::new().encoding(encoding))?.content;

		Ok(Some(TextInformationFrame {
			id,
			encoding,
			value,
		}))
	}

	/// The individual values of the frame
	pub fn values(&self) -> impl Iterator<Item = &str> {
		self.value.split('\0')
	}

	/// Convert a [`TextInformationFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * `lossy` is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = encoding_for(self.encoding, version);

		let mut content = encoding.encode(&self.value, false, lossy)?;
		content.insert(0, encoding as u8);
		Ok(content)
	}
}
