use super::decode_following;
use crate::error::Result;
use crate::id3::v2::frame::content::{encoding_for, verify_encoding};
use crate::id3::v2::header::Id3v2Version;
use crate::macros::id3v2_err;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

/// A text frame with a language, used for both `COMM` and `USLT`
///
/// Similar to `TXXX` and `WXXX` frames, these are told apart by their descriptions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageFrame {
	/// The encoding of the description and content
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
}

impl LanguageFrame {
	/// The language written when none is known
	pub const UNKNOWN_LANGUAGE: [u8; 3] = *b"XXX";

	/// Create a new [`LanguageFrame`]
	pub fn new(
		encoding: TextEncoding,
		language: [u8; 3],
		description: impl Into<String>,
		content: impl Into<String>,
	) -> Self {
		Self {
			encoding,
			language,
			description: description.into(),
			content: content.into(),
		}
	}

	/// Read a [`LanguageFrame`] from a slice
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

		let mut language = [0; 3];
		reader.read_exact(&mut language)?;

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;
		let content = decode_following(reader, encoding, &description, false)?.content;

		Ok(Some(Self {
			encoding,
			language,
			description: description.content,
			content,
		}))
	}

	/// Convert a [`LanguageFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// * `language` contains invalid characters (Only `'a'..='z'` and `'A'..='Z'` allowed)
	/// * `lossy` is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		if !is_valid_language(self.language) {
			id3v2_err!(InvalidLanguage(self.language));
		}

		let encoding = encoding_for(self.encoding, version);

		let mut bytes = vec![encoding as u8];
		bytes.extend(self.language);
		bytes.extend(encoding.encode(&self.description, true, lossy)?);
		bytes.extend(encoding.encode(&self.content, false, lossy)?);

		Ok(bytes)
	}
}

pub(crate) fn is_valid_language(language: [u8; 3]) -> bool {
	language.iter().all(u8::is_ascii_alphabetic)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn comment_round_trip() {
		let frame = LanguageFrame::new(TextEncoding::Latin1, *b"eng", "", "A comment");
		let bytes = frame.as_bytes(Id3v2Version::V4, false).unwrap();
		assert_eq!(bytes, b"\x00eng\x00A comment");

		let parsed = LanguageFrame::parse(&mut &bytes[..], Id3v2Version::V4)
			.unwrap()
			.unwrap();
		assert_eq!(parsed, frame);
	}

	#[test_log::test]
	fn bad_language() {
		let frame = LanguageFrame::new(TextEncoding::Latin1, [0, 0, 0], "", "Lyrics");
		assert!(frame.as_bytes(Id3v2Version::V4, false).is_err());

		// Accepted on read
		let parsed = LanguageFrame::parse(&mut &b"\x00\x00\x00\x00\x00Lyrics"[..], Id3v2Version::V3)
			.unwrap()
			.unwrap();
		assert_eq!(parsed.content, "Lyrics");
	}
}
