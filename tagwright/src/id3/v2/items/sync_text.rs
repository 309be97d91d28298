use super::decode_following;
use crate::error::{Id3v2ErrorKind, Result, TagError};
use crate::id3::v2::frame::content::{encoding_for, verify_encoding};
use crate::id3::v2::header::Id3v2Version;
use crate::macros::id3v2_err;
use crate::tag::LyricsContentType;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

/// The unit used for [`SynchronizedTextFrame`] timestamps
#[derive(Copy, Clone, PartialEq, Debug, Eq, Hash)]
#[repr(u8)]
pub enum TimestampFormat {
	/// The unit is MPEG frames
	MPEG = 1,
	/// The unit is milliseconds
	MS = 2,
}

impl TimestampFormat {
	/// Get a `TimestampFormat` from a u8, must be 1-2 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			1 => Some(Self::MPEG),
			2 => Some(Self::MS),
			_ => None,
		}
	}
}

/// An ID3v2 synchronized lyrics/text frame (`SYLT`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynchronizedTextFrame {
	/// The text encoding (description/text)
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// The format of the timestamps
	pub timestamp_format: TimestampFormat,
	/// The type of content stored
	pub content_type: LyricsContentType,
	/// Unique content description
	pub description: String,
	/// Collection of timestamps and text
	pub content: Vec<(u32, String)>,
}

impl SynchronizedTextFrame {
	/// Read a [`SynchronizedTextFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// This function will return [`BadSyncText`][Id3v2ErrorKind::BadSyncText] if at any point
	/// it's unable to parse the data
	pub fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		let encoding = verify_encoding(reader.read_u8()?, version)?;

		let mut language = [0; 3];
		reader.read_exact(&mut language)?;

		let Some(timestamp_format) = TimestampFormat::from_u8(reader.read_u8()?) else {
			id3v2_err!(BadTimestampFormat);
		};
		let Some(content_type) = LyricsContentType::from_u8(reader.read_u8()?) else {
			id3v2_err!(BadSyncText);
		};

		let mut last = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)
		.map_err(|_| bad_sync_text())?;
		let description = std::mem::take(&mut last.content);

		let mut content = Vec::new();
		loop {
			let text = decode_following(reader, encoding, &last, true).map_err(|_| bad_sync_text())?;
			if text.bytes_read == 0 {
				break;
			}

			let time = reader
				.read_u32::<BigEndian>()
				.map_err(|_| bad_sync_text())?;

			if text.bom != [0, 0] {
				last.bom = text.bom;
			}

			content.push((time, text.content));
		}

		Ok(Self {
			encoding,
			language,
			timestamp_format,
			content_type,
			description,
			content,
		})
	}

	/// Convert a [`SynchronizedTextFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * `lossy` is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = encoding_for(self.encoding, version);

		let mut data = vec![encoding as u8];
		data.extend(self.language);
		data.push(self.timestamp_format as u8);
		data.push(self.content_type as u8);
		data.extend(encoding.encode(&self.description, true, lossy)?);

		for (time, text) in &self.content {
			data.extend(encoding.encode(text, true, lossy)?);
			data.extend(time.to_be_bytes());
		}

		Ok(data)
	}
}

fn bad_sync_text() -> TagError {
	TagError::from(Id3v2ErrorKind::BadSyncText)
}
