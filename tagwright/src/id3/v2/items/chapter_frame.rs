use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::frame::read::ParsedFrame;
use crate::id3::v2::frame::{Frame, encode_frames};
use crate::id3::v2::header::Id3v2Version;
use crate::macros::id3v2_err;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use byteorder::{BigEndian, ReadBytesExt};

/// An ID3v2 chapter frame (`CHAP`)
///
/// Chapter titles, subtitles, links and pictures are stored as embedded frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterFrame {
	/// Identifier referenced by [`TableOfContentsFrame`](super::TableOfContentsFrame)s
	pub element_id: String,
	/// Start of the chapter, in milliseconds
	pub start_time: u32,
	/// End of the chapter, in milliseconds
	pub end_time: u32,
	/// Byte offset of the chapter start, `0xFFFFFFFF` when unused
	pub start_offset: u32,
	/// Byte offset of the chapter end, `0xFFFFFFFF` when unused
	pub end_offset: u32,
	/// Embedded frames
	pub frames: Vec<Frame>,
}

impl ChapterFrame {
	/// Read a [`ChapterFrame`] from a slice
	///
	/// Embedded frames are read with the same rules as top level frames.
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * The element ID is empty
	/// * There isn't enough data for the times and offsets
	/// * An embedded frame fails to parse in [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
	pub fn parse(
		reader: &mut &[u8],
		version: Id3v2Version,
		parse_options: ParseOptions,
	) -> Result<Self> {
		let element_id = read_element_id(reader)?;

		let start_time = reader.read_u32::<BigEndian>()?;
		let end_time = reader.read_u32::<BigEndian>()?;
		let start_offset = reader.read_u32::<BigEndian>()?;
		let end_offset = reader.read_u32::<BigEndian>()?;

		let frames = read_embedded_frames(reader, version, parse_options)?;

		Ok(Self {
			element_id,
			start_time,
			end_time,
			start_offset,
			end_offset,
			frames,
		})
	}

	/// Convert a [`ChapterFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * The element ID is empty
	/// * An embedded frame fails to encode
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let mut bytes = encode_element_id(&self.element_id, lossy)?;
		bytes.extend(self.start_time.to_be_bytes());
		bytes.extend(self.end_time.to_be_bytes());
		bytes.extend(self.start_offset.to_be_bytes());
		bytes.extend(self.end_offset.to_be_bytes());
		bytes.extend(encode_frames(&self.frames, version, lossy)?);

		Ok(bytes)
	}
}

pub(super) fn read_element_id(reader: &mut &[u8]) -> Result<String> {
	let element_id = decode_text(
		reader,
		TextDecodeOptions::new()
			.encoding(TextEncoding::Latin1)
			.terminated(true),
	)?;

	match element_id.text_or_none() {
		Some(element_id) => Ok(element_id),
		None => id3v2_err!(MissingElementId),
	}
}

pub(super) fn encode_element_id(element_id: &str, lossy: bool) -> Result<Vec<u8>> {
	if element_id.is_empty() {
		id3v2_err!(MissingElementId);
	}

	Ok(TextEncoding::Latin1.encode(element_id, true, lossy)?)
}

pub(super) fn read_embedded_frames(
	reader: &mut &[u8],
	version: Id3v2Version,
	parse_options: ParseOptions,
) -> Result<Vec<Frame>> {
	let mut frames = Vec::new();
	loop {
		match ParsedFrame::read(reader, version, parse_options)? {
			ParsedFrame::Next(frame) => frames.push(frame),
			ParsedFrame::Skip => {},
			ParsedFrame::Eof => break,
		}
	}

	Ok(frames)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::id3::v2::FrameId;
	use crate::id3::v2::items::TextInformationFrame;

	#[test_log::test]
	fn chapter_round_trip() {
		let chapter = ChapterFrame {
			element_id: String::from("ch0"),
			start_time: 0,
			end_time: 5000,
			start_offset: u32::MAX,
			end_offset: u32::MAX,
			frames: vec![Frame::Text(TextInformationFrame::new(
				FrameId::new("TIT2").unwrap(),
				TextEncoding::Latin1,
				"Intro",
			))],
		};

		let bytes = chapter.as_bytes(Id3v2Version::V4, false).unwrap();
		assert_eq!(&bytes[..4], b"ch0\x00");
		assert_eq!(&bytes[20..24], b"TIT2");

		let parsed =
			ChapterFrame::parse(&mut &bytes[..], Id3v2Version::V4, ParseOptions::new()).unwrap();
		assert_eq!(parsed, chapter);
	}

	#[test_log::test]
	fn missing_element_id() {
		let bytes = [0; 17];
		assert!(ChapterFrame::parse(&mut &bytes[..], Id3v2Version::V4, ParseOptions::new()).is_err());
	}
}
