use super::frame::read::ParsedFrame;
use super::header::{Id3v2Header, Id3v2Version};
use super::tag::Id3v2Tag;
use super::util::synchsafe::UnsynchronizedStream;
use crate::config::ParseOptions;
use crate::id3::Id3v2Location;
use crate::error::Result;
use crate::util::alloc::VecFallibleCapacity;

use std::io::Read;

/// Read the frame area of a tag, the reader must be positioned right after the extended header
pub(crate) fn read_frame_area<R>(reader: &mut R, header: &Id3v2Header) -> Result<Vec<u8>>
where
	R: Read,
{
	let frames_size = header.size.saturating_sub(header.extended_size);

	let mut content = Vec::try_with_capacity_stable(frames_size as usize)?;
	reader
		.take(u64::from(frames_size))
		.read_to_end(&mut content)?;

	if content.len() < frames_size as usize {
		log::warn!(
			"Tag declares {frames_size} bytes of frames, but the stream ends after {}",
			content.len()
		);
	}

	Ok(content)
}

pub(crate) fn parse_id3v2(
	content: &[u8],
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag> {
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	// ID3v2.4 marks unsynchronisation on every frame, earlier versions apply it to the whole tag
	let restored;
	let mut frames = if header.flags.unsynchronisation && header.version != Id3v2Version::V4 {
		let mut buf = Vec::with_capacity(content.len());
		UnsynchronizedStream::new(content).read_to_end(&mut buf)?;
		restored = buf;
		&restored[..]
	} else {
		content
	};

	let mut tag = Id3v2Tag::default();
	tag.original_version = header.version;
	tag.flags = header.flags;

	loop {
		match ParsedFrame::read(&mut frames, header.version, parse_options)? {
			ParsedFrame::Next(frame) => tag.frames.push(frame),
			ParsedFrame::Skip => {},
			ParsedFrame::Eof => break,
		}
	}

	log::debug!("Read {} frames", tag.frames.len());
	Ok(tag)
}

/// Read the tag found at `location`, the reader must be positioned right after its header
///
/// I/O errors are returned, a tag that fails to decode is logged and reported as missing.
pub(crate) fn read_located<R>(
	reader: &mut R,
	location: &Id3v2Location,
	parse_options: ParseOptions,
) -> Result<Option<Id3v2Tag>>
where
	R: Read,
{
	let content = read_frame_area(reader, &location.header)?;
	match parse_id3v2(&content, location.header, parse_options) {
		Ok(tag) => Ok(Some(tag)),
		Err(err) => {
			log::error!(
				"Failed to read the ID3v2 tag at offset {}: {err}",
				location.offset
			);
			Ok(None)
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ParsingMode;
	use crate::id3::find_id3v2;
	use crate::id3::v2::Frame;

	use std::io::Cursor;

	#[test_log::test]
	fn zero_size_tag() {
		let mut reader = &b"ID3\x04\x00\x00\x00\x00\x00\x00"[..];
		let header = Id3v2Header::parse(&mut reader).unwrap();
		let content = read_frame_area(&mut reader, &header).unwrap();

		let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
		let tag = parse_id3v2(&content, header, strict).unwrap();
		assert!(tag.frames.is_empty());
	}

	#[test_log::test]
	fn whole_tag_unsynchronisation() {
		// TIT2 "\xFF\xE0", with a 0x00 inserted after the 0xFF
		let mut bytes = b"ID3\x03\x00\x80\x00\x00\x00\x0E".to_vec();
		bytes.extend_from_slice(b"TIT2\x00\x00\x00\x03\x00\x00\x00\xFF\x00\xE0");

		let mut reader = Cursor::new(bytes);
		let location = find_id3v2(&mut reader, 0).unwrap().unwrap();
		let tag = read_located(&mut reader, &location, ParseOptions::new())
			.unwrap()
			.unwrap();

		let [Frame::Text(frame)] = &tag.frames[..] else {
			panic!("Expected a single text frame");
		};
		assert_eq!(frame.value, "\u{FF}\u{E0}");
	}

	#[test_log::test]
	fn strict_failures_are_reported_as_missing() {
		// A frame with an invalid ID
		let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x0B".to_vec();
		bytes.extend_from_slice(b"ti!2\x00\x00\x00\x01\x00\x00\x00");

		let mut reader = Cursor::new(bytes);
		let location = find_id3v2(&mut reader, 0).unwrap().unwrap();

		let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
		assert!(read_located(&mut reader, &location, strict).unwrap().is_none());
	}
}
