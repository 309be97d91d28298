use super::content::parse_content;
use super::header::{FrameHeader, HeaderResult};
use super::{Frame, FrameFlags};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{Id3v2ErrorKind, Result, TagError};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::synchsafe::{SynchsafeInteger, UnsynchronizedStream};
use crate::macros::id3v2_err;

use std::borrow::Cow;
use std::io::Read;

pub(crate) enum ParsedFrame {
	Next(Frame),
	Skip,
	Eof,
}

impl ParsedFrame {
	/// Read the next frame from `content`, advancing it past the frame
	///
	/// A frame that can't be decoded is skipped, unless the parsing mode is strict. A frame that
	/// claims more bytes than `content` holds ends the frame stream.
	pub(crate) fn read(
		content: &mut &[u8],
		version: Id3v2Version,
		parse_options: ParseOptions,
	) -> Result<Self> {
		let parse_mode = parse_options.parsing_mode;

		let header = match FrameHeader::parse(content, version, parse_options) {
			HeaderResult::End => return Ok(Self::Eof),
			HeaderResult::BadId { id, size } => {
				if parse_mode == ParsingMode::Strict {
					id3v2_err!(BadFrameId(id));
				}

				log::warn!("Found a frame with an invalid ID ({id:x?}), skipping");
				return Ok(skip(content, size));
			},
			HeaderResult::Frame(header) => header,
		};

		let size = header.size as usize;
		if size > content.len() {
			let err = Id3v2ErrorKind::FrameOverrun {
				declared: header.size,
				remaining: content.len() as u64,
			};

			if parse_mode == ParsingMode::Strict {
				return Err(err.into());
			}

			log::warn!("Frame `{}`: {err}, discarding the rest of the tag", header.id);
			*content = &[];
			return Ok(Self::Eof);
		}

		let (body, rest) = content.split_at(size);
		*content = rest;

		if !parse_options.read_cover_art && header.id == "APIC" {
			log::trace!("Skipping picture frame");
			return Ok(Self::Skip);
		}

		if size == 0 {
			if parse_mode == ParsingMode::Strict {
				id3v2_err!(EmptyFrame(header.id));
			}

			log::debug!("Encountered a zero length frame `{}`, skipping", header.id);
			return Ok(Self::Skip);
		}

		let frame = decode_body(body, header.flags, version).and_then(|body| match body {
			Some(body) => parse_content(&body, &header.id, version, parse_options),
			None => Ok(None),
		});

		match frame {
			Ok(Some(frame)) => Ok(Self::Next(frame)),
			Ok(None) => Ok(Self::Skip),
			Err(err) if parse_mode == ParsingMode::Strict => Err(err),
			Err(err) => {
				log::warn!("Failed to read frame `{}`, skipping: {err}", header.id);
				Ok(Self::Skip)
			},
		}
	}
}

fn skip(content: &mut &[u8], size: u32) -> ParsedFrame {
	let size = size as usize;
	if size > content.len() {
		*content = &[];
		return ParsedFrame::Eof;
	}

	*content = &content[size..];
	ParsedFrame::Skip
}

fn take_u8(body: &mut &[u8]) -> Result<u8> {
	let Some((&byte, rest)) = body.split_first() else {
		id3v2_err!(BadFrameLength);
	};

	*body = rest;
	Ok(byte)
}

fn take_u32(body: &mut &[u8]) -> Result<u32> {
	if body.len() < 4 {
		id3v2_err!(BadFrameLength);
	}

	let (bytes, rest) = body.split_at(4);
	*body = rest;
	Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Strip the extra header bytes and undo unsynchronisation and compression
///
/// Returns `None` for encrypted frames, as the encryption methods are not known.
fn decode_body(
	mut body: &[u8],
	flags: FrameFlags,
	version: Id3v2Version,
) -> Result<Option<Cow<'_, [u8]>>> {
	let mut data_length = None;

	// The extra bytes are stored in flag order, which differs between versions
	if version == Id3v2Version::V4 {
		if flags.grouping_identity {
			log::trace!("Skipping group identifier");
			take_u8(&mut body)?;
		}

		if flags.encryption {
			take_u8(&mut body)?;
		}

		if flags.data_length_indicator {
			data_length = Some(take_u32(&mut body)?.unsynch());
		}
	} else {
		if flags.data_length_indicator {
			data_length = Some(take_u32(&mut body)?);
		}

		if flags.encryption {
			take_u8(&mut body)?;
		}

		if flags.grouping_identity {
			log::trace!("Skipping group identifier");
			take_u8(&mut body)?;
		}
	}

	if body.is_empty() {
		id3v2_err!(BadFrameLength);
	}

	if flags.encryption {
		log::warn!("Encountered an encrypted frame, skipping");
		return Ok(None);
	}

	let mut body = Cow::Borrowed(body);

	if flags.unsynchronisation {
		let mut restored = Vec::with_capacity(body.len());
		UnsynchronizedStream::new(&body[..]).read_to_end(&mut restored)?;
		body = Cow::Owned(restored);
	}

	if flags.compression {
		let Some(data_length) = data_length else {
			id3v2_err!(MissingDataLengthIndicator);
		};

		body = Cow::Owned(decompress(&body, data_length)?);
	}

	Ok(Some(body))
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress(body: &[u8], data_length: u32) -> Result<Vec<u8>> {
	use crate::util::alloc::VecFallibleCapacity;

	let mut decompressed = Vec::try_with_capacity_stable(data_length as usize)?;
	flate2::Decompress::new(true)
		.decompress_vec(body, &mut decompressed, flate2::FlushDecompress::Finish)
		.map_err(|err| TagError::from(Id3v2ErrorKind::Decompression(err)))?;

	Ok(decompressed)
}

#[cfg(not(feature = "id3v2_compression_support"))]
fn decompress(_: &[u8], _: u32) -> Result<Vec<u8>> {
	Err(TagError::from(Id3v2ErrorKind::CompressedFrameEncountered))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::id3::v2::items::TextInformationFrame;

	fn read_all(mut content: &[u8], version: Id3v2Version) -> Vec<Frame> {
		let mut frames = Vec::new();
		loop {
			match ParsedFrame::read(&mut content, version, ParseOptions::new()).unwrap() {
				ParsedFrame::Next(frame) => frames.push(frame),
				ParsedFrame::Skip => {},
				ParsedFrame::Eof => break,
			}
		}

		frames
	}

	#[test_log::test]
	fn overrun_keeps_earlier_frames() {
		let mut content = b"TIT2\x00\x00\x00\x03\x00\x00\x00Hi".to_vec();
		content.extend_from_slice(b"TALB\x00\x00\x00\x50\x00\x00\x00Album");

		let frames = read_all(&content, Id3v2Version::V3);
		assert_eq!(frames.len(), 1);
		assert_eq!(frames[0].id(), "TIT2");

		let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
		let mut reader = &content[..];
		assert!(ParsedFrame::read(&mut reader, Id3v2Version::V3, strict).is_ok());
		assert!(ParsedFrame::read(&mut reader, Id3v2Version::V3, strict).is_err());
	}

	#[test_log::test]
	fn unsynchronised_v4_frame() {
		// Data length indicator + unsynchronisation
		let content = b"TIT2\x00\x00\x00\x09\x00\x03\x00\x00\x00\x04\x00\xFF\x00\xFFz";

		let frames = read_all(content, Id3v2Version::V4);
		let Frame::Text(TextInformationFrame { value, .. }) = &frames[0] else {
			panic!("Expected a text frame");
		};

		assert_eq!(value, "\u{FF}\u{FF}z");
	}

	#[test_log::test]
	#[cfg(feature = "id3v2_compression_support")]
	fn compressed_v3_frame() {
		use std::io::Write;

		let mut encoder =
			flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
		encoder.write_all(b"\x00Compressed").unwrap();
		let compressed = encoder.finish().unwrap();

		let mut content = b"TIT2".to_vec();
		content.extend_from_slice(&(compressed.len() as u32 + 4).to_be_bytes());
		content.extend_from_slice(&[0x00, 0x80]);
		content.extend_from_slice(&11u32.to_be_bytes());
		content.extend_from_slice(&compressed);

		let frames = read_all(&content, Id3v2Version::V3);
		assert_eq!(
			frames,
			[Frame::Text(TextInformationFrame::new(
				crate::id3::v2::FrameId::new("TIT2").unwrap(),
				crate::util::text::TextEncoding::Latin1,
				"Compressed"
			))]
		);
	}

	#[test_log::test]
	fn encrypted_frames_are_skipped() {
		let content = b"TIT2\x00\x00\x00\x03\x00\x40\x80\x00A";
		assert!(read_all(content, Id3v2Version::V3).is_empty());
	}
}
