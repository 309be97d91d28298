use super::chapter_frame::{encode_element_id, read_element_id, read_embedded_frames};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::frame::{Frame, encode_frames};
use crate::id3::v2::header::Id3v2Version;
use crate::macros::id3v2_err;

use byteorder::ReadBytesExt;

const FLAG_TOP_LEVEL: u8 = 0x02;
const FLAG_ORDERED: u8 = 0x01;

/// An ID3v2 table of contents frame (`CTOC`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableOfContentsFrame {
	/// Unique identifier of the table
	pub element_id: String,
	/// Whether this is the root of the chapter hierarchy
	pub top_level: bool,
	/// Whether the children are in playback order
	pub ordered: bool,
	/// Element IDs of the chapters (or nested tables) in this table
	pub children: Vec<String>,
	/// Embedded frames, usually just a `TIT2` with the table description
	pub frames: Vec<Frame>,
}

impl TableOfContentsFrame {
	/// Read a [`TableOfContentsFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * An element ID is empty
	/// * There are fewer children than declared
	/// * An embedded frame fails to parse in [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
	pub fn parse(
		reader: &mut &[u8],
		version: Id3v2Version,
		parse_options: ParseOptions,
	) -> Result<Self> {
		let element_id = read_element_id(reader)?;

		let flags = reader.read_u8()?;
		let entry_count = reader.read_u8()?;

		let mut children = Vec::with_capacity(usize::from(entry_count));
		for _ in 0..entry_count {
			children.push(read_element_id(reader)?);
		}

		let frames = read_embedded_frames(reader, version, parse_options)?;

		Ok(Self {
			element_id,
			top_level: flags & FLAG_TOP_LEVEL == FLAG_TOP_LEVEL,
			ordered: flags & FLAG_ORDERED == FLAG_ORDERED,
			children,
			frames,
		})
	}

	/// Convert a [`TableOfContentsFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * An element ID is empty
	/// * There are more than 255 children
	/// * An embedded frame fails to encode
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let Ok(entry_count) = u8::try_from(self.children.len()) else {
			id3v2_err!(TooManyChapters(self.children.len()));
		};

		let mut flags = 0;
		if self.top_level {
			flags |= FLAG_TOP_LEVEL;
		}
		if self.ordered {
			flags |= FLAG_ORDERED;
		}

		let mut bytes = encode_element_id(&self.element_id, lossy)?;
		bytes.push(flags);
		bytes.push(entry_count);

		for child in &self.children {
			bytes.extend(encode_element_id(child, lossy)?);
		}

		bytes.extend(encode_frames(&self.frames, version, lossy)?);

		Ok(bytes)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn toc_round_trip() {
		let toc = TableOfContentsFrame {
			element_id: String::from("toc"),
			top_level: true,
			ordered: true,
			children: vec![String::from("ch0"), String::from("ch1")],
			frames: Vec::new(),
		};

		let bytes = toc.as_bytes(Id3v2Version::V3, false).unwrap();
		assert_eq!(bytes, b"toc\x00\x03\x02ch0\x00ch1\x00");

		let parsed =
			TableOfContentsFrame::parse(&mut &bytes[..], Id3v2Version::V3, ParseOptions::new())
				.unwrap();
		assert_eq!(parsed, toc);
	}

	#[test_log::test]
	fn too_many_children() {
		let toc = TableOfContentsFrame {
			element_id: String::from("toc"),
			top_level: true,
			ordered: true,
			children: (0..256).map(|i| format!("ch{i}")).collect(),
			frames: Vec::new(),
		};

		assert!(toc.as_bytes(Id3v2Version::V4, false).is_err());
	}
}
