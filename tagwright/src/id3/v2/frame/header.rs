use super::{FrameFlags, FrameId};
use crate::config::ParseOptions;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::id3::v2::util::upgrade::{upgrade_v2, upgrade_v3};

/// A parsed frame header
///
/// The ID is upgraded to ID3v2.4 where a mapping exists. IDs without a mapping keep their
/// original form, and may be 3 characters long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrameHeader {
	pub id: String,
	pub size: u32,
	pub flags: FrameFlags,
}

pub(crate) enum HeaderResult {
	Frame(FrameHeader),
	/// Hit padding or the end of the tag
	End,
	/// The ID is invalid, but the size is usable
	BadId { id: Vec<u8>, size: u32 },
}

impl FrameHeader {
	pub(crate) fn len(version: Id3v2Version) -> usize {
		match version {
			Id3v2Version::V2 => 6,
			Id3v2Version::V3 | Id3v2Version::V4 => 10,
		}
	}

	pub(crate) fn parse(
		content: &mut &[u8],
		version: Id3v2Version,
		parse_options: ParseOptions,
	) -> HeaderResult {
		let header_len = Self::len(version);
		if content.len() < header_len || content[0] == 0 {
			return HeaderResult::End;
		}

		let (header, rest) = content.split_at(header_len);
		*content = rest;

		let (id_bytes, size, flags) = match version {
			Id3v2Version::V2 => (
				&header[..3],
				u32::from_be_bytes([0, header[3], header[4], header[5]]),
				FrameFlags::default(),
			),
			Id3v2Version::V3 => {
				let size = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
				let flags = FrameFlags::parse_id3v23(u16::from_be_bytes([header[8], header[9]]));

				// Some apps write ID3v2.2 IDs in ID3v2.3 frame headers
				if header[3] == 0 {
					log::warn!("Found an ID3v2.2 frame ID in an ID3v2.3 tag, attempting to upgrade");
					(&header[..3], size, flags)
				} else {
					(&header[..4], size, flags)
				}
			},
			Id3v2Version::V4 => (
				&header[..4],
				v4_frame_size([header[4], header[5], header[6], header[7]], rest),
				FrameFlags::parse_id3v24(u16::from_be_bytes([header[8], header[9]])),
			),
		};

		if !FrameId::is_valid_chars(id_bytes) {
			return HeaderResult::BadId {
				id: id_bytes.to_vec(),
				size,
			};
		}

		// Only `A-Z0-9` at this point
		let id = String::from_utf8_lossy(id_bytes);
		let upgraded = match id.len() {
			3 => upgrade_v2(&id),
			_ if version == Id3v2Version::V3 && parse_options.implicit_conversions => {
				upgrade_v3(&id)
			},
			_ => None,
		};

		HeaderResult::Frame(FrameHeader {
			id: upgraded.map_or_else(|| id.into_owned(), str::to_owned),
			size,
			flags,
		})
	}
}

// Some encoders write plain integers as ID3v2.4 frame sizes. The synchsafe reading is kept
// unless it is impossible, or only the plain reading lands on another frame or padding.
fn v4_frame_size(raw: [u8; 4], rest: &[u8]) -> u32 {
	let plain = u32::from_be_bytes(raw);
	if raw.iter().any(|b| b & 0x80 != 0) {
		log::warn!("ID3v2.4 frame size is not synchsafe, reading it as a plain integer");
		return plain;
	}

	let synchsafe = plain.unsynch();
	if synchsafe == plain || lands_on_boundary(rest, synchsafe) || !lands_on_boundary(rest, plain) {
		return synchsafe;
	}

	log::warn!("ID3v2.4 frame size is not synchsafe, reading it as a plain integer");
	plain
}

fn lands_on_boundary(rest: &[u8], size: u32) -> bool {
	let Some(next) = rest.get(size as usize..) else {
		return false;
	};

	match next {
		[] | [0, ..] => true,
		[a, b, c, d, ..] => FrameId::is_valid_chars(&[*a, *b, *c, *d]),
		_ => false,
	}
}
