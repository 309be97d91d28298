mod validate;

pub use validate::RestrictionWarning;

use super::frame::encode_frames;
use super::header::{Id3v2Header, Id3v2TagFlags, Id3v2Version};
use super::read::read_located;
use super::restrictions::TagRestrictions;
use super::tag::Id3v2Tag;
use super::util::synchsafe::SynchsafeInteger;
use crate::config::{ParseOptions, WriteOptions};
use crate::error::{Result, TagError};
use crate::id3::{Id3v2Location, find_id3v2};
use crate::macros::{err, id3v2_err, try_vec};
use crate::tag::{TagData, TagDelta};
use crate::util::alloc::VecFallibleCapacity;
use crate::util::io::{FileLike, Length, Truncate, splice_region};

use std::ops::Not;
use std::sync::OnceLock;

/// The outcome of [`write_tag`](crate::id3::v2::write_tag)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct WriteReport {
	/// Restrictions the written tag doesn't meet
	pub warnings: Vec<RestrictionWarning>,
	/// The size of the committed tag region, padding included
	pub tag_size: u64,
	/// Whether the tag was overwritten without moving anything after it
	pub in_place: bool,
}

// In the very rare chance someone wants to write a CRC in their extended header
fn crc_32_table() -> &'static [u32; 256] {
	static INSTANCE: OnceLock<[u32; 256]> = OnceLock::new();
	INSTANCE.get_or_init(|| {
		let mut crc32_table = [0; 256];

		for (n, entry) in (0_u32..).zip(crc32_table.iter_mut()) {
			*entry = (0..8).fold(n, |acc, _| match acc & 1 {
				1 => 0xEDB8_8320 ^ (acc >> 1),
				_ => acc >> 1,
			});
		}

		crc32_table
	})
}

pub(super) fn write_tag<F>(
	file: &mut F,
	existing: Option<&TagData>,
	delta: &TagDelta,
	version: Id3v2Version,
	write_options: WriteOptions,
) -> Result<WriteReport>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	if version == Id3v2Version::V2 {
		id3v2_err!(UnsupportedWriteVersion);
	}

	let location = find_id3v2(file, junk_window())?;

	let base = match (existing, &location) {
		(Some(existing), _) => existing.clone(),
		(None, Some(location)) => {
			log::debug!("No previous tag provided, reading the one in the file");

			let parse_options = ParseOptions::new();
			read_located(file, location, parse_options)?
				.map(|tag| tag.into_tag_data(parse_options))
				.unwrap_or_default()
		},
		(None, None) => TagData::new(),
	};

	let merged = base.merge(delta);

	let restrictions = if write_options.honor_restrictions {
		write_options
			.forced_restrictions
			.or(merged.restrictions)
			.or_else(|| location.and_then(|location| location.header.flags.restrictions))
	} else {
		None
	};

	let tag = Id3v2Tag::from_tag_data(&merged, version, write_options, restrictions);
	if tag.is_empty() {
		log::debug!("No frames to write, removing the tag");

		let padding = merged.padding().unwrap_or(0);
		let (tag_size, in_place) = replace_with_padding(file, location, padding)?;
		return Ok(WriteReport {
			warnings: Vec::new(),
			tag_size,
			in_place,
		});
	}

	let mut warnings = restrictions
		.as_ref()
		.map(|restrictions| validate::check_frames(&tag.frames, restrictions))
		.unwrap_or_default();

	let mut content = encode_frames(&tag.frames, version, write_options.lossy_text_encoding)?;

	let extended_len = extended_header_len(&tag.flags);
	let needed = u64::from(Id3v2Header::SIZE) + u64::from(extended_len) + content.len() as u64;
	let padding = padding_for(
		needed,
		location.as_ref(),
		merged.padding(),
		write_options,
		restrictions.as_ref(),
	);

	content.resize(content.len() + padding as usize, 0);

	let id3v2 = create_tag(version, &tag.flags, &content)?;
	let tag_size = id3v2.len() as u64;

	if let Some(warning) = restrictions
		.as_ref()
		.and_then(|restrictions| validate::check_size(tag_size, restrictions))
	{
		warnings.push(warning);
	}

	let (offset, old_len) = location.map_or((0, 0), |location| (location.offset, location.len()));
	let in_place = splice_region(file, offset, old_len, &id3v2)?;

	if in_place {
		log::debug!("Rewrote the ID3v2 tag in place ({tag_size} bytes, {padding} bytes of padding)");
	} else {
		log::debug!("Wrote a {tag_size} byte ID3v2 tag ({padding} bytes of padding), shifting the file");
	}

	Ok(WriteReport {
		warnings,
		tag_size,
		in_place,
	})
}

pub(super) fn remove_tag<F>(file: &mut F, padding_hint: u32) -> Result<()>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	let location = find_id3v2(file, junk_window())?;
	replace_with_padding(file, location, padding_hint)?;
	Ok(())
}

fn junk_window() -> u64 {
	ParseOptions::DEFAULT_MAX_JUNK_BYTES as u64
}

// Drop the tag, leaving behind an empty one holding `padding` bytes of padding if requested
fn replace_with_padding<F>(
	file: &mut F,
	location: Option<Id3v2Location>,
	padding: u32,
) -> Result<(u64, bool)>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	let (offset, old_len) = location.map_or((0, 0), |location| (location.offset, location.len()));

	let replacement = match padding {
		0 => Vec::new(),
		_ => {
			log::debug!("Leaving an empty tag with {padding} bytes of padding");
			create_tag(
				Id3v2Version::V4,
				&Id3v2TagFlags::default(),
				&try_vec![0; padding as usize],
			)?
		},
	};

	if old_len == 0 && replacement.is_empty() {
		log::debug!("No ID3v2 tag to remove");
		return Ok((0, true));
	}

	let in_place = splice_region(file, offset, old_len, &replacement)?;
	Ok((replacement.len() as u64, in_place))
}

// Explicit padding wins, then whatever keeps the tag the same size, then the preferred padding
fn padding_for(
	needed: u64,
	location: Option<&Id3v2Location>,
	hint: Option<u32>,
	write_options: WriteOptions,
	restrictions: Option<&TagRestrictions>,
) -> u64 {
	let mut padding = match (hint, location) {
		(Some(hint), _) => u64::from(hint),
		(None, Some(location)) if needed <= location.len() => location.len() - needed,
		_ => u64::from(write_options.preferred_padding.unwrap_or(0)),
	};

	if let Some(restrictions) = restrictions {
		let max = u64::from(restrictions.size.max_size());
		if needed + padding > max {
			padding = max.saturating_sub(needed);
			log::debug!("Tag size is restricted to {max} bytes, reducing padding to {padding}");
		}
	}

	padding
}

fn extended_header_len(flags: &Id3v2TagFlags) -> u32 {
	if !flags.crc && flags.restrictions.is_none() {
		return 0;
	}

	// Size (4), number of flag bytes (1), flags (1)
	let mut len = 6;
	if flags.crc {
		len += 6;
	}
	if flags.restrictions.is_some() {
		len += 2;
	}

	len
}

/// Assemble a full tag from its frames and padding
///
/// The extended header is only written for ID3v2.4, with the CRC computed over `content`.
fn create_tag(version: Id3v2Version, flags: &Id3v2TagFlags, content: &[u8]) -> Result<Vec<u8>> {
	let extended_len = extended_header_len(flags);

	let Ok(size) = u32::try_from(content.len() as u64 + u64::from(extended_len)) else {
		err!(TooMuchData);
	};

	let mut tag_flags = flags.as_byte(version);
	if extended_len > 0 {
		tag_flags |= 0x40;
	}

	let mut id3v2 = Vec::try_with_capacity_stable(Id3v2Header::SIZE as usize + size as usize)?;
	id3v2.extend_from_slice(b"ID3");
	id3v2.extend_from_slice(&[version.major(), 0, tag_flags]);
	id3v2.extend_from_slice(&size.synch()?.to_be_bytes());

	if extended_len > 0 {
		// Structure of extended header:
		//
		// Size (4)
		// Number of flag bytes (1) (As of ID3v2.4, this will *always* be 1)
		// Flags (1)
		// Followed by any extra data (crc or restrictions)
		let mut ext_flags = 0_u8;
		let mut extra = Vec::with_capacity(8);

		if flags.crc {
			ext_flags |= 0x20;
			extra.push(5);
			extra.extend_from_slice(&calculate_crc(content));
		}

		if let Some(restrictions) = flags.restrictions {
			ext_flags |= 0x10;
			extra.push(1);
			extra.push(restrictions.as_byte());
		}

		id3v2.extend_from_slice(&extended_len.synch()?.to_be_bytes());
		id3v2.extend_from_slice(&[1, ext_flags]);
		id3v2.extend_from_slice(&extra);
	}

	id3v2.extend_from_slice(content);
	Ok(id3v2)
}

// https://github.com/rstemmer/id3edit/blob/0246f3dc1a7a80a64461eeeb7b9ee88379003eb1/encoding/crc.c#L6:6
fn calculate_crc(content: &[u8]) -> [u8; 5] {
	let crc: u32 = content
		.iter()
		.fold(!0, |crc, octet| {
			(crc >> 8) ^ crc_32_table()[(((crc & 0xFF) ^ u32::from(*octet)) & 0xFF) as usize]
		})
		.not();

	// The CRC-32 is stored as an 35 bit synchsafe integer, leaving the upper
	// four bits always zeroed.
	let mut encoded_crc = [0; 5];
	for (i, byte) in encoded_crc.iter_mut().enumerate() {
		*byte = (crc >> ((4 - i) * 7)) as u8 & 0x7F;
	}

	encoded_crc
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::id3::v2::TagSizeRestrictions;

	#[test_log::test]
	fn crc_check_value() {
		// CRC-32 of "123456789" is 0xCBF43926
		assert_eq!(calculate_crc(b"123456789"), [0x0C, 0x5F, 0x50, 0x72, 0x26]);
	}

	#[test_log::test]
	fn extended_header_layout() {
		let mut restrictions = TagRestrictions::default();
		restrictions.size = TagSizeRestrictions::S_32F_4K;

		let flags = Id3v2TagFlags {
			crc: true,
			restrictions: Some(restrictions),
			..Id3v2TagFlags::default()
		};

		let tag = create_tag(Id3v2Version::V4, &flags, b"123456789").unwrap();
		assert_eq!(&tag[..6], b"ID3\x04\x00\x40");
		// 14 byte extended header + 9 bytes of content
		assert_eq!(&tag[6..10], &[0, 0, 0, 23]);
		assert_eq!(&tag[10..16], &[0, 0, 0, 14, 1, 0x30]);
		assert_eq!(&tag[16..22], &[5, 0x0C, 0x5F, 0x50, 0x72, 0x26]);
		assert_eq!(&tag[22..24], &[1, restrictions.as_byte()]);
		assert_eq!(&tag[24..], b"123456789");

		// The extended header must parse back
		let header = Id3v2Header::parse(&mut &tag[..]).unwrap();
		assert!(header.flags.crc);
		assert_eq!(header.flags.restrictions, Some(restrictions));
		assert_eq!(header.extended_size, 14);
	}

	#[test_log::test]
	fn padding_choice() {
		let options = WriteOptions::new();
		let location = Id3v2Location {
			offset: 0,
			header: Id3v2Header {
				version: Id3v2Version::V4,
				flags: Id3v2TagFlags::default(),
				size: 490,
				extended_size: 0,
			},
		};

		// New tags and tags that outgrow the old one get the preferred padding
		assert_eq!(padding_for(100, None, None, options, None), 1024);
		assert_eq!(padding_for(600, Some(&location), None, options, None), 1024);
		// Otherwise the old size is kept
		assert_eq!(padding_for(100, Some(&location), None, options, None), 400);
		// An explicit hint always wins
		assert_eq!(padding_for(100, Some(&location), Some(7), options, None), 7);
		assert_eq!(
			padding_for(100, None, None, options.preferred_padding(0), None),
			0
		);

		let mut restrictions = TagRestrictions::default();
		restrictions.size = TagSizeRestrictions::S_32F_4K;
		assert_eq!(
			padding_for(4000, None, None, options, Some(&restrictions)),
			96
		);
	}
}
