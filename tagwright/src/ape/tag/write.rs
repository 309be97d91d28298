use super::ApeTag;
use crate::ape::constants::{
	APE_HEADER_SIZE, APE_PREAMBLE, APE_VERSION, FLAG_HAS_FOOTER, FLAG_HAS_HEADER, FLAG_IS_HEADER,
	FLAG_READ_ONLY,
};
use crate::ape::header::{find_ape, tag_end};
use crate::error::{Result, TagError};
use crate::macros::err;
use crate::util::io::{FileLike, Length, Truncate, splice_region};

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

pub(super) fn write_ape<F>(file: &mut F, tag: &ApeTag) -> Result<()>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	if tag.is_empty() {
		log::debug!("APE tag is empty, removing it");
		remove_ape(file)?;
		return Ok(());
	}

	let encoded = create_ape_tag(tag)?;

	// An existing tag is replaced in place, a new one goes right before any ID3v1 tag
	let (offset, old_len) = match find_ape(file)? {
		Some(location) => (location.offset, location.len),
		None => (tag_end(file)?, 0),
	};

	log::debug!("Writing a {} byte APE tag at offset {offset}", encoded.len());
	splice_region(file, offset, old_len, &encoded)?;
	Ok(())
}

pub(super) fn remove_ape<F>(file: &mut F) -> Result<bool>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	let Some(location) = find_ape(file)? else {
		return Ok(false);
	};

	log::debug!("Removing the APE tag at offset {}", location.offset);
	splice_region(file, location.offset, location.len, &[])?;
	Ok(true)
}

pub(super) fn create_ape_tag(tag: &ApeTag) -> Result<Vec<u8>> {
	let mut tag_write = Vec::new();

	for item in &tag.items {
		let value = item.value.as_bytes();

		tag_write.write_u32::<LittleEndian>(value.len() as u32)?;
		tag_write.write_u32::<LittleEndian>(item.flags())?;
		tag_write.write_all(item.key.as_bytes())?;
		tag_write.write_u8(0)?;
		tag_write.write_all(value)?;
	}

	let size = tag_write.len() as u64 + u64::from(APE_HEADER_SIZE);
	if size > u64::from(u32::MAX) {
		err!(TooMuchData);
	}

	// Bit 30 set: tag contains a footer
	// Bit 31 set: tag contains a header
	let mut flags = FLAG_HAS_FOOTER | FLAG_HAS_HEADER;

	if tag.read_only {
		flags |= FLAG_READ_ONLY;
	}

	let item_count = tag.items.len() as u32;

	// The header is exactly the same as the footer, except for bit 29
	let header = encode_footer(size as u32, item_count, flags | FLAG_IS_HEADER)?;
	let footer = encode_footer(size as u32, item_count, flags)?;

	let mut encoded = header;
	encoded.append(&mut tag_write);
	encoded.extend_from_slice(&footer);

	Ok(encoded)
}

fn encode_footer(size: u32, item_count: u32, flags: u32) -> Result<Vec<u8>> {
	let mut footer = Vec::with_capacity(APE_HEADER_SIZE as usize);

	footer.write_all(APE_PREAMBLE)?;
	// This is the APE tag version
	// Even if we read a v1 tag, we end up adding a header anyway
	footer.write_u32::<LittleEndian>(APE_VERSION)?;
	// The total size includes the 32 bytes of the footer
	footer.write_u32::<LittleEndian>(size)?;
	footer.write_u32::<LittleEndian>(item_count)?;
	footer.write_u32::<LittleEndian>(flags)?;
	// The header/footer must end in 8 bytes of zeros
	footer.write_u64::<LittleEndian>(0)?;

	Ok(footer)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ape::{ApeItem, ApeItemValue};
	use crate::config::{ParseOptions, WriteOptions};
	use crate::id3::v1::Id3v1Tag;

	use std::io::Cursor;

	fn tag() -> ApeTag {
		let mut tag = ApeTag::new();
		tag.insert(
			ApeItem::new(String::from("Title"), ApeItemValue::Text(String::from("Title")))
				.unwrap(),
		);
		tag
	}

	#[test_log::test]
	fn header_and_footer() {
		let mut tag = tag();
		tag.read_only = true;

		let encoded = create_ape_tag(&tag).unwrap();
		// 4 (size) + 4 (flags) + 6 ("Title\0") + 5 (value)
		assert_eq!(encoded.len(), 32 + 19 + 32);

		let (header, rest) = encoded.split_at(32);
		let footer = &rest[19..];
		assert_eq!(&header[..8], b"APETAGEX");
		assert_eq!(header[..20], footer[..20]);
		assert_eq!(&footer[12..16], &51_u32.to_le_bytes());
		assert_eq!(&footer[16..20], &1_u32.to_le_bytes());
		assert_eq!(&footer[20..24], &0xC000_0001_u32.to_le_bytes());
		assert_eq!(&header[20..24], &0xE000_0001_u32.to_le_bytes());
		assert_eq!(&footer[24..], &[0; 8]);
	}

	#[test_log::test]
	fn written_before_id3v1() {
		let mut file = Cursor::new(b"audio".to_vec());

		let id3v1 = Id3v1Tag {
			title: Some(String::from("Title")),
			..Id3v1Tag::default()
		};
		id3v1.write_to(&mut file, WriteOptions::new()).unwrap();
		tag().write_to(&mut file).unwrap();

		let bytes = file.get_ref();
		assert_eq!(&bytes[..5], b"audio");
		assert_eq!(&bytes[5..13], b"APETAGEX");
		assert_eq!(&bytes[bytes.len() - 128..][..3], b"TAG");

		// Rewriting replaces the existing tag
		tag().write_to(&mut file).unwrap();
		assert_eq!(file.get_ref().len(), 5 + 83 + 128);

		let read = ApeTag::read_from(&mut file, ParseOptions::new())
			.unwrap()
			.unwrap();
		assert_eq!(read, tag());

		assert!(ApeTag::remove_from(&mut file).unwrap());
		assert!(!ApeTag::remove_from(&mut file).unwrap());
		assert_eq!(file.get_ref().len(), 5 + 128);
		assert!(Id3v1Tag::read_from(&mut file, ParseOptions::new()).unwrap().is_some());
	}

	#[test_log::test]
	fn empty_tag_removes() {
		let mut file = Cursor::new(b"audio".to_vec());
		tag().write_to(&mut file).unwrap();
		ApeTag::new().write_to(&mut file).unwrap();
		assert_eq!(file.get_ref().as_slice(), b"audio");
	}
}
