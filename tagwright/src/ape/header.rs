use super::constants::{
	APE_HEADER_SIZE, APE_PREAMBLE, APE_VERSION, FLAG_HAS_HEADER, FLAG_READ_ONLY,
};
use crate::error::Result;
use crate::id3::find_id3v1;
use crate::macros::decode_err;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

/// An APE header or footer
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApeHeader {
	pub(crate) version: u32,
	/// The size of the items and the footer, the header is not included
	pub(crate) size: u32,
	pub(crate) item_count: u32,
	pub(crate) flags: u32,
}

impl ApeHeader {
	/// Parse a header or footer, `None` if the preamble doesn't match
	pub(crate) fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let mut preamble = [0; 8];
		reader.read_exact(&mut preamble)?;

		if &preamble != APE_PREAMBLE {
			return Ok(None);
		}

		let version = reader.read_u32::<LittleEndian>()?;
		let size = reader.read_u32::<LittleEndian>()?;
		let item_count = reader.read_u32::<LittleEndian>()?;
		let flags = reader.read_u32::<LittleEndian>()?;

		// Reserved
		reader.read_u64::<LittleEndian>()?;

		if size < APE_HEADER_SIZE {
			decode_err!(@BAIL Ape, "APE tag has an invalid size (< 32)");
		}

		Ok(Some(Self {
			version,
			size,
			item_count,
			flags,
		}))
	}

	/// Whether the tag is preceded by a header
	///
	/// APEv1 tags only ever have a footer.
	pub(crate) fn has_header(&self) -> bool {
		self.version >= APE_VERSION && self.flags & FLAG_HAS_HEADER != 0
	}

	pub(crate) fn read_only(&self) -> bool {
		self.flags & FLAG_READ_ONLY != 0
	}

	/// The size of the item data alone
	pub(crate) fn items_size(&self) -> u32 {
		self.size - APE_HEADER_SIZE
	}
}

/// Where an APE tag was found
#[derive(Copy, Clone, Debug)]
pub(crate) struct ApeLocation {
	/// The start of the tag, at the header if there is one
	pub(crate) offset: u64,
	/// The size of the tag, header and footer included
	pub(crate) len: u64,
	pub(crate) header: ApeHeader,
}

impl ApeLocation {
	pub(crate) fn end(&self) -> u64 {
		self.offset + self.len
	}

	/// The offset of the first item
	pub(crate) fn items_offset(&self) -> u64 {
		self.end() - u64::from(self.header.size)
	}
}

/// The offset an APE tag ends at, which is right before any ID3v1 tag
pub(crate) fn tag_end<R>(data: &mut R) -> Result<u64>
where
	R: Read + Seek,
{
	match find_id3v1(data)? {
		Some(offset) => Ok(offset),
		None => Ok(data.seek(SeekFrom::End(0))?),
	}
}

/// Search for an APE tag, using its footer
///
/// A malformed footer is logged and treated as a missing tag. On success, the reader is left
/// at the first item.
pub(crate) fn find_ape<R>(data: &mut R) -> Result<Option<ApeLocation>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an APE tag");

	let end = tag_end(data)?;

	match locate(data, end) {
		Ok(location) => Ok(location),
		Err(err) if err.is_io() => Err(err),
		Err(err) => {
			log::warn!("Ignoring a malformed APE tag: {err}");
			Ok(None)
		},
	}
}

fn locate<R>(data: &mut R, end: u64) -> Result<Option<ApeLocation>>
where
	R: Read + Seek,
{
	let footer_size = u64::from(APE_HEADER_SIZE);
	if end < footer_size {
		return Ok(None);
	}

	data.seek(SeekFrom::Start(end - footer_size))?;
	let Some(header) = ApeHeader::parse(data)? else {
		return Ok(None);
	};

	let header_size = if header.has_header() { footer_size } else { 0 };
	let Some(offset) = end.checked_sub(u64::from(header.size) + header_size) else {
		decode_err!(@BAIL Ape, "APE tag is larger than the file");
	};

	let location = ApeLocation {
		offset,
		len: end - offset,
		header,
	};

	log::debug!(
		"Found an APE tag at offset {offset}, size: {}, items: {}",
		location.len,
		header.item_count
	);

	data.seek(SeekFrom::Start(location.items_offset()))?;
	Ok(Some(location))
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::io::Cursor;

	fn footer(version: u32, size: u32, flags: u32) -> Vec<u8> {
		let mut footer = APE_PREAMBLE.to_vec();
		footer.extend(version.to_le_bytes());
		footer.extend(size.to_le_bytes());
		footer.extend(0_u32.to_le_bytes());
		footer.extend(flags.to_le_bytes());
		footer.extend([0; 8]);
		footer
	}

	#[test_log::test]
	fn footer_only_tag() {
		let data = [b"audio".to_vec(), vec![0; 4], footer(1000, 36, 0)].concat();

		let location = find_ape(&mut Cursor::new(data)).unwrap().unwrap();
		assert_eq!(location.offset, 5);
		assert_eq!(location.len, 36);
		assert_eq!(location.items_offset(), 5);
	}

	#[test_log::test]
	fn tag_before_id3v1() {
		let mut id3v1 = b"TAG".to_vec();
		id3v1.resize(128, 0);

		let flags = FLAG_HAS_HEADER | FLAG_READ_ONLY;
		let data = [
			b"audio".to_vec(),
			vec![0; 32],
			footer(2000, 32, flags),
			id3v1,
		]
		.concat();

		let location = find_ape(&mut Cursor::new(data)).unwrap().unwrap();
		assert_eq!(location.offset, 5);
		assert_eq!(location.len, 64);
		assert!(location.header.read_only());
	}

	#[test_log::test]
	fn bad_sizes_are_ignored() {
		let data = footer(2000, 16, 0);
		assert!(find_ape(&mut Cursor::new(data)).unwrap().is_none());

		let data = footer(2000, 4096, 0);
		assert!(find_ape(&mut Cursor::new(data)).unwrap().is_none());

		assert!(find_ape(&mut Cursor::new(b"short".to_vec())).unwrap().is_none());
	}
}
