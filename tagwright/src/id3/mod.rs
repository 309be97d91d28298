//! ID3 specific items
//!
//! ID3v2 tags live at the start of a file, ID3v1 tags are the last 128 bytes. See the
//! [`coordinator`](crate::coordinator) for how they are kept apart from APE tags.

pub mod v1;
pub mod v2;

use crate::error::{ErrorKind, Result};
use v1::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use v2::header::Id3v2Header;

use std::io::{Read, Seek, SeekFrom};

/// Where an ID3v2 tag was found
#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Location {
	pub(crate) offset: u64,
	pub(crate) header: Id3v2Header,
}

impl Id3v2Location {
	/// The size of the tag region, header and footer included
	pub(crate) fn len(&self) -> u64 {
		u64::from(self.header.full_tag_size())
	}

	pub(crate) fn end(&self) -> u64 {
		self.offset + self.len()
	}
}

/// Search for an ID3v2 tag at the start of `data`
///
/// When there is no tag at offset 0, up to `allowed_junk_window` bytes are searched for one.
/// On success, the reader is left right after the (extended) header.
pub(crate) fn find_id3v2<R>(data: &mut R, allowed_junk_window: u64) -> Result<Option<Id3v2Location>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v2 tag");

	data.rewind()?;
	if let Some(header) = parse_header(data)? {
		return Ok(Some(Id3v2Location { offset: 0, header }));
	}

	if allowed_junk_window == 0 {
		return Ok(None);
	}

	data.rewind()?;
	let mut window = Vec::new();
	data.by_ref()
		.take(allowed_junk_window.saturating_add(3))
		.read_to_end(&mut window)?;

	let candidates = window
		.windows(3)
		.enumerate()
		.skip(1)
		.filter(|(_, bytes)| *bytes == b"ID3")
		.map(|(offset, _)| offset as u64)
		.collect::<Vec<_>>();

	for offset in candidates {
		data.seek(SeekFrom::Start(offset))?;
		if let Some(header) = parse_header(data)? {
			log::warn!("Found an ID3v2 tag preceded by junk data, offset: {offset}");
			return Ok(Some(Id3v2Location { offset, header }));
		}
	}

	Ok(None)
}

// A header that is cut short is just a missing tag, any other I/O error is real
fn parse_header<R>(data: &mut R) -> Result<Option<Id3v2Header>>
where
	R: Read,
{
	let err = match Id3v2Header::parse(data) {
		Ok(header) => return Ok(Some(header)),
		Err(err) => err,
	};

	let absent = !matches!(
		err.kind(),
		ErrorKind::Io(io) if io.kind() != std::io::ErrorKind::UnexpectedEof
	);

	if !absent {
		return Err(err);
	}

	log::trace!("No ID3v2 header: {err}");
	Ok(None)
}

/// Search for an ID3v1 tag in the last 128 bytes of `data`
///
/// Returns the offset of the tag. The reader is left at the tag, or at the end of the stream.
pub(crate) fn find_id3v1<R>(data: &mut R) -> Result<Option<u64>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v1 tag");

	let len = data.seek(SeekFrom::End(0))?;
	if len < ID3V1_TAG_SIZE {
		return Ok(None);
	}

	let offset = data.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64)))?;

	let mut marker = [0; 3];
	data.read_exact(&mut marker)?;

	if marker != ID3V1_TAG_MARKER {
		data.seek(SeekFrom::End(0))?;
		return Ok(None);
	}

	log::debug!("Found an ID3v1 tag at offset {offset}");

	data.seek(SeekFrom::Start(offset))?;
	Ok(Some(offset))
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::io::Cursor;

	fn empty_tag() -> Vec<u8> {
		b"ID3\x04\x00\x00\x00\x00\x00\x04\x00\x00\x00\x00".to_vec()
	}

	#[test_log::test]
	fn tag_at_start() {
		let mut data = Cursor::new([empty_tag(), b"audio".to_vec()].concat());

		let location = find_id3v2(&mut data, 0).unwrap().unwrap();
		assert_eq!(location.offset, 0);
		assert_eq!(location.len(), 14);
		assert_eq!(data.position(), 10);
	}

	#[test_log::test]
	fn tag_after_junk() {
		let bytes = [b"junk".to_vec(), empty_tag()].concat();

		assert!(find_id3v2(&mut Cursor::new(bytes.clone()), 0).unwrap().is_none());
		assert!(find_id3v2(&mut Cursor::new(bytes.clone()), 3).unwrap().is_none());

		let location = find_id3v2(&mut Cursor::new(bytes), 4).unwrap().unwrap();
		assert_eq!(location.offset, 4);
		assert_eq!(location.end(), 18);
	}

	#[test_log::test]
	fn false_marker_in_junk() {
		let bytes = [b"xID3\xFF".to_vec(), empty_tag()].concat();
		let location = find_id3v2(&mut Cursor::new(bytes), 64).unwrap().unwrap();
		assert_eq!(location.offset, 5);
	}

	#[test_log::test]
	fn id3v1_trailer() {
		let mut data = vec![0; 10];
		data.extend_from_slice(b"TAG");
		data.resize(10 + 128, 0);

		assert_eq!(find_id3v1(&mut Cursor::new(data)).unwrap(), Some(10));
		assert_eq!(find_id3v1(&mut Cursor::new(b"TAG".to_vec())).unwrap(), None);
	}
}
