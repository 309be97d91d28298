//! Various traits for reading and writing to file-like objects

use crate::error::{Result, TagError};

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// Provides a method to truncate an object to the specified length
///
/// This is one component of the [`FileLike`] trait, which every write operation requires.
///
/// Take great care in implementing this for downstream types, as tagwright will assume that the
/// container has the new length specified. If this assumption were to be broken, files **will** become corrupted.
pub trait Truncate {
	/// The error type of the truncation operation
	type Error: Into<TagError>;

	/// Truncate a storage object to the specified length
	///
	/// # Errors
	///
	/// Errors depend on the object being truncated, which may not always be fallible.
	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error>;
}

impl Truncate for File {
	type Error = std::io::Error;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		self.set_len(new_len)
	}
}

impl Truncate for Vec<u8> {
	type Error = std::convert::Infallible;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		self.truncate(new_len as usize);
		Ok(())
	}
}

impl<T> Truncate for Cursor<T>
where
	T: Truncate,
{
	type Error = <T as Truncate>::Error;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		self.get_mut().truncate(new_len)
	}
}

impl<T> Truncate for &mut T
where
	T: Truncate,
{
	type Error = <T as Truncate>::Error;

	fn truncate(&mut self, new_len: u64) -> std::result::Result<(), Self::Error> {
		(**self).truncate(new_len)
	}
}

/// Provides a method to get the length of a storage object
///
/// This is one component of the [`FileLike`] trait.
pub trait Length {
	/// The error type of the length operation
	type Error: Into<TagError>;

	/// Get the length of a storage object
	///
	/// # Errors
	///
	/// Errors depend on the object being read, which may not always be fallible.
	fn len(&self) -> std::result::Result<u64, Self::Error>;
}

impl Length for File {
	type Error = std::io::Error;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		self.metadata().map(|m| m.len())
	}
}

impl Length for Vec<u8> {
	type Error = std::convert::Infallible;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Ok(self.len() as u64)
	}
}

impl<T> Length for Cursor<T>
where
	T: Length,
{
	type Error = <T as Length>::Error;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Length::len(self.get_ref())
	}
}

impl<T> Length for &mut T
where
	T: Length,
{
	type Error = <T as Length>::Error;

	fn len(&self) -> std::result::Result<u64, Self::Error> {
		Length::len(*self)
	}
}

/// Provides a set of methods to read and write to a file-like object
///
/// This is a combination of the [`Read`], [`Write`], [`Seek`], [`Truncate`], and [`Length`] traits.
///
/// Take great care in implementing this for downstream types, as tagwright will assume that the
/// trait implementations are correct. If this assumption were to be broken, files **may** become corrupted.
pub trait FileLike: Read + Write + Seek + Truncate + Length
where
	<Self as Truncate>::Error: Into<TagError>,
	<Self as Length>::Error: Into<TagError>,
{
}

impl<T> FileLike for T
where
	T: Read + Write + Seek + Truncate + Length,
	<T as Truncate>::Error: Into<TagError>,
	<T as Length>::Error: Into<TagError>,
{
}

/// Replace `old_len` bytes at `offset` with `replacement`
///
/// When the lengths match, the bytes are overwritten and nothing after the region moves.
/// Otherwise everything after the region is buffered, and the file is rewritten from `offset` on.
///
/// Returns `true` if the region was overwritten in place.
pub(crate) fn splice_region<F>(
	file: &mut F,
	offset: u64,
	old_len: u64,
	replacement: &[u8],
) -> Result<bool>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	if old_len == replacement.len() as u64 {
		log::debug!("Overwriting {old_len} bytes in place at offset {offset}");

		file.seek(SeekFrom::Start(offset))?;
		file.write_all(replacement)?;
		return Ok(true);
	}

	let file_len = file.len()?;
	let tail_start = offset.saturating_add(old_len).min(file_len);

	file.seek(SeekFrom::Start(tail_start))?;
	let mut tail = Vec::new();
	file.read_to_end(&mut tail)?;

	log::debug!(
		"Shifting {} trailing bytes by {} bytes",
		tail.len(),
		replacement.len() as i64 - old_len as i64
	);

	file.truncate(offset)?;
	file.seek(SeekFrom::Start(offset))?;
	file.write_all(replacement)?;
	file.write_all(&tail)?;

	Ok(false)
}

#[cfg(test)]
mod tests {
	use super::splice_region;

	use std::io::{Cursor, Read, Seek, Write};

	#[test_log::test]
	fn splice_same_size_is_in_place() {
		let mut data = Cursor::new(b"aaaaBBBBcccc".to_vec());

		let in_place = splice_region(&mut data, 4, 4, b"XXXX").unwrap();
		assert!(in_place);
		assert_eq!(data.into_inner(), b"aaaaXXXXcccc");
	}

	#[test_log::test]
	fn splice_shifts_tail() {
		let mut data = Cursor::new(b"aaaaBBBBcccc".to_vec());
		assert!(!splice_region(&mut data, 4, 4, b"XX").unwrap());
		assert_eq!(data.get_ref().as_slice(), b"aaaaXXcccc");

		assert!(!splice_region(&mut data, 0, 0, b"123").unwrap());
		assert_eq!(data.get_ref().as_slice(), b"123aaaaXXcccc");

		assert!(!splice_region(&mut data, 3, 6, b"").unwrap());
		assert_eq!(data.into_inner(), b"123cccc");
	}

	#[test_log::test]
	fn splice_real_file() {
		let mut file = tempfile::tempfile().unwrap();
		file.write_all(b"headerAUDIO").unwrap();

		splice_region(&mut file, 0, 6, b"hdr").unwrap();

		file.rewind().unwrap();
		let mut contents = Vec::new();
		file.read_to_end(&mut contents).unwrap();
		assert_eq!(contents, b"hdrAUDIO");
	}
}
