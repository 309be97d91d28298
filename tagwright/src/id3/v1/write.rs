use super::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE, NO_GENRE};
use super::tag::Id3v1Tag;
use crate::config::WriteOptions;
use crate::error::{Result, TagError};
use crate::id3::find_id3v1;
use crate::util::io::{FileLike, Length, Truncate, splice_region};
use crate::util::text::latin1_encode;

use std::io::SeekFrom;

pub(super) fn write_id3v1<F>(file: &mut F, tag: &Id3v1Tag, write_options: WriteOptions) -> Result<()>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	if tag.is_empty() {
		log::debug!("ID3v1 tag is empty, removing it");
		remove_id3v1(file)?;
		return Ok(());
	}

	let encoded = encode(tag, write_options)?;

	let (offset, old_len) = match find_id3v1(file)? {
		Some(offset) => (offset, ID3V1_TAG_SIZE),
		None => (file.seek(SeekFrom::End(0))?, 0),
	};

	splice_region(file, offset, old_len, &encoded)?;
	Ok(())
}

pub(super) fn remove_id3v1<F>(file: &mut F) -> Result<bool>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	let Some(offset) = find_id3v1(file)? else {
		return Ok(false);
	};

	// An ID3v1 tag occupies the last 128 bytes of the file, so we can just shrink it down.
	log::debug!("Removing the ID3v1 tag at offset {offset}");
	file.truncate(offset)?;
	Ok(true)
}

pub(super) fn encode(tag: &Id3v1Tag, write_options: WriteOptions) -> Result<[u8; 128]> {
	fn write_string(
		out: &mut [u8],
		value: Option<&str>,
		write_options: WriteOptions,
	) -> Result<()> {
		let Some(value) = value else {
			return Ok(());
		};

		for (slot, byte) in out
			.iter_mut()
			.zip(latin1_encode(value, write_options.lossy_text_encoding))
		{
			*slot = byte?;
		}

		Ok(())
	}

	let mut writer = [0; ID3V1_TAG_SIZE as usize];
	writer[..3].copy_from_slice(&ID3V1_TAG_MARKER);

	write_string(&mut writer[3..33], tag.title.as_deref(), write_options)?;
	write_string(&mut writer[33..63], tag.artist.as_deref(), write_options)?;
	write_string(&mut writer[63..93], tag.album.as_deref(), write_options)?;

	if let Some(year) = tag.year {
		let year = format!("{:04}", year.min(9999));
		writer[93..97].copy_from_slice(year.as_bytes());
	}

	// ID3v1.1: 28 bytes of comment, a null byte, then the track number
	write_string(&mut writer[97..125], tag.comment.as_deref(), write_options)?;
	writer[126] = tag.track_number.unwrap_or(0);
	writer[127] = tag.genre.unwrap_or(NO_GENRE);

	Ok(writer)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{ParseOptions, ParsingMode};

	use std::io::Cursor;

	fn tag() -> Id3v1Tag {
		Id3v1Tag {
			title: Some(String::from("A title that is far too long for ID3v1")),
			artist: Some(String::from("Artist")),
			year: Some(1999),
			comment: Some(String::from("Comment")),
			track_number: Some(3),
			genre: Some(17),
			..Id3v1Tag::default()
		}
	}

	#[test_log::test]
	fn encoded_layout() {
		let encoded = encode(&tag(), WriteOptions::new()).unwrap();
		assert_eq!(&encoded[3..33], b"A title that is far too long f");
		assert_eq!(&encoded[93..97], b"1999");
		assert_eq!(encoded[125], 0);
		assert_eq!(encoded[126], 3);

		let parsed = Id3v1Tag::parse(encoded, ParsingMode::Strict).unwrap();
		assert_eq!(parsed.title.as_deref(), Some("A title that is far too long f"));
		assert_eq!(parsed.album, None);
		assert_eq!(parsed.track_number, Some(3));
	}

	#[test_log::test]
	fn non_latin1_text() {
		let tag = Id3v1Tag {
			title: Some(String::from("タイトル")),
			..Id3v1Tag::default()
		};

		assert!(encode(&tag, WriteOptions::new()).is_err());

		let encoded = encode(&tag, WriteOptions::new().lossy_text_encoding(true)).unwrap();
		assert_eq!(&encoded[3..7], b"????");
	}

	#[test_log::test]
	fn write_replace_remove() {
		let mut file = Cursor::new(b"audio".to_vec());

		tag().write_to(&mut file, WriteOptions::new()).unwrap();
		assert_eq!(file.get_ref().len(), 5 + 128);

		let mut other = tag();
		other.genre = Some(0);
		other.write_to(&mut file, WriteOptions::new()).unwrap();
		assert_eq!(file.get_ref().len(), 5 + 128);

		let read = Id3v1Tag::read_from(&mut file, ParseOptions::new())
			.unwrap()
			.unwrap();
		assert_eq!(read.genre, Some(0));

		assert!(Id3v1Tag::remove_from(&mut file).unwrap());
		assert!(!Id3v1Tag::remove_from(&mut file).unwrap());
		assert_eq!(file.get_ref().as_slice(), b"audio");
	}
}
