use super::constants::{GENRES, ID3V1_TAG_MARKER};
use super::tag::Id3v1Tag;
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::err;
use crate::util::text::latin1_decode;

impl Id3v1Tag {
	pub(crate) fn parse(reader: [u8; 128], parse_mode: ParsingMode) -> Result<Self> {
		if reader[..3] != ID3V1_TAG_MARKER {
			err!(FakeTag);
		}

		let reader = &reader[3..];

		let mut tag = Self {
			title: decode_text(&reader[..30]),
			artist: decode_text(&reader[30..60]),
			album: decode_text(&reader[60..90]),
			year: try_parse_year(&reader[90..94], parse_mode)?,
			..Self::default()
		};

		// Determine the range of the comment (30 bytes for ID3v1 and 28 for ID3v1.1)
		// We check for the null terminator 28 bytes in, and for a non-zero track number after it.
		// A track number of 0 is invalid.
		let range = if reader[122] == 0 && reader[123] != 0 {
			tag.track_number = Some(reader[123]);

			94_usize..123
		} else {
			94..124
		};

		tag.comment = decode_text(&reader[range]);

		if usize::from(reader[124]) < GENRES.len() {
			tag.genre = Some(reader[124]);
		}

		Ok(tag)
	}
}

fn decode_text(data: &[u8]) -> Option<String> {
	let mut end = data.len();
	if let Some(null_pos) = data.iter().position(|&b| b == 0) {
		if null_pos == 0 {
			return None;
		}

		if data[null_pos..].iter().any(|b| *b != 0) {
			log::warn!("ID3v1 text field contains trailing junk, skipping");
		}

		end = null_pos;
	}

	let text = latin1_decode(&data[..end]);
	let trimmed = text.trim_end_matches(' ');
	(!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn try_parse_year(input: &[u8], parse_mode: ParsingMode) -> Result<Option<u16>> {
	let (num_digits, year) = input
		.iter()
		.take_while(|c| c.is_ascii_digit())
		.fold((0_usize, 0_u16), |(num_digits, year), c| {
			(num_digits + 1, year * 10 + u16::from(*c - b'0'))
		});

	if num_digits != 4 {
		// Most writers use "\0\0\0\0" for an empty year, rather than "0000"
		if parse_mode == ParsingMode::Strict && input.iter().any(|c| *c != 0) {
			err!(TextDecode(
				"ID3v1 year field contains non-ASCII digit characters"
			));
		}

		return Ok(None);
	}

	Ok(Some(year))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn raw_tag() -> [u8; 128] {
		let mut tag = [0; 128];
		tag[..3].copy_from_slice(b"TAG");
		tag[3..8].copy_from_slice(b"Title");
		tag[33..39].copy_from_slice(b"Artist");
		tag[63..68].copy_from_slice(b"Album");
		tag[93..97].copy_from_slice(b"1999");
		tag[97..104].copy_from_slice(b"Comment");
		tag[126] = 7;
		tag[127] = 17;
		tag
	}

	#[test_log::test]
	fn id3v1_1() {
		let tag = Id3v1Tag::parse(raw_tag(), ParsingMode::Strict).unwrap();

		assert_eq!(tag.title.as_deref(), Some("Title"));
		assert_eq!(tag.artist.as_deref(), Some("Artist"));
		assert_eq!(tag.album.as_deref(), Some("Album"));
		assert_eq!(tag.year, Some(1999));
		assert_eq!(tag.comment.as_deref(), Some("Comment"));
		assert_eq!(tag.track_number, Some(7));
		assert_eq!(tag.genre, Some(17));
	}

	#[test_log::test]
	fn id3v1_0_comment_uses_the_track_byte() {
		let mut raw = raw_tag();
		raw[97..127].fill(b'c');
		raw[127] = 255;

		let tag = Id3v1Tag::parse(raw, ParsingMode::BestAttempt).unwrap();
		assert_eq!(tag.comment.as_deref().map(str::len), Some(30));
		assert_eq!(tag.track_number, None);
		assert_eq!(tag.genre, None);
	}

	#[test_log::test]
	fn bad_years() {
		let mut raw = raw_tag();
		raw[93..97].copy_from_slice(b"19x9");

		assert!(Id3v1Tag::parse(raw, ParsingMode::Strict).is_err());
		assert_eq!(
			Id3v1Tag::parse(raw, ParsingMode::BestAttempt).unwrap().year,
			None
		);

		// An empty year is not an error
		raw[93..97].fill(0);
		assert_eq!(Id3v1Tag::parse(raw, ParsingMode::Strict).unwrap().year, None);
	}
}
