use super::constants::{GENRES, ID3V1_TAG_SIZE, genre_index};
use crate::config::{ParseOptions, ParsingMode, WriteOptions};
use crate::error::{Result, TagError};
use crate::id3::find_id3v1;
use crate::tag::{Field, TagData, Timestamp, internal_to_display, parse_number, split_values};
use crate::util::io::{FileLike, Length, Truncate};

use std::io::{Read, Seek};

/// An ID3v1 tag
///
/// ID3v1 is a severely limited format, with each field being incredibly small in size. All
/// fields have been commented with their maximum sizes and any other additional restrictions.
///
/// Attempting to write a field greater than the maximum size will **not** error, it will just
/// be shrunk.
///
/// ## Conversions
///
/// [`Id3v1Tag::into_tag_data`] and [`Id3v1Tag::from_tag_data`] map the fields as follows:
///
/// * `title` <-> [`Field::Title`]
/// * `artist` <-> [`Field::Artist`]
/// * `album` <-> [`Field::Album`]
/// * `year` <-> [`Field::RecordingDate`] (year only)
/// * `comment` <-> [`Field::Comment`]
/// * `track_number` <-> [`Field::TrackNumber`] (only if it fits in a `u8`)
/// * `genre` <-> [`Field::Genre`] (only if [`GENRES`](crate::id3::v1::GENRES) contains the name)
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1Tag {
	/// Track title, 30 bytes max
	pub title: Option<String>,
	/// Track artist, 30 bytes max
	pub artist: Option<String>,
	/// Album title, 30 bytes max
	pub album: Option<String>,
	/// Release year, 4 bytes max
	pub year: Option<u16>,
	/// A short comment
	///
	/// The number of bytes differs between versions, but not much.
	/// A V1 tag may have been read, which limits this field to 30 bytes.
	/// A V1.1 tag, however, only has 28 bytes available.
	///
	/// tagwright will *always* write a V1.1 tag.
	pub comment: Option<String>,
	/// The track number, 1 byte max
	///
	/// Issues:
	///
	/// * The track number **cannot** be 0. Many readers, including tagwright, look for a null
	///   byte at the end of the comment to differentiate between V1 and V1.1.
	/// * A V1 tag may have been read, which does *not* have a track number.
	pub track_number: Option<u8>,
	/// The track's genre, 1 byte max
	///
	/// ID3v1 has a predefined set of genres, see [`GENRES`](crate::id3::v1::GENRES).
	/// This byte should be an index to a genre.
	pub genre: Option<u8>,
}

impl Id3v1Tag {
	/// Create a new empty `ID3v1Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::id3::v1::Id3v1Tag;
	///
	/// let id3v1_tag = Id3v1Tag::new();
	/// assert!(id3v1_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether no field is set
	pub fn is_empty(&self) -> bool {
		self.title.is_none()
			&& self.artist.is_none()
			&& self.album.is_none()
			&& self.year.is_none()
			&& self.comment.is_none()
			&& self.track_number.is_none()
			&& self.genre.is_none()
	}

	/// Read the ID3v1 tag at the end of `reader`
	///
	/// A tag that fails to decode is logged and reported as missing.
	///
	/// # Errors
	///
	/// Only errors from `reader` itself are returned.
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Option<Self>>
	where
		R: Read + Seek,
	{
		if find_id3v1(reader)?.is_none() {
			return Ok(None);
		}

		let mut raw = [0; ID3V1_TAG_SIZE as usize];
		reader.read_exact(&mut raw)?;

		match Self::parse(raw, parse_options.parsing_mode) {
			Ok(tag) => Ok(Some(tag)),
			Err(err) => {
				log::error!("Failed to read the ID3v1 tag: {err}");
				Ok(None)
			},
		}
	}

	/// Write the tag to the end of `file`, replacing any existing ID3v1 tag
	///
	/// An empty tag removes the existing one.
	///
	/// # Errors
	///
	/// * A field can't be represented in Latin-1, and [`WriteOptions::lossy_text_encoding`]
	///   is not set
	/// * Errors from `file`
	pub fn write_to<F>(&self, file: &mut F, write_options: WriteOptions) -> Result<()>
	where
		F: FileLike,
		TagError: From<<F as Truncate>::Error>,
		TagError: From<<F as Length>::Error>,
	{
		super::write::write_id3v1(file, self, write_options)
	}

	/// Remove the ID3v1 tag from `file`
	///
	/// Returns `true` if a tag was removed.
	///
	/// # Errors
	///
	/// Errors from `file`
	pub fn remove_from<F>(file: &mut F) -> Result<bool>
	where
		F: FileLike,
		TagError: From<<F as Truncate>::Error>,
		TagError: From<<F as Length>::Error>,
	{
		super::write::remove_id3v1(file)
	}

	/// Convert the tag into a [`TagData`]
	pub fn into_tag_data(self) -> TagData {
		let mut tag = TagData::new();

		let text_fields = [
			(Field::Title, self.title),
			(Field::Artist, self.artist),
			(Field::Album, self.album),
			(Field::Comment, self.comment),
		];

		for (field, value) in text_fields {
			if let Some(value) = value {
				tag.set(field, value);
			}
		}

		if let Some(year) = self.year {
			tag.set(Field::RecordingDate, Timestamp::from_year(year).to_string());
		}

		if let Some(track_number) = self.track_number {
			tag.set(Field::TrackNumber, track_number.to_string());
		}

		if let Some(genre) = self.genre.and_then(|genre| GENRES.get(usize::from(genre))) {
			tag.set(Field::Genre, *genre);
		}

		tag
	}

	/// Create a tag from the fields of a [`TagData`] that ID3v1 can hold
	///
	/// Multi-valued fields are written with the display separator. Only the first genre that
	/// appears in [`GENRES`](crate::id3::v1::GENRES) is kept.
	pub fn from_tag_data(tag: &TagData) -> Self {
		let text = |field| tag.get(field).map(internal_to_display);

		let year = tag.get(Field::RecordingDate).and_then(|date| {
			Timestamp::parse(date, ParsingMode::BestAttempt)
				.ok()
				.flatten()
				.map(|timestamp| timestamp.year)
		});

		let track_number = tag
			.get(Field::TrackNumber)
			.and_then(|number| u8::try_from(parse_number(number)).ok())
			.filter(|number| *number != 0);

		let genre = tag
			.get(Field::Genre)
			.and_then(|genres| split_values(genres).into_iter().find_map(genre_index));

		Self {
			title: text(Field::Title),
			artist: text(Field::Artist),
			album: text(Field::Album),
			year,
			comment: text(Field::Comment),
			track_number,
			genre,
		}
	}
}
