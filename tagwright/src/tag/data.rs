use super::chapter::{ChapterInfo, normalize_chapters};
use super::field::Field;
use super::lyrics::LyricsInfo;
use crate::id3::v2::TagRestrictions;
use crate::picture::{NativeCode, PictureInfo};

use std::collections::BTreeMap;

/// A format-agnostic snapshot of a tag
///
/// `TagData` is produced by a read and consumed by a write. Edits are expressed as a
/// [`TagDelta`](crate::tag::TagDelta) and applied with [`TagData::merge`], which leaves the
/// original snapshot untouched.
///
/// Well-known fields and additional fields never overlap: setting a [`Field`] drops any additional
/// field whose key stands for the same field, and an additional field is never stored under such
/// a key.
///
/// # Examples
///
/// ```rust
/// use tagwright::tag::{Field, TagData};
///
/// let mut tag = TagData::new();
/// tag.set_additional("TIT2", "From a raw frame");
/// tag.set(Field::Title, "Title");
///
/// assert_eq!(tag.get(Field::Title), Some("Title"));
/// assert_eq!(tag.additional("TIT2"), None);
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TagData {
	fields: BTreeMap<Field, String>,
	additional: BTreeMap<String, String>,
	pictures: Vec<PictureInfo>,
	chapters: Vec<ChapterInfo>,
	toc_description: Option<String>,
	lyrics: Vec<LyricsInfo>,
	padding: Option<u32>,
	pub(crate) restrictions: Option<TagRestrictions>,
}

impl TagData {
	/// Create an empty `TagData`
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether there is nothing to write
	///
	/// The padding hint and restrictions are not content.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
			&& self.additional.is_empty()
			&& self.pictures.is_empty()
			&& self.chapters.is_empty()
			&& self.toc_description.is_none()
			&& self.lyrics.is_empty()
	}

	/// Get the value of a well-known field
	pub fn get(&self, field: Field) -> Option<&str> {
		self.fields.get(&field).map(String::as_str)
	}

	/// Set a well-known field, replacing any additional field that stands for it
	pub fn set(&mut self, field: Field, value: impl Into<String>) {
		self.additional
			.retain(|key, _| Field::from_native_key(key) != Some(field));
		self.fields.insert(field, value.into());
	}

	/// Remove a well-known field, returning its value
	pub fn remove(&mut self, field: Field) -> Option<String> {
		self.fields.remove(&field)
	}

	/// All well-known fields with a value
	pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
		self.fields.iter().map(|(field, value)| (*field, value.as_str()))
	}

	/// Get an additional field by its native key
	pub fn additional(&self, key: &str) -> Option<&str> {
		self.additional.get(key).map(String::as_str)
	}

	/// Set an additional field
	///
	/// A key that stands for a well-known field sets that field instead, unless it already has a
	/// value, in which case the well-known value wins.
	pub fn set_additional(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();

		match Field::from_native_key(&key) {
			Some(field) if self.fields.contains_key(&field) => {
				log::debug!("Ignoring additional field `{key}`, `{field}` is already set");
			},
			Some(field) => {
				self.fields.insert(field, value.into());
			},
			None => {
				self.additional.insert(key, value.into());
			},
		}
	}

	/// Remove an additional field, returning its value
	pub fn remove_additional(&mut self, key: &str) -> Option<String> {
		self.additional.remove(key)
	}

	/// All additional fields, ordered by key
	pub fn additional_fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
		self.additional
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// All pictures, in tag order
	pub fn pictures(&self) -> &[PictureInfo] {
		&self.pictures
	}

	/// Append a picture
	pub fn push_picture(&mut self, picture: PictureInfo) {
		self.pictures.push(picture);
	}

	/// Remove every picture with the given native code, returning how many were removed
	pub fn remove_pictures(&mut self, code: &NativeCode) -> usize {
		let before = self.pictures.len();
		self.pictures.retain(|p| p.native_code() != code);
		before - self.pictures.len()
	}

	pub(crate) fn pictures_mut(&mut self) -> &mut Vec<PictureInfo> {
		&mut self.pictures
	}

	/// All chapters, ordered by start time
	pub fn chapters(&self) -> &[ChapterInfo] {
		&self.chapters
	}

	/// Replace the chapters
	///
	/// Chapters are sorted by start time, and chapters without an ID are given one.
	pub fn set_chapters(&mut self, mut chapters: Vec<ChapterInfo>) {
		normalize_chapters(&mut chapters);
		self.chapters = chapters;
	}

	/// The description of the table of contents
	///
	/// This is independent of whether any chapters exist.
	pub fn toc_description(&self) -> Option<&str> {
		self.toc_description.as_deref()
	}

	/// Set or clear the description of the table of contents
	pub fn set_toc_description(&mut self, description: Option<String>) {
		self.toc_description = description;
	}

	/// All lyrics blocks, in tag order
	pub fn lyrics(&self) -> &[LyricsInfo] {
		&self.lyrics
	}

	/// Append a lyrics block
	pub fn push_lyrics(&mut self, lyrics: LyricsInfo) {
		self.lyrics.push(lyrics);
	}

	/// Replace the lyrics
	pub fn set_lyrics(&mut self, lyrics: Vec<LyricsInfo>) {
		self.lyrics = lyrics;
	}

	/// The padding hint, in bytes
	pub fn padding(&self) -> Option<u32> {
		self.padding
	}

	/// Set the padding hint used by the next write
	pub fn set_padding(&mut self, padding: Option<u32>) {
		self.padding = padding;
	}

	/// The restrictions found in the tag's extended header, if any
	pub fn restrictions(&self) -> Option<&TagRestrictions> {
		self.restrictions.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use crate::picture::{MimeType, NativeCode, PictureInfo, PictureType};
	use crate::tag::{Field, TagData};

	#[test_log::test]
	fn well_known_fields_win_over_additional_keys() {
		let mut tag = TagData::new();
		tag.set(Field::Album, "Album");

		// TALB is the album frame, it must not be kept as an additional field
		tag.set_additional("TALB", "Other album");
		assert_eq!(tag.get(Field::Album), Some("Album"));
		assert_eq!(tag.additional_fields().count(), 0);

		// Keys without a mapping are kept
		tag.set_additional("MOOD", "Calm");
		assert_eq!(tag.additional("MOOD"), Some("Calm"));
	}

	#[test_log::test]
	fn additional_key_fills_unset_field() {
		let mut tag = TagData::new();
		tag.set_additional("TPE1", "Artist");

		assert_eq!(tag.get(Field::Artist), Some("Artist"));
		assert!(tag.additional("TPE1").is_none());
	}

	#[test_log::test]
	fn remove_pictures_by_code() {
		let mut tag = TagData::new();
		for code in [3, 4, 3] {
			tag.push_picture(PictureInfo::from_native(
				NativeCode::Id3v2(code),
				Some(MimeType::Png),
				vec![code],
			));
		}

		assert_eq!(tag.remove_pictures(&NativeCode::Id3v2(3)), 2);
		assert_eq!(tag.pictures().len(), 1);
		assert_eq!(tag.pictures()[0].picture_type(), PictureType::Back);
	}
}
