use super::chapter::ChapterInfo;
use super::data::TagData;
use super::field::Field;
use super::lyrics::LyricsInfo;
use crate::picture::{NativeCode, PictureInfo};

use std::collections::BTreeMap;

/// A tri-state edit of a single value
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub enum FieldEdit<T> {
	/// Keep the current value
	#[default]
	Untouched,
	/// Replace the current value
	Set(T),
	/// Drop the current value
	Remove,
}

impl<T: Clone> FieldEdit<T> {
	fn apply(&self, current: Option<T>) -> Option<T> {
		match self {
			FieldEdit::Untouched => current,
			FieldEdit::Set(value) => Some(value.clone()),
			FieldEdit::Remove => None,
		}
	}
}

/// An edit of the picture collection
///
/// Pictures are addressed by their native code, so unrelated pictures are never touched.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PictureEdit {
	/// Append a picture
	Add(PictureInfo),
	/// Replace the n-th picture (0-based) sharing this picture's native code, or append it if
	/// there is no such picture
	Replace {
		/// The new picture
		picture: PictureInfo,
		/// Which of the pictures with the same code to replace
		occurrence: usize,
	},
	/// Remove pictures with the given native code
	Remove {
		/// The code to match
		code: NativeCode,
		/// The n-th (0-based) matching picture, or every match if `None`
		occurrence: Option<usize>,
	},
}

/// A sparse set of edits to apply to a [`TagData`]
///
/// Anything the delta doesn't mention keeps its current value.
///
/// # Examples
///
/// ```rust
/// use tagwright::tag::{Field, TagData, TagDelta};
///
/// let mut current = TagData::new();
/// current.set(Field::Title, "Old title");
/// current.set(Field::Album, "Album");
/// current.set_additional("MOOD", "Calm");
///
/// let delta = TagDelta::new()
/// 	.set(Field::Title, "New title")
/// 	.remove_additional("MOOD");
///
/// let merged = current.merge(&delta);
/// assert_eq!(merged.get(Field::Title), Some("New title"));
/// assert_eq!(merged.get(Field::Album), Some("Album"));
/// assert_eq!(merged.additional("MOOD"), None);
///
/// // The original snapshot is untouched
/// assert_eq!(current.get(Field::Title), Some("Old title"));
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TagDelta {
	pub(crate) fields: BTreeMap<Field, FieldEdit<String>>,
	pub(crate) additional: BTreeMap<String, FieldEdit<String>>,
	pub(crate) pictures: Vec<PictureEdit>,
	pub(crate) chapters: FieldEdit<Vec<ChapterInfo>>,
	pub(crate) toc_description: FieldEdit<String>,
	pub(crate) lyrics: FieldEdit<Vec<LyricsInfo>>,
	pub(crate) padding: Option<u32>,
}

impl TagDelta {
	/// Create an empty delta
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a well-known field
	#[must_use]
	pub fn set(mut self, field: Field, value: impl Into<String>) -> Self {
		self.fields.insert(field, FieldEdit::Set(value.into()));
		self
	}

	/// Remove a well-known field
	#[must_use]
	pub fn remove(mut self, field: Field) -> Self {
		self.fields.insert(field, FieldEdit::Remove);
		self
	}

	/// Set an additional field
	#[must_use]
	pub fn set_additional(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.additional
			.insert(key.into(), FieldEdit::Set(value.into()));
		self
	}

	/// Remove an additional field
	#[must_use]
	pub fn remove_additional(mut self, key: impl Into<String>) -> Self {
		self.additional.insert(key.into(), FieldEdit::Remove);
		self
	}

	/// Queue a picture edit
	///
	/// Picture edits are applied in the order they were added.
	#[must_use]
	pub fn picture(mut self, edit: PictureEdit) -> Self {
		self.pictures.push(edit);
		self
	}

	/// Replace or remove every chapter
	#[must_use]
	pub fn chapters(mut self, edit: FieldEdit<Vec<ChapterInfo>>) -> Self {
		self.chapters = edit;
		self
	}

	/// Replace or remove the table of contents description
	#[must_use]
	pub fn toc_description(mut self, edit: FieldEdit<String>) -> Self {
		self.toc_description = edit;
		self
	}

	/// Replace or remove every lyrics block
	#[must_use]
	pub fn lyrics(mut self, edit: FieldEdit<Vec<LyricsInfo>>) -> Self {
		self.lyrics = edit;
		self
	}

	/// Request a specific amount of padding for the next write
	#[must_use]
	pub fn padding(mut self, padding: u32) -> Self {
		self.padding = Some(padding);
		self
	}

	/// Whether the delta changes nothing
	pub fn is_empty(&self) -> bool {
		self.fields.values().all(|e| *e == FieldEdit::Untouched)
			&& self.additional.values().all(|e| *e == FieldEdit::Untouched)
			&& self.pictures.is_empty()
			&& self.chapters == FieldEdit::Untouched
			&& self.toc_description == FieldEdit::Untouched
			&& self.lyrics == FieldEdit::Untouched
			&& self.padding.is_none()
	}
}

impl TagData {
	/// Apply a [`TagDelta`], producing a new snapshot
	pub fn merge(&self, delta: &TagDelta) -> TagData {
		let mut merged = self.clone();

		for (field, edit) in &delta.fields {
			match edit {
				FieldEdit::Untouched => {},
				FieldEdit::Set(value) => merged.set(*field, value.clone()),
				FieldEdit::Remove => {
					merged.remove(*field);
				},
			}
		}

		for (key, edit) in &delta.additional {
			match edit {
				FieldEdit::Untouched => {},
				FieldEdit::Set(value) => merged.set_additional(key.clone(), value.clone()),
				FieldEdit::Remove => {
					merged.remove_additional(key);
				},
			}
		}

		for edit in &delta.pictures {
			apply_picture_edit(merged.pictures_mut(), edit);
		}

		if delta.chapters != FieldEdit::Untouched {
			let chapters = delta
				.chapters
				.apply(Some(merged.chapters().to_vec()))
				.unwrap_or_default();
			merged.set_chapters(chapters);
		}

		let toc_description = delta
			.toc_description
			.apply(merged.toc_description().map(str::to_owned));
		merged.set_toc_description(toc_description);

		let lyrics = delta
			.lyrics
			.apply(Some(merged.lyrics().to_vec()))
			.unwrap_or_default();
		merged.set_lyrics(lyrics);

		if let Some(padding) = delta.padding {
			merged.set_padding(Some(padding));
		}

		merged
	}
}

fn apply_picture_edit(pictures: &mut Vec<PictureInfo>, edit: &PictureEdit) {
	match edit {
		PictureEdit::Add(picture) => pictures.push(picture.clone()),
		PictureEdit::Replace {
			picture,
			occurrence,
		} => {
			let target = pictures
				.iter()
				.enumerate()
				.filter(|(_, p)| p.native_code() == picture.native_code())
				.nth(*occurrence)
				.map(|(index, _)| index);

			match target {
				Some(index) => pictures[index] = picture.clone(),
				None => pictures.push(picture.clone()),
			}
		},
		PictureEdit::Remove { code, occurrence } => {
			let mut seen = 0;
			pictures.retain(|p| {
				if p.native_code() != code {
					return true;
				}

				let keep = occurrence.is_some_and(|n| n != seen);
				seen += 1;
				keep
			});
		},
	}
}

#[cfg(test)]
mod tests {
	use crate::picture::{MimeType, NativeCode, PictureInfo, PictureType};
	use crate::tag::{ChapterInfo, Field, FieldEdit, PictureEdit, TagData, TagDelta};

	fn picture(kind: PictureType, byte: u8) -> PictureInfo {
		PictureInfo::new(kind, Some(MimeType::Jpeg), vec![byte; 4])
	}

	#[test_log::test]
	fn untouched_fields_survive() {
		let mut current = TagData::new();
		current.set(Field::Artist, "Artist");
		current.set(Field::Genre, "Rock");

		let merged = current.merge(&TagDelta::new().remove(Field::Genre));
		assert_eq!(merged.get(Field::Artist), Some("Artist"));
		assert_eq!(merged.get(Field::Genre), None);
	}

	#[test_log::test]
	fn picture_edits_match_by_code() {
		let mut current = TagData::new();
		current.push_picture(picture(PictureType::Front, 1));
		current.push_picture(picture(PictureType::Back, 2));
		current.push_picture(picture(PictureType::Front, 3));

		let delta = TagDelta::new()
			.picture(PictureEdit::Remove {
				code: NativeCode::Id3v2(3),
				occurrence: Some(1),
			})
			.picture(PictureEdit::Replace {
				picture: picture(PictureType::Back, 9),
				occurrence: 0,
			});

		let merged = current.merge(&delta);
		let data = merged
			.pictures()
			.iter()
			.map(|p| p.data()[0])
			.collect::<Vec<_>>();
		assert_eq!(data, [1, 9]);

		let cleared = current.merge(&TagDelta::new().picture(PictureEdit::Remove {
			code: NativeCode::Id3v2(3),
			occurrence: None,
		}));
		assert_eq!(cleared.pictures().len(), 1);
	}

	#[test_log::test]
	fn toc_description_is_independent_of_chapters() {
		let delta = TagDelta::new().toc_description(FieldEdit::Set(String::from("Contents")));
		let merged = TagData::new().merge(&delta);

		assert_eq!(merged.toc_description(), Some("Contents"));
		assert!(merged.chapters().is_empty());

		let with_chapters = merged.merge(
			&TagDelta::new().chapters(FieldEdit::Set(vec![ChapterInfo::new(0, 1000)])),
		);
		assert_eq!(with_chapters.chapters()[0].id, "ch0");
		assert_eq!(with_chapters.toc_description(), Some("Contents"));
	}
}
