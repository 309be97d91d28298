use crate::picture::PictureInfo;

use std::collections::HashSet;

/// A link attached to a chapter
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ChapterUrl {
	/// A description of the link, may be empty
	pub description: String,
	/// The link itself
	pub url: String,
}

/// A chapter, as stored in an ID3v2 `CHAP` frame
///
/// Chapters are ordered and compared by their start time. An empty `id` is replaced with a free
/// generated `ch<n>` identifier once the chapter is stored in a [`TagData`](crate::tag::TagData).
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ChapterInfo {
	/// Unique element ID, referenced by the table of contents
	pub id: String,
	/// Start time in milliseconds
	pub start_time: u32,
	/// End time in milliseconds
	pub end_time: u32,
	/// Byte offset of the start of the chapter, if known
	pub start_offset: Option<u32>,
	/// Byte offset of the end of the chapter, if known
	pub end_offset: Option<u32>,
	/// The chapter title
	pub title: Option<String>,
	/// The chapter subtitle
	pub subtitle: Option<String>,
	/// A link attached to the chapter
	pub url: Option<ChapterUrl>,
	/// A picture attached to the chapter
	pub picture: Option<PictureInfo>,
}

impl ChapterInfo {
	/// Byte offsets equal to this value mean "unknown"
	pub const UNKNOWN_OFFSET: u32 = u32::MAX;

	/// Create a chapter spanning `start_time..end_time`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::tag::ChapterInfo;
	///
	/// let intro = ChapterInfo::new(0, 15_000).with_title("Intro");
	/// assert_eq!(intro.title.as_deref(), Some("Intro"));
	/// ```
	pub fn new(start_time: u32, end_time: u32) -> Self {
		Self {
			start_time,
			end_time,
			..Self::default()
		}
	}

	/// Set the title, returning `self`
	#[must_use]
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Set the subtitle, returning `self`
	#[must_use]
	pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
		self.subtitle = Some(subtitle.into());
		self
	}

	/// The key chapters are ordered by
	pub fn key(&self) -> u32 {
		self.start_time
	}

	pub(crate) fn offset_from_raw(raw: u32) -> Option<u32> {
		(raw != Self::UNKNOWN_OFFSET).then_some(raw)
	}

	pub(crate) fn offset_to_raw(offset: Option<u32>) -> u32 {
		offset.unwrap_or(Self::UNKNOWN_OFFSET)
	}
}

/// Sort chapters by start time and fill in missing IDs
///
/// Generated IDs never collide with an ID already in the list. A repeated ID is kept on its first
/// chapter and regenerated on the others.
pub(crate) fn normalize_chapters(chapters: &mut [ChapterInfo]) {
	chapters.sort_by_key(ChapterInfo::key);

	let reserved = chapters
		.iter()
		.filter(|chapter| !chapter.id.is_empty())
		.map(|chapter| chapter.id.clone())
		.collect::<HashSet<_>>();
	let mut used = HashSet::with_capacity(chapters.len());

	for (index, chapter) in chapters.iter_mut().enumerate() {
		if !chapter.id.is_empty() && used.insert(chapter.id.clone()) {
			continue;
		}

		let mut n = index;
		let id = loop {
			let candidate = format!("ch{n}");
			if !reserved.contains(&candidate) && !used.contains(&candidate) {
				break candidate;
			}
			n += 1;
		};

		used.insert(id.clone());
		chapter.id = id;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn missing_ids_are_generated_in_order() {
		let mut chapters = vec![
			ChapterInfo::new(5000, 9000),
			ChapterInfo {
				id: String::from("intro"),
				..ChapterInfo::new(0, 5000)
			},
			ChapterInfo::new(9000, 12000),
		];

		normalize_chapters(&mut chapters);

		let ids = chapters.iter().map(|c| c.id.as_str()).collect::<Vec<_>>();
		assert_eq!(ids, ["intro", "ch1", "ch2"]);
	}

	#[test_log::test]
	fn generated_ids_skip_those_in_use() {
		let mut chapters = vec![
			ChapterInfo {
				id: String::from("ch1"),
				..ChapterInfo::new(0, 1000)
			},
			ChapterInfo::new(1000, 2000),
			ChapterInfo::new(2000, 3000),
			ChapterInfo {
				id: String::from("ch1"),
				..ChapterInfo::new(3000, 4000)
			},
		];

		normalize_chapters(&mut chapters);

		let ids = chapters.iter().map(|c| c.id.as_str()).collect::<Vec<_>>();
		assert_eq!(ids, ["ch1", "ch2", "ch3", "ch4"]);
	}
}
