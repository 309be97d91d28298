mod conversion;

use super::frame::Frame;
use super::header::{Id3v2TagFlags, Id3v2Version};
use crate::id3::v1::constants::GENRES;

/// An ID3v2 tag, as a list of decoded frames
///
/// This is the frame-level view of a tag. Most users want the [`TagData`](crate::tag::TagData)
/// produced by [`read_tag`](crate::id3::v2::read_tag) instead.
///
/// ## Frame IDs
///
/// Frames are always stored with their ID3v2.4 IDs, no matter which version was read. ID3v2.2
/// frames without an ID3v2.4 equivalent are discarded.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Id3v2Tag {
	pub(crate) original_version: Id3v2Version,
	pub(crate) flags: Id3v2TagFlags,
	pub(crate) frames: Vec<Frame>,
}

impl Default for Id3v2Tag {
	fn default() -> Self {
		Self {
			original_version: Id3v2Version::V4,
			flags: Id3v2TagFlags::default(),
			frames: Vec::new(),
		}
	}
}

impl Id3v2Tag {
	/// Create a new empty ID3v2 tag
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::id3::v2::Id3v2Tag;
	///
	/// let tag = Id3v2Tag::new();
	/// assert!(tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// The version of the tag that was read
	///
	/// Tags that weren't read from a file are [`Id3v2Version::V4`].
	pub fn original_version(&self) -> Id3v2Version {
		self.original_version
	}

	/// Returns the [`Id3v2TagFlags`]
	pub fn flags(&self) -> &Id3v2TagFlags {
		&self.flags
	}

	/// All frames, in the order they were read
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// The first frame with an ID of `id`
	pub fn get(&self, id: &str) -> Option<&Frame> {
		self.frames.iter().find(|frame| frame.id() == id)
	}

	/// Append a frame
	pub fn push(&mut self, frame: Frame) {
		self.frames.push(frame);
	}

	/// Remove every frame with an ID of `id`, returning how many were removed
	pub fn remove(&mut self, id: &str) -> usize {
		let before = self.frames.len();
		self.frames.retain(|frame| frame.id() != id);
		before - self.frames.len()
	}

	/// The number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}
}

impl IntoIterator for Id3v2Tag {
	type Item = Frame;
	type IntoIter = std::vec::IntoIter<Frame>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.into_iter()
	}
}

/// Split a `TCON` value into genre names
///
/// Handles ID3v2.4 null separated lists, ID3v2.3 `(n)` references with an optional refinement,
/// and bare ID3v1 genre numbers.
pub(crate) fn resolve_genres(value: &str) -> Vec<String> {
	let mut genres = Vec::new();

	for value in value.split('\0') {
		let mut rest = value.trim();
		let mut found = Vec::new();

		while let Some(inner) = rest.strip_prefix('(') {
			// "((" starts a refinement that begins with a literal '('
			if inner.starts_with('(') {
				rest = inner;
				break;
			}

			let Some((reference, tail)) = inner.split_once(')') else {
				break;
			};
			let Some(genre) = genre_reference(reference) else {
				break;
			};

			found.push(genre.to_owned());
			rest = tail;
		}

		if !rest.is_empty() {
			// A refinement is more specific than the reference before it, "(4)Eurodisco"
			found.pop();
			found.push(genre_reference(rest).unwrap_or(rest).to_owned());
		}

		genres.extend(found);
	}

	genres
}

fn genre_reference(reference: &str) -> Option<&'static str> {
	match reference {
		"RX" => Some("Remix"),
		"CR" => Some("Cover"),
		_ if reference.len() <= 3 => reference
			.parse::<usize>()
			.ok()
			.and_then(|index| GENRES.get(index).copied()),
		_ => None,
	}
}
