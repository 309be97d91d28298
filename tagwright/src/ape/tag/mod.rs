mod conversion;
pub(crate) mod item;
mod read;
mod write;

use crate::ape::header::find_ape;
use crate::config::ParseOptions;
use crate::error::{Result, TagError};
use crate::util::io::{FileLike, Length, Truncate};
use item::ApeItem;

use std::io::{Read, Seek};

/// An `APE` tag
///
/// ## Item storage
///
/// `APE` isn't a very strict format. An [`ApeItem`] is only restricted by its key, its value
/// can be text, binary data or a locator.
///
/// Pictures are stored as [`ApeItemValue::Binary`](crate::ape::ApeItemValue::Binary) items,
/// holding a description, a null byte and the picture data. For the common item keys, see
/// [`APE_PICTURE_TYPES`](crate::ape::APE_PICTURE_TYPES).
///
/// ## Conversions
///
/// See [`ApeTag::into_tag_data`] and [`ApeTag::from_tag_data`].
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct ApeTag {
	/// Whether or not to mark the tag as read only
	pub read_only: bool,
	pub(crate) items: Vec<ApeItem>,
}

impl ApeTag {
	/// Create a new empty `ApeTag`
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::ape::ApeTag;
	///
	/// let ape_tag = ApeTag::new();
	/// assert!(ape_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Get an [`ApeItem`] by key
	///
	/// NOTE: While `APE` items are supposed to be case-sensitive,
	/// this rule is rarely followed, so this will ignore case when searching.
	pub fn get(&self, key: &str) -> Option<&ApeItem> {
		self.items
			.iter()
			.find(|i| i.key().eq_ignore_ascii_case(key))
	}

	/// Insert an [`ApeItem`]
	///
	/// This will remove any item with the same key prior to insertion
	pub fn insert(&mut self, value: ApeItem) {
		self.remove(value.key());
		self.items.push(value);
	}

	/// Remove an [`ApeItem`] by key
	///
	/// NOTE: Like [`ApeTag::get`], this is not case-sensitive
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::ape::{ApeItem, ApeItemValue, ApeTag};
	///
	/// # fn main() -> tagwright::error::Result<()> {
	/// let mut ape_tag = ApeTag::new();
	/// ape_tag.insert(ApeItem::new(
	/// 	String::from("Title"),
	/// 	ApeItemValue::Text(String::from("Foo title")),
	/// )?);
	/// assert!(ape_tag.get("TITLE").is_some());
	///
	/// ape_tag.remove("Title");
	/// assert!(ape_tag.get("Title").is_none());
	/// # Ok(()) }
	/// ```
	pub fn remove(&mut self, key: &str) {
		self.items.retain(|i| !i.key().eq_ignore_ascii_case(key));
	}

	/// Iterate over the items
	pub fn items(&self) -> impl Iterator<Item = &ApeItem> + '_ {
		self.items.iter()
	}

	/// The number of items
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether the tag has no items
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Read the APE tag at the end of `reader`, before any ID3v1 tag
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
		let Some(location) = find_ape(reader)? else {
			return Ok(None);
		};

		match read::read_ape_tag(reader, &location, parse_options) {
			Ok(tag) => Ok(Some(tag)),
			Err(err) if err.is_io() => Err(err),
			Err(err) => {
				log::error!("Failed to read the APE tag: {err}");
				Ok(None)
			},
		}
	}

	/// Write the tag to `file`, replacing any existing APE tag
	///
	/// A new tag is written at the end of the file, before any ID3v1 tag. An empty tag removes
	/// the existing one.
	///
	/// # Errors
	///
	/// * The tag is larger than 4 GiB
	/// * Errors from `file`
	pub fn write_to<F>(&self, file: &mut F) -> Result<()>
	where
		F: FileLike,
		TagError: From<<F as Truncate>::Error>,
		TagError: From<<F as Length>::Error>,
	{
		write::write_ape(file, self)
	}

	/// Remove the APE tag from `file`
	///
	/// Returns `true` if a tag was removed. Anything after the tag, such as an ID3v1 tag, is
	/// moved back.
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
		write::remove_ape(file)
	}
}

impl IntoIterator for ApeTag {
	type Item = ApeItem;
	type IntoIter = std::vec::IntoIter<Self::Item>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}

impl<'a> IntoIterator for &'a ApeTag {
	type Item = &'a ApeItem;
	type IntoIter = std::slice::Iter<'a, ApeItem>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}
