//! ID3v2 items and utilities
//!
//! The entry points are [`read_tag`], [`write_tag`] and [`remove_tag`], which work on a
//! [`TagData`]. The frame-level view of a tag is [`Id3v2Tag`].
//!
//! ## Important notes
//!
//! * ID3v2.2 tags can be read, but only ID3v2.3 and ID3v2.4 tags can be written.
//! * Frames are always presented with their ID3v2.4 IDs, see [`upgrade_v2`] and [`upgrade_v3`].
//! * Tag restrictions never block a write, see [`RestrictionWarning`].

pub(crate) mod frame;
pub(crate) mod header;
pub(crate) mod items;
pub(crate) mod read;
mod restrictions;
pub(crate) mod tag;
pub mod util;
pub(crate) mod write;

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{Result, TagError};
use crate::id3::find_id3v2;
use crate::tag::{TagData, TagDelta};
use crate::util::io::{FileLike, Length, Truncate};

use std::io::{Read, Seek};

// Exports

pub use header::{Id3v2TagFlags, Id3v2Version};
pub use util::upgrade::{upgrade_v2, upgrade_v3};

pub use tag::Id3v2Tag;

pub use items::*;

pub use frame::{Frame, FrameId};

pub use restrictions::{
	ImageSizeRestrictions, TagRestrictions, TagSizeRestrictions, TextSizeRestrictions,
};

pub use write::{RestrictionWarning, WriteReport};

/// Read the ID3v2 tag at the start of `reader`
///
/// A tag preceded by junk is found as long as it starts within
/// [`ParseOptions::max_junk_bytes`] bytes.
///
/// Returns `None` when there is no tag, or when the tag can't be decoded (the reason is logged).
///
/// # Errors
///
/// Only errors from `reader` itself are returned.
///
/// # Examples
///
/// ```rust
/// use tagwright::config::ParseOptions;
/// use tagwright::id3::v2::read_tag;
/// use std::io::Cursor;
///
/// # fn main() -> tagwright::error::Result<()> {
/// let mut file = Cursor::new(b"Not tagged".to_vec());
/// assert!(read_tag(&mut file, ParseOptions::new())?.is_none());
/// # Ok(()) }
/// ```
pub fn read_tag<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Option<TagData>>
where
	R: Read + Seek,
{
	let Some(location) = read_location(reader, parse_options)? else {
		return Ok(None);
	};

	Ok(read::read_located(reader, &location, parse_options)?
		.map(|tag| tag.into_tag_data(parse_options)))
}

/// Read the frame-level view of the ID3v2 tag at the start of `reader`
///
/// See [`read_tag`].
///
/// # Errors
///
/// Only errors from `reader` itself are returned.
pub fn read_frames<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Option<Id3v2Tag>>
where
	R: Read + Seek,
{
	let Some(location) = read_location(reader, parse_options)? else {
		return Ok(None);
	};

	read::read_located(reader, &location, parse_options)
}

fn read_location<R>(
	reader: &mut R,
	parse_options: ParseOptions,
) -> Result<Option<crate::id3::Id3v2Location>>
where
	R: Read + Seek,
{
	find_id3v2(reader, parse_options.max_junk_bytes as u64)
}

/// Merge `delta` into the current tag and write the result
///
/// The merge base is `existing` when provided (usually the result of an earlier [`read_tag`]),
/// otherwise the tag currently in `file` is read. The new tag replaces the old one in place,
/// or is inserted at the start of the file.
///
/// ## Padding
///
/// A padding hint from the delta ([`TagDelta::padding`]) is always used as-is. Without one, a tag
/// that still fits in the space of the old one takes up exactly that space, so nothing after
/// it has to move. New tags and tags that outgrow the old one get
/// [`WriteOptions::preferred_padding`] bytes of padding.
///
/// ## Restrictions
///
/// When [`WriteOptions::honor_restrictions`] is set, the tag is checked against the restrictions
/// of the existing tag (or [`WriteOptions::forced_restrictions`]). Violations are logged and
/// returned in the [`WriteReport`], the tag is written regardless.
///
/// A tag with no frames left is removed, see [`remove_tag`].
///
/// # Errors
///
/// * `version` is [`Id3v2Version::V2`]
/// * A frame can't be encoded, e.g. a URL with characters outside of Latin-1 without
///   [`WriteOptions::lossy_text_encoding`]
/// * The tag is too large for a synchsafe size
/// * Errors from `file`
///
/// # Examples
///
/// ```rust
/// use tagwright::config::{ParseOptions, WriteOptions};
/// use tagwright::id3::v2::{Id3v2Version, read_tag, write_tag};
/// use tagwright::tag::{Field, TagDelta};
/// use std::io::Cursor;
///
/// # fn main() -> tagwright::error::Result<()> {
/// let mut file = Cursor::new(b"audio".to_vec());
///
/// let delta = TagDelta::new().set(Field::Title, "Title");
/// let report = write_tag(&mut file, None, &delta, Id3v2Version::V4, WriteOptions::new())?;
/// assert!(report.warnings.is_empty());
///
/// let tag = read_tag(&mut file, ParseOptions::new())?.unwrap();
/// assert_eq!(tag.get(Field::Title), Some("Title"));
/// # Ok(()) }
/// ```
pub fn write_tag<F>(
	file: &mut F,
	existing: Option<&TagData>,
	delta: &TagDelta,
	version: Id3v2Version,
	write_options: WriteOptions,
) -> Result<WriteReport>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	write::write_tag(file, existing, delta, version, write_options)
}

/// Remove the ID3v2 tag from `file`
///
/// When `padding_hint` is nonzero, the tag is replaced with an empty tag holding that many bytes
/// of padding instead.
///
/// # Errors
///
/// Errors from `file`
///
/// # Examples
///
/// ```rust
/// use tagwright::config::WriteOptions;
/// use tagwright::id3::v2::{Id3v2Version, remove_tag, write_tag};
/// use tagwright::tag::{Field, TagDelta};
/// use std::io::Cursor;
///
/// # fn main() -> tagwright::error::Result<()> {
/// let mut file = Cursor::new(b"audio".to_vec());
///
/// let delta = TagDelta::new().set(Field::Title, "Title");
/// write_tag(&mut file, None, &delta, Id3v2Version::V4, WriteOptions::new())?;
///
/// remove_tag(&mut file, 0)?;
/// assert_eq!(file.get_ref(), b"audio");
/// # Ok(()) }
/// ```
pub fn remove_tag<F>(file: &mut F, padding_hint: u32) -> Result<()>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	write::remove_tag(file, padding_hint)
}
