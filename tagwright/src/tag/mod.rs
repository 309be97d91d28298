//! The format-agnostic tag model

mod chapter;
mod data;
mod delta;
mod field;
mod lyrics;
mod timestamp;
mod values;

pub use chapter::{ChapterInfo, ChapterUrl};
pub use data::TagData;
pub use delta::{FieldEdit, PictureEdit, TagDelta};
pub use field::Field;
pub use lyrics::{LyricsBody, LyricsContentType, LyricsInfo, LyricsPhrase};
pub use timestamp::Timestamp;
pub use values::{
	display_to_internal, internal_to_display, join_values, parse_number, split_number_pair,
	split_values,
};

pub(crate) use values::NUMBER_PAIR_SEPARATOR;

/// The tag systems that can share a single file
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum TagSystem {
	/// ID3v2, at the start of the file
	Id3v2,
	/// ID3v1, the last 128 bytes of the file
	Id3v1,
	/// APE v2, at the end of the file before any ID3v1 tag
	Ape,
}

impl TagSystem {
	/// Every tag system, in the order they appear in a file
	pub const ALL: [TagSystem; 3] = [TagSystem::Id3v2, TagSystem::Ape, TagSystem::Id3v1];
}
