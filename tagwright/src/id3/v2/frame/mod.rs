//! The ID3v2 frame codec

pub(super) mod content;
pub(super) mod header;
pub(super) mod read;

use super::header::Id3v2Version;
use super::items::{
	AttachedPictureFrame, BinaryFrame, ChapterFrame, ExtendedTextFrame, ExtendedUrlFrame,
	LanguageFrame, PopularimeterFrame, PrivateFrame, SynchronizedTextFrame, TableOfContentsFrame,
	TextInformationFrame, UrlLinkFrame,
};
use super::util::synchsafe::SynchsafeInteger;
use crate::error::Result;
use crate::macros::{err, id3v2_err};

use std::fmt::{Display, Formatter};

/// An ID3v2.3/4 frame ID
///
/// IDs are always stored in their ID3v2.4 form after a read.
#[derive(PartialEq, Clone, Debug, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(String);

impl FrameId {
	/// Create a `FrameId`, checking that it is 4 characters of `A-Z` or `0-9`
	///
	/// # Errors
	///
	/// `id` is not a valid ID3v2.3/4 frame ID
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::id3::v2::FrameId;
	///
	/// assert!(FrameId::new("TIT2").is_ok());
	/// assert!(FrameId::new("TT2").is_err());
	/// assert!(FrameId::new("tit2").is_err());
	/// ```
	pub fn new(id: impl Into<String>) -> Result<Self> {
		let id = id.into();
		if !Self::is_valid(&id) {
			id3v2_err!(BadFrameId(id.into_bytes()));
		}

		Ok(Self(id))
	}

	pub(crate) fn is_valid(id: &str) -> bool {
		id.len() == 4 && Self::is_valid_chars(id.as_bytes())
	}

	pub(crate) fn is_valid_chars(id: &[u8]) -> bool {
		id.iter().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Flags from a frame header that change how the body is read
///
/// Frames are always written without flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub(crate) struct FrameFlags {
	pub grouping_identity: bool,
	pub compression: bool,
	pub encryption: bool,
	pub unsynchronisation: bool,
	pub data_length_indicator: bool,
}

impl FrameFlags {
	pub(crate) fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			grouping_identity: flags & 0x0040 == 0x0040,
			compression: flags & 0x0008 == 0x0008,
			encryption: flags & 0x0004 == 0x0004,
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: flags & 0x0001 == 0x0001,
		}
	}

	pub(crate) fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			grouping_identity: flags & 0x0020 == 0x0020,
			compression: flags & 0x0080 == 0x0080,
			encryption: flags & 0x0040 == 0x0040,
			unsynchronisation: false,
			// Compressed ID3v2.3 frames always carry the decompressed size
			data_length_indicator: flags & 0x0080 == 0x0080,
		}
	}
}

/// A decoded ID3v2 frame
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Frame {
	/// A `T***` frame (except `TXXX`)
	Text(TextInformationFrame),
	/// A `TXXX` frame
	UserText(ExtendedTextFrame),
	/// A `W***` frame (except `WXXX`)
	Url(UrlLinkFrame),
	/// A `WXXX` frame
	UserUrl(ExtendedUrlFrame),
	/// A `COMM` frame
	Comment(LanguageFrame),
	/// A `USLT` frame
	UnsynchronizedText(LanguageFrame),
	/// A `SYLT` frame
	SynchronizedText(SynchronizedTextFrame),
	/// An `APIC` frame
	Picture(AttachedPictureFrame),
	/// A `POPM` frame
	Popularimeter(PopularimeterFrame),
	/// A `PRIV` frame
	Private(PrivateFrame),
	/// A `CHAP` frame
	Chapter(ChapterFrame),
	/// A `CTOC` frame
	TableOfContents(TableOfContentsFrame),
	/// Any other frame, kept as raw bytes
	Binary(BinaryFrame),
}

impl Frame {
	/// The ID3v2.4 ID of the frame
	pub fn id(&self) -> &str {
		match self {
			Frame::Text(frame) => frame.id.as_str(),
			Frame::Url(frame) => frame.id.as_str(),
			Frame::Binary(frame) => frame.id.as_str(),
			Frame::UserText(_) => "TXXX",
			Frame::UserUrl(_) => "WXXX",
			Frame::Comment(_) => "COMM",
			Frame::UnsynchronizedText(_) => "USLT",
			Frame::SynchronizedText(_) => "SYLT",
			Frame::Picture(_) => "APIC",
			Frame::Popularimeter(_) => "POPM",
			Frame::Private(_) => "PRIV",
			Frame::Chapter(_) => "CHAP",
			Frame::TableOfContents(_) => "CTOC",
		}
	}

	/// Encode the frame body, without the header
	pub(crate) fn body(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		match self {
			Frame::Text(frame) => frame.as_bytes(version, lossy),
			Frame::UserText(frame) => frame.as_bytes(version, lossy),
			Frame::Url(frame) => frame.as_bytes(lossy),
			Frame::UserUrl(frame) => frame.as_bytes(version, lossy),
			Frame::Comment(frame) | Frame::UnsynchronizedText(frame) => {
				frame.as_bytes(version, lossy)
			},
			Frame::SynchronizedText(frame) => frame.as_bytes(version, lossy),
			Frame::Picture(frame) => frame.as_bytes(version, lossy),
			Frame::Popularimeter(frame) => frame.as_bytes(lossy),
			Frame::Private(frame) => frame.as_bytes(lossy),
			Frame::Chapter(frame) => frame.as_bytes(version, lossy),
			Frame::TableOfContents(frame) => frame.as_bytes(version, lossy),
			Frame::Binary(frame) => Ok(frame.data.clone()),
		}
	}

	/// Encode the full frame, header included
	///
	/// The frame ID must already be valid for `version`.
	pub(crate) fn encode(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let id = self.id();
		let body = self.body(version, lossy)?;

		let Ok(size) = u32::try_from(body.len()) else {
			err!(TooMuchData);
		};

		let size = match version {
			Id3v2Version::V4 => size.synch()?,
			Id3v2Version::V3 => size,
			Id3v2Version::V2 => id3v2_err!(UnsupportedWriteVersion),
		};

		log::trace!("Encoding frame `{id}`, {} bytes", body.len());

		let mut frame = Vec::with_capacity(body.len() + 10);
		frame.extend_from_slice(id.as_bytes());
		frame.extend_from_slice(&size.to_be_bytes());
		frame.extend_from_slice(&[0, 0]);
		frame.extend_from_slice(&body);

		Ok(frame)
	}
}

/// Encode a list of frames back to back
pub(crate) fn encode_frames(frames: &[Frame], version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
	let mut content = Vec::new();
	for frame in frames {
		content.extend(frame.encode(version, lossy)?);
	}

	Ok(content)
}
