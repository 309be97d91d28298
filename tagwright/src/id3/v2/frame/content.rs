use super::{Frame, FrameId};
use crate::config::ParseOptions;
use crate::error::{Id3v2ErrorKind, Result, TagError};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::items::{
	AttachedPictureFrame, BinaryFrame, ChapterFrame, ExtendedTextFrame, ExtendedUrlFrame,
	LanguageFrame, PopularimeterFrame, PrivateFrame, SynchronizedTextFrame, TableOfContentsFrame,
	TextInformationFrame, UrlLinkFrame,
};
use crate::macros::err;
use crate::util::text::TextEncoding;

/// Decode a frame body, keyed on the (already upgraded) frame ID
///
/// ID3v2.2 IDs without an ID3v2.4 equivalent can't be written back, and are dropped.
#[rustfmt::skip]
pub(crate) fn parse_content(
	body: &[u8],
	id: &str,
	version: Id3v2Version,
	parse_options: ParseOptions,
) -> Result<Option<Frame>> {
	log::trace!("Parsing frame content for ID: {}", id);

	if id.len() != 4 {
		log::warn!("Discarding ID3v2.2 frame `{id}`, it has no ID3v2.4 equivalent");
		return Ok(None);
	}

	let reader = &mut &body[..];
	Ok(match id {
		// The ID was previously upgraded, but the content remains unchanged, so version is necessary
		"APIC" => Some(Frame::Picture(AttachedPictureFrame::parse(reader, version)?)),
		"TXXX" => ExtendedTextFrame::parse(reader, version)?.map(Frame::UserText),
		"WXXX" => ExtendedUrlFrame::parse(reader, version)?.map(Frame::UserUrl),
		"COMM" => LanguageFrame::parse(reader, version)?.map(Frame::Comment),
		"USLT" => LanguageFrame::parse(reader, version)?.map(Frame::UnsynchronizedText),
		"SYLT" => Some(Frame::SynchronizedText(SynchronizedTextFrame::parse(reader, version)?)),
		"POPM" => Some(Frame::Popularimeter(PopularimeterFrame::parse(reader)?)),
		"PRIV" => PrivateFrame::parse(reader)?.map(Frame::Private),
		"CHAP" => Some(Frame::Chapter(ChapterFrame::parse(reader, version, parse_options)?)),
		"CTOC" => Some(Frame::TableOfContents(TableOfContentsFrame::parse(reader, version, parse_options)?)),
		i if i.starts_with('T') => TextInformationFrame::parse(reader, FrameId::new(i)?, version)?.map(Frame::Text),
		// Apple proprietary frames: Grouping, Movement Name, Movement Number
		"GRP1" | "MVNM" | "MVIN" => TextInformationFrame::parse(reader, FrameId::new(id)?, version)?.map(Frame::Text),
		i if i.starts_with('W') => UrlLinkFrame::parse(reader, FrameId::new(i)?)?.map(Frame::Url),
		_ => Some(Frame::Binary(BinaryFrame::new(FrameId::new(id)?, body.to_vec()))),
	})
}

pub(in crate::id3::v2) fn verify_encoding(
	encoding: u8,
	version: Id3v2Version,
) -> Result<TextEncoding> {
	if version == Id3v2Version::V2 && (encoding != 0 && encoding != 1) {
		return Err(TagError::from(Id3v2ErrorKind::V2InvalidTextEncoding));
	}

	match TextEncoding::from_u8(encoding) {
		None => err!(TextDecode("Found invalid encoding")),
		Some(e) => Ok(e),
	}
}

/// The encoding to actually write with, ID3v2.3 only knows about Latin-1 and UTF-16
pub(in crate::id3::v2) fn encoding_for(encoding: TextEncoding, version: Id3v2Version) -> TextEncoding {
	match version {
		Id3v2Version::V4 => encoding,
		_ => encoding.to_id3v23(),
	}
}
