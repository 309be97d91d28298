mod attached_picture_frame;
mod binary_frame;
mod chapter_frame;
mod extended_text_frame;
mod extended_url_frame;
mod language_frame;
mod popularimeter;
mod private_frame;
mod sync_text;
mod table_of_contents_frame;
mod text_information_frame;
mod url_link_frame;

pub use attached_picture_frame::AttachedPictureFrame;
pub use binary_frame::BinaryFrame;
pub use chapter_frame::ChapterFrame;
pub use extended_text_frame::ExtendedTextFrame;
pub use extended_url_frame::ExtendedUrlFrame;
pub use language_frame::LanguageFrame;
pub(crate) use language_frame::is_valid_language;
pub use popularimeter::PopularimeterFrame;
pub use private_frame::PrivateFrame;
pub use sync_text::{SynchronizedTextFrame, TimestampFormat};
pub use table_of_contents_frame::TableOfContentsFrame;
pub use text_information_frame::TextInformationFrame;
pub use url_link_frame::UrlLinkFrame;

use crate::error::Result;
use crate::util::text::{DecodedText, TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// Decode a string that follows another string in the same frame
///
/// Some writers only put a byte order mark on the first UTF-16 string of a frame.
fn decode_following<R>(
	reader: &mut R,
	encoding: TextEncoding,
	previous: &DecodedText,
	terminated: bool,
) -> Result<DecodedText>
where
	R: Read,
{
	let mut options = TextDecodeOptions::new()
		.encoding(encoding)
		.terminated(terminated);

	if encoding == TextEncoding::UTF16 && previous.bom != [0, 0] {
		options = options.bom(previous.bom);
	}

	decode_text(reader, options)
}
