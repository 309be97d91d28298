use crate::error::Result;
use crate::id3::v2::frame::content::{encoding_for, verify_encoding};
use crate::id3::v2::header::Id3v2Version;
use crate::macros::{err, id3v2_err};
use crate::picture::{MimeType, NativeCode, PictureInfo};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

use byteorder::ReadBytesExt;

/// An ID3v2 attached picture frame (`APIC`, or `PIC` in ID3v2.2)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachedPictureFrame {
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The picture itself
	pub picture: PictureInfo,
}

impl AttachedPictureFrame {
	/// Create a new [`AttachedPictureFrame`]
	pub fn new(encoding: TextEncoding, picture: PictureInfo) -> Self {
		Self { encoding, picture }
	}

	/// Read an [`AttachedPictureFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * There isn't enough data present
	/// * The description can't be decoded
	///
	/// ID3v2.2:
	///
	/// * The format is not "PNG" or "JPG"
	pub fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		let Ok(encoding) = verify_encoding(reader.read_u8()?, version) else {
			err!(NotAPicture);
		};

		let mime_type = if version == Id3v2Version::V2 {
			let mut format = [0; 3];
			reader.read_exact(&mut format)?;

			match &format {
				b"PNG" => Some(MimeType::Png),
				b"JPG" => Some(MimeType::Jpeg),
				_ => id3v2_err!(BadPictureFormat(
					String::from_utf8_lossy(&format).into_owned()
				)),
			}
		} else {
			decode_text(
				reader,
				TextDecodeOptions::new()
					.encoding(TextEncoding::Latin1)
					.terminated(true),
			)?
			.text_or_none()
			.map(|mime_type| MimeType::from_str(&mime_type))
		};

		let picture_type = reader.read_u8()?;

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?
		.text_or_none();

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		let mut picture = PictureInfo::from_native(NativeCode::Id3v2(picture_type), mime_type, data);
		picture.set_description(description);

		Ok(Self { encoding, picture })
	}

	/// Convert an [`AttachedPictureFrame`] to a byte vec
	///
	/// A missing MIME type is sniffed from the picture data, and left empty if that fails.
	///
	/// # Errors
	///
	/// * `lossy` is disabled and the description cannot be encoded in the specified [`TextEncoding`].
	/// * The picture is too large to fit in a frame
	pub fn as_bytes(&self, version: Id3v2Version, lossy: bool) -> Result<Vec<u8>> {
		let encoding = encoding_for(self.encoding, version);

		let mut data = vec![encoding as u8];

		if let Some(mime_type) = self.picture.effective_mime_type() {
			data.extend_from_slice(mime_type.as_str().as_bytes());
		}
		data.push(0);

		data.push(self.picture.native_code().as_id3v2_byte());

		// An empty description still needs a full terminator for the encoding
		data.extend(encoding.encode(self.picture.description().unwrap_or_default(), true, lossy)?);
		data.extend_from_slice(self.picture.data());

		if data.len() as u64 > u64::from(u32::MAX) {
			err!(TooMuchData);
		}

		Ok(data)
	}
}
