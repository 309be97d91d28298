//! Format-agnostic picture handling
//!
//! A [`PictureInfo`] carries the payload along with two views of its role: a normalized
//! [`PictureType`] shared by every tag system, and the [`NativeCode`] the owning tag system
//! actually stores. Pictures are matched by their native code when a tag is edited.

use crate::error::Result;
use crate::macros::err;

use std::fmt::{Debug, Display, Formatter};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::OnceLock;

use byteorder::{BigEndian, ReadBytesExt as _};

/// MIME types for pictures.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_str("image/jpeg"), MimeType::Jpeg);
	/// assert_eq!(MimeType::from_str("JPG"), MimeType::Jpeg);
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match &*mime_type.to_lowercase() {
			"image/jpeg" | "image/jpg" | "jpg" | "jpeg" => Self::Jpeg,
			"image/png" | "png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	/// Guess the `MimeType` from the magic bytes of an image
	///
	/// # Errors
	///
	/// The data is not a recognized image format
	pub fn sniff(bytes: &[u8]) -> Result<Self> {
		match bytes {
			[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Ok(MimeType::Png),
			[0xFF, 0xD8, ..] => Ok(MimeType::Jpeg),
			[b'G', b'I', b'F', 0x38, 0x37 | 0x39, b'a', ..] => Ok(MimeType::Gif),
			[b'B', b'M', ..] => Ok(MimeType::Bmp),
			[b'I', b'I', b'*', 0x00, ..] | [b'M', b'M', 0x00, b'*', ..] => Ok(MimeType::Tiff),
			_ => err!(NotAPicture),
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The normalized role of a picture, shared by every tag system
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum PictureType {
	Generic,
	Icon,
	OtherIcon,
	Front,
	Back,
	Leaflet,
	/// The physical medium (CD, vinyl, ...)
	CD,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	/// A type with no normalized equivalent, see the picture's [`NativeCode`]
	Unsupported,
}

const ID3V2_PICTURE_TYPES: [PictureType; 21] = [
	PictureType::Generic,
	PictureType::Icon,
	PictureType::OtherIcon,
	PictureType::Front,
	PictureType::Back,
	PictureType::Leaflet,
	PictureType::CD,
	PictureType::LeadArtist,
	PictureType::Artist,
	PictureType::Conductor,
	PictureType::Band,
	PictureType::Composer,
	PictureType::Lyricist,
	PictureType::RecordingLocation,
	PictureType::DuringRecording,
	PictureType::DuringPerformance,
	PictureType::ScreenCapture,
	PictureType::BrightFish,
	PictureType::Illustration,
	PictureType::BandLogo,
	PictureType::PublisherLogo,
];

/// Common picture item keys for APE, indexed by their ID3v2 type byte
pub const APE_PICTURE_TYPES: [&str; 21] = [
	"Cover Art (Other)",
	"Cover Art (Png Icon)",
	"Cover Art (Icon)",
	"Cover Art (Front)",
	"Cover Art (Back)",
	"Cover Art (Leaflet)",
	"Cover Art (Media)",
	"Cover Art (Lead Artist)",
	"Cover Art (Artist)",
	"Cover Art (Conductor)",
	"Cover Art (Band)",
	"Cover Art (Composer)",
	"Cover Art (Lyricist)",
	"Cover Art (Recording Location)",
	"Cover Art (During Recording)",
	"Cover Art (During Performance)",
	"Cover Art (Video Capture)",
	"Cover Art (Fish)",
	"Cover Art (Illustration)",
	"Cover Art (Band Logotype)",
	"Cover Art (Publisher Logotype)",
];

impl PictureType {
	/// Get the ID3v2 `APIC` type byte
	///
	/// [`PictureType::Unsupported`] has no byte of its own, and maps to `0` (other).
	pub fn as_id3v2_byte(self) -> u8 {
		ID3V2_PICTURE_TYPES
			.iter()
			.position(|t| *t == self)
			.map_or(0, |pos| pos as u8)
	}

	/// Get a `PictureType` from an ID3v2 `APIC` type byte
	pub fn from_id3v2_byte(byte: u8) -> Self {
		ID3V2_PICTURE_TYPES
			.get(usize::from(byte))
			.copied()
			.unwrap_or(Self::Unsupported)
	}

	/// Get an APE item key from a `PictureType`
	pub fn as_ape_key(self) -> Option<&'static str> {
		ID3V2_PICTURE_TYPES
			.iter()
			.position(|t| *t == self)
			.map(|pos| APE_PICTURE_TYPES[pos])
	}

	/// Get a `PictureType` from an APE item key
	pub fn from_ape_key(key: &str) -> Self {
		APE_PICTURE_TYPES
			.iter()
			.position(|k| k.eq_ignore_ascii_case(key))
			.map_or(Self::Unsupported, |pos| ID3V2_PICTURE_TYPES[pos])
	}
}

/// The picture type exactly as a tag system stores it
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum NativeCode {
	/// An ID3v2 `APIC` type byte
	Id3v2(u8),
	/// An APE item key
	Ape(String),
}

impl NativeCode {
	/// The normalized type this code stands for
	pub fn picture_type(&self) -> PictureType {
		match self {
			NativeCode::Id3v2(byte) => PictureType::from_id3v2_byte(*byte),
			NativeCode::Ape(key) => PictureType::from_ape_key(key),
		}
	}

	/// The ID3v2 type byte for this code, translating from other systems where possible
	pub fn as_id3v2_byte(&self) -> u8 {
		match self {
			NativeCode::Id3v2(byte) => *byte,
			NativeCode::Ape(key) => PictureType::from_ape_key(key).as_id3v2_byte(),
		}
	}
}

/// Dimensions of an image, used for tag restriction checks
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct PictureDimensions {
	/// The picture's width in pixels
	pub width: u32,
	/// The picture's height in pixels
	pub height: u32,
}

impl PictureDimensions {
	/// Read the dimensions of a PNG or JPEG image
	///
	/// # Errors
	///
	/// The image is not a PNG or JPEG, or its header is truncated
	pub fn from_image(data: &[u8]) -> Result<Self> {
		match MimeType::sniff(data)? {
			MimeType::Png => Self::from_png(data),
			MimeType::Jpeg => Self::from_jpeg(data),
			_ => err!(UnsupportedPicture),
		}
	}

	fn from_png(data: &[u8]) -> Result<Self> {
		// Signature (8), IHDR length (4), "IHDR" (4)
		match data.get(12..16) {
			Some(b"IHDR") => {},
			_ => err!(NotAPicture),
		}

		let mut reader = &data[16..];
		let width = reader.read_u32::<BigEndian>()?;
		let height = reader.read_u32::<BigEndian>()?;

		Ok(Self { width, height })
	}

	fn from_jpeg(data: &[u8]) -> Result<Self> {
		// Skip the SOI marker, then walk the segments until a SOFn is found
		let mut pos = 2;
		while pos + 4 <= data.len() {
			if data[pos] != 0xFF {
				err!(NotAPicture);
			}

			let marker = data[pos + 1];
			let segment_len = usize::from(u16::from_be_bytes([data[pos + 2], data[pos + 3]]));

			// Start of scan, no frame header was found
			if marker == 0xDA || segment_len < 2 {
				break;
			}

			if matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF) {
				let Some(mut frame) = data.get(pos + 5..pos + 9) else {
					err!(NotAPicture);
				};

				let height = u32::from(frame.read_u16::<BigEndian>()?);
				let width = u32::from(frame.read_u16::<BigEndian>()?);
				return Ok(Self { width, height });
			}

			pos += 2 + segment_len;
		}

		err!(NotAPicture)
	}
}

/// A picture, along with the metadata tag systems store for it
///
/// Equality and deduplication are based on a content hash over the payload and type, computed
/// the first time it is needed and discarded whenever either changes.
#[derive(Clone)]
pub struct PictureInfo {
	pub(crate) picture_type: PictureType,
	pub(crate) native_code: NativeCode,
	pub(crate) mime_type: Option<MimeType>,
	pub(crate) description: Option<String>,
	pub(crate) data: Vec<u8>,
	hash: OnceLock<u64>,
}

impl PictureInfo {
	/// Create a picture from a normalized type
	///
	/// The native code defaults to the ID3v2 type byte.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::picture::{MimeType, NativeCode, PictureInfo, PictureType};
	///
	/// let cover = PictureInfo::new(PictureType::Front, Some(MimeType::Png), vec![1, 2, 3]);
	/// assert_eq!(cover.native_code(), &NativeCode::Id3v2(3));
	/// ```
	pub fn new(picture_type: PictureType, mime_type: Option<MimeType>, data: Vec<u8>) -> Self {
		Self {
			picture_type,
			native_code: NativeCode::Id3v2(picture_type.as_id3v2_byte()),
			mime_type,
			description: None,
			data,
			hash: OnceLock::new(),
		}
	}

	/// Create a picture from the code a tag system stores
	///
	/// The normalized type is derived from `native_code`, and is [`PictureType::Unsupported`]
	/// when there is no equivalent.
	pub fn from_native(native_code: NativeCode, mime_type: Option<MimeType>, data: Vec<u8>) -> Self {
		Self {
			picture_type: native_code.picture_type(),
			native_code,
			mime_type,
			description: None,
			data,
			hash: OnceLock::new(),
		}
	}

	/// Set the description, returning `self`
	#[must_use]
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// The normalized picture type
	pub fn picture_type(&self) -> PictureType {
		self.picture_type
	}

	/// The type code as stored by the tag system
	pub fn native_code(&self) -> &NativeCode {
		&self.native_code
	}

	/// The declared MIME type, if any
	pub fn mime_type(&self) -> Option<&MimeType> {
		self.mime_type.as_ref()
	}

	/// The picture's description, if any
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// The picture's payload
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Replace the payload
	pub fn set_data(&mut self, data: Vec<u8>) {
		self.data = data;
		self.hash = OnceLock::new();
	}

	/// Replace the native code, updating the normalized type to match
	pub fn set_native_code(&mut self, native_code: NativeCode) {
		self.picture_type = native_code.picture_type();
		self.native_code = native_code;
		self.hash = OnceLock::new();
	}

	/// Set or clear the description
	pub fn set_description(&mut self, description: Option<String>) {
		self.description = description;
	}

	/// Set or clear the MIME type
	pub fn set_mime_type(&mut self, mime_type: Option<MimeType>) {
		self.mime_type = mime_type;
	}

	/// The MIME type, falling back to sniffing the payload
	pub fn effective_mime_type(&self) -> Option<MimeType> {
		self.mime_type
			.clone()
			.or_else(|| MimeType::sniff(&self.data).ok())
	}

	/// The content hash over the payload and type
	pub fn content_hash(&self) -> u64 {
		*self.hash.get_or_init(|| {
			let mut hasher = DefaultHasher::new();
			self.native_code.as_id3v2_byte().hash(&mut hasher);
			self.data.hash(&mut hasher);
			hasher.finish()
		})
	}
}

impl PartialEq for PictureInfo {
	fn eq(&self, other: &Self) -> bool {
		self.content_hash() == other.content_hash()
			&& self.native_code == other.native_code
			&& self.description == other.description
			&& self.data == other.data
	}
}

impl Eq for PictureInfo {}

impl Debug for PictureInfo {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PictureInfo")
			.field("picture_type", &self.picture_type)
			.field("native_code", &self.native_code)
			.field("mime_type", &self.mime_type)
			.field("description", &self.description)
			.field("data", &format_args!("<{} bytes>", self.data.len()))
			.finish()
	}
}
