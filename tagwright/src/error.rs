//! Contains the errors that can arise within tagwright
//!
//! The primary error is [`TagError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::tag::TagSystem;
pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, TagError>`
pub type Result<T> = std::result::Result<T, TagError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Data related errors
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,
	/// Expected the data to be a different size than provided
	///
	/// This occurs when the size of an item is written as one value, but that size is either too
	/// big or small to be valid within the bounds of that item.
	SizeMismatch,
	/// Errors that occur while decoding a tag
	TagDecoding(TagDecodingError),
	/// Errors that occur while encoding a tag
	TagEncoding(TagEncodingError),

	// Picture related errors
	/// Provided an invalid picture
	NotAPicture,
	/// Attempted to write a picture that the format does not support
	UnsupportedPicture,

	// Tag related errors
	/// Arises when writing a tag system that the container was declared not to support
	UnsupportedTag,
	/// Arises when a tag is expected, but isn't found
	FakeTag,
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while encoding text
	TextEncode(TextEncodingError),
	/// Arises when decoding OR encoding a problematic [`Timestamp`](crate::tag::Timestamp)
	BadTimestamp(&'static str),
	/// Errors that arise while reading/writing ID3v2 tags
	Id3v2(Id3v2Error),

	// Conversions for external errors
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Unable to convert bytes to a str
	StrFromUtf8(std::str::Utf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Represents all cases of [`std::fmt::Error`].
	Fmt(std::fmt::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
	/// This should **never** be encountered
	Infallible(std::convert::Infallible),
}

/// The types of errors that can occur while interacting with ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	// Header
	/// Arises when an invalid ID3v2 version is found
	BadId3v2Version(u8, u8),
	/// Arises when a compressed ID3v2.2 tag is encountered
	///
	/// At the time the ID3v2.2 specification was written, a compression scheme wasn't decided.
	/// As such, it is recommended to ignore the tag entirely.
	V2Compression,
	/// Arises when an extended header has an invalid size (must be >= 6 bytes and less than the total tag size)
	BadExtendedHeaderSize,
	/// Arises when a size field that should be synchsafe has a byte with its high bit set
	BadSynchsafeSize,

	// Frame
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	/// or if the ID is too short/long.
	BadFrameId(Vec<u8>),
	/// Arises when a frame doesn't have enough data
	BadFrameLength,
	/// Arises when a frame declares more bytes than remain in the tag
	FrameOverrun {
		/// The declared frame body size
		declared: u32,
		/// The number of bytes left in the tag
		remaining: u64,
	},
	/// Arises when a frame with no content is parsed with [ParsingMode::Strict](crate::config::ParsingMode::Strict)
	EmptyFrame(String),
	/// Arises when reading a compressed frame with no data length indicator
	MissingDataLengthIndicator,
	/// Arises when a text encoding other than Latin-1 or UTF-16 appear in an ID3v2.2 tag
	V2InvalidTextEncoding,
	/// Arises when an invalid picture format is parsed. Only applicable to [`Id3v2Version::V2`](crate::id3::v2::Id3v2Version::V2)
	BadPictureFormat(String),
	/// Arises when invalid data is encountered while reading an ID3v2 synchronized text frame
	BadSyncText,
	/// Arises when decoding a synchronized lyrics frame with an unknown timestamp format
	BadTimestampFormat,
	/// Arises when a `CHAP` or `CTOC` frame has no element ID
	MissingElementId,

	// Compression
	#[cfg(feature = "id3v2_compression_support")]
	/// Arises when a compressed frame is unable to be decompressed
	Decompression(flate2::DecompressError),
	#[cfg(not(feature = "id3v2_compression_support"))]
	/// Arises when a compressed frame is encountered, but support is disabled
	CompressedFrameEncountered,

	// Writing
	/// Arises when attempting to write a tag with a version other than ID3v2.3 or ID3v2.4
	UnsupportedWriteVersion,
	/// Arises when attempting to write a comment or lyrics frame with an invalid language
	InvalidLanguage([u8; 3]),
	/// Arises when a table of contents lists more than 255 children
	TooManyChapters(usize),
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			// Header
			Self::BadId3v2Version(major, minor) => write!(
				f,
				"Found an invalid version (v{major}.{minor}), expected any major revision in: (2, \
				 3, 4)"
			),
			Self::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),
			Self::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},
			Self::BadSynchsafeSize => write!(f, "Found a size that is not synchsafe"),

			// Frame
			Self::BadFrameId(frame_id) => write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}"),
			Self::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			Self::FrameOverrun {
				declared,
				remaining,
			} => write!(
				f,
				"Frame declares {declared} bytes, but only {remaining} remain in the tag"
			),
			Self::EmptyFrame(id) => write!(f, "Frame `{id}` is empty"),
			Self::MissingDataLengthIndicator => write!(
				f,
				"Encountered a compressed frame without a data length indicator"
			),
			Self::V2InvalidTextEncoding => {
				write!(f, "ID3v2.2 only supports Latin-1 and UTF-16 encodings")
			},
			Self::BadPictureFormat(format) => {
				write!(f, "Picture: Found unexpected format \"{format}\"")
			},
			Self::BadSyncText => write!(f, "Encountered invalid data in SYLT frame"),
			Self::BadTimestampFormat => write!(
				f,
				"Encountered an invalid timestamp format in a synchronized frame"
			),
			Self::MissingElementId => write!(f, "Chapter frame is missing its element ID"),

			// Compression
			#[cfg(feature = "id3v2_compression_support")]
			Self::Decompression(err) => write!(f, "Failed to decompress frame: {err}"),
			#[cfg(not(feature = "id3v2_compression_support"))]
			Self::CompressedFrameEncountered => write!(
				f,
				"Encountered a compressed ID3v2 frame, support is disabled"
			),

			// Writing
			Self::UnsupportedWriteVersion => {
				write!(f, "Only ID3v2.3 and ID3v2.4 tags can be written")
			},
			Self::InvalidLanguage(lang) => write!(
				f,
				"Invalid frame language found: {lang:?} (expected 3 ascii characters)"
			),
			Self::TooManyChapters(count) => write!(
				f,
				"A table of contents can reference at most 255 chapters, got {count}"
			),
		}
	}
}

/// An error that arises while interacting with an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// An error that arises while decoding a tag
pub struct TagDecodingError {
	system: Option<TagSystem>,
	description: &'static str,
}

impl TagDecodingError {
	/// Create a `TagDecodingError` from a [`TagSystem`] and description
	#[must_use]
	pub const fn new(system: TagSystem, description: &'static str) -> Self {
		Self {
			system: Some(system),
			description,
		}
	}

	/// Create a `TagDecodingError` without binding it to a [`TagSystem`]
	pub fn from_description(description: &'static str) -> Self {
		Self {
			system: None,
			description,
		}
	}

	/// Returns the associated [`TagSystem`], if one exists
	pub fn system(&self) -> Option<TagSystem> {
		self.system
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for TagDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(system) = self.system {
			write!(f, "{:?}: {:?}", system, self.description)
		} else {
			write!(f, "{:?}", self.description)
		}
	}
}

impl Display for TagDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(system) = self.system {
			write!(f, "{:?}: {}", system, self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// An error that arises while encoding a tag
pub struct TagEncodingError {
	system: Option<TagSystem>,
	description: &'static str,
}

impl TagEncodingError {
	/// Create a `TagEncodingError` from a [`TagSystem`] and description
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::error::TagEncodingError;
	/// use tagwright::tag::TagSystem;
	///
	/// let ape_error = TagEncodingError::new(TagSystem::Ape, "Item key is too long");
	/// ```
	#[must_use]
	pub const fn new(system: TagSystem, description: &'static str) -> Self {
		Self {
			system: Some(system),
			description,
		}
	}

	/// Create a `TagEncodingError` without binding it to a [`TagSystem`]
	pub fn from_description(description: &'static str) -> Self {
		Self {
			system: None,
			description,
		}
	}

	/// Returns the associated [`TagSystem`], if one exists
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::error::TagEncodingError;
	/// use tagwright::tag::TagSystem;
	///
	/// let ape_error = TagEncodingError::new(TagSystem::Ape, "Item key is too long");
	///
	/// assert_eq!(ape_error.system(), Some(TagSystem::Ape));
	/// ```
	pub fn system(&self) -> Option<TagSystem> {
		self.system
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for TagEncodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(system) = self.system {
			write!(f, "{:?}: {:?}", system, self.description)
		} else {
			write!(f, "{:?}", self.description)
		}
	}
}

impl Display for TagEncodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(system) = self.system {
			write!(f, "{:?}: {}", system, self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// Errors that could occur within tagwright
pub struct TagError {
	pub(crate) kind: ErrorKind,
}

impl TagError {
	/// Create a `TagError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::error::{ErrorKind, TagError};
	///
	/// let fake_tag = TagError::new(ErrorKind::FakeTag);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Whether this error originated from the underlying stream
	///
	/// Read operations only ever surface these, everything else is reported as "no tag".
	pub fn is_io(&self) -> bool {
		matches!(self.kind, ErrorKind::Io(_))
	}
}

impl std::error::Error for TagError {}

impl Debug for TagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<Id3v2Error> for TagError {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl From<Id3v2ErrorKind> for TagError {
	fn from(input: Id3v2ErrorKind) -> Self {
		Self {
			kind: ErrorKind::Id3v2(Id3v2Error::new(input)),
		}
	}
}

impl From<TagDecodingError> for TagError {
	fn from(input: TagDecodingError) -> Self {
		Self {
			kind: ErrorKind::TagDecoding(input),
		}
	}
}

impl From<TagEncodingError> for TagError {
	fn from(input: TagEncodingError) -> Self {
		Self {
			kind: ErrorKind::TagEncoding(input),
		}
	}
}

impl From<TextEncodingError> for TagError {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::TextEncode(input),
		}
	}
}

impl From<std::io::Error> for TagError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::fmt::Error> for TagError {
	fn from(input: std::fmt::Error) -> Self {
		Self {
			kind: ErrorKind::Fmt(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for TagError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<std::str::Utf8Error> for TagError {
	fn from(input: std::str::Utf8Error) -> Self {
		Self {
			kind: ErrorKind::StrFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for TagError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<std::convert::Infallible> for TagError {
	fn from(input: std::convert::Infallible) -> Self {
		Self {
			kind: ErrorKind::Infallible(input),
		}
	}
}

impl Display for TagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::StrFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Fmt(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::NotAPicture => write!(f, "Picture: Encountered invalid data"),
			ErrorKind::UnsupportedPicture => {
				write!(f, "Picture: attempted to write an unsupported picture")
			},
			ErrorKind::UnsupportedTag => write!(
				f,
				"Attempted to write a tag system the container does not support"
			),
			ErrorKind::FakeTag => write!(f, "Reading: Expected a tag, found invalid data"),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(ref message) => write!(f, "Text encoding: {message}"),
			ErrorKind::BadTimestamp(message) => {
				write!(f, "Encountered an invalid timestamp: {message}")
			},
			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),

			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),
			ErrorKind::TagDecoding(ref decode_err) => write!(f, "{decode_err}"),
			ErrorKind::TagEncoding(ref encode_err) => write!(f, "{encode_err}"),

			ErrorKind::Infallible(_) => write!(f, "A expected condition was not upheld"),
		}
	}
}
