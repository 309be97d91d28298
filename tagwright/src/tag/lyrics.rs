/// What a block of lyrics-like text contains
///
/// The values match the ID3v2 `SYLT` content type byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum LyricsContentType {
	Other = 0,
	#[default]
	Lyrics = 1,
	TextTranscription = 2,
	/// Movement or part name
	MovementName = 3,
	/// Events, such as "Don Quijote enters the stage"
	Events = 4,
	Chord = 5,
	/// Trivia or "pop up" information
	Trivia = 6,
	WebpageUrls = 7,
	ImageUrls = 8,
}

impl LyricsContentType {
	/// Get a `LyricsContentType` from a `SYLT` content type byte
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Other),
			1 => Some(Self::Lyrics),
			2 => Some(Self::TextTranscription),
			3 => Some(Self::MovementName),
			4 => Some(Self::Events),
			5 => Some(Self::Chord),
			6 => Some(Self::Trivia),
			7 => Some(Self::WebpageUrls),
			8 => Some(Self::ImageUrls),
			_ => None,
		}
	}
}

/// One timed phrase of synchronized lyrics
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LyricsPhrase {
	/// Position of the phrase, in milliseconds
	pub timestamp_ms: u32,
	/// The phrase
	pub text: String,
}

/// The content of a [`LyricsInfo`]
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LyricsBody {
	/// A single block of text (ID3v2 `USLT`)
	Unsynchronized(String),
	/// Timed phrases in playback order (ID3v2 `SYLT`)
	Synchronized(Vec<LyricsPhrase>),
}

/// A block of lyrics, either plain or synchronized
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LyricsInfo {
	/// The content type, only stored for synchronized lyrics
	pub content_type: LyricsContentType,
	/// ISO-639-2 language code
	pub language: [u8; 3],
	/// A description of the content
	pub description: String,
	/// The lyrics
	pub body: LyricsBody,
}

impl LyricsInfo {
	/// Plain lyrics with an empty description
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::tag::{LyricsBody, LyricsInfo};
	///
	/// let lyrics = LyricsInfo::unsynchronized(*b"eng", "La la la");
	/// assert_eq!(lyrics.body, LyricsBody::Unsynchronized(String::from("La la la")));
	/// ```
	pub fn unsynchronized(language: [u8; 3], text: impl Into<String>) -> Self {
		Self {
			content_type: LyricsContentType::Lyrics,
			language,
			description: String::new(),
			body: LyricsBody::Unsynchronized(text.into()),
		}
	}

	/// Synchronized lyrics with an empty description
	///
	/// Phrases are kept in the order given.
	pub fn synchronized(language: [u8; 3], phrases: Vec<LyricsPhrase>) -> Self {
		Self {
			content_type: LyricsContentType::Lyrics,
			language,
			description: String::new(),
			body: LyricsBody::Synchronized(phrases),
		}
	}

	/// Whether the body is timed
	pub fn is_synchronized(&self) -> bool {
		matches!(self.body, LyricsBody::Synchronized(_))
	}
}
