use crate::id3::v2::TagRestrictions;
use crate::util::text::TextEncoding;

/// Options to control how tags are written
///
/// This acts as a dumping ground for all sorts of format-specific settings. As such, this is best
/// used as an application global config that gets set once.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) honor_restrictions: bool,
	pub(crate) forced_restrictions: Option<TagRestrictions>,
	pub(crate) default_text_encoding: TextEncoding,
	pub(crate) lossy_text_encoding: bool,
	pub(crate) leading_zeros: LeadingZeros,
	pub(crate) write_crc: bool,
}

impl WriteOptions {
	/// Default preferred padding size in bytes
	pub const DEFAULT_PREFERRED_PADDING: u32 = 1024;

	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: Some(Self::DEFAULT_PREFERRED_PADDING),
			honor_restrictions: true,
			forced_restrictions: None,
			default_text_encoding: TextEncoding::UTF8,
			lossy_text_encoding: false,
			leading_zeros: LeadingZeros::Never,
			write_crc: false,
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// This is used when a tag has to grow (or is created). A padding hint carried by the
	/// delta being written takes precedence.
	///
	/// NOTES:
	///
	/// * The actual padding size may be smaller, when tag restrictions limit the tag size
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::config::WriteOptions;
	///
	/// // I really don't want my files rewritten, so I'll double the padding size!
	/// let options = WriteOptions::new().preferred_padding(2048);
	///
	/// // ...Or I don't want padding under any circumstances!
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		match preferred_padding {
			0 => self.preferred_padding = None,
			_ => self.preferred_padding = Some(preferred_padding),
		}
		self
	}

	/// Whether to validate against tag restrictions
	///
	/// Restrictions are taken from the tag being replaced, or from
	/// [`WriteOptions::forced_restrictions`]. Violations never block a write, they are
	/// reported in the [`WriteReport`](crate::id3::v2::WriteReport).
	pub fn honor_restrictions(mut self, honor_restrictions: bool) -> Self {
		self.honor_restrictions = honor_restrictions;
		self
	}

	/// Restrictions to apply even when the existing tag declares none
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::config::WriteOptions;
	/// use tagwright::id3::v2::{TagRestrictions, TagSizeRestrictions};
	///
	/// let mut restrictions = TagRestrictions::default();
	/// restrictions.size = TagSizeRestrictions::S_32F_4K;
	///
	/// let options = WriteOptions::new().forced_restrictions(Some(restrictions));
	/// ```
	pub fn forced_restrictions(mut self, forced_restrictions: Option<TagRestrictions>) -> Self {
		self.forced_restrictions = forced_restrictions;
		self
	}

	/// The text encoding to use for frames that allow a choice
	///
	/// For ID3v2.3, UTF-8 and UTF-16BE are replaced with UTF-16. Latin-1 falls back to UTF-16
	/// for any string it can't represent.
	pub fn default_text_encoding(mut self, default_text_encoding: TextEncoding) -> Self {
		self.default_text_encoding = default_text_encoding;
		self
	}

	/// Whether to replace characters that can't be represented in a forced encoding
	///
	/// This only matters where an encoding can't be chosen, such as URLs (Latin-1).
	/// Unrepresentable characters are replaced with `?` instead of erroring.
	pub fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}

	/// How to format track and disc numbers
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::config::{LeadingZeros, WriteOptions};
	///
	/// // Write "03/12" rather than "3/12"
	/// let options = WriteOptions::new().leading_zeros(LeadingZeros::MatchTotal);
	/// ```
	pub fn leading_zeros(mut self, leading_zeros: LeadingZeros) -> Self {
		self.leading_zeros = leading_zeros;
		self
	}

	/// Whether to store a CRC-32 of the frame data in the extended header (ID3v2.4 only)
	pub fn write_crc(mut self, write_crc: bool) -> Self {
		self.write_crc = write_crc;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	preferred_padding: 1024,
	/// 	honor_restrictions: true,
	/// 	forced_restrictions: None,
	/// 	default_text_encoding: TextEncoding::UTF8,
	/// 	lossy_text_encoding: false,
	/// 	leading_zeros: LeadingZeros::Never,
	/// 	write_crc: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

/// Leading zero policy for track and disc numbers
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum LeadingZeros {
	/// Write numbers as-is ("3/12")
	#[default]
	Never,
	/// Pad the number (and total) to the width of the total, with a minimum of two digits ("03/12")
	MatchTotal,
	/// Pad both to a fixed width
	Always(u8),
}

impl LeadingZeros {
	/// Format a number/total pair
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::config::LeadingZeros;
	///
	/// assert_eq!(LeadingZeros::Never.format(3, Some(12)), "3/12");
	/// assert_eq!(LeadingZeros::MatchTotal.format(3, Some(4)), "03/04");
	/// assert_eq!(LeadingZeros::MatchTotal.format(7, Some(120)), "007/120");
	/// assert_eq!(LeadingZeros::Always(3).format(6, None), "006");
	/// ```
	pub fn format(self, number: u32, total: Option<u32>) -> String {
		let width = match self {
			LeadingZeros::Never => 0,
			LeadingZeros::MatchTotal => total.map_or(2, |t| t.to_string().len().max(2)),
			LeadingZeros::Always(width) => usize::from(width),
		};

		match total {
			Some(total) => format!("{number:0width$}/{total:0width$}"),
			None => format!("{number:0width$}"),
		}
	}
}
