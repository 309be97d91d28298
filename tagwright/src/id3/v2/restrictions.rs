/// Restrictions on the tag size
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TagSizeRestrictions {
	/// No more than 128 frames and 1 MB total tag size
	#[default]
	S_128F_1M,
	/// No more than 64 frames and 128 KB total tag size
	S_64F_128K,
	/// No more than 32 frames and 40 KB total tag size
	S_32F_40K,
	/// No more than 32 frames and 4 KB total tag size
	S_32F_4K,
}

impl TagSizeRestrictions {
	/// The maximum number of frames
	pub fn max_frames(self) -> usize {
		match self {
			Self::S_128F_1M => 128,
			Self::S_64F_128K => 64,
			Self::S_32F_40K | Self::S_32F_4K => 32,
		}
	}

	/// The maximum size of the whole tag in bytes
	pub fn max_size(self) -> u32 {
		match self {
			Self::S_128F_1M => 1024 * 1024,
			Self::S_64F_128K => 128 * 1024,
			Self::S_32F_40K => 40 * 1024,
			Self::S_32F_4K => 4 * 1024,
		}
	}
}

/// Restrictions on text field sizes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextSizeRestrictions {
	/// No longer than 1024 characters
	C_1024,
	/// No longer than 128 characters
	C_128,
	/// No longer than 30 characters
	C_30,
}

impl TextSizeRestrictions {
	/// The maximum number of characters in a text field
	pub fn max_chars(self) -> usize {
		match self {
			Self::C_1024 => 1024,
			Self::C_128 => 128,
			Self::C_30 => 30,
		}
	}
}

/// Restrictions on all image sizes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum ImageSizeRestrictions {
	/// All images are 256x256 or smaller
	P_256,
	/// All images are 64x64 or smaller
	P_64,
	/// All images are **exactly** 64x64
	P_64_64,
}

impl ImageSizeRestrictions {
	/// Whether an image of `width`x`height` is allowed
	pub fn allows(self, width: u32, height: u32) -> bool {
		match self {
			Self::P_256 => width <= 256 && height <= 256,
			Self::P_64 => width <= 64 && height <= 64,
			Self::P_64_64 => width == 64 && height == 64,
		}
	}

	pub(crate) fn description(self) -> &'static str {
		match self {
			Self::P_256 => "256x256 or less",
			Self::P_64 => "64x64 or less",
			Self::P_64_64 => "exactly 64x64",
		}
	}
}

/// Restrictions on the content of an ID3v2 tag, stored in the ID3v2.4 extended header
///
/// Restrictions are advisory, violations are reported but never block a write.
///
/// See <https://id3.org/id3v2.4.0-structure> section 3.2, item d.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TagRestrictions {
	/// Restriction on the size of the tag. See [`TagSizeRestrictions`]
	pub size: TagSizeRestrictions,
	/// Text encoding restrictions
	///
	/// `false` - No restrictions
	/// `true` - Strings are only encoded with [`TextEncoding::Latin1`](crate::TextEncoding::Latin1) or [`TextEncoding::UTF8`](crate::TextEncoding::UTF8)
	pub text_encoding: bool,
	/// Restrictions on all text field sizes. See [`TextSizeRestrictions`]
	pub text_fields_size: Option<TextSizeRestrictions>,
	/// Image encoding restrictions
	///
	/// `false` - No restrictions
	/// `true` - Images can only be `PNG` or `JPEG`
	pub image_encoding: bool,
	/// Restrictions on all image sizes. See [`ImageSizeRestrictions`]
	pub image_size: Option<ImageSizeRestrictions>,
}

impl TagRestrictions {
	/// Read a [`TagRestrictions`] from a byte
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::id3::v2::{ImageSizeRestrictions, TagRestrictions, TagSizeRestrictions};
	///
	/// // %11000011, 32 frames/4 KB and exactly 64x64 images
	/// let restrictions = TagRestrictions::from_byte(0xC3);
	/// assert_eq!(restrictions.size, TagSizeRestrictions::S_32F_4K);
	/// assert_eq!(restrictions.image_size, Some(ImageSizeRestrictions::P_64_64));
	/// ```
	pub fn from_byte(byte: u8) -> Self {
		let size = match byte & 0xC0 {
			0x40 => TagSizeRestrictions::S_64F_128K,
			0x80 => TagSizeRestrictions::S_32F_40K,
			0xC0 => TagSizeRestrictions::S_32F_4K,
			_ => TagSizeRestrictions::S_128F_1M,
		};

		let text_fields_size = match byte & 0x18 {
			0x08 => Some(TextSizeRestrictions::C_1024),
			0x10 => Some(TextSizeRestrictions::C_128),
			0x18 => Some(TextSizeRestrictions::C_30),
			_ => None,
		};

		let image_size = match byte & 0x03 {
			1 => Some(ImageSizeRestrictions::P_256),
			2 => Some(ImageSizeRestrictions::P_64),
			3 => Some(ImageSizeRestrictions::P_64_64),
			_ => None,
		};

		Self {
			size,
			text_encoding: byte & 0x20 == 0x20,
			text_fields_size,
			image_encoding: byte & 0x04 == 0x04,
			image_size,
		}
	}

	/// Convert a [`TagRestrictions`] into a `u8`
	pub fn as_byte(self) -> u8 {
		let mut byte = match self.size {
			TagSizeRestrictions::S_128F_1M => 0,
			TagSizeRestrictions::S_64F_128K => 0x40,
			TagSizeRestrictions::S_32F_40K => 0x80,
			TagSizeRestrictions::S_32F_4K => 0xC0,
		};

		if self.text_encoding {
			byte |= 0x20;
		}

		byte |= match self.text_fields_size {
			Some(TextSizeRestrictions::C_1024) => 0x08,
			Some(TextSizeRestrictions::C_128) => 0x10,
			Some(TextSizeRestrictions::C_30) => 0x18,
			None => 0,
		};

		if self.image_encoding {
			byte |= 0x04;
		}

		byte |= match self.image_size {
			Some(ImageSizeRestrictions::P_256) => 0x01,
			Some(ImageSizeRestrictions::P_64) => 0x02,
			Some(ImageSizeRestrictions::P_64_64) => 0x03,
			None => 0,
		};

		byte
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn every_byte_survives() {
		// Every bit of the byte is meaningful, so all 256 values must be preserved
		for byte in 0..=u8::MAX {
			assert_eq!(TagRestrictions::from_byte(byte).as_byte(), byte);
		}
	}

	#[test_log::test]
	fn size_bits_are_the_top_two() {
		let restrictions = TagRestrictions::from_byte(0x80);
		assert_eq!(restrictions.size, TagSizeRestrictions::S_32F_40K);
		assert_eq!(restrictions.text_fields_size, None);
		assert_eq!(restrictions.size.max_size(), 40 * 1024);
		assert_eq!(restrictions.size.max_frames(), 32);
	}
}
