use super::restrictions::TagRestrictions;
use super::util::synchsafe::SynchsafeInteger;
use crate::error::Result;
use crate::macros::{err, id3v2_err, try_vec};

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// The major version byte
	pub fn major(self) -> u8 {
		match self {
			Id3v2Version::V2 => 2,
			Id3v2Version::V3 => 3,
			Id3v2Version::V4 => 4,
		}
	}
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised
	pub unsynchronisation: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer (ID3v2.4 only)
	pub footer: bool,
	/// Whether the extended header carries a CRC-32
	pub crc: bool,
	/// Restrictions on the tag, written in the extended header
	pub restrictions: Option<TagRestrictions>,
}

impl Id3v2TagFlags {
	/// The header flag byte for `version`
	///
	/// NOTE: The extended header bit is decided by the writer
	pub fn as_byte(&self, version: Id3v2Version) -> u8 {
		let mut byte = 0;

		if self.unsynchronisation {
			byte |= 0x80;
		}

		if self.experimental && version != Id3v2Version::V2 {
			byte |= 0x20;
		}

		if self.footer && version == Id3v2Version::V4 {
			byte |= 0x10;
		}

		byte
	}
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents, including the extended header (**NOT THE HEADER/FOOTER**)
	pub size: u32,
	/// The size of the extended header, including its own size field
	pub extended_size: u32,
}

impl Id3v2Header {
	pub(crate) const SIZE: u32 = 10;

	pub(crate) fn parse<R>(bytes: &mut R) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; 10];
		bytes.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			err!(FakeTag);
		}

		// Version is stored as [major, minor], but here we don't care about minor revisions unless there's an error.
		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => id3v2_err!(BadId3v2Version(major, header[4])),
		};

		let flags = header[5];

		// Compression was a flag only used in ID3v2.2 (bit 2).
		// A compression scheme was never decided, so the tag can't be read.
		if version == Id3v2Version::V2 && flags & 0x40 == 0x40 {
			id3v2_err!(V2Compression);
		}

		let mut parsed_flags = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			experimental: version != Id3v2Version::V2 && flags & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
			crc: false,
			restrictions: None,
		};

		let size = BigEndian::read_u32(&header[6..]).checked_unsynch()?;
		let mut extended_size = 0;

		if version != Id3v2Version::V2 && flags & 0x40 == 0x40 {
			extended_size = match version {
				Id3v2Version::V4 => Self::parse_v4_extended(bytes, size, &mut parsed_flags)?,
				_ => Self::parse_v3_extended(bytes, size, &mut parsed_flags)?,
			};

		}

		log::debug!(
			"Found an ID3v2.{} tag, {size} bytes (extended header: {extended_size} bytes)",
			version.major()
		);

		Ok(Id3v2Header {
			version,
			flags: parsed_flags,
			size,
			extended_size,
		})
	}

	// Size (synchsafe, includes itself), flag byte count, flags, then a length-prefixed
	// blob for every set flag
	fn parse_v4_extended<R: Read>(
		bytes: &mut R,
		tag_size: u32,
		flags: &mut Id3v2TagFlags,
	) -> Result<u32> {
		let extended_size = bytes.read_u32::<BigEndian>()?.checked_unsynch()?;
		if extended_size < 6 || extended_size >= tag_size {
			id3v2_err!(BadExtendedHeaderSize);
		}

		let mut content = try_vec![0; (extended_size - 4) as usize];
		bytes.read_exact(&mut content)?;

		let mut content = &content[..];
		let flag_bytes = content.read_u8()?;
		if flag_bytes != 1 {
			id3v2_err!(BadExtendedHeaderSize);
		}

		let extended_flags = content.read_u8()?;

		// Tag is an update, no data
		if extended_flags & 0x40 == 0x40 {
			let _len = content.read_u8()?;
		}

		if extended_flags & 0x20 == 0x20 {
			flags.crc = true;

			// Length byte (always 5) and the synchsafe CRC, recomputed on write
			let mut crc = [0; 6];
			content.read_exact(&mut crc)?;
		}

		if extended_flags & 0x10 == 0x10 {
			let _len = content.read_u8()?;
			flags.restrictions = Some(TagRestrictions::from_byte(content.read_u8()?));
		}

		Ok(extended_size)
	}

	// Size (plain, excludes itself), 2 flag bytes, padding size, optional CRC
	fn parse_v3_extended<R: Read>(
		bytes: &mut R,
		tag_size: u32,
		flags: &mut Id3v2TagFlags,
	) -> Result<u32> {
		let content_size = bytes.read_u32::<BigEndian>()?;
		if (content_size != 6 && content_size != 10) || content_size + 4 >= tag_size {
			id3v2_err!(BadExtendedHeaderSize);
		}

		let mut content = [0; 10];
		let content = &mut content[..content_size as usize];
		bytes.read_exact(content)?;

		flags.crc = content[0] & 0x80 == 0x80;
		Ok(content_size + 4)
	}

	/// The total size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> u32 {
		Self::SIZE + self.size + if self.flags.footer { 10 } else { 0 }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{ErrorKind, Id3v2ErrorKind};
	use crate::id3::v2::TagSizeRestrictions;

	#[test_log::test]
	fn v4_extended_header_with_restrictions() {
		#[rustfmt::skip]
		let tag = [
			b'I', b'D', b'3', 4, 0, 0x40, 0, 0, 0, 0x20,
			// Extended header: 8 bytes, 1 flag byte, restrictions
			0, 0, 0, 8, 1, 0x10, 1, 0x80,
		];

		let header = Id3v2Header::parse(&mut &tag[..]).unwrap();
		assert_eq!(header.version, Id3v2Version::V4);
		assert_eq!(header.extended_size, 8);
		assert_eq!(header.full_tag_size(), 10 + 0x20);
		assert_eq!(
			header.flags.restrictions.map(|r| r.size),
			Some(TagSizeRestrictions::S_32F_40K)
		);
	}

	#[test_log::test]
	fn v3_extended_header_with_crc() {
		#[rustfmt::skip]
		let tag = [
			b'I', b'D', b'3', 3, 0, 0x40, 0, 0, 0, 0x40,
			0, 0, 0, 10, 0x80, 0, 0, 0, 0, 0, 0xDE, 0xAD, 0xBE, 0xEF,
		];

		let header = Id3v2Header::parse(&mut &tag[..]).unwrap();
		assert!(header.flags.crc);
		assert_eq!(header.extended_size, 14);
	}

	#[test_log::test]
	fn rejects_bad_headers() {
		assert!(Id3v2Header::parse(&mut &b"TAG\x04\x00\x00\x00\x00\x00\x00"[..]).is_err());
		assert!(Id3v2Header::parse(&mut &b"ID3\x05\x00\x00\x00\x00\x00\x00"[..]).is_err());
		// High bit set in the size
		assert!(Id3v2Header::parse(&mut &b"ID3\x04\x00\x00\x00\x00\x00\x80"[..]).is_err());
		// ID3v2.2 compression
		assert!(Id3v2Header::parse(&mut &b"ID3\x02\x00\x40\x00\x00\x00\x10"[..]).is_err());
	}

	#[test_log::test]
	fn extended_header_larger_than_the_tag() {
		#[rustfmt::skip]
		let tag = [
			b'I', b'D', b'3', 4, 0, 0x40, 0, 0, 0, 0x20,
			// Extended header claiming ~256 MiB, with nothing behind it
			0x7F, 0x7F, 0x7F, 0x7F, 1, 0, 0, 0, 0, 0,
		];

		let err = Id3v2Header::parse(&mut &tag[..]).unwrap_err();
		let ErrorKind::Id3v2(err) = err.kind() else {
			panic!("Expected an ID3v2 error, got {err:?}");
		};
		assert!(matches!(err.kind(), Id3v2ErrorKind::BadExtendedHeaderSize));

		#[rustfmt::skip]
		let tag = [
			b'I', b'D', b'3', 3, 0, 0x40, 0, 0, 0, 0x08,
			0, 0, 0, 10, 0x80, 0, 0, 0, 0, 0, 0xDE, 0xAD, 0xBE, 0xEF,
		];
		assert!(Id3v2Header::parse(&mut &tag[..]).is_err());
	}
}
