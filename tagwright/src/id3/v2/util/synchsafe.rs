//! Utilities for working with synchsafe integers and unsynchronised content
//!
//! ID3v2 avoids false MPEG frame syncs by never allowing `0xFF` to be followed by a byte
//! with its three high bits set. Sizes are stored using only the low 7 bits of each byte,
//! and frame bodies may have a `0x00` stuffed after every `0xFF`.

use crate::error::{Id3v2ErrorKind, Result};
use crate::macros::err;

use std::io::Read;

/// A reader that reverses unsynchronisation, dropping any `0x00` that directly follows `0xFF`
///
/// # Examples
///
/// ```rust
/// use std::io::{Cursor, Read};
/// use tagwright::id3::v2::util::synchsafe::UnsynchronizedStream;
///
/// # fn main() -> tagwright::error::Result<()> {
/// let content = [0xFF, 0x00, 0x1A, 0xFF, 0x00, 0x15];
///
/// let mut reader = UnsynchronizedStream::new(Cursor::new(content));
///
/// let mut restored = Vec::new();
/// reader.read_to_end(&mut restored)?;
///
/// assert_eq!(restored, [0xFF, 0x1A, 0xFF, 0x15]);
/// # Ok(()) }
/// ```
pub struct UnsynchronizedStream<R> {
	reader: R,
	buf: Box<[u8]>,
	filled: usize,
	pos: usize,
	after_ff: bool,
}

impl<R> UnsynchronizedStream<R> {
	/// Create a new [`UnsynchronizedStream`]
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			buf: vec![0; 8 * 1024].into_boxed_slice(),
			filled: 0,
			pos: 0,
			after_ff: false,
		}
	}

	/// Extract the reader, discarding the [`UnsynchronizedStream`]
	pub fn into_inner(self) -> R {
		self.reader
	}
}

impl<R: Read> Read for UnsynchronizedStream<R> {
	fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
		let mut written = 0;

		while written < out.len() {
			if self.pos == self.filled {
				self.filled = self.reader.read(&mut self.buf)?;
				self.pos = 0;

				if self.filled == 0 {
					break;
				}
			}

			let byte = self.buf[self.pos];
			self.pos += 1;

			if self.after_ff {
				self.after_ff = false;
				if byte == 0 {
					continue;
				}
			}

			out[written] = byte;
			written += 1;
			self.after_ff = byte == 0xFF;
		}

		Ok(written)
	}
}

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in 7 bits per byte
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> tagwright::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let synch_number = 0xFFF_FFFF_u32.synch()?;
	///
	/// assert_eq!(synch_number, 0x7F7F_7F7F);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Decode a synchsafe integer, ignoring the high bit of each byte
	fn unsynch(self) -> Self;

	/// Decode a synchsafe integer, erroring if any byte has its high bit set
	///
	/// # Errors
	///
	/// The value was not synchsafe
	fn checked_unsynch(self) -> Result<Self>;
}

macro_rules! impl_synchsafe {
	($($ty:ty),+) => {
		$(
			impl SynchsafeInteger for $ty {
				fn synch(self) -> Result<Self> {
					const BYTES: u32 = <$ty>::BITS / 8;
					const MAX: $ty = <$ty>::MAX >> BYTES;

					if self > MAX {
						err!(TooMuchData);
					}

					let mut out: $ty = 0;
					for i in 0..BYTES {
						out |= ((self >> (7 * i)) & 0x7F) << (8 * i);
					}

					Ok(out)
				}

				fn unsynch(self) -> Self {
					const BYTES: u32 = <$ty>::BITS / 8;

					let mut out: $ty = 0;
					for i in 0..BYTES {
						out |= ((self >> (8 * i)) & 0x7F) << (7 * i);
					}

					out
				}

				fn checked_unsynch(self) -> Result<Self> {
					const HIGH_BITS: $ty = <$ty>::from_ne_bytes([0x80; (<$ty>::BITS / 8) as usize]);

					if self & HIGH_BITS != 0 {
						return Err(Id3v2ErrorKind::BadSynchsafeSize.into());
					}

					Ok(self.unsynch())
				}
			}
		)+
	};
}

impl_synchsafe!(u16, u32);

#[cfg(test)]
mod tests {
	use crate::id3::v2::util::synchsafe::{SynchsafeInteger, UnsynchronizedStream};

	use std::io::{Cursor, Read};

	const UNSYNCHRONIZED_CONTENT: &[u8] =
		&[0xFF, 0x00, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00, 0x00];
	const EXPECTED: &[u8] = &[0xFF, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00];

	fn restore(content: &[u8]) -> Vec<u8> {
		let mut reader = UnsynchronizedStream::new(Cursor::new(content));

		let mut out = Vec::new();
		reader.read_to_end(&mut out).unwrap();
		out
	}

	#[test_log::test]
	fn unsynchronized_stream() {
		assert_eq!(restore(UNSYNCHRONIZED_CONTENT), EXPECTED);
	}

	#[test_log::test]
	fn unsynchronized_stream_across_buffer_refills() {
		let content = UNSYNCHRONIZED_CONTENT.repeat(1000);
		assert_eq!(restore(&content), EXPECTED.repeat(1000));
	}

	#[test_log::test]
	fn unsynchronized_stream_keeps_unrelated_bytes() {
		const ORIGINAL_CONTENT: &[u8] = &[0xFF, 0x1A, 0xFF, 0xC0, 0x10, 0x01];
		assert_eq!(restore(ORIGINAL_CONTENT), ORIGINAL_CONTENT);
	}

	#[test_log::test]
	fn checked_unsynch_rejects_high_bits() {
		assert!(0x0000_0180_u32.checked_unsynch().is_err());
		assert_eq!(0x0000_0201_u32.checked_unsynch().unwrap(), 257);
	}

	macro_rules! synchsafe_integer_tests {
		(
			$($int:ty => {
				synch: $original:literal, $new:literal;
				unsynch: $original_unsync:literal, $new_unsynch:literal;
			});+
		) => {
			$(
				paste::paste! {
					#[test_log::test]
					fn [<$int _synch>]() {
						assert_eq!($original.synch().unwrap(), $new);
					}

					#[test_log::test]
					fn [<$int _unsynch>]() {
						assert_eq!($original_unsync.unsynch(), $new_unsynch);
					}

					#[test_log::test]
					fn [<$int _synch_overflow>]() {
						assert!(<$int>::MAX.synch().is_err());
					}
				}
			)+
		};
	}

	synchsafe_integer_tests! {
		u16 => {
			synch:   0x3FFF_u16, 0x7F7F_u16;
			unsynch: 0x7F7F_u16, 0x3FFF_u16;
		};
		u32 => {
			synch:   0xFFF_FFFF_u32, 0x7F7F_7F7F_u32;
			unsynch: 0x7F7F_7F7F_u32, 0xFFF_FFFF_u32;
		}
	}
}
