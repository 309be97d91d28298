use crate::ape::constants::INVALID_KEYS;
use crate::error::Result;
use crate::macros::decode_err;

/// The value of an [`ApeItem`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApeItemValue {
	/// UTF-8 text, multiple values are separated by null bytes
	Text(String),
	/// Arbitrary binary data, such as a picture
	Binary(Vec<u8>),
	/// A UTF-8 link to an external resource
	Locator(String),
}

impl ApeItemValue {
	/// The item type, as stored in bits 1 and 2 of the item flags
	pub(crate) fn type_flags(&self) -> u32 {
		match self {
			ApeItemValue::Text(_) => 0,
			ApeItemValue::Binary(_) => 1 << 1,
			ApeItemValue::Locator(_) => 2 << 1,
		}
	}

	pub(crate) fn as_bytes(&self) -> &[u8] {
		match self {
			ApeItemValue::Text(text) | ApeItemValue::Locator(text) => text.as_bytes(),
			ApeItemValue::Binary(data) => data,
		}
	}
}

/// Represents an `APE` tag item
///
/// The restrictions for `APE` lie in the key rather than the value,
/// so these are still able to use [`ApeItemValue`]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApeItem {
	/// Whether or not to mark the item as read only
	pub read_only: bool,
	pub(crate) key: String,
	pub(crate) value: ApeItemValue,
}

impl ApeItem {
	/// Create an [`ApeItem`]
	///
	/// # Errors
	///
	/// * `key` is illegal ("ID3", "TAG", "OGGS", "MP+")
	/// * `key` has a bad length (must be 2 to 255 inclusive)
	/// * `key` contains invalid characters (must be in the range 0x20 to 0x7E, inclusive)
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::ape::{ApeItem, ApeItemValue};
	///
	/// let item = ApeItem::new(String::from("Title"), ApeItemValue::Text(String::from("Title")));
	/// assert!(item.is_ok());
	///
	/// let item = ApeItem::new(String::from("TAG"), ApeItemValue::Text(String::from("Title")));
	/// assert!(item.is_err());
	/// ```
	pub fn new(key: String, value: ApeItemValue) -> Result<Self> {
		if INVALID_KEYS.contains(&&*key.to_uppercase()) {
			decode_err!(@BAIL Ape, "APE tag item contains an illegal key");
		}

		if !(2..=255).contains(&key.len()) {
			decode_err!(@BAIL Ape, "APE tag item key has an invalid length (< 2 || > 255)");
		}

		if key.chars().any(|c| !(' '..='~').contains(&c)) {
			decode_err!(@BAIL Ape, "APE tag item key contains invalid characters");
		}

		Ok(Self {
			read_only: false,
			key,
			value,
		})
	}

	/// Returns the item key
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the item value
	pub fn value(&self) -> &ApeItemValue {
		&self.value
	}

	/// The item flags: the read-only bit and the item type
	pub(crate) fn flags(&self) -> u32 {
		self.value.type_flags() | u32::from(self.read_only)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn text(key: &str) -> Result<ApeItem> {
		ApeItem::new(key.to_owned(), ApeItemValue::Text(String::from("value")))
	}

	#[test_log::test]
	fn key_validation() {
		assert!(text("Cover Art (Front)").is_ok());
		assert!(text("id3").is_err());
		assert!(text("Oggs").is_err());
		assert!(text("A").is_err());
		assert!(text(&"A".repeat(256)).is_err());
		assert!(text("Tab\tKey").is_err());
		assert!(text("Ünicode").is_err());
	}

	#[test_log::test]
	fn flags() {
		let mut item = ApeItem::new(String::from("Link"), ApeItemValue::Locator(String::new()))
			.unwrap();
		assert_eq!(item.flags(), 0b100);

		item.read_only = true;
		assert_eq!(item.flags(), 0b101);
	}
}
