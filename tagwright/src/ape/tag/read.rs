use super::ApeTag;
use super::item::{ApeItem, ApeItemValue};
use crate::ape::constants::INVALID_KEYS;
use crate::ape::header::ApeLocation;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::{decode_err, err, try_vec};
use crate::util::text::utf8_decode;

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

/// Read the items of the tag at `location`, the reader must be at the first item
pub(crate) fn read_ape_tag<R>(
	data: &mut R,
	location: &ApeLocation,
	parse_options: ParseOptions,
) -> Result<ApeTag>
where
	R: Read,
{
	let header = location.header;

	let mut items = try_vec![0; header.items_size() as usize];
	data.read_exact(&mut items)?;

	let mut tag = ApeTag {
		read_only: header.read_only(),
		items: Vec::new(),
	};

	let mut reader = &items[..];
	for _ in 0..header.item_count {
		if reader.len() < 11 {
			break;
		}

		let value_size = reader.read_u32::<LittleEndian>()?;
		let flags = reader.read_u32::<LittleEndian>()?;

		let Some(key_len) = reader.iter().position(|b| *b == 0) else {
			decode_err!(@BAIL Ape, "APE tag item key is not terminated");
		};

		let key = utf8_decode(reader[..key_len].to_vec())
			.map_err(|_| decode_err!(Ape, "APE tag item contains a non UTF-8 key"))?;
		reader = &reader[key_len + 1..];

		let Some(value) = reader.get(..value_size as usize) else {
			err!(SizeMismatch);
		};
		reader = &reader[value.len()..];

		if INVALID_KEYS.contains(&&*key.to_uppercase()) {
			decode_err!(@BAIL Ape, "APE tag item contains an illegal key");
		}

		if super::conversion::is_picture_key(&key) && !parse_options.read_cover_art {
			continue;
		}

		let read_only = (flags & 1) == 1;
		let item_type = (flags >> 1) & 3;

		if value.is_empty() {
			log::warn!("APE: Skipping empty item '{key}'");
			continue;
		}

		let value = value.to_vec();
		let parsed_value = match item_type {
			0 => ApeItemValue::Text(utf8_decode(value).map_err(|_| {
				decode_err!(Ape, "Failed to convert text item into a UTF-8 string")
			})?),
			1 => ApeItemValue::Binary(value),
			2 => ApeItemValue::Locator(utf8_decode(value).map_err(|_| {
				decode_err!(Ape, "Failed to convert locator item into a UTF-8 string")
			})?),
			_ => decode_err!(@BAIL Ape, "APE tag item contains an invalid item type"),
		};

		let mut item = match ApeItem::new(key, parsed_value) {
			Ok(item) => item,
			Err(err) => {
				log::warn!("APE: Skipping item: {err}");
				continue;
			},
		};

		item.read_only = read_only;
		tag.insert(item);
	}

	Ok(tag)
}
