use super::ApeTag;
use super::item::{ApeItem, ApeItemValue};
use crate::ape::mappings::{ape_key_for_field, field_from_ape_key};
use crate::config::{LeadingZeros, ParseOptions, ParsingMode, WriteOptions, global_options};
use crate::picture::{MimeType, NativeCode, PictureInfo};
use crate::tag::{
	Field, TagData, Timestamp, join_values, parse_number, split_number_pair, split_values,
};

const PICTURE_KEY_PREFIX: &str = "Cover Art (";

/// Whether an item key holds a picture, such as "Cover Art (Front)"
pub(crate) fn is_picture_key(key: &str) -> bool {
	key.get(..PICTURE_KEY_PREFIX.len())
		.is_some_and(|prefix| prefix.eq_ignore_ascii_case(PICTURE_KEY_PREFIX))
}

impl ApeTag {
	/// Convert the tag into a [`TagData`]
	///
	/// * Items with a key from the APE key table become fields, `Track` and `Disc` hold
	///   `number/total` pairs
	/// * Other text and locator items become additional fields
	/// * Binary `Cover Art (...)` items become pictures, other binary items are dropped
	///
	/// Multiple values (separated by null bytes) are joined with the internal separator.
	pub fn into_tag_data(self, parse_options: ParseOptions) -> TagData {
		let mut tag = TagData::new();

		for ApeItem { key, value, .. } in self.items {
			match value {
				ApeItemValue::Text(text) => read_text_item(&mut tag, key, &text, parse_options),
				ApeItemValue::Locator(url) => {
					if parse_options.read_additional_fields {
						tag.set_additional(key, url);
					}
				},
				ApeItemValue::Binary(data) if is_picture_key(&key) => {
					if parse_options.read_cover_art {
						tag.push_picture(picture_from_item(key, data));
					}
				},
				ApeItemValue::Binary(_) => log::debug!("Dropping binary APE item `{key}`"),
			}
		}

		tag
	}

	/// Create a tag from a [`TagData`]
	///
	/// Fields without an APE key are skipped, as are additional fields whose key is not a
	/// valid APE key. Only one picture can be stored per key.
	pub fn from_tag_data(tag: &TagData, write_options: WriteOptions) -> Self {
		let mut ape = ApeTag::new();

		for (field, value) in tag.fields() {
			match field {
				Field::TrackNumber | Field::TrackTotal | Field::DiscNumber | Field::DiscTotal => {},
				_ => {
					let Some(key) = ape_key_for_field(field) else {
						log::debug!("`{field}` has no APE item, skipping");
						continue;
					};

					let value = if field.is_multi_valued() {
						split_values(value).join("\0")
					} else {
						value.to_owned()
					};

					insert_item(&mut ape, key, ApeItemValue::Text(value));
				},
			}
		}

		let leading_zeros = write_options.leading_zeros;
		for (number, total, key) in [
			(Field::TrackNumber, Field::TrackTotal, "Track"),
			(Field::DiscNumber, Field::DiscTotal, "Disc"),
		] {
			if let Some(value) = number_pair(tag, number, total, leading_zeros) {
				insert_item(&mut ape, key, ApeItemValue::Text(value));
			}
		}

		let internal = global_options().get_internal_separator();
		for (key, value) in tag.additional_fields() {
			insert_item(&mut ape, key, ApeItemValue::Text(value.replace(internal, "\0")));
		}

		for picture in tag.pictures() {
			let key = match picture.native_code() {
				NativeCode::Ape(key) => Some(key.as_str()),
				NativeCode::Id3v2(_) => picture.picture_type().as_ape_key(),
			};

			let Some(key) = key else {
				log::warn!("Picture type {:?} has no APE key, skipping", picture.picture_type());
				continue;
			};

			if ape.get(key).is_some() {
				log::warn!("Only one `{key}` picture can be stored, skipping");
				continue;
			}

			let mut data = picture.description().unwrap_or_default().as_bytes().to_vec();
			data.push(0);
			data.extend_from_slice(picture.data());

			insert_item(&mut ape, key, ApeItemValue::Binary(data));
		}

		ape
	}
}

fn insert_item(tag: &mut ApeTag, key: &str, value: ApeItemValue) {
	match ApeItem::new(key.to_owned(), value) {
		Ok(item) => tag.insert(item),
		Err(err) => log::warn!("Skipping APE item `{key}`: {err}"),
	}
}

fn read_text_item(tag: &mut TagData, key: String, text: &str, parse_options: ParseOptions) {
	let Some(field) = field_from_ape_key(&key) else {
		if parse_options.read_additional_fields {
			tag.set_additional(key, join_values(text.split('\0')));
		}
		return;
	};

	if tag.get(field).is_some() {
		log::debug!("Dropping duplicate value for `{field}`");
		return;
	}

	match field {
		Field::TrackNumber => set_number_pair(tag, text, Field::TrackNumber, Field::TrackTotal),
		Field::DiscNumber => set_number_pair(tag, text, Field::DiscNumber, Field::DiscTotal),
		_ if field.is_date() => {
			if let Some(date) = read_date(text, parse_options.parsing_mode) {
				tag.set(field, date);
			}
		},
		_ => tag.set(field, join_values(text.split('\0'))),
	}
}

fn set_number_pair(tag: &mut TagData, value: &str, number_field: Field, total_field: Field) {
	let (number, total) = split_number_pair(value);

	tag.set(number_field, number.to_string());
	if let Some(total) = total {
		tag.set(total_field, total.to_string());
	}
}

fn read_date(value: &str, parsing_mode: ParsingMode) -> Option<String> {
	match Timestamp::parse(value, parsing_mode) {
		Ok(timestamp) => timestamp.map(|timestamp| timestamp.to_string()),
		Err(err) => {
			log::warn!("Keeping unparseable date `{value}` as-is: {err}");
			Some(value.to_owned())
		},
	}
}

fn number_pair(
	tag: &TagData,
	number_field: Field,
	total_field: Field,
	leading_zeros: LeadingZeros,
) -> Option<String> {
	let number = tag.get(number_field).map(split_number_pair);
	let total = tag
		.get(total_field)
		.map(parse_number)
		.or_else(|| number.and_then(|(_, total)| total));

	if number.is_none() && total.is_none() {
		return None;
	}

	let number = number.map_or(0, |(number, _)| number);
	Some(leading_zeros.format(u32::from(number), total.map(u32::from)))
}

// "description\0picture data"
fn picture_from_item(key: String, data: Vec<u8>) -> PictureInfo {
	let (description, data) = match data.iter().position(|b| *b == 0) {
		Some(pos) => (
			String::from_utf8_lossy(&data[..pos]).into_owned(),
			data[pos + 1..].to_vec(),
		),
		None => (String::new(), data),
	};

	let mime_type = MimeType::sniff(&data).ok();
	let picture = PictureInfo::from_native(NativeCode::Ape(key), mime_type, data);

	if description.is_empty() {
		picture
	} else {
		picture.with_description(description)
	}
}
