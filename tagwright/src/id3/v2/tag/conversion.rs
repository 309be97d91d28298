//! Conversions between frames and the format-agnostic [`TagData`]

use super::{Id3v2Tag, resolve_genres};
use crate::config::{LeadingZeros, ParseOptions, ParsingMode, WriteOptions, global_options};
use crate::id3::v2::frame::{Frame, FrameId};
use crate::id3::v2::header::{Id3v2TagFlags, Id3v2Version};
use crate::id3::v2::items::{
	AttachedPictureFrame, BinaryFrame, ChapterFrame, ExtendedTextFrame, ExtendedUrlFrame,
	LanguageFrame, PopularimeterFrame, PrivateFrame, SynchronizedTextFrame, TableOfContentsFrame,
	TextInformationFrame, TimestampFormat, UrlLinkFrame, is_valid_language,
};
use crate::id3::v2::restrictions::TagRestrictions;
use crate::id3::v2::util::mappings::{
	BINARY_FRAMES, field_for_frame_id, field_for_txxx, frame_id_for_field, txxx_description_for_field,
};
use crate::id3::v2::util::upgrade::{V4_ONLY_FRAMES, downgrade_v4, normalize_frame_id};
use crate::tag::{
	ChapterInfo, ChapterUrl, Field, LyricsBody, LyricsContentType, LyricsInfo, LyricsPhrase,
	TagData, Timestamp, join_values, parse_number, split_number_pair, split_values,
};
use crate::util::text::TextEncoding;

use data_encoding::BASE64;

/// Prefix of additional-field keys holding a `COMM` frame with a description
const COMMENT_PREFIX: &str = "COMM:";
/// Prefix of additional-field keys holding a `PRIV` frame, keyed on the owner
const PRIVATE_PREFIX: &str = "PRIV:";
/// Prefix of additional-field keys holding the email and play counter of a `POPM` frame
const POPULARIMETER_PREFIX: &str = "POPM:";
/// Prefix of additional-field keys holding a `TXXX` frame whose description looks like a key
const USER_TEXT_PREFIX: &str = "TXXX:";

const TOC_ELEMENT_ID: &str = "toc";

/// The frame an additional-field key is written as
#[derive(Debug, PartialEq, Eq)]
enum AdditionalKey<'a> {
	UserText(&'a str),
	UserUrl,
	Comment(&'a str),
	Private(&'a str),
	Popularimeter,
	Text(&'a str),
	Url(&'a str),
	Binary(&'a str),
}

impl<'a> AdditionalKey<'a> {
	fn classify(key: &'a str) -> Self {
		if let Some(description) = key.strip_prefix(USER_TEXT_PREFIX) {
			return Self::UserText(description);
		}
		if let Some(description) = key.strip_prefix(COMMENT_PREFIX) {
			return Self::Comment(description);
		}
		if let Some(owner) = key.strip_prefix(PRIVATE_PREFIX) {
			return Self::Private(owner);
		}
		if key.starts_with(POPULARIMETER_PREFIX) {
			return Self::Popularimeter;
		}

		match key {
			"WXXX" => return Self::UserUrl,
			"TXXX" => return Self::UserText(""),
			_ => {},
		}

		let id = normalize_frame_id(key);
		if !FrameId::is_valid(id) {
			return Self::UserText(key);
		}

		if id.starts_with('T') || id == "GRP1" {
			Self::Text(id)
		} else if id.starts_with('W') {
			Self::Url(id)
		} else if BINARY_FRAMES.contains(&id) {
			Self::Binary(id)
		} else {
			Self::UserText(key)
		}
	}
}

// ID3v2.3 splits the recording date over three frames
#[derive(Default)]
struct SplitDate {
	day_month: Option<String>,
	hour_minute: Option<String>,
}

impl Id3v2Tag {
	/// Convert the frames into a [`TagData`]
	///
	/// Frames with no well-known field become additional fields, unless
	/// [`ParseOptions::read_additional_fields`] is disabled.
	pub fn into_tag_data(self, parse_options: ParseOptions) -> TagData {
		let keep_additional = parse_options.read_additional_fields;

		let mut tag = TagData::new();
		tag.restrictions = self.flags.restrictions;

		let mut split_date = SplitDate::default();
		let mut rated = false;
		let mut toc_description = None;
		let mut chapters = Vec::new();
		let mut lyrics = Vec::new();

		for frame in self.frames {
			match frame {
				Frame::Text(frame) => {
					read_text_frame(&mut tag, frame, &mut split_date, parse_options);
				},
				Frame::UserText(frame) => read_user_text_frame(&mut tag, frame, keep_additional),
				Frame::Url(frame) => match field_for_frame_id(frame.id.as_str()) {
					Some(field) => set_first(&mut tag, field, frame.url),
					None if keep_additional => tag.set_additional(frame.id.as_str(), frame.url),
					None => {},
				},
				Frame::UserUrl(frame) => {
					if !keep_additional {
						continue;
					}

					if tag.additional("WXXX").is_some() {
						log::debug!("Dropping extra `WXXX` frame ({})", frame.description);
						continue;
					}

					let mut value = frame.description;
					value.push(global_options().get_internal_separator());
					value.push_str(&frame.url);
					tag.set_additional("WXXX", value);
				},
				Frame::Comment(frame) => {
					if frame.description.is_empty() {
						set_first(&mut tag, Field::Comment, frame.content);
					} else if keep_additional {
						let key = format!("{COMMENT_PREFIX}{}", frame.description);
						tag.set_additional(key, frame.content);
					}
				},
				Frame::Popularimeter(frame) => {
					if rated {
						log::debug!("Dropping extra `POPM` frame ({})", frame.email);
						continue;
					}

					rated = true;
					tag.set(Field::Rating, frame.rating.to_string());

					if keep_additional && (!frame.email.is_empty() || frame.counter != 0) {
						let key = format!("{POPULARIMETER_PREFIX}{}", frame.email);
						tag.set_additional(key, frame.counter.to_string());
					}
				},
				Frame::Private(frame) if keep_additional => {
					let key = format!("{PRIVATE_PREFIX}{}", frame.owner);
					tag.set_additional(key, BASE64.encode(&frame.private_data));
				},
				Frame::Binary(frame) if keep_additional => {
					if BINARY_FRAMES.contains(&frame.id.as_str()) {
						tag.set_additional(frame.id.as_str(), BASE64.encode(&frame.data));
					} else {
						log::warn!("Dropping unsupported frame `{}`", frame.id);
					}
				},
				Frame::Private(_) | Frame::Binary(_) => {},
				Frame::UnsynchronizedText(frame) => lyrics.push(LyricsInfo {
					content_type: LyricsContentType::Lyrics,
					language: frame.language,
					description: frame.description,
					body: LyricsBody::Unsynchronized(frame.content),
				}),
				Frame::SynchronizedText(frame) => {
					if frame.timestamp_format == TimestampFormat::MPEG {
						log::debug!("Synchronized text uses MPEG frame timestamps, keeping them as-is");
					}

					let phrases = frame
						.content
						.into_iter()
						.map(|(timestamp_ms, text)| LyricsPhrase { timestamp_ms, text })
						.collect();

					lyrics.push(LyricsInfo {
						content_type: frame.content_type,
						language: frame.language,
						description: frame.description,
						body: LyricsBody::Synchronized(phrases),
					});
				},
				Frame::Picture(frame) => tag.push_picture(frame.picture),
				Frame::Chapter(frame) => chapters.push(chapter_from_frame(frame)),
				Frame::TableOfContents(frame) => {
					if toc_description.is_some() && !frame.top_level {
						continue;
					}

					if let Some(title) = frame.frames.into_iter().find_map(|frame| match frame {
						Frame::Text(text) if text.id.as_str() == "TIT2" => Some(text.value),
						_ => None,
					}) {
						toc_description = Some(title);
					}
				},
			}
		}

		merge_split_date(&mut tag, split_date, parse_options.parsing_mode);

		tag.set_chapters(chapters);
		tag.set_toc_description(toc_description);
		tag.set_lyrics(lyrics);
		tag
	}

	/// Build the frames for `tag`, targeting `version`
	///
	/// Frames that can't be represented in `version` are dropped with a warning.
	pub(crate) fn from_tag_data(
		tag: &TagData,
		version: Id3v2Version,
		write_options: WriteOptions,
		restrictions: Option<TagRestrictions>,
	) -> Self {
		let mut builder = FrameBuilder::new(version, write_options, restrictions);

		for (field, value) in tag.fields() {
			builder.field(field, value);
		}

		builder.number_pair(tag, Field::TrackNumber, Field::TrackTotal, "TRCK");
		builder.number_pair(tag, Field::DiscNumber, Field::DiscTotal, "TPOS");
		builder.popularimeters(tag);

		for (key, value) in tag.additional_fields() {
			builder.additional(key, value);
		}

		for picture in tag.pictures() {
			let encoding = builder.encoding_for(picture.description().unwrap_or_default());
			builder.push(Frame::Picture(AttachedPictureFrame::new(
				encoding,
				picture.clone(),
			)));
		}

		for lyrics in tag.lyrics() {
			builder.lyrics(lyrics);
		}

		builder.chapters(tag.chapters(), tag.toc_description());

		Id3v2Tag {
			original_version: version,
			flags: Id3v2TagFlags {
				crc: write_options.write_crc && version == Id3v2Version::V4,
				restrictions: restrictions.filter(|_| version == Id3v2Version::V4),
				..Id3v2TagFlags::default()
			},
			frames: builder.frames,
		}
	}
}

fn set_first(tag: &mut TagData, field: Field, value: String) {
	if tag.get(field).is_some() {
		log::debug!("Dropping duplicate value for `{field}`");
		return;
	}

	tag.set(field, value);
}

fn read_text_frame(
	tag: &mut TagData,
	frame: TextInformationFrame,
	split_date: &mut SplitDate,
	parse_options: ParseOptions,
) {
	let id = normalize_frame_id(frame.id.as_str());

	match id {
		"TRCK" => set_number_pair(tag, &frame.value, Field::TrackNumber, Field::TrackTotal),
		"TPOS" => set_number_pair(tag, &frame.value, Field::DiscNumber, Field::DiscTotal),
		"TDAT" => split_date.day_month = Some(frame.value),
		"TIME" => split_date.hour_minute = Some(frame.value),
		"TCON" => {
			let genres = resolve_genres(&frame.value);
			if !genres.is_empty() {
				set_first(tag, Field::Genre, join_values(genres));
			}
		},
		_ => match field_for_frame_id(id) {
			Some(field) if field.is_date() => {
				if let Some(date) = read_date(&frame.value, parse_options.parsing_mode) {
					set_first(tag, field, date);
				}
			},
			Some(field) => set_first(tag, field, join_values(frame.values())),
			None if parse_options.read_additional_fields => {
				tag.set_additional(id, join_values(frame.values()));
			},
			None => {},
		},
	}
}

fn read_user_text_frame(tag: &mut TagData, frame: ExtendedTextFrame, keep_additional: bool) {
	let values = join_values(frame.content.split('\0'));

	if let Some(field) = field_for_txxx(&frame.description) {
		set_first(tag, field, values);
		return;
	}

	if !keep_additional {
		return;
	}

	if frame.description.is_empty() {
		log::warn!("Dropping `TXXX` frame with an empty description");
		return;
	}

	// Descriptions that would be written back as another frame keep a prefix
	let plain = AdditionalKey::classify(&frame.description)
		== AdditionalKey::UserText(&frame.description)
		&& Field::from_native_key(&frame.description).is_none();

	let key = if plain {
		frame.description
	} else {
		format!("{USER_TEXT_PREFIX}{}", frame.description)
	};

	tag.set_additional(key, values);
}

fn set_number_pair(tag: &mut TagData, value: &str, number_field: Field, total_field: Field) {
	let (number, total) = split_number_pair(value);

	set_first(tag, number_field, number.to_string());
	if let Some(total) = total {
		set_first(tag, total_field, total.to_string());
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

// "DDMM" or "HHMM"
fn digit_pairs(value: &str) -> Option<(u8, u8)> {
	let value = value.trim();
	if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	Some((value[..2].parse().ok()?, value[2..].parse().ok()?))
}

fn merge_split_date(tag: &mut TagData, split_date: SplitDate, parsing_mode: ParsingMode) {
	let Some(day_month) = split_date.day_month.as_deref().and_then(digit_pairs) else {
		return;
	};

	let Some(Ok(Some(mut timestamp))) = tag
		.get(Field::RecordingDate)
		.map(|date| Timestamp::parse(date, parsing_mode))
	else {
		log::debug!("Found `TDAT` without a usable year, ignoring it");
		return;
	};

	if timestamp.month.is_some() {
		return;
	}

	let (day, month) = day_month;
	timestamp.day = Some(day);
	timestamp.month = Some(month);

	if let Some((hour, minute)) = split_date.hour_minute.as_deref().and_then(digit_pairs) {
		timestamp.hour = Some(hour);
		timestamp.minute = Some(minute);
	}

	if timestamp.verify().is_err() {
		log::warn!("Ignoring out of range `TDAT`/`TIME` values");
		return;
	}

	tag.set(Field::RecordingDate, timestamp.to_string());
}

fn chapter_from_frame(frame: ChapterFrame) -> ChapterInfo {
	let mut chapter = ChapterInfo {
		id: frame.element_id,
		start_time: frame.start_time,
		end_time: frame.end_time,
		start_offset: ChapterInfo::offset_from_raw(frame.start_offset),
		end_offset: ChapterInfo::offset_from_raw(frame.end_offset),
		..ChapterInfo::default()
	};

	for sub_frame in frame.frames {
		match sub_frame {
			Frame::Text(text) if text.id.as_str() == "TIT2" => chapter.title = Some(text.value),
			Frame::Text(text) if text.id.as_str() == "TIT3" => {
				chapter.subtitle = Some(text.value);
			},
			Frame::UserUrl(url) => {
				chapter.url = Some(ChapterUrl {
					description: url.description,
					url: url.url,
				});
			},
			Frame::Url(url) if chapter.url.is_none() => {
				chapter.url = Some(ChapterUrl {
					description: String::new(),
					url: url.url,
				});
			},
			Frame::Picture(picture) => chapter.picture = Some(picture.picture),
			other => log::debug!(
				"Dropping `{}` frame in chapter `{}`",
				other.id(),
				chapter.id
			),
		}
	}

	chapter
}

/// Accumulates frames for a single tag version
struct FrameBuilder {
	version: Id3v2Version,
	encoding: TextEncoding,
	leading_zeros: LeadingZeros,
	frames: Vec<Frame>,
}

impl FrameBuilder {
	fn new(
		version: Id3v2Version,
		write_options: WriteOptions,
		restrictions: Option<TagRestrictions>,
	) -> Self {
		let mut encoding = write_options.default_text_encoding;
		if version == Id3v2Version::V4
			&& restrictions.is_some_and(|r| r.text_encoding)
			&& encoding.is_wide()
		{
			log::debug!("Tag restrictions only allow Latin-1 and UTF-8, writing UTF-8");
			encoding = TextEncoding::UTF8;
		}

		Self {
			version,
			encoding,
			leading_zeros: write_options.leading_zeros,
			frames: Vec::new(),
		}
	}

	fn encoding_for(&self, text: &str) -> TextEncoding {
		let wide = match self.version {
			Id3v2Version::V4 => TextEncoding::UTF8,
			_ => TextEncoding::UTF16,
		};

		self.encoding.fit_for(text, wide)
	}

	fn push(&mut self, frame: Frame) {
		self.frames.push(frame);
	}

	/// The ID to write `id` (an ID3v2.4 ID) as, or `None` if `version` can't hold it
	fn id_for_version(&self, id: &str) -> Option<FrameId> {
		let id = match self.version {
			Id3v2Version::V4 => id,
			_ => match downgrade_v4(id) {
				Some(downgraded) => downgraded,
				None if V4_ONLY_FRAMES.contains(&id) => {
					log::warn!("Dropping frame `{id}`, it can't be written to ID3v2.3");
					return None;
				},
				None => id,
			},
		};

		match FrameId::new(id) {
			Ok(id) => Some(id),
			Err(err) => {
				log::warn!("Dropping frame `{id}`: {err}");
				None
			},
		}
	}

	fn text(&mut self, id: &str, value: String) {
		if let Some(id) = self.id_for_version(id) {
			let encoding = self.encoding_for(&value);
			self.push(Frame::Text(TextInformationFrame::new(id, encoding, value)));
		}
	}

	fn url(&mut self, id: &str, url: &str) {
		if let Some(id) = self.id_for_version(id) {
			self.push(Frame::Url(UrlLinkFrame::new(id, url)));
		}
	}

	fn user_text(&mut self, description: &str, value: &str) {
		let content = split_values(value).join("\0");
		let encoding = self.encoding_for(&format!("{description}{content}"));
		self.push(Frame::UserText(ExtendedTextFrame::new(
			encoding,
			description,
			content,
		)));
	}

	fn comment(&mut self, description: &str, content: &str) {
		let encoding = self.encoding_for(&format!("{description}{content}"));
		self.push(Frame::Comment(LanguageFrame::new(
			encoding,
			LanguageFrame::UNKNOWN_LANGUAGE,
			description,
			content,
		)));
	}

	fn field(&mut self, field: Field, value: &str) {
		match field {
			// Written as pairs or alongside other fields
			Field::TrackNumber
			| Field::TrackTotal
			| Field::DiscNumber
			| Field::DiscTotal
			| Field::Rating => {},
			Field::Comment => self.comment("", value),
			Field::InvolvedPeople => self.text("TIPL", split_values(value).join("\0")),
			Field::RecordingDate if self.version != Id3v2Version::V4 => self.split_date(value),
			Field::OriginalReleaseDate if self.version != Id3v2Version::V4 => {
				// TORY only holds a year
				let year = value.get(..4).unwrap_or(value).to_owned();
				self.text("TDOR", year);
			},
			_ => {
				if let Some(description) = txxx_description_for_field(field) {
					self.user_text(description, value);
					return;
				}

				let Some(id) = frame_id_for_field(field) else {
					log::warn!("`{field}` has no ID3v2 frame, skipping");
					return;
				};

				if id.starts_with('W') {
					self.url(id, value);
				} else if field.is_multi_valued() {
					self.text(id, split_values(value).join("\0"));
				} else {
					self.text(id, value.to_owned());
				}
			},
		}
	}

	// TYER + TDAT + TIME
	fn split_date(&mut self, value: &str) {
		let Ok(Some(timestamp)) = Timestamp::parse(value, ParsingMode::BestAttempt) else {
			self.text("TYER", value.to_owned());
			return;
		};

		self.text("TYER", format!("{:04}", timestamp.year));

		if let (Some(month), Some(day)) = (timestamp.month, timestamp.day) {
			self.text("TDAT", format!("{day:02}{month:02}"));

			if let (Some(hour), Some(minute)) = (timestamp.hour, timestamp.minute) {
				self.text("TIME", format!("{hour:02}{minute:02}"));
			}
		}
	}

	fn number_pair(&mut self, tag: &TagData, number_field: Field, total_field: Field, id: &str) {
		let number = tag.get(number_field).map(split_number_pair);
		let total = tag
			.get(total_field)
			.map(parse_number)
			.or_else(|| number.and_then(|(_, total)| total));

		if number.is_none() && total.is_none() {
			return;
		}

		let number = number.map_or(0, |(number, _)| number);
		let value = self
			.leading_zeros
			.format(u32::from(number), total.map(u32::from));
		self.text(id, value);
	}

	fn popularimeters(&mut self, tag: &TagData) {
		let mut rating = tag
			.get(Field::Rating)
			.map(|rating| u8::try_from(parse_number(rating)).unwrap_or(u8::MAX));

		for (key, counter) in tag.additional_fields() {
			let Some(email) = key.strip_prefix(POPULARIMETER_PREFIX) else {
				continue;
			};

			let counter = counter.trim().parse::<u64>().unwrap_or(0);
			self.push(Frame::Popularimeter(PopularimeterFrame::new(
				email,
				rating.take().unwrap_or(0),
				counter,
			)));
		}

		if let Some(rating) = rating {
			self.push(Frame::Popularimeter(PopularimeterFrame::new("", rating, 0)));
		}
	}

	fn additional(&mut self, key: &str, value: &str) {
		match AdditionalKey::classify(key) {
			// Written with the rating
			AdditionalKey::Popularimeter => {},
			AdditionalKey::UserText(description) => self.user_text(description, value),
			AdditionalKey::Comment(description) => self.comment(description, value),
			AdditionalKey::UserUrl => {
				let (description, url) = value
					.split_once(global_options().get_internal_separator())
					.unwrap_or(("", value));
				let encoding = self.encoding_for(description);
				self.push(Frame::UserUrl(ExtendedUrlFrame::new(encoding, description, url)));
			},
			AdditionalKey::Text(id) => self.text(id, split_values(value).join("\0")),
			AdditionalKey::Url(id) => self.url(id, value),
			AdditionalKey::Private(owner) => match BASE64.decode(value.as_bytes()) {
				Ok(data) => self.push(Frame::Private(PrivateFrame::new(owner, data))),
				Err(err) => log::warn!("Dropping `{key}`, the value is not base64: {err}"),
			},
			AdditionalKey::Binary(id) => match BASE64.decode(value.as_bytes()) {
				Ok(data) => {
					if let Some(id) = self.id_for_version(id) {
						self.push(Frame::Binary(BinaryFrame::new(id, data)));
					}
				},
				Err(err) => log::warn!("Dropping `{key}`, the value is not base64: {err}"),
			},
		}
	}

	fn lyrics(&mut self, lyrics: &LyricsInfo) {
		let language = if is_valid_language(lyrics.language) {
			lyrics.language
		} else {
			log::debug!(
				"Invalid lyrics language {:?}, writing `XXX`",
				lyrics.language
			);
			LanguageFrame::UNKNOWN_LANGUAGE
		};

		match &lyrics.body {
			LyricsBody::Unsynchronized(text) => {
				let encoding = self.encoding_for(&format!("{}{text}", lyrics.description));
				self.push(Frame::UnsynchronizedText(LanguageFrame::new(
					encoding,
					language,
					lyrics.description.as_str(),
					text.as_str(),
				)));
			},
			LyricsBody::Synchronized(phrases) => {
				let mut all_text = lyrics.description.clone();
				for phrase in phrases {
					all_text.push_str(&phrase.text);
				}

				self.push(Frame::SynchronizedText(SynchronizedTextFrame {
					encoding: self.encoding_for(&all_text),
					language,
					timestamp_format: TimestampFormat::MS,
					content_type: lyrics.content_type,
					description: lyrics.description.clone(),
					content: phrases
						.iter()
						.map(|phrase| (phrase.timestamp_ms, phrase.text.clone()))
						.collect(),
				}));
			},
		}
	}

	fn chapters(&mut self, chapters: &[ChapterInfo], toc_description: Option<&str>) {
		if chapters.is_empty() {
			if toc_description.is_some() {
				log::debug!("No chapters, not writing a table of contents");
			}

			return;
		}

		let mut toc_frames = Vec::new();
		if let Some(description) = toc_description.filter(|d| !d.is_empty()) {
			toc_frames.extend(self.sub_text("TIT2", description));
		}

		self.push(Frame::TableOfContents(TableOfContentsFrame {
			element_id: String::from(TOC_ELEMENT_ID),
			top_level: true,
			ordered: true,
			children: chapters.iter().map(|chapter| chapter.id.clone()).collect(),
			frames: toc_frames,
		}));

		for chapter in chapters {
			let mut frames = Vec::new();

			if let Some(title) = &chapter.title {
				frames.extend(self.sub_text("TIT2", title));
			}

			if let Some(subtitle) = &chapter.subtitle {
				frames.extend(self.sub_text("TIT3", subtitle));
			}

			if let Some(url) = &chapter.url {
				frames.push(Frame::UserUrl(ExtendedUrlFrame::new(
					self.encoding_for(&url.description),
					url.description.as_str(),
					url.url.as_str(),
				)));
			}

			if let Some(picture) = &chapter.picture {
				let encoding = self.encoding_for(picture.description().unwrap_or_default());
				frames.push(Frame::Picture(AttachedPictureFrame::new(
					encoding,
					picture.clone(),
				)));
			}

			self.push(Frame::Chapter(ChapterFrame {
				element_id: chapter.id.clone(),
				start_time: chapter.start_time,
				end_time: chapter.end_time,
				start_offset: ChapterInfo::offset_to_raw(chapter.start_offset),
				end_offset: ChapterInfo::offset_to_raw(chapter.end_offset),
				frames,
			}));
		}
	}

	fn sub_text(&self, id: &str, value: &str) -> Option<Frame> {
		let id = FrameId::new(id).ok()?;
		Some(Frame::Text(TextInformationFrame::new(
			id,
			self.encoding_for(value),
			value,
		)))
	}
}
