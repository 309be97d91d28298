#![allow(missing_docs)]

use std::io::Cursor;

use tagwright::config::{LeadingZeros, ParseOptions, WriteOptions};
use tagwright::id3::v2::{
	self, Frame, Id3v2Version, ImageSizeRestrictions, RestrictionWarning, TagRestrictions,
	TagSizeRestrictions, TextSizeRestrictions,
};
use tagwright::picture::{MimeType, NativeCode, PictureInfo, PictureType};
use tagwright::tag::{
	ChapterInfo, Field, FieldEdit, LyricsBody, LyricsContentType, LyricsInfo, LyricsPhrase,
	PictureEdit, TagData, TagDelta, join_values,
};

const AUDIO: &[u8] = b"\xFF\xFBaudio frames";

fn audio() -> Cursor<Vec<u8>> {
	Cursor::new(AUDIO.to_vec())
}

fn png(width: u32, height: u32) -> Vec<u8> {
	let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
	data.extend_from_slice(&13_u32.to_be_bytes());
	data.extend_from_slice(b"IHDR");
	data.extend_from_slice(&width.to_be_bytes());
	data.extend_from_slice(&height.to_be_bytes());
	data.extend_from_slice(&[8, 6, 0, 0, 0]);
	data
}

fn read(file: &mut Cursor<Vec<u8>>) -> TagData {
	v2::read_tag(file, ParseOptions::new()).unwrap().unwrap()
}

fn write(file: &mut Cursor<Vec<u8>>, delta: &TagDelta) {
	v2::write_tag(file, None, delta, Id3v2Version::V4, WriteOptions::new()).unwrap();
}

fn text_frame<'a>(tag: &'a v2::Id3v2Tag, id: &str) -> &'a str {
	let Some(Frame::Text(frame)) = tag.get(id) else {
		panic!("Expected a `{id}` text frame");
	};

	&frame.value
}

fn contains(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	haystack.windows(needle.len()).position(|w| w == needle)
}

#[test_log::test]
fn write_read_round_trip() {
	let mut file = audio();

	let delta = TagDelta::new()
		.set(Field::Title, "Title")
		.set(Field::Artist, "AA;BB;CC")
		.set(Field::Album, "Album")
		.set(Field::TrackNumber, "3")
		.set(Field::TrackTotal, "12")
		.set(Field::Comment, "Comment")
		.set(Field::RecordingDate, "2004-03-05");
	write(&mut file, &delta);

	assert!(file.get_ref().starts_with(b"ID3\x04"));
	assert!(file.get_ref().ends_with(AUDIO));

	let tag = read(&mut file);
	assert_eq!(tag.get(Field::Title), Some("Title"));
	assert_eq!(tag.get(Field::Artist), Some(join_values(["AA", "BB", "CC"]).as_str()));
	assert_eq!(tag.get(Field::Album), Some("Album"));
	assert_eq!(tag.get(Field::TrackNumber), Some("3"));
	assert_eq!(tag.get(Field::TrackTotal), Some("12"));
	assert_eq!(tag.get(Field::Comment), Some("Comment"));
	assert_eq!(tag.get(Field::RecordingDate), Some("2004-03-05"));
}

#[test_log::test]
fn rewriting_an_unchanged_tag_is_a_no_op() {
	let mut file = audio();

	let delta = TagDelta::new()
		.set(Field::Title, "Title")
		.set(Field::Genre, "Rock;Pop")
		.set(Field::DiscNumber, "1")
		.set_additional("MY KEY", "Value");
	write(&mut file, &delta);
	let first = file.get_ref().clone();

	let report = v2::write_tag(
		&mut file,
		None,
		&TagDelta::new(),
		Id3v2Version::V4,
		WriteOptions::new(),
	)
	.unwrap();

	assert!(report.in_place);
	assert_eq!(file.get_ref(), &first);
}

#[test_log::test]
fn growing_a_tag_keeps_the_audio() {
	let mut file = audio();
	write(&mut file, &TagDelta::new().set(Field::Title, "Title"));

	let long = "L".repeat(4000);
	let report = v2::write_tag(
		&mut file,
		None,
		&TagDelta::new().set(Field::Lyricist, long.as_str()),
		Id3v2Version::V4,
		WriteOptions::new(),
	)
	.unwrap();

	assert!(!report.in_place);
	assert_eq!(report.tag_size as usize + AUDIO.len(), file.get_ref().len());
	assert!(file.get_ref().ends_with(AUDIO));

	let tag = read(&mut file);
	assert_eq!(tag.get(Field::Title), Some("Title"));
	assert_eq!(tag.get(Field::Lyricist), Some(long.as_str()));
}

#[test_log::test]
fn v2_tags_are_upgraded_when_written() {
	// ID3v2.2 tag with a single `TT2` frame, "Hello" in Latin-1
	let mut bytes = b"ID3\x02\x00\x00\x00\x00\x00\x0C".to_vec();
	bytes.extend_from_slice(b"TT2\x00\x00\x06\x00Hello");
	bytes.extend_from_slice(AUDIO);
	let mut file = Cursor::new(bytes);

	let frames = v2::read_frames(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	assert_eq!(frames.original_version(), Id3v2Version::V2);
	assert_eq!(text_frame(&frames, "TIT2"), "Hello");

	let tag = read(&mut file);
	assert_eq!(tag.get(Field::Title), Some("Hello"));

	// ID3v2.2 can't be written
	assert!(
		v2::write_tag(
			&mut file,
			Some(&tag),
			&TagDelta::new(),
			Id3v2Version::V2,
			WriteOptions::new()
		)
		.is_err()
	);

	v2::write_tag(
		&mut file,
		Some(&tag),
		&TagDelta::new(),
		Id3v2Version::V3,
		WriteOptions::new(),
	)
	.unwrap();

	let bytes = file.get_ref();
	assert!(bytes.starts_with(b"ID3\x03"));
	assert!(contains(bytes, b"TIT2").is_some());
	assert!(contains(bytes, b"TT2\x00").is_none());
	assert!(bytes.ends_with(AUDIO));

	assert_eq!(read(&mut file).get(Field::Title), Some("Hello"));
}

#[test_log::test]
fn multiple_values_use_the_internal_separator() {
	let mut file = audio();
	write(&mut file, &TagDelta::new().set(Field::Artist, "AA;BB;CC"));

	let frames = v2::read_frames(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	let Some(Frame::Text(artists)) = frames.get("TPE1") else {
		panic!("Expected a `TPE1` frame");
	};
	assert_eq!(artists.values().collect::<Vec<_>>(), ["AA", "BB", "CC"]);

	let tag = read(&mut file);
	assert_eq!(tag.get(Field::Artist), Some("AA\u{02F5}BB\u{02F5}CC"));
}

#[test_log::test]
fn v3_multiple_values_are_null_separated() {
	let mut file = audio();
	v2::write_tag(
		&mut file,
		None,
		&TagDelta::new().set(Field::Composer, "AA;BB"),
		Id3v2Version::V3,
		WriteOptions::new(),
	)
	.unwrap();

	let tag = read(&mut file);
	assert_eq!(tag.get(Field::Composer), Some(join_values(["AA", "BB"]).as_str()));
}

#[test_log::test]
fn table_of_contents_without_chapters_is_not_written() {
	let mut file = audio();

	let delta = TagDelta::new()
		.set(Field::Title, "Title")
		.toc_description(FieldEdit::Set(String::from("Contents")));
	write(&mut file, &delta);

	let frames = v2::read_frames(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	assert!(frames.get("CTOC").is_none());
	assert_eq!(read(&mut file).toc_description(), None);
}

#[test_log::test]
fn table_of_contents_without_description_has_no_title() {
	let mut file = audio();

	let delta = TagDelta::new().chapters(FieldEdit::Set(vec![
		ChapterInfo::new(0, 15_000).with_title("Intro"),
	]));
	write(&mut file, &delta);

	let frames = v2::read_frames(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();

	let Some(Frame::TableOfContents(toc)) = frames.get("CTOC") else {
		panic!("Expected a table of contents");
	};
	assert!(toc.top_level);
	assert_eq!(toc.children, ["ch0"]);
	assert!(toc.frames.is_empty());

	let Some(Frame::Chapter(chapter)) = frames.get("CHAP") else {
		panic!("Expected a chapter");
	};
	assert_eq!(chapter.element_id, "ch0");
	assert_eq!(chapter.end_time, 15_000);

	let tag = read(&mut file);
	assert_eq!(tag.toc_description(), None);
	assert_eq!(tag.chapters().len(), 1);
	assert_eq!(tag.chapters()[0].title.as_deref(), Some("Intro"));
}

#[test_log::test]
fn chapters_with_a_description() {
	let mut file = audio();

	let delta = TagDelta::new()
		.chapters(FieldEdit::Set(vec![
			ChapterInfo::new(15_000, 30_000).with_title("Second"),
			ChapterInfo::new(0, 15_000).with_title("First"),
		]))
		.toc_description(FieldEdit::Set(String::from("Contents")));
	write(&mut file, &delta);

	let tag = read(&mut file);
	assert_eq!(tag.toc_description(), Some("Contents"));

	let titles = tag
		.chapters()
		.iter()
		.map(|chapter| chapter.title.as_deref())
		.collect::<Vec<_>>();
	assert_eq!(titles, [Some("First"), Some("Second")]);

	// Removing the chapters drops the table of contents with them
	write(&mut file, &TagDelta::new().chapters(FieldEdit::Remove));
	let frames = v2::read_frames(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	assert!(frames.get("CTOC").is_none());
	assert!(frames.get("CHAP").is_none());
}

#[test_log::test]
fn explicit_and_generated_chapter_ids_stay_unique() {
	let mut file = audio();

	let delta = TagDelta::new().chapters(FieldEdit::Set(vec![
		ChapterInfo {
			id: String::from("ch1"),
			..ChapterInfo::new(0, 1000)
		},
		ChapterInfo::new(1000, 2000),
		ChapterInfo::new(2000, 3000),
	]));
	write(&mut file, &delta);

	let frames = v2::read_frames(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	let Some(Frame::TableOfContents(toc)) = frames.get("CTOC") else {
		panic!("Expected a table of contents");
	};
	assert_eq!(toc.children, ["ch1", "ch2", "ch3"]);

	let tag = read(&mut file);
	let ids = tag
		.chapters()
		.iter()
		.map(|chapter| chapter.id.as_str())
		.collect::<Vec<_>>();
	assert_eq!(ids, ["ch1", "ch2", "ch3"]);
}

#[test_log::test]
fn lyrics_round_trip() {
	let phrases = vec![
		LyricsPhrase {
			timestamp_ms: 0,
			text: String::from("First"),
		},
		LyricsPhrase {
			timestamp_ms: 1500,
			text: String::from("Second"),
		},
		LyricsPhrase {
			timestamp_ms: 3000,
			text: String::from("Third"),
		},
	];

	let unsynchronized = LyricsInfo {
		content_type: LyricsContentType::Lyrics,
		language: *b"eng",
		description: String::from("Plain"),
		body: LyricsBody::Unsynchronized(String::from("La la la\nLa la")),
	};
	let synchronized = LyricsInfo {
		content_type: LyricsContentType::TextTranscription,
		language: *b"deu",
		description: String::from("Timed"),
		body: LyricsBody::Synchronized(phrases.clone()),
	};

	for version in [Id3v2Version::V3, Id3v2Version::V4] {
		let mut file = audio();

		let delta = TagDelta::new()
			.set(Field::Title, "Title")
			.lyrics(FieldEdit::Set(vec![
				unsynchronized.clone(),
				synchronized.clone(),
			]));
		v2::write_tag(&mut file, None, &delta, version, WriteOptions::new()).unwrap();

		let tag = read(&mut file);
		assert_eq!(tag.lyrics().len(), 2, "{version:?}");

		let plain = tag
			.lyrics()
			.iter()
			.find(|lyrics| matches!(lyrics.body, LyricsBody::Unsynchronized(_)))
			.unwrap();
		assert_eq!(plain, &unsynchronized, "{version:?}");

		let timed = tag
			.lyrics()
			.iter()
			.find(|lyrics| matches!(lyrics.body, LyricsBody::Synchronized(_)))
			.unwrap();
		assert_eq!(timed.language, *b"deu");
		assert_eq!(timed.description, "Timed");
		assert_eq!(timed.content_type, LyricsContentType::TextTranscription);
		assert_eq!(timed.body, LyricsBody::Synchronized(phrases.clone()));
	}
}

#[test_log::test]
fn deletions_only_touch_what_they_name() {
	let mut file = audio();

	let delta = TagDelta::new()
		.set(Field::Title, "Title")
		.set_additional("FIRST KEY", "One")
		.set_additional("SECOND KEY", "Two")
		.picture(PictureEdit::Add(PictureInfo::new(
			PictureType::Front,
			Some(MimeType::Png),
			png(1, 1),
		)))
		.picture(PictureEdit::Add(PictureInfo::new(
			PictureType::Back,
			Some(MimeType::Png),
			png(2, 2),
		)));
	write(&mut file, &delta);

	let delta = TagDelta::new()
		.remove_additional("FIRST KEY")
		.picture(PictureEdit::Remove {
			code: NativeCode::Id3v2(PictureType::Front.as_id3v2_byte()),
			occurrence: None,
		});
	write(&mut file, &delta);

	let tag = read(&mut file);
	assert_eq!(tag.get(Field::Title), Some("Title"));
	assert_eq!(tag.additional("FIRST KEY"), None);
	assert_eq!(tag.additional("SECOND KEY"), Some("Two"));

	let [picture] = tag.pictures() else {
		panic!("Expected a single picture");
	};
	assert_eq!(picture.picture_type(), PictureType::Back);
	assert_eq!(picture.data(), png(2, 2).as_slice());
}

#[test_log::test]
fn removing_every_frame_removes_the_tag() {
	let mut file = audio();
	write(&mut file, &TagDelta::new().set(Field::Title, "Title"));
	write(&mut file, &TagDelta::new().remove(Field::Title));

	assert_eq!(file.get_ref().as_slice(), AUDIO);
	assert!(v2::read_tag(&mut file, ParseOptions::new()).unwrap().is_none());
}

#[test_log::test]
fn leading_zeros() {
	let mut file = audio();

	let delta = TagDelta::new()
		.set(Field::TrackNumber, "3")
		.set(Field::TrackTotal, "12")
		.set(Field::DiscNumber, "1");
	let options = WriteOptions::new().leading_zeros(LeadingZeros::MatchTotal);
	v2::write_tag(&mut file, None, &delta, Id3v2Version::V4, options).unwrap();

	let frames = v2::read_frames(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	assert_eq!(text_frame(&frames, "TRCK"), "03/12");
	assert_eq!(text_frame(&frames, "TPOS"), "01");

	let tag = read(&mut file);
	assert_eq!(tag.get(Field::TrackNumber), Some("3"));
	assert_eq!(tag.get(Field::TrackTotal), Some("12"));
	assert_eq!(tag.get(Field::DiscNumber), Some("1"));
}

#[test_log::test]
fn out_of_range_track_numbers_become_zero() {
	let mut file = audio();
	write(&mut file, &TagDelta::new().set(Field::TrackNumber, "70000"));

	let frames = v2::read_frames(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	assert_eq!(text_frame(&frames, "TRCK"), "0");
	assert_eq!(read(&mut file).get(Field::TrackNumber), Some("0"));
}

#[test_log::test]
fn url_frames_have_no_encoding_byte() {
	// ID3v2.4 tag with a single `WOAR` frame
	let url = b"https://example.com";
	let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x1D".to_vec();
	bytes.extend_from_slice(b"WOAR\x00\x00\x00\x13\x00\x00");
	bytes.extend_from_slice(url);
	bytes.extend_from_slice(AUDIO);
	let mut file = Cursor::new(bytes);

	let tag = read(&mut file);
	assert_eq!(tag.additional("WOAR"), Some("https://example.com"));

	write(&mut file, &TagDelta::new().set(Field::Title, "Title"));

	let bytes = file.get_ref();
	let pos = contains(bytes, b"WOAR").unwrap();
	assert_eq!(&bytes[pos + 10..pos + 10 + url.len()], url);

	let frames = v2::read_frames(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	let Some(Frame::Url(frame)) = frames.get("WOAR") else {
		panic!("Expected a `WOAR` frame");
	};
	assert_eq!(frame.url, "https://example.com");
}

#[test_log::test]
fn plain_frame_sizes_in_v4_tags() {
	let title = "T".repeat(200);

	// 227 byte ID3v2.4 tag, with a `TIT2` size of 201 written as a plain integer
	let mut bytes = b"ID3\x04\x00\x00\x00\x00\x01\x63".to_vec();
	bytes.extend_from_slice(b"TIT2\x00\x00\x00\xC9\x00\x00\x00");
	bytes.extend_from_slice(title.as_bytes());
	bytes.extend_from_slice(b"TALB\x00\x00\x00\x06\x00\x00\x00Album");
	bytes.extend_from_slice(AUDIO);
	let mut file = Cursor::new(bytes);

	let tag = read(&mut file);
	assert_eq!(tag.get(Field::Title), Some(title.as_str()));
	assert_eq!(tag.get(Field::Album), Some("Album"));
}

#[test_log::test]
fn unknown_user_text_is_kept() {
	let mut file = audio();
	write(&mut file, &TagDelta::new().set_additional("MY KEY", "Value"));

	let frames = v2::read_frames(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	let Some(Frame::UserText(frame)) = frames.get("TXXX") else {
		panic!("Expected a `TXXX` frame");
	};
	assert_eq!(frame.description, "MY KEY");
	assert_eq!(frame.content, "Value");

	let tag = read(&mut file);
	assert_eq!(tag.additional("MY KEY"), Some("Value"));

	let skipped = v2::read_tag(&mut file, ParseOptions::new().read_additional_fields(false))
		.unwrap()
		.unwrap();
	assert_eq!(skipped.additional("MY KEY"), None);
}

#[test_log::test]
fn restrictions_warn_but_write() {
	let restrictions = TagRestrictions {
		size: TagSizeRestrictions::S_32F_4K,
		text_fields_size: Some(TextSizeRestrictions::C_30),
		image_encoding: true,
		image_size: Some(ImageSizeRestrictions::P_64_64),
		..TagRestrictions::default()
	};

	let mut large_png = png(65, 65);
	large_png.resize(large_png.len() + 5000, 0);

	let mut gif = b"GIF89a".to_vec();
	gif.resize(16, 0);

	let title = "T".repeat(40);
	let mut delta = TagDelta::new()
		.set(Field::Title, title.as_str())
		.picture(PictureEdit::Add(PictureInfo::new(
			PictureType::Front,
			Some(MimeType::Png),
			large_png,
		)))
		.picture(PictureEdit::Add(PictureInfo::new(
			PictureType::Back,
			Some(MimeType::Gif),
			gif,
		)));
	for i in 0..40 {
		delta = delta.set_additional(format!("CUSTOM_{i:02}"), "Value");
	}

	let options = WriteOptions::new().forced_restrictions(Some(restrictions));

	let mut file = audio();
	let report = v2::write_tag(&mut file, None, &delta, Id3v2Version::V4, options).unwrap();

	// One warning per violation
	let warnings = &report.warnings;
	assert_eq!(warnings.len(), 5, "{warnings:?}");

	let count = |f: fn(&RestrictionWarning) -> bool| warnings.iter().filter(|w| f(w)).count();
	assert_eq!(
		count(|w| matches!(
			w,
			RestrictionWarning::TextTooLong { frame, length: 40, max: 30 } if frame == "TIT2"
		)),
		1
	);
	assert_eq!(
		count(|w| matches!(
			w,
			RestrictionWarning::TooManyFrames { count: 43, max: 32 }
		)),
		1
	);
	assert_eq!(
		count(|w| matches!(w, RestrictionWarning::TagTooLarge { max: 4096, .. })),
		1
	);
	assert_eq!(
		count(|w| matches!(
			w,
			RestrictionWarning::PictureSize {
				index: 0,
				required: ImageSizeRestrictions::P_64_64,
				..
			}
		)),
		1
	);
	assert_eq!(
		count(|w| matches!(w, RestrictionWarning::PictureFormat { index: 1, .. })),
		1
	);

	// The tag is written regardless, with the restrictions in its extended header
	let tag = read(&mut file);
	assert_eq!(tag.get(Field::Title), Some(title.as_str()));
	assert_eq!(tag.pictures().len(), 2);
	assert_eq!(tag.additional_fields().count(), 40);
	assert_eq!(tag.restrictions(), Some(&restrictions));
}

#[test_log::test]
fn restrictions_can_be_ignored() {
	let restrictions = TagRestrictions {
		text_fields_size: Some(TextSizeRestrictions::C_30),
		..TagRestrictions::default()
	};

	let options = WriteOptions::new()
		.honor_restrictions(false)
		.forced_restrictions(Some(restrictions));

	let mut file = audio();
	let delta = TagDelta::new().set(Field::Title, "T".repeat(40));
	let report = v2::write_tag(&mut file, None, &delta, Id3v2Version::V4, options).unwrap();

	assert!(report.warnings.is_empty());
	assert_eq!(read(&mut file).restrictions(), None);
}

#[test_log::test]
fn explicit_padding() {
	let mut file = audio();

	let delta = TagDelta::new().set(Field::Title, "Title").padding(100);
	let report = v2::write_tag(&mut file, None, &delta, Id3v2Version::V4, WriteOptions::new())
		.unwrap();

	let tag_size = report.tag_size as usize;
	assert_eq!(file.get_ref().len(), tag_size + AUDIO.len());
	assert!(file.get_ref()[tag_size - 100..tag_size].iter().all(|b| *b == 0));
}

#[test_log::test]
fn removal_can_leave_padding_behind() {
	let mut file = audio();
	write(&mut file, &TagDelta::new().set(Field::Title, "Title"));

	v2::remove_tag(&mut file, 256).unwrap();

	let bytes = file.get_ref();
	assert_eq!(bytes.len(), 10 + 256 + AUDIO.len());
	assert_eq!(&bytes[..10], b"ID3\x04\x00\x00\x00\x00\x02\x00");
	assert!(bytes[10..266].iter().all(|b| *b == 0));
	assert!(bytes.ends_with(AUDIO));

	v2::remove_tag(&mut file, 0).unwrap();
	assert_eq!(file.get_ref().as_slice(), AUDIO);
}

#[test_log::test]
fn tags_after_junk_are_found() {
	let mut file = Cursor::new(Vec::new());
	write(&mut file, &TagDelta::new().set(Field::Title, "Title"));

	let mut bytes = b"junk".to_vec();
	bytes.extend_from_slice(file.get_ref());
	let mut file = Cursor::new(bytes);

	assert_eq!(read(&mut file).get(Field::Title), Some("Title"));

	let no_junk = ParseOptions::new().max_junk_bytes(0);
	assert!(v2::read_tag(&mut file, no_junk).unwrap().is_none());
}
