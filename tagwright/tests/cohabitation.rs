#![allow(missing_docs)]

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use tagwright::ape::{ApeItem, ApeItemValue, ApeTag};
use tagwright::config::{LeadingZeros, ParseOptions, WriteOptions};
use tagwright::coordinator::{TagCoordinator, TagState};
use tagwright::id3::v1::Id3v1Tag;
use tagwright::id3::v2::{self, Id3v2Version};
use tagwright::tag::{Field, TagDelta, TagSystem};

const AUDIO: &[u8] = b"\xFF\xFBaudio frames";

fn temp_file() -> File {
	let mut file = tempfile::tempfile().unwrap();
	file.write_all(AUDIO).unwrap();
	file
}

fn contents(file: &mut File) -> Vec<u8> {
	let mut contents = Vec::new();
	file.seek(SeekFrom::Start(0)).unwrap();
	file.read_to_end(&mut contents).unwrap();
	contents
}

#[test_log::test]
fn all_tags_in_one_file() {
	let mut coordinator = TagCoordinator::new(temp_file(), &TagSystem::ALL);
	coordinator.refresh().unwrap();

	for system in TagSystem::ALL {
		assert_eq!(coordinator.state(system), TagState::NotFound);
	}

	let delta = TagDelta::new()
		.set(Field::Title, "Title")
		.set(Field::Artist, "Artist")
		.set(Field::TrackNumber, "5");

	coordinator
		.write_id3v1(None, &delta, WriteOptions::new())
		.unwrap();
	coordinator
		.write_ape(None, &delta, WriteOptions::new())
		.unwrap();
	coordinator
		.write_id3v2(None, &delta, Id3v2Version::V4, WriteOptions::new())
		.unwrap();

	let id3v2 = coordinator.state(TagSystem::Id3v2).region().unwrap();
	let ape = coordinator.state(TagSystem::Ape).region().unwrap();
	let id3v1 = coordinator.state(TagSystem::Id3v1).region().unwrap();

	// The ID3v2 tag pushed everything after it back
	assert_eq!(id3v2.offset, 0);
	assert_eq!(ape.offset, id3v2.end() + AUDIO.len() as u64);
	assert_eq!(id3v1.offset, ape.end());
	assert_eq!(id3v1.len, 128);

	for tag in [
		coordinator.read_id3v2().unwrap(),
		coordinator.read_ape().unwrap(),
		coordinator.read_id3v1().unwrap(),
	] {
		let tag = tag.unwrap();
		assert_eq!(tag.get(Field::Title), Some("Title"));
		assert_eq!(tag.get(Field::Artist), Some("Artist"));
		assert_eq!(tag.get(Field::TrackNumber), Some("5"));
	}

	assert!(coordinator.remove(TagSystem::Ape, 0).unwrap());
	assert!(coordinator.remove(TagSystem::Id3v2, 0).unwrap());
	assert!(coordinator.remove(TagSystem::Id3v1, 0).unwrap());

	for system in TagSystem::ALL {
		assert_eq!(coordinator.state(system), TagState::Written(None));
	}

	let mut file = coordinator.into_inner();
	assert_eq!(contents(&mut file), AUDIO);
}

#[test_log::test]
fn rewriting_one_tag_leaves_the_others_intact() {
	let mut file = temp_file();

	let mut id3v1 = Id3v1Tag::new();
	id3v1.title = Some(String::from("ID3v1 title"));
	id3v1.write_to(&mut file, WriteOptions::new()).unwrap();

	let mut ape = ApeTag::new();
	ape.insert(
		ApeItem::new(
			String::from("Title"),
			ApeItemValue::Text(String::from("APE title")),
		)
		.unwrap(),
	);
	ape.write_to(&mut file).unwrap();

	let mut coordinator = TagCoordinator::new(&mut file, &TagSystem::ALL);
	coordinator.refresh().unwrap();
	assert_eq!(coordinator.state(TagSystem::Id3v2), TagState::NotFound);
	assert!(matches!(
		coordinator.state(TagSystem::Ape),
		TagState::Found(_)
	));

	let delta = TagDelta::new().set(Field::Album, "Album");
	coordinator
		.write_ape(None, &delta, WriteOptions::new())
		.unwrap();

	// Untouched systems keep their `Found` state, only their regions may move
	assert!(matches!(
		coordinator.state(TagSystem::Id3v1),
		TagState::Found(_)
	));

	let ape = coordinator.read_ape().unwrap().unwrap();
	assert_eq!(ape.get(Field::Title), Some("APE title"));
	assert_eq!(ape.get(Field::Album), Some("Album"));

	let id3v1 = coordinator.read_id3v1().unwrap().unwrap();
	assert_eq!(id3v1.get(Field::Title), Some("ID3v1 title"));
	assert_eq!(id3v1.get(Field::Album), None);

	assert!(coordinator.read_id3v2().unwrap().is_none());
}

#[test_log::test]
fn unsupported_systems_are_refused() {
	let mut coordinator = TagCoordinator::new(temp_file(), &[TagSystem::Id3v2]);
	coordinator.refresh().unwrap();

	assert!(!coordinator.can_exist(TagSystem::Ape));
	assert_eq!(coordinator.state(TagSystem::Ape), TagState::Absent);

	let delta = TagDelta::new().set(Field::Title, "Title");
	assert!(
		coordinator
			.write_ape(None, &delta, WriteOptions::new())
			.is_err()
	);
	assert!(coordinator.read_id3v1().is_err());
	assert!(coordinator.remove(TagSystem::Id3v1, 0).is_err());

	// Nothing was written
	let mut file = coordinator.into_inner();
	assert_eq!(contents(&mut file), AUDIO);
}

#[test_log::test]
fn id3v2_padding_stays_in_place() {
	let mut coordinator = TagCoordinator::new(temp_file(), &TagSystem::ALL);

	let delta = TagDelta::new().set(Field::Title, "Title").padding(512);
	coordinator
		.write_id3v2(None, &delta, Id3v2Version::V4, WriteOptions::new())
		.unwrap();
	coordinator
		.write_ape(None, &TagDelta::new().set(Field::Title, "Title"), WriteOptions::new())
		.unwrap();

	let before = coordinator.state(TagSystem::Id3v2).region().unwrap();
	let ape_before = coordinator.state(TagSystem::Ape).region().unwrap();

	// A small edit fits in the padding, so nothing moves
	let report = coordinator
		.write_id3v2(
			None,
			&TagDelta::new().set(Field::Album, "Album"),
			Id3v2Version::V4,
			WriteOptions::new(),
		)
		.unwrap();
	assert!(report.in_place);
	assert_eq!(coordinator.state(TagSystem::Id3v2).region(), Some(before));
	assert_eq!(coordinator.state(TagSystem::Ape).region(), Some(ape_before));

	// Removing with a padding hint leaves an empty tag behind
	coordinator.remove(TagSystem::Id3v2, 64).unwrap();
	let region = coordinator.state(TagSystem::Id3v2).region().unwrap();
	assert_eq!(region.len, 10 + 64);
	assert!(coordinator.read_id3v2().unwrap().is_some_and(|tag| tag.is_empty()));
}

#[test_log::test]
fn ape_and_id3v2_values_agree() {
	let mut file = Cursor::new(AUDIO.to_vec());

	let delta = TagDelta::new()
		.set(Field::Artist, "AA;BB")
		.set(Field::TrackNumber, "3")
		.set(Field::TrackTotal, "12")
		.set(Field::RecordingDate, "2004-03-05")
		.set_additional("MOOD", "Calm");
	let options = WriteOptions::new().leading_zeros(LeadingZeros::MatchTotal);

	v2::write_tag(&mut file, None, &delta, Id3v2Version::V4, options).unwrap();

	let mut coordinator = TagCoordinator::new(&mut file, &[TagSystem::Id3v2, TagSystem::Ape]);
	coordinator.write_ape(None, &delta, options).unwrap();

	let id3v2 = coordinator.read_id3v2().unwrap().unwrap();
	let ape = coordinator.read_ape().unwrap().unwrap();

	for field in [
		Field::Artist,
		Field::TrackNumber,
		Field::TrackTotal,
		Field::RecordingDate,
	] {
		assert_eq!(id3v2.get(field), ape.get(field), "{field}");
	}
	assert_eq!(id3v2.additional("MOOD"), Some("Calm"));
	assert_eq!(ape.additional("MOOD"), Some("Calm"));

	let raw = ApeTag::read_from(&mut file, ParseOptions::new())
		.unwrap()
		.unwrap();
	let Some(ApeItemValue::Text(track)) = raw.get("Track").map(ApeItem::value) else {
		panic!("Expected a text `Track` item");
	};
	assert_eq!(track, "03/12");
}
