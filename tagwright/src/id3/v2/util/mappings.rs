//! Mappings between well-known fields and ID3v2 frames

use super::upgrade::normalize_frame_id;
use crate::tag::Field;

/// Fields stored in a plain text or URL frame of their own, by ID3v2.4 frame ID
pub(crate) const FIELD_FRAMES: &[(Field, &str)] = &[
	(Field::Title, "TIT2"),
	(Field::Artist, "TPE1"),
	(Field::Album, "TALB"),
	(Field::AlbumArtist, "TPE2"),
	(Field::RecordingDate, "TDRC"),
	(Field::OriginalReleaseDate, "TDOR"),
	(Field::PublishingDate, "TDRL"),
	(Field::Genre, "TCON"),
	(Field::Composer, "TCOM"),
	(Field::Conductor, "TPE3"),
	(Field::Lyricist, "TEXT"),
	(Field::Publisher, "TPUB"),
	(Field::Copyright, "TCOP"),
	(Field::Description, "TIT3"),
	(Field::Grouping, "TIT1"),
	(Field::Bpm, "TBPM"),
	(Field::Language, "TLAN"),
	(Field::Isrc, "TSRC"),
	(Field::SortTitle, "TSOT"),
	(Field::SortArtist, "TSOP"),
	(Field::SortAlbum, "TSOA"),
	(Field::SortAlbumArtist, "TSO2"),
	(Field::SeriesTitle, "MVNM"),
	(Field::SeriesPart, "MVIN"),
	(Field::OriginalArtist, "TOPE"),
	(Field::OriginalAlbum, "TOAL"),
	(Field::EncodedBy, "TENC"),
	(Field::Encoder, "TSSE"),
	(Field::AudioSourceUrl, "WOAS"),
];

/// Fields stored in a `TXXX` frame, by description
pub(crate) const FIELD_TXXX: &[(Field, &str)] = &[(Field::CatalogNumber, "CATALOGNUMBER")];

/// Frames that hold more than one field, or need a dedicated codec
pub(crate) const STRUCTURED_FRAMES: &[(&str, Field)] = &[
	("TRCK", Field::TrackNumber),
	("TPOS", Field::DiscNumber),
	("COMM", Field::Comment),
	("POPM", Field::Rating),
	("TIPL", Field::InvolvedPeople),
];

/// Standard frames without a dedicated codec, kept as raw bytes
pub(crate) const BINARY_FRAMES: &[&str] = &[
	"AENC", "ASPI", "COMR", "ENCR", "EQU2", "EQUA", "ETCO", "GEOB", "GRID", "LINK", "MCDI", "MLLT",
	"OWNE", "PCNT", "POSS", "RBUF", "RVA2", "RVAD", "RVRB", "SEEK", "SIGN", "SYTC", "UFID", "USER",
];

pub(crate) fn frame_id_for_field(field: Field) -> Option<&'static str> {
	FIELD_FRAMES
		.iter()
		.find(|(f, _)| *f == field)
		.map(|(_, id)| *id)
}

pub(crate) fn txxx_description_for_field(field: Field) -> Option<&'static str> {
	FIELD_TXXX
		.iter()
		.find(|(f, _)| *f == field)
		.map(|(_, desc)| *desc)
}

/// Find the field an ID3v2.4 frame ID stands for
pub(crate) fn field_for_frame_id(id: &str) -> Option<Field> {
	FIELD_FRAMES
		.iter()
		.find(|(_, frame_id)| *frame_id == id)
		.map(|(field, _)| *field)
		.or_else(|| {
			STRUCTURED_FRAMES
				.iter()
				.find(|(frame_id, _)| *frame_id == id)
				.map(|(_, field)| *field)
		})
}

pub(crate) fn field_for_txxx(description: &str) -> Option<Field> {
	FIELD_TXXX
		.iter()
		.find(|(_, desc)| desc.eq_ignore_ascii_case(description))
		.map(|(field, _)| *field)
}

/// Find the field a native ID3v2 additional-field key stands for
///
/// Keys are frame IDs of any version, or `TXXX` descriptions.
pub(crate) fn field_for_key(key: &str) -> Option<Field> {
	if (3..=4).contains(&key.len()) {
		if let Some(field) = field_for_frame_id(normalize_frame_id(key)) {
			return Some(field);
		}
	}

	field_for_txxx(key)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn every_field_has_one_home() {
		for field in Field::ALL {
			let homes = usize::from(frame_id_for_field(*field).is_some())
				+ usize::from(txxx_description_for_field(*field).is_some())
				+ STRUCTURED_FRAMES.iter().filter(|(_, f)| f == field).count();

			// Totals share their frame with the number
			let expected = usize::from(!matches!(field, Field::TrackTotal | Field::DiscTotal));
			assert_eq!(homes, expected, "{field}");
		}
	}

	#[test_log::test]
	fn keys_of_every_version_resolve() {
		assert_eq!(field_for_key("TT2"), Some(Field::Title));
		assert_eq!(field_for_key("TYER"), Some(Field::RecordingDate));
		assert_eq!(field_for_key("IPLS"), Some(Field::InvolvedPeople));
		assert_eq!(field_for_key("catalognumber"), Some(Field::CatalogNumber));
		assert_eq!(field_for_key("TXXX"), None);
	}
}
