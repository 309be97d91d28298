use crate::tag::Field;

// Each line maps one or more APE keys onto one or more fields. The first key is the one
// written, the others are only recognized on read. A key mapping to several fields stands
// for the first of them on read.
//
// Keys are compared case-insensitively, since the ecosystem is far from consistent.
macro_rules! gen_map {
	($($($key:literal)|+ => $($field:ident)|+),+ $(,)?) => {
		/// Find the field an APE item key stands for
		pub(crate) fn field_from_ape_key(key: &str) -> Option<Field> {
			$(
				if [$($key),+].iter().any(|k| k.eq_ignore_ascii_case(key)) {
					return Some(first_field!($($field)|+));
				}
			)+

			None
		}

		/// The APE item key a field is written under
		pub(crate) fn ape_key_for_field(field: Field) -> Option<&'static str> {
			match field {
				$($(Field::$field)|+ => Some([$($key),+][0]),)+
				_ => None,
			}
		}
	};
}

macro_rules! first_field {
	($first:ident $(| $rest:ident)*) => {
		Field::$first
	};
}

gen_map! {
	"Title"                        => Title,
	"Artist"                       => Artist,
	"Album"                        => Album,
	"Album Artist" | "ALBUMARTIST" => AlbumArtist,
	"Comment"                      => Comment,
	// For some reason, the ecosystem agreed on the key "Year", even for full date strings.
	"Year"                         => RecordingDate,
	"ORIGINALYEAR"                 => OriginalReleaseDate,
	"RELEASEDATE"                  => PublishingDate,
	"Genre"                        => Genre,
	"Composer"                     => Composer,
	"Conductor"                    => Conductor,
	"Lyricist"                     => Lyricist,
	"Label" | "Publisher"          => Publisher,
	"Copyright"                    => Copyright,
	"Grouping"                     => Grouping,
	"Track"                        => TrackNumber | TrackTotal,
	"Disc"                         => DiscNumber | DiscTotal,
	"BPM"                          => Bpm,
	"Language"                     => Language,
	"ISRC"                         => Isrc,
	"CatalogNumber"                => CatalogNumber,
	"TITLESORT"                    => SortTitle,
	"ARTISTSORT"                   => SortArtist,
	"ALBUMSORT"                    => SortAlbum,
	"ALBUMARTISTSORT"              => SortAlbumArtist,
	"MOVEMENTNAME"                 => SeriesTitle,
	"MOVEMENT"                     => SeriesPart,
	"EncodedBy"                    => EncodedBy,
}
