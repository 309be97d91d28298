use std::fmt::{Display, Formatter};

macro_rules! gen_fields {
	(
		$(
			$(#[$meta:meta])*
			$variant:ident => $name:literal $(, multi = $multi:literal)?
		);+ $(;)?
	) => {
		/// The closed set of well-known fields every tag system maps onto
		///
		/// Anything outside of this set is kept as an additional field under its native key.
		#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
		#[non_exhaustive]
		pub enum Field {
			$(
				$(#[$meta])*
				$variant,
			)+
		}

		impl Field {
			/// Every well-known field, in declaration order
			pub const ALL: &'static [Field] = &[$(Field::$variant),+];

			/// A stable, human-readable name for the field
			pub fn name(self) -> &'static str {
				match self {
					$(Field::$variant => $name,)+
				}
			}

			/// Whether the field can hold several values joined by a separator
			pub fn is_multi_valued(self) -> bool {
				match self {
					$(Field::$variant => false $(|| $multi)?,)+
				}
			}
		}
	};
}

gen_fields! {
	#[allow(missing_docs)]
	Title => "Title";
	#[allow(missing_docs)]
	Artist => "Artist", multi = true;
	#[allow(missing_docs)]
	Album => "Album";
	#[allow(missing_docs)]
	AlbumArtist => "Album Artist", multi = true;
	/// The comment with an empty description
	Comment => "Comment";
	/// A [`Timestamp`](crate::tag::Timestamp) at any precision
	RecordingDate => "Recording Date";
	/// A [`Timestamp`](crate::tag::Timestamp) at any precision
	OriginalReleaseDate => "Original Release Date";
	/// A [`Timestamp`](crate::tag::Timestamp) at any precision
	PublishingDate => "Publishing Date";
	/// Genre names, numeric ID3v1 references are resolved on read
	Genre => "Genre", multi = true;
	#[allow(missing_docs)]
	Composer => "Composer", multi = true;
	#[allow(missing_docs)]
	Conductor => "Conductor", multi = true;
	#[allow(missing_docs)]
	Lyricist => "Lyricist", multi = true;
	#[allow(missing_docs)]
	Publisher => "Publisher";
	#[allow(missing_docs)]
	Copyright => "Copyright";
	#[allow(missing_docs)]
	Description => "Description";
	#[allow(missing_docs)]
	Grouping => "Grouping";
	#[allow(missing_docs)]
	TrackNumber => "Track Number";
	#[allow(missing_docs)]
	TrackTotal => "Track Total";
	#[allow(missing_docs)]
	DiscNumber => "Disc Number";
	#[allow(missing_docs)]
	DiscTotal => "Disc Total";
	#[allow(missing_docs)]
	Bpm => "BPM";
	#[allow(missing_docs)]
	Language => "Language";
	#[allow(missing_docs)]
	Isrc => "ISRC";
	#[allow(missing_docs)]
	CatalogNumber => "Catalog Number";
	/// Popularity rating, 0-255
	Rating => "Rating";
	/// Alternating role and person entries
	InvolvedPeople => "Involved People", multi = true;
	#[allow(missing_docs)]
	SortTitle => "Sort Title";
	#[allow(missing_docs)]
	SortArtist => "Sort Artist";
	#[allow(missing_docs)]
	SortAlbum => "Sort Album";
	#[allow(missing_docs)]
	SortAlbumArtist => "Sort Album Artist";
	/// Name of the series or movement
	SeriesTitle => "Series Title";
	/// Position within the series or movement
	SeriesPart => "Series Part";
	#[allow(missing_docs)]
	OriginalArtist => "Original Artist", multi = true;
	#[allow(missing_docs)]
	OriginalAlbum => "Original Album";
	/// The person or organisation that encoded the file
	EncodedBy => "Encoded By";
	/// Encoder software and settings
	Encoder => "Encoder";
	#[allow(missing_docs)]
	AudioSourceUrl => "Audio Source URL";
}

impl Field {
	/// Whether the field holds a [`Timestamp`](crate::tag::Timestamp)
	pub fn is_date(self) -> bool {
		matches!(
			self,
			Field::RecordingDate | Field::OriginalReleaseDate | Field::PublishingDate
		)
	}

	/// Whether the field holds an unsigned number
	pub fn is_numeric(self) -> bool {
		matches!(
			self,
			Field::TrackNumber
				| Field::TrackTotal
				| Field::DiscNumber
				| Field::DiscTotal
				| Field::Rating
		)
	}

	/// Find the field a native key stands for, in any supported tag system
	///
	/// This is what keeps well-known fields and additional fields disjoint.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::tag::Field;
	///
	/// assert_eq!(Field::from_native_key("TIT2"), Some(Field::Title));
	/// assert_eq!(Field::from_native_key("TT2"), Some(Field::Title));
	/// assert_eq!(Field::from_native_key("Album Artist"), Some(Field::AlbumArtist));
	/// assert_eq!(Field::from_native_key("MOOD"), None);
	/// ```
	pub fn from_native_key(key: &str) -> Option<Field> {
		crate::id3::v2::util::mappings::field_for_key(key)
			.or_else(|| crate::ape::field_from_ape_key(key))
	}
}

impl Display for Field {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
