//! Keeping several tag systems in one file
//!
//! ID3v2, APE and ID3v1 tags each own a separate region of a file: ID3v2 at the start, APE at
//! the end, and ID3v1 in the last 128 bytes after that. A [`TagCoordinator`] tracks these regions
//! for a single stream, so each system can be read, written or removed without disturbing the
//! others.
//!
//! # Examples
//!
//! ```rust
//! use tagwright::config::WriteOptions;
//! use tagwright::coordinator::{TagCoordinator, TagState};
//! use tagwright::id3::v2::Id3v2Version;
//! use tagwright::tag::{Field, TagDelta, TagSystem};
//! use std::io::Cursor;
//!
//! # fn main() -> tagwright::error::Result<()> {
//! let file = Cursor::new(b"audio".to_vec());
//! let mut coordinator = TagCoordinator::new(file, &[TagSystem::Id3v2, TagSystem::Ape]);
//! coordinator.refresh()?;
//!
//! let delta = TagDelta::new().set(Field::Title, "Title");
//! coordinator.write_id3v2(None, &delta, Id3v2Version::V4, WriteOptions::new())?;
//! coordinator.write_ape(None, &delta, WriteOptions::new())?;
//!
//! assert!(coordinator.exists(TagSystem::Id3v2));
//! assert!(coordinator.exists(TagSystem::Ape));
//! assert!(!coordinator.can_exist(TagSystem::Id3v1));
//!
//! coordinator.remove(TagSystem::Id3v2, 0)?;
//! coordinator.remove(TagSystem::Ape, 0)?;
//! assert_eq!(coordinator.state(TagSystem::Ape), TagState::Written(None));
//! assert_eq!(coordinator.into_inner().into_inner(), b"audio");
//! # Ok(()) }
//! ```

use crate::ape::ApeTag;
use crate::ape::header::find_ape;
use crate::config::{ParseOptions, WriteOptions};
use crate::error::{Result, TagError};
use crate::id3::v1::Id3v1Tag;
use crate::id3::v1::constants::ID3V1_TAG_SIZE;
use crate::id3::v2::{self, Id3v2Version, WriteReport};
use crate::id3::{find_id3v1, find_id3v2};
use crate::macros::err;
use crate::tag::{TagData, TagDelta, TagSystem};
use crate::util::io::{FileLike, Length, Truncate};

/// The bytes a tag occupies in a file
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TagRegion {
	/// Offset of the first byte of the tag
	pub offset: u64,
	/// The size of the tag, headers, footers and padding included
	pub len: u64,
}

impl TagRegion {
	/// The offset right after the tag
	pub fn end(&self) -> u64 {
		self.offset + self.len
	}
}

/// What a [`TagCoordinator`] knows about a tag system
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TagState {
	/// The file hasn't been searched yet, or the system can't exist in this file
	#[default]
	Absent,
	/// The file was searched, and holds no such tag
	NotFound,
	/// The file holds a tag of this system
	Found(TagRegion),
	/// The tag was written during this session, `None` if it was removed
	Written(Option<TagRegion>),
}

impl TagState {
	/// The region of the tag, if it exists
	pub fn region(&self) -> Option<TagRegion> {
		match self {
			TagState::Found(region) | TagState::Written(Some(region)) => Some(*region),
			_ => None,
		}
	}
}

/// Reads and writes several tag systems in a single stream
///
/// The coordinator owns the stream for the whole session. After any write or removal, the
/// regions of all other systems are searched for again, since they may have moved.
pub struct TagCoordinator<F> {
	file: F,
	supported: Vec<TagSystem>,
	states: [TagState; 3],
	parse_options: ParseOptions,
}

impl<F> TagCoordinator<F>
where
	F: FileLike,
	TagError: From<<F as Truncate>::Error>,
	TagError: From<<F as Length>::Error>,
{
	/// Create a coordinator for the tag systems in `supported`
	///
	/// Nothing is read until [`TagCoordinator::refresh`] or one of the read methods is called.
	pub fn new(file: F, supported: &[TagSystem]) -> Self {
		Self {
			file,
			supported: supported.to_vec(),
			states: [TagState::Absent; 3],
			parse_options: ParseOptions::new(),
		}
	}

	/// Set the options used for every read
	pub fn with_parse_options(mut self, parse_options: ParseOptions) -> Self {
		self.parse_options = parse_options;
		self
	}

	/// Search the file for every supported tag system
	///
	/// Systems written during this session stay [`TagState::Written`], with their region updated.
	///
	/// # Errors
	///
	/// Errors from the stream
	pub fn refresh(&mut self) -> Result<()> {
		for system in TagSystem::ALL {
			if self.can_exist(system) {
				self.relocate(system)?;
			}
		}

		Ok(())
	}

	/// The current state of `system`
	pub fn state(&self, system: TagSystem) -> TagState {
		self.states[state_index(system)]
	}

	/// Whether a tag of `system` is known to be in the file
	///
	/// A system that hasn't been searched for yet doesn't exist, see [`TagCoordinator::refresh`].
	pub fn exists(&self, system: TagSystem) -> bool {
		self.state(system).region().is_some()
	}

	/// Whether `system` is supported in this file at all
	pub fn can_exist(&self, system: TagSystem) -> bool {
		self.supported.contains(&system)
	}

	/// Read the ID3v2 tag
	///
	/// # Errors
	///
	/// * The ID3v2 system isn't supported, see [`TagCoordinator::can_exist`]
	/// * Errors from the stream
	pub fn read_id3v2(&mut self) -> Result<Option<TagData>> {
		self.check_supported(TagSystem::Id3v2)?;
		self.relocate(TagSystem::Id3v2)?;

		v2::read_tag(&mut self.file, self.parse_options)
	}

	/// Merge `delta` into the ID3v2 tag and write it, see [`v2::write_tag`]
	///
	/// # Errors
	///
	/// * The ID3v2 system isn't supported, see [`TagCoordinator::can_exist`]
	/// * Any error from [`v2::write_tag`]
	pub fn write_id3v2(
		&mut self,
		existing: Option<&TagData>,
		delta: &TagDelta,
		version: Id3v2Version,
		write_options: WriteOptions,
	) -> Result<WriteReport> {
		self.check_supported(TagSystem::Id3v2)?;

		let report = v2::write_tag(&mut self.file, existing, delta, version, write_options)?;
		self.after_write(TagSystem::Id3v2)?;

		Ok(report)
	}

	/// Read the APE tag
	///
	/// # Errors
	///
	/// * The APE system isn't supported, see [`TagCoordinator::can_exist`]
	/// * Errors from the stream
	pub fn read_ape(&mut self) -> Result<Option<TagData>> {
		self.check_supported(TagSystem::Ape)?;
		self.relocate(TagSystem::Ape)?;

		Ok(ApeTag::read_from(&mut self.file, self.parse_options)?
			.map(|tag| tag.into_tag_data(self.parse_options)))
	}

	/// Merge `delta` into the APE tag and write it
	///
	/// The merge base is `existing` when provided, otherwise the tag currently in the file.
	///
	/// # Errors
	///
	/// * The APE system isn't supported, see [`TagCoordinator::can_exist`]
	/// * Any error from [`ApeTag::write_to`]
	pub fn write_ape(
		&mut self,
		existing: Option<&TagData>,
		delta: &TagDelta,
		write_options: WriteOptions,
	) -> Result<()> {
		self.check_supported(TagSystem::Ape)?;

		let merged = match existing {
			Some(existing) => existing.merge(delta),
			None => self.read_ape()?.unwrap_or_default().merge(delta),
		};

		ApeTag::from_tag_data(&merged, write_options).write_to(&mut self.file)?;
		self.after_write(TagSystem::Ape)
	}

	/// Read the ID3v1 tag
	///
	/// # Errors
	///
	/// * The ID3v1 system isn't supported, see [`TagCoordinator::can_exist`]
	/// * Errors from the stream
	pub fn read_id3v1(&mut self) -> Result<Option<TagData>> {
		self.check_supported(TagSystem::Id3v1)?;
		self.relocate(TagSystem::Id3v1)?;

		Ok(Id3v1Tag::read_from(&mut self.file, self.parse_options)?.map(Id3v1Tag::into_tag_data))
	}

	/// Merge `delta` into the ID3v1 tag and write it
	///
	/// The merge base is `existing` when provided, otherwise the tag currently in the file.
	///
	/// # Errors
	///
	/// * The ID3v1 system isn't supported, see [`TagCoordinator::can_exist`]
	/// * Any error from [`Id3v1Tag::write_to`]
	pub fn write_id3v1(
		&mut self,
		existing: Option<&TagData>,
		delta: &TagDelta,
		write_options: WriteOptions,
	) -> Result<()> {
		self.check_supported(TagSystem::Id3v1)?;

		let merged = match existing {
			Some(existing) => existing.merge(delta),
			None => self.read_id3v1()?.unwrap_or_default().merge(delta),
		};

		Id3v1Tag::from_tag_data(&merged).write_to(&mut self.file, write_options)?;
		self.after_write(TagSystem::Id3v1)
	}

	/// Remove the tag of `system`
	///
	/// `padding_hint` only applies to ID3v2, see [`v2::remove_tag`].
	///
	/// Returns `true` if there was a tag to remove.
	///
	/// # Errors
	///
	/// * `system` isn't supported, see [`TagCoordinator::can_exist`]
	/// * Errors from the stream
	pub fn remove(&mut self, system: TagSystem, padding_hint: u32) -> Result<bool> {
		self.check_supported(system)?;

		let removed = match system {
			TagSystem::Id3v2 => {
				let existed = self.locate(TagSystem::Id3v2)?.is_some();
				v2::remove_tag(&mut self.file, padding_hint)?;
				existed
			},
			TagSystem::Ape => ApeTag::remove_from(&mut self.file)?,
			TagSystem::Id3v1 => Id3v1Tag::remove_from(&mut self.file)?,
		};

		self.after_write(system)?;
		Ok(removed)
	}

	/// Get the stream back
	pub fn into_inner(self) -> F {
		self.file
	}

	fn check_supported(&self, system: TagSystem) -> Result<()> {
		if !self.can_exist(system) {
			log::error!("{system:?} tags are not supported in this file");
			err!(UnsupportedTag);
		}

		Ok(())
	}

	fn locate(&mut self, system: TagSystem) -> Result<Option<TagRegion>> {
		let region = match system {
			TagSystem::Id3v2 => {
				find_id3v2(&mut self.file, self.parse_options.max_junk_bytes as u64)?.map(
					|location| TagRegion {
						offset: location.offset,
						len: location.len(),
					},
				)
			},
			TagSystem::Ape => find_ape(&mut self.file)?.map(|location| TagRegion {
				offset: location.offset,
				len: location.len,
			}),
			TagSystem::Id3v1 => find_id3v1(&mut self.file)?.map(|offset| TagRegion {
				offset,
				len: ID3V1_TAG_SIZE,
			}),
		};

		Ok(region)
	}

	// Search for `system` again, keeping track of whether it was written
	fn relocate(&mut self, system: TagSystem) -> Result<()> {
		let region = self.locate(system)?;

		let state = match (self.state(system), region) {
			(TagState::Written(_), region) => TagState::Written(region),
			(_, Some(region)) => TagState::Found(region),
			(_, None) => TagState::NotFound,
		};

		log::debug!("{system:?}: {state:?}");
		self.states[state_index(system)] = state;
		Ok(())
	}

	fn after_write(&mut self, written: TagSystem) -> Result<()> {
		self.states[state_index(written)] = TagState::Written(None);
		self.relocate(written)?;

		// Everything after the written region may have moved
		for system in TagSystem::ALL {
			if system != written && self.state(system) != TagState::Absent {
				self.relocate(system)?;
			}
		}

		Ok(())
	}
}

fn state_index(system: TagSystem) -> usize {
	match system {
		TagSystem::Id3v2 => 0,
		TagSystem::Ape => 1,
		TagSystem::Id3v1 => 2,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tag::Field;

	use std::io::Cursor;

	const ALL: [TagSystem; 3] = TagSystem::ALL;

	fn coordinator(bytes: &[u8]) -> TagCoordinator<Cursor<Vec<u8>>> {
		TagCoordinator::new(Cursor::new(bytes.to_vec()), &ALL)
	}

	#[test_log::test]
	fn states_follow_reads_and_writes() {
		let mut coordinator = coordinator(b"audio");
		assert_eq!(coordinator.state(TagSystem::Ape), TagState::Absent);
		assert!(!coordinator.exists(TagSystem::Ape));
		assert!(coordinator.can_exist(TagSystem::Ape));

		assert!(coordinator.read_ape().unwrap().is_none());
		assert_eq!(coordinator.state(TagSystem::Ape), TagState::NotFound);
		assert_eq!(coordinator.state(TagSystem::Id3v1), TagState::Absent);

		let delta = TagDelta::new().set(Field::Title, "Title");
		coordinator
			.write_ape(None, &delta, WriteOptions::new())
			.unwrap();

		let Some(region) = coordinator.state(TagSystem::Ape).region() else {
			panic!("Expected an APE region");
		};
		assert_eq!(coordinator.state(TagSystem::Ape), TagState::Written(Some(region)));
		assert_eq!(region.offset, 5);
	}

	#[test_log::test]
	fn regions_move_after_writes() {
		let mut coordinator = coordinator(b"audio");
		coordinator.refresh().unwrap();

		let delta = TagDelta::new().set(Field::Title, "Title");
		coordinator
			.write_id3v1(None, &delta, WriteOptions::new())
			.unwrap();
		coordinator
			.write_ape(None, &delta, WriteOptions::new())
			.unwrap();

		let ape = coordinator.state(TagSystem::Ape).region().unwrap();
		let id3v1 = coordinator.state(TagSystem::Id3v1).region().unwrap();
		assert_eq!(ape.offset, 5);
		assert_eq!(ape.end(), id3v1.offset);

		coordinator
			.write_id3v2(None, &delta, Id3v2Version::V4, WriteOptions::new())
			.unwrap();

		let id3v2 = coordinator.state(TagSystem::Id3v2).region().unwrap();
		let moved_ape = coordinator.state(TagSystem::Ape).region().unwrap();
		assert_eq!(id3v2.offset, 0);
		assert_eq!(moved_ape.offset, ape.offset + id3v2.len);
		assert_eq!(moved_ape.len, ape.len);

		assert_eq!(
			coordinator.read_ape().unwrap().unwrap().get(Field::Title),
			Some("Title")
		);
		assert_eq!(
			coordinator.read_id3v1().unwrap().unwrap().get(Field::Title),
			Some("Title")
		);
	}

	#[test_log::test]
	fn unsupported_systems() {
		let mut coordinator = TagCoordinator::new(Cursor::new(Vec::<u8>::new()), &[TagSystem::Id3v2]);
		coordinator.refresh().unwrap();

		assert!(!coordinator.can_exist(TagSystem::Id3v1));
		assert_eq!(coordinator.state(TagSystem::Id3v1), TagState::Absent);
		assert_eq!(coordinator.state(TagSystem::Id3v2), TagState::NotFound);
		assert!(coordinator.read_id3v1().is_err());
		assert!(coordinator.remove(TagSystem::Ape, 0).is_err());
	}

	#[test_log::test]
	fn remove_reports_missing_tags() {
		let mut coordinator = coordinator(b"audio");
		assert!(!coordinator.remove(TagSystem::Id3v2, 0).unwrap());
		assert_eq!(coordinator.state(TagSystem::Id3v2), TagState::Written(None));
		assert_eq!(coordinator.into_inner().into_inner(), b"audio");
	}
}
