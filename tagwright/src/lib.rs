//! Read, edit and write ID3v2 tags, side by side with ID3v1 and APE tags.
//!
//! Every tag system converts to and from a [`TagData`](tag::TagData): a format-agnostic set of
//! well-known [fields](tag::Field), additional fields kept under their native keys, pictures,
//! chapters and lyrics. Edits are expressed as a [`TagDelta`](tag::TagDelta), which is merged into
//! the tag currently in the file.
//!
//! # Examples
//!
//! ## Reading and writing an ID3v2 tag
//!
//! ```rust
//! # fn main() -> tagwright::error::Result<()> {
//! use tagwright::config::{ParseOptions, WriteOptions};
//! use tagwright::id3::v2::{self, Id3v2Version};
//! use tagwright::tag::{Field, TagDelta};
//! use std::io::Cursor;
//!
//! let mut file = Cursor::new(b"audio data".to_vec());
//!
//! // Multiple values are separated with ';'
//! let delta = TagDelta::new()
//! 	.set(Field::Title, "Title")
//! 	.set(Field::Artist, "AA;BB");
//! v2::write_tag(&mut file, None, &delta, Id3v2Version::V4, WriteOptions::new())?;
//!
//! let tag = v2::read_tag(&mut file, ParseOptions::new())?.expect("tag was just written");
//! assert_eq!(tag.get(Field::Title), Some("Title"));
//!
//! // Edits only touch what the delta names
//! let delta = TagDelta::new().remove(Field::Artist);
//! v2::write_tag(&mut file, Some(&tag), &delta, Id3v2Version::V4, WriteOptions::new())?;
//!
//! let tag = v2::read_tag(&mut file, ParseOptions::new())?.expect("tag was just written");
//! assert_eq!(tag.get(Field::Title), Some("Title"));
//! assert_eq!(tag.get(Field::Artist), None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Several tags in one file
//!
//! See [`TagCoordinator`](coordinator::TagCoordinator).
//!
//! # Important format-specific notes
//!
//! All formats have their own quirks that may produce unexpected results between conversions.
//! Be sure to read the module documentation of each format to see important notes and warnings.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod coordinator;
pub mod error;
pub(crate) mod macros;
pub mod picture;
pub mod tag;
mod util;

pub mod ape;
pub mod id3;

pub use util::text::TextEncoding;

pub use util::io;
