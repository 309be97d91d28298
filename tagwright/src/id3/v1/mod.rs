//! ID3v1 items
//!
//! ID3v1 is a fixed 128 byte tag stored at the very end of a file, see [`Id3v1Tag`].

pub(crate) mod constants;
mod read;
mod tag;
mod write;

pub use constants::GENRES;
pub use tag::Id3v1Tag;
