//! APE specific items
//!
//! APE tags live at the end of a file, before any ID3v1 tag. Both APEv1 (footer only) and
//! APEv2 tags are read, APEv2 tags with a header and footer are written.
//!
//! The entry points are [`ApeTag::read_from`], [`ApeTag::write_to`] and [`ApeTag::remove_from`].

pub(crate) mod constants;
pub(crate) mod header;
mod mappings;
pub(crate) mod tag;

// Exports

pub use crate::picture::APE_PICTURE_TYPES;
pub use tag::ApeTag;
pub use tag::item::{ApeItem, ApeItemValue};

pub(crate) use mappings::field_from_ape_key;
