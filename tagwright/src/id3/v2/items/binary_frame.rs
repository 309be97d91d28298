use crate::id3::v2::FrameId;

/// A frame whose content isn't interpreted
///
/// Used for every frame ID without a dedicated type, the body is written back unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryFrame {
	/// The frame ID
	pub id: FrameId,
	/// The raw frame body
	pub data: Vec<u8>,
}

impl BinaryFrame {
	/// Create a new [`BinaryFrame`]
	pub fn new(id: FrameId, data: Vec<u8>) -> Self {
		Self { id, data }
	}
}
