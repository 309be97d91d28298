use crate::id3::v2::frame::Frame;
use crate::id3::v2::restrictions::{ImageSizeRestrictions, TagRestrictions};
use crate::picture::{MimeType, PictureDimensions, PictureInfo};

use std::fmt::{Display, Formatter};

/// A tag restriction that a written tag doesn't meet
///
/// Restrictions are advisory, the tag is written regardless. Every warning is also logged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RestrictionWarning {
	/// A text value is longer than the text size restriction allows
	TextTooLong {
		/// The frame holding the value
		frame: String,
		/// The length of the value, in characters
		length: usize,
		/// The maximum length
		max: usize,
	},
	/// The tag has more frames than the tag size restriction allows
	TooManyFrames {
		/// The number of frames written
		count: usize,
		/// The maximum number of frames
		max: usize,
	},
	/// The tag is larger than the tag size restriction allows
	TagTooLarge {
		/// The size of the tag, header included
		size: u64,
		/// The maximum size
		max: u32,
	},
	/// A picture is not a PNG or JPEG
	PictureFormat {
		/// Position of the picture in the tag
		index: usize,
		/// The MIME type of the picture, if known
		mime_type: Option<String>,
	},
	/// A picture does not have the required dimensions
	PictureSize {
		/// Position of the picture in the tag
		index: usize,
		/// The picture's dimensions
		dimensions: PictureDimensions,
		/// The restriction it violates
		required: ImageSizeRestrictions,
	},
}

impl Display for RestrictionWarning {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::TextTooLong { frame, length, max } => write!(
				f,
				"Frame `{frame}` is longer than authorized ({length} characters, maximum {max})"
			),
			Self::TooManyFrames { count, max } => {
				write!(f, "Tag has too many frames ({count}, maximum {max})")
			},
			Self::TagTooLarge { size, max } => {
				write!(f, "Tag is too large ({size} bytes, maximum {max})")
			},
			Self::PictureFormat { index, mime_type } => write!(
				f,
				"Picture #{index} must be a PNG or JPEG, found {}",
				mime_type.as_deref().unwrap_or("an unknown format")
			),
			Self::PictureSize {
				index,
				dimensions,
				required,
			} => write!(
				f,
				"Picture #{index} must be {}, found {}x{}",
				required.description(),
				dimensions.width,
				dimensions.height
			),
		}
	}
}

/// Check the frames of a tag against `restrictions`
pub(super) fn check_frames(
	frames: &[Frame],
	restrictions: &TagRestrictions,
) -> Vec<RestrictionWarning> {
	let mut warnings = Vec::new();

	let max_frames = restrictions.size.max_frames();
	if frames.len() > max_frames {
		warnings.push(RestrictionWarning::TooManyFrames {
			count: frames.len(),
			max: max_frames,
		});
	}

	if let Some(text_size) = restrictions.text_fields_size {
		let max = text_size.max_chars();
		for frame in frames {
			for text in frame_texts(frame) {
				let length = text.chars().count();
				if length > max {
					warnings.push(RestrictionWarning::TextTooLong {
						frame: frame.id().to_owned(),
						length,
						max,
					});
				}
			}
		}
	}

	let pictures = frames.iter().filter_map(|frame| match frame {
		Frame::Picture(picture) => Some(&picture.picture),
		_ => None,
	});

	for (index, picture) in pictures.enumerate() {
		check_picture(index, picture, restrictions, &mut warnings);
	}

	warnings.iter().for_each(|warning| log::warn!("{warning}"));
	warnings
}

/// Check the final size of a tag against `restrictions`
pub(super) fn check_size(size: u64, restrictions: &TagRestrictions) -> Option<RestrictionWarning> {
	let max = restrictions.size.max_size();
	if size <= u64::from(max) {
		return None;
	}

	let warning = RestrictionWarning::TagTooLarge { size, max };
	log::warn!("{warning}");
	Some(warning)
}

// Values of a frame, restrictions apply to each one separately
fn frame_texts(frame: &Frame) -> Vec<&str> {
	match frame {
		Frame::Text(frame) => frame.values().collect(),
		Frame::UserText(frame) => frame.content.split('\0').collect(),
		Frame::Comment(frame) | Frame::UnsynchronizedText(frame) => vec![frame.content.as_str()],
		_ => Vec::new(),
	}
}

fn check_picture(
	index: usize,
	picture: &PictureInfo,
	restrictions: &TagRestrictions,
	warnings: &mut Vec<RestrictionWarning>,
) {
	if restrictions.image_encoding {
		let mime_type = picture.effective_mime_type();
		if !matches!(mime_type, Some(MimeType::Png | MimeType::Jpeg)) {
			warnings.push(RestrictionWarning::PictureFormat {
				index,
				mime_type: mime_type.map(|mime| mime.as_str().to_owned()),
			});
		}
	}

	let Some(required) = restrictions.image_size else {
		return;
	};

	match PictureDimensions::from_image(picture.data()) {
		Ok(dimensions) if !required.allows(dimensions.width, dimensions.height) => {
			warnings.push(RestrictionWarning::PictureSize {
				index,
				dimensions,
				required,
			});
		},
		Ok(_) => {},
		Err(err) => log::debug!("Unable to check the size of picture #{index}: {err}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::id3::v2::frame::FrameId;
	use crate::id3::v2::items::{AttachedPictureFrame, TextInformationFrame};
	use crate::id3::v2::restrictions::{TagSizeRestrictions, TextSizeRestrictions};
	use crate::picture::tests::png;
	use crate::picture::{PictureInfo, PictureType};
	use crate::util::text::TextEncoding;

	fn picture_frame(mime_type: MimeType, data: Vec<u8>) -> Frame {
		Frame::Picture(AttachedPictureFrame::new(
			TextEncoding::UTF8,
			PictureInfo::new(PictureType::Front, Some(mime_type), data),
		))
	}

	#[test_log::test]
	fn long_text_values() {
		let restrictions = TagRestrictions {
			text_fields_size: Some(TextSizeRestrictions::C_30),
			..TagRestrictions::default()
		};

		let frames = [Frame::Text(TextInformationFrame::new(
			FrameId::new("TPE1").unwrap(),
			TextEncoding::UTF8,
			format!("Short\0{}", "x".repeat(31)),
		))];

		assert_eq!(
			check_frames(&frames, &restrictions),
			[RestrictionWarning::TextTooLong {
				frame: String::from("TPE1"),
				length: 31,
				max: 30,
			}]
		);
	}

	#[test_log::test]
	fn picture_restrictions() {
		let restrictions = TagRestrictions {
			image_encoding: true,
			image_size: Some(ImageSizeRestrictions::P_64_64),
			..TagRestrictions::default()
		};

		let frames = [
			picture_frame(MimeType::Png, png(64, 64)),
			picture_frame(MimeType::Png, png(32, 64)),
			picture_frame(MimeType::Gif, b"GIF89a".to_vec()),
		];

		let warnings = check_frames(&frames, &restrictions);
		assert_eq!(warnings.len(), 2);
		assert!(matches!(
			warnings[0],
			RestrictionWarning::PictureSize {
				index: 1,
				dimensions: PictureDimensions {
					width: 32,
					height: 64
				},
				..
			}
		));
		assert!(matches!(
			warnings[1],
			RestrictionWarning::PictureFormat { index: 2, .. }
		));
	}

	#[test_log::test]
	fn tag_size_and_frame_count() {
		let restrictions = TagRestrictions {
			size: TagSizeRestrictions::S_32F_4K,
			..TagRestrictions::default()
		};

		assert_eq!(check_size(4096, &restrictions), None);
		assert_eq!(
			check_size(4097, &restrictions),
			Some(RestrictionWarning::TagTooLarge {
				size: 4097,
				max: 4096
			})
		);

		let frames = vec![
			Frame::Text(TextInformationFrame::new(
				FrameId::new("TIT2").unwrap(),
				TextEncoding::UTF8,
				"Title",
			));
			33
		];
		assert_eq!(
			check_frames(&frames, &restrictions),
			[RestrictionWarning::TooManyFrames { count: 33, max: 32 }]
		);
	}
}
