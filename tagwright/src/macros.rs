macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(TagError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(TagError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(TagError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::TagError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for return Err(Id3v2ErrorKind::Foo.into())
//
// Usage:
// - id3v2_err!(Variant)
// - id3v2_err!(Variant(Args))
macro_rules! id3v2_err {
	($variant:ident) => {
		return Err(crate::error::TagError::from(
			crate::error::Id3v2ErrorKind::$variant,
		))
	};
	($variant:ident($($args:expr),+)) => {
		return Err(crate::error::TagError::from(
			crate::error::Id3v2ErrorKind::$variant($($args),+),
		))
	};
}

// Shorthand for TagDecodingError::new(TagSystem::Foo, "Message")
//
// Usage:
//
// - decode_err!(Variant, Message)
// - decode_err!(Message)
//
// or bail:
//
// - decode_err!(@BAIL Variant, Message)
// - decode_err!(@BAIL Message)
macro_rules! decode_err {
	($system:ident, $reason:literal) => {
		Into::<crate::error::TagError>::into(crate::error::TagDecodingError::new(
			crate::tag::TagSystem::$system,
			$reason,
		))
	};
	($reason:literal) => {
		Into::<crate::error::TagError>::into(crate::error::TagDecodingError::from_description(
			$reason,
		))
	};
	(@BAIL $($system:ident,)? $reason:literal) => {
		return Err(decode_err!($($system,)? $reason))
	};
}

// Same as `decode_err!`, for the encoding side
macro_rules! encode_err {
	($system:ident, $reason:literal) => {
		Into::<crate::error::TagError>::into(crate::error::TagEncodingError::new(
			crate::tag::TagSystem::$system,
			$reason,
		))
	};
	(@BAIL $system:ident, $reason:literal) => {
		return Err(encode_err!($system, $reason))
	};
}

// A macro for handling the different `ParsingMode`s
//
// NOTE: All fields are optional, if `STRICT` or `RELAXED` are missing, it will
// 		 fall through to `DEFAULT`. If `DEFAULT` is missing, it will fall through
// 		 to an empty block.
//
// Usage:
//
// - parse_mode_choice!(
// 		ident_of_parsing_mode,
// 		STRICT: some_expr,
// 		RELAXED: some_expr,
// 		DEFAULT: some_expr,
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(BESTATTEMPT: $best_attempt_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr,)?
		DEFAULT: $default:expr
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			$(crate::config::ParsingMode::BestAttempt => { $best_attempt_handler },)?
			$(crate::config::ParsingMode::Relaxed => { $relaxed_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(BESTATTEMPT: $best_attempt_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr $(,)?)?
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			$(crate::config::ParsingMode::BestAttempt => { $best_attempt_handler },)?
			$(crate::config::ParsingMode::Relaxed => { $relaxed_handler },)?
			#[allow(unreachable_patterns)]
			_ => {}
		}
	};
}

pub(crate) use {decode_err, encode_err, err, id3v2_err, parse_mode_choice, try_vec};
