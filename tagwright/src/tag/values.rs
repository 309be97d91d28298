//! Helpers for multi-valued and numeric field values
//!
//! Multi-valued fields are stored as one string, with the values joined by the
//! [internal separator](crate::config::GlobalOptions::internal_separator). Values coming from
//! user-facing tools may use the
//! [display separator](crate::config::GlobalOptions::display_separator) instead, both are
//! accepted everywhere a value is split.

use crate::config::global_options;

/// The separator between a number and its total, as in `3/12`
pub(crate) const NUMBER_PAIR_SEPARATOR: char = '/';

/// Split a multi-valued string on both the display and internal separators
///
/// Empty values are dropped, so `AA;;BB` and `AA;BB` both hold two values. Every writer splits
/// through this function, which means a value is normalized this way once it reaches a file.
/// Use [`display_to_internal`] to convert a value without dropping anything.
///
/// # Examples
///
/// ```rust
/// use tagwright::tag::split_values;
///
/// assert_eq!(split_values("AA;BB\u{02F5}CC"), vec!["AA", "BB", "CC"]);
/// assert_eq!(split_values("AA;;BB;"), vec!["AA", "BB"]);
/// assert_eq!(split_values("AA"), vec!["AA"]);
/// ```
pub fn split_values(value: &str) -> Vec<&str> {
	let options = global_options();
	let display = options.get_display_separator();
	let internal = options.get_internal_separator();

	value
		.split(|c| c == display || c == internal)
		.filter(|v| !v.is_empty())
		.collect()
}

/// Join values with the internal separator
pub fn join_values<I, S>(values: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let internal = global_options().get_internal_separator();

	let mut joined = String::new();
	for (index, value) in values.into_iter().enumerate() {
		if index > 0 {
			joined.push(internal);
		}

		joined.push_str(value.as_ref());
	}

	joined
}

/// Replace every display separator with the internal separator
///
/// This is lossless and keeps the order of the values, see [`internal_to_display`] for the
/// opposite direction.
pub fn display_to_internal(value: &str) -> String {
	let options = global_options();
	value.replace(
		options.get_display_separator(),
		&options.get_internal_separator().to_string(),
	)
}

/// Replace every internal separator with the display separator
pub fn internal_to_display(value: &str) -> String {
	let options = global_options();
	value.replace(
		options.get_internal_separator(),
		&options.get_display_separator().to_string(),
	)
}

/// Parse a track or disc number
///
/// Anything that isn't a number in the range of a `u16` becomes `0`.
pub fn parse_number(value: &str) -> u16 {
	value.trim().parse::<u16>().unwrap_or(0)
}

/// Split a `number/total` pair, such as the ID3v2 `TRCK` value `3/12`
///
/// # Examples
///
/// ```rust
/// use tagwright::tag::split_number_pair;
///
/// assert_eq!(split_number_pair("3/12"), (3, Some(12)));
/// assert_eq!(split_number_pair("7"), (7, None));
/// assert_eq!(split_number_pair("A/B"), (0, Some(0)));
/// ```
pub fn split_number_pair(value: &str) -> (u16, Option<u16>) {
	match value.split_once(NUMBER_PAIR_SEPARATOR) {
		Some((number, total)) => (parse_number(number), Some(parse_number(total))),
		None => (parse_number(value), None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn display_and_internal_separators_convert_losslessly() {
		let display = "AA;BB;CC";
		let internal = display_to_internal(display);

		assert_eq!(internal, "AA\u{02F5}BB\u{02F5}CC");
		assert_eq!(internal_to_display(&internal), display);
		assert_eq!(join_values(split_values(display)), internal);
	}

	#[test_log::test]
	fn empty_values_only_disappear_when_split() {
		let display = "AA;;BB";
		let internal = display_to_internal(display);

		assert_eq!(internal, "AA\u{02F5}\u{02F5}BB");
		assert_eq!(internal_to_display(&internal), display);

		assert_eq!(split_values(&internal), ["AA", "BB"]);
		assert_eq!(join_values(split_values(display)), "AA\u{02F5}BB");
	}

	#[test_log::test]
	fn oversized_numbers_become_zero() {
		assert_eq!(parse_number("65535"), 65535);
		assert_eq!(parse_number("65536"), 0);
		assert_eq!(parse_number("-1"), 0);
		assert_eq!(split_number_pair(" 4 / 70000"), (4, Some(0)));
	}
}
