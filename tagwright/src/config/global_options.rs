use std::cell::Cell;

thread_local! {
	static GLOBAL_OPTIONS: Cell<GlobalOptions> = const { Cell::new(GlobalOptions::new()) };
}

/// A snapshot of the options for the current thread
///
/// Every operation takes one snapshot up front, so changes made while it runs are not observed.
pub(crate) fn global_options() -> GlobalOptions {
	GLOBAL_OPTIONS.with(Cell::get)
}

/// Process defaults shared by every read and write on the current thread
///
/// # Examples
///
/// ```rust
/// use tagwright::config::{GlobalOptions, apply_global_options};
///
/// // Tools that show values joined with " / "
/// let global_options = GlobalOptions::new().display_separator('/');
/// apply_global_options(global_options);
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
#[non_exhaustive]
pub struct GlobalOptions {
	pub(crate) allocation_limit: usize,
	pub(crate) display_separator: char,
	pub(crate) internal_separator: char,
}

impl GlobalOptions {
	/// Default allocation limit for any single tag item
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Default separator used by user-facing tools to join multiple values
	pub const DEFAULT_DISPLAY_SEPARATOR: char = ';';

	/// Default separator that multiple values are joined with after a read
	pub const DEFAULT_INTERNAL_SEPARATOR: char = '\u{02F5}';

	/// Creates a new `GlobalOptions`, alias for `Default` implementation
	///
	/// See also: [`GlobalOptions::default`]
	#[must_use]
	pub const fn new() -> Self {
		Self {
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
			display_separator: Self::DEFAULT_DISPLAY_SEPARATOR,
			internal_separator: Self::DEFAULT_INTERNAL_SEPARATOR,
		}
	}

	/// The maximum number of bytes to allocate for any single tag item
	///
	/// If a tag item exceeds this limit, the allocator will return
	/// [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData).
	///
	/// # Examples
	///
	/// ```rust
	/// use tagwright::config::{GlobalOptions, apply_global_options};
	///
	/// // I have files with gigantic images, I'll double the allocation limit!
	/// let global_options = GlobalOptions::new().allocation_limit(32 * 1024 * 1024);
	/// apply_global_options(global_options);
	/// ```
	pub fn allocation_limit(&mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		*self
	}

	/// The separator user-facing tools use to type multiple values into one string
	///
	/// When writing, values are split on this separator (and on the internal one).
	pub fn display_separator(&mut self, display_separator: char) -> Self {
		self.display_separator = display_separator;
		*self
	}

	/// The separator multiple values are joined with when a tag is read
	pub fn internal_separator(&mut self, internal_separator: char) -> Self {
		self.internal_separator = internal_separator;
		*self
	}

	/// The current display separator
	pub fn get_display_separator(&self) -> char {
		self.display_separator
	}

	/// The current internal separator
	pub fn get_internal_separator(&self) -> char {
		self.internal_separator
	}
}

impl Default for GlobalOptions {
	/// The default implementation for `GlobalOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// GlobalOptions {
	/// 	allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
	/// 	display_separator: ';',
	/// 	internal_separator: '\u{02F5}',
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

/// Applies the given `GlobalOptions` to the current thread
///
/// # Examples
///
/// ```rust
/// use tagwright::config::{GlobalOptions, apply_global_options};
///
/// let global_options = GlobalOptions::new().internal_separator('\0');
/// apply_global_options(global_options);
/// ```
pub fn apply_global_options(options: GlobalOptions) {
	GLOBAL_OPTIONS.with(|global_options| global_options.set(options));
}
