/// The preamble of both the APE header and footer
pub(crate) const APE_PREAMBLE: &[u8; 8] = b"APETAGEX";

/// The size of an APE header or footer
pub(crate) const APE_HEADER_SIZE: u32 = 32;

/// The only APE version written
pub(crate) const APE_VERSION: u32 = 2000;

/// Keys that would confuse readers looking for other tags
pub(crate) const INVALID_KEYS: [&str; 4] = ["ID3", "TAG", "OGGS", "MP+"];

// Header/footer flags
pub(crate) const FLAG_READ_ONLY: u32 = 1;
pub(crate) const FLAG_IS_HEADER: u32 = 1 << 29;
pub(crate) const FLAG_HAS_FOOTER: u32 = 1 << 30;
pub(crate) const FLAG_HAS_HEADER: u32 = 1 << 31;
