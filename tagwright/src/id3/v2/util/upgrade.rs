//! Frame ID remapping between ID3v2 versions
//!
//! Frames are kept under their ID3v2.4 IDs after a read. The tables are built once, on first use.

use std::collections::HashMap;
use std::sync::OnceLock;

macro_rules! gen_upgrades {
	($($version:ident ($name:literal) => [$($old:literal => $new:literal),+ $(,)?]);+ $(;)?) => {
		paste::paste! {
			$(
				fn [<$version:lower _keys>]() -> &'static HashMap<&'static str, &'static str> {
					static INSTANCE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
					INSTANCE.get_or_init(|| HashMap::from([$(($old, $new)),+]))
				}

				#[doc = "Upgrade an " $name " frame ID to its ID3v2.4 equivalent"]
				pub fn [<upgrade_ $version:lower>](key: &str) -> Option<&'static str> {
					[<$version:lower _keys>]().get(key).copied()
				}
			)+
		}
	};
}

gen_upgrades! {
	V2 ("ID3v2.2") => [
		"BUF" => "RBUF", "CNT" => "PCNT", "COM" => "COMM", "CRA" => "AENC",
		"ETC" => "ETCO", "GEO" => "GEOB", "IPL" => "TIPL", "MCI" => "MCDI",
		"MLL" => "MLLT", "PIC" => "APIC", "POP" => "POPM", "REV" => "RVRB",
		"SLT" => "SYLT", "STC" => "SYTC", "TAL" => "TALB", "TBP" => "TBPM",
		"TCM" => "TCOM", "TCO" => "TCON", "TCP" => "TCMP", "TCR" => "TCOP",
		"TDY" => "TDLY", "TEN" => "TENC", "TFT" => "TFLT", "TKE" => "TKEY",
		"TLA" => "TLAN", "TLE" => "TLEN", "TMT" => "TMED", "TOA" => "TOPE",
		"TOF" => "TOFN", "TOL" => "TOLY", "TOR" => "TDOR", "TOT" => "TOAL",
		"TP1" => "TPE1", "TP2" => "TPE2", "TP3" => "TPE3", "TP4" => "TPE4",
		"TPA" => "TPOS", "TPB" => "TPUB", "TRC" => "TSRC", "TRD" => "TDRC",
		"TRK" => "TRCK", "TS2" => "TSO2", "TSA" => "TSOA", "TSC" => "TSOC",
		"TSP" => "TSOP", "TSS" => "TSSE", "TST" => "TSOT", "TT1" => "TIT1",
		"TT2" => "TIT2", "TT3" => "TIT3", "TXT" => "TEXT", "TXX" => "TXXX",
		"TYE" => "TDRC", "UFI" => "UFID", "ULT" => "USLT", "WAF" => "WOAF",
		"WAR" => "WOAR", "WAS" => "WOAS", "WCM" => "WCOM", "WCP" => "WCOP",
		"WPB" => "WPUB", "WXX" => "WXXX",
		// iTunes podcast and movement frames
		"PCS" => "PCST", "TCT" => "TCAT", "TDS" => "TDES", "TID" => "TGID",
		"WFD" => "WFED", "MVI" => "MVIN", "MVN" => "MVNM", "GP1" => "GRP1",
		"TDR" => "TDRL",
	];
	V3 ("ID3v2.3") => [
		"TORY" => "TDOR",
		"TYER" => "TDRC",
		"IPLS" => "TIPL",
	];
}

/// Frames that only exist in ID3v2.4, dropped when writing ID3v2.3
pub(crate) const V4_ONLY_FRAMES: &[&str] = &[
	"ASPI", "EQU2", "RVA2", "SEEK", "SIGN", "TDEN", "TDRL", "TDTG", "TMOO", "TPRO", "TSOA",
	"TSOP", "TSOT", "TSST",
];

/// Get the ID3v2.3 frame ID for an ID3v2.4 frame ID
///
/// `TDRC` has no direct equivalent, and is split up by the writer.
pub(crate) fn downgrade_v4(key: &str) -> Option<&'static str> {
	match key {
		"TDOR" => Some("TORY"),
		"TIPL" | "TMCL" => Some("IPLS"),
		_ => None,
	}
}

/// Normalize a frame ID of any version to ID3v2.4
///
/// IDs with no mapping are returned as-is.
///
/// # Examples
///
/// ```rust
/// use tagwright::id3::v2::util::upgrade::normalize_frame_id;
///
/// assert_eq!(normalize_frame_id("TT2"), "TIT2");
/// assert_eq!(normalize_frame_id("TYER"), "TDRC");
/// assert_eq!(normalize_frame_id("TIT2"), "TIT2");
/// ```
pub fn normalize_frame_id(key: &str) -> &str {
	match key.len() {
		3 => upgrade_v2(key).unwrap_or(key),
		_ => upgrade_v3(key).unwrap_or(key),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn v2_ids_upgrade() {
		assert_eq!(upgrade_v2("TT2"), Some("TIT2"));
		assert_eq!(upgrade_v2("PIC"), Some("APIC"));
		assert_eq!(upgrade_v2("TIT2"), None);
		assert_eq!(upgrade_v3("IPLS"), Some("TIPL"));
	}

	#[test_log::test]
	fn downgrade_is_the_reverse_of_upgrade() {
		for v3 in ["TORY", "IPLS"] {
			let v4 = upgrade_v3(v3).unwrap();
			assert_eq!(downgrade_v4(v4), Some(v3));
		}
	}
}
