//! Application constants for the METAR/TAF decoder
//!
//! Column names, decoder limits, keyword tables and environment variable
//! names used throughout the crate.

// =============================================================================
// Feed Layout
// =============================================================================

/// Header name of the raw report column in Aviation Weather Center CSV feeds
pub const RAW_TEXT_HEADER: &str = "raw_text";

/// Position of the raw report column in both the METAR and TAF feeds
pub const DEFAULT_RAW_TEXT_COLUMN: usize = 0;

/// Preamble lines that carry no diagnostics
pub const NO_ERRORS_LINE: &str = "No errors";
pub const NO_WARNINGS_LINE: &str = "No warnings";

// =============================================================================
// Decoder Limits
// =============================================================================

/// Reports with more groups than this are rejected as malformed
pub const DEFAULT_MAX_GROUPS: usize = 100;

// =============================================================================
// Keywords
// =============================================================================

pub mod keywords {
    pub const METAR: &str = "METAR";
    pub const SPECI: &str = "SPECI";
    pub const TAF: &str = "TAF";
    pub const AMENDED: &str = "AMD";
    pub const CORRECTED: &str = "COR";
    pub const NIL: &str = "NIL";
    pub const CANCELLED: &str = "CNL";
    pub const AUTO: &str = "AUTO";
    pub const CAVOK: &str = "CAVOK";
    pub const NOSIG: &str = "NOSIG";
    pub const REMARKS: &str = "RMK";
    pub const MAINTENANCE: &str = "$";
}

/// Compass points accepted in direction lists (vicinity, lightning, visibility)
pub const COMPASS_POINTS: &[&str] = &["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable pointing at a config file
pub const CONFIG_ENV_VAR: &str = "METAF_CONFIG";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "metaf-decoder";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";
