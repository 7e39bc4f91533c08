/// Lowest value accepted for any 1-10 self-assessment score.
pub const MIN_SCORE: i32 = 1;

/// Highest value accepted for any 1-10 self-assessment score.
pub const MAX_SCORE: i32 = 10;

/// Name of the data directory created under the user's home directory.
pub const DATA_DIR_NAME: &str = ".stonk-risk-management";

/// Data directory used by releases before the store format change. Never read.
pub const LEGACY_DATA_DIR_NAME: &str = ".options-risk-management";

/// Version tag written into export documents.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Current on-disk key layout version.
///
/// Version 2 stores every trade leg under `trade:<id>_<expiration>`.
pub const KEY_LAYOUT_VERSION: u32 = 2;
