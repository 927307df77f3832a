// =============================================================================
// Reader Defaults
// =============================================================================

/// Default lookback window in minutes (24 hours)
pub const DEFAULT_MAX_LOOKBACK_MINUTES: u64 = 24 * 60;

/// Default maximum number of rows requested per logstore search
pub const DEFAULT_MAX_LINES: u32 = 100;
