/// Shared constants so the CLI, config defaults, and tests stay consistent

// Publication root for the gt-scheduler crawler output; term documents live
// at <base>/<term>.json
pub const GT_SCHEDULER_BASE_URL: &str = "https://gt-scheduler.github.io/crawler-v2";

// Destination defaults for the SQLite load
pub const DEFAULT_DB_PATH: &str = "gt_classes.db";
pub const DEFAULT_TABLE: &str = "gt_classes";

// Literal separator used by both the period ("HHMM - HHMM") and date-range
// ("YYYY-MM-DD - YYYY-MM-DD") cache strings
pub const RANGE_SEPARATOR: &str = " - ";

// Default HTTP timeout for catalog fetches
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
