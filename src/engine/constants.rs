/// Application version reported by `stats`.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of the placeholder name given to new foods ("Food 3").
pub const FOOD_NAME_PREFIX: &str = "Food";

/// Warning sent to the notifier when a calculation is refused.
pub const CIRCULAR_REFERENCE_WARNING: &str = "Cannot calculate: circular or invalid reference";

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "portion_ledger.json";

// ─────────────────────────────────────────────────────────────────────────────
// Swipe-to-undo gesture
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum leftward travel in pixels for a swipe to count as undo.
pub const SWIPE_THRESHOLD_PX: f64 = 80.0;

/// A swipe must finish within this many milliseconds.
pub const SWIPE_TIME_LIMIT_MS: u64 = 500;

/// Similarity needed before a name is offered as a fuzzy match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Presets installed by `dish defaults`: (name, grams).
pub const DEFAULT_DISHES: [(&str, f64); 6] = [
    ("Rice bowl", 120.0),
    ("Small plate", 80.0),
    ("Medium plate", 150.0),
    ("Large plate", 250.0),
    ("Cup", 90.0),
    ("Bowl", 180.0),
];
