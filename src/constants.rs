// src/constants.rs

// --- Spaced Repetition Ladder ---
// Review delay in hours, indexed by SRS level (clamped to the last entry).
pub const SRS_INTERVAL_HOURS: [i64; 8] = [
    4,          // 4 hours
    8,          // 8 hours
    24,         // 1 day
    3 * 24,     // 3 days
    7 * 24,     // 1 week
    2 * 7 * 24, // 2 weeks
    4 * 7 * 24, // 4 weeks
    16 * 7 * 24, // 16 weeks
];

// --- Storage Keys ---
pub const KEY_PERFORMANCE_DATA: &str = "performanceData";
pub const KEY_CURRENT_STREAK: &str = "currentStreak";
pub const KEY_LAST_PRACTICE_DATE: &str = "lastPracticeDate";
pub const KEY_FAVORITES: &str = "favorites";
pub const KEY_UNLOCKED_ACHIEVEMENTS: &str = "unlocked_achievements";
pub const KEY_DAILY_COMPLETED_DATE: &str = "problemOfTheDayCompletedDate";

// --- Catalog / Selection ---
pub const ALL_TOPICS: &str = "All";
pub const UNKNOWN_CATEGORY: &str = "Unknown";
pub const NEEDS_PRACTICE_ACCURACY: f64 = 60.0; // Percent
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// --- Achievements ---
pub const FIRST_CORRECT_THRESHOLD: u32 = 1;
pub const CORRECT_10_THRESHOLD: u32 = 10;
pub const STREAK_SHORT_THRESHOLD: u32 = 3;
pub const STREAK_LONG_THRESHOLD: u32 = 7;
pub const TOPIC_MASTER_PREFIX: &str = "TOPIC_MASTER_";

// --- Runtime ---
pub const DB_FILE_NAME: &str = "neetcode_swipe.db";
pub const APP_DIR_NAME: &str = "neetcode-swipe";
pub const TRACKER_CHANNEL_CAPACITY: usize = 32;
