// src/config/consts.rs

// Net config
pub const DEFAULT_PAGE_URL: &str = "https://www.drikpanchang.com/bengali/bengali-month-panjika.html";
pub const RENDER_API_ENDPOINT: &str = "https://realtime.oxylabs.io/v1/queries";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const FETCH_TIMEOUT_SECS: u64 = 120; // navigation timeout per page
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite

// Credentials (render API)
pub const ENV_RENDER_USER: &str = "OXY_USERNAME";
pub const ENV_RENDER_PASS: &str = "OXY_PASSWORD";

// Scrape
pub const DEFAULT_START_YEAR: i32 = 2011;
pub const DEFAULT_END_YEAR: i32 = 2025;

// Export
pub const DEFAULT_OUT_DIR: &str = "json-data";
pub const DEFAULT_CALENDAR: &str = "bengali";
pub const OBSERVATIONS_FILE: &str = "observations.json";

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
