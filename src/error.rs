// src/error.rs
//! Error types, one enum per layer.
//!
//! Only [`ConfigError`] stops a run. Fetch and extraction errors are caught per
//! month by the collection loop; incomplete pairs never become errors at all
//! (see `engine::report`).
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Navigation, timeout or transport failure for one page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}: {body}")]
    Status { status: u16, url: String, body: String },

    #[error("no page content returned for {0}")]
    EmptyBody(String),

    #[error("no fixture page at {}", .0.display())]
    MissingFixture(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The page loaded but did not expose what we read from it.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("expected page structure `{0}` not found")]
    StructureMissing(&'static str),

    #[error("non-numeric day field `{0}`")]
    BadDayField(String),

    #[error("day {day} is not a date in {year}-{month:02}")]
    BadDate { year: i32, month: u32, day: u32 },

    #[error("invalid selector `{0}`")]
    Selector(&'static str),
}

/// Problems that abort the run before any page is fetched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required credential `{0}`")]
    MissingCredential(&'static str),

    #[error("invalid year range {start}-{end}")]
    YearRange { start: i32, end: i32 },

    #[error("the fixtures source needs a fixtures directory")]
    MissingFixtureDir,

    #[error("fixtures directory {} does not exist", .0.display())]
    FixtureDirNotFound(PathBuf),

    #[error("could not read config {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("could not parse config {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("could not build HTTP client: {0}")]
    Client(reqwest::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("{0}")]
    Format(String),
}
