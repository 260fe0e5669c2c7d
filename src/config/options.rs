// src/config/options.rs
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::core::sanitize::sanitize_stem;
use crate::engine::{MonthSlot, Strategy};
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Http,
    RenderApi,
    Fixtures,
}

/// Key casing of the JSON/CSV output. Field order never changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldStyle {
    /// `monthName`, `startingDate`, `endingDate`
    #[default]
    Camel,
    /// `month_name`, `starting_date`, `ending_date`
    Snake,
}

impl FieldStyle {
    pub fn headers(&self) -> [&'static str; 3] {
        match self {
            FieldStyle::Camel => ["monthName", "startingDate", "endingDate"],
            FieldStyle::Snake => ["month_name", "starting_date", "ending_date"],
        }
    }
}

/// Inclusive Gregorian year range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self { start: DEFAULT_START_YEAR, end: DEFAULT_END_YEAR }
    }
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start > self.end || self.start < 1 {
            return Err(ConfigError::YearRange { start: self.start, end: self.end });
        }
        Ok(())
    }

    /// Every month of every year, in calendar order.
    pub fn slots(&self) -> impl Iterator<Item = MonthSlot> {
        (self.start..=self.end).flat_map(|y| (1..=12).map(move |m| MonthSlot::new(y, m)))
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub strategy: Strategy,
    pub years: YearRange,
    pub source: SourceKind,
    pub page_url: String,
    pub fixtures_dir: Option<PathBuf>,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
    pub pause: Duration,
    /// Stop collecting at the first fetch failure; what was collected is
    /// still reconciled.
    pub abort_on_fetch_error: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::DirectMarker,
            years: YearRange::default(),
            source: SourceKind::Http,
            page_url: s!(DEFAULT_PAGE_URL),
            fixtures_dir: None,
            credentials: None,
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
            abort_on_fetch_error: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    /// Calendar name used in the file name (`bengali_months_2011-2025.json`).
    pub calendar: String,
    pub field_style: FieldStyle,
    pub csv: bool,
    pub dump_observations: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            calendar: s!(DEFAULT_CALENDAR),
            field_style: FieldStyle::default(),
            csv: false,
            dump_observations: false,
        }
    }
}

impl ExportOptions {
    pub fn file_stem(&self, years: &YearRange) -> String {
        let name = sanitize_stem(&self.calendar, DEFAULT_CALENDAR);
        join!(name, "_months_", &years.to_string())
    }

    pub fn json_path(&self, years: &YearRange) -> PathBuf {
        self.out_dir.join(join!(self.file_stem(years), ".json"))
    }

    pub fn csv_path(&self, years: &YearRange) -> PathBuf {
        self.out_dir.join(join!(self.file_stem(years), ".csv"))
    }

    pub fn observations_path(&self) -> PathBuf {
        self.out_dir.join(OBSERVATIONS_FILE)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

impl RunOptions {
    /// Everything that must hold before the first page is requested.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scrape.years.validate()?;
        match self.scrape.source {
            SourceKind::Http => {}
            SourceKind::RenderApi => {
                let creds = self
                    .scrape
                    .credentials
                    .as_ref()
                    .ok_or(ConfigError::MissingCredential(ENV_RENDER_USER))?;
                if creds.username.is_empty() {
                    return Err(ConfigError::MissingCredential(ENV_RENDER_USER));
                }
                if creds.password.is_empty() {
                    return Err(ConfigError::MissingCredential(ENV_RENDER_PASS));
                }
            }
            SourceKind::Fixtures => {
                let dir = self.scrape.fixtures_dir.as_ref().ok_or(ConfigError::MissingFixtureDir)?;
                if !dir.is_dir() {
                    return Err(ConfigError::FixtureDirNotFound(dir.clone()));
                }
            }
        }
        Ok(())
    }
}
