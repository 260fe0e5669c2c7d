// src/config/file.rs
//! Optional TOML config. Every key is optional; what is set overrides the
//! defaults, and command-line flags override the file.
//!
//! ```toml
//! strategy = "event-derived"
//! start_year = 2020
//! end_year = 2025
//! source = "render-api"
//! out_dir = "json-data"
//! calendar = "gujarati"
//! field_style = "snake"
//! ```
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::options::{FieldStyle, RunOptions, SourceKind};
use crate::engine::Strategy;
use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub strategy: Option<Strategy>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub source: Option<SourceKind>,
    pub page_url: Option<String>,
    pub fixtures_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub pause_ms: Option<u64>,
    pub abort_on_fetch_error: Option<bool>,
    pub out_dir: Option<PathBuf>,
    pub calendar: Option<String>,
    pub field_style: Option<FieldStyle>,
    pub csv: Option<bool>,
    pub dump_observations: Option<bool>,
}

pub fn load(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    parse(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

pub fn parse(text: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(text)
}

impl ConfigFile {
    pub fn apply(self, opts: &mut RunOptions) {
        let scrape = &mut opts.scrape;
        if let Some(v) = self.strategy { scrape.strategy = v; }
        if let Some(v) = self.start_year { scrape.years.start = v; }
        if let Some(v) = self.end_year { scrape.years.end = v; }
        if let Some(v) = self.source { scrape.source = v; }
        if let Some(v) = self.page_url { scrape.page_url = v; }
        if let Some(v) = self.fixtures_dir { scrape.fixtures_dir = Some(v); }
        if let Some(v) = self.timeout_secs { scrape.timeout = Duration::from_secs(v); }
        if let Some(v) = self.pause_ms { scrape.pause = Duration::from_millis(v); }
        if let Some(v) = self.abort_on_fetch_error { scrape.abort_on_fetch_error = v; }

        let export = &mut opts.export;
        if let Some(v) = self.out_dir { export.out_dir = v; }
        if let Some(v) = self.calendar { export.calendar = v; }
        if let Some(v) = self.field_style { export.field_style = v; }
        if let Some(v) = self.csv { export.csv = v; }
        if let Some(v) = self.dump_observations { export.dump_observations = v; }
    }
}
