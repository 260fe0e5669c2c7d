// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::{RunOptions, ScrapeOptions, SourceKind},
    core::{
        net::{FixtureSource, HttpSource, RenderApiSource},
        PageSource,
    },
    engine::{reconcile, rule_for, Diagnostic, MonthSlot},
    error::{ConfigError, Result},
    file,
    progress::{NullProgress, Progress},
    scrape,
};

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub attempted: usize,
    pub observations: usize,
    pub ranges: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<(MonthSlot, String)>,
    pub aborted: bool,
    pub files_written: Vec<PathBuf>,
}

impl RunSummary {
    /// Diagnostics that dropped a pair, as opposed to warnings.
    pub fn skipped_pairs(&self) -> usize {
        self.diagnostics.iter().filter(|d| !d.is_warning()).count()
    }
}

/// Build the page source the options ask for.
pub fn open_source(opts: &ScrapeOptions) -> std::result::Result<Box<dyn PageSource>, ConfigError> {
    let source: Box<dyn PageSource> = match opts.source {
        SourceKind::Http => Box::new(HttpSource::new(opts.timeout)?),
        SourceKind::RenderApi => {
            let creds = opts
                .credentials
                .as_ref()
                .ok_or(ConfigError::MissingCredential(crate::config::consts::ENV_RENDER_USER))?;
            Box::new(RenderApiSource::new(opts.timeout, &creds.username, &creds.password)?)
        }
        SourceKind::Fixtures => {
            let dir = opts.fixtures_dir.clone().ok_or(ConfigError::MissingFixtureDir)?;
            Box::new(FixtureSource::new(dir))
        }
    };
    logd!("Page source: {}", source.label());
    Ok(source)
}

/// Validate, open the configured source, then collect, reconcile and write.
pub fn run(opts: &RunOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    opts.validate()?;
    let source = open_source(&opts.scrape)?;
    run_with_source(opts, source.as_ref(), progress)
}

/// Same as [`run`] with the page source supplied by the caller. Options are
/// not validated here.
pub fn run_with_source(
    opts: &RunOptions,
    source: &dyn PageSource,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let mut quiet = NullProgress;
    let sink: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut quiet,
    };
    let collection = scrape::collect(&opts.scrape, source, sink);
    let export = &opts.export;
    let years = &opts.scrape.years;

    let mut summary = RunSummary {
        attempted: collection.attempted,
        observations: collection.observations.len(),
        aborted: collection.aborted,
        ..Default::default()
    };

    if export.dump_observations {
        let path = export.observations_path();
        file::write_observations(&path, &collection.observations)?;
        logd!("Observations written to {}", path.display());
        summary.files_written.push(path);
    }

    let result = reconcile(collection.observations, rule_for(opts.scrape.strategy));
    summary.ranges = result.ranges.len();
    summary.diagnostics = result.diagnostics;
    summary.failures = collection.failures;

    // Written even when empty, so a run always leaves a result behind.
    let json = export.json_path(years);
    file::write_ranges_json(&json, &result.ranges, export.field_style)?;
    logf!("Data saved to {}", json.display());
    summary.files_written.push(json);

    if export.csv {
        let csv = export.csv_path(years);
        file::write_ranges_csv(&csv, &result.ranges, export.field_style)?;
        logf!("CSV saved to {}", csv.display());
        summary.files_written.push(csv);
    }

    logf!(
        "{} month(s) visited, {} failed, {} observation(s), {} range(s), {} pair(s) skipped",
        summary.attempted,
        summary.failures.len(),
        summary.observations,
        summary.ranges,
        summary.skipped_pairs()
    );
    Ok(summary)
}
