// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, WrapErr};

use crate::config::{consts::*, file as config_file, Credentials, FieldStyle, RunOptions, SourceKind};
use crate::engine::Strategy;
use crate::progress::LogProgress;

#[derive(Parser, Debug)]
#[command(name = "panjika_scrape", version)]
#[command(about = "Scrape lunar month boundaries from month panjika pages")]
pub struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Also append log lines to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Visit every month in the year range and write the reconciled list
    Scrape(ScrapeArgs),
    /// Convert a written JSON list to CSV
    Convert(ConvertArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Month-grid pages with direct start/end markers
    Direct,
    /// Calendar pages with new-moon event icons
    Event,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Http,
    RenderApi,
    Fixtures,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    Camel,
    Snake,
}

impl From<StrategyArg> for Strategy {
    fn from(v: StrategyArg) -> Self {
        match v {
            StrategyArg::Direct => Strategy::DirectMarker,
            StrategyArg::Event => Strategy::EventDerived,
        }
    }
}

impl From<SourceArg> for SourceKind {
    fn from(v: SourceArg) -> Self {
        match v {
            SourceArg::Http => SourceKind::Http,
            SourceArg::RenderApi => SourceKind::RenderApi,
            SourceArg::Fixtures => SourceKind::Fixtures,
        }
    }
}

impl From<StyleArg> for FieldStyle {
    fn from(v: StyleArg) -> Self {
        match v {
            StyleArg::Camel => FieldStyle::Camel,
            StyleArg::Snake => FieldStyle::Snake,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ScrapeArgs {
    /// TOML file with defaults; flags given here override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    #[arg(long)]
    pub start_year: Option<i32>,

    #[arg(long)]
    pub end_year: Option<i32>,

    #[arg(long, value_enum)]
    pub source: Option<SourceArg>,

    /// Month panjika page to navigate
    #[arg(long, value_name = "URL")]
    pub page_url: Option<String>,

    /// Directory of saved `YYYY-MM.html` pages (fixtures source)
    #[arg(long, value_name = "DIR")]
    pub fixtures: Option<PathBuf>,

    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Calendar name used in the output file name
    #[arg(long)]
    pub calendar: Option<String>,

    #[arg(long, value_enum)]
    pub field_style: Option<StyleArg>,

    /// Also write a CSV next to the JSON
    #[arg(long)]
    pub csv: bool,

    /// Also write the raw observations
    #[arg(long)]
    pub dump_observations: bool,

    /// Stop at the first page that cannot be fetched
    #[arg(long)]
    pub abort_on_fetch_error: bool,

    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Render API user
    #[arg(long, env = ENV_RENDER_USER, hide_env_values = true)]
    pub username: Option<String>,

    /// Render API password
    #[arg(long, env = ENV_RENDER_PASS, hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// JSON list written by `scrape`
    pub input: PathBuf,

    /// Output CSV (default: input name in the working directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ScrapeArgs {
    /// Defaults, then the config file, then these flags.
    pub fn to_options(&self) -> color_eyre::Result<RunOptions> {
        let mut opts = RunOptions::default();

        if let Some(path) = &self.config {
            config_file::load(path)?.apply(&mut opts);
        }

        let scrape = &mut opts.scrape;
        if let Some(v) = self.strategy { scrape.strategy = v.into(); }
        if let Some(v) = self.start_year { scrape.years.start = v; }
        if let Some(v) = self.end_year { scrape.years.end = v; }
        if let Some(v) = self.source { scrape.source = v.into(); }
        if let Some(v) = &self.page_url { scrape.page_url = v.clone(); }
        if let Some(v) = &self.fixtures {
            scrape.fixtures_dir = Some(v.clone());
            if self.source.is_none() { scrape.source = SourceKind::Fixtures; }
        }
        if let Some(v) = self.timeout_secs { scrape.timeout = Duration::from_secs(v); }
        if self.abort_on_fetch_error { scrape.abort_on_fetch_error = true; }
        if self.username.is_some() || self.password.is_some() {
            scrape.credentials = Some(Credentials {
                username: self.username.clone().unwrap_or_default(),
                password: self.password.clone().unwrap_or_default(),
            });
        }

        let export = &mut opts.export;
        if let Some(v) = &self.out_dir { export.out_dir = v.clone(); }
        if let Some(v) = &self.calendar { export.calendar = v.clone(); }
        if let Some(v) = self.field_style { export.field_style = v.into(); }
        if self.csv { export.csv = true; }
        if self.dump_observations { export.dump_observations = true; }

        Ok(opts)
    }
}

pub fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    crate::log::init(&cli.log_level, cli.log_file.as_deref())?;

    match cli.command {
        Command::Scrape(args) => {
            let opts = args.to_options()?;
            let mut progress = LogProgress::default();
            let summary = crate::runner::run(&opts, Some(&mut progress))
                .wrap_err("scrape run failed")?;
            for path in &summary.files_written {
                println!("{}", path.display());
            }
            if summary.aborted {
                bail!("stopped at the first fetch failure; partial results written");
            }
        }
        Command::Convert(args) => {
            let path = crate::file::convert_json_to_csv(&args.input, args.output.as_deref())
                .wrap_err_with(|| format!("could not convert {}", args.input.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
