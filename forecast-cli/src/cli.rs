use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, ForecastPayload, Report, RetrievalError, ViewMode, ViewState, export, fetch_view_state,
    project, provider::provider_from_config,
};
use inquire::{Select, Text};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::views::{render_cards, render_heading, render_table};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Multi-day weather forecast reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the prediction service and output preferences.
    Configure,

    /// Show the forecast for a city.
    Show {
        /// City name, e.g. "Berlin".
        #[arg(required_unless_present = "input")]
        city: Option<String>,

        /// "table" or "cards"; defaults to the configured view.
        #[arg(long)]
        view: Option<String>,

        /// Read a saved service response instead of calling the service.
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Export the forecast for a city as a PDF report.
    Export {
        /// City name, e.g. "Berlin".
        #[arg(required_unless_present = "input")]
        city: Option<String>,

        /// Read a saved service response instead of calling the service.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output directory; defaults to the configured export directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        self.command.execute(config).await
    }
}

impl Command {
    pub async fn execute(self, config: Config) -> anyhow::Result<()> {
        match self {
            Command::Configure => configure(config)?,
            Command::Show { city, view, input } => {
                let view = match view {
                    Some(v) => ViewMode::try_from(v.as_str())?,
                    None => config.default_view()?,
                };
                let report = load_report(&config, city.as_deref(), input).await?;
                let rows = project(&report);

                println!("{}", render_heading(&report));
                match view {
                    ViewMode::Table => print!("{}", render_table(&rows)),
                    ViewMode::Cards => print!("{}", render_cards(&rows)),
                }
            }
            Command::Export { city, input, out } => {
                let report = load_report(&config, city.as_deref(), input).await?;
                let document = export(&report)?;

                let dir = out.unwrap_or_else(|| config.export_dir());
                let path = export_path(&dir, &document.filename)?;
                fs::create_dir_all(&dir).with_context(|| {
                    format!("Failed to create export directory: {}", dir.display())
                })?;

                fs::write(&path, &document.bytes)
                    .with_context(|| format!("Failed to write report: {}", path.display()))?;

                println!("Saved report to {}", path.display());
            }
        }

        Ok(())
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let url = Text::new("Prediction service URL:")
        .with_default(&config.service_url())
        .prompt()?;

    let current = config.default_view()?;
    let views = ViewMode::all().to_vec();
    let cursor = views.iter().position(|v| *v == current).unwrap_or(0);
    let view = Select::new("Default view:", views).with_starting_cursor(cursor).prompt()?;

    let export_dir = Text::new("Export directory:")
        .with_default(&config.export_dir().display().to_string())
        .prompt()?;

    config.service_url = Some(url.trim().to_string());
    config.set_default_view(view);
    config.export_dir = Some(PathBuf::from(export_dir.trim()));

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

/// Location of an exported report inside `dir`. The filename carries the city
/// verbatim, so anything that would resolve outside `dir` is refused.
fn export_path(dir: &Path, filename: &str) -> anyhow::Result<PathBuf> {
    let single_component = !filename.contains(['/', '\\'])
        && Path::new(filename).file_name() == Some(OsStr::new(filename));

    if !single_component {
        return Err(anyhow!(
            "Cannot save report as '{filename}': the city name contains a path separator."
        ));
    }

    Ok(dir.join(filename))
}

/// Fetch (or read) a forecast and turn it into a report, or the error to show
/// instead of one.
async fn load_report(
    config: &Config,
    city: Option<&str>,
    input: Option<PathBuf>,
) -> anyhow::Result<Report> {
    let state = match input {
        Some(path) => state_from_file(&path)?,
        None => {
            let city = city.ok_or_else(|| anyhow!("A city name is required."))?;
            let provider = provider_from_config(config)?;
            fetch_view_state(provider.as_ref(), city).await
        }
    };

    match state {
        ViewState::Ready(report) => Ok(report),
        ViewState::Failed(error) => Err(anyhow!(error.message)),
        ViewState::Idle | ViewState::Loading => Err(anyhow!("No forecast was loaded.")),
    }
}

fn state_from_file(path: &Path) -> anyhow::Result<ViewState> {
    debug!(path = %path.display(), "Reading saved forecast");

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read forecast file: {}", path.display()))?;

    let mut state = ViewState::default();
    state.begin_fetch();

    let result = serde_json::from_str::<ForecastPayload>(&contents)
        .map_err(|e| RetrievalError::Parse(e.to_string()))
        .and_then(|payload| match payload {
            ForecastPayload::Forecast(raw) => Ok(Report::from_raw(&raw)),
            ForecastPayload::Error { error } => Err(RetrievalError::Service(error)),
        });
    state.finish(result);

    Ok(state)
}
