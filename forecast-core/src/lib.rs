//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Weather category classification of free-text descriptions
//! - The report model built from the prediction service payload
//! - Display rows shared by every rendering surface
//! - PDF export of a report
//! - Configuration and the prediction service client
//!
//! It is used by `forecast-cli`, but can also back other front ends.

pub mod classify;
pub mod config;
pub mod export;
pub mod model;
pub mod provider;
pub mod report;
pub mod rows;
pub mod state;

pub use classify::{Category, classify};
pub use config::{Config, ViewMode};
pub use export::{DocumentLayout, ExportError, ExportedDocument, export};
pub use model::{ErrorResult, ForecastPayload, Prediction, RawForecast, RawPrediction, Report};
pub use provider::{ForecastProvider, RetrievalError, fetch_view_state};
pub use report::{build, build_at};
pub use rows::{DisplayRow, project};
pub use state::ViewState;
