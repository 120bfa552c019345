use crate::model::{ErrorResult, Report};

/// Outcome of the most recent forecast request. Exactly one arm is active, so a
/// report and an error can never be shown together.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Failed(ErrorResult),
    Ready(Report),
}

impl ViewState {
    /// Start a new request, dropping whatever the previous one produced.
    pub fn begin_fetch(&mut self) {
        *self = ViewState::Loading;
    }

    pub fn finish<E: std::fmt::Display>(&mut self, result: Result<Report, E>) {
        *self = match result {
            Ok(report) => ViewState::Ready(report),
            Err(e) => ViewState::Failed(ErrorResult::new(e.to_string())),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            ViewState::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorResult> {
        match self {
            ViewState::Failed(error) => Some(error),
            _ => None,
        }
    }
}
