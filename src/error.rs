use thiserror::Error;

/// The engine's single failure mode. Everything below the orchestrator
/// resolves degenerate input to a fallback value instead of failing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InsightError {
    /// No mood samples fell inside the requested date range. Callers should
    /// prompt the user to log more data rather than render an empty report.
    #[error("no mood samples in the requested date range")]
    NoData,
}
