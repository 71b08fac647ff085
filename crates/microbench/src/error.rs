use thiserror::Error;

/// Errors raised by the statistics engine.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StatsError {
    /// An empty sample set was passed where at least one sample is required.
    #[error("sample set is empty")]
    InvalidInput,

    /// A percentile outside `[0, 100]` was requested.
    #[error("percentile {0} is outside [0, 100]")]
    InvalidArgument(f64),
}
