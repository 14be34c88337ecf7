//! Error types. Absence of a key is never an error; only structurally
//! invalid requests are.

/// Errors reported by `ChainedHashTable` operations. A failing call leaves
/// the table untouched.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("invalid capacity {requested}: a table needs at least one bucket")]
    InvalidCapacity { requested: usize },
}

/// Errors reported when validating or running an `ExperimentConfig`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("elements per trial must be non-zero")]
    NoElements,
    #[error("trials per capacity must be non-zero")]
    NoTrials,
    #[error("capacity step must be non-zero")]
    ZeroStep,
    #[error("starting capacity must be non-zero")]
    ZeroCapacity,
    #[error("capacity range {start}..={end} is empty")]
    EmptyCapacityRange { start: usize, end: usize },
    #[error("key range {low}..={high} is empty")]
    EmptyKeyRange { low: u32, high: u32 },
    #[error("stop threshold {0} is not a probability")]
    InvalidThreshold(f64),
    #[error(transparent)]
    Table(#[from] TableError),
}
