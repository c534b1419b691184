use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a plotting run.
///
/// None of these are recoverable: a chart built from partially parsed or
/// partially validated data is worse than no chart at all.
#[derive(Error, Debug)]
pub enum PlotError {
    /// A record names a distribution that is not in the catalog.
    #[error("{}:{line}: unknown distribution '{key}'", .path.display())]
    UnknownDistribution {
        key: String,
        path: PathBuf,
        line: usize,
    },

    /// A record is not `size, distribution, algorithm, measurement...`.
    #[error("{}:{line}: malformed record: {reason}", .path.display())]
    MalformedRecord {
        reason: String,
        path: PathBuf,
        line: usize,
    },

    /// One of the canonical distributions has no data for a size.
    #[error("no data for distribution '{distribution}' at size {size}")]
    MissingDistribution {
        size: u64,
        distribution: &'static str,
    },

    /// An algorithm found in the data has no place in the canonical order.
    #[error("algorithm '{algorithm}' is not in the known algorithm order")]
    UnknownAlgorithm { algorithm: String },

    /// A distribution lacks an algorithm that the Shuffled distribution has.
    #[error("no data for algorithm '{algorithm}' under '{distribution}' at size {size}")]
    MissingAlgorithm {
        size: u64,
        distribution: &'static str,
        algorithm: String,
    },

    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PlotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Io {
            path: path.into(),
            source,
        }
    }
}
