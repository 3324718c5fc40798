use thiserror::Error;

/// Everything the library can fail with.
///
/// An empty query result is never an error: queries return empty tables
/// (or `None` for the per-country heatmap) instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A selection value that cannot name an edition, e.g. year `"20x4"`.
    #[error("invalid selection for {field}: {value:?}")]
    InvalidSelection { field: &'static str, value: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A cell that is present but not parseable as its column's type.
    #[error("line {line}: cannot parse {column} from {value:?}")]
    Parse {
        column: &'static str,
        value: String,
        line: u64,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow2::error::Error),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_selection(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSelection {
            field,
            value: value.into(),
        }
    }
}
