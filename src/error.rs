use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A required column is absent from an input table.
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    /// A date that is not ISO `YYYY-MM-DD`.
    #[error("invalid date '{input}': {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    /// Rejected configuration, such as a zero-day duration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Input rows that cannot be scheduled, including blocks that would end
    /// past the last representable date.
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Parses an ISO `YYYY-MM-DD` date, the only date format the tool accepts.
pub fn parse_iso_date(input: &str) -> ScheduleResult<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|source| {
        ScheduleError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}
