use crate::types::MetadataField;
use thiserror::Error;

fn join_fields(fields: &[MetadataField]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Domain errors of the estimation pipeline
///
/// I/O failures (capture, decoding, writing results) travel as `anyhow::Error`
/// with file context; these are the conditions the pipeline itself detects.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeedError {
    /// One or more of the four GPS fields is absent
    #[error("missing geolocation metadata: {}", join_fields(.missing))]
    MissingGeolocation { missing: Vec<MetadataField> },

    /// The record has GPS fields but no `datetime_original`
    #[error("missing capture timestamp (datetime_original)")]
    MissingTimestamp,

    /// `datetime_original` is not in `YYYY:MM:DD HH:MM:SS` form
    #[error("invalid capture timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Two consecutive samples carry the same timestamp; fatal for a run
    #[error("zero elapsed time between samples (both at {timestamp_s} s)")]
    ZeroElapsedTime { timestamp_s: f64 },

    /// Only raised under the strict elapsed-time policy
    #[error("negative elapsed time between samples ({elapsed_s} s)")]
    NegativeElapsedTime { elapsed_s: f64 },

    /// A run setting is out of range, detected before the run starts
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SpeedResult<T> = std::result::Result<T, SpeedError>;
