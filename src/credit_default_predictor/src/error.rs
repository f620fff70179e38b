use candid::CandidType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned to the form when a submission cannot be scored.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// A categorical label the form does not offer.
    #[error("unrecognized {field} label: {label:?}")]
    UnknownLabel { field: String, label: String },

    /// A numeric field outside its widget bounds.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: u64,
        max: u64,
        value: String,
    },
}

impl ProfileError {
    pub fn unknown_label(field: &str, label: &str) -> Self {
        ProfileError::UnknownLabel {
            field: field.to_string(),
            label: label.to_string(),
        }
    }
}

/// Errors raised while loading the scaler and classifier artifacts.
///
/// Every variant is fatal: the canister refuses to install with a bad artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to parse {artifact} artifact: {source}")]
    Parse {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{artifact} artifact expects {found} features, encoder produces {expected}")]
    FeatureCount {
        artifact: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{artifact} artifact has {found} {parameter} values, expected {expected}")]
    ParameterLength {
        artifact: &'static str,
        parameter: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{artifact} artifact feature {position} is {found:?}, encoder produces {expected:?}")]
    FeatureOrder {
        artifact: &'static str,
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("{artifact} artifact has a non-finite {parameter} at index {index}")]
    NonFinite {
        artifact: &'static str,
        parameter: &'static str,
        index: usize,
    },

    #[error("classifier artifact has {rows} coefficient rows, expected 1 for a binary model")]
    CoefficientRows { rows: usize },

    #[error("scaler artifact has a zero scale at index {index}")]
    ZeroScale { index: usize },
}
