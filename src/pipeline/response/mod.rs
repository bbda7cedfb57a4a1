//! Parsing and validation of model answers.
//!
//! Models answer in a labeled-line format. Nothing a model asserts about risk
//! is trusted: numbers are pulled out, checked for plausibility, and run back
//! through the domain tables.

pub mod labels;
pub mod parser;
pub mod symptoms;

pub use labels::{Label, LabeledResponse, IMAGE_NOT_CLEAR};
pub use parser::{parse_and_validate, ParseContext};
pub use symptoms::parse_symptom_response;

use thiserror::Error;

use crate::models::Domain;

#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("{domain} response is missing {field}")]
    MissingField {
        domain: Domain,
        field: &'static str,
    },

    #[error("{domain} response has no recognisable labels")]
    Unlabeled { domain: Domain },
}
