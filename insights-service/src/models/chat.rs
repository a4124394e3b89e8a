//! Chat request and response payloads.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatQuery {
    #[validate(length(min = 1, max = 4000))]
    pub question: String,

    /// Short language code for the answer, e.g. `hi`.
    #[validate(custom(function = "validate_language_code"))]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

fn validate_language_code(code: &str) -> Result<(), ValidationError> {
    let well_formed = (2..=8).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
        && !code.starts_with('-')
        && !code.ends_with('-');

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("language_code"))
    }
}
