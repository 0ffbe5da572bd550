use std::fmt;

use thiserror::Error;

use crate::types::DraftField;

/// Fields that failed client-side validation, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub invalid_fields: Vec<DraftField>,
}

impl ValidationFailure {
    pub fn contains(&self, field: DraftField) -> bool {
        self.invalid_fields.contains(&field)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.invalid_fields.iter().map(|f| f.as_str()).collect();
        write!(f, "invalid fields: {}", names.join(", "))
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Fetch(String),
    #[error("server returned {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("invalid product draft: {0}")]
    Validation(ValidationFailure),
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("unknown draft field: {0}")]
    UnknownField(String),
    #[error("draft has no product id to update")]
    MissingDraftId,
    #[error("catalog store is shut down")]
    Closed,
}

impl From<ValidationFailure> for CatalogError {
    fn from(value: ValidationFailure) -> Self {
        Self::Validation(value)
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Parse(value.to_string())
        } else {
            Self::Fetch(value.to_string())
        }
    }
}
