use shared::domain::{ProductId, ProductRecord};

pub mod catalog_store;
pub mod edit_session;
pub mod error;
pub mod route_guard;
pub mod transport;
pub mod types;

pub use catalog_store::CatalogStore;
pub use edit_session::{validate, EditSession};
pub use error::{CatalogError, ValidationFailure};
pub use transport::{HttpProductApi, ProductApi};
pub use types::{DraftField, DraftRecord, EditMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOperation {
    Initialize,
    Create,
    Update,
    Delete,
}

impl CatalogOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogOperation::Initialize => "initialize",
            CatalogOperation::Create => "create",
            CatalogOperation::Update => "update",
            CatalogOperation::Delete => "delete",
        }
    }
}

/// Change notifications published by [`CatalogStore`] to its subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    Loaded { count: usize },
    Created(ProductRecord),
    Updated(ProductRecord),
    Deleted(ProductId),
    Failed {
        operation: CatalogOperation,
        message: String,
    },
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
