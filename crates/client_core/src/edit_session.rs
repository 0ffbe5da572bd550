//! The single in-progress draft behind the product form, and its
//! create/edit mode.

use shared::domain::{ProductPayload, ProductRecord};
use tracing::{info, warn};

use crate::{
    catalog_store::CatalogStore,
    error::{CatalogError, ValidationFailure},
    types::{DraftField, DraftRecord, EditMode},
};

/// Checks a draft and coerces it into a request payload.
///
/// Text fields must be non-blank, `price` must parse as a finite,
/// non-negative float and `quantity` as a non-negative integer. Every
/// offending field is reported, not just the first.
pub fn validate(draft: &DraftRecord) -> Result<ProductPayload, ValidationFailure> {
    let mut invalid_fields = Vec::new();

    for field in [
        DraftField::ProductName,
        DraftField::Description,
        DraftField::Category,
    ] {
        if draft.field(field).trim().is_empty() {
            invalid_fields.push(field);
        }
    }

    let price = draft
        .price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0);
    if price.is_none() {
        invalid_fields.push(DraftField::Price);
    }

    let quantity = draft.quantity.trim().parse::<u32>().ok();
    if quantity.is_none() {
        invalid_fields.push(DraftField::Quantity);
    }

    match (price, quantity) {
        (Some(price), Some(quantity)) if invalid_fields.is_empty() => Ok(ProductPayload {
            product_name: draft.product_name.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            price,
            quantity,
        }),
        _ => Err(ValidationFailure { invalid_fields }),
    }
}

#[derive(Debug, Default)]
pub struct EditSession {
    draft: DraftRecord,
    mode: EditMode,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn start_create(&mut self) {
        self.draft = DraftRecord::default();
        self.mode = EditMode::Creating;
    }

    pub fn start_edit(&mut self, record: &ProductRecord) {
        self.draft = DraftRecord::from(record);
        self.mode = EditMode::Editing;
    }

    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    pub fn update_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), CatalogError> {
        let field = name.parse::<DraftField>().map_err(CatalogError::UnknownField)?;
        self.update_field(field, value);
        Ok(())
    }

    pub fn validate(&self) -> Result<ProductPayload, ValidationFailure> {
        validate(&self.draft)
    }

    /// Validates the draft and hands it to the store. On success the session
    /// goes back to an empty create-mode draft; on any failure the draft and
    /// mode are left as they were so the user can correct and retry.
    pub async fn submit(&mut self, store: &CatalogStore) -> Result<ProductRecord, CatalogError> {
        if let Err(failure) = self.validate() {
            warn!(%failure, "product draft rejected");
            return Err(failure.into());
        }

        let saved = match self.mode {
            EditMode::Creating => store.create(&self.draft).await?,
            EditMode::Editing => {
                let Some(id) = self.draft.id.clone() else {
                    warn!("edit-mode draft has no product id");
                    return Err(CatalogError::MissingDraftId);
                };
                store.update(&id, &self.draft).await?
            }
        };

        info!(product_id = %saved.id, "product draft submitted");
        self.start_create();
        Ok(saved)
    }

    pub fn cancel(&mut self) {
        self.start_create();
    }
}

#[cfg(test)]
#[path = "tests/edit_session_tests.rs"]
mod tests;
