use std::{collections::HashSet, sync::Arc};

use shared::domain::{ProductId, ProductRecord};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};

use crate::{
    edit_session::validate,
    error::CatalogError,
    transport::ProductApi,
    types::DraftRecord,
    CatalogEvent, CatalogOperation,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

struct CatalogState {
    products: Vec<ProductRecord>,
    closed: bool,
}

/// Owner of the product list for one session.
///
/// The list is only ever changed after the server confirms a request, under
/// one lock, and each change is followed by exactly one [`CatalogEvent`].
pub struct CatalogStore {
    api: Arc<dyn ProductApi>,
    inner: Mutex<CatalogState>,
    events: broadcast::Sender<CatalogEvent>,
}

impl CatalogStore {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            inner: Mutex::new(CatalogState {
                products: Vec::new(),
                closed: false,
            }),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    pub async fn products(&self) -> Vec<ProductRecord> {
        self.inner.lock().await.products.clone()
    }

    pub async fn get(&self, id: &ProductId) -> Option<ProductRecord> {
        let guard = self.inner.lock().await;
        guard.products.iter().find(|p| &p.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.products.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Tears the store down. Requests still in flight complete, but their
    /// results are discarded.
    pub async fn shutdown(&self) {
        let mut guard = self.inner.lock().await;
        guard.closed = true;
        info!("catalog store shut down");
    }

    pub async fn initialize(&self) -> Result<usize, CatalogError> {
        self.ensure_open().await?;
        let products = match self.api.list().await {
            Ok(products) => products,
            Err(err) => return Err(self.report(CatalogOperation::Initialize, err)),
        };
        if let Err(err) = check_listing_ids(&products) {
            return Err(self.report(CatalogOperation::Initialize, err));
        }

        let mut guard = self.inner.lock().await;
        if guard.closed {
            return Err(discard_stale(CatalogOperation::Initialize));
        }
        let count = products.len();
        guard.products = products;
        let _ = self.events.send(CatalogEvent::Loaded { count });
        info!(count, "catalog loaded");
        Ok(count)
    }

    pub async fn create(&self, draft: &DraftRecord) -> Result<ProductRecord, CatalogError> {
        let payload = validate(draft)
            .map_err(|failure| self.report(CatalogOperation::Create, failure.into()))?;
        self.ensure_open().await?;

        let created = match self.api.create(&payload).await {
            Ok(record) => record,
            Err(err) => return Err(self.report(CatalogOperation::Create, err)),
        };
        if created.id.is_empty() {
            return Err(self.report(
                CatalogOperation::Create,
                CatalogError::Parse("created product has no id".into()),
            ));
        }

        let mut guard = self.inner.lock().await;
        if guard.closed {
            return Err(discard_stale(CatalogOperation::Create));
        }
        if guard.products.iter().any(|p| p.id == created.id) {
            return Err(self.report(
                CatalogOperation::Create,
                CatalogError::Parse(format!("created product id {} already exists", created.id)),
            ));
        }
        guard.products.push(created.clone());
        let _ = self.events.send(CatalogEvent::Created(created.clone()));
        info!(product_id = %created.id, "product created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &ProductId,
        draft: &DraftRecord,
    ) -> Result<ProductRecord, CatalogError> {
        let payload = validate(draft)
            .map_err(|failure| self.report(CatalogOperation::Update, failure.into()))?;
        self.ensure_open().await?;

        let updated = match self.api.update(id, &payload).await {
            Ok(record) => record,
            Err(err) => return Err(self.report(CatalogOperation::Update, err)),
        };
        if &updated.id != id {
            return Err(self.report(
                CatalogOperation::Update,
                CatalogError::Parse(format!(
                    "server returned product {} for update of {id}",
                    updated.id
                )),
            ));
        }

        let mut guard = self.inner.lock().await;
        if guard.closed {
            return Err(discard_stale(CatalogOperation::Update));
        }
        match guard.products.iter().position(|p| &p.id == id) {
            Some(index) => guard.products[index] = updated.clone(),
            None => guard.products.push(updated.clone()),
        }
        let _ = self.events.send(CatalogEvent::Updated(updated.clone()));
        info!(product_id = %id, "product updated");
        Ok(updated)
    }

    /// Deletes remotely, then drops the record from the list as it stands
    /// when the confirmation arrives.
    pub async fn delete(&self, id: &ProductId) -> Result<(), CatalogError> {
        self.ensure_open().await?;
        if let Err(err) = self.api.delete(id).await {
            return Err(self.report(CatalogOperation::Delete, err));
        }

        let mut guard = self.inner.lock().await;
        if guard.closed {
            return Err(discard_stale(CatalogOperation::Delete));
        }
        let before = guard.products.len();
        guard.products.retain(|p| &p.id != id);
        if guard.products.len() == before {
            debug!(product_id = %id, "deleted product was not in the local catalog");
        }
        let _ = self.events.send(CatalogEvent::Deleted(id.clone()));
        info!(product_id = %id, "product deleted");
        Ok(())
    }

    async fn ensure_open(&self) -> Result<(), CatalogError> {
        if self.inner.lock().await.closed {
            return Err(CatalogError::Closed);
        }
        Ok(())
    }

    fn report(&self, operation: CatalogOperation, err: CatalogError) -> CatalogError {
        error!(operation = operation.as_str(), error = %err, "catalog operation failed");
        let _ = self.events.send(CatalogEvent::Failed {
            operation,
            message: err.to_string(),
        });
        err
    }
}

/// A listing is only usable as a catalog if every id is present and unique.
fn check_listing_ids(products: &[ProductRecord]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if product.id.is_empty() {
            return Err(CatalogError::Parse("listed product has no id".into()));
        }
        if !seen.insert(&product.id) {
            return Err(CatalogError::Parse(format!(
                "product id {} listed more than once",
                product.id
            )));
        }
    }
    Ok(())
}

fn discard_stale(operation: CatalogOperation) -> CatalogError {
    debug!(
        operation = operation.as_str(),
        "discarding response received after shutdown"
    );
    CatalogError::Closed
}

#[cfg(test)]
#[path = "tests/catalog_store_tests.rs"]
mod tests;
