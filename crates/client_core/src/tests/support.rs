use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use shared::domain::{ProductId, ProductPayload, ProductRecord};
use tokio::sync::{oneshot, Mutex};

use crate::{error::CatalogError, transport::ProductApi, types::DraftRecord};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ApiCall {
    List,
    Create(ProductPayload),
    Update(ProductId, ProductPayload),
    Delete(ProductId),
}

#[derive(Debug, Clone)]
pub(crate) enum Failure {
    Status(u16, String),
    Transport(String),
    Malformed(String),
}

impl Failure {
    fn to_error(&self) -> CatalogError {
        match self {
            Failure::Status(status, message) => CatalogError::HttpStatus {
                status: *status,
                message: message.clone(),
            },
            Failure::Transport(message) => CatalogError::Fetch(message.clone()),
            Failure::Malformed(message) => CatalogError::Parse(message.clone()),
        }
    }
}

/// In-memory stand-in for the `/products` resource that records every call.
pub(crate) struct FakeProductApi {
    products: Mutex<Vec<ProductRecord>>,
    next_id: AtomicU64,
    failure: Mutex<Option<Failure>>,
    response_id_override: Mutex<Option<ProductId>>,
    hold: Mutex<Option<oneshot::Receiver<()>>>,
    pub(crate) calls: Mutex<Vec<ApiCall>>,
}

impl FakeProductApi {
    pub(crate) fn new() -> Self {
        Self::with_products(Vec::new())
    }

    pub(crate) fn with_products(products: Vec<ProductRecord>) -> Self {
        Self {
            next_id: AtomicU64::new(products.len() as u64 + 1),
            products: Mutex::new(products),
            failure: Mutex::new(None),
            response_id_override: Mutex::new(None),
            hold: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) async fn fail_with(&self, failure: Failure) {
        *self.failure.lock().await = Some(failure);
    }

    pub(crate) async fn clear_failure(&self) {
        *self.failure.lock().await = None;
    }

    pub(crate) async fn respond_with_id(&self, id: ProductId) {
        *self.response_id_override.lock().await = Some(id);
    }

    /// Parks the next call until the returned sender fires or is dropped.
    pub(crate) async fn hold_next_call(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.hold.lock().await = Some(rx);
        tx
    }

    pub(crate) async fn server_products(&self) -> Vec<ProductRecord> {
        self.products.lock().await.clone()
    }

    pub(crate) async fn insert_server_side(&self, record: ProductRecord) {
        self.products.lock().await.push(record);
    }

    pub(crate) async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    async fn enter(&self, call: ApiCall) -> Result<(), CatalogError> {
        let hold = self.hold.lock().await.take();
        self.calls.lock().await.push(call);
        if let Some(rx) = hold {
            let _ = rx.await;
        }
        match self.failure.lock().await.as_ref() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    async fn response_id(&self, id: ProductId) -> ProductId {
        self.response_id_override.lock().await.take().unwrap_or(id)
    }
}

#[async_trait]
impl ProductApi for FakeProductApi {
    async fn list(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        self.enter(ApiCall::List).await?;
        Ok(self.products.lock().await.clone())
    }

    async fn create(&self, payload: &ProductPayload) -> Result<ProductRecord, CatalogError> {
        self.enter(ApiCall::Create(payload.clone())).await?;
        let id = ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst).to_string());
        let record = payload.clone().into_record(id);
        self.products.lock().await.push(record.clone());
        let response_id = self.response_id(record.id.clone()).await;
        Ok(ProductRecord {
            id: response_id,
            ..record
        })
    }

    async fn update(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<ProductRecord, CatalogError> {
        self.enter(ApiCall::Update(id.clone(), payload.clone()))
            .await?;
        let record = payload.clone().into_record(id.clone());
        {
            let mut products = self.products.lock().await;
            let Some(slot) = products.iter_mut().find(|p| &p.id == id) else {
                return Err(CatalogError::HttpStatus {
                    status: 404,
                    message: format!("product {id} not found"),
                });
            };
            *slot = record.clone();
        }
        let response_id = self.response_id(id.clone()).await;
        Ok(ProductRecord {
            id: response_id,
            ..record
        })
    }

    async fn delete(&self, id: &ProductId) -> Result<(), CatalogError> {
        self.enter(ApiCall::Delete(id.clone())).await?;
        let mut products = self.products.lock().await;
        let before = products.len();
        products.retain(|p| &p.id != id);
        if products.len() == before {
            return Err(CatalogError::HttpStatus {
                status: 404,
                message: format!("product {id} not found"),
            });
        }
        Ok(())
    }
}

pub(crate) fn record(id: &str, name: &str, price: f64, quantity: u32) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        product_name: name.to_string(),
        description: format!("{name} description"),
        category: "Stationery".to_string(),
        price,
        quantity,
    }
}

pub(crate) fn pen_draft() -> DraftRecord {
    DraftRecord {
        id: None,
        product_name: "Pen".into(),
        description: "Blue pen".into(),
        category: "Stationery".into(),
        price: "1.50".into(),
        quantity: "10".into(),
    }
}
