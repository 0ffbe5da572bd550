//! REST transport for the `/products` resource.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use shared::{
    domain::{ProductId, ProductPayload, ProductRecord},
    error::ApiError,
    protocol::products_route,
};
use tracing::debug;

use crate::error::CatalogError;

/// Remote product resource. Injected into the catalog store so tests can
/// substitute a scripted fake.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self) -> Result<Vec<ProductRecord>, CatalogError>;
    async fn create(&self, payload: &ProductPayload) -> Result<ProductRecord, CatalogError>;
    async fn update(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<ProductRecord, CatalogError>;
    async fn delete(&self, id: &ProductId) -> Result<(), CatalogError>;
}

pub struct HttpProductApi {
    http: Client,
    base_url: String,
}

impl HttpProductApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `{base}/products/{id}` with the id pushed as one escaped path segment,
    /// so reserved characters in an id never change the addressed resource.
    fn product_url(&self, id: &ProductId) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&self.url(products_route()))
            .map_err(|err| CatalogError::Fetch(format!("invalid server url: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::Fetch(format!("invalid server url: {}", self.base_url)))?
            .push(id.as_str());
        Ok(url)
    }
}

/// Passes 2xx responses through; otherwise builds an `HttpStatus` error from
/// the `{ "error": ... }` body, falling back to the status reason.
async fn error_for_status(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();
    let message = match response.json::<ApiError>().await {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => fallback,
    };
    Err(CatalogError::HttpStatus {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let response = self.http.get(self.url(products_route())).send().await?;
        let products: Vec<ProductRecord> = error_for_status(response).await?.json().await?;
        debug!(count = products.len(), "products listed");
        Ok(products)
    }

    async fn create(&self, payload: &ProductPayload) -> Result<ProductRecord, CatalogError> {
        let response = self
            .http
            .post(self.url(products_route()))
            .json(payload)
            .send()
            .await?;
        Ok(error_for_status(response).await?.json().await?)
    }

    async fn update(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<ProductRecord, CatalogError> {
        let body = payload.clone().into_record(id.clone());
        let response = self
            .http
            .put(self.product_url(id)?)
            .json(&body)
            .send()
            .await?;
        Ok(error_for_status(response).await?.json().await?)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), CatalogError> {
        let response = self.http.delete(self.product_url(id)?).send().await?;
        error_for_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
