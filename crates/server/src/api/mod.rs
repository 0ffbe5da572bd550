use std::sync::Arc;

use shared::{
    domain::{ProductId, ProductPayload, ProductRecord},
    error::ApiException,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory product table backing the `/products` resource.
#[derive(Clone, Default)]
pub struct ApiContext {
    pub products: Arc<RwLock<Vec<ProductRecord>>>,
}

impl ApiContext {
    pub fn with_products(products: Vec<ProductRecord>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

fn validate_payload(payload: &ProductPayload) -> Result<(), ApiException> {
    let missing: Vec<&str> = [
        ("productName", &payload.product_name),
        ("description", &payload.description),
        ("category", &payload.category),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();
    if !missing.is_empty() {
        return Err(ApiException::validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(ApiException::validation(
            "price must be a non-negative number",
        ));
    }
    Ok(())
}

fn not_found(id: &ProductId) -> ApiException {
    ApiException::not_found(format!("product {id} not found"))
}

pub async fn list_products(ctx: &ApiContext) -> Vec<ProductRecord> {
    ctx.products.read().await.clone()
}

pub async fn create_product(
    ctx: &ApiContext,
    payload: ProductPayload,
) -> Result<ProductRecord, ApiException> {
    validate_payload(&payload)?;
    let record = payload.into_record(ProductId::new(Uuid::new_v4().to_string()));
    ctx.products.write().await.push(record.clone());
    Ok(record)
}

/// Replaces the product stored under `id`. The path id wins over any id in
/// the request body.
pub async fn update_product(
    ctx: &ApiContext,
    id: ProductId,
    payload: ProductPayload,
) -> Result<ProductRecord, ApiException> {
    validate_payload(&payload)?;
    let mut products = ctx.products.write().await;
    let slot = products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| not_found(&id))?;
    *slot = payload.into_record(id);
    Ok(slot.clone())
}

pub async fn delete_product(ctx: &ApiContext, id: ProductId) -> Result<(), ApiException> {
    let mut products = ctx.products.write().await;
    let index = products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| not_found(&id))?;
    products.remove(index);
    Ok(())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
