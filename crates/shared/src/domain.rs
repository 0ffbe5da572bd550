use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned product identifier.
///
/// Always serialized as a string. Deserialization also accepts integer ids,
/// which some `/products` backends emit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawProductId::deserialize(deserializer)? {
            RawProductId::Text(id) => Self(id),
            RawProductId::Signed(id) => Self(id.to_string()),
            RawProductId::Unsigned(id) => Self(id.to_string()),
        })
    }
}

/// A persisted catalog entry as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub product_name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
}

/// Request body for create/update: a product without its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub product_name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
}

impl ProductPayload {
    pub fn into_record(self, id: ProductId) -> ProductRecord {
        ProductRecord {
            id,
            product_name: self.product_name,
            description: self.description,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
        }
    }
}
