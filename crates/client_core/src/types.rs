use std::{fmt, str::FromStr};

use shared::domain::{ProductId, ProductRecord};

/// Editable fields of a product draft. The id is not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    ProductName,
    Description,
    Category,
    Price,
    Quantity,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::ProductName,
        DraftField::Description,
        DraftField::Category,
        DraftField::Price,
        DraftField::Quantity,
    ];

    /// Wire name of the field, as used in JSON bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            DraftField::ProductName => "productName",
            DraftField::Description => "description",
            DraftField::Category => "category",
            DraftField::Price => "price",
            DraftField::Quantity => "quantity",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| name.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Creating,
    Editing,
}

/// In-progress product as typed by the user. Numeric fields stay textual
/// until validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftRecord {
    pub id: Option<ProductId>,
    pub product_name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
}

impl DraftRecord {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::ProductName => &self.product_name,
            DraftField::Description => &self.description,
            DraftField::Category => &self.category,
            DraftField::Price => &self.price,
            DraftField::Quantity => &self.quantity,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::ProductName => &mut self.product_name,
            DraftField::Description => &mut self.description,
            DraftField::Category => &mut self.category,
            DraftField::Price => &mut self.price,
            DraftField::Quantity => &mut self.quantity,
        };
        *slot = value.into();
    }
}

impl From<&ProductRecord> for DraftRecord {
    fn from(record: &ProductRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            product_name: record.product_name.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            price: record.price.to_string(),
            quantity: record.quantity.to_string(),
        }
    }
}
