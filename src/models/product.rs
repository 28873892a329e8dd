use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "product_status")]
pub enum ProductStatus {
    Active,
    Inactive,
}

/// Per-store stock flag, persisted as a JSONB array on the product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAvailability {
    pub location: String,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub status: ProductStatus,
    pub brand: Option<String>,
    pub sizes: Option<String>,
    pub product_code: Option<String>,
    pub order_name: Option<String>,
    #[sqlx(json)]
    pub store_availability: Vec<StoreAvailability>,
    pub last_update: DateTime<Utc>,
}

/// Create/update payload. Every field is optional at the wire level so the
/// handler can report which required field is missing; updates are
/// full-replace, so omitted optional fields are written as NULL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub status: Option<ProductStatus>,
    pub brand: Option<String>,
    pub sizes: Option<String>,
    pub product_code: Option<String>,
    pub order_name: Option<String>,
    pub store_availability: Option<Vec<StoreAvailability>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProductResponse {
    pub success: bool,
    pub id: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
}
