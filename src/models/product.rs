// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::store::StoreRef;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub store_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub quantity_in_stock: i32,
    pub sku: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha "achatada" do JOIN products x stores, como o sqlx a devolve.
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithStoreRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub quantity_in_stock: i32,
    pub sku: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub store_id: i32,
    pub store_name: String,
    pub store_city: String,
    pub store_state: String,
}

// Forma pública: produto com o resumo da loja aninhado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithStore {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub quantity_in_stock: i32,
    pub sku: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub store: StoreRef,
}

impl From<ProductWithStoreRow> for ProductWithStore {
    fn from(row: ProductWithStoreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            price: row.price,
            quantity_in_stock: row.quantity_in_stock,
            sku: row.sku,
            created_at: row.created_at,
            updated_at: row.updated_at,
            store: StoreRef {
                id: row.store_id,
                name: row.store_name,
                city: row.store_city,
                state: row.store_state,
            },
        }
    }
}

// Colunas permitidas para ordenação da listagem.
// Whitelist explícita: o valor vai direto para o ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortBy {
    Name,
    Price,
    QuantityInStock,
    CreatedAt,
}

impl ProductSortBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "quantityInStock" => Some(Self::QuantityInStock),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "products.name",
            Self::Price => "products.price",
            Self::QuantityInStock => "products.quantity_in_stock",
            Self::CreatedAt => "products.created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_accepts_only_whitelisted_columns() {
        assert_eq!(
            ProductSortBy::parse("quantityInStock"),
            Some(ProductSortBy::QuantityInStock)
        );
        assert_eq!(ProductSortBy::parse("createdAt"), Some(ProductSortBy::CreatedAt));
        assert_eq!(ProductSortBy::parse("quantity_in_stock"), None);
        assert_eq!(ProductSortBy::parse("id; DROP TABLE products"), None);
    }

    #[test]
    fn product_with_store_nests_the_store_summary() {
        let row = ProductWithStoreRow {
            id: 7,
            name: "Headphones".into(),
            description: None,
            category: "Audio".into(),
            price: "249.90".parse().unwrap(),
            quantity_in_stock: 3,
            sku: "HP-001".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            store_id: 2,
            store_name: "Loja Norte".into(),
            store_city: "Austin".into(),
            store_state: "TX".into(),
        };

        let product = ProductWithStore::from(row);
        assert_eq!(product.store.id, 2);

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["quantityInStock"], 3);
        assert_eq!(json["store"]["name"], "Loja Norte");
    }
}
