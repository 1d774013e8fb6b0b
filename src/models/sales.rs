// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSale {
    pub id: i32,
    pub product_id: i32,
    pub store_id: i32,
    pub quantity_sold: i32,
    pub unit_price: Decimal,
    // total_amount é gravado pelo cliente e confiado como está (sem constraint).
    pub total_amount: Decimal,
    pub sale_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// Venda ainda não persistida, usada pelo gerador de dados de exemplo.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub product_id: i32,
    pub store_id: i32,
    pub quantity_sold: i32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub sale_date: DateTime<Utc>,
}
