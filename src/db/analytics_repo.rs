// src/db/analytics_repo.rs
//
// As agregações pesadas vivem em funções SQL (ver migrations); aqui só
// fazemos o bind dos parâmetros e o mapeamento das linhas.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    models::{
        analytics::{
            GroupBy, InventoryCounts, ProductPerformance, SalesAnalytics,
            StorePerformanceRanking,
        },
        product::Product,
        sales::NewSale,
    },
};

// Limite de "estoque baixo" usado nos alertas do dashboard.
const LOW_STOCK_ALERT_THRESHOLD: i32 = 10;

#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn sales_analytics(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        store_id: Option<i32>,
        group_by: GroupBy,
    ) -> Result<Vec<SalesAnalytics>, AppError> {
        let rows = sqlx::query_as::<_, SalesAnalytics>(
            "SELECT * FROM get_product_sales_analytics($1, $2, $3, $4)",
        )
        .bind(start_date)
        .bind(end_date)
        .bind(store_id)
        .bind(group_by.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn store_performance(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        limit: i32,
    ) -> Result<Vec<StorePerformanceRanking>, AppError> {
        let rows = sqlx::query_as::<_, StorePerformanceRanking>(
            "SELECT * FROM get_store_performance_rankings($1, $2, $3)",
        )
        .bind(start_date)
        .bind(end_date)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn top_products_by_store(
        &self,
        store_id: i32,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        limit: i32,
    ) -> Result<Vec<ProductPerformance>, AppError> {
        let rows = sqlx::query_as::<_, ProductPerformance>(
            "SELECT * FROM get_top_products_by_store($1, $2, $3, $4)",
        )
        .bind(store_id)
        .bind(start_date)
        .bind(end_date)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // Contagens do dashboard numa única ida ao banco.
    pub async fn inventory_counts(&self) -> Result<InventoryCounts, AppError> {
        let counts = sqlx::query_as::<_, InventoryCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM stores) AS total_stores,
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM products WHERE quantity_in_stock <= $1) AS low_stock_alerts
            "#,
        )
        .bind(LOW_STOCK_ALERT_THRESHOLD)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    // Produtos com estoque de uma loja; insumo do gerador de dados de exemplo.
    pub async fn products_in_stock(&self, store_id: i32) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE store_id = $1 AND quantity_in_stock > 0",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn insert_sales(&self, sales: &[NewSale]) -> Result<u64, AppError> {
        if sales.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO product_sales (product_id, store_id, quantity_sold, unit_price, total_amount, sale_date) ",
        );
        query.push_values(sales, |mut row, sale| {
            row.push_bind(sale.product_id)
                .push_bind(sale.store_id)
                .push_bind(sale.quantity_sold)
                .push_bind(sale.unit_price)
                .push_bind(sale.total_amount)
                .push_bind(sale.sale_date);
        });

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
