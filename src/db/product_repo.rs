// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::error::AppError,
    models::product::{Product, ProductSortBy, ProductWithStoreRow, SortOrder},
};

// SELECT compartilhado pelas leituras: produto + resumo da loja.
const PRODUCT_WITH_STORE: &str = r#"
SELECT
    products.*,
    stores.name AS store_name,
    stores.city AS store_city,
    stores.state AS store_state
FROM products
INNER JOIN stores ON products.store_id = stores.id
WHERE 1=1"#;

#[derive(Debug, Default)]
pub struct ProductFilter {
    pub store_id: Option<i32>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_stock: Option<i32>,
    pub max_stock: Option<i32>,
    pub search: Option<String>,
}

#[derive(Debug, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub quantity_in_stock: Option<i32>,
    pub sku: Option<String>,
}

// Item do PATCH /products/bulk-update-stock.
#[derive(Debug, Clone)]
pub struct StockUpdate {
    pub id: i32,
    pub quantity_in_stock: i32,
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        store_id: i32,
        name: &str,
        description: Option<&str>,
        category: &str,
        price: Decimal,
        quantity_in_stock: i32,
        sku: &str,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (store_id, name, description, category, price, quantity_in_stock, sku)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(description)
        .bind(category)
        .bind(price)
        .bind(quantity_in_stock)
        .bind(sku)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ProductWithStoreRow>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(PRODUCT_WITH_STORE);
        query.push(" AND products.id = ").push_bind(id);

        let product = query
            .build_query_as::<ProductWithStoreRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    pub async fn list(
        &self,
        filter: &ProductFilter,
        sort_by: ProductSortBy,
        sort_order: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProductWithStoreRow>, i64), AppError> {
        let mut query = QueryBuilder::<Postgres>::new(PRODUCT_WITH_STORE);
        push_product_filters(&mut query, filter);

        // sort_by/sort_order vêm de enums whitelisted; nunca de texto do cliente.
        query.push(" ORDER BY ");
        query.push(sort_by.column());
        query.push(" ");
        query.push(sort_order.keyword());
        query.push(" LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let products = query
            .build_query_as::<ProductWithStoreRow>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_query = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM products INNER JOIN stores ON products.store_id = stores.id WHERE 1=1",
        );
        push_product_filters(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((products, total))
    }

    pub async fn low_stock(&self, threshold: i32) -> Result<Vec<ProductWithStoreRow>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(PRODUCT_WITH_STORE);
        query
            .push(" AND products.quantity_in_stock <= ")
            .push_bind(threshold);
        query.push(" ORDER BY products.quantity_in_stock ASC");

        let products = query
            .build_query_as::<ProductWithStoreRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    pub async fn update(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE products SET updated_at = NOW()");

        if let Some(name) = &changes.name {
            query.push(", name = ").push_bind(name);
        }
        if let Some(description) = &changes.description {
            query.push(", description = ").push_bind(description);
        }
        if let Some(category) = &changes.category {
            query.push(", category = ").push_bind(category);
        }
        if let Some(price) = changes.price {
            query.push(", price = ").push_bind(price);
        }
        if let Some(quantity) = changes.quantity_in_stock {
            query.push(", quantity_in_stock = ").push_bind(quantity);
        }
        if let Some(sku) = &changes.sku {
            query.push(", sku = ").push_bind(sku);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING *");

        let product = query
            .build_query_as::<Product>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    // Atualização de estoque em lote, atômica: ou todas as linhas existentes
    // são atualizadas, ou nenhuma. Ids inexistentes são ignorados.
    pub async fn bulk_update_stock(
        &self,
        updates: &[StockUpdate],
    ) -> Result<Vec<Product>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut updated = Vec::with_capacity(updates.len());

        for item in updates {
            let product = sqlx::query_as::<_, Product>(
                r#"
                UPDATE products
                SET quantity_in_stock = $1, updated_at = NOW()
                WHERE id = $2
                RETURNING *
                "#,
            )
            .bind(item.quantity_in_stock)
            .bind(item.id)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some(product) = product {
                updated.push(product);
            }
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<Option<Product>, AppError> {
        let product =
            sqlx::query_as::<_, Product>("DELETE FROM products WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(product)
    }
}

fn push_product_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    if let Some(store_id) = filter.store_id {
        query.push(" AND products.store_id = ").push_bind(store_id);
    }
    if let Some(category) = &filter.category {
        query
            .push(" AND products.category ILIKE ")
            .push_bind(format!("%{category}%"));
    }
    if let Some(min_price) = filter.min_price {
        query.push(" AND products.price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        query.push(" AND products.price <= ").push_bind(max_price);
    }
    if let Some(min_stock) = filter.min_stock {
        query
            .push(" AND products.quantity_in_stock >= ")
            .push_bind(min_stock);
    }
    if let Some(max_stock) = filter.max_stock {
        query
            .push(" AND products.quantity_in_stock <= ")
            .push_bind(max_stock);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query.push(" AND (products.name ILIKE ").push_bind(pattern.clone());
        query
            .push(" OR products.description ILIKE ")
            .push_bind(pattern.clone());
        query.push(" OR products.sku ILIKE ").push_bind(pattern);
        query.push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_and_stock_filters_reach_the_sql() {
        let filter = ProductFilter {
            min_price: Some("50".parse().unwrap()),
            max_price: Some("150".parse().unwrap()),
            min_stock: Some(1),
            ..Default::default()
        };
        let mut query = QueryBuilder::<Postgres>::new("SELECT 1 WHERE 1=1");
        push_product_filters(&mut query, &filter);

        let sql = query.sql();
        assert!(sql.contains("products.price >= "));
        assert!(sql.contains("products.price <= "));
        assert!(sql.contains("products.quantity_in_stock >= "));
        assert!(!sql.contains("products.quantity_in_stock <= "));
    }

    #[test]
    fn search_filter_covers_name_description_and_sku() {
        let filter = ProductFilter {
            search: Some("usb".into()),
            ..Default::default()
        };
        let mut query = QueryBuilder::<Postgres>::new("SELECT 1 WHERE 1=1");
        push_product_filters(&mut query, &filter);

        let sql = query.sql();
        assert!(sql.contains("products.name ILIKE"));
        assert!(sql.contains("products.description ILIKE"));
        assert!(sql.contains("products.sku ILIKE"));
    }
}
