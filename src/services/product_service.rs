// src/services/product_service.rs

use rust_decimal::Decimal;

use crate::{
    common::{
        error::AppError,
        response::{Paginated, Pagination},
    },
    db::{
        ProductRepository, StoreRepository,
        product_repo::{ProductChanges, ProductFilter, StockUpdate},
    },
    models::product::{Product, ProductSortBy, ProductWithStore, SortOrder},
};

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    store_repo: StoreRepository,
}

impl ProductService {
    pub fn new(product_repo: ProductRepository, store_repo: StoreRepository) -> Self {
        Self {
            product_repo,
            store_repo,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        store_id: i32,
        name: &str,
        description: Option<&str>,
        category: &str,
        price: Decimal,
        quantity_in_stock: i32,
        sku: &str,
    ) -> Result<Product, AppError> {
        // A loja precisa existir antes do INSERT; a FK sozinha viraria um 500.
        if !self.store_repo.exists(store_id).await? {
            return Err(AppError::StoreNotFound);
        }

        let product = self
            .product_repo
            .create(store_id, name, description, category, price, quantity_in_stock, sku)
            .await?;

        tracing::info!(product_id = product.id, store_id, "Produto criado");
        Ok(product)
    }

    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        sort_by: ProductSortBy,
        sort_order: SortOrder,
        page: i64,
        limit: i64,
    ) -> Result<Paginated<ProductWithStore>, AppError> {
        let offset = (page - 1) * limit;
        let (rows, total) = self
            .product_repo
            .list(filter, sort_by, sort_order, limit, offset)
            .await?;

        Ok(Paginated {
            data: rows.into_iter().map(ProductWithStore::from).collect(),
            pagination: Pagination::new(page, limit, total),
        })
    }

    // Mesma listagem, mas amarrada a uma loja que precisa existir.
    pub async fn list_products_by_store(
        &self,
        store_id: i32,
        filter: &ProductFilter,
        sort_by: ProductSortBy,
        sort_order: SortOrder,
        page: i64,
        limit: i64,
    ) -> Result<Paginated<ProductWithStore>, AppError> {
        if !self.store_repo.exists(store_id).await? {
            return Err(AppError::StoreNotFound);
        }

        let scoped = ProductFilter {
            store_id: Some(store_id),
            category: filter.category.clone(),
            min_price: filter.min_price,
            max_price: filter.max_price,
            min_stock: filter.min_stock,
            max_stock: filter.max_stock,
            search: filter.search.clone(),
        };
        self.list_products(&scoped, sort_by, sort_order, page, limit)
            .await
    }

    pub async fn get_product(&self, id: i32) -> Result<ProductWithStore, AppError> {
        let row = self
            .product_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        Ok(ProductWithStore::from(row))
    }

    pub async fn update_product(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Product, AppError> {
        self.product_repo
            .update(id, changes)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn delete_product(&self, id: i32) -> Result<(), AppError> {
        match self.product_repo.delete(id).await? {
            Some(product) => {
                tracing::info!(product_id = product.id, "Produto removido");
                Ok(())
            }
            None => Err(AppError::ProductNotFound),
        }
    }

    pub async fn low_stock_products(
        &self,
        threshold: i32,
    ) -> Result<Vec<ProductWithStore>, AppError> {
        let rows = self.product_repo.low_stock(threshold).await?;
        Ok(rows.into_iter().map(ProductWithStore::from).collect())
    }

    // Ids inexistentes são ignorados; o chamador descobre pelo tamanho do retorno.
    pub async fn bulk_update_stock(
        &self,
        updates: &[StockUpdate],
    ) -> Result<Vec<Product>, AppError> {
        let updated = self.product_repo.bulk_update_stock(updates).await?;
        tracing::info!(
            requested = updates.len(),
            updated = updated.len(),
            "Estoque atualizado em lote"
        );
        Ok(updated)
    }
}
