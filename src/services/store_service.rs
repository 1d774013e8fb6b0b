// src/services/store_service.rs

use crate::{
    common::{
        error::AppError,
        response::{Paginated, Pagination},
    },
    db::{
        StoreRepository,
        store_repo::{StoreChanges, StoreFilter},
    },
    models::store::Store,
};

#[derive(Clone)]
pub struct StoreService {
    store_repo: StoreRepository,
}

impl StoreService {
    pub fn new(store_repo: StoreRepository) -> Self {
        Self { store_repo }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_store(
        &self,
        name: &str,
        address: &str,
        city: &str,
        state: &str,
        zip_code: &str,
        phone_number: Option<&str>,
        email: Option<&str>,
    ) -> Result<Store, AppError> {
        let store = self
            .store_repo
            .create(name, address, city, state, zip_code, phone_number, email)
            .await?;

        tracing::info!(store_id = store.id, "Loja criada");
        Ok(store)
    }

    pub async fn list_stores(
        &self,
        filter: &StoreFilter,
        page: i64,
        limit: i64,
    ) -> Result<Paginated<Store>, AppError> {
        let offset = (page - 1) * limit;
        let (stores, total) = self.store_repo.list(filter, limit, offset).await?;

        Ok(Paginated {
            data: stores,
            pagination: Pagination::new(page, limit, total),
        })
    }

    pub async fn get_store(&self, id: i32) -> Result<Store, AppError> {
        self.store_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::StoreNotFound)
    }

    pub async fn update_store(&self, id: i32, changes: &StoreChanges) -> Result<Store, AppError> {
        self.store_repo
            .update(id, changes)
            .await?
            .ok_or(AppError::StoreNotFound)
    }

    pub async fn delete_store(&self, id: i32) -> Result<(), AppError> {
        let deleted = self.store_repo.delete(id).await?;
        match deleted {
            Some(store) => {
                tracing::info!(store_id = store.id, "Loja removida (produtos e vendas em cascata)");
                Ok(())
            }
            None => Err(AppError::StoreNotFound),
        }
    }
}
