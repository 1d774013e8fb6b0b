// src/db/store_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{common::error::AppError, models::store::Store};

// Campos opcionais de um UPDATE parcial de loja.
#[derive(Debug, Default)]
pub struct StoreChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

// Filtros da listagem de lojas.
#[derive(Debug, Default)]
pub struct StoreFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub search: Option<String>,
}

// O repositório de lojas, responsável por todas as interações com a tabela 'stores'.
#[derive(Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        address: &str,
        city: &str,
        state: &str,
        zip_code: &str,
        phone_number: Option<&str>,
        email: Option<&str>,
    ) -> Result<Store, AppError> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            INSERT INTO stores (name, address, city, state, zip_code, phone_number, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(city)
        .bind(state)
        .bind(zip_code)
        .bind(phone_number)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(store)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(store)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM stores WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    // Listagem com filtros + contagem total para a paginação.
    // As duas queries compartilham o mesmo WHERE.
    pub async fn list(
        &self,
        filter: &StoreFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Store>, i64), AppError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM stores WHERE 1=1");
        push_store_filters(&mut query, filter);
        query.push(" ORDER BY id ASC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let stores = query
            .build_query_as::<Store>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM stores WHERE 1=1");
        push_store_filters(&mut count_query, filter);

        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((stores, total))
    }

    pub async fn update(&self, id: i32, changes: &StoreChanges) -> Result<Option<Store>, AppError> {
        // updated_at é sempre tocado, mesmo num update "vazio".
        let mut query = QueryBuilder::<Postgres>::new("UPDATE stores SET updated_at = NOW()");

        if let Some(name) = &changes.name {
            query.push(", name = ").push_bind(name);
        }
        if let Some(address) = &changes.address {
            query.push(", address = ").push_bind(address);
        }
        if let Some(city) = &changes.city {
            query.push(", city = ").push_bind(city);
        }
        if let Some(state) = &changes.state {
            query.push(", state = ").push_bind(state);
        }
        if let Some(zip_code) = &changes.zip_code {
            query.push(", zip_code = ").push_bind(zip_code);
        }
        if let Some(phone_number) = &changes.phone_number {
            query.push(", phone_number = ").push_bind(phone_number);
        }
        if let Some(email) = &changes.email {
            query.push(", email = ").push_bind(email);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING *");

        let store = query
            .build_query_as::<Store>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(store)
    }

    // O ON DELETE CASCADE do schema remove produtos e vendas junto.
    pub async fn delete(&self, id: i32) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>("DELETE FROM stores WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(store)
    }
}

fn push_store_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &StoreFilter) {
    if let Some(city) = &filter.city {
        query.push(" AND city ILIKE ").push_bind(format!("%{city}%"));
    }
    if let Some(state) = &filter.state {
        query.push(" AND state ILIKE ").push_bind(format!("%{state}%"));
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query.push(" AND (name ILIKE ").push_bind(pattern.clone());
        query.push(" OR address ILIKE ").push_bind(pattern);
        query.push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // O QueryBuilder permite inspecionar o SQL final sem conexão.
    #[test]
    fn store_filters_compose_into_the_where_clause() {
        let filter = StoreFilter {
            city: Some("Spring".into()),
            state: None,
            search: Some("Main".into()),
        };
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM stores WHERE 1=1");
        push_store_filters(&mut query, &filter);

        let sql = query.sql();
        assert!(sql.contains("city ILIKE"));
        assert!(!sql.contains("state ILIKE"));
        assert!(sql.contains("name ILIKE"));
        assert!(sql.contains("OR address ILIKE"));
    }
}
