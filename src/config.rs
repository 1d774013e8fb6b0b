// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{AnalyticsRepository, ProductRepository, StoreRepository},
    services::{AnalyticsService, ProductService, StoreService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub store_service: StoreService,
    pub product_service: ProductService,
    pub analytics_service: AnalyticsService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL deve ser definida"))?;

        let db_pool = PgPoolOptions::new()
            .min_connections(2)
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(30))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let store_repo = StoreRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let analytics_repo = AnalyticsRepository::new(db_pool.clone());

        let store_service = StoreService::new(store_repo.clone());
        let product_service = ProductService::new(product_repo, store_repo.clone());
        let analytics_service = AnalyticsService::new(analytics_repo, store_repo);

        Ok(Self {
            db_pool,
            store_service,
            product_service,
            analytics_service,
        })
    }

    // Porta do servidor; PORT no ambiente, 3000 por padrão.
    pub fn server_port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000)
    }
}
