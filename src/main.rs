//src/main.rs

use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização (schema + funções de analytics).
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let store_routes = Router::new()
        .route(
            "/",
            post(handlers::stores::create_store).get(handlers::stores::list_stores),
        )
        .route(
            "/{id}",
            get(handlers::stores::get_store)
                .put(handlers::stores::update_store)
                .delete(handlers::stores::delete_store),
        )
        .route("/{storeId}/products", get(handlers::products::list_store_products));

    let product_routes = Router::new()
        .route(
            "/",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        // As rotas estáticas precisam vir antes de /{id} só por clareza;
        // o axum resolve o conflito sozinho.
        .route("/low-stock", get(handlers::products::low_stock_products))
        .route("/bulk-update-stock", patch(handlers::products::bulk_update_stock))
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        );

    let analytics_routes = Router::new()
        .route("/sales", get(handlers::analytics::sales_analytics))
        .route("/stores/performance", get(handlers::analytics::store_performance))
        .route(
            "/stores/{storeId}/products",
            get(handlers::analytics::top_products_by_store),
        )
        .route(
            "/stores/{storeId}/sample-data",
            post(handlers::analytics::generate_sample_data),
        )
        .route("/dashboard", get(handlers::analytics::dashboard_summary));

    let api_v1 = Router::new()
        .nest("/stores", store_routes)
        .nest("/products", product_routes)
        .nest("/analytics", analytics_routes);

    let app = Router::new()
        .route("/status", get(status))
        .nest("/api/v1", api_v1)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state.clone());

    let addr = format!("0.0.0.0:{}", AppState::server_port());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Erro no servidor Axum");

    // Devolve as conexões antes de encerrar.
    app_state.db_pool.close().await;
    tracing::info!("Servidor encerrado.");
}

// GET /status, fora do prefixo /api/v1.
async fn status() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Falha ao instalar o handler de Ctrl+C: {error}");
        return;
    }
    tracing::info!("Sinal de encerramento recebido; finalizando...");
}
