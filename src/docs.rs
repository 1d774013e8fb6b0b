// src/docs.rs
//
// Documentação OpenAPI servida pelo Swagger UI em /docs.

use utoipa::OpenApi;

use crate::{handlers, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Backend API",
        description = "CRUD de lojas e produtos + analytics de vendas sobre PostgreSQL.",
        version = "0.1.0"
    ),
    paths(
        handlers::stores::create_store,
        handlers::stores::list_stores,
        handlers::stores::get_store,
        handlers::stores::update_store,
        handlers::stores::delete_store,
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::list_store_products,
        handlers::products::low_stock_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::bulk_update_stock,
        handlers::products::delete_product,
        handlers::analytics::sales_analytics,
        handlers::analytics::store_performance,
        handlers::analytics::top_products_by_store,
        handlers::analytics::dashboard_summary,
        handlers::analytics::generate_sample_data,
    ),
    components(schemas(
        models::store::Store,
        models::store::StoreRef,
        models::product::Product,
        models::product::ProductWithStore,
        models::sales::ProductSale,
        models::analytics::GroupBy,
        models::analytics::SalesAnalytics,
        models::analytics::StorePerformanceRanking,
        models::analytics::ProductPerformance,
        models::analytics::DashboardSummary,
        handlers::stores::CreateStorePayload,
        handlers::stores::UpdateStorePayload,
        handlers::products::CreateProductPayload,
        handlers::products::UpdateProductPayload,
        handlers::products::BulkStockItem,
        handlers::products::BulkUpdateStockPayload,
        handlers::analytics::SampleDataPayload,
    )),
    tags(
        (name = "stores", description = "Cadastro de lojas"),
        (name = "products", description = "Cadastro e estoque de produtos"),
        (name = "analytics", description = "Séries, rankings e dashboard de vendas")
    )
)]
pub struct ApiDoc;
