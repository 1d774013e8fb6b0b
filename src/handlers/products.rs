// src/handlers/products.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::AppError,
        params::{parse_i32, parse_limit, parse_opt_decimal, parse_opt_i32, parse_page},
        response::{ApiResponse, MessageResponse, PaginatedResponse},
    },
    config::AppState,
    db::product_repo::{ProductChanges, ProductFilter, StockUpdate},
    models::product::{ProductSortBy, SortOrder},
};

fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("Price must be a positive number".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(required(message = "storeId is required"))]
    pub store_id: Option<i32>,

    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 255, message = "Name must be between 1 and 255 characters")
    )]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(
        required(message = "Category is required"),
        length(min = 1, max = 100, message = "Category must be between 1 and 100 characters")
    )]
    pub category: Option<String>,

    #[validate(
        required(message = "Price is required"),
        custom(function = "validate_positive")
    )]
    pub price: Option<Decimal>,

    #[validate(
        required(message = "quantityInStock is required"),
        range(min = 0, message = "Quantity in stock cannot be negative")
    )]
    pub quantity_in_stock: Option<i32>,

    #[validate(
        required(message = "SKU is required"),
        length(min = 1, max = 100, message = "SKU must be between 1 and 100 characters")
    )]
    pub sku: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category must be between 1 and 100 characters"))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_positive"))]
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "Quantity in stock cannot be negative"))]
    pub quantity_in_stock: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "SKU must be between 1 and 100 characters"))]
    pub sku: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkStockItem {
    #[validate(required(message = "Product id is required"))]
    pub id: Option<i32>,

    #[validate(
        required(message = "quantityInStock is required"),
        range(min = 0, message = "Quantity in stock cannot be negative")
    )]
    pub quantity_in_stock: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateStockPayload {
    #[validate(
        required(message = "Products array is required"),
        length(min = 1, message = "At least one product is required"),
        nested
    )]
    pub products: Option<Vec<BulkStockItem>>,
}

// Query params da listagem; strings cruas, convertidas em common::params.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub store_id: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_stock: Option<String>,
    pub max_stock: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockQuery {
    pub threshold: Option<String>,
}

// Conversão compartilhada entre GET /products e GET /stores/{id}/products.
fn parse_listing(
    query: ListProductsQuery,
) -> Result<(ProductFilter, ProductSortBy, SortOrder, i64, i64), AppError> {
    let page = parse_page(query.page.as_deref())?;
    let limit = parse_limit(query.limit.as_deref(), 10)?;

    let sort_by = match query.sort_by.as_deref() {
        None => ProductSortBy::CreatedAt,
        Some(value) => ProductSortBy::parse(value).ok_or_else(|| {
            AppError::field_error(
                "sortBy",
                "sortBy must be one of: name, price, quantityInStock, createdAt",
            )
        })?,
    };
    let sort_order = match query.sort_order.as_deref() {
        None => SortOrder::Desc,
        Some(value) => SortOrder::parse(value)
            .ok_or_else(|| AppError::field_error("sortOrder", "sortOrder must be asc or desc"))?,
    };

    let filter = ProductFilter {
        store_id: parse_opt_i32(query.store_id.as_deref(), "storeId")?,
        category: query.category,
        min_price: parse_opt_decimal(query.min_price.as_deref(), "minPrice")?,
        max_price: parse_opt_decimal(query.max_price.as_deref(), "maxPrice")?,
        min_stock: parse_opt_i32(query.min_stock.as_deref(), "minStock")?,
        max_stock: parse_opt_i32(query.max_stock.as_deref(), "maxStock")?,
        search: query.search,
    };

    Ok((filter, sort_by, sort_order, page, limit))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado"),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Loja não existe")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // `required` já garantiu Some em todos os campos abaixo.
    let product = state
        .product_service
        .create_product(
            payload.store_id.unwrap_or_default(),
            payload.name.as_deref().unwrap_or_default(),
            payload.description.as_deref(),
            payload.category.as_deref().unwrap_or_default(),
            payload.price.unwrap_or_default(),
            payload.quantity_in_stock.unwrap_or_default(),
            payload.sku.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(product, "Product created successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "products",
    responses((status = 200, description = "Lista paginada de produtos"))
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (filter, sort_by, sort_order, page, limit) = parse_listing(query)?;
    let products = state
        .product_service
        .list_products(&filter, sort_by, sort_order, page, limit)
        .await?;
    Ok(Json(PaginatedResponse::from(products)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stores/{storeId}/products",
    tag = "products",
    responses(
        (status = 200, description = "Produtos da loja"),
        (status = 404, description = "Loja não existe")
    )
)]
pub async fn list_store_products(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let store_id = parse_i32(&store_id, "storeId")?;
    let (filter, sort_by, sort_order, page, limit) = parse_listing(query)?;
    let products = state
        .product_service
        .list_products_by_store(store_id, &filter, sort_by, sort_order, page, limit)
        .await?;
    Ok(Json(PaginatedResponse::from(products)))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/low-stock",
    tag = "products",
    responses((status = 200, description = "Produtos com estoque abaixo do limite"))
)]
pub async fn low_stock_products(
    State(state): State<AppState>,
    Query(query): Query<LowStockQuery>,
) -> Result<impl IntoResponse, AppError> {
    let threshold = parse_opt_i32(query.threshold.as_deref(), "threshold")?.unwrap_or(10);
    if threshold < 0 {
        return Err(AppError::field_error(
            "threshold",
            "Threshold must be a non-negative integer",
        ));
    }

    let products = state.product_service.low_stock_products(threshold).await?;
    let count = products.len();
    Ok(Json(
        ApiResponse::ok(products).with_meta(serde_json::json!({
            "threshold": threshold,
            "recordCount": count,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "products",
    responses(
        (status = 200, description = "Produto encontrado"),
        (status = 404, description = "Produto não existe")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_i32(&id, "id")?;
    let product = state.product_service.get_product(id).await?;
    Ok(Json(ApiResponse::ok(product)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "products",
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado"),
        (status = 404, description = "Produto não existe")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_i32(&id, "id")?;
    payload.validate()?;

    let changes = ProductChanges {
        name: payload.name,
        description: payload.description,
        category: payload.category,
        price: payload.price,
        quantity_in_stock: payload.quantity_in_stock,
        sku: payload.sku,
    };

    let product = state.product_service.update_product(id, &changes).await?;
    Ok(Json(ApiResponse::ok_with_message(product, "Product updated successfully")))
}

#[utoipa::path(
    patch,
    path = "/api/v1/products/bulk-update-stock",
    tag = "products",
    request_body = BulkUpdateStockPayload,
    responses(
        (status = 200, description = "Estoques atualizados"),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn bulk_update_stock(
    State(state): State<AppState>,
    Json(payload): Json<BulkUpdateStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let updates: Vec<StockUpdate> = payload
        .products
        .unwrap_or_default()
        .into_iter()
        .map(|item| StockUpdate {
            id: item.id.unwrap_or_default(),
            quantity_in_stock: item.quantity_in_stock.unwrap_or_default(),
        })
        .collect();

    let updated = state.product_service.bulk_update_stock(&updates).await?;
    let count = updated.len();
    Ok(Json(
        ApiResponse::ok_with_message(updated, "Stock updated successfully")
            .with_meta(serde_json::json!({ "updatedCount": count })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "products",
    responses(
        (status = 200, description = "Produto removido"),
        (status = 404, description = "Produto não existe")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_i32(&id, "id")?;
    state.product_service.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_rejects_non_positive_price() {
        let payload: CreateProductPayload = serde_json::from_value(serde_json::json!({
            "storeId": 1,
            "name": "Cabo USB-C",
            "category": "Acessórios",
            "price": 0,
            "quantityInStock": 5,
            "sku": "USB-C-01"
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn bulk_payload_requires_at_least_one_product() {
        let payload: BulkUpdateStockPayload =
            serde_json::from_value(serde_json::json!({ "products": [] })).unwrap();
        assert!(payload.validate().is_err());

        let payload: BulkUpdateStockPayload = serde_json::from_value(serde_json::json!({
            "products": [{ "id": 1, "quantityInStock": 7 }]
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn listing_defaults_to_created_at_descending() {
        let (filter, sort_by, sort_order, page, limit) =
            parse_listing(ListProductsQuery::default()).unwrap();
        assert!(filter.store_id.is_none());
        assert_eq!(sort_by, ProductSortBy::CreatedAt);
        assert_eq!(sort_order, SortOrder::Desc);
        assert_eq!(page, 1);
        assert_eq!(limit, 10);
    }

    #[test]
    fn listing_rejects_unknown_sort_columns() {
        let query = ListProductsQuery {
            sort_by: Some("sku".into()),
            ..Default::default()
        };
        assert!(parse_listing(query).is_err());
    }

    #[test]
    fn listing_parses_numeric_filters() {
        let query = ListProductsQuery {
            store_id: Some("3".into()),
            min_price: Some("10.50".into()),
            max_stock: Some("20".into()),
            ..Default::default()
        };
        let (filter, ..) = parse_listing(query).unwrap();
        assert_eq!(filter.store_id, Some(3));
        assert_eq!(filter.min_price, Some("10.50".parse().unwrap()));
        assert_eq!(filter.max_stock, Some(20));
    }
}
