// src/handlers/analytics.rs
//
// As respostas de analytics carregam um `meta` com os parâmetros resolvidos
// (datas com default aplicado, granularidade, contagem de linhas).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        params::{parse_i32, parse_limit, parse_opt_date, parse_opt_i32},
        response::ApiResponse,
    },
    config::AppState,
    models::analytics::GroupBy,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesAnalyticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub store_id: Option<String>,
    pub group_by: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SampleDataPayload {
    #[validate(range(min = 1, max = 1000, message = "numberOfSales must be between 1 and 1000"))]
    pub number_of_sales: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/sales",
    tag = "analytics",
    responses(
        (status = 200, description = "Série temporal de vendas"),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn sales_analytics(
    State(state): State<AppState>,
    Query(query): Query<SalesAnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let start_date = parse_opt_date(query.start_date.as_deref(), "startDate")?;
    let end_date = parse_opt_date(query.end_date.as_deref(), "endDate")?;
    let store_id = parse_opt_i32(query.store_id.as_deref(), "storeId")?;

    let group_by = match query.group_by.as_deref() {
        None => GroupBy::Day,
        Some(value) => GroupBy::parse(value).ok_or_else(|| {
            AppError::field_error("groupBy", "groupBy must be one of: hour, day, week, month")
        })?,
    };

    let (buckets, start, end) = state
        .analytics_service
        .sales_analytics(start_date, end_date, store_id, group_by)
        .await?;

    let count = buckets.len();
    Ok(Json(ApiResponse::ok(buckets).with_meta(json!({
        "startDate": start.to_rfc3339(),
        "endDate": end.to_rfc3339(),
        "storeId": store_id,
        "groupBy": group_by.as_str(),
        "recordCount": count,
    }))))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/stores/performance",
    tag = "analytics",
    responses(
        (status = 200, description = "Ranking de desempenho das lojas"),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn store_performance(
    State(state): State<AppState>,
    Query(query): Query<RankedQuery>,
) -> Result<impl IntoResponse, AppError> {
    let start_date = parse_opt_date(query.start_date.as_deref(), "startDate")?;
    let end_date = parse_opt_date(query.end_date.as_deref(), "endDate")?;
    let limit = parse_limit(query.limit.as_deref(), 10)? as i32;

    let (rankings, start, end) = state
        .analytics_service
        .store_performance(start_date, end_date, limit)
        .await?;

    let count = rankings.len();
    Ok(Json(ApiResponse::ok(rankings).with_meta(json!({
        "startDate": start.to_rfc3339(),
        "endDate": end.to_rfc3339(),
        "limit": limit,
        "recordCount": count,
    }))))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/stores/{storeId}/products",
    tag = "analytics",
    responses(
        (status = 200, description = "Produtos mais vendidos da loja"),
        (status = 404, description = "Loja não existe")
    )
)]
pub async fn top_products_by_store(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(query): Query<RankedQuery>,
) -> Result<impl IntoResponse, AppError> {
    let store_id = parse_i32(&store_id, "storeId")?;
    let start_date = parse_opt_date(query.start_date.as_deref(), "startDate")?;
    let end_date = parse_opt_date(query.end_date.as_deref(), "endDate")?;
    let limit = parse_limit(query.limit.as_deref(), 10)? as i32;

    let (products, start, end) = state
        .analytics_service
        .top_products_by_store(store_id, start_date, end_date, limit)
        .await?;

    let count = products.len();
    Ok(Json(ApiResponse::ok(products).with_meta(json!({
        "storeId": store_id,
        "startDate": start.to_rfc3339(),
        "endDate": end.to_rfc3339(),
        "limit": limit,
        "recordCount": count,
    }))))
}

#[utoipa::path(
    get,
    path = "/api/v1/analytics/dashboard",
    tag = "analytics",
    responses((status = 200, description = "KPIs consolidados do período"))
)]
pub async fn dashboard_summary(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let start_date = parse_opt_date(query.start_date.as_deref(), "startDate")?;
    let end_date = parse_opt_date(query.end_date.as_deref(), "endDate")?;

    let summary = state
        .analytics_service
        .dashboard_summary(start_date, end_date)
        .await?;
    Ok(Json(ApiResponse::ok(summary)))
}

#[utoipa::path(
    post,
    path = "/api/v1/analytics/stores/{storeId}/sample-data",
    tag = "analytics",
    request_body = SampleDataPayload,
    responses(
        (status = 201, description = "Vendas de exemplo geradas"),
        (status = 404, description = "Loja não existe")
    )
)]
pub async fn generate_sample_data(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Json(payload): Json<SampleDataPayload>,
) -> Result<impl IntoResponse, AppError> {
    let store_id = parse_i32(&store_id, "storeId")?;
    payload.validate()?;
    let number_of_sales = payload.number_of_sales.unwrap_or(100);

    let created = state
        .analytics_service
        .generate_sample_data(store_id, number_of_sales)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::ok_with_message(
                json!({ "salesCreated": created }),
                "Sample data generated successfully",
            ),
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_payload_bounds_the_number_of_sales() {
        let payload: SampleDataPayload =
            serde_json::from_value(json!({ "numberOfSales": 0 })).unwrap();
        assert!(payload.validate().is_err());

        let payload: SampleDataPayload =
            serde_json::from_value(json!({ "numberOfSales": 1001 })).unwrap();
        assert!(payload.validate().is_err());

        let payload: SampleDataPayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.number_of_sales, None);
    }
}
