// src/handlers/stores.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        params::{parse_i32, parse_limit, parse_page},
        response::{ApiResponse, MessageResponse, PaginatedResponse},
    },
    config::AppState,
    db::store_repo::{StoreChanges, StoreFilter},
};

// ---
// Payload: criação de loja
// ---
// Os campos obrigatórios são Option + `required` para que a ausência vire
// um erro { field, message } em vez de uma rejeição do serde.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorePayload {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 255, message = "Name must be between 1 and 255 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Address is required"),
        length(min = 1, max = 500, message = "Address must be between 1 and 500 characters")
    )]
    pub address: Option<String>,

    #[validate(
        required(message = "City is required"),
        length(min = 1, max = 100, message = "City must be between 1 and 100 characters")
    )]
    pub city: Option<String>,

    #[validate(
        required(message = "State is required"),
        length(min = 1, max = 50, message = "State must be between 1 and 50 characters")
    )]
    pub state: Option<String>,

    #[validate(
        required(message = "Zip code is required"),
        length(min = 1, max = 10, message = "Zip code must be between 1 and 10 characters")
    )]
    pub zip_code: Option<String>,

    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone_number: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStorePayload {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 500, message = "Address must be between 1 and 500 characters"))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 100, message = "City must be between 1 and 100 characters"))]
    pub city: Option<String>,
    #[validate(length(min = 1, max = 50, message = "State must be between 1 and 50 characters"))]
    pub state: Option<String>,
    #[validate(length(min = 1, max = 10, message = "Zip code must be between 1 and 10 characters"))]
    pub zip_code: Option<String>,
    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone_number: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

// Query params chegam como strings; a conversão acontece em common::params.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStoresQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub search: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/stores",
    tag = "stores",
    request_body = CreateStorePayload,
    responses(
        (status = 201, description = "Loja criada"),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn create_store(
    State(state): State<AppState>,
    Json(payload): Json<CreateStorePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // `required` já garantiu Some em todos os campos abaixo.
    let store = state
        .store_service
        .create_store(
            payload.name.as_deref().unwrap_or_default(),
            payload.address.as_deref().unwrap_or_default(),
            payload.city.as_deref().unwrap_or_default(),
            payload.state.as_deref().unwrap_or_default(),
            payload.zip_code.as_deref().unwrap_or_default(),
            payload.phone_number.as_deref(),
            payload.email.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(store, "Store created successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/stores",
    tag = "stores",
    responses((status = 200, description = "Lista paginada de lojas"))
)]
pub async fn list_stores(
    State(state): State<AppState>,
    Query(query): Query<ListStoresQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = parse_page(query.page.as_deref())?;
    let limit = parse_limit(query.limit.as_deref(), 10)?;

    let filter = StoreFilter {
        city: query.city,
        state: query.state,
        search: query.search,
    };

    let stores = state.store_service.list_stores(&filter, page, limit).await?;
    Ok(Json(PaginatedResponse::from(stores)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stores/{id}",
    tag = "stores",
    responses(
        (status = 200, description = "Loja encontrada"),
        (status = 404, description = "Loja não existe")
    )
)]
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_i32(&id, "id")?;
    let store = state.store_service.get_store(id).await?;
    Ok(Json(ApiResponse::ok(store)))
}

#[utoipa::path(
    put,
    path = "/api/v1/stores/{id}",
    tag = "stores",
    request_body = UpdateStorePayload,
    responses(
        (status = 200, description = "Loja atualizada"),
        (status = 404, description = "Loja não existe")
    )
)]
pub async fn update_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStorePayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_i32(&id, "id")?;
    payload.validate()?;

    let changes = StoreChanges {
        name: payload.name,
        address: payload.address,
        city: payload.city,
        state: payload.state,
        zip_code: payload.zip_code,
        phone_number: payload.phone_number,
        email: payload.email,
    };

    let store = state.store_service.update_store(id, &changes).await?;
    Ok(Json(ApiResponse::ok_with_message(store, "Store updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/stores/{id}",
    tag = "stores",
    responses(
        (status = 200, description = "Loja removida"),
        (status = 404, description = "Loja não existe")
    )
)]
pub async fn delete_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_i32(&id, "id")?;
    state.store_service.delete_store(id).await?;
    Ok(Json(MessageResponse::new("Store deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_requires_the_mandatory_fields() {
        let payload: CreateStorePayload = serde_json::from_str("{}").unwrap();
        let errors = payload.validate().unwrap_err();
        let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();

        assert!(fields.iter().any(|f| f == "name"));
        assert!(fields.iter().any(|f| f == "zip_code"));
        assert!(!fields.iter().any(|f| f == "phone_number"));
    }

    #[test]
    fn create_payload_accepts_a_complete_store() {
        let payload: CreateStorePayload = serde_json::from_value(serde_json::json!({
            "name": "Loja Centro",
            "address": "Rua Principal, 100",
            "city": "Austin",
            "state": "TX",
            "zipCode": "78701",
            "email": "centro@example.com"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn update_payload_rejects_a_malformed_email() {
        let payload: UpdateStorePayload =
            serde_json::from_value(serde_json::json!({ "email": "not-an-email" })).unwrap();
        assert!(payload.validate().is_err());
    }
}
