use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Store not found")]
    StoreNotFound,

    #[error("Product not found")]
    ProductNotFound,

    // Variante para erros de banco de dados (sqlx)
    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    // Constrói um erro de validação de um único campo, para as checagens
    // feitas à mão (query params, consistência entre campos).
    pub fn field_error(field: &'static str, message: &'static str) -> Self {
        let mut error = validator::ValidationError::new("invalid");
        error.message = Some(message.into());

        let mut errors = validator::ValidationErrors::new();
        errors.add(field.into(), error);
        AppError::ValidationError(errors)
    }
}

// Os structs de payload usam nomes snake_case; o JSON do cliente é camelCase.
// Convertemos o nome do campo na resposta para bater com o que ele enviou.
fn camelize(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, no formato
            // { field, message } que o cliente espera.
            AppError::ValidationError(errors) => {
                let mut details = Vec::new();
                for (field, field_errors) in errors.field_errors() {
                    let field = camelize(&field);
                    for e in field_errors.iter() {
                        let message = e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value for {field}"));
                        details.push(json!({ "field": field, "message": message }));
                    }
                }
                let body = Json(json!({
                    "success": false,
                    "error": "Validation failed",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::StoreNotFound => (StatusCode::NOT_FOUND, "Store not found"),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Product not found"),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O detalhe fica apenas no log do servidor; o cliente recebe uma
            // mensagem genérica.
            ref e => {
                tracing::error!("Erro interno do servidor: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camelize_converts_snake_case_field_names() {
        assert_eq!(camelize("city"), "city");
        assert_eq!(camelize("zip_code"), "zipCode");
        assert_eq!(camelize("quantity_in_stock"), "quantityInStock");
    }

    #[tokio::test]
    async fn field_error_renders_as_400_with_details() {
        let response =
            AppError::field_error("group_by", "groupBy must be one of: hour, day, week, month")
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"][0]["field"], "groupBy");
    }

    #[tokio::test]
    async fn not_found_renders_as_404() {
        let response = AppError::StoreNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_errors_hide_details_from_the_client() {
        let response =
            AppError::InternalServerError(anyhow::anyhow!("pool exhausted")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");
    }
}
