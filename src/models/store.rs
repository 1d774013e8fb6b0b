// src/models/store.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Loja completa, como está na tabela 'stores'.
// O serde converte zip_code -> zipCode etc. para o cliente.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resumo de loja embutido nas respostas de produto.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreRef {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_serializes_with_camel_case_fields() {
        let store = Store {
            id: 1,
            name: "Loja Centro".into(),
            address: "Rua A, 100".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62701".into(),
            phone_number: None,
            email: Some("centro@example.com".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["zipCode"], "62701");
        assert_eq!(json["phoneNumber"], serde_json::Value::Null);
        assert!(json.get("zip_code").is_none());
    }
}
