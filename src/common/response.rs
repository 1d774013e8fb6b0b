// src/common/response.rs
//
// Envelope padrão de resposta: { success, data?, message?, meta? }.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            meta: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

// Resposta só com mensagem (deletes).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            pages,
            has_next: page < pages,
            has_prev: page > 1,
        }
    }
}

// Lista paginada no formato { data: [...], pagination: {...} }.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

// Envelope de listagem: { success, data: [...], pagination: {...} }.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> From<Paginated<T>> for PaginatedResponse<T> {
    fn from(paginated: Paginated<T>) -> Self {
        Self {
            success: true,
            data: paginated.data,
            pagination: paginated.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_computes_page_count_with_ceiling() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);

        let p = Pagination::new(3, 10, 30);
        assert_eq!(p.pages, 3);
        assert!(!p.has_next);
        assert!(p.has_prev);

        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.pages, 0);
        assert!(!p.has_next);
    }

    #[test]
    fn envelope_omits_empty_fields() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2, 3])).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("message").is_none());
        assert!(json.get("meta").is_none());

        let json = serde_json::to_value(
            ApiResponse::ok(1).with_meta(serde_json::json!({ "recordCount": 1 })),
        )
        .unwrap();
        assert_eq!(json["meta"]["recordCount"], 1);
    }

    #[test]
    fn paginated_response_keeps_data_and_pagination_at_the_top_level() {
        let paginated = Paginated {
            data: vec!["a", "b"],
            pagination: Pagination::new(1, 10, 2),
        };
        let json = serde_json::to_value(PaginatedResponse::from(paginated)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"][1], "b");
        assert_eq!(json["pagination"]["total"], 2);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(2, 10, 25)).unwrap();
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["hasPrev"], true);
        assert!(json.get("has_next").is_none());
    }
}
