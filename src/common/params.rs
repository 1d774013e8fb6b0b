// src/common/params.rs
//
// Conversão de query params (sempre strings na URL) para tipos fortes.
// Qualquer falha vira um erro de validação { field, message }, igual ao
// que o validator produz para o corpo das requisições.

use chrono::{DateTime, NaiveDate, Utc};

use crate::common::error::AppError;

// Aceita tanto timestamps RFC 3339 quanto datas simples YYYY-MM-DD
// (interpretadas como meia-noite UTC).
pub fn parse_date(value: &str, field: &'static str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = value.parse::<NaiveDate>() {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        return Ok(DateTime::from_naive_utc_and_offset(midnight, Utc));
    }
    Err(AppError::field_error(field, "Invalid date format"))
}

pub fn parse_opt_date(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, AppError> {
    value.map(|v| parse_date(v, field)).transpose()
}

pub fn parse_i32(value: &str, field: &'static str) -> Result<i32, AppError> {
    value
        .parse::<i32>()
        .map_err(|_| AppError::field_error(field, "Must be a valid integer"))
}

pub fn parse_opt_i32(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<i32>, AppError> {
    value.map(|v| parse_i32(v, field)).transpose()
}

pub fn parse_opt_decimal(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<rust_decimal::Decimal>, AppError> {
    value
        .map(|v| {
            v.parse::<rust_decimal::Decimal>()
                .map_err(|_| AppError::field_error(field, "Must be a valid number"))
        })
        .transpose()
}

// Página >= 1; default 1.
pub fn parse_page(value: Option<&str>) -> Result<i64, AppError> {
    match value {
        None => Ok(1),
        Some(v) => {
            let page = v
                .parse::<i64>()
                .map_err(|_| AppError::field_error("page", "Must be a valid integer"))?;
            if page < 1 {
                return Err(AppError::field_error("page", "Page must be at least 1"));
            }
            Ok(page)
        }
    }
}

// Limite de paginação/ranking: 1..=100, com default configurável.
pub fn parse_limit(value: Option<&str>, default: i64) -> Result<i64, AppError> {
    match value {
        None => Ok(default),
        Some(v) => {
            let limit = v
                .parse::<i64>()
                .map_err(|_| AppError::field_error("limit", "Must be a valid integer"))?;
            if !(1..=100).contains(&limit) {
                return Err(AppError::field_error(
                    "limit",
                    "Limit must be a number between 1 and 100",
                ));
            }
            Ok(limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parse_date_accepts_rfc3339_and_plain_dates() {
        let dt = parse_date("2024-11-25T13:45:00Z", "startDate").unwrap();
        assert_eq!(dt.hour(), 13);

        let dt = parse_date("2024-11-25", "startDate").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.to_rfc3339(), "2024-11-25T00:00:00+00:00");
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("not-a-date", "startDate").is_err());
        assert!(parse_date("2024-13-40", "endDate").is_err());
    }

    #[test]
    fn parse_opt_date_passes_none_through() {
        assert!(parse_opt_date(None, "startDate").unwrap().is_none());
        assert!(parse_opt_date(Some("2024-01-01"), "startDate").unwrap().is_some());
    }

    #[test]
    fn parse_limit_enforces_bounds_and_default() {
        assert_eq!(parse_limit(None, 10).unwrap(), 10);
        assert_eq!(parse_limit(Some("100"), 10).unwrap(), 100);
        assert_eq!(parse_limit(Some("1"), 10).unwrap(), 1);
        assert!(parse_limit(Some("0"), 10).is_err());
        assert!(parse_limit(Some("101"), 10).is_err());
        assert!(parse_limit(Some("ten"), 10).is_err());
    }

    #[test]
    fn parse_page_defaults_to_one_and_rejects_zero() {
        assert_eq!(parse_page(None).unwrap(), 1);
        assert_eq!(parse_page(Some("3")).unwrap(), 3);
        assert!(parse_page(Some("0")).is_err());
        assert!(parse_page(Some("-1")).is_err());
    }

    #[test]
    fn parse_i32_rejects_non_numeric_ids() {
        assert_eq!(parse_i32("42", "storeId").unwrap(), 42);
        assert!(parse_i32("abc", "storeId").is_err());
        assert!(parse_i32("4.5", "storeId").is_err());
    }
}
