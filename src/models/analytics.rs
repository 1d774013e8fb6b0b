// src/models/analytics.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Granularidade de agrupamento da série temporal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Hour,
    Day,
    Week,
    Month,
}

impl GroupBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hour" => Some(Self::Hour),
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

// Um bucket da série temporal devolvida por get_product_sales_analytics.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesAnalytics {
    pub time_period: DateTime<Utc>,
    pub period_label: String,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
    pub unique_products: i64,
    pub average_order_value: Decimal,
    pub store_count: i64,
}

// Linha de get_store_performance_rankings.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorePerformanceRanking {
    pub store_id: i32,
    pub store_name: String,
    pub store_city: String,
    pub store_state: String,
    pub total_products: i64,
    pub active_products: i64,
    pub total_inventory_value: Decimal,
    pub total_sales_revenue: Decimal,
    pub total_units_sold: i64,
    pub average_product_price: Decimal,
    pub inventory_turnover_ratio: Decimal,
    pub performance_score: Decimal,
    pub performance_rank: i32,
}

// Linha de get_top_products_by_store.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    pub product_id: i32,
    pub product_name: String,
    pub product_category: String,
    pub product_sku: String,
    pub current_stock: i32,
    pub current_price: Decimal,
    pub total_units_sold: i64,
    pub total_revenue: Decimal,
    pub average_sale_price: Decimal,
    pub sales_frequency: Decimal,
    pub revenue_per_day: Decimal,
    pub stock_turnover_rate: Decimal,
    pub product_rank: i32,
}

// KPIs do dashboard, montados no service a partir de quatro consultas.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: Decimal,
    pub total_units: i64,
    pub average_order_value: Decimal,
    pub top_performing_store: String,
    pub growth_rate: Decimal,
    pub total_stores: i64,
    pub total_products: i64,
    pub low_stock_alerts: i64,
}

// Contagens simples de inventário usadas pelo dashboard.
#[derive(Debug, Clone, FromRow)]
pub struct InventoryCounts {
    pub total_stores: i64,
    pub total_products: i64,
    pub low_stock_alerts: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_by_parses_the_four_granularities() {
        assert_eq!(GroupBy::parse("hour"), Some(GroupBy::Hour));
        assert_eq!(GroupBy::parse("day"), Some(GroupBy::Day));
        assert_eq!(GroupBy::parse("week"), Some(GroupBy::Week));
        assert_eq!(GroupBy::parse("month"), Some(GroupBy::Month));
        assert_eq!(GroupBy::parse("year"), None);
        assert_eq!(GroupBy::parse("Day"), None);
    }

    #[test]
    fn group_by_round_trips_through_as_str() {
        for g in [GroupBy::Hour, GroupBy::Day, GroupBy::Week, GroupBy::Month] {
            assert_eq!(GroupBy::parse(g.as_str()), Some(g));
        }
    }
}
