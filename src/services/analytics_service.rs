// src/services/analytics_service.rs
//
// As consultas pesadas ficam nas funções SQL; aqui entram os defaults de
// período, a composição do dashboard e o gerador de dados de exemplo.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{AnalyticsRepository, StoreRepository},
    models::{
        analytics::{
            DashboardSummary, GroupBy, InventoryCounts, ProductPerformance, SalesAnalytics,
            StorePerformanceRanking,
        },
        product::Product,
        sales::NewSale,
    },
};

// Janela padrão quando o chamador não informa o período.
const DEFAULT_RANGE_DAYS: i64 = 30;

#[derive(Clone)]
pub struct AnalyticsService {
    analytics_repo: AnalyticsRepository,
    store_repo: StoreRepository,
}

impl AnalyticsService {
    pub fn new(analytics_repo: AnalyticsRepository, store_repo: StoreRepository) -> Self {
        Self {
            analytics_repo,
            store_repo,
        }
    }

    pub async fn sales_analytics(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        store_id: Option<i32>,
        group_by: GroupBy,
    ) -> Result<(Vec<SalesAnalytics>, DateTime<Utc>, DateTime<Utc>), AppError> {
        let (start, end) = resolve_range(start_date, end_date, Utc::now());
        let buckets = self
            .analytics_repo
            .sales_analytics(start, end, store_id, group_by)
            .await?;
        Ok((buckets, start, end))
    }

    pub async fn store_performance(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        limit: i32,
    ) -> Result<(Vec<StorePerformanceRanking>, DateTime<Utc>, DateTime<Utc>), AppError> {
        let (start, end) = resolve_range(start_date, end_date, Utc::now());
        let rankings = self
            .analytics_repo
            .store_performance(start, end, limit)
            .await?;
        Ok((rankings, start, end))
    }

    pub async fn top_products_by_store(
        &self,
        store_id: i32,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        limit: i32,
    ) -> Result<(Vec<ProductPerformance>, DateTime<Utc>, DateTime<Utc>), AppError> {
        if !self.store_repo.exists(store_id).await? {
            return Err(AppError::StoreNotFound);
        }

        let (start, end) = resolve_range(start_date, end_date, Utc::now());
        let products = self
            .analytics_repo
            .top_products_by_store(store_id, start, end, limit)
            .await?;
        Ok((products, start, end))
    }

    // Quatro consultas independentes, disparadas em paralelo.
    pub async fn dashboard_summary(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<DashboardSummary, AppError> {
        let (start, end) = resolve_range(start_date, end_date, Utc::now());

        // Período anterior com a mesma duração, encostado no atual.
        let span = end - start;
        let previous_start = start - span;

        let (current, previous, rankings, counts) = tokio::try_join!(
            self.analytics_repo
                .sales_analytics(start, end, None, GroupBy::Day),
            self.analytics_repo
                .sales_analytics(previous_start, start, None, GroupBy::Day),
            self.analytics_repo.store_performance(start, end, 1),
            self.analytics_repo.inventory_counts(),
        )?;

        Ok(compose_summary(&current, &previous, &rankings, &counts))
    }

    // Gera vendas aleatórias para uma loja, só sobre produtos com estoque.
    pub async fn generate_sample_data(
        &self,
        store_id: i32,
        number_of_sales: i32,
    ) -> Result<u64, AppError> {
        if !self.store_repo.exists(store_id).await? {
            return Err(AppError::StoreNotFound);
        }

        let products = self.analytics_repo.products_in_stock(store_id).await?;
        if products.is_empty() {
            tracing::warn!(store_id, "Loja sem produtos em estoque; nada a gerar");
            return Ok(0);
        }

        // O ThreadRng é !Send; mantê-lo fora do .await preserva o handler Send.
        let sales = {
            let mut rng = rand::thread_rng();
            build_sample_sales(&products, store_id, number_of_sales, Utc::now(), &mut rng)
        };
        let created = self.analytics_repo.insert_sales(&sales).await?;

        tracing::info!(store_id, created, "Vendas de exemplo geradas");
        Ok(created)
    }
}

// Defaults: últimos 30 dias. Cada extremo é resolvido de forma independente.
fn resolve_range(
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = end_date.unwrap_or(now);
    let start = start_date.unwrap_or(end - Duration::days(DEFAULT_RANGE_DAYS));
    (start, end)
}

fn compose_summary(
    current: &[SalesAnalytics],
    previous: &[SalesAnalytics],
    rankings: &[StorePerformanceRanking],
    counts: &InventoryCounts,
) -> DashboardSummary {
    let total_revenue: Decimal = current.iter().map(|b| b.total_revenue).sum();
    let total_units: i64 = current.iter().map(|b| b.total_quantity).sum();

    let average_order_value = if total_units > 0 {
        total_revenue / Decimal::from(total_units)
    } else {
        Decimal::ZERO
    };

    let previous_revenue: Decimal = previous.iter().map(|b| b.total_revenue).sum();
    let growth_rate = if previous_revenue > Decimal::ZERO {
        (total_revenue - previous_revenue) / previous_revenue * Decimal::from(100)
    } else {
        Decimal::ZERO
    };

    let top_performing_store = rankings
        .first()
        .map(|r| r.store_name.clone())
        .unwrap_or_else(|| "N/A".to_string());

    DashboardSummary {
        total_revenue: total_revenue.round_dp(2),
        total_units,
        average_order_value: average_order_value.round_dp(2),
        top_performing_store,
        growth_rate: growth_rate.round_dp(2),
        total_stores: counts.total_stores,
        total_products: counts.total_products,
        low_stock_alerts: counts.low_stock_alerts,
    }
}

fn build_sample_sales<R: Rng>(
    products: &[Product],
    store_id: i32,
    count: i32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<NewSale> {
    let window_seconds = Duration::days(DEFAULT_RANGE_DAYS).num_seconds();

    (0..count)
        .map(|_| {
            let product = &products[rng.gen_range(0..products.len())];
            let quantity_sold = rng.gen_range(1..=5);
            let unit_price = product.price;
            let sale_date = now - Duration::seconds(rng.gen_range(0..window_seconds));

            NewSale {
                product_id: product.id,
                store_id,
                quantity_sold,
                unit_price,
                total_amount: unit_price * Decimal::from(quantity_sold),
                sale_date,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn bucket(revenue: &str, quantity: i64) -> SalesAnalytics {
        SalesAnalytics {
            time_period: Utc::now(),
            period_label: "2024-11-01".into(),
            total_quantity: quantity,
            total_revenue: revenue.parse().unwrap(),
            unique_products: 1,
            average_order_value: Decimal::ZERO,
            store_count: 1,
        }
    }

    fn ranking(name: &str) -> StorePerformanceRanking {
        StorePerformanceRanking {
            store_id: 1,
            store_name: name.into(),
            store_city: "Austin".into(),
            store_state: "TX".into(),
            total_products: 10,
            active_products: 8,
            total_inventory_value: Decimal::ZERO,
            total_sales_revenue: Decimal::ZERO,
            total_units_sold: 0,
            average_product_price: Decimal::ZERO,
            inventory_turnover_ratio: Decimal::ZERO,
            performance_score: Decimal::ZERO,
            performance_rank: 1,
        }
    }

    fn counts() -> InventoryCounts {
        InventoryCounts {
            total_stores: 3,
            total_products: 42,
            low_stock_alerts: 5,
        }
    }

    fn product(id: i32, price: &str) -> Product {
        Product {
            id,
            store_id: 1,
            name: format!("Produto {id}"),
            description: None,
            category: "Geral".into(),
            price: price.parse().unwrap(),
            quantity_in_stock: 10,
            sku: format!("SKU-{id:03}"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn range_defaults_to_the_last_thirty_days() {
        let now = Utc::now();
        let (start, end) = resolve_range(None, None, now);
        assert_eq!(end, now);
        assert_eq!(start, now - Duration::days(30));
    }

    #[test]
    fn explicit_range_is_kept_as_is() {
        let now = Utc::now();
        let start = now - Duration::days(7);
        let (s, e) = resolve_range(Some(start), Some(now), now + Duration::days(1));
        assert_eq!(s, start);
        assert_eq!(e, now);
    }

    #[test]
    fn only_start_given_keeps_end_at_now() {
        let now = Utc::now();
        let start = now - Duration::days(90);
        let (s, e) = resolve_range(Some(start), None, now);
        assert_eq!(s, start);
        assert_eq!(e, now);
    }

    #[test]
    fn summary_aggregates_buckets_and_rounds() {
        let current = vec![bucket("300.00", 3), bucket("200.00", 2)];
        let previous = vec![bucket("400.00", 4)];
        let summary = compose_summary(&current, &previous, &[ranking("Loja Centro")], &counts());

        assert_eq!(summary.total_revenue, "500.00".parse().unwrap());
        assert_eq!(summary.total_units, 5);
        assert_eq!(summary.average_order_value, "100.00".parse().unwrap());
        // (500 - 400) / 400 * 100
        assert_eq!(summary.growth_rate, "25.00".parse().unwrap());
        assert_eq!(summary.top_performing_store, "Loja Centro");
        assert_eq!(summary.total_stores, 3);
        assert_eq!(summary.low_stock_alerts, 5);
    }

    #[test]
    fn summary_handles_empty_periods() {
        let summary = compose_summary(&[], &[], &[], &counts());

        assert_eq!(summary.total_revenue, Decimal::ZERO);
        assert_eq!(summary.total_units, 0);
        assert_eq!(summary.average_order_value, Decimal::ZERO);
        assert_eq!(summary.growth_rate, Decimal::ZERO);
        assert_eq!(summary.top_performing_store, "N/A");
    }

    #[test]
    fn growth_rate_is_zero_without_previous_revenue() {
        let summary = compose_summary(&[bucket("100.00", 1)], &[], &[], &counts());
        assert_eq!(summary.growth_rate, Decimal::ZERO);
    }

    #[test]
    fn sample_sales_respect_price_and_window() {
        let products = vec![product(1, "10.00"), product(2, "25.50")];
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(42);

        let sales = build_sample_sales(&products, 9, 50, now, &mut rng);
        assert_eq!(sales.len(), 50);

        for sale in &sales {
            assert_eq!(sale.store_id, 9);
            assert!((1..=5).contains(&sale.quantity_sold));
            assert!(sale.sale_date <= now);
            assert!(sale.sale_date >= now - Duration::days(30));

            let source = products.iter().find(|p| p.id == sale.product_id).unwrap();
            assert_eq!(sale.unit_price, source.price);
            assert_eq!(
                sale.total_amount,
                source.price * Decimal::from(sale.quantity_sold)
            );
        }
    }
}
