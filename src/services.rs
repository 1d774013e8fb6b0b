pub mod store_service;
pub use store_service::StoreService;
pub mod product_service;
pub use product_service::ProductService;
pub mod analytics_service;
pub use analytics_service::AnalyticsService;
