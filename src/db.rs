pub mod store_repo;
pub use store_repo::StoreRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod analytics_repo;
pub use analytics_repo::AnalyticsRepository;
