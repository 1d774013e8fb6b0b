pub mod store;
pub mod product;
pub mod sales;
pub mod analytics;
