mod catalog;
mod health;
mod meta;
mod query;

pub use catalog::catalog_routes;
pub use health::health_routes;
pub use meta::options_routes;
pub use query::query_routes;
