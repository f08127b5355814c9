//! Clause builders: one module per request parameter family.

pub mod filter;
pub mod join;
pub mod limit;
pub mod order;
pub mod select;

pub use filter::add_filter;
pub use join::add_link;
pub use limit::set_limit;
pub use order::add_order;
pub use select::add_select;
