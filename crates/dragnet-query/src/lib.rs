//! Parameter-DSL to SQL compilation.
//!
//! Requests describe a query with a handful of repeatable parameters
//! (`dn`, `select`, `link`, `filter`, `orderby`, `limit`); this crate
//! turns them into exactly one parameterized statement plus the ordered
//! values that bind its placeholders. Compilation is deterministic, does
//! no I/O, and never lets request text into the SQL: identifiers are
//! quoted and aliased, values only ever bind to `$N`.
//!
//! The pipeline: [`RequestParams`] collects the multimap,
//! [`IdentifierResolver`] turns dotted names into aliases, the
//! [`OperatorTable`] maps (semantic type, token) to SQL templates, the
//! clause builders render fragments into a [`QueryPlan`], and
//! [`assemble`](assemble::assemble) glues the statement together and
//! audits that placeholders and values agree. [`QueryCatalog`] carries
//! the named canned statements that live alongside the DSL.

pub mod assemble;
pub mod catalog;
pub mod clause;
pub mod compile;
pub mod error;
pub mod ident;
pub mod ops;
pub mod params;
pub mod plan;
pub mod schema;

pub use assemble::{count_placeholders, CompiledQuery};
pub use catalog::{CatalogError, CatalogInfo, CatalogQuery, QueryCatalog};
pub use compile::QueryCompiler;
pub use error::{CompileError, CompileResult};
pub use ident::{ColumnRef, IdentifierResolver, TableRef};
pub use ops::{OperatorTable, OperatorTemplate, SemanticType};
pub use params::RequestParams;
pub use plan::{JoinType, OrderDirection, QueryPlan};
pub use schema::SchemaCatalog;
