//! Ordering clauses.
//!
//! An orderby descriptor is `direction:path`, direction first, matching
//! the filter grammar's operator-first shape.

use crate::error::{CompileError, CompileResult};
use crate::ident::IdentifierResolver;
use crate::plan::{OrderDirection, QueryPlan};

/// Add one ordering descriptor. Multiple orderings join with `, ` in
/// arrival order.
pub fn add_order(
    plan: &mut QueryPlan,
    resolver: &mut IdentifierResolver,
    descriptor: &str,
) -> CompileResult<()> {
    // A descriptor with no separator has no path and cannot name a valid
    // direction; a valid direction with nothing after the separator falls
    // out as an empty column path.
    let (direction_raw, path) = descriptor
        .split_once(':')
        .ok_or_else(|| CompileError::InvalidOrderDirection(descriptor.to_string()))?;
    let direction: OrderDirection = direction_raw.parse()?;
    let column = resolver.resolve_column(path)?;
    plan.order.push(format!("{} {}", column.sql, direction.as_sql()));
    Ok(())
}
