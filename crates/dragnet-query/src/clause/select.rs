//! Projection clauses.

use crate::error::CompileResult;
use crate::ident::IdentifierResolver;
use crate::plan::QueryPlan;

/// Add one projected column path. No paths at all renders as `*` in the
/// assembler.
pub fn add_select(
    plan: &mut QueryPlan,
    resolver: &mut IdentifierResolver,
    path: &str,
) -> CompileResult<()> {
    let column = resolver.resolve_column(path)?;
    plan.selects.push(column.sql);
    Ok(())
}
