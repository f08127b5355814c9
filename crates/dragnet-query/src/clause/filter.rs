//! Filter clauses.
//!
//! A filter descriptor is `operator:path:value`, split at the first two
//! separators so the value keeps any `:` it contains (timestamps, MACs).
//! Values are bound to placeholders, never spliced into the SQL text.

use crate::error::{CompileError, CompileResult};
use crate::ident::IdentifierResolver;
use crate::ops::OperatorTable;
use crate::plan::QueryPlan;
use crate::schema::SchemaCatalog;

/// Add one filter descriptor to the plan. Multiple filters AND together
/// in arrival order.
pub fn add_filter(
    plan: &mut QueryPlan,
    resolver: &mut IdentifierResolver,
    operators: &OperatorTable,
    schema: &SchemaCatalog,
    descriptor: &str,
) -> CompileResult<()> {
    let mut parts = descriptor.splitn(3, ':');
    let (token, path, value) = match (parts.next(), parts.next(), parts.next()) {
        (Some(token), Some(path), Some(value)) => (token, path, value),
        _ => {
            return Err(CompileError::MalformedFilter(format!(
                "'{descriptor}' must be operator:path:value"
            )))
        }
    };

    let column = resolver.resolve_column(path)?;
    let ty = match schema.lookup(path) {
        Some(ty) => ty,
        None => operators.infer_type(token).ok_or_else(|| {
            CompileError::InvalidOperator(format!("unknown operator '{token}'"))
        })?,
    };
    let op = operators.lookup(ty, token)?;

    let sql = match op.arity {
        2 => {
            let (first, second) = value.split_once(',').ok_or_else(|| {
                CompileError::MalformedFilter(format!(
                    "operator '{token}' needs two comma-separated values"
                ))
            })?;
            let a = plan.bind(first.to_string());
            let b = plan.bind(second.to_string());
            op.render(&column.sql, &[a, b])
        }
        _ => {
            let a = plan.bind(value.to_string());
            op.render(&column.sql, &[a])
        }
    };
    plan.filters.push(sql);
    Ok(())
}
