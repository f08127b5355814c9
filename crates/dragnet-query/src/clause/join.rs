//! Join clauses from link descriptors.
//!
//! A link is a `:`-separated descriptor with one, two, or three segments:
//!
//! - `other.col` joins the main table's `id` to that side, INNER.
//! - `left.col:right.col` joins two explicit sides, INNER.
//! - `type:left.col:right.col` also declares the join type.

use crate::error::{CompileError, CompileResult};
use crate::ident::{IdentifierResolver, TableRef};
use crate::plan::{JoinType, QueryPlan};

/// Add one link descriptor to the plan.
pub fn add_link(
    plan: &mut QueryPlan,
    resolver: &mut IdentifierResolver,
    descriptor: &str,
) -> CompileResult<()> {
    let parts: Vec<&str> = descriptor.split(':').collect();
    let (join_type, left_raw, right_raw) = match parts.as_slice() {
        [right] => (JoinType::Inner, None, *right),
        [left, right] => (JoinType::Inner, Some(*left), *right),
        [jt, left, right] => (jt.parse::<JoinType>()?, Some(*left), *right),
        _ => {
            return Err(CompileError::MalformedJoin(format!(
                "'{descriptor}' has too many segments"
            )))
        }
    };

    let (right_table, right_column) = split_side(resolver, right_raw)?;
    let left_sql = match left_raw {
        Some(raw) => {
            let (table, column) = split_side(resolver, raw)?;
            format!("{}.{}", table.alias, column)
        }
        // Single-segment form: anchor on the main table's id column.
        None => format!("{}.id", plan.main.alias),
    };

    plan.joins.push(format!(
        "{} JOIN {} ON {} = {}.{}",
        join_type.as_sql(),
        right_table.join_target(),
        left_sql,
        right_table.alias,
        right_column,
    ));
    Ok(())
}

/// Split one side of a link into its table and column. Both pieces are
/// required; the table may itself be dotted.
fn split_side(
    resolver: &mut IdentifierResolver,
    side: &str,
) -> CompileResult<(TableRef, String)> {
    let (table_raw, column) = side.rsplit_once('.').ok_or_else(|| {
        CompileError::MalformedJoin(format!("link side '{side}' must be a table.column path"))
    })?;
    if table_raw.is_empty() || column.is_empty() {
        return Err(CompileError::MalformedJoin(format!(
            "link side '{side}' must be a table.column path"
        )));
    }
    let table = resolver.resolve_table(table_raw)?;
    Ok((table, crate::ident::column_sql(column)))
}
