//! Statement assembly and the placeholder audit.

use std::collections::BTreeSet;

use crate::error::{CompileError, CompileResult};
use crate::plan::QueryPlan;

/// A fully compiled statement: SQL text plus the ordered values that bind
/// `$1..$N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub sql: String,
    pub values: Vec<String>,
}

/// Glue the plan's fragments into the final statement and audit the
/// placeholders against the value list.
pub fn assemble(plan: QueryPlan) -> CompileResult<CompiledQuery> {
    let mut sql = String::from("SELECT ");
    if plan.selects.is_empty() {
        sql.push('*');
    } else {
        sql.push_str(&plan.selects.join(", "));
    }
    sql.push_str(" FROM ");
    sql.push_str(&plan.main.from_clause());
    for join in &plan.joins {
        sql.push(' ');
        sql.push_str(join);
    }
    if !plan.filters.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&plan.filters.join(" AND "));
    }
    if !plan.order.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&plan.order.join(", "));
    }
    if let Some(n) = plan.limit {
        sql.push_str(" LIMIT ");
        sql.push_str(&n.to_string());
    }

    audit_placeholders(&sql, plan.values.len())?;
    Ok(CompiledQuery {
        sql,
        values: plan.values,
    })
}

/// Distinct `$N` placeholders in a statement. Repeated references to the
/// same number count once.
pub fn count_placeholders(sql: &str) -> usize {
    placeholder_set(sql).len()
}

fn placeholder_set(sql: &str) -> BTreeSet<usize> {
    let mut set = BTreeSet::new();
    let bytes = sql.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end > start {
                if let Ok(n) = sql[start..end].parse::<usize>() {
                    set.insert(n);
                }
            }
            i = end;
        } else {
            i += 1;
        }
    }
    set
}

/// The statement and its value list must agree exactly: placeholders
/// numbered contiguously from one, one value per placeholder.
fn audit_placeholders(sql: &str, values: usize) -> CompileResult<()> {
    let set = placeholder_set(sql);
    let distinct = set.len();
    let max = set.iter().next_back().copied().unwrap_or(0);
    let contiguous = set.iter().next().copied().unwrap_or(1) == 1;
    if distinct != values || max != values || !contiguous {
        return Err(CompileError::PlaceholderMismatch {
            distinct,
            max,
            values,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::IdentifierResolver;
    use test_case::test_case;

    // ===== Placeholder Counting Tests =====

    #[test_case("SELECT * FROM t", 0; "no placeholders")]
    #[test_case("SELECT * FROM t WHERE a = $1", 1; "single")]
    #[test_case("SELECT * FROM t WHERE a = $1 AND b = $2", 2; "two distinct")]
    #[test_case("SELECT $1 AS x FROM t WHERE a = $1", 1; "repeated counts once")]
    #[test_case("SELECT * FROM t WHERE a BETWEEN $1 AND $2 OR b = $3", 3; "mixed")]
    #[test_case("SELECT price, 'cost$' FROM t", 0; "dollar without digits ignored")]
    #[test_case("SELECT '$100' FROM t", 1; "dollar amount in a literal still counts")]
    #[test_case("SELECT * FROM t WHERE a = $12", 1; "multi-digit")]
    fn counts_distinct_placeholders(sql: &str, expected: usize) {
        assert_eq!(count_placeholders(sql), expected);
    }

    // ===== Audit Tests =====

    #[test]
    fn audit_accepts_contiguous_placeholders() {
        assert!(audit_placeholders("WHERE a = $1 AND b = $2", 2).is_ok());
        assert!(audit_placeholders("SELECT 1", 0).is_ok());
    }

    #[test]
    fn audit_rejects_value_count_mismatch() {
        assert!(matches!(
            audit_placeholders("WHERE a = $1", 2),
            Err(CompileError::PlaceholderMismatch { .. })
        ));
    }

    #[test]
    fn audit_rejects_gapped_numbering() {
        assert!(matches!(
            audit_placeholders("WHERE a = $1 AND b = $3", 2),
            Err(CompileError::PlaceholderMismatch { .. })
        ));
    }

    #[test]
    fn audit_rejects_numbering_from_zero() {
        assert!(matches!(
            audit_placeholders("WHERE a = $0 AND b = $1", 2),
            Err(CompileError::PlaceholderMismatch { .. })
        ));
    }

    // ===== Assembly Tests =====

    #[test]
    fn assembles_bare_table_scan() {
        let mut resolver = IdentifierResolver::new();
        let plan = QueryPlan::new(resolver.resolve_table("a.b").unwrap());
        let compiled = assemble(plan).unwrap();
        assert_eq!(compiled.sql, "SELECT * FROM \"a.b\" AS a_b");
        assert!(compiled.values.is_empty());
    }

    #[test]
    fn clause_order_is_fixed() {
        let mut resolver = IdentifierResolver::new();
        let mut plan = QueryPlan::new(resolver.resolve_table("t").unwrap());
        plan.selects.push("t.a".into());
        plan.joins.push("INNER JOIN \"u\" AS u ON t.id = u.tid".into());
        plan.filters.push("t.a = $1".into());
        plan.values.push("x".into());
        plan.order.push("t.a ASC".into());
        plan.limit = Some(5);
        let compiled = assemble(plan).unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT t.a FROM t INNER JOIN \"u\" AS u ON t.id = u.tid WHERE t.a = $1 ORDER BY t.a ASC LIMIT 5"
        );
    }
}
