//! The compiler: request parameters in, one parameterized statement out.

use std::sync::Arc;

use crate::assemble::{self, CompiledQuery};
use crate::clause;
use crate::error::CompileResult;
use crate::ident::IdentifierResolver;
use crate::ops::OperatorTable;
use crate::params::RequestParams;
use crate::plan::QueryPlan;
use crate::schema::SchemaCatalog;

/// Compiles [`RequestParams`] into a [`CompiledQuery`].
///
/// Holds the process-wide operator table and schema declarations;
/// compilation itself is pure and touches no I/O, so one compiler is
/// shared across requests.
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    operators: Arc<OperatorTable>,
    schema: Arc<SchemaCatalog>,
}

impl QueryCompiler {
    pub fn new(operators: Arc<OperatorTable>, schema: Arc<SchemaCatalog>) -> Self {
        Self { operators, schema }
    }

    /// Compiler over the built-in operator set with no schema
    /// declarations.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(OperatorTable::builtin()),
            Arc::new(SchemaCatalog::new()),
        )
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    pub fn compile(&self, request: &RequestParams) -> CompileResult<CompiledQuery> {
        let mut resolver = IdentifierResolver::new();
        let main = resolver.resolve_table(&request.table)?;
        let mut plan = QueryPlan::new(main);

        for path in &request.selects {
            clause::add_select(&mut plan, &mut resolver, path)?;
        }
        for link in &request.links {
            clause::add_link(&mut plan, &mut resolver, link)?;
        }
        for descriptor in &request.filters {
            clause::add_filter(&mut plan, &mut resolver, &self.operators, &self.schema, descriptor)?;
        }
        for descriptor in &request.orderbys {
            clause::add_order(&mut plan, &mut resolver, descriptor)?;
        }
        if let Some(raw) = &request.limit {
            clause::set_limit(&mut plan, raw)?;
        }

        let compiled = assemble::assemble(plan)?;
        tracing::debug!(sql = %compiled.sql, values = compiled.values.len(), "compiled query");
        Ok(compiled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use crate::ops::SemanticType;

    fn compiler() -> QueryCompiler {
        QueryCompiler::with_defaults()
    }

    fn compiler_with_schema(entries: &[(&str, SemanticType)]) -> QueryCompiler {
        let schema = SchemaCatalog::from_entries(
            entries.iter().map(|(k, ty)| (k.to_string(), *ty)),
        );
        QueryCompiler::new(Arc::new(OperatorTable::builtin()), Arc::new(schema))
    }

    fn request(raw: &[(&str, &str)]) -> RequestParams {
        let pairs: Vec<(String, String)> = raw
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RequestParams::from_pairs(&pairs)
    }

    // ===== Whole-Statement Compilation Tests =====

    #[test]
    fn bare_table_scan() {
        let compiled = compiler().compile(&request(&[("dn", "a.b")])).unwrap();
        assert_eq!(compiled.sql, "SELECT * FROM \"a.b\" AS a_b");
        assert!(compiled.values.is_empty());
    }

    #[test]
    fn single_segment_table_scan() {
        let compiled = compiler().compile(&request(&[("dn", "standard")])).unwrap();
        assert_eq!(compiled.sql, "SELECT * FROM standard");
    }

    #[test]
    fn filter_binds_first_placeholder() {
        let compiled = compiler()
            .compile(&request(&[("dn", "a.b"), ("filter", "match:a.b.name:John")]))
            .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT * FROM \"a.b\" AS a_b WHERE a_b.name = $1"
        );
        assert_eq!(compiled.values, vec!["John".to_string()]);
    }

    #[test]
    fn link_joins_on_explicit_sides() {
        let compiled = compiler()
            .compile(&request(&[("dn", "a.b"), ("link", "a.b.x_id:c.id")]))
            .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT * FROM \"a.b\" AS a_b INNER JOIN \"c\" AS c ON a_b.x_id = c.id"
        );
    }

    #[test]
    fn between_binds_two_values() {
        let compiled = compiler()
            .compile(&request(&[("dn", "a.b"), ("filter", "between:a.b.when:X,Y")]))
            .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT * FROM \"a.b\" AS a_b WHERE a_b.when BETWEEN $1 AND $2"
        );
        assert_eq!(compiled.values, vec!["X".to_string(), "Y".to_string()]);
    }

    #[test]
    fn orderby_renders_direction_after_column() {
        let compiled = compiler()
            .compile(&request(&[("dn", "a.b"), ("orderby", "desc:a.b.name")]))
            .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT * FROM \"a.b\" AS a_b ORDER BY a_b.name DESC"
        );
    }

    #[test]
    fn limit_is_validated_then_inlined() {
        let compiled = compiler()
            .compile(&request(&[("dn", "a.b"), ("limit", "10")]))
            .unwrap();
        assert_eq!(compiled.sql, "SELECT * FROM \"a.b\" AS a_b LIMIT 10");

        let err = compiler()
            .compile(&request(&[("dn", "a.b"), ("limit", "abc")]))
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidLimit(_)));
    }

    #[test]
    fn everything_at_once_in_clause_order() {
        let compiled = compiler()
            .compile(&request(&[
                ("dn", "domain.arp"),
                ("select", "domain.arp.ip"),
                ("select", "standard.name"),
                ("link", "domain.arp.device_id:standard.id"),
                ("filter", "imatch:standard.name:%router%"),
                ("filter", "gt:domain.arp.count:10"),
                ("orderby", "asc:standard.name"),
                ("limit", "100"),
            ]))
            .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT domain_arp.ip, standard.name FROM \"domain.arp\" AS domain_arp \
             INNER JOIN \"standard\" AS standard ON domain_arp.device_id = standard.id \
             WHERE standard.name ILIKE $1 AND domain_arp.count > $2 \
             ORDER BY standard.name ASC LIMIT 100"
        );
        assert_eq!(
            compiled.values,
            vec!["%router%".to_string(), "10".to_string()]
        );
    }

    #[test]
    fn placeholders_stay_contiguous_across_filters() {
        let compiled = compiler()
            .compile(&request(&[
                ("dn", "t"),
                ("filter", "between:t.when:A,B"),
                ("filter", "match:t.name:x"),
            ]))
            .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT * FROM t WHERE t.when BETWEEN $1 AND $2 AND t.name = $3"
        );
        assert_eq!(compiled.values.len(), 3);
    }

    // ===== Type Enforcement Tests =====

    #[test]
    fn integer_column_accepts_comparison_and_rejects_text_ops() {
        let compiler = compiler_with_schema(&[("a.b.count", SemanticType::Integer)]);
        let compiled = compiler
            .compile(&request(&[("dn", "a.b"), ("filter", "gt:a.b.count:10")]))
            .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT * FROM \"a.b\" AS a_b WHERE a_b.count > $1"
        );
        assert_eq!(compiled.values, vec!["10".to_string()]);

        let err = compiler
            .compile(&request(&[("dn", "a.b"), ("filter", "startswith:a.b.count:x")]))
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidOperator(_)));
    }

    #[test]
    fn network_column_uses_containment_operators() {
        let compiler = compiler_with_schema(&[("ip_address", SemanticType::Network)]);
        let compiled = compiler
            .compile(&request(&[
                ("dn", "domain.arp"),
                ("filter", "contained_by_or_eq:domain.arp.ip_address:10.0.0.0/8"),
            ]))
            .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT * FROM \"domain.arp\" AS domain_arp WHERE domain_arp.ip_address <<= $1"
        );
        assert_eq!(compiled.values, vec!["10.0.0.0/8".to_string()]);
    }

    // ===== Error Path Tests =====

    #[test]
    fn missing_table_is_malformed_identifier() {
        let err = compiler().compile(&request(&[])).unwrap_err();
        assert!(matches!(err, CompileError::MalformedIdentifier(_)));
    }

    #[test]
    fn malformed_descriptors_name_their_kind() {
        let c = compiler();
        assert!(matches!(
            c.compile(&request(&[("dn", "t"), ("link", "nodots")])),
            Err(CompileError::MalformedJoin(_))
        ));
        assert!(matches!(
            c.compile(&request(&[("dn", "t"), ("filter", "justoneword")])),
            Err(CompileError::MalformedFilter(_))
        ));
        assert!(matches!(
            c.compile(&request(&[("dn", "t"), ("orderby", "sideways:t.a")])),
            Err(CompileError::InvalidOrderDirection(_))
        ));
    }

    // ===== Injection Resistance Tests =====

    #[test]
    fn hostile_inputs_stay_out_of_sql_text() {
        let compiled = compiler()
            .compile(&request(&[
                ("dn", "t"),
                ("filter", "match:t.name:Robert'); DROP TABLE students;--"),
            ]))
            .unwrap();
        assert!(!compiled.sql.contains("DROP"));
        assert_eq!(
            compiled.values,
            vec!["Robert'); DROP TABLE students;--".to_string()]
        );

        let compiled = compiler()
            .compile(&request(&[("dn", "t\"; DROP TABLE x; --")]))
            .unwrap();
        assert_eq!(
            compiled.sql,
            "SELECT * FROM \"t\"\"; DROP TABLE x; --\" AS t___DROP_TABLE_x____"
        );
    }
}
