//! Named canned queries.
//!
//! Alongside the compiled DSL the service ships a small set of
//! hand-written statements addressed by name, mostly schema
//! introspection: what tables exist, what columns they carry, which
//! columns could link to which. Each entry's parameter count is derived
//! by scanning its SQL for distinct `$N` placeholders, and path-supplied
//! arguments must match it exactly.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::assemble::{count_placeholders, CompiledQuery};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown query '{0}'")]
    UnknownQuery(String),

    #[error("Query '{name}' expects {expected} arguments, {got} supplied")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// One canned query.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub name: String,
    pub description: String,
    pub sql: String,
    pub params: usize,
}

/// Listing entry served by the catalog route.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogInfo {
    #[serde(rename = "api")]
    pub name: String,
    pub num_params: usize,
    pub example: String,
}

/// Read-only registry of canned queries.
#[derive(Debug, Default)]
pub struct QueryCatalog {
    entries: BTreeMap<String, CatalogQuery>,
}

impl QueryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The introspection set the service has always shipped.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(
            "list",
            "table names visible in the public schema",
            "SELECT table_name AS nodes FROM information_schema.tables WHERE table_schema = 'public'",
        );
        catalog.register(
            "columns",
            "every column name with its data type",
            "SELECT column_name, data_type FROM information_schema.columns",
        );
        catalog.register(
            "list-nodes",
            "tables with their columns, column types, and live row counts",
            r#"SELECT
    t.table_name AS node,
    c.column_name AS field,
    c.data_type AS field_type,
    coalesce(sut.n_live_tup, 0)::integer AS row_count
FROM information_schema.tables AS t
JOIN information_schema.columns AS c
    ON t.table_name = c.table_name AND t.table_schema = c.table_schema
LEFT JOIN pg_stat_user_tables sut ON t.table_name = sut.relname
WHERE t.table_schema = 'public'
ORDER BY t.table_name, c.ordinal_position"#,
        );
        catalog.register(
            "link-tips",
            "columns of one table paired with same-typed columns elsewhere",
            r#"WITH main_table_columns AS (
    SELECT column_name, data_type
    FROM information_schema.columns
    WHERE table_name = $1 AND table_schema = 'public'
)
SELECT
    $1 AS main_table,
    mtc.column_name AS main_column,
    ic.table_name AS other_table,
    ic.column_name AS other_column,
    ic.data_type
FROM main_table_columns mtc
JOIN information_schema.columns ic ON mtc.data_type = ic.data_type
WHERE ic.table_name != $1 AND ic.table_schema = 'public'
ORDER BY
    CASE WHEN ic.data_type = 'text' THEN 1 ELSE 0 END,
    mtc.column_name,
    ic.table_name"#,
        );
        catalog.register(
            "link-possible",
            "columns elsewhere that share a type with one named column",
            r#"WITH specified_column AS (
    SELECT data_type
    FROM information_schema.columns
    WHERE table_name = $1 AND column_name = $2 AND table_schema = 'public'
)
SELECT
    ic.table_name AS node,
    ic.column_name AS field
FROM information_schema.columns ic, specified_column sc
WHERE
    ic.data_type = sc.data_type AND
    (ic.table_name != $1 OR ic.column_name != $2) AND
    ic.table_schema = 'public'
ORDER BY ic.table_name, ic.column_name"#,
        );
        catalog
    }

    /// Register a canned query; the parameter count comes from the SQL.
    pub fn register(&mut self, name: &str, description: &str, sql: &str) {
        self.entries.insert(
            name.to_string(),
            CatalogQuery {
                name: name.to_string(),
                description: description.to_string(),
                sql: sql.to_string(),
                params: count_placeholders(sql),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&CatalogQuery> {
        self.entries.get(name)
    }

    /// Bind path-supplied arguments to a canned query.
    pub fn bind(&self, name: &str, args: &[String]) -> Result<CompiledQuery, CatalogError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| CatalogError::UnknownQuery(name.to_string()))?;
        if args.len() != entry.params {
            return Err(CatalogError::ArgumentCount {
                name: name.to_string(),
                expected: entry.params,
                got: args.len(),
            });
        }
        Ok(CompiledQuery {
            sql: entry.sql.clone(),
            values: args.to_vec(),
        })
    }

    /// Listing with example paths, in name order.
    pub fn listing(&self, base_path: &str) -> Vec<CatalogInfo> {
        self.entries
            .values()
            .map(|entry| {
                let mut example = format!("{}/{}", base_path, entry.name);
                for i in 1..=entry.params {
                    example.push_str(&format!("/{{param{i}}}"));
                }
                CatalogInfo {
                    name: entry.name.clone(),
                    num_params: entry.params,
                    example,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_parameter_counts_come_from_sql() {
        let catalog = QueryCatalog::builtin();
        assert_eq!(catalog.get("list").unwrap().params, 0);
        assert_eq!(catalog.get("link-tips").unwrap().params, 1);
        assert_eq!(catalog.get("link-possible").unwrap().params, 2);
    }

    #[test]
    fn bind_checks_argument_count() {
        let catalog = QueryCatalog::builtin();
        let bound = catalog
            .bind("link-possible", &["standard".to_string(), "id".to_string()])
            .unwrap();
        assert_eq!(bound.values.len(), 2);

        assert!(matches!(
            catalog.bind("link-possible", &["standard".to_string()]),
            Err(CatalogError::ArgumentCount {
                expected: 2,
                got: 1,
                ..
            })
        ));
        assert!(matches!(
            catalog.bind("no-such-query", &[]),
            Err(CatalogError::UnknownQuery(_))
        ));
    }

    #[test]
    fn listing_builds_example_paths() {
        let catalog = QueryCatalog::builtin();
        let listing = catalog.listing("/api/catalog");
        let tips = listing.iter().find(|e| e.name == "link-tips").unwrap();
        assert_eq!(tips.example, "/api/catalog/link-tips/{param1}");
        let list = listing.iter().find(|e| e.name == "list").unwrap();
        assert_eq!(list.example, "/api/catalog/list");
    }

    #[test]
    fn listing_is_sorted_by_name() {
        let catalog = QueryCatalog::builtin();
        let names: Vec<String> = catalog
            .listing("/api/catalog")
            .into_iter()
            .map(|e| e.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
