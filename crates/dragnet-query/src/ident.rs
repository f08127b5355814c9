//! Dotted-name resolution.
//!
//! Tables live in the store under dotted names like `domain.arp`. SQL wants
//! a quoted identifier for those, and alias-qualified column references
//! everywhere else, so `domain.arp` becomes `"domain.arp" AS domain_arp`
//! and the path `domain.arp.ip` becomes `domain_arp.ip`. Resolution is
//! memoized per compilation: one dotted name always maps to one alias
//! within a plan.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CompileError, CompileResult};

static PLAIN_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier pattern"));

/// A resolved table reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Always-quoted identifier, embedded quotes doubled.
    pub quoted: String,
    /// Alias used to qualify columns, plain-identifier alphabet only.
    pub alias: String,
    bare: bool,
}

impl TableRef {
    /// Rendering for FROM position. A bare single-segment name stands on
    /// its own; everything else is quoted and aliased.
    pub fn from_clause(&self) -> String {
        if self.bare {
            self.alias.clone()
        } else {
            format!("{} AS {}", self.quoted, self.alias)
        }
    }

    /// Rendering for JOIN position, where the identifier is always quoted
    /// and the alias always stated.
    pub fn join_target(&self) -> String {
        format!("{} AS {}", self.quoted, self.alias)
    }
}

/// A resolved, alias-qualified column reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub sql: String,
}

/// Per-compilation resolver with an alias memo.
#[derive(Debug, Default)]
pub struct IdentifierResolver {
    aliases: HashMap<String, String>,
}

impl IdentifierResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a dotted table name.
    pub fn resolve_table(&mut self, name: &str) -> CompileResult<TableRef> {
        if name.is_empty() {
            return Err(CompileError::MalformedIdentifier(name.to_string()));
        }
        let alias = match self.aliases.get(name) {
            Some(alias) => alias.clone(),
            None => {
                let alias = derive_alias(name);
                self.aliases.insert(name.to_string(), alias.clone());
                alias
            }
        };
        let bare = !name.contains('.') && is_plain(name);
        Ok(TableRef {
            quoted: quote_ident(name),
            alias,
            bare,
        })
    }

    /// Resolve a column path, splitting at the last separator.
    ///
    /// `a.b.id` qualifies `id` with the alias of table `a.b`; a path with
    /// no separator refers to a column of the main table and passes
    /// through unqualified.
    pub fn resolve_column(&mut self, path: &str) -> CompileResult<ColumnRef> {
        if path.is_empty() {
            return Err(CompileError::MalformedIdentifier(path.to_string()));
        }
        match path.rsplit_once('.') {
            None => Ok(ColumnRef {
                sql: column_sql(path),
            }),
            Some((table, column)) => {
                if table.is_empty() || column.is_empty() {
                    return Err(CompileError::MalformedIdentifier(path.to_string()));
                }
                let table = self.resolve_table(table)?;
                Ok(ColumnRef {
                    sql: format!("{}.{}", table.alias, column_sql(column)),
                })
            }
        }
    }
}

fn is_plain(name: &str) -> bool {
    PLAIN_IDENT.is_match(name)
}

/// Double-quote an identifier, doubling embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Column names that are not plain identifiers get quoted too.
pub(crate) fn column_sql(name: &str) -> String {
    if is_plain(name) {
        name.to_string()
    } else {
        quote_ident(name)
    }
}

/// Underscore-join the segments, then clamp to the plain-identifier
/// alphabet so an alias can never smuggle SQL.
fn derive_alias(name: &str) -> String {
    let mut alias: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if alias
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
    {
        alias.insert(0, '_');
    }
    alias
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Table Resolution Tests =====

    #[test]
    fn single_segment_table_stays_bare() {
        let mut resolver = IdentifierResolver::new();
        let table = resolver.resolve_table("standard").unwrap();
        assert_eq!(table.from_clause(), "standard");
        assert_eq!(table.join_target(), "\"standard\" AS standard");
        assert_eq!(table.alias, "standard");
    }

    #[test]
    fn dotted_table_is_quoted_and_aliased() {
        let mut resolver = IdentifierResolver::new();
        let table = resolver.resolve_table("domain.arp").unwrap();
        assert_eq!(table.from_clause(), "\"domain.arp\" AS domain_arp");
    }

    #[test]
    fn three_segment_table_alias() {
        let mut resolver = IdentifierResolver::new();
        let table = resolver.resolve_table("a.b.c").unwrap();
        assert_eq!(table.from_clause(), "\"a.b.c\" AS a_b_c");
    }

    #[test]
    fn resolution_is_memoized() {
        let mut resolver = IdentifierResolver::new();
        let first = resolver.resolve_table("a.b").unwrap();
        let second = resolver.resolve_table("a.b").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_table_name_is_malformed() {
        let mut resolver = IdentifierResolver::new();
        assert!(matches!(
            resolver.resolve_table(""),
            Err(CompileError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut resolver = IdentifierResolver::new();
        let table = resolver.resolve_table("a\"b.c").unwrap();
        assert_eq!(table.quoted, "\"a\"\"b.c\"");
        assert_eq!(table.alias, "a_b_c");
    }

    #[test]
    fn hostile_single_segment_name_is_quoted() {
        let mut resolver = IdentifierResolver::new();
        let table = resolver.resolve_table("t;DROP TABLE x").unwrap();
        assert_eq!(table.from_clause(), "\"t;DROP TABLE x\" AS t_DROP_TABLE_x");
    }

    #[test]
    fn alias_never_starts_with_a_digit() {
        let mut resolver = IdentifierResolver::new();
        let table = resolver.resolve_table("9net.arp").unwrap();
        assert_eq!(table.alias, "_9net_arp");
    }

    // ===== Column Resolution Tests =====

    #[test]
    fn column_path_splits_at_last_separator() {
        let mut resolver = IdentifierResolver::new();
        let col = resolver.resolve_column("a.b.id").unwrap();
        assert_eq!(col.sql, "a_b.id");
    }

    #[test]
    fn bare_column_passes_through() {
        let mut resolver = IdentifierResolver::new();
        let col = resolver.resolve_column("name").unwrap();
        assert_eq!(col.sql, "name");
    }

    #[test]
    fn weird_column_name_is_quoted() {
        let mut resolver = IdentifierResolver::new();
        let col = resolver.resolve_column("a.b.ip address").unwrap();
        assert_eq!(col.sql, "a_b.\"ip address\"");
    }

    #[test]
    fn trailing_separator_is_malformed() {
        let mut resolver = IdentifierResolver::new();
        assert!(matches!(
            resolver.resolve_column("a.b."),
            Err(CompileError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn column_shares_alias_with_table() {
        let mut resolver = IdentifierResolver::new();
        let table = resolver.resolve_table("a.b").unwrap();
        let col = resolver.resolve_column("a.b.id").unwrap();
        assert!(col.sql.starts_with(&table.alias));
    }
}
