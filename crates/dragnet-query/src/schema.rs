//! Declared column types.
//!
//! Deployments declare the semantic type of the columns they care about so
//! the operator allow-lists bite. Lookups try the full dotted path first
//! (`domain.arp.ip`), then fall back to a bare column-name rule (`ip`)
//! that applies across tables. Undeclared columns are typed by operator
//! inference in the compiler.

use std::collections::HashMap;

use crate::ops::SemanticType;

/// Map of declared column semantic types.
#[derive(Debug, Default, Clone)]
pub struct SchemaCatalog {
    by_path: HashMap<String, SemanticType>,
    by_column: HashMap<String, SemanticType>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare one column. A dotted key declares that exact path; a bare
    /// key declares a fallback for every column of that name.
    pub fn declare(&mut self, key: &str, ty: SemanticType) {
        if key.contains('.') {
            self.by_path.insert(key.to_string(), ty);
        } else {
            self.by_column.insert(key.to_string(), ty);
        }
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, SemanticType)>,
    {
        let mut catalog = Self::new();
        for (key, ty) in entries {
            catalog.declare(&key, ty);
        }
        catalog
    }

    /// Look up the declared type for a filter path.
    pub fn lookup(&self, path: &str) -> Option<SemanticType> {
        if let Some(ty) = self.by_path.get(path) {
            return Some(*ty);
        }
        let column = match path.rsplit_once('.') {
            Some((_, column)) => column,
            None => path,
        };
        self.by_column.get(column).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty() && self.by_column.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_path_wins_over_column_fallback() {
        let mut schema = SchemaCatalog::new();
        schema.declare("ip", SemanticType::Text);
        schema.declare("domain.arp.ip", SemanticType::Network);
        assert_eq!(schema.lookup("domain.arp.ip"), Some(SemanticType::Network));
        assert_eq!(schema.lookup("other.ip"), Some(SemanticType::Text));
    }

    #[test]
    fn bare_column_rule_applies_everywhere() {
        let mut schema = SchemaCatalog::new();
        schema.declare("count", SemanticType::Integer);
        assert_eq!(schema.lookup("a.b.count"), Some(SemanticType::Integer));
        assert_eq!(schema.lookup("count"), Some(SemanticType::Integer));
    }

    #[test]
    fn undeclared_column_is_unknown() {
        let schema = SchemaCatalog::new();
        assert_eq!(schema.lookup("a.b.name"), None);
    }
}
