//! The operator table.
//!
//! Filter operators are scoped by the semantic type of the column they
//! apply to; a token that exists for text columns may mean nothing for
//! integers. The table is built once at startup and handed to the compiler
//! by reference, so lookups are read-only and allocation-free.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::{CompileError, CompileResult};

/// Semantic column types the operator table distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Text,
    Network,
    Integer,
    Identifier,
    Timestamp,
    Array,
}

impl SemanticType {
    /// Probe order for inferring the type of an undeclared column from its
    /// operator token: first scope that defines the token wins.
    pub const ALL: [SemanticType; 6] = [
        SemanticType::Text,
        SemanticType::Network,
        SemanticType::Integer,
        SemanticType::Identifier,
        SemanticType::Timestamp,
        SemanticType::Array,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SemanticType::Text => "text",
            SemanticType::Network => "network",
            SemanticType::Integer => "integer",
            SemanticType::Identifier => "identifier",
            SemanticType::Timestamp => "timestamp",
            SemanticType::Array => "array",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SemanticType {
    type Err = String;

    /// Accepts the canonical names plus the store-level type names the
    /// service has historically used in schema declarations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(SemanticType::Text),
            "network" | "cidr" | "inet" => Ok(SemanticType::Network),
            "integer" | "int" => Ok(SemanticType::Integer),
            "identifier" | "uuid" => Ok(SemanticType::Identifier),
            "timestamp" | "timestamptz" | "timezone" => Ok(SemanticType::Timestamp),
            "array" => Ok(SemanticType::Array),
            other => Err(format!("unknown semantic type '{other}'")),
        }
    }
}

/// One operator: its token, its SQL shape, and how many values it binds.
///
/// Templates carry a `{col}` slot plus `{a}` (and `{b}` for arity 2) value
/// slots; `render` substitutes the column SQL and `$N` placeholders.
#[derive(Debug, Clone)]
pub struct OperatorTemplate {
    pub token: &'static str,
    template: &'static str,
    pub arity: usize,
}

impl OperatorTemplate {
    pub fn render(&self, column: &str, placeholders: &[usize]) -> String {
        debug_assert_eq!(placeholders.len(), self.arity);
        let mut sql = self.template.replace("{col}", column);
        sql = sql.replace("{a}", &format!("${}", placeholders[0]));
        if self.arity == 2 {
            sql = sql.replace("{b}", &format!("${}", placeholders[1]));
        }
        sql
    }
}

fn op(token: &'static str, template: &'static str) -> OperatorTemplate {
    OperatorTemplate {
        token,
        template,
        arity: 1,
    }
}

fn op2(token: &'static str, template: &'static str) -> OperatorTemplate {
    OperatorTemplate {
        token,
        template,
        arity: 2,
    }
}

/// Read-only registry of operators, keyed by semantic type and token.
#[derive(Debug)]
pub struct OperatorTable {
    scopes: HashMap<SemanticType, Vec<OperatorTemplate>>,
}

impl OperatorTable {
    /// The built-in operator set.
    pub fn builtin() -> Self {
        let mut scopes = HashMap::new();
        scopes.insert(
            SemanticType::Text,
            vec![
                op("match", "{col} = {a}"),
                op("notmatch", "{col} != {a}"),
                op("imatch", "{col} ILIKE {a}"),
                op("startswith", "{col} LIKE {a} || '%'"),
                op("istartswith", "{col} ILIKE {a} || '%'"),
                op("endswith", "{col} LIKE '%' || {a}"),
                op("iendswith", "{col} ILIKE '%' || {a}"),
                op("contains", "{col} LIKE '%' || {a} || '%'"),
                op("icontains", "{col} ILIKE '%' || {a} || '%'"),
            ],
        );
        scopes.insert(
            SemanticType::Network,
            vec![
                op("match", "{col} = {a}"),
                op("neq", "{col} <> {a}"),
                op("contains", "{col} >> {a}"),
                op("contained_by", "{col} << {a}"),
                op("contains_or_eq", "{col} >>= {a}"),
                op("contained_by_or_eq", "{col} <<= {a}"),
            ],
        );
        scopes.insert(
            SemanticType::Integer,
            vec![
                op("match", "{col} = {a}"),
                op("neq", "{col} <> {a}"),
                op("gt", "{col} > {a}"),
                op("lt", "{col} < {a}"),
                op("gte", "{col} >= {a}"),
                op("lte", "{col} <= {a}"),
                op("in", "{col} IN ({a})"),
                op("notin", "{col} NOT IN ({a})"),
            ],
        );
        scopes.insert(
            SemanticType::Identifier,
            vec![op("match", "{col} = {a}"), op("notmatch", "{col} != {a}")],
        );
        scopes.insert(
            SemanticType::Timestamp,
            vec![
                op("match", "{col} = {a}"),
                op("notmatch", "{col} != {a}"),
                op("before", "{col} < {a}"),
                op("after", "{col} > {a}"),
                op("on_or_before", "{col} <= {a}"),
                op("on_or_after", "{col} >= {a}"),
                op2("between", "{col} BETWEEN {a} AND {b}"),
                op2("not_between", "{col} NOT BETWEEN {a} AND {b}"),
                op("in", "{col} IN ({a})"),
                op("notin", "{col} NOT IN ({a})"),
            ],
        );
        scopes.insert(
            SemanticType::Array,
            vec![
                op("array_contains", "{col} @> ARRAY[{a}]"),
                op("array_is_contained", "{col} <@ ARRAY[{a}]"),
                op("array_overlaps", "{col} && ARRAY[{a}]"),
                op("array_match", "{col} = ARRAY[{a}]"),
                op("array_notmatch", "{col} != ARRAY[{a}]"),
                op("array_gt", "{col} > ARRAY[{a}]"),
                op("array_lt", "{col} < ARRAY[{a}]"),
                op("array_gte", "{col} >= ARRAY[{a}]"),
                op("array_lte", "{col} <= ARRAY[{a}]"),
                op("array_has_element", "{a} = ANY({col})"),
            ],
        );
        Self { scopes }
    }

    /// Look up an operator for a column type. Token matching is
    /// case-insensitive. The two failure modes are reported separately:
    /// a token no scope knows, and a token that exists but is not allowed
    /// for this type.
    pub fn lookup(&self, ty: SemanticType, token: &str) -> CompileResult<&OperatorTemplate> {
        let wanted = token.to_ascii_lowercase();
        match self
            .scopes
            .get(&ty)
            .and_then(|ops| ops.iter().find(|op| op.token == wanted))
        {
            Some(op) => Ok(op),
            None if self.known(&wanted) => Err(CompileError::InvalidOperator(format!(
                "'{token}' is not allowed for {ty} columns"
            ))),
            None => Err(CompileError::InvalidOperator(format!(
                "unknown operator '{token}'"
            ))),
        }
    }

    /// Whether any scope defines the token.
    pub fn known(&self, token: &str) -> bool {
        let wanted = token.to_ascii_lowercase();
        self.scopes
            .values()
            .any(|ops| ops.iter().any(|op| op.token == wanted))
    }

    /// Infer the semantic type of an undeclared column from its operator
    /// token, probing scopes in [`SemanticType::ALL`] order.
    pub fn infer_type(&self, token: &str) -> Option<SemanticType> {
        let wanted = token.to_ascii_lowercase();
        SemanticType::ALL.into_iter().find(|ty| {
            self.scopes
                .get(ty)
                .is_some_and(|ops| ops.iter().any(|op| op.token == wanted))
        })
    }

    /// Allow-list view for introspection: type name to operator tokens in
    /// declaration order.
    pub fn allowed(&self) -> BTreeMap<&'static str, Vec<&'static str>> {
        self.scopes
            .iter()
            .map(|(ty, ops)| (ty.name(), ops.iter().map(|op| op.token).collect()))
            .collect()
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::builtin()
    }
}
