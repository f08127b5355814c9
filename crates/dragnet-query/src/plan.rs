//! The in-flight query plan.
//!
//! Clause builders append rendered fragments and bind values here; the
//! assembler glues the fragments into the final statement.

use std::str::FromStr;

use crate::error::CompileError;
use crate::ident::TableRef;

/// Join flavors the link grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT",
            JoinType::Right => "RIGHT",
            JoinType::Full => "FULL",
        }
    }
}

impl FromStr for JoinType {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inner" => Ok(JoinType::Inner),
            "left" => Ok(JoinType::Left),
            "right" => Ok(JoinType::Right),
            "full" => Ok(JoinType::Full),
            other => Err(CompileError::MalformedJoin(format!(
                "unknown join type '{other}'"
            ))),
        }
    }
}

/// Sort directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

impl FromStr for OrderDirection {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            other => Err(CompileError::InvalidOrderDirection(other.to_string())),
        }
    }
}

/// Fragments and bound values accumulated while compiling one request.
#[derive(Debug)]
pub struct QueryPlan {
    pub main: TableRef,
    pub selects: Vec<String>,
    pub joins: Vec<String>,
    pub filters: Vec<String>,
    pub order: Vec<String>,
    pub limit: Option<u64>,
    pub values: Vec<String>,
}

impl QueryPlan {
    pub fn new(main: TableRef) -> Self {
        Self {
            main,
            selects: Vec::new(),
            joins: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            values: Vec::new(),
        }
    }

    /// Bind a value and get its placeholder number. Numbers are allocated
    /// contiguously from 1 in bind order.
    pub fn bind(&mut self, value: String) -> usize {
        self.values.push(value);
        self.values.len()
    }
}
