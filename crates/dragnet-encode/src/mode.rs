//! Output mode selection.

use crate::error::{EncodeError, EncodeResult};

/// How a result set leaves the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// JSON array of row objects, streamed row by row.
    Flat,
    /// CSV with a header row, streamed row by row.
    Tabular,
    /// JSON object keyed by one or two grouping columns, materialized at
    /// end of traversal.
    Grouped { key: String, key2: Option<String> },
}

impl OutputMode {
    /// Derive the mode from the request's `format`/`groupby` parameters.
    ///
    /// `format=json` with a grouping column present is promoted to
    /// grouped output; `jsonGrouped` without one still groups, under the
    /// empty key, as the service always has.
    pub fn from_request(
        format: Option<&str>,
        group_by: Option<&str>,
        group_by2: Option<&str>,
    ) -> EncodeResult<Self> {
        let group = || Self::Grouped {
            key: group_by.unwrap_or_default().to_string(),
            key2: group_by2.map(str::to_string),
        };
        let format = format.unwrap_or("json");
        if format.eq_ignore_ascii_case("json") {
            Ok(match group_by {
                Some(_) => group(),
                None => Self::Flat,
            })
        } else if format.eq_ignore_ascii_case("jsonGrouped") {
            Ok(group())
        } else if format.eq_ignore_ascii_case("csv") {
            Ok(Self::Tabular)
        } else {
            Err(EncodeError::UnknownFormat(format.to_string()))
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputMode::Tabular => "text/csv",
            _ => "application/json",
        }
    }
}
