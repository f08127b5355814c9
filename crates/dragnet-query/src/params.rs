//! Request parameter collection.
//!
//! The transport hands over an ordered list of key/value pairs (repeated
//! keys allowed); this module sorts them into the DSL's slots. Unknown
//! keys are ignored so transports can carry their own parameters
//! alongside the DSL.

/// The parsed parameter multimap, ready for compilation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestParams {
    /// Main table dotted name (`dn`).
    pub table: String,
    /// Projected column paths (`select`, `field`).
    pub selects: Vec<String>,
    /// Join descriptors (`link`).
    pub links: Vec<String>,
    /// Filter descriptors (`filter`).
    pub filters: Vec<String>,
    /// Ordering descriptors (`orderby`).
    pub orderbys: Vec<String>,
    /// Raw limit literal (`limit`).
    pub limit: Option<String>,
    /// Output format token (`format`).
    pub format: Option<String>,
    /// First grouping column (`groupby`).
    pub group_by: Option<String>,
    /// Second grouping column (`groupby2`).
    pub group_by2: Option<String>,
}

impl RequestParams {
    /// Sort raw pairs into DSL slots. Empty values for scalar keys count
    /// as absent; for repeatable keys the empty descriptor is kept and
    /// rejected later with a proper error.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "dn" => params.table = value.clone(),
                "select" | "field" => params.selects.push(value.clone()),
                "link" => params.links.push(value.clone()),
                "filter" => params.filters.push(value.clone()),
                "orderby" => params.orderbys.push(value.clone()),
                "limit" => params.limit = non_empty(value),
                "format" => params.format = non_empty(value),
                "groupby" => params.group_by = non_empty(value),
                "groupby2" => params.group_by2 = non_empty(value),
                _ => {}
            }
        }
        params
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
