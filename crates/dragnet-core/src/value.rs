//! Tagged cell values.
//!
//! Result cells are decoded exactly once, at the cursor boundary, into this
//! enum. Everything downstream (projections, grouping keys) works off the
//! tag instead of re-inspecting driver payloads.

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A single decoded result cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// SQL NULL.
    Null,
    Bool(bool),
    /// Any integer width, widened to i64.
    Int(i64),
    Float(f64),
    Text(String),
    /// Raw binary payloads (BYTEA, or types the decoder does not know).
    Bytes(Vec<u8>),
    /// JSON/JSONB cells, kept structured.
    Json(serde_json::Value),
    /// Database arrays, with each member decoded recursively.
    Array(Vec<CellValue>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Text rendering used by tabular output and grouping keys.
    ///
    /// NULL renders as `<nil>` and binary payloads are decoded lossily,
    /// matching what the service has always emitted in non-JSON positions.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => "<nil>".to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            CellValue::Json(v) => v.to_string(),
            CellValue::Array(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_text()).collect();
                parts.join(";")
            }
        }
    }

    /// Structured rendering used by the JSON projections.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Bool(b) => serde_json::Value::Bool(*b),
            CellValue::Int(n) => serde_json::Value::from(*n),
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::Bytes(b) => {
                serde_json::Value::String(String::from_utf8_lossy(b).into_owned())
            }
            CellValue::Json(v) => v.clone(),
            CellValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(|i| i.to_json()).collect())
            }
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Int(n) => serializer.serialize_i64(*n),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Bytes(b) => serializer.serialize_str(&String::from_utf8_lossy(b)),
            CellValue::Json(v) => v.serialize(serializer),
            CellValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Text Rendering Tests =====

    #[test]
    fn null_renders_as_nil_marker() {
        assert_eq!(CellValue::Null.to_text(), "<nil>");
    }

    #[test]
    fn bytes_render_lossily() {
        let cell = CellValue::Bytes(vec![0x68, 0x69, 0xff]);
        assert_eq!(cell.to_text(), "hi\u{fffd}");
    }

    #[test]
    fn array_joins_members_with_semicolons() {
        let cell = CellValue::Array(vec![
            CellValue::Text("a".into()),
            CellValue::Int(2),
            CellValue::Null,
        ]);
        assert_eq!(cell.to_text(), "a;2;<nil>");
    }

    // ===== JSON Serialization Tests =====

    #[test]
    fn serializes_scalars_to_json() {
        let row = vec![
            CellValue::Null,
            CellValue::Bool(true),
            CellValue::Int(-3),
            CellValue::Text("x".into()),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[null,true,-3,"x"]"#);
    }

    #[test]
    fn serializes_nested_arrays() {
        let cell = CellValue::Array(vec![CellValue::Array(vec![CellValue::Int(1)])]);
        assert_eq!(serde_json::to_string(&cell).unwrap(), "[[1]]");
    }

    #[test]
    fn json_cells_pass_through() {
        let cell = CellValue::Json(serde_json::json!({"k": [1, 2]}));
        assert_eq!(serde_json::to_string(&cell).unwrap(), r#"{"k":[1,2]}"#);
        assert_eq!(cell.to_text(), r#"{"k":[1,2]}"#);
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert_eq!(CellValue::Float(f64::NAN).to_json(), serde_json::Value::Null);
    }
}
