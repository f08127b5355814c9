//! Text-format parameter binding.

use bytes::BytesMut;
use tokio_postgres::types::{to_sql_checked, Format, IsNull, ToSql, Type};

/// A bound value sent to the server in the text format.
///
/// The query compiler produces opaque strings for every placeholder, and
/// the operator templates are written against whatever type the server
/// infers for each `$N`. Encoding the raw string as text hands coercion
/// to the server's input function, so `'192.168.0.0/24'` binds cleanly
/// against an `inet` column and `'42'` against a `bigint` one without
/// the client knowing either type.
#[derive(Debug, Clone)]
pub struct TextParam(pub String);

impl ToSql for TextParam {
    fn to_sql(
        &self,
        _ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        out.extend_from_slice(self.0.as_bytes());
        Ok(IsNull::No)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn encode_format(&self, _ty: &Type) -> Format {
        Format::Text
    }

    to_sql_checked!();
}
