//! Column decoding into backend-neutral cells.

use std::net::{Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use dragnet_core::CellValue;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use tokio_postgres::types::{FromSql, Kind, Type};
use uuid::Uuid;

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// Decodes any result column into a tagged [`CellValue`].
///
/// `accepts` returns true unconditionally so a single `try_get` call
/// works for every column the catalog can produce. Types without a
/// first-class decode fall back to the raw bytes rather than failing
/// the whole row.
pub struct PgCell(pub CellValue);

impl<'a> FromSql<'a> for PgCell {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, BoxError> {
        let value = match ty.name() {
            "bool" => CellValue::Bool(bool::from_sql(ty, raw)?),
            "char" => CellValue::Int(i8::from_sql(ty, raw)? as i64),
            "int2" => CellValue::Int(i16::from_sql(ty, raw)? as i64),
            "int4" => CellValue::Int(i32::from_sql(ty, raw)? as i64),
            "int8" => CellValue::Int(i64::from_sql(ty, raw)?),
            "oid" => CellValue::Int(u32::from_sql(ty, raw)? as i64),
            "float4" => CellValue::Float(f32::from_sql(ty, raw)? as f64),
            "float8" => CellValue::Float(f64::from_sql(ty, raw)?),
            "text" | "varchar" | "bpchar" | "name" | "unknown" => {
                CellValue::Text(String::from_sql(ty, raw)?)
            }
            "uuid" => CellValue::Text(Uuid::from_sql(ty, raw)?.to_string()),
            "timestamptz" => CellValue::Text(DateTime::<Utc>::from_sql(ty, raw)?.to_rfc3339()),
            "timestamp" => CellValue::Text(NaiveDateTime::from_sql(ty, raw)?.to_string()),
            "date" => CellValue::Text(NaiveDate::from_sql(ty, raw)?.to_string()),
            "time" => CellValue::Text(NaiveTime::from_sql(ty, raw)?.to_string()),
            "json" | "jsonb" => CellValue::Json(JsonValue::from_sql(ty, raw)?),
            "bytea" => CellValue::Bytes(Vec::<u8>::from_sql(ty, raw)?),
            "numeric" => CellValue::Text(Decimal::from_sql(ty, raw)?.to_string()),
            "inet" | "cidr" => CellValue::Text(decode_inet(raw)?),
            "macaddr" => CellValue::Text(decode_macaddr(raw)?),
            _ => match ty.kind() {
                Kind::Array(_) => {
                    let items = Vec::<Option<PgCell>>::from_sql(ty, raw)?;
                    CellValue::Array(
                        items
                            .into_iter()
                            .map(|item| item.map(|cell| cell.0).unwrap_or(CellValue::Null))
                            .collect(),
                    )
                }
                _ => CellValue::Bytes(raw.to_vec()),
            },
        };
        Ok(PgCell(value))
    }

    fn from_sql_null(_ty: &Type) -> Result<Self, BoxError> {
        Ok(PgCell(CellValue::Null))
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

/// Decodes the `inet`/`cidr` wire format: family byte, prefix bits,
/// cidr flag, address length, then the address bytes. `inet` suppresses
/// a full-length prefix the way the server's text output does, `cidr`
/// always carries one.
fn decode_inet(raw: &[u8]) -> Result<String, BoxError> {
    if raw.len() < 4 {
        return Err("inet payload too short".into());
    }
    let family = raw[0];
    let prefix = raw[1];
    let is_cidr = raw[2] != 0;
    let addr_len = raw[3] as usize;
    let addr = &raw[4..];
    if addr.len() != addr_len {
        return Err("inet payload length mismatch".into());
    }
    match (family, addr_len) {
        (2, 4) => {
            let ip = Ipv4Addr::new(addr[0], addr[1], addr[2], addr[3]);
            if is_cidr || prefix < 32 {
                Ok(format!("{ip}/{prefix}"))
            } else {
                Ok(ip.to_string())
            }
        }
        (3, 16) => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(addr);
            let ip = Ipv6Addr::from(octets);
            if is_cidr || prefix < 128 {
                Ok(format!("{ip}/{prefix}"))
            } else {
                Ok(ip.to_string())
            }
        }
        _ => Err(format!("unsupported inet family {family}").into()),
    }
}

/// `macaddr` on the wire is six raw bytes.
fn decode_macaddr(raw: &[u8]) -> Result<String, BoxError> {
    if raw.len() != 6 {
        return Err("macaddr payload length mismatch".into());
    }
    Ok(format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        raw[0], raw[1], raw[2], raw[3], raw[4], raw[5]
    ))
}
