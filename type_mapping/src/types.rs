//! Driver-side value definitions
//!
//! This module provides the untyped column value a database driver hands
//! to a scanner, and the value a scanner hands back for parameter binding.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sql;

/// Single PostgreSQL column value as delivered by (or bound to) a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PostgresValue {
    Text(String),
    Integer(i32),
    BigInt(i64),
    SmallInt(i16),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Timestamp(chrono::DateTime<chrono::Utc>),
    Decimal(String), // Store as string to preserve precision
    Json(serde_json::Value),
    Array(Vec<PostgresValue>),
    Null,
}

impl PostgresValue {
    /// SQL NULL sentinel check
    pub fn is_null(&self) -> bool {
        matches!(self, PostgresValue::Null)
    }

    /// PostgreSQL type name of the value, used when reporting scan failures
    pub fn pg_type_name(&self) -> &'static str {
        match self {
            PostgresValue::Text(_) => sql::VARCHAR,
            PostgresValue::Integer(_) => sql::INTEGER,
            PostgresValue::BigInt(_) => sql::BIGINT,
            PostgresValue::SmallInt(_) => sql::SMALLINT,
            PostgresValue::Float(_) => sql::DOUBLE_PRECISION,
            PostgresValue::Boolean(_) => sql::BOOLEAN,
            PostgresValue::Uuid(_) => sql::UUID,
            PostgresValue::Timestamp(_) => sql::TIMESTAMPTZ,
            PostgresValue::Decimal(_) => sql::NUMERIC,
            PostgresValue::Json(_) => sql::JSONB,
            PostgresValue::Array(_) => sql::ARRAY,
            PostgresValue::Null => sql::NULL,
        }
    }
}

/// Convert basic Rust types to PostgresValue
impl From<String> for PostgresValue {
    fn from(val: String) -> Self {
        PostgresValue::Text(val)
    }
}

impl From<&str> for PostgresValue {
    fn from(val: &str) -> Self {
        PostgresValue::Text(val.to_string())
    }
}

impl From<i16> for PostgresValue {
    fn from(val: i16) -> Self {
        PostgresValue::SmallInt(val)
    }
}

impl From<i32> for PostgresValue {
    fn from(val: i32) -> Self {
        PostgresValue::Integer(val)
    }
}

impl From<i64> for PostgresValue {
    fn from(val: i64) -> Self {
        PostgresValue::BigInt(val)
    }
}

impl From<f64> for PostgresValue {
    fn from(val: f64) -> Self {
        PostgresValue::Float(val)
    }
}

impl From<bool> for PostgresValue {
    fn from(val: bool) -> Self {
        PostgresValue::Boolean(val)
    }
}

impl From<Uuid> for PostgresValue {
    fn from(val: Uuid) -> Self {
        PostgresValue::Uuid(val)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for PostgresValue {
    fn from(val: chrono::DateTime<chrono::Utc>) -> Self {
        PostgresValue::Timestamp(val)
    }
}

impl From<serde_json::Value> for PostgresValue {
    fn from(val: serde_json::Value) -> Self {
        PostgresValue::Json(val)
    }
}

impl<T> From<Option<T>> for PostgresValue
where
    T: Into<PostgresValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => PostgresValue::Null,
        }
    }
}
