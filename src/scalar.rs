//! Payload types for nullable values
//!
//! Every payload type supplies the same three pieces: its canonical JSON form
//! (through serde), the null-equivalent literals it recognises, and the set of
//! driver values it accepts when a column is scanned.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use type_mapping::{PostgresValue, fits_double_precision, sql};

use crate::errors::ScanError;

/// Seconds from 0001-01-01T00:00:00Z back to the Unix epoch
pub const ZERO_TIME_UNIX_OFFSET_SECONDS: i64 = 62_135_596_800;

/// Zero instant for timestamps: 0001-01-01T00:00:00Z
pub fn zero_time() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH - TimeDelta::seconds(ZERO_TIME_UNIX_OFFSET_SECONDS)
}

/// Primitive type that can be carried by [`crate::Nullable`]
pub trait Scalar: Clone + Default + PartialEq + Serialize + DeserializeOwned {
    /// Name reported in scan errors
    const TYPE_NAME: &'static str;

    /// Column type used for this payload in DDL
    const PG_TYPE: &'static str;

    /// Whether the JSON literal `""` decodes as null
    const EMPTY_STRING_IS_NULL: bool = false;

    /// Value held by an absent instance
    fn zero() -> Self {
        Self::default()
    }

    /// Present values for which JSON encoding still emits `null`
    fn collapses_to_null(&self) -> bool {
        false
    }

    /// Decode either `null` (as `None`) or the canonical literal
    fn deserialize_nullable<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Self>::deserialize(deserializer)
    }

    /// Convert a non-NULL driver value
    fn from_postgres_value(raw: PostgresValue) -> Result<Self, ScanError>;

    /// Driver value bound for a present payload
    fn into_postgres_value(self) -> PostgresValue;
}

fn unsupported<T: Scalar>(raw: &PostgresValue) -> ScanError {
    ScanError::UnsupportedType {
        source_type: raw.pg_type_name(),
        target: T::TYPE_NAME,
    }
}

fn out_of_range<T: Scalar>(value: impl Display) -> ScanError {
    ScanError::OutOfRange {
        value: value.to_string(),
        target: T::TYPE_NAME,
    }
}

fn narrow<T, S>(value: S) -> Result<T, ScanError>
where
    T: Scalar + TryFrom<S>,
    S: Copy + Display,
{
    T::try_from(value).map_err(|_| out_of_range::<T>(value))
}

impl Scalar for bool {
    const TYPE_NAME: &'static str = "bool";
    const PG_TYPE: &'static str = sql::BOOLEAN;

    fn from_postgres_value(raw: PostgresValue) -> Result<Self, ScanError> {
        match raw {
            PostgresValue::Boolean(v) => Ok(v),
            other => Err(unsupported::<Self>(&other)),
        }
    }

    fn into_postgres_value(self) -> PostgresValue {
        PostgresValue::Boolean(self)
    }
}

/// Integers accept any integer column whose value fits the target width
macro_rules! impl_integer_scalar {
    ($ty:ty, $name:literal, $pg_type:expr, $variant:ident) => {
        impl Scalar for $ty {
            const TYPE_NAME: &'static str = $name;
            const PG_TYPE: &'static str = $pg_type;

            fn from_postgres_value(raw: PostgresValue) -> Result<Self, ScanError> {
                match raw {
                    PostgresValue::SmallInt(v) => narrow(v),
                    PostgresValue::Integer(v) => narrow(v),
                    PostgresValue::BigInt(v) => narrow(v),
                    other => Err(unsupported::<Self>(&other)),
                }
            }

            fn into_postgres_value(self) -> PostgresValue {
                PostgresValue::$variant(self)
            }
        }
    };
}

impl_integer_scalar!(i16, "i16", sql::SMALLINT, SmallInt);
impl_integer_scalar!(i32, "i32", sql::INTEGER, Integer);
impl_integer_scalar!(i64, "i64", sql::BIGINT, BigInt);

impl Scalar for f64 {
    const TYPE_NAME: &'static str = "f64";
    const PG_TYPE: &'static str = sql::DOUBLE_PRECISION;

    fn from_postgres_value(raw: PostgresValue) -> Result<Self, ScanError> {
        match raw {
            PostgresValue::Float(v) => Ok(v),
            PostgresValue::SmallInt(v) => Ok(f64::from(v)),
            PostgresValue::Integer(v) => Ok(f64::from(v)),
            PostgresValue::BigInt(v) if fits_double_precision(v) => Ok(v as f64),
            PostgresValue::BigInt(v) => Err(out_of_range::<Self>(v)),
            other => Err(unsupported::<Self>(&other)),
        }
    }

    fn into_postgres_value(self) -> PostgresValue {
        PostgresValue::Float(self)
    }
}

impl Scalar for String {
    const TYPE_NAME: &'static str = "String";
    const PG_TYPE: &'static str = sql::VARCHAR;

    fn from_postgres_value(raw: PostgresValue) -> Result<Self, ScanError> {
        match raw {
            PostgresValue::Text(v) => Ok(v),
            other => Err(unsupported::<Self>(&other)),
        }
    }

    fn into_postgres_value(self) -> PostgresValue {
        PostgresValue::Text(self)
    }
}

/// Timestamps use [`zero_time`] (0001-01-01T00:00:00Z) as their zero value,
/// not chrono's Unix-epoch default. A present zero timestamp and the empty
/// string both read as null on the JSON side; the database side binds them
/// unchanged.
impl Scalar for DateTime<Utc> {
    const TYPE_NAME: &'static str = "DateTime<Utc>";
    const PG_TYPE: &'static str = sql::TIMESTAMPTZ;
    const EMPTY_STRING_IS_NULL: bool = true;

    fn zero() -> Self {
        zero_time()
    }

    fn collapses_to_null(&self) -> bool {
        *self == zero_time()
    }

    fn deserialize_nullable<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => parse_timestamp(&s)
                .map(Some)
                .map_err(|err| D::Error::custom(format!("invalid RFC3339 timestamp {s:?}: {err}"))),
        }
    }

    fn from_postgres_value(raw: PostgresValue) -> Result<Self, ScanError> {
        match raw {
            PostgresValue::Timestamp(v) => Ok(v),
            other => Err(unsupported::<Self>(&other)),
        }
    }

    fn into_postgres_value(self) -> PostgresValue {
        PostgresValue::Timestamp(self)
    }
}

/// Parse RFC3339, plus the signed years chrono writes outside 0000..=9999
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let parsed = match s.as_bytes().first() {
        Some(b'+' | b'-') => s.parse::<DateTime<FixedOffset>>(),
        _ => DateTime::parse_from_rfc3339(s),
    }?;
    Ok(parsed.with_timezone(&Utc))
}
