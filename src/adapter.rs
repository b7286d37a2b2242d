//! Nullable value adapter
//!
//! This module contains [`Nullable`], the single generic wrapper shared by all
//! payload types, together with its JSON and driver-value conversions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use type_mapping::PostgresValue;

use crate::errors::{DecodeError, ScanError};
use crate::scalar::Scalar;

/// JSON encoding of an absent value
pub const JSON_NULL: &[u8] = b"null";

/// JSON encoding of the empty string
pub const JSON_EMPTY: &[u8] = b"\"\"";

pub type NullableBool = Nullable<bool>;
pub type NullableInt16 = Nullable<i16>;
pub type NullableInt32 = Nullable<i32>;
pub type NullableInt64 = Nullable<i64>;
pub type NullableFloat64 = Nullable<f64>;
pub type NullableString = Nullable<String>;
pub type NullableTime = Nullable<DateTime<Utc>>;

/// A payload value or an explicit absence
///
/// An absent value always holds the payload's zero value ([`Scalar::zero`];
/// 0001-01-01T00:00:00Z for timestamps). A value built with
/// [`Nullable::new`] is present even when the payload is the zero value, so
/// `0`, `false` and `""` stay distinguishable from SQL NULL / JSON `null`.
///
/// On the JSON side the wrapper is transparent: it encodes as `null` or as the
/// payload's own literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nullable<T> {
    value: T,
    valid: bool,
}

impl<T: Scalar> Nullable<T> {
    /// Create a present value
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    /// Create an absent value
    pub fn null() -> Self {
        Self::default()
    }

    /// Payload; the zero value when absent
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_null(&self) -> bool {
        !self.valid
    }

    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }

    /// Split into the `(value, valid)` pair
    pub fn into_parts(self) -> (T, bool) {
        (self.value, self.valid)
    }

    /// Column type for this payload
    pub fn pg_type() -> &'static str {
        T::PG_TYPE
    }

    /// Payload as seen by the JSON encoder
    fn json_payload(&self) -> Option<&T> {
        self.as_option().filter(|value| !value.collapses_to_null())
    }

    /// Encode as JSON bytes: `null` or the payload's canonical literal
    pub fn to_json(&self) -> Vec<u8> {
        match self.json_payload() {
            // Scalar payloads always serialize into memory
            Some(value) => serde_json::to_vec(value).unwrap_or_else(|_| JSON_NULL.to_vec()),
            None => JSON_NULL.to_vec(),
        }
    }

    /// Decode JSON bytes holding `null` or a canonical literal of `T`
    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes == JSON_NULL || (T::EMPTY_STRING_IS_NULL && bytes == JSON_EMPTY) {
            trace_log!("Decoded null literal into Nullable<{}>", T::TYPE_NAME);
            return Ok(Self::null());
        }

        serde_json::from_slice(bytes).map_err(|err| {
            debug_log!("Failed to decode JSON into Nullable<{}>: {}", T::TYPE_NAME, err);
            DecodeError::from(err)
        })
    }

    /// Overwrite this value with a driver value
    ///
    /// The current content is left untouched when the driver value is rejected.
    pub fn scan(&mut self, raw: PostgresValue) -> Result<(), ScanError> {
        *self = Self::try_from(raw)?;
        Ok(())
    }

    /// Driver value to bind for this column
    ///
    /// Unlike JSON encoding, a present zero timestamp binds its value.
    pub fn to_postgres_value(&self) -> PostgresValue {
        match self.as_option() {
            Some(value) => value.clone().into_postgres_value(),
            None => PostgresValue::Null,
        }
    }
}

impl<T: Scalar> Default for Nullable<T> {
    fn default() -> Self {
        Self {
            value: T::zero(),
            valid: false,
        }
    }
}

impl<T: Scalar> TryFrom<PostgresValue> for Nullable<T> {
    type Error = ScanError;

    fn try_from(raw: PostgresValue) -> Result<Self, Self::Error> {
        if raw.is_null() {
            trace_log!("Scanned SQL NULL into Nullable<{}>", T::TYPE_NAME);
            return Ok(Self::null());
        }

        T::from_postgres_value(raw).map(Self::new).map_err(|err| {
            debug_log!("Rejected scan into Nullable<{}>: {}", T::TYPE_NAME, err);
            err
        })
    }
}

impl<T: Scalar> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Self::new)
    }
}

impl<T: Scalar> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.into_option()
    }
}

impl<T: Scalar> From<Nullable<T>> for PostgresValue {
    fn from(value: Nullable<T>) -> Self {
        value.to_postgres_value()
    }
}

impl<T: Scalar> Serialize for Nullable<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.json_payload() {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Scalar> Deserialize<'de> for Nullable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize_nullable(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::zero_time;
    use chrono::TimeZone;

    fn time_ref() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 11, 23, 12, 10, 0).unwrap()
    }

    #[test]
    fn test_default_is_null() {
        let value = NullableInt32::default();
        assert!(value.is_null());
        assert_eq!(value.into_parts(), (0, false));
        assert_eq!(NullableString::null().into_parts(), (String::new(), false));
        assert_eq!(NullableTime::null().value(), &zero_time());
        assert_eq!(NullableTime::default().into_parts(), (zero_time(), false));
    }

    #[test]
    fn test_present_zero_is_not_null() {
        assert!(NullableInt64::new(0).is_valid());
        assert!(NullableBool::new(false).is_valid());
        assert!(NullableString::new(String::new()).is_valid());
        assert_ne!(NullableInt16::new(0), NullableInt16::null());
    }

    #[test]
    fn test_option_conversions() {
        assert_eq!(NullableInt16::from(Some(5)), NullableInt16::new(5));
        assert_eq!(NullableInt16::from(None), NullableInt16::null());
        assert_eq!(Option::<f64>::from(NullableFloat64::new(1.5)), Some(1.5));
        assert_eq!(NullableFloat64::null().as_option(), None);
    }

    #[test]
    fn test_to_json_null_bytes() {
        assert_eq!(NullableBool::null().to_json(), b"null");
        assert_eq!(NullableInt16::null().to_json(), b"null");
        assert_eq!(NullableInt32::null().to_json(), b"null");
        assert_eq!(NullableInt64::null().to_json(), b"null");
        assert_eq!(NullableFloat64::null().to_json(), b"null");
        assert_eq!(NullableString::null().to_json(), b"null");
        assert_eq!(NullableTime::null().to_json(), b"null");
    }

    #[test]
    fn test_to_json_canonical_literals() {
        assert_eq!(NullableBool::new(true).to_json(), b"true");
        assert_eq!(NullableInt16::new(i16::MAX).to_json(), b"32767");
        assert_eq!(NullableInt32::new(-42).to_json(), b"-42");
        assert_eq!(NullableInt64::new(i64::MIN).to_json(), b"-9223372036854775808");
        assert_eq!(NullableFloat64::new(1.5).to_json(), b"1.5");
        assert_eq!(NullableString::new("a \"quoted\"\n".to_string()).to_json(), br#""a \"quoted\"\n""#);
        assert_eq!(NullableTime::new(time_ref()).to_json(), br#""2021-11-23T12:10:00Z""#);
    }

    #[test]
    fn test_zero_time_encodes_as_null() {
        // Lossy on purpose: the zero instant cannot be told apart from null in JSON
        let zero = NullableTime::new(zero_time());
        assert!(zero.is_valid());
        assert_eq!(zero.to_json(), b"null");

        let decoded = NullableTime::from_json(&zero.to_json()).unwrap();
        assert_eq!(decoded.into_parts(), (zero_time(), false));
    }

    #[test]
    fn test_unix_epoch_is_an_ordinary_time() {
        let epoch = NullableTime::new(DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(epoch.to_json(), br#""1970-01-01T00:00:00Z""#);
        assert_eq!(NullableTime::from_json(&epoch.to_json()).unwrap(), epoch);
    }

    #[test]
    fn test_extended_years_round_trip() {
        let far = NullableTime::new(Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(far.to_json(), br#""+10000-01-01T00:00:00Z""#);
        assert_eq!(NullableTime::from_json(&far.to_json()).unwrap(), far);

        let before_year_one = NullableTime::new(Utc.with_ymd_and_hms(-1, 3, 1, 8, 0, 0).unwrap());
        assert_eq!(NullableTime::from_json(&before_year_one.to_json()).unwrap(), before_year_one);
    }

    #[test]
    fn test_non_finite_floats_encode_as_null() {
        // serde_json has no literal for these; they stay present in memory
        let nan = NullableFloat64::new(f64::NAN);
        assert!(nan.is_valid());
        assert_eq!(nan.to_json(), b"null");
        assert_eq!(NullableFloat64::new(f64::INFINITY).to_json(), b"null");
        assert_eq!(NullableFloat64::new(f64::NEG_INFINITY).to_json(), b"null");
        assert!(NullableFloat64::from_json(&nan.to_json()).unwrap().is_null());
    }

    #[test]
    fn test_from_json_null_for_every_type() {
        assert_eq!(NullableBool::from_json(JSON_NULL).unwrap(), NullableBool::null());
        assert_eq!(NullableInt16::from_json(JSON_NULL).unwrap(), NullableInt16::null());
        assert_eq!(NullableInt32::from_json(JSON_NULL).unwrap(), NullableInt32::null());
        assert_eq!(NullableInt64::from_json(JSON_NULL).unwrap(), NullableInt64::null());
        assert_eq!(NullableFloat64::from_json(JSON_NULL).unwrap(), NullableFloat64::null());
        assert_eq!(NullableString::from_json(JSON_NULL).unwrap(), NullableString::null());
        assert_eq!(NullableTime::from_json(JSON_NULL).unwrap(), NullableTime::null());
    }

    #[test]
    fn test_empty_string_handling_differs() {
        let string = NullableString::from_json(JSON_EMPTY).unwrap();
        assert_eq!(string.into_parts(), (String::new(), true));

        let time = NullableTime::from_json(JSON_EMPTY).unwrap();
        assert!(time.is_null());

        // Same rule when the empty string arrives through a surrounding decoder
        let padded: NullableTime = serde_json::from_str(" \"\" ").unwrap();
        assert!(padded.is_null());
    }

    #[test]
    fn test_from_json_round_trip() {
        let value = NullableBool::new(false);
        assert_eq!(NullableBool::from_json(&value.to_json()).unwrap(), value);

        let value = NullableInt16::new(i16::MIN);
        assert_eq!(NullableInt16::from_json(&value.to_json()).unwrap(), value);

        let value = NullableInt32::new(i32::MIN);
        assert_eq!(NullableInt32::from_json(&value.to_json()).unwrap(), value);

        let value = NullableInt64::new(i64::MAX);
        assert_eq!(NullableInt64::from_json(&value.to_json()).unwrap(), value);

        let value = NullableFloat64::new(-0.125);
        assert_eq!(NullableFloat64::from_json(&value.to_json()).unwrap(), value);

        let value = NullableString::new("naïve ☕".to_string());
        assert_eq!(NullableString::from_json(&value.to_json()).unwrap(), value);

        let value = NullableTime::new(Utc.timestamp_opt(1_637_669_400, 123_456_000).unwrap());
        assert_eq!(NullableTime::from_json(&value.to_json()).unwrap(), value);
    }

    #[test]
    fn test_from_json_rejects_mismatches() {
        assert!(NullableBool::from_json(br#""test""#).is_err());
        assert!(NullableInt16::from_json(b"32768").is_err());
        assert!(NullableInt16::from_json(b"-32769").is_err());
        assert!(NullableInt32::from_json(b"2147483648").is_err());
        assert!(NullableInt64::from_json(b"9223372036854775808").is_err());
        assert!(NullableInt32::from_json(b"1.5").is_err());
        assert!(NullableFloat64::from_json(b"true").is_err());
        assert!(NullableString::from_json(b"false").is_err());
        assert!(NullableTime::from_json(b"false").is_err());
        assert!(NullableTime::from_json(br#""23/11/2021""#).is_err());
        assert!(NullableBool::from_json(b"nul").is_err());
    }

    #[test]
    fn test_time_offset_normalised_to_utc() {
        let value = NullableTime::from_json(br#""2021-11-23T14:10:00+02:00""#).unwrap();
        assert_eq!(value, NullableTime::new(time_ref()));
    }

    #[test]
    fn test_decode_error_keeps_parser_details() {
        let err = NullableInt16::from_json(b"\n  70000").unwrap_err();
        assert_eq!(err.line(), 2);
        assert!(err.inner().is_data());
        assert!(err.to_string().starts_with("JSON decode error:"));
    }

    #[test]
    fn test_scan_null_for_every_type() {
        assert_eq!(NullableBool::try_from(PostgresValue::Null), Ok(NullableBool::null()));
        assert_eq!(NullableInt16::try_from(PostgresValue::Null), Ok(NullableInt16::null()));
        assert_eq!(NullableInt32::try_from(PostgresValue::Null), Ok(NullableInt32::null()));
        assert_eq!(NullableInt64::try_from(PostgresValue::Null), Ok(NullableInt64::null()));
        assert_eq!(NullableFloat64::try_from(PostgresValue::Null), Ok(NullableFloat64::null()));
        assert_eq!(NullableString::try_from(PostgresValue::Null), Ok(NullableString::null()));
        assert_eq!(NullableTime::try_from(PostgresValue::Null), Ok(NullableTime::null()));
    }

    #[test]
    fn test_scan_rejects_composite_sources_for_every_type() {
        let composite = || PostgresValue::Json(serde_json::json!({"a": [1, 2]}));
        let expect = |target| ScanError::UnsupportedType {
            source_type: "JSONB",
            target,
        };

        assert_eq!(NullableBool::try_from(composite()), Err(expect("bool")));
        assert_eq!(NullableInt16::try_from(composite()), Err(expect("i16")));
        assert_eq!(NullableInt32::try_from(composite()), Err(expect("i32")));
        assert_eq!(NullableInt64::try_from(composite()), Err(expect("i64")));
        assert_eq!(NullableFloat64::try_from(composite()), Err(expect("f64")));
        assert_eq!(NullableString::try_from(composite()), Err(expect("String")));
        assert_eq!(NullableTime::try_from(composite()), Err(expect("DateTime<Utc>")));
        assert!(NullableString::try_from(PostgresValue::Array(vec![])).is_err());
    }

    #[test]
    fn test_scan_overwrites_previous_value() {
        let mut value = NullableString::new("old".to_string());
        value.scan(PostgresValue::Null).unwrap();
        assert_eq!(value.into_parts(), (String::new(), false));

        let mut value = NullableTime::default();
        value.scan(PostgresValue::Timestamp(time_ref())).unwrap();
        assert_eq!(value, NullableTime::new(time_ref()));
    }

    #[test]
    fn test_rejected_scan_keeps_previous_value() {
        let mut value = NullableInt16::new(3);
        let err = value.scan(PostgresValue::BigInt(1 << 20)).unwrap_err();
        assert!(matches!(err, ScanError::OutOfRange { target: "i16", .. }));
        assert_eq!(value, NullableInt16::new(3));
    }

    #[test]
    fn test_to_postgres_value() {
        assert_eq!(NullableInt32::null().to_postgres_value(), PostgresValue::Null);
        assert_eq!(NullableInt32::new(0).to_postgres_value(), PostgresValue::Integer(0));
        assert_eq!(
            PostgresValue::from(NullableString::new("x".to_string())),
            PostgresValue::Text("x".to_string())
        );
        // The JSON collapse does not apply when binding
        assert_eq!(
            NullableTime::new(zero_time()).to_postgres_value(),
            PostgresValue::Timestamp(zero_time())
        );
    }

    #[test]
    fn test_pg_type() {
        assert_eq!(NullableInt64::pg_type(), "BIGINT");
        assert_eq!(NullableTime::pg_type(), "TIMESTAMP WITH TIME ZONE");
    }
}
