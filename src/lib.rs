//! # Nullable
//!
//! Nullable scalar types that carry an explicit "no value" state across three
//! representations: a PostgreSQL column, a JSON document and a plain Rust value.
//!
//! ## Quick Start
//!
//! ```rust
//! use nullable::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Profile {
//!     id: i64,
//!     nickname: NullableString,
//!     age: NullableInt16,
//! }
//!
//! let profile = Profile {
//!     id: 100,
//!     nickname: NullableString::new("neo".to_string()),
//!     age: NullableInt16::null(),
//! };
//! let json = serde_json::to_string(&profile).unwrap();
//! assert_eq!(json, r#"{"id":100,"nickname":"neo","age":null}"#);
//!
//! // Scanning a driver value
//! let mut age = NullableInt16::default();
//! age.scan(PostgresValue::Integer(42)).unwrap();
//! assert_eq!(age.as_option(), Some(&42));
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod adapter;
pub mod errors;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod prelude;
pub mod scalar;

// Re-export the main public types for convenience
pub use adapter::{
    JSON_EMPTY, JSON_NULL, Nullable, NullableBool, NullableFloat64, NullableInt16, NullableInt32,
    NullableInt64, NullableString, NullableTime,
};
pub use errors::{DecodeError, ScanError};
pub use scalar::{Scalar, zero_time};

// Re-export the driver-side value model
pub use type_mapping;
pub use type_mapping::PostgresValue;

#[cfg(feature = "postgres")]
pub use sqlx;
