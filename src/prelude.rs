//! Convenience re-exports for common usage
//!
//! # Example
//!
//! ```rust
//! use nullable::prelude::*;
//!
//! let id = NullableInt64::new(100);
//! assert_eq!(id.to_json(), b"100");
//! ```

pub use crate::adapter::{
    JSON_EMPTY, JSON_NULL, Nullable, NullableBool, NullableFloat64, NullableInt16, NullableInt32,
    NullableInt64, NullableString, NullableTime,
};
pub use crate::errors::{DecodeError, ScanError};
pub use crate::scalar::{Scalar, zero_time};

// Driver-side value model
pub use type_mapping::PostgresValue;

// Common external dependencies
pub use chrono::{DateTime, Utc};
