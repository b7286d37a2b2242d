//! Untyped database values exchanged at the scan boundary
//! This crate provides the driver-side value model used by the nullable adapters

pub mod sql;
pub mod types;

pub use sql::{fits_double_precision, BIGINT, BOOLEAN, DOUBLE_PRECISION, INTEGER, SMALLINT, TIMESTAMPTZ, VARCHAR};
pub use types::PostgresValue;
