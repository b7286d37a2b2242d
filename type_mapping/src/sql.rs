//! SQL type names
//!
//! PostgreSQL column type names for the values that cross the scan boundary.

pub const BOOLEAN: &str = "BOOLEAN";
pub const SMALLINT: &str = "SMALLINT";
pub const INTEGER: &str = "INTEGER";
pub const BIGINT: &str = "BIGINT";
pub const DOUBLE_PRECISION: &str = "DOUBLE PRECISION";
pub const VARCHAR: &str = "VARCHAR";
pub const TIMESTAMPTZ: &str = "TIMESTAMP WITH TIME ZONE";
pub const UUID: &str = "UUID";
pub const NUMERIC: &str = "NUMERIC";
pub const JSONB: &str = "JSONB";
pub const ARRAY: &str = "ARRAY";
pub const NULL: &str = "NULL";

/// Largest integer magnitude a DOUBLE PRECISION column holds without rounding
pub const MAX_EXACT_FLOAT_INT: u64 = 1 << 53;

/// Check whether a BIGINT survives conversion to DOUBLE PRECISION unchanged
pub fn fits_double_precision(value: i64) -> bool {
    value.unsigned_abs() <= MAX_EXACT_FLOAT_INT
}
