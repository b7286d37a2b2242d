//! sqlx integration
//!
//! Lets nullable values be bound as query parameters and read from rows
//! directly, delegating to the payload's own PostgreSQL codec.

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type, ValueRef};

use crate::adapter::Nullable;
use crate::scalar::Scalar;

impl<T> Type<Postgres> for Nullable<T>
where
    T: Scalar + Type<Postgres>,
{
    fn type_info() -> PgTypeInfo {
        <T as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <T as Type<Postgres>>::compatible(ty)
    }
}

impl<'q, T> Encode<'q, Postgres> for Nullable<T>
where
    T: Scalar + Encode<'q, Postgres>,
{
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        match self.as_option() {
            Some(value) => <T as Encode<'q, Postgres>>::encode_by_ref(value, buf),
            None => Ok(IsNull::Yes),
        }
    }

    fn size_hint(&self) -> usize {
        self.as_option()
            .map_or(0, |value| <T as Encode<'q, Postgres>>::size_hint(value))
    }
}

impl<'r, T> Decode<'r, Postgres> for Nullable<T>
where
    T: Scalar + Decode<'r, Postgres>,
{
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            trace_log!("Decoded SQL NULL column into Nullable<{}>", T::TYPE_NAME);
            return Ok(Self::null());
        }

        <T as Decode<'r, Postgres>>::decode(value).map(Self::new)
    }
}
