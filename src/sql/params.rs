//! Typed values bound to PostgreSQL placeholders.

use chrono::{DateTime, Utc};
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};
use uuid::Uuid;

/// A value bound to a `$n` placeholder. Each variant reports its own PostgreSQL type,
/// so one query can mix uuid, float8, int8, text and timestamptz parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Uuid(Uuid),
    F64(f64),
    I64(i64),
    String(String),
    Timestamp(DateTime<Utc>),
}

impl From<Uuid> for PgBindValue {
    fn from(v: Uuid) -> Self {
        PgBindValue::Uuid(v)
    }
}

impl From<f64> for PgBindValue {
    fn from(v: f64) -> Self {
        PgBindValue::F64(v)
    }
}

impl From<i64> for PgBindValue {
    fn from(v: i64) -> Self {
        PgBindValue::I64(v)
    }
}

impl From<String> for PgBindValue {
    fn from(v: String) -> Self {
        PgBindValue::String(v)
    }
}

impl From<DateTime<Utc>> for PgBindValue {
    fn from(v: DateTime<Utc>) -> Self {
        PgBindValue::Timestamp(v)
    }
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            PgBindValue::Uuid(u) => <Uuid as Encode<Postgres>>::encode_by_ref(u, buf),
            PgBindValue::F64(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf),
            PgBindValue::I64(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf),
            PgBindValue::String(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf),
            PgBindValue::Timestamp(t) => <DateTime<Utc> as Encode<Postgres>>::encode_by_ref(t, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            PgBindValue::Uuid(_) => <Uuid as Type<Postgres>>::type_info(),
            PgBindValue::F64(_) => <f64 as Type<Postgres>>::type_info(),
            PgBindValue::I64(_) => <i64 as Type<Postgres>>::type_info(),
            PgBindValue::String(_) => <String as Type<Postgres>>::type_info(),
            PgBindValue::Timestamp(_) => <DateTime<Utc> as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}
