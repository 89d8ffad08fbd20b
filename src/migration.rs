//! Versioned schema migrations, applied at startup.
//!
//! Applied versions are recorded in `_schema_migrations`. The whole run holds a transaction-scoped
//! advisory lock, so several instances starting at once apply each version exactly once.

use crate::error::AppError;
use sqlx::PgPool;
use std::collections::HashSet;

/// Arbitrary key for `pg_advisory_xact_lock`, shared by every instance of this service.
const MIGRATION_LOCK_KEY: i64 = 0x5348_4f52_5345;

pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub statements: &'static [&'static str],
}

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "create spherical_horses",
    statements: &[
        r#"
        CREATE TABLE IF NOT EXISTS "spherical_horses" (
            "id" UUID PRIMARY KEY,
            "name" VARCHAR(255) NOT NULL CHECK (char_length("name") >= 1),
            "radius" DOUBLE PRECISION NOT NULL CHECK ("radius" > 0),
            "color" VARCHAR(100) NOT NULL CHECK (char_length("color") >= 1),
            "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            "updated_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        r#"CREATE INDEX IF NOT EXISTS "ix_spherical_horses_name" ON "spherical_horses" ("name")"#,
    ],
}];

/// Apply every migration not yet recorded. Returns the versions applied by this call.
pub async fn apply_migrations(pool: &PgPool) -> Result<Vec<i64>, AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "_schema_migrations" (
            version BIGINT PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    let applied: HashSet<i64> = sqlx::query_scalar::<_, i64>(r#"SELECT version FROM "_schema_migrations""#)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .collect();

    let mut newly_applied = Vec::new();
    for m in pending(MIGRATIONS, &applied) {
        for stmt in m.statements {
            sqlx::query(*stmt).execute(&mut *tx).await?;
        }
        sqlx::query(r#"INSERT INTO "_schema_migrations" (version, description) VALUES ($1, $2)"#)
            .bind(m.version)
            .bind(m.description)
            .execute(&mut *tx)
            .await?;
        tracing::info!(version = m.version, description = m.description, "migration applied");
        newly_applied.push(m.version);
    }
    tx.commit().await?;
    if newly_applied.is_empty() {
        tracing::debug!("schema up to date");
    }
    Ok(newly_applied)
}

fn pending<'a>(all: &'a [Migration], applied: &'a HashSet<i64>) -> impl Iterator<Item = &'a Migration> {
    all.iter().filter(move |m| !applied.contains(&m.version))
}
