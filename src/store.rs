//! Database bootstrap: create the target database if missing, then open the connection pool.

use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Open the pool described by `settings`. Connections are acquired per request and
/// returned to the pool on every exit path.
pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
    let opts = PgConnectOptions::from_str(&settings.database_url)
        .map_err(invalid_url)?;
    let pool = PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .acquire_timeout(settings.db_acquire_timeout)
        .connect_with(opts)
        .await?;
    tracing::info!(max_connections = settings.db_max_connections, "database pool ready");
    Ok(pool)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// `postgres` database on the same server, with the same credentials and TLS settings,
/// to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_opts, db_name) = admin_options(database_url)?;
    let Some(db_name) = db_name.filter(|n| !n.is_empty() && n != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin_opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

/// Options for the server's `postgres` database, plus the database named in `url`.
fn admin_options(url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(url).map_err(invalid_url)?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

fn invalid_url(reason: impl std::fmt::Display) -> AppError {
    AppError::Config(ConfigError::InvalidVar {
        var: "DATABASE_URL",
        reason: reason.to_string(),
    })
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
