//! Horse CRUD execution against PostgreSQL.

use crate::error::AppError;
use crate::model::{timestamp, Horse, HorseChanges, ListQuery, NewHorse};
use crate::sql::{self, plan_list, QueryBuf};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct HorseService;

impl HorseService {
    /// One page of horses plus the total number matching the filters.
    /// Both reads run in one read-only snapshot on a single pooled connection.
    pub async fn list_and_count(pool: &PgPool, query: &ListQuery) -> Result<(Vec<Horse>, i64), AppError> {
        let plan = plan_list(query);
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        let items = Self::fetch_all(&mut *tx, &plan.page).await?;
        let total = Self::fetch_count(&mut *tx, &plan.count).await?;
        tx.commit().await?;
        Ok((items, total))
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<Horse>, AppError> {
        let q = sql::select_by_id(id);
        let mut conn = pool.acquire().await?;
        Self::fetch_optional(&mut conn, &q).await
    }

    /// Insert one horse with a fresh time-ordered id. `created_at` equals `updated_at`.
    pub async fn create(pool: &PgPool, body: &NewHorse) -> Result<Horse, AppError> {
        let q = sql::insert(Uuid::now_v7(), body, timestamp::utc_now());
        let mut conn = pool.acquire().await?;
        let horse = Self::fetch_optional(&mut conn, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        tracing::info!(id = %horse.id, name = %horse.name, "horse created");
        Ok(horse)
    }

    /// Overwrite the supplied fields in one statement. None when the id does not exist.
    pub async fn update(pool: &PgPool, id: Uuid, changes: &HorseChanges) -> Result<Option<Horse>, AppError> {
        if changes.is_empty() {
            tracing::debug!(id = %id, "empty patch; refreshing updated_at only");
        }
        let q = sql::update(id, changes, timestamp::utc_now());
        let mut conn = pool.acquire().await?;
        let horse = Self::fetch_optional(&mut conn, &q).await?;
        if horse.is_some() {
            tracing::info!(id = %id, "horse updated");
        }
        Ok(horse)
    }

    /// Hard delete. Returns false when the id does not exist.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let q = sql::delete(id);
        let mut conn = pool.acquire().await?;
        let deleted = Self::fetch_optional_id(&mut conn, &q).await?;
        if deleted.is_some() {
            tracing::info!(id = %id, "horse deleted");
        }
        Ok(deleted.is_some())
    }

    async fn fetch_all(conn: &mut PgConnection, q: &QueryBuf) -> Result<Vec<Horse>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Horse>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&mut *conn).await?)
    }

    async fn fetch_optional(conn: &mut PgConnection, q: &QueryBuf) -> Result<Option<Horse>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, Horse>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&mut *conn).await?)
    }

    async fn fetch_optional_id(conn: &mut PgConnection, q: &QueryBuf) -> Result<Option<Uuid>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, Uuid>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&mut *conn).await?)
    }

    async fn fetch_count(conn: &mut PgConnection, q: &QueryBuf) -> Result<i64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, i64>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_one(&mut *conn).await?)
    }
}
