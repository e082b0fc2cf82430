//! Per-entity persistence over PostgreSQL. Shared execution helpers live here; each entity
//! module adds its own create path, reference checks and extra reads.

mod company;
mod interview;
mod recruiter;
mod resume;
mod user;
mod vacancy;

pub use company::CompanyRepository;
pub use interview::InterviewRepository;
pub use recruiter::RecruiterRepository;
pub use resume::ResumeRepository;
pub use user::UserRepository;
pub use vacancy::VacancyRepository;

use crate::error::AppError;
use crate::models::Entity;
use crate::sql::{self, Changeset, PgBindValue, Predicate, QueryBuf, Table};
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Executor, FromRow, PgConnection, PgPool, Postgres};
use uuid::Uuid;

/// A foreign key supplied by a request, checked against a live row before writing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Reference {
    pub table: Table,
    pub kind: &'static str,
    pub id: Uuid,
}

impl Reference {
    pub fn new(table: Table, kind: &'static str, id: Uuid) -> Self {
        Reference { table, kind, id }
    }
}

pub(crate) async fn fetch_optional<'e, E, T>(executor: E, q: &QueryBuf) -> Result<Option<T>, AppError>
where
    E: Executor<'e, Database = Postgres>,
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let row = sqlx::query_as_with::<_, T, _>(&q.sql, q.arguments()?)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub(crate) async fn fetch_all<'e, E, T>(executor: E, q: &QueryBuf) -> Result<Vec<T>, AppError>
where
    E: Executor<'e, Database = Postgres>,
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let rows = sqlx::query_as_with::<_, T, _>(&q.sql, q.arguments()?)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

pub(crate) async fn fetch_one<'e, E, T>(executor: E, q: &QueryBuf) -> Result<T, AppError>
where
    E: Executor<'e, Database = Postgres>,
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let row = sqlx::query_as_with::<_, T, _>(&q.sql, q.arguments()?)
        .fetch_one(executor)
        .await?;
    Ok(row)
}

/// Fresh id and matching created/updated stamps ahead of the domain columns.
pub(crate) fn stamped(
    columns: Vec<(&'static str, PgBindValue)>,
) -> Vec<(&'static str, PgBindValue)> {
    let now = Utc::now();
    let mut row = Vec::with_capacity(columns.len() + 3);
    row.push(("id", Uuid::new_v4().into()));
    row.push(("created_at", now.into()));
    row.push(("updated_at", now.into()));
    row.extend(columns);
    row
}

pub(crate) async fn insert_row<'e, E, T>(
    executor: E,
    columns: Vec<(&'static str, PgBindValue)>,
) -> Result<T, AppError>
where
    E: Executor<'e, Database = Postgres>,
    T: Entity,
{
    let q = sql::insert(&T::TABLE, &stamped(columns));
    let row: T = fetch_one(executor, &q).await?;
    tracing::info!(kind = T::KIND, "created");
    Ok(row)
}

pub(crate) async fn get<T: Entity>(pool: &PgPool, id: Uuid) -> Result<T, AppError> {
    let q = sql::select_by_id(&T::TABLE, id);
    fetch_optional(pool, &q)
        .await?
        .ok_or_else(|| AppError::not_found(T::KIND, id))
}

pub(crate) async fn list<T: Entity>(pool: &PgPool, predicates: &[Predicate]) -> Result<Vec<T>, AppError> {
    let q = sql::select_list(&T::TABLE, None, predicates);
    fetch_all(pool, &q).await
}

/// Lock a referenced live row for the rest of the transaction; missing or deleted is a referential error.
pub(crate) async fn ensure_live(conn: &mut PgConnection, r: &Reference) -> Result<(), AppError> {
    let q = sql::lock_live_row(&r.table, r.id);
    let found: Option<(Uuid,)> = fetch_optional(&mut *conn, &q).await?;
    match found {
        Some(_) => Ok(()),
        None => Err(AppError::Referential {
            kind: r.kind,
            id: r.id,
        }),
    }
}

/// Apply a partial update. Empty changesets return without touching storage.
pub(crate) async fn update_row<T: Entity>(
    pool: &PgPool,
    id: Uuid,
    changes: &Changeset,
    references: &[Reference],
) -> Result<(), AppError> {
    let Some(q) = sql::update(&T::TABLE, id, changes) else {
        tracing::debug!(kind = T::KIND, %id, "empty update, nothing to do");
        return Ok(());
    };
    let mut tx = pool.begin().await?;
    for r in references {
        ensure_live(&mut tx, r).await?;
    }
    let updated: Option<(Uuid,)> = fetch_optional(&mut *tx, &q).await?;
    if updated.is_none() {
        return Err(AppError::not_found(T::KIND, id));
    }
    tx.commit().await?;
    tracing::info!(kind = T::KIND, %id, fields = changes.len(), "updated");
    Ok(())
}

pub(crate) async fn delete_row<T: Entity>(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let q = sql::soft_delete(&T::TABLE, id);
    let deleted: Option<(Uuid,)> = fetch_optional(pool, &q).await?;
    if deleted.is_none() {
        return Err(AppError::not_found(T::KIND, id));
    }
    tracing::info!(kind = T::KIND, %id, "deleted");
    Ok(())
}

/// Insert after locking every reference in one transaction.
pub(crate) async fn insert_checked<T: Entity>(
    pool: &PgPool,
    columns: Vec<(&'static str, PgBindValue)>,
    references: &[Reference],
) -> Result<T, AppError> {
    let mut tx = pool.begin().await?;
    for r in references {
        ensure_live(&mut tx, r).await?;
    }
    let row = insert_row::<_, T>(&mut *tx, columns).await?;
    tx.commit().await?;
    Ok(row)
}
