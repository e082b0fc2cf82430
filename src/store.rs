//! Database bootstrap: create the database if missing, open the pool, create the entity tables.

use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

/// Table DDL in dependency order. Every table carries the `deleted_at` soft-delete marker.
const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone_number TEXT NOT NULL DEFAULT '',
            birthday DATE NOT NULL,
            gender TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at BIGINT NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        "companies",
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            location TEXT NOT NULL DEFAULT '',
            workers INTEGER NOT NULL DEFAULT 0 CHECK (workers >= 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at BIGINT NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        "recruiters",
        r#"
        CREATE TABLE IF NOT EXISTS recruiters (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone_number TEXT NOT NULL,
            birthday DATE NOT NULL,
            gender TEXT NOT NULL,
            company_id UUID NOT NULL REFERENCES companies (id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at BIGINT NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        "vacancies",
        r#"
        CREATE TABLE IF NOT EXISTS vacancies (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            position TEXT NOT NULL,
            min_exp INTEGER NOT NULL DEFAULT 0 CHECK (min_exp >= 0),
            description TEXT NOT NULL,
            company_id UUID NOT NULL REFERENCES companies (id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at BIGINT NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        "resumes",
        r#"
        CREATE TABLE IF NOT EXISTS resumes (
            id UUID PRIMARY KEY,
            position TEXT NOT NULL,
            experience INTEGER NOT NULL DEFAULT 0 CHECK (experience >= 0),
            description TEXT NOT NULL DEFAULT '',
            user_id UUID NOT NULL REFERENCES users (id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at BIGINT NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        "interviews",
        r#"
        CREATE TABLE IF NOT EXISTS interviews (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users (id),
            vacancy_id UUID NOT NULL REFERENCES vacancies (id),
            recruiter_id UUID NOT NULL REFERENCES recruiters (id),
            interview_date TIMESTAMPTZ NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at BIGINT NOT NULL DEFAULT 0
        )
        "#,
    ),
];

/// Create the six entity tables if they do not exist. Safe to run on every start.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for (name, ddl) in TABLES {
        sqlx::query(ddl).execute(pool).await?;
        tracing::debug!(table = *name, "table ready");
    }
    tracing::info!(tables = TABLES.len(), "schema bootstrap complete");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::Load(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Open the pool, retrying the first connection up to `connect_retries` times with linear backoff.
pub async fn connect_pool(config: &AppConfig) -> Result<PgPool, AppError> {
    let mut attempt = 1;
    loop {
        let res = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await;
        match res {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < config.connect_retries => {
                tracing::warn!(attempt, error = %e, "database connect failed, retrying");
                tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
                attempt += 1;
            }
            Err(e) => return Err(AppError::Db(e)),
        }
    }
}

/// Split a connection URL into an admin URL (same server, `postgres` database, same query)
/// and the target database name. A URL without a path yields an empty name.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let (without_query, query) = match url.split_once('?') {
        Some((u, q)) => (u, Some(q)),
        None => (url, None),
    };
    let authority_start = without_query
        .find("://")
        .ok_or_else(|| ConfigError::Load("DATABASE_URL: missing scheme".into()))?
        + 3;
    let Some(slash) = without_query[authority_start..].find('/') else {
        return Ok((url.to_string(), String::new()));
    };
    let path_start = authority_start + slash + 1;
    let db_name = without_query.get(path_start..).unwrap_or("").trim();
    let base = without_query.get(..path_start).unwrap_or(without_query);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_keeps_server_and_query() {
        let (admin, db) =
            parse_db_name_from_url("postgres://user:pw@db:5432/hr?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://user:pw@db:5432/postgres?sslmode=disable");
        assert_eq!(db, "hr");
    }

    #[test]
    fn admin_url_without_query() {
        let (admin, db) = parse_db_name_from_url("postgres://localhost/hr").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres");
        assert_eq!(db, "hr");
    }

    #[test]
    fn url_without_path_has_no_database_to_create() {
        let (admin, db) = parse_db_name_from_url("postgres://hr@db.internal:5432").unwrap();
        assert_eq!(admin, "postgres://hr@db.internal:5432");
        assert_eq!(db, "");
        let (admin, db) =
            parse_db_name_from_url("postgres://hr@db.internal:5432?sslmode=require").unwrap();
        assert_eq!(admin, "postgres://hr@db.internal:5432?sslmode=require");
        assert_eq!(db, "");
    }

    #[test]
    fn slash_in_query_is_not_the_path() {
        let (admin, db) =
            parse_db_name_from_url("postgres://db:5432/hr?sslrootcert=/etc/ca.pem").unwrap();
        assert_eq!(admin, "postgres://db:5432/postgres?sslrootcert=/etc/ca.pem");
        assert_eq!(db, "hr");
    }

    #[test]
    fn quotes_embedded_double_quotes() {
        assert_eq!(quote_ident("hr\"x"), "\"hr\"\"x\"");
    }

    #[test]
    fn referenced_tables_are_created_first() {
        let order: Vec<&str> = TABLES.iter().map(|(n, _)| *n).collect();
        let pos = |n: &str| order.iter().position(|t| *t == n).unwrap();
        assert!(pos("companies") < pos("recruiters"));
        assert!(pos("companies") < pos("vacancies"));
        assert!(pos("users") < pos("resumes"));
        assert!(pos("recruiters") < pos("interviews"));
        assert!(pos("vacancies") < pos("interviews"));
    }
}
