//! Database helpers for account persistence.

use anyhow::{Context, Result};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::str::FromStr;
use tracing::Instrument;

use super::types::{Account, Role};

/// Outcome when attempting to create a new account.
#[derive(Debug)]
pub(crate) enum InsertOutcome {
    Created,
    Conflict,
}

/// Look up one account by email, the sole lookup key.
pub(crate) async fn find_account(pool: &PgPool, email: &str) -> Result<Option<Account>> {
    let query = "SELECT id, email, password_hash, role, created_at FROM accounts WHERE email = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to look up account")?;

    row.map(account_from_row).transpose()
}

/// Existence check used as a user-experience shortcut before insert; the
/// unique constraint on email is the actual race-breaker.
pub(crate) async fn account_exists(pool: &PgPool, email: &str) -> Result<bool> {
    let query = "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1) AS exists";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to check for existing account")?;

    Ok(row.get("exists"))
}

/// Insert a new account with the default role. A unique violation on email is
/// a [`InsertOutcome::Conflict`], not an error.
pub(crate) async fn insert_account(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<InsertOutcome> {
    let query = "INSERT INTO accounts (email, password_hash, role) VALUES ($1, $2, $3)";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    match sqlx::query(query)
        .bind(email)
        .bind(password_hash)
        .bind(Role::User.as_str())
        .execute(pool)
        .instrument(span)
        .await
    {
        Ok(_) => Ok(InsertOutcome::Created),
        Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert account"),
    }
}

/// All accounts, newest first, for the admin panel.
pub(crate) async fn list_accounts(pool: &PgPool) -> Result<Vec<Account>> {
    let query =
        "SELECT id, email, password_hash, role, created_at FROM accounts ORDER BY created_at DESC";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let rows = sqlx::query(query)
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to list accounts")?;

    rows.into_iter().map(account_from_row).collect()
}

fn account_from_row(row: PgRow) -> Result<Account> {
    let role: String = row.get("role");

    Ok(Account {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: Role::from_str(&role)?,
        created_at: row.get("created_at"),
    })
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}
