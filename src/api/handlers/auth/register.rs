use axum::{extract::Extension, Form};
use sqlx::PgPool;
use tracing::{error, info, instrument};

use super::{
    password,
    storage::{self, InsertOutcome},
    types::{Credentials, Outcome},
    LOGIN_ROUTE, MSG_FIELDS_REQUIRED, MSG_SERVER_ERROR, MSG_USER_EXISTS,
};
use crate::api::views;

/// Render the registration form.
pub async fn show_register() -> Outcome {
    Outcome::View(views::register(None))
}

/// Create an account with the default role. Registration never establishes a
/// session; the client is sent to the login entry point.
#[instrument(skip_all)]
pub async fn register(pool: Extension<PgPool>, payload: Option<Form<Credentials>>) -> Outcome {
    let Some(Form(credentials)) = payload else {
        return Outcome::View(views::register(Some(MSG_FIELDS_REQUIRED)));
    };

    if !credentials.is_complete() {
        return Outcome::View(views::register(Some(MSG_FIELDS_REQUIRED)));
    }

    // User-experience shortcut only; the unique constraint on email decides
    // the race between two simultaneous registrations.
    match storage::account_exists(&pool, &credentials.email).await {
        Ok(true) => return Outcome::View(views::register(Some(MSG_USER_EXISTS))),
        Ok(false) => (),
        Err(err) => {
            error!("Failed to check for existing account: {err:?}");
            return Outcome::View(views::register(Some(MSG_SERVER_ERROR)));
        }
    }

    let plaintext = credentials.password;
    let password_hash = match tokio::task::spawn_blocking(move || password::hash(&plaintext)).await {
        Ok(Ok(hash)) => hash,
        Ok(Err(err)) => {
            error!("Failed to hash password: {err}");
            return Outcome::View(views::register(Some(MSG_SERVER_ERROR)));
        }
        Err(err) => {
            error!("Password hashing task failed: {err}");
            return Outcome::View(views::register(Some(MSG_SERVER_ERROR)));
        }
    };

    match storage::insert_account(&pool, &credentials.email, &password_hash).await {
        Ok(InsertOutcome::Created) => {
            info!(email = %credentials.email, "Account created");
            Outcome::Redirect(LOGIN_ROUTE)
        }
        Ok(InsertOutcome::Conflict) => Outcome::View(views::register(Some(MSG_USER_EXISTS))),
        Err(err) => {
            error!("Failed to insert account: {err:?}");
            Outcome::View(views::register(Some(MSG_SERVER_ERROR)))
        }
    }
}
