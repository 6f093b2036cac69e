use axum::{extract::Extension, Form};
use sqlx::PgPool;
use tracing::{error, info, instrument};
use tower_sessions::Session;

use super::{
    password, session, storage,
    types::{Credentials, Outcome, SessionUser},
    MSG_FIELDS_REQUIRED, MSG_INVALID_CREDENTIALS, MSG_SERVER_ERROR,
};
use crate::api::views;

/// Render the login form.
pub async fn show_login() -> Outcome {
    Outcome::View(views::login(None))
}

/// Authenticate the submitted credentials and establish a session.
#[instrument(skip_all)]
pub async fn login(
    session: Session,
    pool: Extension<PgPool>,
    payload: Option<Form<Credentials>>,
) -> Outcome {
    let Some(Form(credentials)) = payload else {
        return Outcome::View(views::login(Some(MSG_FIELDS_REQUIRED)));
    };

    if !credentials.is_complete() {
        return Outcome::View(views::login(Some(MSG_FIELDS_REQUIRED)));
    }

    let account = match storage::find_account(&pool, &credentials.email).await {
        Ok(Some(account)) => account,
        // Unknown email must read exactly like a wrong password.
        Ok(None) => return Outcome::View(views::login(Some(MSG_INVALID_CREDENTIALS))),
        Err(err) => {
            error!("Failed to look up account: {err:?}");
            return Outcome::View(views::login(Some(MSG_SERVER_ERROR)));
        }
    };

    let plaintext = credentials.password;
    let stored_hash = account.password_hash.clone();
    let verify = move || password::verify(&plaintext, &stored_hash);
    let verified = match tokio::task::spawn_blocking(verify).await {
        Ok(Ok(verified)) => verified,
        Ok(Err(err)) => {
            error!("Failed to verify password: {err}");
            return Outcome::View(views::login(Some(MSG_SERVER_ERROR)));
        }
        Err(err) => {
            error!("Password verification task failed: {err}");
            return Outcome::View(views::login(Some(MSG_SERVER_ERROR)));
        }
    };

    if !verified {
        return Outcome::View(views::login(Some(MSG_INVALID_CREDENTIALS)));
    }

    let user = SessionUser::from_account(&account);

    if let Err(err) = session::establish(&session, &user).await {
        error!("Failed to establish session: {err}");
        return Outcome::View(views::login(Some(MSG_SERVER_ERROR)));
    }

    info!(email = %user.email, "Login successful");

    Outcome::Redirect(user.landing_page())
}
