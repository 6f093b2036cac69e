use axum::extract::Extension;
use sqlx::PgPool;
use tracing::{error, instrument};
use tower_sessions::Session;

use super::{
    session, storage,
    types::{Outcome, Role},
    LOGIN_ROUTE, USER_ROUTE,
};
use crate::api::views;

/// Gated user page: requires an authenticated session.
///
/// A missing identity is a gate, not a validation failure, so the redirect
/// carries no message.
pub async fn user_page(session: Session) -> Outcome {
    let Some(user) = session::current_user(&session).await else {
        return Outcome::Redirect(LOGIN_ROUTE);
    };

    Outcome::View(views::user(&user))
}

/// Gated admin page: requires an authenticated session with the admin role.
///
/// On a store failure the handler degrades to the non-privileged user page
/// rather than failing the request.
#[instrument(skip_all)]
pub async fn admin_page(session: Session, pool: Extension<PgPool>) -> Outcome {
    let Some(user) = session::current_user(&session).await else {
        return Outcome::Redirect(LOGIN_ROUTE);
    };

    if user.role != Role::Admin {
        return Outcome::Redirect(LOGIN_ROUTE);
    }

    match storage::list_accounts(&pool).await {
        Ok(accounts) => Outcome::View(views::admin(&user, &accounts)),
        Err(err) => {
            error!("Failed to list accounts: {err:?}");
            Outcome::Redirect(USER_ROUTE)
        }
    }
}
