//! Identity record helpers over the session middleware.
//!
//! The middleware owns cookie identifiers and idle expiry; handlers go
//! through these helpers and only ever touch the one serialized record.

use tower_sessions::{cookie::time::Duration, session, Session};
use tracing::error;

use super::types::SessionUser;

pub const SESSION_COOKIE_NAME: &str = "portero_session";

/// Sessions expire after this much inactivity, enforced by the middleware.
pub const IDLE_TIMEOUT: Duration = Duration::minutes(10);

pub(crate) const SESSION_USER_KEY: &str = "auth_user";

/// Load the authenticated identity, if any.
///
/// A session read failure is logged and treated as unauthenticated, which
/// sends the client back through the login gate.
pub(crate) async fn current_user(session: &Session) -> Option<SessionUser> {
    match session.get::<SessionUser>(SESSION_USER_KEY).await {
        Ok(user) => user,
        Err(err) => {
            error!("Failed to read session: {err}");
            None
        }
    }
}

/// Populate the session with the identity of a freshly verified account.
pub(crate) async fn establish(
    session: &Session,
    user: &SessionUser,
) -> Result<(), session::Error> {
    session.insert(SESSION_USER_KEY, user).await
}

/// Destroy the session record and clear the cookie, best effort.
pub(crate) async fn clear(session: &Session) {
    if let Err(err) = session.flush().await {
        error!("Failed to destroy session: {err}");
    }
}
