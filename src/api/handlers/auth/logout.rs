use tower_sessions::Session;

use super::{session, types::Outcome, LOGIN_ROUTE};

/// Destroy the current session and send the client to the login entry point.
///
/// Logout is best-effort: a destruction failure is logged by the session
/// helper, and the client is redirected regardless so it is never left stuck.
pub async fn logout(session: Session) -> Outcome {
    session::clear(&session).await;

    Outcome::Redirect(LOGIN_ROUTE)
}
