//! # Portero (session-based authentication gateway)
//!
//! `portero` fronts a web application with cookie-session authentication:
//! user registration, credential verification, session establishment, and
//! role-gated pages (`user` vs `admin`).
//!
//! ## Sessions
//!
//! Session state lives server side, referenced by a signed, `HttpOnly`,
//! `SameSite=Strict` cookie. Handlers only read and write one identity record
//! (`user_id`, `email`, `role`); cookie management and the 10-minute idle
//! expiry belong to the session middleware, never to handler logic.
//!
//! ## Accounts
//!
//! One Postgres row per registered principal. Email is the sole lookup key
//! and is unique; the database constraint, not the handler-level existence
//! check, is what breaks concurrent registration races. Passwords are stored
//! only as Argon2 hashes.
//!
//! ## Roles
//!
//! `user` or `admin`, fixed at creation. Login routes admins to `/admin` and
//! everyone else to `/user`. Unknown-email and wrong-password failures are
//! deliberately indistinguishable to avoid revealing account existence.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
