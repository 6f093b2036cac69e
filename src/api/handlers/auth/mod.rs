//! Authentication handlers: registration, login, logout, and the two gated
//! page renderers.
//!
//! Handlers are the error boundary: every store, hashing, or session failure
//! is logged and mapped to a generic user-visible outcome. No failure here is
//! fatal to the process.

pub mod login;
pub mod logout;
pub mod pages;
pub mod password;
pub mod register;
pub mod session;
pub mod storage;
pub mod types;

pub use self::login::{login, show_login};
pub use self::logout::logout;
pub use self::pages::{admin_page, user_page};
pub use self::register::{register, show_register};


pub(crate) const LOGIN_ROUTE: &str = "/login";
pub(crate) const USER_ROUTE: &str = "/user";
pub(crate) const ADMIN_ROUTE: &str = "/admin";

/// Shown when a required form field is missing or empty.
pub(crate) const MSG_FIELDS_REQUIRED: &str = "All fields are required.";

/// Shown when registering an email that already has an account.
pub(crate) const MSG_USER_EXISTS: &str = "User already exists.";

/// One message for unknown email and wrong password; the two cases must stay
/// indistinguishable so account existence is not revealed.
pub(crate) const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Shown when a store or hashing failure is caught at the handler boundary.
pub(crate) const MSG_SERVER_ERROR: &str = "Server error, try again.";
