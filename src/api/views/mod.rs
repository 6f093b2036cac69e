//! Server-rendered HTML views.
//!
//! Handlers hand these out through `Outcome::View`; views never touch the
//! store or the session themselves. All interpolated values are escaped.

use axum::response::Html;

use crate::api::handlers::auth::types::{Account, SessionUser};

pub(crate) fn login(error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Login</h1>\n{}{}\n<p><a href=\"/register\">Create an account</a></p>",
        error_banner(error),
        credentials_form("/login", "Login"),
    );

    page("Login", &body)
}

pub(crate) fn register(error: Option<&str>) -> Html<String> {
    let body = format!(
        "<h1>Register</h1>\n{}{}\n<p><a href=\"/login\">Already have an account? Login</a></p>",
        error_banner(error),
        credentials_form("/register", "Register"),
    );

    page("Register", &body)
}

pub(crate) fn user(user: &SessionUser) -> Html<String> {
    let body = format!(
        "<h1>Welcome</h1>\n<p>Email: {}</p>\n<p>Role: {}</p>\n<p><a href=\"/logout\">Logout</a></p>",
        escape(&user.email),
        user.role.as_str(),
    );

    page("User", &body)
}

pub(crate) fn admin(user: &SessionUser, accounts: &[Account]) -> Html<String> {
    let mut rows = String::new();
    for account in accounts {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            account.id,
            escape(&account.email),
            account.role.as_str(),
            account.created_at.to_rfc3339(),
        ));
    }

    let body = format!(
        "<h1>Admin panel</h1>\n<p>Signed in as {} ({})</p>\n\
         <table>\n<tr><th>Id</th><th>Email</th><th>Role</th><th>Created</th></tr>\n{}</table>\n\
         <p><a href=\"/logout\">Logout</a></p>",
        escape(&user.email),
        user.role.as_str(),
        rows,
    );

    page("Admin", &body)
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title),
    ))
}

fn error_banner(error: Option<&str>) -> String {
    error.map_or_else(String::new, |message| {
        format!("<p class=\"error\">{}</p>\n", escape(message))
    })
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Email <input type=\"email\" name=\"email\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">{submit}</button>\n</form>"
    )
}

fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
