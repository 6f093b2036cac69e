use crate::{api, cli::globals::GlobalArgs};
use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub session_secret: SecretString,
    pub secure_cookies: bool,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the DSN is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    // Validate the DSN up front so a typo fails at startup, not on first query.
    let dsn = Url::parse(&args.dsn).context("invalid --dsn")?;

    debug!(
        "Using store at {}:{}",
        dsn.host_str().unwrap_or("unknown"),
        dsn.port().map_or_else(String::new, |p| p.to_string())
    );

    let globals = GlobalArgs::new(args.session_secret, args.secure_cookies);

    api::new(args.port, args.dsn, &globals).await
}
