use secrecy::SecretString;

/// Process-wide arguments shared with the server: the cookie-signing secret
/// and whether cookies carry the `Secure` attribute.
#[derive(Clone)]
pub struct GlobalArgs {
    pub session_secret: SecretString,
    pub secure_cookies: bool,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(session_secret: SecretString, secure_cookies: bool) -> Self {
        Self {
            session_secret,
            secure_cookies,
        }
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("session_secret", &"***")
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let secret = SecretString::from("0123456789abcdef0123456789abcdef".to_string());
        let args = GlobalArgs::new(secret, false);
        assert_eq!(
            args.session_secret.expose_secret(),
            "0123456789abcdef0123456789abcdef"
        );
        assert!(!args.secure_cookies);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let secret = SecretString::from("super-secret-session-signing-key".to_string());
        let args = GlobalArgs::new(secret, true);
        let debug = format!("{args:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }
}
