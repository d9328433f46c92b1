use anyhow::bail;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::auth::dto::Credentials;
use crate::session::Session;
use crate::state::AppState;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Canonical form stored in the session and sent to the server.
fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Authenticate against the server and persist the email in the local
/// session. Other session keys (theme, photo) survive a re-login.
pub async fn login(state: &AppState, email: &str, password: &str) -> anyhow::Result<Session> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        bail!("Please enter both email and password.");
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        bail!("Please enter a valid email address.");
    }

    let creds = Credentials {
        email: email.clone(),
        password: password.to_string(),
    };
    state.backend.login(&creds).await?;

    let mut session = state.store.load();
    session.email = Some(email);
    state.store.save(&session)?;
    info!("login successful");
    Ok(session)
}

/// Create an account. Does not log in; the caller is expected to run
/// the login flow afterwards.
pub async fn signup(
    state: &AppState,
    email: &str,
    password: &str,
    confirm_password: Option<&str>,
) -> anyhow::Result<()> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        bail!("All fields are required!");
    }
    if let Some(confirm) = confirm_password {
        if confirm != password {
            bail!("Passwords do not match!");
        }
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        bail!("Please enter a valid email address.");
    }

    let creds = Credentials {
        email,
        password: password.to_string(),
    };
    state.backend.signup(&creds).await?;
    info!("signup successful");
    Ok(())
}

/// Drop every stored session key.
pub fn logout(state: &AppState) -> anyhow::Result<()> {
    state.store.clear()?;
    info!("logged out");
    Ok(())
}

#[cfg(test)]
mod email_tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user @example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(normalize_email("  User@Example.COM  "), "user@example.com");
    }
}



#[cfg(test)]
mod logout_tests {
    use super::*;
    use crate::state::test_support::{state_with, StubBackend};
    use std::sync::Arc;

    #[tokio::test]
    async fn clears_every_session_key() {
        let backend = Arc::new(StubBackend::default());
        let (state, _dir) = state_with(backend);

        login(&state, "user@example.com", "secret").await.unwrap();
        logout(&state).unwrap();

        let session = state.store.load();
        assert!(session.email.is_none());
        assert!(session.photo.is_none());
    }
}
