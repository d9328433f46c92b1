use tracing::{info, instrument};

use crate::auth::services;
use crate::session::Theme;
use crate::state::AppState;

#[instrument(skip(state, password))]
pub async fn login(state: &AppState, email: &str, password: &str) -> anyhow::Result<()> {
    let session = services::login(state, email, password).await?;
    println!(
        "Logged in as {}.",
        session.email.as_deref().unwrap_or_default()
    );
    Ok(())
}

#[instrument(skip(state, password, confirm_password))]
pub async fn signup(
    state: &AppState,
    email: &str,
    password: &str,
    confirm_password: Option<&str>,
) -> anyhow::Result<()> {
    services::signup(state, email, password, confirm_password).await?;
    println!("Account created successfully!");
    println!("Log in with `nutricheck login` to start tracking your food.");
    Ok(())
}

#[instrument(skip(state))]
pub fn logout(state: &AppState) -> anyhow::Result<()> {
    services::logout(state)?;
    println!("Logged out.");
    Ok(())
}

/// Show the stored profile; `--theme` switches between light and dark.
#[instrument(skip(state))]
pub fn profile(state: &AppState, theme: Option<Theme>) -> anyhow::Result<()> {
    let mut session = state.store.load();
    if let Some(theme) = theme {
        session.theme = theme;
        state.store.save(&session)?;
        info!(theme = %theme, "theme updated");
    }

    match session.email.as_deref() {
        Some(email) => {
            println!("Email: {email}");
            println!("Photo: {}", session.photo.as_deref().unwrap_or("(none)"));
            println!("Theme: {}", session.theme);
        }
        None => {
            println!("Not logged in. Run `nutricheck login` first.");
            println!("Theme: {}", session.theme);
        }
    }
    Ok(())
}

#[cfg(test)]
mod profile_tests {
    use super::*;
    use crate::state::test_support::{state_with, StubBackend};
    use std::sync::Arc;

    #[test]
    fn theme_switch_persists_without_login() {
        let backend = Arc::new(StubBackend::default());
        let (state, _dir) = state_with(backend);

        profile(&state, Some(Theme::Dark)).unwrap();

        assert_eq!(state.store.load().theme, Theme::Dark);
    }

    #[test]
    fn plain_view_does_not_touch_the_store() {
        let backend = Arc::new(StubBackend::default());
        let (state, _dir) = state_with(backend);

        profile(&state, None).unwrap();

        assert!(!state.store.path().exists());
    }
}
