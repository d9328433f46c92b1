use std::collections::BTreeSet;

use anyhow::{bail, Context};
use tracing::{info, instrument, warn};

use crate::backend::BackendError;
use crate::inventory::services::{filter_by_name, owned_by};
use crate::recipes::dto::Recipe;
use crate::recipes::selection::SelectionSet;
use crate::session::Session;
use crate::state::AppState;

/// The recipe screen as one command: fetch the owner's inventory, toggle
/// the `--select` names into a selection, and ask the backend for
/// recipes. With no `--select` it just lists what could be selected.
#[instrument(skip(state, session))]
pub async fn generate(
    state: &AppState,
    session: &Session,
    search: &str,
    picks: &[String],
) -> anyhow::Result<()> {
    let email = session.require_email()?;
    let items = state
        .backend
        .list_food_items()
        .await
        .context("Error fetching food items. Please try again.")?;
    let visible = filter_by_name(owned_by(items, email), search);
    if visible.is_empty() {
        println!("No food items found.");
        return Ok(());
    }

    if picks.is_empty() {
        println!("Select food items to generate recipes.");
        for item in &visible {
            println!("  {}", item.name);
        }
        return Ok(());
    }

    let available: BTreeSet<&str> = visible.iter().map(|item| item.name.as_str()).collect();
    let mut selection = SelectionSet::new();
    for pick in picks {
        if !available.contains(pick.as_str()) {
            warn!(name = %pick, "selected item is not in the visible inventory");
            println!("`{pick}` is not in your inventory; ignoring it.");
            continue;
        }
        // Repeating a name toggles it back off, like tapping the checkbox twice.
        selection.toggle(pick);
    }
    if selection.is_empty() {
        bail!("Please select at least one item.");
    }

    let ingredients = selection.names();
    info!(count = ingredients.len(), "generating recipes");
    let recipes = match state.backend.generate_recipes(&ingredients).await {
        Ok(recipes) => recipes,
        Err(BackendError::Unreachable(e)) => {
            warn!(error = %e, "recipe generation request failed");
            bail!("Server error. Try again later.");
        }
        Err(e) => return Err(e.into()),
    };

    if recipes.is_empty() {
        println!("No recipes found or invalid format.");
        return Ok(());
    }
    for (index, recipe) in recipes.iter().enumerate() {
        if index > 0 {
            println!();
        }
        render_recipe(index, recipe);
    }
    Ok(())
}

fn render_recipe(index: usize, recipe: &Recipe) {
    match &recipe.name {
        Some(name) => println!("{name}"),
        None => println!("Recipe {}", index + 1),
    }
    if let Some(ingredients) = &recipe.ingredients {
        println!("  Ingredients: {}", ingredients.joined());
    }
    if let Some(instructions) = &recipe.instructions {
        println!("  Instructions: {instructions}");
    }
    if let Some(details) = &recipe.details {
        println!("  Recipe Details: {details}");
    }
}

#[cfg(test)]
mod generate_tests {
    use super::*;
    use crate::inventory::dto::{FoodItem, Quantity};
    use crate::state::test_support::{state_with, StubBackend};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn item(name: &str, email: &str) -> FoodItem {
        FoodItem {
            id: None,
            email: email.into(),
            name: name.into(),
            expiry: "31/12/2099".into(),
            quantity: Quantity::Text("1".into()),
            location: "Pantry".into(),
            nutrients: BTreeMap::new(),
            image_url: None,
        }
    }

    fn pantry_backend() -> Arc<StubBackend> {
        Arc::new(StubBackend {
            items: vec![
                item("Milk", "diya@example.com"),
                item("Bread", "diya@example.com"),
                item("Paneer", "rohan@example.com"),
            ],
            recipes: vec![Recipe {
                name: Some("Toast".into()),
                ..Recipe::default()
            }],
            ..StubBackend::default()
        })
    }

    fn session() -> Session {
        Session {
            email: Some("diya@example.com".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn sends_only_the_selected_names() {
        let backend = pantry_backend();
        let (state, _dir) = state_with(backend.clone());

        generate(&state, &session(), "", &["Milk".into(), "Bread".into()])
            .await
            .unwrap();

        let requests = backend.recipe_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], vec!["Bread".to_string(), "Milk".to_string()]);
    }

    #[tokio::test]
    async fn repeated_picks_toggle_back_off() {
        let backend = pantry_backend();
        let (state, _dir) = state_with(backend.clone());

        let err = generate(&state, &session(), "", &["Milk".into(), "Milk".into()])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Please select at least one item.");
        assert!(backend.recipe_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ignores_names_outside_the_inventory() {
        let backend = pantry_backend();
        let (state, _dir) = state_with(backend.clone());

        generate(
            &state,
            &session(),
            "",
            &["Milk".into(), "Unicorn Steak".into()],
        )
        .await
        .unwrap();

        let requests = backend.recipe_requests.lock().unwrap();
        assert_eq!(requests[0], vec!["Milk".to_string()]);
    }

    #[tokio::test]
    async fn cannot_select_another_users_items() {
        let backend = pantry_backend();
        let (state, _dir) = state_with(backend.clone());

        let err = generate(&state, &session(), "", &["Paneer".into()])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Please select at least one item.");
    }

    #[tokio::test]
    async fn listing_without_picks_calls_no_generation() {
        let backend = pantry_backend();
        let (state, _dir) = state_with(backend.clone());

        generate(&state, &session(), "", &[]).await.unwrap();

        assert!(backend.recipe_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_narrows_what_is_selectable() {
        let backend = pantry_backend();
        let (state, _dir) = state_with(backend.clone());

        // "Bread" is filtered out by the search, so picking it is a no-op
        let err = generate(&state, &session(), "mi", &["Bread".into()])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Please select at least one item.");
    }

    #[tokio::test]
    async fn requires_a_session_email() {
        let backend = pantry_backend();
        let (state, _dir) = state_with(backend);

        let err = generate(&state, &Session::default(), "", &[])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "User email not found. Please log in again.");
    }
}
