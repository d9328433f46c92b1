use std::collections::BTreeMap;

use anyhow::{bail, Context};
use clap::Args;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::inventory::dto::{nutrient_display, FoodItem, Quantity};
use crate::inventory::expiry::{self, classify_str, format_expiry, parse_expiry};
use crate::inventory::services::{filter_by_name, owned_by};
use crate::session::Session;
use crate::state::AppState;

/// Nutrient names the entry form offers. Anything else is refused so
/// inventory cards stay uniform across items.
pub const NUTRIENT_OPTIONS: [&str; 10] = [
    "Calories",
    "Protein",
    "Fat",
    "Carbohydrates",
    "Saturated Fat",
    "Sugars",
    "Salt",
    "Sodium",
    "Cholesterol",
    "Potassium",
];

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Name of the food item
    #[arg(long)]
    pub name: String,
    /// Expiry date, DD/MM/YYYY (YYYY-MM-DD is also accepted)
    #[arg(long)]
    pub expiry: String,
    /// Quantity, free-form: "2", "500g", "1 pack"
    #[arg(long)]
    pub quantity: String,
    /// Where the item is stored: "Fridge", "Freezer", "Pantry", ...
    #[arg(long)]
    pub location: String,
    /// Nutrient entry, repeatable: --nutrient Protein=12
    #[arg(long = "nutrient", value_name = "NAME=VALUE")]
    pub nutrients: Vec<String>,
    /// Photo URL to attach to the item
    #[arg(long)]
    pub photo: Option<String>,
}

/// GET the full list, keep the session owner's items, apply the search
/// box filter, and print one card per item.
#[instrument(skip(state, session))]
pub async fn browse(state: &AppState, session: &Session, search: &str) -> anyhow::Result<()> {
    let email = session.require_email()?;
    let items = state
        .backend
        .list_food_items()
        .await
        .context("Error fetching food items!")?;
    let items = filter_by_name(owned_by(items, email), search);
    if items.is_empty() {
        println!("No food items found.");
        return Ok(());
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            println!();
        }
        render_item(item);
    }
    Ok(())
}

/// The expiry tracker: same list as [`browse`] but one line per item
/// with its freshness status.
#[instrument(skip(state, session))]
pub async fn track_expiry(state: &AppState, session: &Session, search: &str) -> anyhow::Result<()> {
    let email = session.require_email()?;
    let items = state
        .backend
        .list_food_items()
        .await
        .context("Error fetching food items!")?;
    let items = filter_by_name(owned_by(items, email), search);
    if items.is_empty() {
        println!("No food items found.");
        return Ok(());
    }

    let today = expiry::today();
    println!("{:<24} {:<12} {}", "NAME", "EXPIRY", "STATUS");
    for item in &items {
        let status = match classify_str(&item.expiry, today) {
            Ok(status) => status.label().to_string(),
            Err(e) => {
                warn!(name = %item.name, error = %e, "stored expiry date is unreadable");
                "Invalid date".to_string()
            }
        };
        println!("{:<24} {:<12} {}", item.name, item.expiry, status);
    }
    Ok(())
}

#[instrument(skip(state, session, args), fields(name = %args.name))]
pub async fn add_food(state: &AppState, session: &Session, args: &AddArgs) -> anyhow::Result<()> {
    let email = session.require_email()?;
    let required = [&args.name, &args.expiry, &args.quantity, &args.location];
    if required.iter().any(|field| field.trim().is_empty()) {
        bail!("Please fill in all required fields.");
    }

    // Validate locally and normalize to the zero-padded wire form before
    // the item ever reaches the server.
    let expiry = format_expiry(parse_expiry(&args.expiry)?);

    let mut nutrients = BTreeMap::new();
    for raw in &args.nutrients {
        let (name, value) = parse_nutrient(raw)?;
        nutrients.insert(name, Value::String(value));
    }

    let item = FoodItem {
        id: None,
        email: email.to_string(),
        name: args.name.trim().to_string(),
        expiry,
        quantity: Quantity::Text(args.quantity.trim().to_string()),
        location: args.location.trim().to_string(),
        nutrients,
        image_url: args.photo.clone(),
    };
    state.backend.add_food(&item).await?;
    info!("food item added");
    println!("Food added successfully!");
    Ok(())
}

fn render_item(item: &FoodItem) {
    println!("{}", item.name);
    println!("  Expiry: {}", item.expiry);
    println!("  Quantity: {}", item.quantity);
    println!("  Location: {}", item.location);
    for (name, value) in &item.nutrients {
        println!("  {name}: {}", nutrient_display(value));
    }
    if let Some(url) = &item.image_url {
        println!("  Photo: {url}");
    }
}

fn parse_nutrient(raw: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("nutrient `{raw}` must be NAME=VALUE, e.g. Protein=12"))?;
    let name = name.trim();
    let value = value.trim();
    let canonical = NUTRIENT_OPTIONS
        .iter()
        .find(|option| option.eq_ignore_ascii_case(name))
        .with_context(|| {
            format!(
                "unknown nutrient `{name}`; pick one of: {}",
                NUTRIENT_OPTIONS.join(", ")
            )
        })?;
    if value.is_empty() {
        bail!("nutrient `{name}` is missing a value");
    }
    Ok(((*canonical).to_string(), value.to_string()))
}
