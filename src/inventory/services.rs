use super::dto::FoodItem;

/// Narrow a fetched list to the given owner's items. The list endpoint
/// returns every user's items; this is display scoping, not a security
/// boundary.
pub fn owned_by(mut items: Vec<FoodItem>, email: &str) -> Vec<FoodItem> {
    items.retain(|item| item.email == email);
    items
}

/// Case-insensitive substring match on the item name. A query that trims
/// to empty leaves the list untouched; order is always preserved.
pub fn filter_by_name(mut items: Vec<FoodItem>, query: &str) -> Vec<FoodItem> {
    if query.trim().is_empty() {
        return items;
    }
    let needle = query.to_lowercase();
    items.retain(|item| item.name.to_lowercase().contains(&needle));
    items
}
