use serde_json::Value;
use tracing::warn;

use super::dto::Recipe;

/// Decode the `recipes` value of a generation response.
///
/// The backend usually returns a JSON array, but some paths hand back the
/// Python repr of a list as one single-quoted string; that form is repaired
/// by swapping the quotes and re-parsing. Anything unparseable becomes an
/// empty list, never an error.
pub fn parse_recipes_value(value: &Value) -> Vec<Recipe> {
    match value {
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| match serde_json::from_value::<Recipe>(entry.clone()) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    warn!(error = %e, "skipping malformed recipe entry");
                    None
                }
            })
            .collect(),
        Value::String(raw) => {
            let repaired = raw.replace('\'', "\"");
            match serde_json::from_str::<Vec<Recipe>>(&repaired) {
                Ok(recipes) => recipes,
                Err(e) => {
                    warn!(error = %e, "recipes string is not parseable, dropping it");
                    Vec::new()
                }
            }
        }
        Value::Null => Vec::new(),
        _ => {
            warn!("unexpected recipes payload shape, dropping it");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod recipe_parse_tests {
    use super::*;
    use crate::recipes::dto::Ingredients;

    #[test]
    fn parses_the_plain_array_form() {
        let value = serde_json::json!([
            {"Name": "Dal", "Ingredients": ["lentils"], "Instructions": "Boil."},
            {"Name": "Chai", "Ingredients": "milk, tea"}
        ]);
        let recipes = parse_recipes_value(&value);
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].name.as_deref(), Some("Dal"));
        assert_eq!(
            recipes[1].ingredients,
            Some(Ingredients::Text("milk, tea".into()))
        );
    }

    #[test]
    fn repairs_the_single_quoted_string_form() {
        let value = serde_json::json!(
            "[{'Name': 'Dal', 'Ingredients': ['lentils', 'water'], 'Instructions': 'Boil until soft.'}]"
        );
        let recipes = parse_recipes_value(&value);
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name.as_deref(), Some("Dal"));
        assert_eq!(
            recipes[0].ingredients,
            Some(Ingredients::List(vec!["lentils".into(), "water".into()]))
        );
    }

    #[test]
    fn unparseable_strings_become_an_empty_list() {
        let value = serde_json::json!("Sorry, I could not come up with anything.");
        assert!(parse_recipes_value(&value).is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let value = serde_json::json!([
            {"Name": "Good"},
            "just a string",
            {"Name": "Also good"}
        ]);
        let recipes = parse_recipes_value(&value);
        assert_eq!(recipes.len(), 2);
    }

    #[test]
    fn null_and_odd_shapes_yield_empty() {
        assert!(parse_recipes_value(&Value::Null).is_empty());
        assert!(parse_recipes_value(&serde_json::json!(42)).is_empty());
        assert!(parse_recipes_value(&serde_json::json!({"Name": "not a list"})).is_empty());
    }
}
