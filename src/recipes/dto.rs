use serde::{Deserialize, Serialize};

/// One generated recipe. The backend's shape is loose: the AI formatter
/// emits capitalized keys, any field can go missing, and some responses
/// carry one free-text `Recipe` block instead of structured fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "Name", alias = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "Ingredients",
        alias = "ingredients",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ingredients: Option<Ingredients>,
    #[serde(
        rename = "Instructions",
        alias = "instructions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub instructions: Option<String>,
    #[serde(rename = "Recipe", alias = "recipe", default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Ingredients arrive as either a list of names or one comma-joined string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ingredients {
    List(Vec<String>),
    Text(String),
}

impl Ingredients {
    pub fn joined(&self) -> String {
        match self {
            Ingredients::List(list) => list.join(", "),
            Ingredients::Text(text) => text.clone(),
        }
    }
}
