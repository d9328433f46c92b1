use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One tracked inventory record, in the shape the backend stores and
/// returns it. The backend is loosely typed, so every field tolerates
/// being absent and extra fields (such as the server-computed `status`)
/// are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Server-assigned id. The list endpoint projects it out, so this is
    /// normally absent; nothing may key on it.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owner email. Visibility filtering happens client-side on this field.
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    /// Expiry date, `DD/MM/YYYY` on the wire.
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(default)]
    pub location: String,
    /// Nutrient name to amount. Amounts are entered as numeric strings but
    /// other writers have stored bare numbers, so values stay loose.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nutrients: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Quantity reaches the wire as either a bare number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Count(f64),
    Text(String),
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Text(String::new())
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Count(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Quantity::Count(n) => write!(f, "{n}"),
            Quantity::Text(s) => f.write_str(s),
        }
    }
}

/// Render a nutrient amount without JSON quoting.
pub fn nutrient_display(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
