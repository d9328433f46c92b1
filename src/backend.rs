//! Gateway to the NutriCheck backend: five JSON endpoints, one call per
//! screen action. Requests are passed through as-is and responses are
//! decoded defensively; nothing is retried.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::auth::dto::Credentials;
use crate::config::AppConfig;
use crate::inventory::dto::FoodItem;
use crate::recipes::dto::Recipe;
use crate::recipes::services::parse_recipes_value;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport failure: refused connection, DNS, timeout.
    #[error("could not reach the NutriCheck backend: {0}")]
    Unreachable(#[from] reqwest::Error),
    /// The backend answered and said no; `message` is its error string.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    /// A 2xx response whose body the client cannot make sense of.
    #[error("unexpected response from server")]
    UnexpectedResponse,
}

/// The remote collaborator every screen talks to. [`HttpBackend`] is the
/// production implementation; tests install a canned fake.
#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn login(&self, creds: &Credentials) -> Result<(), BackendError>;
    async fn signup(&self, creds: &Credentials) -> Result<(), BackendError>;
    async fn add_food(&self, item: &FoodItem) -> Result<(), BackendError>;
    async fn list_food_items(&self) -> Result<Vec<FoodItem>, BackendError>;
    async fn generate_recipes(&self, ingredients: &[String]) -> Result<Vec<Recipe>, BackendError>;
}

// --- wire shapes ---

#[derive(Debug, Serialize)]
struct GenerateRecipesBody<'a> {
    ingredients: &'a [String],
}

/// `{"message": ...}` on success, `{"error": ...}` on failure; both fields
/// may be missing and the body may not be JSON at all.
#[derive(Debug, Default, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FoodItemsBody {
    #[serde(default)]
    success: bool,
    #[serde(rename = "foodItems", default)]
    food_items: Vec<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RecipesBody {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    recipes: Value,
    #[serde(default)]
    error: Option<String>,
}

// --- decoding, kept pure so it is testable without a server ---

fn reject(status: StatusCode, error: Option<String>) -> BackendError {
    BackendError::Rejected {
        status,
        message: error.unwrap_or_else(|| format!("server returned {status}")),
    }
}

fn decode_message(status: StatusCode, body: &str) -> Result<MessageBody, BackendError> {
    let parsed: MessageBody = serde_json::from_str(body).unwrap_or_default();
    if status.is_success() {
        Ok(parsed)
    } else {
        Err(reject(status, parsed.error))
    }
}

fn decode_login(status: StatusCode, body: &str) -> Result<(), BackendError> {
    let parsed = decode_message(status, body)?;
    // The mobile client checked this literal: an OK status with any other
    // body still counts as a failed login.
    if parsed.message.as_deref() == Some("Login successful") {
        Ok(())
    } else {
        Err(BackendError::UnexpectedResponse)
    }
}

fn decode_food_items(status: StatusCode, body: &str) -> Result<Vec<FoodItem>, BackendError> {
    let parsed: FoodItemsBody = serde_json::from_str(body).unwrap_or_default();
    if !status.is_success() || !parsed.success {
        return Err(reject(status, parsed.error));
    }
    let items = parsed
        .food_items
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<FoodItem>(raw) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "skipping malformed food item");
                None
            }
        })
        .collect();
    Ok(items)
}

fn decode_recipes(status: StatusCode, body: &str) -> Result<Vec<Recipe>, BackendError> {
    let parsed: RecipesBody = serde_json::from_str(body).unwrap_or_default();
    if !status.is_success() || !parsed.success {
        return Err(reject(status, parsed.error));
    }
    Ok(parse_recipes_value(&parsed.recipes))
}

// --- production implementation ---

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(StatusCode, String), BackendError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        debug!(%status, path, "backend response");
        Ok((status, text))
    }

    async fn get(&self, path: &str) -> Result<(StatusCode, String), BackendError> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        debug!(%status, path, "backend response");
        Ok((status, text))
    }
}

#[async_trait]
impl BackendClient for HttpBackend {
    #[instrument(skip(self, creds), fields(email = %creds.email))]
    async fn login(&self, creds: &Credentials) -> Result<(), BackendError> {
        let (status, body) = self.post_json("/login", creds).await?;
        decode_login(status, &body)
    }

    #[instrument(skip(self, creds), fields(email = %creds.email))]
    async fn signup(&self, creds: &Credentials) -> Result<(), BackendError> {
        let (status, body) = self.post_json("/signup", creds).await?;
        decode_message(status, &body).map(|_| ())
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    async fn add_food(&self, item: &FoodItem) -> Result<(), BackendError> {
        let (status, body) = self.post_json("/addfood", item).await?;
        decode_message(status, &body).map(|_| ())
    }

    #[instrument(skip(self))]
    async fn list_food_items(&self) -> Result<Vec<FoodItem>, BackendError> {
        let (status, body) = self.get("/getFoodItems").await?;
        decode_food_items(status, &body)
    }

    #[instrument(skip(self, ingredients), fields(count = ingredients.len()))]
    async fn generate_recipes(&self, ingredients: &[String]) -> Result<Vec<Recipe>, BackendError> {
        let (status, body) = self
            .post_json("/generateRecipes", &GenerateRecipesBody { ingredients })
            .await?;
        decode_recipes(status, &body)
    }
}

#[cfg(test)]
mod decode_tests {
    use super::*;

    #[test]
    fn login_succeeds_only_on_the_expected_message() {
        assert!(decode_login(StatusCode::OK, r#"{"message": "Login successful"}"#).is_ok());
        assert!(matches!(
            decode_login(StatusCode::OK, r#"{"message": "hello"}"#),
            Err(BackendError::UnexpectedResponse)
        ));
        assert!(matches!(
            decode_login(StatusCode::OK, "not even json"),
            Err(BackendError::UnexpectedResponse)
        ));
    }

    #[test]
    fn login_surfaces_the_server_error_string() {
        let err = decode_login(StatusCode::UNAUTHORIZED, r#"{"error": "Invalid password"}"#)
            .expect_err("must fail");
        assert_eq!(err.to_string(), "Invalid password");
    }

    #[test]
    fn signup_conflict_is_rejected_with_the_reason() {
        let err = decode_message(StatusCode::BAD_REQUEST, r#"{"error": "User already exists"}"#)
            .expect_err("must fail");
        assert_eq!(err.to_string(), "User already exists");
    }

    #[test]
    fn non_json_error_bodies_get_a_generic_message() {
        let err =
            decode_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").expect_err("must fail");
        let BackendError::Rejected { status, message } = err else {
            panic!("expected Rejected");
        };
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(message.contains("500"));
    }

    #[test]
    fn food_items_envelope_decodes() {
        let body = r#"{
            "success": true,
            "foodItems": [
                {"email": "diya@example.com", "name": "Milk", "expiry": "01/01/2024",
                 "quantity": "2", "location": "Fridge", "status": "Expired"},
                {"email": "diya@example.com", "name": "Bread", "expiry": "31/12/2099",
                 "quantity": 1, "location": "Pantry"}
            ]
        }"#;
        let items = decode_food_items(StatusCode::OK, body).expect("decode");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Milk");
        assert_eq!(items[1].quantity.to_string(), "1");
    }

    #[test]
    fn food_items_success_false_is_rejected() {
        let err = decode_food_items(StatusCode::OK, r#"{"success": false, "error": "db down"}"#)
            .expect_err("must fail");
        assert_eq!(err.to_string(), "db down");
    }

    #[test]
    fn malformed_food_items_are_skipped() {
        let body = r#"{"success": true, "foodItems": [{"name": "Milk"}, 42, "nope"]}"#;
        let items = decode_food_items(StatusCode::OK, body).expect("decode");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Milk");
    }

    #[test]
    fn recipes_envelope_accepts_the_string_payload() {
        let body = r#"{"success": true, "recipes": "[{'Name': 'Dal'}]"}"#;
        let recipes = decode_recipes(StatusCode::OK, body).expect("decode");
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].name.as_deref(), Some("Dal"));
    }

    #[test]
    fn recipes_failure_carries_the_backend_reason() {
        let err = decode_recipes(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"success": false, "error": "AI recipe generation failed."}"#,
        )
        .expect_err("must fail");
        assert_eq!(err.to_string(), "AI recipe generation failed.");
    }

    #[test]
    fn recipes_missing_payload_is_an_empty_list() {
        let recipes = decode_recipes(StatusCode::OK, r#"{"success": true}"#).expect("decode");
        assert!(recipes.is_empty());
    }
}
