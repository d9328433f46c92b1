use serde::Serialize;

/// Request body shared by the login and signup endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
