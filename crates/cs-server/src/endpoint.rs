/// HTTP endpoint paths.
pub mod endpoints {
    pub const HEALTH: &str = "/v1/health";
    pub const INFO: &str = "/v1/info";
    /// `POST` mints a codespace. Only `POST`: a `GET` or `HEAD` never mints.
    pub const CODESPACES: &str = "/v1/codespaces";
    /// `GET ?id=<id>` resolves a codespace.
    pub const DETAILS: &str = "/v1/codespaces/details";
}

/// Health check response.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Query string of the details endpoint. A missing `id` reads as empty and
/// a repeated `id` resolves to its first value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailsQuery {
    pub id: String,
}

impl DetailsQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let id = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "id").then_some(value))
            .unwrap_or_default();
        Self { id }
    }
}
