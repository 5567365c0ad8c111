use serde::{Serialize, Deserialize};

/// Form fields posted by the page to `/generate`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationRequest {
    pub product_name: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub detail: String,
}
