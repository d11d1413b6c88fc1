use serde::{Deserialize, Serialize};

/// Body of `POST /api/invention-date`.
#[derive(Debug, Clone, Deserialize)]
pub struct InventionDateRequest {
    /// Absent and `null` both deserialize to `None`.
    #[serde(default)]
    pub item: Option<String>,
}

impl InventionDateRequest {
    /// Decode a request from a JSON body, which must be an object. The derived
    /// `Deserialize` alone would also accept the sequence form `["telephone"]`.
    pub fn from_body(body: serde_json::Value) -> anyhow::Result<Self> {
        if !body.is_object() {
            anyhow::bail!("Request body must be a JSON object");
        }
        Ok(serde_json::from_value(body)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventionDateResponse {
    pub year: i64,
}
