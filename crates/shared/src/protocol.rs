use serde::{Deserialize, Serialize};

use crate::domain::CartEntry;

/// Body of `POST /order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub lessons: Vec<CartEntry>,
    pub name: String,
    pub phone: String,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    pub coupon: String,
}

/// Body of `PUT /lessons/<id>`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpacesUpdate {
    pub spaces: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery<'a> {
    pub q: &'a str,
}

/// Acknowledgement returned by the order and lesson update endpoints.
///
/// The backend signals success by including `message`; anything else in the
/// body is kept verbatim for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Acknowledgement {
    /// Reads an acknowledgement from a successful response body. Bodies that
    /// are not a JSON object (plain text, empty) yield an empty acknowledgement.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }
}
