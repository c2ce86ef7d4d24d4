use serde::{Deserialize, Serialize};

pub const ACCESS_KEY_FIELD: &str = "access_key";
pub const NAME_FIELD: &str = "name";
pub const PHONE_FIELD: &str = "phone";
pub const ORDER_FIELD: &str = "order";
pub const ADDRESS_FIELD: &str = "address";

/// JSON body returned by the form-relay endpoint.
///
/// A missing `success` flag counts as failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RelayResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: Option<String>) -> Self {
        Self {
            success: false,
            message,
        }
    }

    /// Remote-supplied message, ignoring blank strings.
    pub fn remote_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}
