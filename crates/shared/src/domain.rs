use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);
    };
}

id_newtype!(ProductId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price_rub: u32,
    pub description: String,
}

impl Product {
    /// Text placed into the order field when a product is picked from the catalog.
    pub fn order_line(&self) -> String {
        format!("{} - {}₽", self.name, self.price_rub)
    }
}

/// One canned answer of the FAQ knowledge base.
///
/// Keywords are stored lowercased; matching compares them against lowercased input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub topic: String,
    pub answer: String,
    pub keywords: Vec<String>,
}

impl FaqEntry {
    pub fn new<I, K>(topic: impl Into<String>, answer: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        Self {
            topic: topic.into(),
            answer: answer.into(),
            keywords: normalized,
        }
    }

    pub fn matches(&self, normalized_input: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_input.contains(keyword.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatOrigin {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub origin: ChatOrigin,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            origin: ChatOrigin::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            origin: ChatOrigin::Bot,
            text: text.into(),
        }
    }
}

/// Field-name to value mapping of a validated order form.
pub type OrderFields = BTreeMap<String, String>;

/// A single attempt to hand an order to the form relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSubmission {
    pub fields: OrderFields,
    pub target_endpoint: String,
    pub access_key: String,
}

impl OrderSubmission {
    /// Form-encoded body pairs: the user fields followed by the access key.
    pub fn form_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .fields
            .iter()
            .filter(|(name, _)| name.as_str() != crate::protocol::ACCESS_KEY_FIELD)
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        pairs.push((crate::protocol::ACCESS_KEY_FIELD, self.access_key.as_str()));
        pairs
    }
}
