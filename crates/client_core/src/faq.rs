//! Keyword-driven FAQ answers for the chat widget.
//!
//! Entries are scanned in declaration order and the first entry with any keyword
//! contained in the lowercased input wins. There is no scoring: an earlier entry
//! beats a later one even when the later one matches more keywords.

use std::path::Path;

use serde::Deserialize;
use shared::domain::FaqEntry;
use tracing::debug;

use crate::error::KnowledgeBaseError;

pub const DEFAULT_SUPPORT_PHONE: &str = "+7 (999) 123-45-67";

const BUILTIN_ENTRIES: &[(&str, &str, &[&str])] = &[
    (
        "цена",
        "Наши пончики от 80 до 150 рублей. Наборы от 450 рублей. Доставка от 300 рублей бесплатно!",
        &["цена", "стоимость", "сколько", "дорого", "дешево", "рублей"],
    ),
    (
        "доставка",
        "Доставляем по всей Москве! Время доставки 1-2 часа. При заказе от 3000 рублей — доставка бесплатно!",
        &["доставка", "привезти", "курьер", "время", "долго", "москва"],
    ),
    (
        "время работы",
        "Мы работаем ежедневно с 8:00 до 22:00! В выходные до 23:00.",
        &["время", "работа", "открыты", "закрыты", "часы", "когда"],
    ),
    (
        "акции",
        "Сейчас действует акция: при покупке 6 пончиков — 2 в подарок! 🎁 Также скидка 10% на первый заказ.",
        &["акция", "скидка", "подарок", "бонус", "дешевле", "промо"],
    ),
    (
        "ассортимент",
        "У нас более 20 видов пончиков! Классические с сахарной пудрой, шоколадные, с фруктовой начинкой, карамельные и сезонные новинки.",
        &["виды", "ассортимент", "вкусы", "начинка", "какие", "есть"],
    ),
];

pub fn fallback_answer(support_phone: &str) -> String {
    format!(
        "Извини, я не совсем понял вопрос. Попробуй спросить про цены, доставку, время работы или акции! Или позвони нам: {support_phone}"
    )
}

pub fn builtin_entries() -> Vec<FaqEntry> {
    BUILTIN_ENTRIES
        .iter()
        .map(|(topic, answer, keywords)| FaqEntry::new(*topic, *answer, keywords.iter()))
        .collect()
}

#[derive(Debug, Deserialize)]
struct KnowledgeBaseFile {
    #[serde(rename = "entry", default)]
    entries: Vec<KnowledgeBaseFileEntry>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeBaseFileEntry {
    topic: String,
    answer: String,
    keywords: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FaqMatcher {
    entries: Vec<FaqEntry>,
    fallback: String,
}

impl Default for FaqMatcher {
    fn default() -> Self {
        Self::builtin(DEFAULT_SUPPORT_PHONE)
    }
}

impl FaqMatcher {
    pub fn new(entries: Vec<FaqEntry>, fallback: impl Into<String>) -> Self {
        Self {
            entries,
            fallback: fallback.into(),
        }
    }

    pub fn builtin(support_phone: &str) -> Self {
        Self::new(builtin_entries(), fallback_answer(support_phone))
    }

    /// Parses a TOML knowledge base made of `[[entry]]` tables.
    pub fn from_toml_str(raw: &str, support_phone: &str) -> Result<Self, KnowledgeBaseError> {
        let file: KnowledgeBaseFile = toml::from_str(raw)?;
        if file.entries.is_empty() {
            return Err(KnowledgeBaseError::Empty);
        }

        let mut entries = Vec::with_capacity(file.entries.len());
        for raw_entry in file.entries {
            let entry = FaqEntry::new(raw_entry.topic, raw_entry.answer, raw_entry.keywords);
            if entry.keywords.is_empty() {
                return Err(KnowledgeBaseError::NoKeywords(entry.topic));
            }
            entries.push(entry);
        }

        Ok(Self::new(entries, fallback_answer(support_phone)))
    }

    pub fn from_path(path: &Path, support_phone: &str) -> Result<Self, KnowledgeBaseError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw, support_phone)
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// First entry whose keywords occur in the input, if any.
    pub fn find(&self, input: &str) -> Option<&FaqEntry> {
        let normalized = input.to_lowercase();
        self.entries.iter().find(|entry| entry.matches(&normalized))
    }

    /// Canned answer for the input, or the fallback pointing at the support phone.
    pub fn answer(&self, input: &str) -> &str {
        match self.find(input) {
            Some(entry) => {
                debug!(topic = %entry.topic, "faq entry matched");
                &entry.answer
            }
            None => {
                debug!("no faq entry matched; using fallback");
                &self.fallback
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/faq_tests.rs"]
mod tests;
