//! User profiles: per-user preferences and request history used to
//! personalize prompts.
//!
//! Profiles are keyed by a fingerprint of (name, birth_date) and live as long
//! as the store does. The store is injected through `AppState`.

pub mod store;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::zodiac::ZodiacSign;

pub use store::{InMemoryProfileStore, ProfileStore};

const MAX_HISTORY: usize = 50;
const SUMMARY_HISTORY: usize = 10;
const RECENT_KEYWORD_WINDOW: usize = 20;
const RECENT_THEME_WINDOW: usize = 5;
const FREQUENT_REQUEST_THRESHOLD: u64 = 10;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "your", "you", "will", "today", "this", "that",
];

/// SHA-256 hex fingerprint of `name:birth_date`.
pub fn user_id(name: &str, birth_date: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{name}:{birth_date}"));
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Preferences {
    pub language: String,
    /// warm, formal, casual, spiritual
    pub style: String,
    /// short, medium, long
    pub length: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            style: "warm".to_string(),
            length: "medium".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestRecord {
    pub at: DateTime<Utc>,
    pub zodiac: ZodiacSign,
    pub language: String,
    pub insight_length: usize,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub preferences: Preferences,
    pub request_count: u64,
    pub last_request_at: Option<DateTime<Utc>>,
    pub request_history: Vec<RequestRecord>,
    pub favorite_themes: Vec<ZodiacSign>,
    pub common_keywords: Vec<String>,
}

/// Personalization hints handed to the prompt builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalizationContext {
    pub preferred_style: Option<String>,
    pub preferred_length: Option<String>,
    pub common_keywords: Vec<String>,
    pub favorite_themes: Vec<ZodiacSign>,
    pub request_frequency: &'static str,
}

/// Admin/debug view of a profile with the history truncated.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub preferences: Preferences,
    pub request_count: u64,
    pub last_request_at: Option<DateTime<Utc>>,
    pub recent_history: Vec<RequestRecord>,
    pub favorite_themes: Vec<ZodiacSign>,
    pub common_keywords: Vec<String>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            preferences: Preferences::default(),
            request_count: 0,
            last_request_at: None,
            request_history: Vec::new(),
            favorite_themes: Vec::new(),
            common_keywords: Vec::new(),
        }
    }

    pub fn update_preferences(
        &mut self,
        language: Option<&str>,
        style: Option<&str>,
        length: Option<&str>,
    ) {
        if let Some(language) = language {
            self.preferences.language = language.to_string();
        }
        if let Some(style) = style {
            self.preferences.style = style.to_string();
        }
        if let Some(length) = length {
            self.preferences.length = length.to_string();
        }
        self.updated_at = Utc::now();
    }

    pub fn record_request(&mut self, sign: ZodiacSign, insight: &str, language: &str) {
        let now = Utc::now();
        self.request_count += 1;
        self.last_request_at = Some(now);

        let keywords = extract_keywords(insight);
        self.common_keywords.extend(keywords.iter().cloned());

        if !self.favorite_themes.contains(&sign) {
            self.favorite_themes.push(sign);
        }

        self.request_history.push(RequestRecord {
            at: now,
            zodiac: sign,
            language: language.to_string(),
            insight_length: insight.chars().count(),
            keywords: keywords.into_iter().take(5).collect(),
        });

        if self.request_history.len() > MAX_HISTORY {
            let excess = self.request_history.len() - MAX_HISTORY;
            self.request_history.drain(..excess);
        }

        self.updated_at = now;
    }

    pub fn personalization_context(&self) -> PersonalizationContext {
        let window_start = self
            .common_keywords
            .len()
            .saturating_sub(RECENT_KEYWORD_WINDOW);
        let mut recent_keywords: Vec<String> = Vec::new();
        for keyword in &self.common_keywords[window_start..] {
            if !recent_keywords.contains(keyword) {
                recent_keywords.push(keyword.clone());
            }
        }

        let theme_start = self
            .favorite_themes
            .len()
            .saturating_sub(RECENT_THEME_WINDOW);

        PersonalizationContext {
            preferred_style: Some(self.preferences.style.clone()),
            preferred_length: Some(self.preferences.length.clone()),
            common_keywords: recent_keywords,
            favorite_themes: self.favorite_themes[theme_start..].to_vec(),
            request_frequency: if self.request_count > FREQUENT_REQUEST_THRESHOLD {
                "frequent"
            } else {
                "occasional"
            },
        }
    }

    pub fn to_summary(&self) -> ProfileSummary {
        let history_start = self
            .request_history
            .len()
            .saturating_sub(SUMMARY_HISTORY);

        ProfileSummary {
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            preferences: self.preferences.clone(),
            request_count: self.request_count,
            last_request_at: self.last_request_at,
            recent_history: self.request_history[history_start..].to_vec(),
            favorite_themes: self.favorite_themes.clone(),
            common_keywords: self.common_keywords.clone(),
        }
    }
}

/// Lowercase tokens longer than four characters that are not stop-words, first ten.
pub fn extract_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > 4 && !STOP_WORDS.contains(w))
        .take(10)
        .map(str::to_string)
        .collect()
}
