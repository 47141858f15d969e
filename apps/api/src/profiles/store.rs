use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{PersonalizationContext, ProfileSummary, UserProfile};
use crate::zodiac::ZodiacSign;

/// Storage seam for user profiles.
///
/// Mutations are whole read-modify-write operations so implementations can
/// serialize concurrent updates to the same profile.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns the profile for `user_id`, creating it if absent.
    async fn get_or_create(&self, user_id: &str, name: &str) -> UserProfile;

    async fn get(&self, user_id: &str) -> Option<UserProfile>;

    async fn personalization_context(&self, user_id: &str) -> Option<PersonalizationContext>;

    /// Records a request against an existing profile. Unknown ids are ignored.
    async fn record_request(&self, user_id: &str, sign: ZodiacSign, insight: &str, language: &str);

    /// Returns false when the profile does not exist.
    async fn update_preferences(
        &self,
        user_id: &str,
        language: Option<&str>,
        style: Option<&str>,
        length: Option<&str>,
    ) -> bool;

    async fn all_profiles(&self) -> Vec<ProfileSummary>;

    async fn clear(&self);
}

/// Process-lifetime profile store.
///
/// Every mutation holds the write lock for its whole read-modify-write, so
/// concurrent requests for one user are applied one after another.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_or_create(&self, user_id: &str, name: &str) -> UserProfile {
        if let Some(profile) = self.profiles.read().await.get(user_id) {
            debug!("Retrieved existing user profile {user_id}");
            return profile.clone();
        }

        let mut profiles = self.profiles.write().await;
        profiles
            .entry(user_id.to_string())
            .or_insert_with(|| {
                info!("Created new user profile for {name} ({user_id})");
                UserProfile::new(user_id, name)
            })
            .clone()
    }

    async fn get(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.read().await.get(user_id).cloned()
    }

    async fn personalization_context(&self, user_id: &str) -> Option<PersonalizationContext> {
        self.profiles
            .read()
            .await
            .get(user_id)
            .map(UserProfile::personalization_context)
    }

    async fn record_request(&self, user_id: &str, sign: ZodiacSign, insight: &str, language: &str) {
        if let Some(profile) = self.profiles.write().await.get_mut(user_id) {
            profile.record_request(sign, insight, language);
            debug!("Updated user profile {user_id}");
        }
    }

    async fn update_preferences(
        &self,
        user_id: &str,
        language: Option<&str>,
        style: Option<&str>,
        length: Option<&str>,
    ) -> bool {
        match self.profiles.write().await.get_mut(user_id) {
            Some(profile) => {
                profile.update_preferences(language, style, length);
                true
            }
            None => false,
        }
    }

    async fn all_profiles(&self) -> Vec<ProfileSummary> {
        self.profiles
            .read()
            .await
            .values()
            .map(UserProfile::to_summary)
            .collect()
    }

    async fn clear(&self) {
        self.profiles.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::profiles::user_id;

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let store = InMemoryProfileStore::new();
        let id = user_id("Ritika", "1995-08-20");

        let first = store.get_or_create(&id, "Ritika").await;
        let second = store.get_or_create(&id, "Ritika").await;

        assert_eq!(first.created_at, second.created_at);
        assert_eq!(store.all_profiles().await.len(), 1);
    }

    #[tokio::test]
    async fn test_record_request_ignores_unknown_user() {
        let store = InMemoryProfileStore::new();
        store
            .record_request("missing", ZodiacSign::Leo, "Shine brightly", "en")
            .await;
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_record_and_read_context() {
        let store = InMemoryProfileStore::new();
        store.get_or_create("u1", "Ritika").await;
        store
            .record_request("u1", ZodiacSign::Leo, "Embrace spontaneity and charisma", "en")
            .await;

        let ctx = store.personalization_context("u1").await.unwrap();
        assert_eq!(ctx.common_keywords, vec!["embrace", "spontaneity", "charisma"]);
        assert_eq!(ctx.favorite_themes, vec![ZodiacSign::Leo]);
        assert!(store.personalization_context("u2").await.is_none());
    }

    #[tokio::test]
    async fn test_update_preferences_reports_missing_profile() {
        let store = InMemoryProfileStore::new();
        assert!(!store.update_preferences("u1", None, Some("formal"), None).await);

        store.get_or_create("u1", "Ritika").await;
        assert!(store.update_preferences("u1", None, Some("formal"), None).await);
        assert_eq!(store.get("u1").await.unwrap().preferences.style, "formal");
    }

    #[tokio::test]
    async fn test_concurrent_records_are_not_lost() {
        let store = Arc::new(InMemoryProfileStore::new());
        store.get_or_create("u1", "Ritika").await;

        let handles: Vec<_> = (0..25)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .record_request("u1", ZodiacSign::Leo, "Radiant warmth today", "en")
                        .await;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("u1").await.unwrap().request_count, 25);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = InMemoryProfileStore::new();
        store.get_or_create("u1", "A").await;
        store.get_or_create("u2", "B").await;
        store.clear().await;
        assert!(store.all_profiles().await.is_empty());
    }
}
