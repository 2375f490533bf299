//! DJ discovery for clients and promoters.
//!
//! Only DJs who have put at least one day on their calendar are listed.

use log::{info, warn};
use shared::{UserProfile, UserRole};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::commands::directory::DjFilter;
use crate::domain::models::AvailabilityMap;
use crate::domain::profile_service::ProfileService;
use crate::storage::records::{AVAILABILITY_FIELD, CALENDARS};
use crate::storage::{DocumentStore, StoreError};

#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn DocumentStore>,
    profiles: ProfileService,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn DocumentStore>, profiles: ProfileService) -> Self {
        Self { store, profiles }
    }

    /// Listed DJs matching the filter, ordered by calendar owner id
    pub async fn list_djs(&self, filter: &DjFilter) -> Result<Vec<UserProfile>, StoreError> {
        info!("Listing DJs with filter {:?}", filter);
        let djs = self.listed_djs().await?;
        Ok(djs.into_iter().filter(|dj| matches_filter(dj, filter)).collect())
    }

    /// Distinct genres across listed DJs, capitalized and sorted
    pub async fn genres(&self) -> Result<Vec<String>, StoreError> {
        let djs = self.listed_djs().await?;
        let genres: BTreeSet<String> = djs
            .iter()
            .flat_map(|dj| dj.genres.iter())
            .map(|g| g.trim().to_lowercase())
            .filter(|g| !g.is_empty())
            .collect();
        Ok(genres.into_iter().map(|g| capitalize(&g)).collect())
    }

    async fn listed_djs(&self) -> Result<Vec<UserProfile>, StoreError> {
        let mut djs = Vec::new();
        for calendar in self.store.list_documents(CALENDARS).await? {
            let availability = match calendar.field::<AvailabilityMap>(AVAILABILITY_FIELD) {
                Ok(map) => map.unwrap_or_default(),
                Err(e) => {
                    warn!("Skipping unreadable calendar {}: {}", calendar.key, e);
                    continue;
                }
            };
            if availability.is_empty() {
                continue;
            }

            match self.profiles.find_profile(&calendar.key).await {
                Ok(Some(profile)) if profile.role == UserRole::Dj => djs.push(profile),
                Ok(_) => {}
                Err(StoreError::Malformed { key, reason, .. }) => {
                    warn!("Skipping unreadable profile {}: {}", key, reason);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(djs)
    }
}

fn matches_filter(dj: &UserProfile, filter: &DjFilter) -> bool {
    let genre_ok = match non_empty(&filter.genre) {
        Some(genre) => dj.genres.iter().any(|g| g.to_lowercase().contains(&genre)),
        None => true,
    };
    let name_ok = match non_empty(&filter.name) {
        Some(name) => dj
            .stage_name
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(&name)),
        None => true,
    };
    genre_ok && name_ok
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::TestEnvironment;
    use crate::storage::Fields;
    use serde_json::{json, Value};

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fields must be an object"),
        }
    }

    async fn seed(store: &Arc<dyn DocumentStore>) {
        let users = [
            ("dj1", json!({"email": "a@x.com", "tipo": "dj", "nombreArtistico": "DJ Nova", "generos": ["House", "techno"]})),
            ("dj2", json!({"email": "b@x.com", "tipo": "dj", "nombreArtistico": "Salsa King", "generos": "salsa, House"})),
            ("dj3", json!({"email": "c@x.com", "tipo": "dj", "nombreArtistico": "Idle", "generos": ["Rock"]})),
            ("c1", json!({"email": "d@x.com", "tipo": "cliente"})),
        ];
        for (uid, user) in users {
            store.set_document("users", uid, fields(user), false).await.unwrap();
        }

        let calendars = [
            ("dj1", json!({"estadosDias": {"2024-1-1": "busy"}})),
            ("dj2", json!({"estadosDias": {"2024-1-2": "available"}})),
            ("dj3", json!({"estadosDias": {}})),
            ("c1", json!({"estadosDias": {"2024-1-3": "busy"}})),
        ];
        for (uid, calendar) in calendars {
            store.set_document("calendarios", uid, fields(calendar), false).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_only_djs_with_calendar_entries_are_listed() {
        let env = TestEnvironment::new().await.unwrap();
        let store = env.document_store();
        seed(&store).await;
        let service = DirectoryService::new(store.clone(), ProfileService::new(store));

        let djs = service.list_djs(&DjFilter::default()).await.unwrap();
        let ids: Vec<&str> = djs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["dj1", "dj2"]);
    }

    #[tokio::test]
    async fn test_filters() {
        let env = TestEnvironment::new().await.unwrap();
        let store = env.document_store();
        seed(&store).await;
        let service = DirectoryService::new(store.clone(), ProfileService::new(store));

        let house = service
            .list_djs(&DjFilter {
                genre: Some("HOUSE".to_string()),
                name: None,
            })
            .await
            .unwrap();
        assert_eq!(house.len(), 2);

        let salsa = service
            .list_djs(&DjFilter {
                genre: Some("house".to_string()),
                name: Some("king".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(salsa.len(), 1);
        assert_eq!(salsa[0].id, "dj2");

        let blank = service
            .list_djs(&DjFilter {
                genre: Some("  ".to_string()),
                name: None,
            })
            .await
            .unwrap();
        assert_eq!(blank.len(), 2);
    }

    #[tokio::test]
    async fn test_genres_are_normalized() {
        let env = TestEnvironment::new().await.unwrap();
        let store = env.document_store();
        seed(&store).await;
        let service = DirectoryService::new(store.clone(), ProfileService::new(store));

        let genres = service.genres().await.unwrap();
        assert_eq!(genres, vec!["House", "Salsa", "Techno"]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("cumbia"), "Cumbia");
        assert_eq!(capitalize("électro"), "Électro");
        assert_eq!(capitalize(""), "");
    }
}
