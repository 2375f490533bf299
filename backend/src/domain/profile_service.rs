//! Profile service: reading account profiles and editing the DJ profile.

use log::{info, warn};
use serde_json::Value;
use shared::{UserProfile, UserRole};
use std::sync::Arc;

use crate::domain::commands::profiles::UpdateDjProfileCommand;
use crate::domain::models::ProfileError;
use crate::storage::records::{DjProfilePatch, UserRecord, EMAIL_FIELD, USERS};
use crate::storage::traits::to_fields;
use crate::storage::{DocumentStore, StoreError};

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Profile stored under `users/{uid}`, `None` when absent
    pub async fn find_profile(&self, uid: &str) -> Result<Option<UserProfile>, StoreError> {
        match self.store.get_document(USERS, uid).await? {
            Some(document) => Ok(Some(document.decode::<UserRecord>()?.into_profile(uid))),
            None => Ok(None),
        }
    }

    pub async fn profile(&self, uid: &str) -> Result<UserProfile, ProfileError> {
        self.find_profile(uid).await?.ok_or_else(|| {
            warn!("Profile not found: {}", uid);
            ProfileError::NotFound(uid.to_string())
        })
    }

    /// First profile registered with this email
    pub async fn profile_by_email(&self, email: &str) -> Result<Option<UserProfile>, ProfileError> {
        let email = email.trim().to_lowercase();
        let documents = self
            .store
            .query_documents(USERS, EMAIL_FIELD, &Value::String(email))
            .await?;
        match documents.first() {
            Some(document) => Ok(Some(document.decode::<UserRecord>()?.into_profile(&document.key))),
            None => Ok(None),
        }
    }

    /// Write a freshly registered user's profile
    pub async fn create_profile(&self, uid: &str, record: &UserRecord) -> Result<(), ProfileError> {
        info!("Creating profile {} ({:?})", uid, record.tipo);
        self.store
            .set_document(USERS, uid, to_fields(record)?, false)
            .await?;
        Ok(())
    }

    /// Merge the editable DJ fields into the profile
    pub async fn update_dj_profile(
        &self,
        uid: &str,
        command: UpdateDjProfileCommand,
    ) -> Result<UserProfile, ProfileError> {
        info!("Updating DJ profile {}", uid);
        let profile = self.profile(uid).await?;
        if profile.role != UserRole::Dj {
            warn!("Rejected DJ profile update for non-DJ {}", uid);
            return Err(ProfileError::NotADj);
        }

        let patch = DjProfilePatch {
            nombre_artistico: command.stage_name.map(|s| s.trim().to_string()),
            descripcion: command.description,
            generos: command.genres.map(clean_genres),
            rider: command.rider,
        };
        self.store
            .set_document(USERS, uid, to_fields(&patch)?, true)
            .await?;

        self.profile(uid).await
    }
}

/// Trimmed genres with empties dropped
pub fn clean_genres(genres: Vec<String>) -> Vec<String> {
    genres
        .into_iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect()
}
