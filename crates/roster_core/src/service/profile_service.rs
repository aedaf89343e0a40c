//! Profile settings stored as preferences.

use crate::repo::preference_repo::{PreferenceRepository, SqlitePreferenceRepository};
use crate::service::ServiceResult;
use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const PROFILE_PREFIX: &str = "profile.";
const USER_NAME_KEY: &str = "profile.user_name";
const PHOTO_URI_KEY: &str = "profile.photo_uri";
pub const DEFAULT_USER_NAME: &str = "David Chen";

/// Signed-in user's display profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_name: String,
    pub photo_uri: Option<String>,
}

pub struct ProfileService {
    store: Arc<Store>,
}

impl ProfileService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Stored profile, falling back to the default display name.
    pub fn profile(&self) -> ServiceResult<Profile> {
        Ok(self.store.read(|conn| {
            let prefs = SqlitePreferenceRepository::new(conn);
            let user_name = prefs
                .get(USER_NAME_KEY)?
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
            Ok(Profile {
                user_name,
                photo_uri: prefs.get(PHOTO_URI_KEY)?,
            })
        })?)
    }

    /// Blank names reset to the default.
    pub fn set_user_name(&self, name: &str) -> ServiceResult<()> {
        let name = name.trim();
        Ok(self.store.write(&[], |conn| {
            let prefs = SqlitePreferenceRepository::new(conn);
            if name.is_empty() {
                prefs.remove(USER_NAME_KEY)
            } else {
                prefs.set(USER_NAME_KEY, name)
            }
        })?)
    }

    /// `None` removes the stored photo.
    pub fn set_photo_uri(&self, uri: Option<&str>) -> ServiceResult<()> {
        Ok(self.store.write(&[], |conn| {
            let prefs = SqlitePreferenceRepository::new(conn);
            match uri.map(str::trim).filter(|uri| !uri.is_empty()) {
                Some(uri) => prefs.set(PHOTO_URI_KEY, uri),
                None => prefs.remove(PHOTO_URI_KEY),
            }
        })?)
    }

    pub fn clear(&self) -> ServiceResult<usize> {
        Ok(self.store.write(&[], |conn| {
            SqlitePreferenceRepository::new(conn).clear_prefix(PROFILE_PREFIX)
        })?)
    }
}
