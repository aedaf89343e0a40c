//! Local app password and logout.

use crate::repo::preference_repo::{PreferenceRepository, SqlitePreferenceRepository};
use crate::repo::RepoError;
use crate::store::Store;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub const AUTH_PREFIX: &str = "auth.";
const PASSWORD_KEY: &str = "auth.password";

#[derive(Debug)]
pub enum PasswordError {
    IncorrectCurrent,
    Mismatch,
    Repo(RepoError),
}

impl Display for PasswordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncorrectCurrent => write!(f, "Incorrect current password."),
            Self::Mismatch => write!(f, "New passwords do not match."),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PasswordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PasswordError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl PasswordError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::IncorrectCurrent => "password_incorrect",
            Self::Mismatch => "password_mismatch",
            Self::Repo(err) => err.code(),
        }
    }
}

pub struct PasswordService {
    store: Arc<Store>,
}

impl PasswordService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn has_password(&self) -> Result<bool, PasswordError> {
        Ok(self.stored()?.is_some())
    }

    /// Replaces the app password.
    ///
    /// `current` is only checked once a non-blank password has been stored.
    pub fn update_password(
        &self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), PasswordError> {
        let result = self.store.write(&[], |conn| {
            let prefs = SqlitePreferenceRepository::new(conn);
            if let Some(stored) = prefs
                .get(PASSWORD_KEY)?
                .filter(|stored| !stored.trim().is_empty())
            {
                if stored != current {
                    return Ok(Err(PasswordError::IncorrectCurrent));
                }
            }
            if new != confirm {
                return Ok(Err(PasswordError::Mismatch));
            }
            prefs.set(PASSWORD_KEY, new)?;
            Ok(Ok(()))
        })?;

        match &result {
            Ok(()) => info!("event=password_update module=auth status=ok"),
            Err(err) => warn!(
                "event=password_update module=auth status=error error_code={}",
                err.code()
            ),
        }
        result
    }

    /// Clears every stored credential.
    pub fn logout(&self) -> Result<(), PasswordError> {
        let removed = self.store.write(&[], |conn| {
            SqlitePreferenceRepository::new(conn).clear_prefix(AUTH_PREFIX)
        })?;
        info!("event=logout module=auth status=ok removed={removed}");
        Ok(())
    }

    fn stored(&self) -> Result<Option<String>, PasswordError> {
        Ok(self.store.read(|conn| {
            SqlitePreferenceRepository::new(conn).get(PASSWORD_KEY)
        })?
        .filter(|stored| !stored.trim().is_empty()))
    }
}
