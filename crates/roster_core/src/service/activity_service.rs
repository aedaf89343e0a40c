//! Activity feed use-case service.

use crate::live::LiveQuery;
use crate::model::activity::{Activity, ActivityId};
use crate::repo::activity_repo::{normalize_recent_limit, ActivityRepository, SqliteActivityRepository};
use crate::service::ServiceResult;
use crate::store::{Store, Table};
use log::info;
use std::sync::Arc;

pub struct ActivityService {
    store: Arc<Store>,
}

impl ActivityService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Whole feed, newest first.
    pub fn watch_all(&self) -> LiveQuery<Activity> {
        self.store.watch_activities()
    }

    /// Newest `limit` entries; `0` means the default of 10.
    pub fn watch_recent(&self, limit: u32) -> LiveQuery<Activity> {
        self.store
            .watch_recent_activities(normalize_recent_limit(limit) as usize)
    }

    pub fn record(&self, activity: &Activity) -> ServiceResult<ActivityId> {
        Ok(self.store.write(&[Table::Activities], |conn| {
            SqliteActivityRepository::new(conn).insert_activity(activity)
        })?)
    }

    pub fn delete(&self, id: ActivityId) -> ServiceResult<()> {
        Ok(self.store.write(&[Table::Activities], |conn| {
            SqliteActivityRepository::new(conn).delete_activity(id)
        })?)
    }

    pub fn clear(&self) -> ServiceResult<usize> {
        let removed = self.store.write(&[Table::Activities], |conn| {
            SqliteActivityRepository::new(conn).clear_activities()
        })?;
        info!("event=activity_clear module=service status=ok removed={removed}");
        Ok(removed)
    }
}
