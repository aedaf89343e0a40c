//! Activity feed repository contract and SQLite implementation.
//!
//! # Invariants
//! - Feed order is `created_at DESC, id DESC` (newest first).
//! - Related employee/task ids are stored as plain integers with no foreign
//!   key, so they survive deletion of the referenced rows.

use crate::model::activity::{Activity, ActivityId, ActivityKind};
use crate::repo::{ensure_changed, RepoError, RepoResult};
use rusqlite::{params, Connection, Params, Row};

pub const DEFAULT_RECENT_LIMIT: u32 = 10;

const ACTIVITY_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    type,
    created_at,
    related_employee_id,
    related_task_id
FROM activities";

/// Repository interface for the activity feed.
pub trait ActivityRepository {
    fn list_activities(&self) -> RepoResult<Vec<Activity>>;
    fn list_recent(&self, limit: u32) -> RepoResult<Vec<Activity>>;
    /// Inserts a new row and returns the generated id. `activity.id` is ignored.
    fn insert_activity(&self, activity: &Activity) -> RepoResult<ActivityId>;
    fn delete_activity(&self, id: ActivityId) -> RepoResult<()>;
    /// Removes every activity row and returns how many were deleted.
    fn clear_activities(&self) -> RepoResult<usize>;
}

/// SQLite-backed activity repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_activities(&self, sql: &str, params: impl Params) -> RepoResult<Vec<Activity>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut activities = Vec::new();
        while let Some(row) = rows.next()? {
            activities.push(parse_activity_row(row)?);
        }
        Ok(activities)
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn list_activities(&self) -> RepoResult<Vec<Activity>> {
        self.query_activities(
            &format!("{ACTIVITY_SELECT_SQL} ORDER BY created_at DESC, id DESC;"),
            [],
        )
    }

    fn list_recent(&self, limit: u32) -> RepoResult<Vec<Activity>> {
        self.query_activities(
            &format!("{ACTIVITY_SELECT_SQL} ORDER BY created_at DESC, id DESC LIMIT ?1;"),
            [i64::from(normalize_recent_limit(limit))],
        )
    }

    fn insert_activity(&self, activity: &Activity) -> RepoResult<ActivityId> {
        self.conn.execute(
            "INSERT INTO activities (
                title,
                description,
                type,
                created_at,
                related_employee_id,
                related_task_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                activity.title.as_str(),
                activity.description.as_str(),
                activity.kind.as_str(),
                activity.created_at,
                activity.related_employee_id,
                activity.related_task_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete_activity(&self, id: ActivityId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?1;", [id])?;
        ensure_changed(changed, "activity", id)
    }

    fn clear_activities(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM activities;", [])?)
    }
}

/// Zero means "use the default"; there is no upper clamp.
pub fn normalize_recent_limit(limit: u32) -> u32 {
    if limit == 0 {
        DEFAULT_RECENT_LIMIT
    } else {
        limit
    }
}

fn parse_activity_row(row: &Row<'_>) -> RepoResult<Activity> {
    let type_text: String = row.get("type")?;
    let kind = ActivityKind::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid activity type `{type_text}` in activities.type"))
    })?;

    Ok(Activity {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        kind,
        created_at: row.get("created_at")?,
        related_employee_id: row.get("related_employee_id")?,
        related_task_id: row.get("related_task_id")?,
    })
}
