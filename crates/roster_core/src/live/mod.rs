//! Live row-set subscriptions.
//!
//! # Responsibility
//! - Project one table out of the snapshots published by
//!   [`crate::store::Store`] as a filtered, optionally truncated view.
//! - Provide the combine-latest join used by dashboard aggregation.
//!
//! # Invariants
//! - A subscription always starts with the current snapshot.
//! - Consecutive identical projected snapshots are emitted once.
//! - Dropping a subscription is the only way to unsubscribe; it ends on its
//!   own only when the store is dropped.

use crate::store::StoreSnapshot;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

pub mod join;

pub use join::{spawn_combine_latest, LiveJoin};

/// Shared, immutable snapshot of one table's rows.
pub type Rows<T> = Arc<Vec<T>>;

type RowFilter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Selects one table out of a store snapshot.
pub(crate) type TableOf<T> = fn(&StoreSnapshot) -> &Rows<T>;

/// Subscription to one table with an optional row filter and limit.
pub struct LiveQuery<T> {
    rx: watch::Receiver<StoreSnapshot>,
    table: TableOf<T>,
    filter: Option<RowFilter<T>>,
    limit: Option<usize>,
    last: Option<Vec<T>>,
}

impl<T> fmt::Debug for LiveQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveQuery")
            .field("filtered", &self.filter.is_some())
            .field("limit", &self.limit)
            .finish()
    }
}

impl<T: Clone + PartialEq> LiveQuery<T> {
    pub(crate) fn new(rx: watch::Receiver<StoreSnapshot>, table: TableOf<T>) -> Self {
        Self {
            rx,
            table,
            filter: None,
            limit: None,
            last: None,
        }
    }

    /// Keeps only rows matching `filter`.
    pub fn filtered(mut self, filter: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Truncates every snapshot to the first `limit` rows.
    pub fn limited(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the current projected snapshot without waiting.
    pub fn current(&self) -> Vec<T> {
        let rows = Arc::clone((self.table)(&self.rx.borrow()));
        self.project(&rows)
    }

    /// Waits for the next distinct snapshot.
    ///
    /// The first call resolves immediately. Returns `None` once the owning
    /// store has been dropped.
    pub async fn next(&mut self) -> Option<Vec<T>> {
        loop {
            if self.last.is_some() {
                self.rx.changed().await.ok()?;
            }
            let rows = Arc::clone((self.table)(&self.rx.borrow_and_update()));
            let projected = self.project(&rows);
            if self.last.as_ref() != Some(&projected) {
                self.last = Some(projected.clone());
                return Some(projected);
            }
        }
    }

    fn project(&self, rows: &[T]) -> Vec<T> {
        let limit = self.limit.unwrap_or(usize::MAX);
        match &self.filter {
            Some(filter) => rows
                .iter()
                .filter(|row| filter(row))
                .take(limit)
                .cloned()
                .collect(),
            None => rows.iter().take(limit).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LiveQuery, Rows};
    use crate::model::task::Task;
    use crate::store::StoreSnapshot;
    use std::sync::Arc;
    use tokio::sync::watch;

    fn tasks(snapshot: &StoreSnapshot) -> &Rows<Task> {
        &snapshot.tasks
    }

    fn task(id: i64, employee_id: i64) -> Task {
        Task {
            id,
            ..Task::new(format!("task {id}"), "", employee_id)
        }
    }

    fn snapshot_with(rows: Vec<Task>) -> StoreSnapshot {
        StoreSnapshot {
            tasks: Arc::new(rows),
            ..StoreSnapshot::default()
        }
    }

    #[tokio::test]
    async fn first_next_returns_current_snapshot_then_waits_for_change() {
        let (tx, rx) = watch::channel(snapshot_with(vec![task(1, 1), task(2, 2), task(3, 1)]));
        let mut query = LiveQuery::new(rx, tasks).filtered(|task| task.employee_id == 1);

        assert_eq!(query.next().await, Some(vec![task(1, 1), task(3, 1)]));

        tx.send_replace(snapshot_with(vec![task(1, 1), task(3, 1), task(4, 2), task(5, 1)]));
        assert_eq!(
            query.next().await,
            Some(vec![task(1, 1), task(3, 1), task(5, 1)])
        );
    }

    #[tokio::test]
    async fn unchanged_projection_is_not_re_emitted() {
        let (tx, rx) = watch::channel(snapshot_with(vec![task(1, 1)]));
        let mut query = LiveQuery::new(rx, tasks).filtered(|task| task.employee_id == 1);
        assert_eq!(query.next().await, Some(vec![task(1, 1)]));

        tx.send_replace(snapshot_with(vec![task(1, 1), task(2, 2)]));
        tx.send_modify(|snapshot| snapshot.employees = Arc::new(Vec::new()));
        tx.send_replace(snapshot_with(vec![task(1, 1), task(2, 2), task(3, 1)]));
        assert_eq!(query.next().await, Some(vec![task(1, 1), task(3, 1)]));
    }

    #[tokio::test]
    async fn ends_when_sender_is_dropped() {
        let (tx, rx) = watch::channel(StoreSnapshot::default());
        let mut query = LiveQuery::new(rx, tasks).limited(1);
        assert_eq!(query.next().await, Some(Vec::new()));
        drop(tx);
        assert_eq!(query.next().await, None);
    }
}
