//! Combine-latest join over a watched input and a selection signal.
//!
//! # Invariants
//! - Each recompute reads the latest input value and the latest selection.
//!   The input is one value, so tables published together are always
//!   combined together.
//! - The combine function runs synchronously and must be side-effect free.
//! - The worker stops when the handle is closed or dropped, or when the
//!   input channel closes.

use log::debug;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a running combine-latest worker.
///
/// Dropping the handle cancels the worker.
pub struct LiveJoin<S, O> {
    selection: watch::Sender<S>,
    output: watch::Receiver<O>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<S, O: Clone> LiveJoin<S, O> {
    /// Returns a receiver of computed outputs.
    pub fn subscribe(&self) -> watch::Receiver<O> {
        self.output.clone()
    }

    /// Returns the most recently computed output.
    pub fn latest(&self) -> O {
        self.output.borrow().clone()
    }

    /// Replaces the selection signal and triggers a recompute.
    pub fn select(&self, selection: S) {
        self.selection.send_replace(selection);
    }

    /// Edits the selection signal in place and triggers a recompute.
    pub fn update_selection(&self, edit: impl FnOnce(&mut S)) {
        self.selection.send_modify(edit);
    }

    /// Cancels the worker and waits for it to finish.
    pub async fn close(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl<S, O> Drop for LiveJoin<S, O> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawns a worker that recomputes `combine` whenever the input or the
/// selection changes.
///
/// Watch channels always hold a value, so the first output is computed as
/// soon as the worker starts. Until then subscribers observe `initial`.
///
/// Must be called from within a tokio runtime.
pub fn spawn_combine_latest<I, S, O, F>(
    name: &'static str,
    mut input: watch::Receiver<I>,
    selection: S,
    initial: O,
    combine: F,
) -> LiveJoin<S, O>
where
    I: Send + Sync + 'static,
    S: Send + Sync + 'static,
    O: Send + Sync + 'static,
    F: Fn(&S, &I) -> O + Send + 'static,
{
    let (selection_tx, mut selection_rx) = watch::channel(selection);
    let (output_tx, output_rx) = watch::channel(initial);
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        debug!("event=live_join module=live status=start name={name}");
        let mut recomputes: u64 = 0;
        loop {
            let next = {
                let selection = selection_rx.borrow_and_update();
                let input = input.borrow_and_update();
                combine(&selection, &input)
            };
            output_tx.send_replace(next);
            recomputes += 1;

            tokio::select! {
                _ = token.cancelled() => break,
                changed = selection_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = input.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        debug!("event=live_join module=live status=stop name={name} recomputes={recomputes}");
    });

    LiveJoin {
        selection: selection_tx,
        output: output_rx,
        cancel,
        task: Some(task),
    }
}
