//! Per-task serialization of runs.

use crate::agent_task::domain::AgentTaskId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Keyed locks that let at most one run per task proceed at a time.
///
/// Runs of different tasks never contend. Idle entries are pruned on each
/// acquisition.
#[derive(Debug, Default)]
pub struct TaskRunLocks {
    locks: Mutex<HashMap<AgentTaskId, Arc<AsyncMutex<()>>>>,
}

impl TaskRunLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other run of `task_id` holds the lock.
    ///
    /// The lock is released when the returned guard is dropped.
    pub async fn acquire(&self, task_id: AgentTaskId) -> OwnedMutexGuard<()> {
        self.lock_for(task_id).lock_owned().await
    }

    /// Number of tasks with a run holding or waiting on a lock.
    #[must_use]
    pub fn active(&self) -> usize {
        let locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .values()
            .filter(|lock| Arc::strong_count(lock) > 1)
            .count()
    }

    fn lock_for(&self, task_id: AgentTaskId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(task_id).or_default())
    }
}
