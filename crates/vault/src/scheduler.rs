//! Bounded fan-out of independent filesystem operations.
//!
//! Modeled as "submit all, await all, collect reports": every task owns
//! its target path and content, no task's failure cancels or blocks any
//! other, and completion order is not submission order. No retries and
//! no cancellation; each operation is one whole-file blocking call.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// One independent unit of work against the output tree.
#[derive(Debug, Clone)]
pub enum VaultTask {
    CreateFolder { path: PathBuf },
    WriteNote { path: PathBuf, content: String },
}

/// Tagged result of one task. Never a silently absorbed null: callers
/// always see either a message or a reason.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Created { message: String },
    Skipped { reason: String },
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct TaskReport {
    pub path: PathBuf,
    pub outcome: TaskOutcome,
}

impl VaultTask {
    pub fn path(&self) -> &Path {
        match self {
            Self::CreateFolder { path } => path,
            Self::WriteNote { path, .. } => path,
        }
    }

    /// Execute the single blocking filesystem call this task wraps.
    ///
    /// Note writes create missing parent directories themselves, so a
    /// note never depends on its folder task having completed first.
    fn execute(self) -> TaskReport {
        match self {
            Self::CreateFolder { path } => match fs::create_dir_all(&path) {
                Ok(()) => TaskReport {
                    path,
                    outcome: TaskOutcome::Created {
                        message: "created folder".to_string(),
                    },
                },
                Err(err) => TaskReport {
                    path,
                    outcome: TaskOutcome::Failed {
                        reason: format!("failed to create folder: {err}"),
                    },
                },
            },
            Self::WriteNote { path, content } => {
                let result = path
                    .parent()
                    .map(fs::create_dir_all)
                    .unwrap_or(Ok(()))
                    .and_then(|()| fs::write(&path, content));
                match result {
                    Ok(()) => TaskReport {
                        path,
                        outcome: TaskOutcome::Created {
                            message: "created note".to_string(),
                        },
                    },
                    Err(err) => TaskReport {
                        path,
                        outcome: TaskOutcome::Failed {
                            reason: format!("failed to write note: {err}"),
                        },
                    },
                }
            }
        }
    }
}

/// Run every task against a worker pool of the given width and collect
/// one report per task, in completion order.
pub async fn run_tasks(tasks: Vec<VaultTask>, workers: usize) -> Vec<TaskReport> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut join_set = JoinSet::new();

    for task in tasks {
        // Acquiring before spawn is what bounds the pool: submission
        // stalls while `workers` operations are in flight.
        let permit = semaphore.clone().acquire_owned().await.unwrap();
        join_set.spawn_blocking(move || {
            let _permit = permit;
            task.execute()
        });
    }

    let mut reports = Vec::with_capacity(join_set.len());
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => reports.push(TaskReport {
                path: PathBuf::new(),
                outcome: TaskOutcome::Failed {
                    reason: format!("task panicked: {err}"),
                },
            }),
        }
    }
    reports
}

// ── Tests ────────────────────────────────────────────────────────────────────
