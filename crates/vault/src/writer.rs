//! Vault generation: directory layout, configuration file, and the
//! folder/note fan-out.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

use vaultsmith_spec::{FolderSpec, VaultSpec};

use crate::render::render_note;
use crate::report::{ReportEvent, Reporter};
use crate::scheduler::{TaskOutcome, TaskReport, VaultTask, run_tasks};

pub const CONFIG_DIR: &str = ".obsidian";
pub const CONFIG_FILE: &str = "app.json";
pub const DEFAULT_WORKERS: usize = 4;

/// Writes a [`VaultSpec`] out as a folder-and-file tree.
///
/// Only two failures abort a run: being unable to create the vault root
/// or its configuration directory. Every per-item failure is reported
/// and skipped; re-running over an existing vault never deletes
/// anything, it only overwrites files at the same computed paths.
#[derive(Debug, Clone)]
pub struct VaultWriter {
    base_path: PathBuf,
    workers: usize,
    write_indexes: bool,
}

/// What a generation run produced.
#[derive(Debug, Clone)]
pub struct VaultSummary {
    pub vault_path: PathBuf,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl VaultWriter {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            workers: DEFAULT_WORKERS,
            write_indexes: false,
        }
    }

    /// Width of the file-write worker pool. Values below 1 mean 1.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Also write a `README.md` index of notes into every folder.
    pub fn write_indexes(mut self, enabled: bool) -> Self {
        self.write_indexes = enabled;
        self
    }

    pub async fn generate(
        &self,
        spec: &VaultSpec,
        reporter: &dyn Reporter,
    ) -> Result<VaultSummary> {
        let vault_path = self.base_path.join(&spec.obsidian_config.vault_name);
        fs::create_dir_all(&vault_path).with_context(|| {
            format!("failed to create vault directory {}", vault_path.display())
        })?;
        reporter.event(ReportEvent::info("vault directory ready").with_path(&vault_path));

        let config_dir = vault_path.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).with_context(|| {
            format!("failed to create config directory {}", config_dir.display())
        })?;
        self.write_app_config(&config_dir, spec, reporter);

        let (tasks, mut reports) = build_tasks(&vault_path, spec);
        reports.extend(run_tasks(tasks, self.workers).await);
        for report in &reports {
            report_outcome(reporter, report);
        }

        if self.write_indexes {
            write_folder_indexes(&vault_path, &spec.folders, reporter);
        }

        Ok(summarize(vault_path, &reports))
    }

    /// Serialize the `.obsidian/app.json` settings file verbatim from the
    /// spec. A write failure here is reported, not fatal.
    fn write_app_config(&self, config_dir: &Path, spec: &VaultSpec, reporter: &dyn Reporter) {
        let path = config_dir.join(CONFIG_FILE);
        let content = json!({
            "plugin": spec.obsidian_config.plugins_enabled,
            "settings": spec.obsidian_config.settings,
        });
        match serde_json::to_string_pretty(&content) {
            Ok(rendered) => match fs::write(&path, rendered) {
                Ok(()) => {
                    reporter.event(ReportEvent::info("wrote vault config").with_path(&path));
                }
                Err(err) => {
                    reporter.event(
                        ReportEvent::error(format!("failed to write vault config: {err}"))
                            .with_path(&path),
                    );
                }
            },
            Err(err) => {
                reporter.event(
                    ReportEvent::error(format!("failed to serialize vault config: {err}"))
                        .with_path(&path),
                );
            }
        }
    }
}

/// Flatten the folder tree into independent tasks. Notes without a
/// filename never become tasks; they are reported as skipped up front.
fn build_tasks(vault_path: &Path, spec: &VaultSpec) -> (Vec<VaultTask>, Vec<TaskReport>) {
    let mut tasks = Vec::new();
    let mut skipped = Vec::new();
    for folder in &spec.folders {
        collect_folder_tasks(vault_path, folder, &spec.global_tags, &mut tasks, &mut skipped);
    }
    (tasks, skipped)
}

fn collect_folder_tasks(
    parent: &Path,
    folder: &FolderSpec,
    global_tags: &[String],
    tasks: &mut Vec<VaultTask>,
    skipped: &mut Vec<TaskReport>,
) {
    let folder_path = parent.join(&folder.folder_name);
    tasks.push(VaultTask::CreateFolder {
        path: folder_path.clone(),
    });

    for note in &folder.notes {
        match note.target_filename() {
            Some(filename) => {
                let content = render_note(note, global_tags, &folder.folder_type);
                tasks.push(VaultTask::WriteNote {
                    path: folder_path.join(filename),
                    content,
                });
            }
            None => skipped.push(TaskReport {
                path: folder_path.clone(),
                outcome: TaskOutcome::Skipped {
                    reason: "note has no filename".to_string(),
                },
            }),
        }
    }

    for subfolder in &folder.subfolders {
        collect_folder_tasks(&folder_path, subfolder, global_tags, tasks, skipped);
    }
}

fn report_outcome(reporter: &dyn Reporter, report: &TaskReport) {
    let event = match &report.outcome {
        TaskOutcome::Created { message } => ReportEvent::info(message.clone()),
        TaskOutcome::Skipped { reason } => ReportEvent::warn(reason.clone()),
        TaskOutcome::Failed { reason } => ReportEvent::error(reason.clone()),
    };
    reporter.event(event.with_path(report.path.clone()));
}

/// Write a `README.md` per folder listing its notes as wiki-links.
/// Runs after the fan-out so the directories already exist.
fn write_folder_indexes(parent: &Path, folders: &[FolderSpec], reporter: &dyn Reporter) {
    for folder in folders {
        let folder_path = parent.join(&folder.folder_name);
        let mut lines = vec![format!("# Index for {}\n", folder.folder_name)];
        for note in &folder.notes {
            if let Some(filename) = note.target_filename() {
                lines.push(format!("- [[{} | {}]]", filename, note.title));
            }
        }

        let path = folder_path.join("README.md");
        match fs::write(&path, lines.join("\n")) {
            Ok(()) => reporter.event(ReportEvent::info("wrote folder index").with_path(&path)),
            Err(err) => reporter.event(
                ReportEvent::error(format!("failed to write folder index: {err}")).with_path(&path),
            ),
        }

        write_folder_indexes(&folder_path, &folder.subfolders, reporter);
    }
}

fn summarize(vault_path: PathBuf, reports: &[TaskReport]) -> VaultSummary {
    let mut summary = VaultSummary {
        vault_path,
        created: 0,
        skipped: 0,
        failed: 0,
    };
    for report in reports {
        match report.outcome {
            TaskOutcome::Created { .. } => summary.created += 1,
            TaskOutcome::Skipped { .. } => summary.skipped += 1,
            TaskOutcome::Failed { .. } => summary.failed += 1,
        }
    }
    summary
}

// ── Tests ────────────────────────────────────────────────────────────────────
