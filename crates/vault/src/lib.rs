pub mod render;
pub mod report;
pub mod scheduler;
pub mod tree;
pub mod writer;

pub use render::{merge_tags, render_note};
pub use report::{CollectingReporter, ReportEvent, ReportLevel, Reporter, TracingReporter};
pub use scheduler::{TaskOutcome, TaskReport, VaultTask, run_tasks};
pub use tree::render_tree;
pub use writer::{VaultSummary, VaultWriter};
