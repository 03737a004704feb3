use serde::Serialize;

use crate::model::Task;
use crate::ops::reconcile::BatchKind;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ParseJson<'a> {
    pub count: usize,
    pub tasks: &'a [Task],
}

#[derive(Serialize)]
pub struct ImportJson {
    pub parsed: usize,
    pub fresh: BatchJson,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<BatchJson>,
}

/// One commit attempt as reported to the caller.
#[derive(Serialize)]
pub struct BatchJson {
    pub kind: BatchKind,
    pub committed: usize,
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One committed batch as appended to the --out JSON-lines file.
#[derive(Serialize)]
pub struct BatchRecord<'a> {
    pub kind: BatchKind,
    pub tasks: &'a [Task],
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Print a task list in a compact human-readable form.
pub fn print_task_list(tasks: &[Task]) {
    for task in tasks {
        let mark = if task.completed { 'x' } else { ' ' };
        println!("[{}] {}", mark, task.name);
        for line in task.description.lines() {
            println!("      {}", line);
        }
        for sub in &task.subtasks {
            let mark = if sub.completed { 'x' } else { ' ' };
            println!("    [{}] {}", mark, sub.name);
        }
        for line in task.notes.lines() {
            println!("      note: {}", line);
        }
    }
}
