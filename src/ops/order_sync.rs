use std::collections::BTreeSet;

use crate::model::Task;

/// A task row as currently rendered: the task plus its live collapsed flag.
/// The flag travels with the row through reorders and deletions; the
/// persisted set only records positions at sync time.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub task: Task,
    pub collapsed: bool,
}

/// Keeps task `order` fields and the collapsed-position set in step with
/// the live list.
///
/// Every operation that changes count or order re-runs a full sync: each
/// task's `order` field is rewritten to its 0-based position and the
/// collapsed set is rebuilt from the rows' live flags. The set is keyed by
/// position, so it is never patched incrementally — a deletion implicitly
/// shifts every later collapsed position down by one.
#[derive(Debug, Default)]
pub struct TaskBoard {
    rows: Vec<TaskRow>,
    collapsed: BTreeSet<usize>,
}

impl TaskBoard {
    pub fn new() -> Self {
        TaskBoard::default()
    }

    /// Build a board from tasks plus a previously persisted collapsed set,
    /// re-numbering everything immediately.
    pub fn with_collapsed(tasks: Vec<Task>, collapsed: &BTreeSet<usize>) -> Self {
        let rows = tasks
            .into_iter()
            .enumerate()
            .map(|(i, task)| TaskRow {
                task,
                collapsed: collapsed.contains(&i),
            })
            .collect();
        let mut board = TaskBoard {
            rows,
            collapsed: BTreeSet::new(),
        };
        board.sync();
        board
    }

    /// Append a task at the end, expanded.
    pub fn push(&mut self, task: Task) {
        self.rows.push(TaskRow {
            task,
            collapsed: false,
        });
        self.sync();
    }

    /// Remove the task at `index`. Later positions shift down by one.
    pub fn remove(&mut self, index: usize) -> Option<Task> {
        if index >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(index);
        self.sync();
        Some(row.task)
    }

    /// Move the row at `from` so it ends up at `to`, shifting the rows in
    /// between (drag-reorder semantics).
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.rows.len() || to >= self.rows.len() {
            return;
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);
        self.sync();
    }

    /// Set the live collapsed flag of the row at `index`.
    pub fn set_collapsed(&mut self, index: usize, collapsed: bool) {
        if let Some(row) = self.rows.get_mut(index) {
            row.collapsed = collapsed;
            self.sync();
        }
    }

    pub fn rows(&self) -> &[TaskRow] {
        &self.rows
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.rows.iter().map(|r| &r.task)
    }

    /// Positions currently collapsed, as of the last sync. This is the set
    /// that gets persisted.
    pub fn collapsed_positions(&self) -> &BTreeSet<usize> {
        &self.collapsed
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.rows.into_iter().map(|r| r.task).collect()
    }

    fn sync(&mut self) {
        let mut collapsed = BTreeSet::new();
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.task.order = i;
            if row.collapsed {
                collapsed.insert(i);
            }
        }
        self.collapsed = collapsed;
    }
}
