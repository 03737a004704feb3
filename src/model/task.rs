use serde::{Deserialize, Serialize};

/// A subtask. Subtasks belong to exactly one parent task and are identified
/// by their position in the parent's list, not by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

/// A task produced by the text importer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Display name. Non-empty for any task that survives parsing.
    pub name: String,
    /// Multi-line description, newline-joined in input order.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    /// Multi-line notes, newline-joined in input order.
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// 0-based position in the persisted list. Rewritten by the order
    /// synchronizer after every append, delete, or reorder.
    #[serde(default)]
    pub order: usize,
}

impl Task {
    /// Create a task with the given name, not completed, everything else empty.
    pub fn new(name: impl Into<String>) -> Self {
        Task {
            name: name.into(),
            description: String::new(),
            completed: false,
            notes: String::new(),
            subtasks: Vec::new(),
            order: 0,
        }
    }

    /// Append a line to the description. Accumulates, never overwrites.
    pub fn push_description(&mut self, text: &str) {
        if !self.description.is_empty() {
            self.description.push('\n');
        }
        self.description.push_str(text);
    }

    /// Append a line to the notes. Accumulates, never overwrites.
    pub fn push_note(&mut self, text: &str) {
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(text);
    }

    /// Add a subtask at the end of the subtask list.
    pub fn add_subtask(&mut self, name: impl Into<String>) {
        self.subtasks.push(Subtask {
            name: name.into(),
            completed: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_description_accumulates() {
        let mut task = Task::new("Fix login");
        task.push_description("first line");
        task.push_description("second line");
        assert_eq!(task.description, "first line\nsecond line");
    }

    #[test]
    fn test_push_note_accumulates() {
        let mut task = Task::new("Fix login");
        task.push_note("check the session cookie");
        task.push_note("expires after 30m");
        assert_eq!(task.notes, "check the session cookie\nexpires after 30m");
    }

    #[test]
    fn test_add_subtask_order() {
        let mut task = Task::new("Release");
        task.add_subtask("tag");
        task.add_subtask("publish");
        assert_eq!(task.subtasks.len(), 2);
        assert_eq!(task.subtasks[0].name, "tag");
        assert_eq!(task.subtasks[1].name, "publish");
        assert!(!task.subtasks[0].completed);
    }
}
