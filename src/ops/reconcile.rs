use indexmap::IndexSet;
use serde::Serialize;

use crate::model::Task;

/// Normalized key used for duplicate matching: trimmed and lowercased.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The task names already present in the target list, keyed
/// case-insensitively. Built fresh on every import attempt.
#[derive(Debug, Clone, Default)]
pub struct NameSet(IndexSet<String>);

impl NameSet {
    pub fn new() -> Self {
        NameSet(IndexSet::new())
    }

    /// Build from display names; each is normalized and empties are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = NameSet::new();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    /// Insert a display name. Returns false if it was already present
    /// or normalizes to the empty string.
    pub fn insert(&mut self, name: &str) -> bool {
        let key = name_key(name);
        if key.is_empty() {
            return false;
        }
        self.0.insert(key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name_key(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which batch a commit carries, mirroring the flags the commit endpoint
/// distinguishes batches by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchKind {
    /// The whole parsed batch; used when the partition has no duplicates
    Full,
    /// The non-conflicting subset, committed without confirmation
    FreshOnly,
    /// Duplicates the caller explicitly accepted
    ConfirmedDuplicates,
}

/// Error type for commit operations
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("commit rejected: {0}")]
    Rejected(String),
    #[error("commit failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for committed task batches. Transport is the implementor's
/// concern; the reconciler only guarantees each batch kind is delivered at
/// most once per plan.
pub trait CommitSink {
    fn commit(&mut self, batch: &[Task], kind: BatchKind) -> Result<(), CommitError>;
}

/// Outcome of one batch commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReceipt {
    pub kind: BatchKind,
    pub committed: usize,
}

/// One duplicate awaiting an accept/reject decision.
#[derive(Debug, Clone)]
pub struct DuplicateEntry {
    pub task: Task,
    pub selected: bool,
}

/// The fresh/duplicate partition of a parsed batch, plus the selection
/// state for the duplicate side.
///
/// The partition is computed once, against the name set supplied at
/// construction; later changes to the live list never re-derive it. The
/// fresh subset and the confirmed duplicates are committed by two
/// independent operations: a failure in one does not roll back or block
/// the other.
#[derive(Debug)]
pub struct ReconcilePlan {
    /// Taken by [`ReconcilePlan::commit_fresh`]; committing twice is a no-op.
    fresh: Option<Vec<Task>>,
    duplicates: Vec<DuplicateEntry>,
}

impl ReconcilePlan {
    /// Partition `tasks` against `existing`. A task is a duplicate when its
    /// normalized name is in `existing` or was already seen earlier in the
    /// batch; the first occurrence of an intra-batch repeat stays fresh.
    /// Tasks with empty names never participate in duplicate detection.
    ///
    /// `preselect` sets the initial accept/reject state of every duplicate.
    pub fn new(tasks: Vec<Task>, existing: &NameSet, preselect: bool) -> Self {
        let mut seen: IndexSet<String> = IndexSet::new();
        let mut fresh = Vec::new();
        let mut duplicates = Vec::new();

        for task in tasks {
            let key = name_key(&task.name);
            if key.is_empty() {
                fresh.push(task);
                continue;
            }
            if existing.contains(&task.name) || seen.contains(&key) {
                duplicates.push(DuplicateEntry {
                    task,
                    selected: preselect,
                });
            } else {
                seen.insert(key);
                fresh.push(task);
            }
        }

        log::debug!(
            "partitioned batch: {} fresh, {} duplicate(s)",
            fresh.len(),
            duplicates.len()
        );

        ReconcilePlan {
            fresh: Some(fresh),
            duplicates,
        }
    }

    pub fn fresh(&self) -> &[Task] {
        self.fresh.as_deref().unwrap_or(&[])
    }

    pub fn duplicates(&self) -> &[DuplicateEntry] {
        &self.duplicates
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    /// Toggle one duplicate. Returns false if `index` is out of range.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> bool {
        match self.duplicates.get_mut(index) {
            Some(entry) => {
                entry.selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn select_all(&mut self) {
        for entry in &mut self.duplicates {
            entry.selected = true;
        }
    }

    pub fn select_none(&mut self) {
        for entry in &mut self.duplicates {
            entry.selected = false;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.duplicates.iter().filter(|e| e.selected).count()
    }

    /// Whether every duplicate is currently accepted (drives the
    /// select-all/select-none toggle label).
    pub fn all_selected(&self) -> bool {
        self.duplicates.iter().all(|e| e.selected)
    }

    /// Commit the non-conflicting part of the batch. When the partition has
    /// no duplicates this is the whole batch, flagged [`BatchKind::Full`];
    /// otherwise the fresh subset goes out as [`BatchKind::FreshOnly`].
    ///
    /// The fresh subset is consumed even on failure: a failed commit is
    /// terminal for this attempt and is never retried automatically.
    pub fn commit_fresh<S: CommitSink>(
        &mut self,
        sink: &mut S,
    ) -> Result<CommitReceipt, CommitError> {
        let kind = if self.duplicates.is_empty() {
            BatchKind::Full
        } else {
            BatchKind::FreshOnly
        };
        let batch = self.fresh.take().unwrap_or_default();
        if batch.is_empty() {
            return Ok(CommitReceipt { kind, committed: 0 });
        }
        sink.commit(&batch, kind)?;
        Ok(CommitReceipt {
            kind,
            committed: batch.len(),
        })
    }

    /// Commit the accepted duplicates as an independent second operation,
    /// consuming the plan. Rejected duplicates are discarded and never
    /// retried. With nothing selected the sink is not called at all.
    pub fn commit_confirmed<S: CommitSink>(
        self,
        sink: &mut S,
    ) -> Result<CommitReceipt, CommitError> {
        let batch: Vec<Task> = self
            .duplicates
            .into_iter()
            .filter(|e| e.selected)
            .map(|e| e.task)
            .collect();
        if batch.is_empty() {
            return Ok(CommitReceipt {
                kind: BatchKind::ConfirmedDuplicates,
                committed: 0,
            });
        }
        sink.commit(&batch, BatchKind::ConfirmedDuplicates)?;
        Ok(CommitReceipt {
            kind: BatchKind::ConfirmedDuplicates,
            committed: batch.len(),
        })
    }
}
