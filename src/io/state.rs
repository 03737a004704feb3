use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted UI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Collapsed task positions, keyed per project. Positions, not task
    /// identities: the board rebuilds the set on every order change.
    #[serde(default)]
    pub collapsed: HashMap<String, BTreeSet<usize>>,
}

impl UiState {
    pub fn collapsed_for(&self, project: &str) -> BTreeSet<usize> {
        self.collapsed.get(project).cloned().unwrap_or_default()
    }

    pub fn set_collapsed(&mut self, project: &str, positions: BTreeSet<usize>) {
        if positions.is_empty() {
            self.collapsed.remove(project);
        } else {
            self.collapsed.insert(project.to_string(), positions);
        }
    }
}

/// Read .state.json from the given directory
pub fn read_ui_state(dir: &Path) -> Option<UiState> {
    let path = dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the given directory
pub fn write_ui_state(dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
