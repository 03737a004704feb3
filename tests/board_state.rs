//! The board/state round trip: restore a board from persisted collapsed
//! positions, mutate it, and persist the recomputed set.

use std::collections::BTreeSet;

use intake::io::state::{UiState, read_ui_state, write_ui_state};
use intake::model::Task;
use intake::ops::TaskBoard;
use tempfile::TempDir;

fn tasks(names: &[&str]) -> Vec<Task> {
    names.iter().map(|n| Task::new(*n)).collect()
}

#[test]
fn test_collapse_state_survives_delete_and_reload() {
    let dir = TempDir::new().unwrap();

    // Session one: three tasks, middle one collapsed
    let mut board = TaskBoard::with_collapsed(tasks(&["a", "b", "c"]), &BTreeSet::new());
    board.set_collapsed(1, true);

    let mut state = UiState::default();
    state.set_collapsed("proj", board.collapsed_positions().clone());
    write_ui_state(dir.path(), &state).unwrap();

    // Session two: restore, then delete the first task
    let state = read_ui_state(dir.path()).unwrap();
    let mut board = TaskBoard::with_collapsed(tasks(&["a", "b", "c"]), &state.collapsed_for("proj"));
    board.remove(0);

    // "b" moved to position 0 and stayed collapsed
    assert_eq!(board.collapsed_positions(), &BTreeSet::from([0]));
    let orders: Vec<usize> = board.tasks().map(|t| t.order).collect();
    assert_eq!(orders, vec![0, 1]);

    // Persist the remapped set
    let mut state = UiState::default();
    state.set_collapsed("proj", board.collapsed_positions().clone());
    write_ui_state(dir.path(), &state).unwrap();
    let state = read_ui_state(dir.path()).unwrap();
    assert_eq!(state.collapsed_for("proj"), BTreeSet::from([0]));
}

#[test]
fn test_imported_batch_lands_on_the_board_in_order() {
    let text = "Tarea: First\nTarea: Second\nTarea: Third\n";
    let parsed = intake::parse::parse_document(text).unwrap();

    let mut board = TaskBoard::new();
    for task in parsed {
        board.push(task);
    }
    let pairs: Vec<(&str, usize)> = board.tasks().map(|t| (t.name.as_str(), t.order)).collect();
    assert_eq!(pairs, vec![("First", 0), ("Second", 1), ("Third", 2)]);
}
