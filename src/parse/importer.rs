use crate::model::Task;
use crate::parse::classifier::{Classifier, LineAction};
use crate::parse::ParseError;

/// Parse a plain-text document into an ordered task sequence.
///
/// Lines are trimmed and blank lines dropped (`\n` and `\r\n` both work).
/// Each remaining line is classified in order; task-opening lines push a new
/// task and continuation lines append to the most recently opened one.
///
/// Failure is atomic: an empty document, a continuation line before any
/// task, or an opening line with an empty name rejects the whole document.
pub fn parse_document(text: &str) -> Result<Vec<Task>, ParseError> {
    let classifier = Classifier::new();

    // 1-based source line numbers survive the blank-line filter so errors
    // point at the real input line.
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    let mut tasks: Vec<Task> = Vec::new();
    for (line_no, line) in lines {
        match classifier.classify(line) {
            LineAction::Open {
                name,
                description,
                completed,
            } => {
                if name.is_empty() {
                    return Err(ParseError::EmptyTaskName { line: line_no });
                }
                let mut task = Task::new(name);
                task.description = description;
                task.completed = completed;
                tasks.push(task);
            }
            LineAction::Describe(text) => {
                let current = open_task(&mut tasks, line_no, "description", line)?;
                current.push_description(&text);
            }
            LineAction::Subtask(name) => {
                let current = open_task(&mut tasks, line_no, "subtask", line)?;
                current.add_subtask(name);
            }
            LineAction::Note(text) => {
                let current = open_task(&mut tasks, line_no, "notes", line)?;
                current.push_note(&text);
            }
        }
    }

    log::debug!("parsed {} task(s)", tasks.len());
    Ok(tasks)
}

/// The currently open task is always the most recently opened one.
fn open_task<'a>(
    tasks: &'a mut Vec<Task>,
    line: usize,
    what: &'static str,
    text: &str,
) -> Result<&'a mut Task, ParseError> {
    tasks.last_mut().ok_or_else(|| ParseError::OrphanContinuation {
        line,
        what,
        text: text.to_string(),
    })
}
