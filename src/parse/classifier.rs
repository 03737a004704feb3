use regex::Regex;

/// The import action one input line represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Open a new task, closing any previously open one.
    Open {
        name: String,
        description: String,
        completed: bool,
    },
    /// Append a line to the open task's description.
    Describe(String),
    /// Add a subtask to the open task.
    Subtask(String),
    /// Append a line to the open task's notes.
    Note(String),
}

impl LineAction {
    fn open(name: String, completed: bool) -> Self {
        LineAction::Open {
            name,
            description: String::new(),
            completed,
        }
    }
}

/// Classifies one trimmed, non-empty line into a [`LineAction`].
///
/// The rules form a priority-ordered cascade evaluated top to bottom; the
/// first match wins and no rule is retried. See [`Classifier::classify`]
/// for the order.
pub struct Classifier {
    /// `<name>, Sí|Si|No` with nothing after the token
    yes_no: Regex,
    /// `<number> - <content>`
    heading: Regex,
    /// `- <content>`
    bullet: Regex,
    /// The connector word that splits a heading into title and description
    connector: Regex,
}

impl Classifier {
    pub fn new() -> Self {
        Classifier {
            yes_no: Regex::new(r"(?i)^(.*),\s*(sí|si|no)\s*$").expect("valid regex"),
            heading: Regex::new(r"^(\d+)\s*-\s*(.+)$").expect("valid regex"),
            bullet: Regex::new(r"^-\s*(.+)$").expect("valid regex"),
            connector: Regex::new(r"(?i)\s+(?:y|and)\s+").expect("valid regex"),
        }
    }

    /// Decide what import action `line` represents. `line` must already be
    /// trimmed and non-empty.
    ///
    /// Rule order:
    /// 1. `<name>, Sí|Si|No` opens a task with the completion flag
    /// 2. `Tarea:` opens a task named by the remainder
    /// 3. `<number> - <content>` opens a numbered task, splitting a
    ///    description out of the content at a colon or connector word
    /// 4. `-` bullet appends to the open task's description
    /// 5. `Subtarea:` adds a subtask to the open task
    /// 6. `Notas:` appends to the open task's notes
    /// 7. `Descripcion:` / `Descripción:` appends to the description
    /// 8. Text after the last comma is `si`/`sí`/`no`: opens a task
    /// 9. The whole line becomes a new task's name
    ///
    /// Opening actions may carry an empty name (e.g. `Tarea:` with a blank
    /// remainder); the importer rejects those with a format error.
    pub fn classify(&self, line: &str) -> LineAction {
        if let Some(caps) = self.yes_no.captures(line) {
            let name = caps[1].trim().to_string();
            let completed = caps[2].to_lowercase() != "no";
            return LineAction::open(name, completed);
        }

        if let Some(rest) = strip_prefix_ci(line, "tarea:") {
            return LineAction::open(rest.trim().to_string(), false);
        }

        if let Some(caps) = self.heading.captures(line) {
            let number = &caps[1];
            let (title, description) = self.split_heading(&caps[2]);
            let name = format!("{}- {}", number, title).trim().to_string();
            return LineAction::Open {
                name,
                description,
                completed: false,
            };
        }

        if let Some(caps) = self.bullet.captures(line) {
            return LineAction::Describe(caps[1].to_string());
        }

        if let Some(rest) = strip_prefix_ci(line, "subtarea:") {
            return LineAction::Subtask(rest.trim().to_string());
        }

        if let Some(rest) = strip_prefix_ci(line, "notas:") {
            return LineAction::Note(rest.trim().to_string());
        }

        let lower = line.to_lowercase();
        if lower.starts_with("descripcion:") || lower.starts_with("descripción:") {
            // Everything after the first colon, later colons preserved
            let rest = line.splitn(2, ':').nth(1).unwrap_or("");
            return LineAction::Describe(rest.trim().to_string());
        }

        if let Some(idx) = line.rfind(',') {
            let status = line[idx + 1..].trim().to_lowercase();
            if matches!(status.as_str(), "si" | "sí" | "no") {
                let name = line[..idx].trim().to_string();
                return LineAction::open(name, status != "no");
            }
        }

        LineAction::open(line.to_string(), false)
    }

    /// Split heading content into title and description.
    ///
    /// A colon splits first: text before is the title, text after is the
    /// description. When there is no colon (or the text after the colon is
    /// blank), the title is split at the first connector word instead; the
    /// remaining pieces are rejoined with `y`. With neither, the whole
    /// content is the title.
    fn split_heading(&self, content: &str) -> (String, String) {
        if let Some(idx) = content.find(':') {
            let title = content[..idx].trim().to_string();
            let rest = content[idx + 1..].trim().to_string();
            if rest.is_empty() {
                if let Some((t, d)) = self.split_connector(&title) {
                    return (t, d);
                }
            }
            return (title, rest);
        }
        if let Some((title, rest)) = self.split_connector(content) {
            return (title, rest);
        }
        (content.trim().to_string(), String::new())
    }

    fn split_connector(&self, text: &str) -> Option<(String, String)> {
        let parts: Vec<&str> = self.connector.split(text).collect();
        if parts.len() < 2 {
            return None;
        }
        let title = parts[0].trim().to_string();
        let rest = parts[1..].join(" y ").trim().to_string();
        Some((title, rest))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new()
    }
}

/// Strip an ASCII prefix case-insensitively, returning the remainder.
fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(line: &str) -> LineAction {
        Classifier::new().classify(line)
    }

    #[test]
    fn test_yes_no_line_opens_completed_task() {
        assert_eq!(
            classify("Clean house, Sí"),
            LineAction::open("Clean house".into(), true)
        );
        assert_eq!(
            classify("Pay bills, No"),
            LineAction::open("Pay bills".into(), false)
        );
        assert_eq!(
            classify("Water plants, si"),
            LineAction::open("Water plants".into(), true)
        );
    }

    #[test]
    fn test_yes_no_takes_name_up_to_last_comma() {
        assert_eq!(
            classify("Wash, dry, fold, No"),
            LineAction::open("Wash, dry, fold".into(), false)
        );
    }

    #[test]
    fn test_tarea_prefix_any_case() {
        assert_eq!(
            classify("Tarea: Fix the roof"),
            LineAction::open("Fix the roof".into(), false)
        );
        assert_eq!(
            classify("TAREA:   Paint fence"),
            LineAction::open("Paint fence".into(), false)
        );
    }

    #[test]
    fn test_tarea_with_blank_remainder_yields_empty_name() {
        assert_eq!(classify("Tarea:   "), LineAction::open(String::new(), false));
    }

    #[test]
    fn test_heading_with_colon_splits_title_and_description() {
        assert_eq!(
            classify("3 - Kitchen: scrub the counters"),
            LineAction::Open {
                name: "3- Kitchen".into(),
                description: "scrub the counters".into(),
                completed: false,
            }
        );
    }

    #[test]
    fn test_heading_connector_split() {
        assert_eq!(
            classify("5 - Buy milk and bake bread"),
            LineAction::Open {
                name: "5- Buy milk".into(),
                description: "bake bread".into(),
                completed: false,
            }
        );
        assert_eq!(
            classify("2 - Comprar leche y hacer pan"),
            LineAction::Open {
                name: "2- Comprar leche".into(),
                description: "hacer pan".into(),
                completed: false,
            }
        );
    }

    #[test]
    fn test_heading_connector_rejoins_later_occurrences() {
        assert_eq!(
            classify("1 - Lavar y secar y doblar"),
            LineAction::Open {
                name: "1- Lavar".into(),
                description: "secar y doblar".into(),
                completed: false,
            }
        );
    }

    #[test]
    fn test_heading_colon_with_blank_rest_falls_back_to_connector() {
        assert_eq!(
            classify("4 - Planchar y guardar:"),
            LineAction::Open {
                name: "4- Planchar".into(),
                description: "guardar".into(),
                completed: false,
            }
        );
    }

    #[test]
    fn test_heading_without_colon_or_connector() {
        assert_eq!(
            classify("7 - Vacuum the hallway"),
            LineAction::Open {
                name: "7- Vacuum the hallway".into(),
                description: String::new(),
                completed: false,
            }
        );
    }

    #[test]
    fn test_bullet_appends_description() {
        assert_eq!(
            classify("- more detail here"),
            LineAction::Describe("more detail here".into())
        );
        assert_eq!(classify("-no space"), LineAction::Describe("no space".into()));
    }

    #[test]
    fn test_subtarea_and_notas() {
        assert_eq!(
            classify("Subtarea: sand the door"),
            LineAction::Subtask("sand the door".into())
        );
        assert_eq!(
            classify("Notas: needs two coats"),
            LineAction::Note("needs two coats".into())
        );
    }

    #[test]
    fn test_descripcion_keeps_later_colons() {
        assert_eq!(
            classify("Descripcion: due: friday"),
            LineAction::Describe("due: friday".into())
        );
        assert_eq!(
            classify("Descripción: ver plano"),
            LineAction::Describe("ver plano".into())
        );
    }

    #[test]
    fn test_plain_line_is_a_task_name() {
        assert_eq!(
            classify("Just a chore"),
            LineAction::open("Just a chore".into(), false)
        );
    }

    #[test]
    fn test_trailing_comma_without_status_is_a_plain_name() {
        assert_eq!(
            classify("Buy nails, maybe screws"),
            LineAction::open("Buy nails, maybe screws".into(), false)
        );
    }

    #[test]
    fn test_yes_no_beats_heading() {
        // Rule 1 fires before the numbered-heading rule
        assert_eq!(
            classify("1 - Mop floor, Sí"),
            LineAction::open("1 - Mop floor".into(), true)
        );
    }

    #[test]
    fn test_tarea_beats_heading_and_bullet() {
        assert_eq!(
            classify("Tarea: 5 - numbered name"),
            LineAction::open("5 - numbered name".into(), false)
        );
    }

    #[test]
    fn test_subtarea_is_not_tarea() {
        // "Subtarea:" must not match the "tarea:" prefix rule
        assert_eq!(
            classify("Subtarea: inner"),
            LineAction::Subtask("inner".into())
        );
    }
}
