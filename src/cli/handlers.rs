use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::cli::commands::{CheckArgs, Cli, Commands, ImportArgs, ParseArgs};
use crate::cli::output::{BatchJson, BatchRecord, ImportJson, ParseJson, print_task_list};
use crate::io::config_io;
use crate::model::Task;
use crate::ops::reconcile::{
    BatchKind, CommitError, CommitReceipt, CommitSink, NameSet, ReconcilePlan,
};
use crate::parse::parse_document;

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    match cli.command {
        Commands::Parse(args) => cmd_parse(args, json),
        Commands::Check(args) => cmd_check(args, json),
        Commands::Import(args) => cmd_import(args, json),
    }
}

/// Read the input document, with '-' meaning stdin.
fn read_input(file: &str) -> io::Result<String> {
    if file == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(file)
    }
}

fn cmd_parse(args: ParseArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(&args.file)?;
    let tasks = parse_document(&text)?;
    if json {
        let out = ParseJson {
            count: tasks.len(),
            tasks: &tasks,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_task_list(&tasks);
    }
    Ok(())
}

fn cmd_check(args: CheckArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(&args.file)?;
    let tasks = parse_document(&text)?;
    if json {
        println!("{}", serde_json::json!({ "ok": true, "count": tasks.len() }));
    } else {
        println!("ok: {} task(s)", tasks.len());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Where committed batches go. The default prints each committed task;
/// --out appends one JSON object per batch; --json keeps the sink quiet so
/// stdout stays a single JSON report.
enum CliSink {
    Text,
    Quiet,
    Jsonl(File),
}

impl CommitSink for CliSink {
    fn commit(&mut self, batch: &[Task], kind: BatchKind) -> Result<(), CommitError> {
        match self {
            CliSink::Text => {
                for task in batch {
                    println!("+ {} ({})", task.name, kind_label(kind));
                }
                Ok(())
            }
            CliSink::Quiet => Ok(()),
            CliSink::Jsonl(file) => {
                let record = BatchRecord { kind, tasks: batch };
                let line = serde_json::to_string(&record)
                    .map_err(|e| CommitError::Rejected(e.to_string()))?;
                writeln!(file, "{}", line)?;
                Ok(())
            }
        }
    }
}

fn kind_label(kind: BatchKind) -> &'static str {
    match kind {
        BatchKind::Full => "full",
        BatchKind::FreshOnly => "fresh",
        BatchKind::ConfirmedDuplicates => "duplicate",
    }
}

fn cmd_import(args: ImportArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(&args.file)?;
    let tasks = parse_document(&text)?;
    let parsed = tasks.len();

    let existing = match &args.existing {
        Some(path) => NameSet::from_names(fs::read_to_string(path)?.lines()),
        None => NameSet::new(),
    };
    log::info!("{} existing name(s) loaded", existing.len());

    let config = config_io::read_config(Path::new("."))?;
    let mut plan = ReconcilePlan::new(tasks, &existing, config.import.preselect_duplicates);
    if args.accept_duplicates {
        plan.select_all();
    }
    if args.reject_duplicates {
        plan.select_none();
    }

    let mut sink = match &args.out {
        Some(path) => CliSink::Jsonl(OpenOptions::new().create(true).append(true).open(path)?),
        None if json => CliSink::Quiet,
        None => CliSink::Text,
    };

    let fresh_kind = if plan.has_duplicates() {
        BatchKind::FreshOnly
    } else {
        BatchKind::Full
    };
    let dup_total = plan.duplicates().len();
    let fresh_names: Vec<String> = plan.fresh().iter().map(|t| t.name.clone()).collect();
    let fresh_result = plan.commit_fresh(&mut sink);

    let dup_report = if plan.has_duplicates() {
        let names: Vec<String> = plan
            .duplicates()
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.task.name.clone())
            .collect();
        Some(batch_json(
            plan.commit_confirmed(&mut sink),
            BatchKind::ConfirmedDuplicates,
            names,
        ))
    } else {
        None
    };
    let fresh_report = batch_json(fresh_result, fresh_kind, fresh_names);

    let failed = fresh_report.error.is_some()
        || dup_report.as_ref().is_some_and(|r| r.error.is_some());

    if json {
        let out = ImportJson {
            parsed,
            fresh: fresh_report,
            duplicates: dup_report,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        report_text(parsed, &fresh_report, dup_report.as_ref(), dup_total);
    }

    if failed {
        return Err("one or more commits failed".into());
    }
    Ok(())
}

fn batch_json(
    result: Result<CommitReceipt, CommitError>,
    kind: BatchKind,
    names: Vec<String>,
) -> BatchJson {
    match result {
        Ok(receipt) => BatchJson {
            kind: receipt.kind,
            committed: receipt.committed,
            names,
            error: None,
        },
        Err(e) => BatchJson {
            kind,
            committed: 0,
            names,
            error: Some(e.to_string()),
        },
    }
}

fn report_text(parsed: usize, fresh: &BatchJson, duplicates: Option<&BatchJson>, dup_total: usize) {
    println!("parsed {} task(s)", parsed);
    match &fresh.error {
        Some(e) => println!("{} commit failed: {}", kind_label(fresh.kind), e),
        None => println!("{} committed: {}", kind_label(fresh.kind), fresh.committed),
    }
    if let Some(dup) = duplicates {
        match &dup.error {
            Some(e) => println!("duplicate commit failed: {}", e),
            None => println!(
                "duplicates committed: {} (of {} flagged)",
                dup.committed, dup_total
            ),
        }
    }
}
