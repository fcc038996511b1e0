//! bcp - Batch Copy
//!
//! Copies a `;`-separated list of files into a directory, powered by batchcp.

use batchcp::{
    BatchCopier, BatchEvent, BatchStats, CandidateList, CopyOptions, Error as BatchError,
    ErrorCode, OnFailure, PlanItem, create_progress_bar,
};
use clap::{ArgAction, Parser, ValueEnum};
use indicatif::ProgressBar;
use serde_json::{Value, json};
use std::io::{self, IsTerminal};
use std::path::Path;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// bcp - Copy a list of files into a directory
///
/// FILES is a `;`-separated list of source files. Each one that exists is
/// copied to DEST/<file name>; missing ones are skipped silently. DEST must
/// already exist.
///
/// Usage:
///   bcp "a/x.dll;b/y.dll" out
#[derive(Parser, Debug)]
#[command(name = "bcp", version, about, long_about = None)]
struct Args {
    /// Source files joined with ';'
    files: Option<String>,

    /// Destination directory (must exist)
    dest: Option<String>,

    /// Print what would be copied without copying
    #[arg(short = 'n', long = "plan", alias = "dry-run")]
    plan: bool,

    /// Keep copying after a failure instead of stopping at the first one
    #[arg(short = 'k', long)]
    keep_going: bool,

    /// Do not copy permission bits
    #[arg(long)]
    no_perms: bool,

    /// Do not call fsync after each file (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Do not print the per-file "Copying" lines
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Log more (repeat for more detail)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Batch(source) => source.code(),
            Self::JsonSerialize { .. } => ErrorCode::Internal,
        }
    }
}

#[derive(Debug, Clone)]
struct ExecuteItem {
    source: String,
    destination: String,
    outcome: &'static str,
    bytes_copied: Option<u64>,
    error_code: Option<ErrorCode>,
    error_message: Option<String>,
}

impl ExecuteItem {
    fn copied(item: &PlanItem, bytes: u64) -> Self {
        Self {
            source: display_path(&item.source),
            destination: display_path(&item.destination),
            outcome: "copied",
            bytes_copied: Some(bytes),
            error_code: None,
            error_message: None,
        }
    }

    fn failed(item: &PlanItem, error: &BatchError) -> Self {
        Self {
            source: display_path(&item.source),
            destination: display_path(&item.destination),
            outcome: "failed",
            bytes_copied: None,
            error_code: Some(error.code()),
            error_message: Some(error.to_string()),
        }
    }

    fn to_json_value(&self) -> Value {
        let mut obj = serde_json::Map::new();
        obj.insert("source".to_owned(), Value::String(self.source.clone()));
        obj.insert(
            "destination".to_owned(),
            Value::String(self.destination.clone()),
        );
        obj.insert("outcome".to_owned(), Value::String(self.outcome.to_owned()));

        if let Some(bytes) = self.bytes_copied {
            obj.insert("bytes_copied".to_owned(), Value::Number(bytes.into()));
        }
        if let Some(code) = self.error_code {
            obj.insert("error_code".to_owned(), Value::String(code.as_str().to_owned()));
        }
        if let Some(ref message) = self.error_message {
            obj.insert("error_message".to_owned(), Value::String(message.clone()));
        }

        Value::Object(obj)
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(error) = run(args) {
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: Args) -> CliResult<()> {
    // Both operands or neither: a lone FILES means nothing to do
    let (files, dest) = match (args.files.as_deref(), args.dest.as_deref()) {
        (Some(files), Some(dest)) => (files, dest),
        _ => ("", ""),
    };
    tracing::debug!(files, dest, "resolved operands");

    let options = build_options(&args);
    let candidates = CandidateList::parse(files);
    let copier = BatchCopier::new(dest, options);

    if args.plan {
        let plan = copier.plan(&candidates);
        return emit_plan_output(args.output, args.quiet, &plan);
    }

    let pb = if args.progress {
        Some(create_progress_bar(copier.plan(&candidates).len() as u64))
    } else {
        None
    };

    let print_lines = args.output == OutputMode::Human && !args.quiet;
    let mut items: Vec<ExecuteItem> = Vec::new();

    let result = copier.run(&candidates, |event| match event {
        BatchEvent::Copying(item) => {
            if print_lines {
                print_progress_line(pb.as_ref(), item);
            }
        }
        BatchEvent::Copied { item, bytes } => {
            items.push(ExecuteItem::copied(item, bytes));
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        BatchEvent::Failed { item, error } => {
            items.push(ExecuteItem::failed(item, error));
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if args.output == OutputMode::Json {
        let stats = result.as_ref().ok();
        emit_execute_output(&items, stats)?;
    }

    let stats = result?;
    tracing::info!(
        files_copied = stats.files_copied,
        files_skipped = stats.files_skipped,
        bytes_copied = stats.bytes_copied,
        "done in {:?}",
        stats.duration
    );
    Ok(())
}

fn build_options(args: &Args) -> CopyOptions {
    let mut options = CopyOptions::default();
    if args.keep_going {
        options = options.with_on_failure(OnFailure::Continue);
    }
    if args.no_perms {
        options = options.without_permissions();
    }
    if args.no_sync {
        options = options.without_fsync();
    }
    options
}

fn print_progress_line(pb: Option<&ProgressBar>, item: &PlanItem) {
    match pb {
        Some(pb) => pb.suspend(|| println!("{item}")),
        None => println!("{item}"),
    }
}

fn emit_plan_output(output_mode: OutputMode, quiet: bool, items: &[PlanItem]) -> CliResult<()> {
    match output_mode {
        OutputMode::Human => {
            if !quiet {
                for item in items {
                    println!("{item}");
                }
            }
            Ok(())
        }
        OutputMode::Json => {
            let payload = json!({
                "schema_version": "1.0",
                "mode": "plan",
                "items": items.iter().map(|item| json!({
                    "source": display_path(&item.source),
                    "destination": display_path(&item.destination),
                })).collect::<Vec<Value>>(),
            });
            print_json_value(&payload)
        }
    }
}

fn emit_execute_output(items: &[ExecuteItem], stats: Option<&BatchStats>) -> CliResult<()> {
    let mut payload = json!({
        "schema_version": "1.0",
        "mode": "execute",
        "items": items.iter().map(ExecuteItem::to_json_value).collect::<Vec<Value>>(),
    });
    if let (Some(stats), Value::Object(obj)) = (stats, &mut payload) {
        obj.insert(
            "stats".to_owned(),
            json!({
                "files_copied": stats.files_copied,
                "files_skipped": stats.files_skipped,
                "bytes_copied": stats.bytes_copied,
            }),
        );
    }
    print_json_value(&payload)
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
