#![forbid(unsafe_code)]

pub mod cli;
pub mod invoice;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod refusal;
pub mod rename;
pub mod witness;

use std::path::{Path, PathBuf};

const FOLDER_QUESTION: &str = "Folder with the .xml and .pdf files: ";
const NAME_QUESTION: &str = "Name to ignore (the tracked party): ";
const NEXT_COMMAND: &str = "invoice-renamer <FOLDER> --name <NAME>";

/// Run the invoice-renamer CLI. Returns an exit code (0, 1, or 2).
pub fn run() -> u8 {
    use clap::Parser;
    use cli::{Cli, Command};

    // Parse CLI args (handles --version and --help via clap, then exits)
    let cli = Cli::parse();

    if cli.describe {
        return handle_describe();
    }

    match cli.command {
        Some(Command::Witness { action }) => handle_witness_command(action),
        None => handle_rename_mode(&cli),
    }
}

/// Handle default run mode: rename one folder.
fn handle_rename_mode(cli: &cli::Cli) -> u8 {
    use progress::{ProgressTracker, report_warning_code};
    use rename::{WarningCode, rename_all_with};

    let folder = match resolve_folder(cli.folder.as_deref()) {
        Ok(folder) => folder,
        Err(refusal) => return refuse(&refusal),
    };
    let tracked_name = match resolve_tracked_name(cli.name.as_deref()) {
        Ok(name) => name,
        Err(refusal) => return refuse(&refusal),
    };
    let options = match build_options(cli) {
        Ok(options) => options,
        Err(refusal) => return refuse(&refusal),
    };

    let tracker = cli.progress.then(ProgressTracker::new);
    let result = rename_all_with(
        &folder,
        &tracked_name,
        &options,
        |report, processed, total| {
            if let Some(code) = report.code {
                report_warning_code(
                    &report.path,
                    Some(code.as_str()),
                    report.message.as_deref().unwrap_or_default(),
                );
            }
            if let Some(tracker) = &tracker {
                tracker.report(processed, total);
            }
        },
    );
    let summary = match result {
        Ok(summary) => summary,
        Err(error) => return refuse(&build_bad_folder_refusal(&folder, error)),
    };

    if let Some(tracker) = &tracker
        && summary.reports.is_empty()
    {
        tracker.report(0, 0);
    }

    if !summary.matched_any() {
        report_warning_code(
            &folder.display().to_string(),
            Some(WarningCode::NoMatch.as_str()),
            &format!("'{tracked_name}' was not found in any invoice file"),
        );
    }

    let (rendered, output_hash) = match output::render_jsonl(&summary.reports) {
        Ok(rendered) => rendered,
        Err(error) => {
            eprintln!("Error writing output: {error}");
            return 2;
        }
    };
    if let Err(error) = write_stdout(&rendered) {
        eprintln!("Error writing output: {error}");
        return 2;
    }

    let outcome = summary.outcome();
    if !cli.no_witness
        && !options.dry_run
        && let Some(ledger) = witness::ledger_path()
    {
        record_witness(&ledger, &summary, &options, outcome, output_hash);
    }

    outcome.exit_code()
}

/// Folder from the argument or the console, validated before any renaming.
fn resolve_folder(argument: Option<&Path>) -> Result<PathBuf, refusal::RefusalEnvelope> {
    use prompt::clean_folder_input;

    let folder = match argument {
        Some(path) => path
            .to_str()
            .map_or_else(|| path.to_path_buf(), clean_folder_input),
        None => clean_folder_input(&ask_console(FOLDER_QUESTION).map_err(build_bad_input_refusal)?),
    };

    if folder.as_os_str().is_empty() {
        return Err(build_bad_folder_refusal(
            &folder,
            "folder path is empty".to_owned(),
        ));
    }
    rename::scan::validate_folder(&folder)
        .map_err(|error| build_bad_folder_refusal(&folder, error))?;

    Ok(folder)
}

fn resolve_tracked_name(argument: Option<&str>) -> Result<String, refusal::RefusalEnvelope> {
    use refusal::{RefusalCode, build_envelope};

    let name = match argument {
        Some(name) => name.trim().to_owned(),
        None => ask_console(NAME_QUESTION).map_err(build_bad_input_refusal)?,
    };

    if name.is_empty() {
        return Err(build_envelope(
            RefusalCode::EmptyName,
            "Tracked name is empty",
            serde_json::json!({}),
            Some(NEXT_COMMAND.to_owned()),
        ));
    }
    Ok(name)
}

fn build_options(cli: &cli::Cli) -> Result<rename::RenameOptions, refusal::RefusalEnvelope> {
    let invoice_extension = normalize_extension(&cli.invoice_extension);
    let paired_extension = normalize_extension(&cli.paired_extension);

    if invoice_extension.is_empty() || paired_extension.is_empty() {
        return Err(build_bad_input_refusal(
            "--ext and --paired-ext must not be empty".to_owned(),
        ));
    }
    if invoice_extension.eq_ignore_ascii_case(&paired_extension) {
        return Err(build_bad_input_refusal(format!(
            "--ext and --paired-ext must differ (both '{invoice_extension}')"
        )));
    }

    Ok(rename::RenameOptions {
        invoice_extension,
        paired_extension,
        dry_run: cli.dry_run,
    })
}

fn normalize_extension(raw: &str) -> String {
    raw.trim().trim_start_matches('.').to_owned()
}

fn ask_console(question: &str) -> Result<String, String> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut stderr = std::io::stderr();
    prompt::ask(&mut input, &mut stderr, question)
}

fn write_stdout(bytes: &[u8]) -> Result<(), String> {
    use std::io::Write;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|error| format!("failed to write stdout: {error}"))
}

/// Append the run summary to the witness ledger; failures only warn.
fn record_witness(
    ledger: &Path,
    summary: &rename::BatchSummary,
    options: &rename::RenameOptions,
    outcome: cli::Outcome,
    output_hash: String,
) {
    use witness::{WitnessDraft, WitnessRecord, append};

    let record = WitnessRecord::new(WitnessDraft {
        version: env!("CARGO_PKG_VERSION").to_owned(),
        folder: summary.folder.display().to_string(),
        tracked_name: summary.tracked_name.clone(),
        invoice_extension: options.invoice_extension.clone(),
        paired_extension: options.paired_extension.clone(),
        counts: summary.counts(),
        outcome: outcome.as_str().to_owned(),
        exit_code: outcome.exit_code(),
        output_hash,
        ts: chrono::Utc::now().to_rfc3339(),
    });

    match record {
        Ok(record) => {
            if let Err(error) = append(ledger, &record) {
                eprintln!("Warning: Failed to record witness: {error}");
            }
        }
        Err(error) => {
            eprintln!("Warning: Failed to build witness record: {error}");
        }
    }
}

/// Handle --describe flag: print operator.json and exit.
fn handle_describe() -> u8 {
    let operator = serde_json::json!({
        "name": "invoice-renamer",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Rename CFDI invoice XML files and their paired PDFs after the total and counterparty",
        "input": "folder of invoice XML files",
        "output_format": "JSONL",
        "name_pattern": "$<Total>_<first two words of counterparty>.<ext>",
        "exit_codes": { "0": "CLEAN", "1": "PARTIAL", "2": "REFUSAL" }
    });

    if let Ok(json) = serde_json::to_string_pretty(&operator) {
        println!("{json}");
        0
    } else {
        eprintln!("Error: Failed to serialize operator metadata");
        2
    }
}

/// Handle witness subcommands.
fn handle_witness_command(action: cli::WitnessAction) -> u8 {
    use cli::WitnessAction;
    use witness::{LEDGER_ENV, QueryFilter, ledger_path, query};

    let Some(ledger_path) = ledger_path() else {
        eprintln!("Error: witness ledger is disabled; set {LEDGER_ENV} to its path");
        return 2;
    };

    match action {
        WitnessAction::Query { folder, outcome } => {
            let filter = QueryFilter { folder, outcome };
            match query::query(&ledger_path, &filter) {
                Ok(records) => {
                    for record in records {
                        println!("{record}");
                    }
                    0
                }
                Err(error) => {
                    eprintln!("Error querying witness: {error}");
                    2
                }
            }
        }
        WitnessAction::Last => match query::last(&ledger_path) {
            Ok(Some(record)) => {
                println!("{record}");
                0
            }
            Ok(None) => {
                eprintln!("No witness records found");
                1
            }
            Err(error) => {
                eprintln!("Error querying witness: {error}");
                2
            }
        },
        WitnessAction::Count => match query::count(&ledger_path) {
            Ok(count) => {
                println!("{count}");
                0
            }
            Err(error) => {
                eprintln!("Error querying witness: {error}");
                2
            }
        },
    }
}

fn build_bad_folder_refusal(folder: &Path, error: String) -> refusal::RefusalEnvelope {
    use refusal::{RefusalCode, build_envelope};

    build_envelope(
        RefusalCode::BadFolder,
        "Folder cannot be scanned",
        serde_json::json!({
            "folder": folder.display().to_string(),
            "error": error,
        }),
        Some(NEXT_COMMAND.to_owned()),
    )
}

fn build_bad_input_refusal(error: String) -> refusal::RefusalEnvelope {
    use refusal::{RefusalCode, build_envelope};

    build_envelope(
        RefusalCode::BadInput,
        "Invalid input",
        serde_json::json!({ "error": error }),
        Some(NEXT_COMMAND.to_owned()),
    )
}

/// Print a refusal envelope to stdout and return the refusal exit code.
fn refuse(refusal: &refusal::RefusalEnvelope) -> u8 {
    if let Ok(json) = serde_json::to_string(refusal) {
        println!("{json}");
    }
    cli::Outcome::Refusal.exit_code()
}
