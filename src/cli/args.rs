use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "invoice-renamer", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Folder holding the invoice XML files (prompted when omitted)
    #[arg(value_name = "FOLDER")]
    pub folder: Option<PathBuf>,

    /// Tracked party name; its counterparty names the files (prompted when omitted)
    #[arg(long, short = 'n', value_name = "NAME")]
    pub name: Option<String>,

    /// Extension of invoice description files
    #[arg(long = "ext", value_name = "EXT", default_value = "xml")]
    pub invoice_extension: String,

    /// Extension of the paired rendered file
    #[arg(long = "paired-ext", value_name = "EXT", default_value = "pdf")]
    pub paired_extension: String,

    /// Report planned renames without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip witness recording even when INVOICE_RENAMER_WITNESS is set
    #[arg(long)]
    pub no_witness: bool,

    /// Emit progress to stderr
    #[arg(long)]
    pub progress: bool,

    /// Print operator.json and exit
    #[arg(long)]
    pub describe: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Query the witness ledger
    Witness {
        #[command(subcommand)]
        action: WitnessAction,
    },
}

#[derive(Subcommand)]
pub enum WitnessAction {
    /// Query witness records
    Query {
        /// Only records for this folder
        #[arg(long)]
        folder: Option<String>,

        /// Only records with this outcome (CLEAN, PARTIAL)
        #[arg(long)]
        outcome: Option<String>,
    },
    /// Show last witness record
    Last,
    /// Count witness records
    Count,
}
