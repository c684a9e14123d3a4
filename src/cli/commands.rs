use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docsift",
    version,
    about = "Extract structured records from narrative charters and postmortems into CSV rows",
    after_help = "Artifacts are written as <document-name>.csv in the output directory, \
                  one row per document. Logs go to stderr; control verbosity with RUST_LOG."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a directory of documents into CSV artifacts.
    ///
    /// In auto mode each file is classified by name: a file name containing
    /// "charter" or "postmortem" (case-insensitive) selects that kind's
    /// schema, anything else is skipped. Forcing a kind parses every file
    /// with that schema. Unreadable or non-text documents are skipped with a
    /// warning; the batch continues.
    Parse {
        /// Document kind: auto, charter or postmortem
        #[arg(short, long, default_value = "auto")]
        kind: String,
        /// Directory with documents to be parsed
        #[arg(short, long)]
        input: String,
        /// Directory to save parser output to
        #[arg(short, long)]
        output: String,
        /// Directory with schema overrides (charter.toml, postmortem.toml)
        #[arg(long)]
        schemas: Option<String>,
    },

    /// Print the effective field schemas per document kind.
    Schemas {
        /// Directory with schema overrides (charter.toml, postmortem.toml)
        #[arg(long)]
        schemas: Option<String>,
    },
}
