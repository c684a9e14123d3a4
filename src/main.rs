use std::path::PathBuf;

use clap::Parser;

use docsift::batch;
use docsift::cli::commands::{Cli, Command};
use docsift::cli::output;
use docsift::config::Config;
use docsift::error::Result;
use docsift::schema::SchemaSet;

fn main() {
    // Logs go to stderr; stdout carries the JSON run summary.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse {
            kind,
            input,
            output,
            schemas,
        } => cmd_parse(&kind, &input, &output, schemas),
        Command::Schemas { schemas } => cmd_schemas(schemas),
    }
}

fn cmd_parse(kind: &str, input: &str, out_dir: &str, schemas: Option<String>) -> Result<()> {
    let config = Config::new(kind, input, out_dir, schemas.map(PathBuf::from))?;
    let outcome = batch::run_batch(&config)?;
    println!("{}", output::format_json(&outcome.summary));
    Ok(())
}

fn cmd_schemas(schemas: Option<String>) -> Result<()> {
    let set = SchemaSet::load(schemas.map(PathBuf::from).as_deref())?;

    #[derive(serde::Serialize)]
    struct SchemaListing {
        charter: Vec<String>,
        postmortem: Vec<String>,
    }

    println!(
        "{}",
        output::format_json(&SchemaListing {
            charter: set.charter().header(),
            postmortem: set.postmortem().header(),
        })
    );
    Ok(())
}
