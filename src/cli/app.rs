//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{init, lint, new};

#[derive(Parser)]
#[command(name = "kira")]
#[command(author, version, about = "File-based work item tracking for software teams")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a kira workspace
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Create a new work item from a template
    ///
    /// All arguments are optional; status and title may be given in either
    /// order, and missing values are prompted for or defaulted.
    New {
        /// Template kind (e.g. prd); prompted for when omitted
        template: Option<String>,

        /// Status or title, in either order
        arg2: Option<String>,

        /// Title or status, in either order
        arg3: Option<String>,

        /// Free-text description passed to the template
        description: Option<String>,

        /// Prompt interactively for missing template inputs
        #[arg(long, short = 'I')]
        interactive: bool,

        /// Provide input values directly (e.g. --input due=2025-10-01)
        #[arg(long = "input", short = 'i', value_name = "KEY=VALUE", value_parser = parse_key_val)]
        inputs: Vec<(String, String)>,

        /// List the template's declared inputs instead of creating an item
        #[arg(long)]
        help_inputs: bool,
    },

    /// Validate every work item in the tree
    Lint,
}

/// Parses a `key=value` pair for `--input`.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;

    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Kira starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing workspace at: {}", path));
            init::run(&path, &output)?;
        }

        Commands::New {
            template,
            arg2,
            arg3,
            description,
            interactive,
            inputs,
            help_inputs,
        } => {
            let opts = new::NewOptions {
                template,
                arg2,
                arg3,
                description,
                interactive,
                inputs,
                help_inputs,
            };
            new::run(opts, &output)?;
        }

        Commands::Lint => {
            output.verbose("Linting work items");
            lint::run(&output)?;
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
