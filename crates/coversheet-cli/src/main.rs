mod commands;
mod output;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "coversheet",
    version,
    about = "Scrape performance cover sheets (.docx) into a summary table"
)]
struct Cli {
    /// Log more (-v info, -vv debug). RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a single cover sheet
    Scrape {
        /// Path to a .docx cover sheet
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Custom JSON header map (default: built-in cover sheet headings)
        #[arg(long = "headers", value_name = "FILE")]
        headers: Option<PathBuf>,
    },
    /// Scrape every cover sheet in a directory into one table
    Batch {
        /// Directory holding the cover sheets
        #[arg(env = "COVERSHEET_DIR")]
        dir: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the batch table to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Custom JSON header map (default: built-in cover sheet headings)
        #[arg(long = "headers", value_name = "FILE")]
        headers: Option<PathBuf>,
    },
    /// Print the paragraph/table blocks the scraper sees
    Blocks {
        /// Path to a .docx file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect header maps
    Headers {
        #[command(subcommand)]
        action: HeadersAction,
    },
}

#[derive(Subcommand)]
enum HeadersAction {
    /// List the built-in headings and their field names
    List,
    /// Validate a custom header map file
    Validate {
        /// Path to JSON header map
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Scrape {
            input_file,
            output,
            headers,
        } => commands::scrape::run(input_file, &output, headers),
        Commands::Batch {
            dir,
            output,
            out,
            headers,
        } => commands::batch::run(dir, &output, out, headers),
        Commands::Blocks { input_file, output } => commands::blocks::run(input_file, &output),
        Commands::Headers { action } => match action {
            HeadersAction::List => commands::headers::list(),
            HeadersAction::Validate { file } => commands::headers::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
