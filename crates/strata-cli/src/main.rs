mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "strata",
    version,
    about = "Heading-aware structured text extraction from PDFs using MuPDF"
)]
struct Cli {
    /// JSON config file (batch_size, mutool)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the mutool binary (overrides config and $MUPDF_BIN)
    #[arg(long, global = true, value_name = "PATH")]
    mutool: Option<PathBuf>,

    /// Log progress to stderr (-v for info, -vv for debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract body text grouped under its Title / Section / Subsection headings
    Structure {
        /// Path to PDF file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the blocks as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Pages decoded per mutool invocation
        #[arg(short, long)]
        batch_size: Option<usize>,
    },
    /// Extract plain text
    Text {
        /// Path to PDF file
        input_file: PathBuf,

        /// 1-based page number(s); all pages if omitted
        #[arg(short, long = "page", value_name = "N")]
        pages: Vec<usize>,
    },
    /// Print the page count of a document
    Pages {
        /// Path to PDF file
        input_file: PathBuf,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = commands::Settings {
        config: cli.config,
        mutool: cli.mutool,
    };

    let result = match cli.command {
        Commands::Structure {
            input_file,
            output,
            out,
            batch_size,
        } => commands::structure::run(&settings, input_file, &output, out, batch_size),
        Commands::Text { input_file, pages } => {
            commands::text::run(&settings, input_file, &pages)
        }
        Commands::Pages { input_file } => commands::text::page_count(&settings, input_file),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&settings),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
