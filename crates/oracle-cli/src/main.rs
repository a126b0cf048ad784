use anyhow::Result;
use clap::{Parser, Subcommand};
use oracle_cli::{run_parse, run_ratchet, run_report, Format, ParseSource};
use oracle_parse::ParseOptions;
use std::path::Path;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "oracle")]
#[command(about = "Compile card oracle text into a typed ability tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log parser decisions to stderr (overridden by RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    /// Deepest nesting of clauses before text is left unparsed
    #[arg(long, global = true, default_value_t = 16)]
    max_depth: usize,

    /// Drop reminder text from keyword abilities
    #[arg(long, global = true)]
    strip_reminders: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse one card and print its tree
    Parse {
        /// Oracle text file, or a .json card record
        #[arg(required_unless_present = "text")]
        file: Option<String>,

        /// Oracle text to parse instead of a file
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Card name, recognised as a self-reference in the text
        #[arg(long)]
        name: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Parse a bulk card file and summarise diagnostics by code
    Report {
        /// JSON array of card records
        cards: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Run named test cases against a stored baseline
    Ratchet {
        /// JSON array of test cases
        cases: String,

        /// Baseline file (created by --update)
        #[arg(long)]
        baseline: String,

        /// Write this run as the new baseline when it has no regressions
        #[arg(long)]
        update: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    oracle_cli::init_tracing(cli.verbose);

    let opts = ParseOptions {
        max_nesting_depth: cli.max_depth,
        keep_reminder_text: !cli.strip_reminders,
    };

    match cli.command {
        Commands::Parse {
            file,
            text,
            name,
            format,
        } => {
            let source = match (&text, &file) {
                (Some(text), _) => ParseSource::Text(text),
                (None, Some(file)) => ParseSource::File(Path::new(file)),
                (None, None) => anyhow::bail!("either a file or --text is required"),
            };
            println!("{}", run_parse(source, name.as_deref(), format, &opts)?);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Report { cards, format } => {
            print!("{}", run_report(Path::new(&cards), format, &opts)?);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Ratchet {
            cases,
            baseline,
            update,
        } => {
            let outcome = run_ratchet(Path::new(&cases), Path::new(&baseline), update, &opts)?;
            print!("{}", outcome.summary);
            if outcome.report.is_regression_free() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
