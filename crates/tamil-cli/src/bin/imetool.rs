use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use tamil_cli::commands::{config_ops, init_globals, suggest_ops, PipelineArgs};
use tamil_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "imetool", about = "Tamil IME suggestion diagnostics")]
struct Cli {
    /// Write JSON trace lines to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Custom settings TOML (defaults are embedded)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Custom conversion table TOML (defaults are embedded)
    #[arg(long, global = true)]
    scheme: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the suggestion pipeline for one input
    Suggest {
        /// Romanized input
        text: String,
        /// Input mode hint (empty means the configured default)
        #[arg(long, default_value = "")]
        mode: String,
        /// Number of suggestions (0 means the configured default)
        #[arg(short, long, default_value = "0")]
        limit: usize,
        /// Run the same request this many times (shows response caching)
        #[arg(long, default_value = "1")]
        repeat: usize,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Run inputs from a file (one per line) and write JSONL results
    Batch {
        /// Input file
        input_file: String,
        /// Output JSONL file
        output_file: String,
        #[arg(long, default_value = "")]
        mode: String,
        #[arg(short, long, default_value = "0")]
        limit: usize,
        /// Print pipeline health and cache statistics to stderr when done
        #[arg(long)]
        stats: bool,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Show spelling variants of a token and their conversions
    Variants {
        token: String,
        /// Maximum number of variants (defaults to generation.max_variants)
        #[arg(short, long)]
        max: Option<usize>,
    },
    /// Show frequency scores for words
    Freq {
        /// Frequency TSV file
        file: String,
        /// Words to score
        words: Vec<String>,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export the default conversion table as TOML
    SchemeExport,
    /// Validate a custom conversion table TOML file
    SchemeValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref());
    init_globals(cli.settings.as_deref(), cli.scheme.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    match cli.command {
        Command::Suggest {
            text,
            mode,
            limit,
            repeat,
            json,
            pipeline,
        } => suggest_ops::suggest_cmd(&pipeline, &text, &mode, limit, repeat, json),
        Command::Batch {
            input_file,
            output_file,
            mode,
            limit,
            stats,
            pipeline,
        } => suggest_ops::batch_cmd(&pipeline, &input_file, &output_file, &mode, limit, stats),
        Command::Variants { token, max } => suggest_ops::variants_cmd(&token, max),
        Command::Freq { file, words } => suggest_ops::freq_cmd(&file, &words),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::SchemeExport => config_ops::scheme_export(),
        Command::SchemeValidate { file } => config_ops::scheme_validate(&file),
    }
}
