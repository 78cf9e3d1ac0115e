use clap::{Parser, Subcommand};

use t9_cli::commands::{complete_ops, config_ops, eval_ops, ModelOptions};
use t9_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "t9tool", about = "Predictive keypad text completion")]
struct Cli {
    /// Custom settings TOML (replaces the embedded defaults)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Log engine diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Complete a keypad sequence (digits, `*`, `#`)
    Complete {
        /// Training text file
        train_file: String,
        /// Key sequence, e.g. 366253#87867
        keys: String,
        /// N-gram window length (default from settings)
        #[arg(short, long)]
        n: Option<usize>,
        /// Number of kept candidates (default from settings)
        #[arg(short, long)]
        k: Option<usize>,
        /// Maximum training bytes to read (0 = whole file)
        #[arg(long, default_value = "0")]
        train_limit: u64,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Type the key presses of a test text and measure how much of it comes back
    Evaluate {
        /// Training text file
        train_file: String,
        /// Test text file
        test_file: String,
        /// N-gram window length (default from settings)
        #[arg(short, long)]
        n: Option<usize>,
        /// Number of kept candidates (default from settings)
        #[arg(short, long)]
        k: Option<usize>,
        /// Maximum training bytes to read (0 = whole file)
        #[arg(long, default_value = "0")]
        train_limit: u64,
        /// Maximum test bytes to read (0 = whole file)
        #[arg(long, default_value = "1000")]
        test_limit: u64,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the embedded default settings
    SettingsExport,

    /// Parse and validate a settings file
    SettingsValidate {
        /// Settings TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(ref file) = cli.settings {
        config_ops::load_settings(file);
    }

    match cli.command {
        Command::Complete {
            train_file,
            keys,
            n,
            k,
            train_limit,
            json,
        } => {
            let opts = ModelOptions {
                ngram_length: n,
                beam_width: k,
                train_limit,
            };
            complete_ops::complete(&train_file, &keys, &opts, json);
        }
        Command::Evaluate {
            train_file,
            test_file,
            n,
            k,
            train_limit,
            test_limit,
            json,
        } => {
            let opts = ModelOptions {
                ngram_length: n,
                beam_width: k,
                train_limit,
            };
            eval_ops::evaluate(&train_file, &test_file, test_limit, &opts, json);
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
