use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tagcat")]
#[command(about = "Categorize tags and run/tag combinations by regex filter and prefix")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.tagcat)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Options shared by every categorizing command
#[derive(Args, Debug, Clone)]
pub struct CategorizeArgs {
    /// Regex filter for the search-results category (default: config value)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Prefix group separator (default: config value, "/")
    #[arg(short, long)]
    pub separator: Option<String>,

    /// Treat an invalid filter as an error instead of an empty category
    #[arg(long)]
    pub strict: bool,

    /// Print categories as JSON
    #[arg(long)]
    pub json: bool,
}

/// Input for the tag-level commands
#[derive(Args, Debug, Clone)]
pub struct RunSelectionArgs {
    /// JSON file mapping run name to its tags
    pub run_to_tag: PathBuf,

    /// Selected runs (comma-separated or repeated)
    #[arg(short, long, value_delimiter = ',')]
    pub runs: Vec<String>,

    /// Select every run in the mapping
    #[arg(long, conflicts_with = "runs")]
    pub all_runs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Categorize plain identifiers (arguments, or one per line from stdin)
    Categorize {
        /// Identifiers to categorize
        items: Vec<String>,

        #[command(flatten)]
        options: CategorizeArgs,
    },

    /// Categorize tags, annotated with the selected runs containing them
    Tags {
        #[command(flatten)]
        selection: RunSelectionArgs,

        #[command(flatten)]
        options: CategorizeArgs,
    },

    /// Categorize run/tag combinations of the selected runs
    RunTags {
        #[command(flatten)]
        selection: RunSelectionArgs,

        #[command(flatten)]
        options: CategorizeArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., categorize.separator)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., categorize.default_filter)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
