use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "mysli")]
#[command(about = "Capture, categorize and review your thoughts")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.mysli)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
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

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a new thought
    Add {
        /// Note text (e.g., "muszę zadzwonić do mamy #rodzina")
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List notes, newest first
    #[command(alias = "ls")]
    List {
        /// Only notes in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only notes with this tag (with or without # / @)
        #[arg(short, long)]
        tag: Option<String>,

        /// Only notes containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum notes to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show a single note
    Show {
        /// Note id or unique id prefix
        id: String,
    },

    /// Replace a note's text (categorizes it again)
    Edit {
        /// Note id or unique id prefix
        id: String,

        /// New note text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note id or unique id prefix
        id: String,
    },

    /// List categories with note counts
    Categories,

    /// Categorize text without saving it
    Categorize {
        /// Text to categorize
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Show the per-category score breakdown
        #[arg(short, long)]
        explain: bool,
    },

    /// Extract #tags and @mentions from text
    Tags {
        /// Text to scan
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Manage category keywords
    Keyword {
        #[command(subcommand)]
        action: KeywordAction,
    },

    /// Categorize every stored note again with the current rules
    Recategorize {
        /// Show what would change without saving
        #[arg(short, long)]
        dry_run: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum KeywordAction {
    /// Add a keyword to a category (saved in config.toml)
    Add {
        /// Category name (e.g., zakupy)
        category: String,

        /// Keyword, matched case-insensitively as a substring
        keyword: String,
    },

    /// List the keywords of a category
    List {
        /// Category name
        category: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., categorizer.confidence_divisor)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., display.relative_dates)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Create config file with commented defaults
    Init,
}
