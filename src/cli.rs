use std::path::PathBuf;

use clap::{Parser, Subcommand, builder::styling};

use crate::config::Provider;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

#[derive(Parser)]
#[command(name = "fcg-rs")]
#[command(author, version, long_about = None)]
#[command(styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a comment for one student
    Generate {
        /// Student name
        #[arg(short, long)]
        name: String,

        /// Comma-separated trait tags (at least one required)
        #[arg(short, long, value_delimiter = ',')]
        traits: Vec<String>,

        /// Style label (defaults to the configured selection)
        #[arg(short, long)]
        style: Option<String>,

        /// Target word count (defaults to the configured value)
        #[arg(short, long)]
        word_count: Option<u32>,

        /// Supporting anecdote woven into the comment
        #[arg(long)]
        note: Option<String>,
    },

    /// Rewrite an existing comment with an instruction
    Rewrite {
        /// The comment to rewrite (use --file to read from a file)
        #[arg(short, long, conflicts_with = "file")]
        comment: Option<String>,

        /// Read the comment to rewrite from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Free-form edit instruction
        #[arg(short, long)]
        instruction: String,
    },

    /// Generate comments for every student in a roster file
    Batch {
        /// Roster file, one "NN. Name" line per student
        roster: PathBuf,

        /// Trait tags applied to every student
        #[arg(short, long, value_delimiter = ',')]
        traits: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        /// Write generated comments to this file (one block per student)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Test an API key against a provider
    ValidateKey {
        /// The key to test
        key: String,

        /// Provider to test against
        #[arg(short, long)]
        provider: Option<Provider>,

        /// Model id override for the test call
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Inspect or prune the generation history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Initialize the configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recorded generations (newest first)
    List {
        /// Show at most this many records
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Delete one record by id
    Delete { id: String },
    /// Remove all records
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (secrets masked)
    Show,
    /// Print the configuration file path
    Path,
}

impl clap::ValueEnum for Provider {
    fn value_variants<'a>() -> &'a [Self] {
        &[Provider::Gemini, Provider::OpenAI]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Provider::Gemini => clap::builder::PossibleValue::new("gemini"),
            Provider::OpenAI => clap::builder::PossibleValue::new("openai"),
        })
    }
}
