use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "langfuse-provider")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Manage Langfuse organizations and projects declaratively", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: ~/.config/langfuse-provider/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the Langfuse instance
    #[arg(long, global = true, env = "LANGFUSE_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Admin API key
    #[arg(
        long,
        global = true,
        env = "LANGFUSE_ADMIN_API_KEY",
        hide_env_values = true,
        value_name = "KEY"
    )]
    pub admin_api_key: Option<String>,

    /// Print sensitive attributes instead of masking them
    #[arg(long, global = true)]
    pub show_sensitive: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List resource types
    Resources,

    /// Print the provider schema, or a resource schema, as JSON
    Schema {
        /// Resource type (e.g. langfuse_project)
        resource_type: Option<String>,
    },

    /// Create a remote entity from a plan
    Create(CreateArgs),

    /// Refresh a state file from the remote entity
    Read(StateArgs),

    /// Apply a new plan to an existing entity
    Update(UpdateArgs),

    /// Delete the remote entity and its state file
    Delete(StateArgs),

    /// Adopt an existing remote entity
    Import(ImportArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct CreateArgs {
    /// Resource type (e.g. langfuse_organization)
    pub resource_type: String,

    /// Plan as a JSON file, or '-' for stdin
    #[arg(long, value_name = "FILE")]
    pub plan: String,

    /// Write the resulting record to this state file
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,
}

#[derive(Args)]
pub struct StateArgs {
    /// Resource type
    pub resource_type: String,

    /// State file of the instance
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Resource type
    pub resource_type: String,

    /// State file of the instance
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,

    /// New plan as a JSON file, or '-' for stdin
    #[arg(long, value_name = "FILE")]
    pub plan: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Resource type
    pub resource_type: String,

    /// Remote identifier ("org123" or "org123/proj456")
    pub id: String,

    /// Write the resulting record to this state file
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,
}
