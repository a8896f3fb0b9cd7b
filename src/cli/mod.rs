//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod context;
pub mod profile;
pub mod users;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

use crate::tasks::runner::DEFAULT_WORKERS;

/// UserManager - admin console for PingOne users and populations
#[derive(Parser)]
#[command(name = "usermanager")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "USERMANAGER_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Load credentials from a saved profile
    #[arg(long, short = 'p', global = true, env = "USERMANAGER_PROFILE", hide_env = true)]
    pub profile: Option<String>,

    /// Override profile file location
    #[arg(long, global = true, env = "USERMANAGER_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// PingOne environment ID
    #[arg(long, global = true, env = "USERMANAGER_ENV_ID", hide_env = true)]
    pub env_id: Option<String>,

    /// Worker application client ID
    #[arg(long, global = true, env = "USERMANAGER_CLIENT_ID", hide_env = true)]
    pub client_id: Option<String>,

    /// Worker application client secret
    #[arg(
        long,
        global = true,
        env = "USERMANAGER_CLIENT_SECRET",
        hide_env = true,
        hide_env_values = true
    )]
    pub client_secret: Option<String>,

    /// Authentication host (e.g. https://auth.pingone.eu)
    #[arg(long, global = true, env = "USERMANAGER_AUTH_HOST", hide_env = true)]
    pub auth_host: Option<String>,

    /// Platform API host (e.g. https://api.pingone.eu)
    #[arg(long, global = true, env = "USERMANAGER_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Number of background workers
    #[arg(
        long,
        global = true,
        env = "USERMANAGER_WORKERS",
        default_value_t = DEFAULT_WORKERS,
        hide_env = true
    )]
    pub workers: usize,

    /// Enable debug logging
    #[arg(long, global = true, env = "USERMANAGER_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage saved connection profiles
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// List and delete users
    #[command(subcommand)]
    Users(UsersCommands),

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
  bash:   usermanager completion bash > /etc/bash_completion.d/usermanager
  zsh:    usermanager completion zsh > \"${fpath[1]}/_usermanager\"
  fish:   usermanager completion fish > ~/.config/fish/completions/usermanager.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Profile management subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Save the current credentials under a name
    ///
    /// Credentials come from --env-id/--client-id/--client-secret, falling
    /// back to --profile. The secret is prompted for when missing.
    Save {
        /// Profile name (an existing profile is overwritten)
        name: String,
    },

    /// List saved profiles
    List,

    /// Show one profile (defaults to --profile)
    Show {
        /// Profile name
        name: Option<String>,
    },
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// Connect, sync and list all users
    #[command(visible_alias = "ls")]
    List {
        /// Only show rows containing this text in any column (case-insensitive)
        #[arg(long, short = 'f')]
        filter: Option<String>,
    },

    /// Delete users by ID
    #[command(visible_alias = "rm")]
    Delete {
        /// User IDs to delete, processed in order
        ids: Vec<String>,

        /// Also read user IDs from stdin, one per line
        #[arg(long)]
        stdin: bool,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Do not re-sync after deleting (otherwise JSON output carries the
        /// refreshed counts under `stats`)
        #[arg(long)]
        no_refresh: bool,
    },
}
