//! UserManager - admin console for PingOne users and populations

use clap::{CommandFactory, Parser};

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod tasks;

use cli::{Cli, Commands, GlobalOptions, ProfileCommands, UsersCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Version => {
            println!("usermanager version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "usermanager", &mut std::io::stdout());
            Ok(())
        }
        Commands::Profile(profile_cmd) => match profile_cmd {
            ProfileCommands::Save { name } => cli::profile::save(&opts, &name),
            ProfileCommands::List => cli::profile::list(&opts),
            ProfileCommands::Show { name } => cli::profile::show(&opts, name.as_deref()),
        },
        Commands::Users(users_cmd) => match users_cmd {
            UsersCommands::List { filter } => cli::users::list(&opts, filter.as_deref()).await,
            UsersCommands::Delete {
                ids,
                stdin,
                yes,
                no_refresh,
            } => cli::users::delete(&opts, ids, stdin, yes, no_refresh).await,
        },
    }
}

/// Warnings by default, everything from this crate with `--debug`.
/// `RUST_LOG` still wins when set.
fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Warn);
    if debug {
        builder.filter_module("usermanager", log::LevelFilter::Debug);
    }
    builder.parse_default_env();

    // Only fails if a logger is already installed
    let _ = builder.try_init();
}
