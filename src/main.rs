mod cli;
mod commands;
mod config;
mod provider;
mod resources;
mod state;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use config::ProviderSettings;
use std::io;
use std::path::PathBuf;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub show_sensitive: bool,
    /// Explicit config file, if any
    pub config: Option<PathBuf>,
    /// Settings from flags and environment
    pub settings: ProviderSettings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        show_sensitive: cli.show_sensitive,
        config: cli.config,
        settings: ProviderSettings {
            admin_api_key: cli.admin_api_key,
            base_url: cli.base_url,
        },
    };
    log::trace!("Running with verbosity {}", ctx.verbose);

    match cli.command {
        Command::Resources => commands::schema::resources(&ctx),
        Command::Schema { resource_type } => commands::schema::show(resource_type.as_deref()),
        Command::Create(args) => commands::phase::create(&ctx, args),
        Command::Read(args) => commands::phase::read(&ctx, args),
        Command::Update(args) => commands::phase::update(&ctx, args),
        Command::Delete(args) => commands::phase::delete(&ctx, args),
        Command::Import(args) => commands::phase::import(&ctx, args),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "langfuse-provider", &mut io::stdout());
            Ok(())
        }
    }
}
