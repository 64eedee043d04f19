mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tendril_codegen::GenerateTarget;
use tendril_core::{TendrilError, TestFramework};
use tracing_subscriber::EnvFilter;

use commands::*;

#[derive(Parser)]
#[command(name = "tendril")]
#[command(about = "Scaffolding generator for multi-app web projects")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code into an existing application
    Generate {
        #[command(subcommand)]
        generate_command: GenerateCommands,
    },
}

#[derive(Subcommand)]
enum GenerateCommands {
    /// Entity, repository, CRUD actions and routes for a resource
    Resource {
        /// Application name (e.g. web)
        app: String,

        /// Resource name (e.g. user)
        name: String,

        #[command(flatten)]
        options: GenerateOptions,
    },

    /// Entity and repository only
    Model {
        /// Application name (e.g. web)
        app: String,

        /// Model name (e.g. user)
        name: String,

        #[command(flatten)]
        options: GenerateOptions,
    },

    /// A single controller action with its view, template, specs and route
    Action {
        /// Application name (e.g. web)
        app: String,

        /// Target in controller#action format (e.g. dashboard#index)
        target: String,

        #[command(flatten)]
        options: GenerateOptions,
    },
}

#[derive(Args)]
struct GenerateOptions {
    /// Applications directory, relative to the project root
    #[arg(long)]
    path: Option<PathBuf>,

    /// Test framework for generated specs (minitest, rspec)
    #[arg(long)]
    test: Option<TestFramework>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("✗ {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), TendrilError> {
    let project_root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Generate { generate_command } => {
            let (target, options) = match generate_command {
                GenerateCommands::Resource { app, name, options } => {
                    (GenerateTarget::Resource { app, name }, options)
                }
                GenerateCommands::Model { app, name, options } => {
                    (GenerateTarget::Model { app, name }, options)
                }
                GenerateCommands::Action { app, target, options } => {
                    (GenerateTarget::action(&app, &target)?, options)
                }
            };
            generate::run(&project_root, &target, options.path, options.test)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
