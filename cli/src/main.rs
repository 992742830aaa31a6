mod classify;
mod cli;
mod config_path;
mod error;
mod init;
mod logging;
mod progress;
mod render;
mod run;
mod table;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            query_file,
            query,
            server,
            config,
            json,
            yes,
            output,
            verbose,
        } => {
            logging::init(verbose);
            run::execute(run::RunArgs {
                query_file,
                query,
                server,
                config,
                json,
                yes,
                output,
                verbose,
            })
        }
        Commands::Classify {
            body_file,
            status,
            content_type,
            features,
            json,
            verbose,
        } => {
            logging::init(verbose);
            classify::execute(classify::ClassifyArgs {
                body_file,
                status,
                content_type,
                features,
                json,
            })
        }
        Commands::Init { config, force } => {
            logging::init(false);
            init::execute(config, force)
        }
    };

    if let Err(err) = result {
        ui::error_message(&format!("{} {}", "Error:".bold(), err.user_message()));
        process::exit(1);
    }
}
