//! gamebase-shelf CLI
//!
//! Sorts GameBase game archives into a folder tree built from each game's
//! VERSION.NFO metadata.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    let result = run(cli);
    if let Err(e) = &result {
        log::error!("{e}");
    }
    logging::flush();
    if result.is_err() {
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(path) = &cli.logfile {
        logging::attach_logfile(path)?;
    }
    let quiet = cli.quiet;

    match cli.command {
        Commands::Organize(args) => commands::organize::run_organize(args, quiet),
        Commands::Scan {
            source,
            json,
            language,
            limit,
        } => commands::scan::run_scan(source, json, language, limit, quiet),
        Commands::Fields => {
            commands::fields::run_fields();
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show();
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetTemplate { template } => {
                commands::config::run_config_set_template(&template)
            }
            ConfigAction::Reset => commands::config::run_config_reset(),
        },
    }
}
