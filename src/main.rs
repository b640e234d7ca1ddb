use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::{commands, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{} error: {e}", e.error_type());
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().expenses_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),

        Command::Add(add_args) => {
            let config = commands::load_config(home)?;
            commands::add(config, add_args.clone())?.print()
        }

        Command::List(list_args) => {
            let config = commands::load_config(home)?;
            commands::list(config, list_args.clone())?.print()
        }

        Command::Remove(remove_args) => {
            let config = commands::load_config(home)?;
            commands::remove(config, remove_args.clone())?.print()
        }

        Command::Edit(edit_args) => {
            let config = commands::load_config(home)?;
            commands::edit(config, edit_args.clone())?.print()
        }

        Command::Total => commands::total(commands::load_config(home)?)?.print(),

        Command::Save(path_args) => {
            let config = commands::load_config(home)?;
            commands::save(config, path_args.clone())?.print()
        }

        Command::Load(path_args) => {
            let config = commands::load_config(home)?;
            commands::load(config, path_args.clone())?.print()
        }

        Command::Chart(chart_args) => {
            let config = commands::load_config(home)?;
            commands::chart(config, chart_args.clone())?.print()
        }

        Command::Categories => commands::categories(commands::load_config(home)?)?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={level},expense_tracker={level}",
                env!("CARGO_CRATE_NAME"),
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
