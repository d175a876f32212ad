use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use taskpad::cli::commands::Cli;
use taskpad::cli;

fn main() {
    init_logging();

    let cli_args = Cli::parse();
    let json_output = cli_args.json;
    let store_flag = cli_args.store.clone();

    let exit_code = cli::run(cli_args.command, json_output, store_flag.as_deref());

    process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TASKPAD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
