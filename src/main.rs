use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use crate::cli::Cli;

mod app;
mod cli;
mod config;
mod db;
mod directory;
mod namespace;
mod request;
mod sushi;

/// Directory holding the job ledger
pub struct WorkingDirectory {
    pub path: PathBuf,
}

fn main() {
    env_logger::init();
    info!("sushi-runner starting up");

    let cli = Cli::parse();
    match cli::run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            error!("{err:#}");
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}
