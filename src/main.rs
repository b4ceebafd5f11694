mod app;
mod args;
mod config;
mod entry;
mod error;
mod http;
mod logger;
mod output;
mod poll;
mod shutdown;
mod shutdown_handlers;

use std::process::ExitCode;

/// Exit status for errors raised before polling starts (matches clap's usage errors).
const SETUP_ERROR_EXIT: u8 = 2;

fn main() -> ExitCode {
    match entry::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(SETUP_ERROR_EXIT)
        }
    }
}
