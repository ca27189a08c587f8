use std::error::Error;

use clap::Parser;

mod app;
mod commands;
mod logging;

use commands::cli;

fn main() {
    let args = cli::Args::parse();

    let code = match app::run_app(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            e.exit_code()
        }
    };
    std::process::exit(code);
}
