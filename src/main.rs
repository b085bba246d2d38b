// src/main.rs — mmu entrypoint

use std::process::ExitCode;

use clap::Parser;

use mmu::cli::Cli;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match mmu::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mmu: {err}");
            ExitCode::FAILURE
        }
    }
}
