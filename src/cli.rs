//! Command-line surface, built with `clap`'s derive API the way the
//! teacher crate's `cli/src/main.rs` does.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "mmu",
    version,
    about = "Virtual memory paging simulator",
    long_about = "mmu drives a multi-process virtual memory manager over an instruction \
trace against a fixed pool of physical frames, under one of six \
page-replacement policies."
)]
pub struct Cli {
    /// Number of physical frames (1..=128).
    #[arg(short = 'f', value_name = "FRAMES", allow_hyphen_values = true)]
    pub frames: i64,

    /// Replacement algorithm: f(ifo) r(andom) c(lock) e(nru) a(ging) w(orking-set).
    #[arg(short = 'a', value_name = "ALGO")]
    pub algorithm: char,

    /// Diagnostic output letters, any combination of O P F S.
    #[arg(short = 'o', value_name = "OPTIONS", default_value = "")]
    pub options: String,

    /// Instruction trace file.
    pub input_trace: PathBuf,

    /// Random-number file.
    pub random_file: PathBuf,
}
