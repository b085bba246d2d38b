//! Virtual memory paging simulator: a deterministic, single-threaded
//! driver that replays an instruction trace against a fixed pool of
//! physical frames under one of six replacement policies.

pub mod cli;
pub mod cost;
pub mod dispatcher;
pub mod error;
pub mod fault;
pub mod frame;
pub mod input;
pub mod memory;
pub mod pager;
pub mod process;
pub mod pte;
pub mod random;
pub mod report;
pub mod trace;
pub mod vma;

use std::fs::File;
use std::io::BufReader;

use log::info;

use crate::cli::Cli;
use crate::dispatcher::Simulator;
use crate::error::SimError;
use crate::memory::Memory;
use crate::pager::Algorithm;
use crate::random::RandomStream;
use crate::report::OutputFlags;
use crate::trace::TraceReader;

/// Validates and runs a fully-parsed CLI invocation end to end.
pub fn run(cli: Cli) -> Result<(), SimError> {
    let frames = validate_frame_count(cli.frames)?;
    let algorithm = Algorithm::from_flag(cli.algorithm)?;
    let output = OutputFlags::parse(&cli.options)?;

    info!(
        "frames={frames} algorithm={:?} input={:?} random={:?}",
        algorithm, cli.input_trace, cli.random_file
    );

    let processes = input::parse_processes(&cli.input_trace)?;
    let rand = RandomStream::from_path(&cli.random_file)?;
    let mem = Memory::new(processes, frames);

    let trace_file = File::open(&cli.input_trace).map_err(|source| SimError::OpenInput {
        path: cli.input_trace.clone(),
        source,
    })?;
    let reader = TraceReader::new(BufReader::new(trace_file));

    let mut simulator = Simulator::new(mem, algorithm, rand, output);
    for instruction in reader {
        simulator.dispatch(instruction?)?;
    }
    simulator.report();

    Ok(())
}

fn validate_frame_count(frames: i64) -> Result<usize, SimError> {
    if frames < 1 || frames > 128 {
        return Err(SimError::InvalidFrameCount(frames));
    }
    Ok(frames as usize)
}
