//! The crate's single fatal-error type.
//!
//! Per the simulator's error-handling design, malformed input, an
//! unrecognized CLI flag, or a broken internal invariant are all fatal:
//! the caller prints `Display` to stderr and exits nonzero. SEGV and
//! SEGPROT are simulation *events*, not errors, and never appear here.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("cannot open input trace file {path}: {source}")]
    OpenInput { path: PathBuf, #[source] source: io::Error },

    #[error("cannot open random-number file {path}: {source}")]
    OpenRandom { path: PathBuf, #[source] source: io::Error },

    #[error("random-number file {0} contains no values")]
    EmptyRandomStream(PathBuf),

    #[error("unexpected end of input while parsing the process/VMA prelude")]
    UnexpectedEof,

    #[error("malformed line in prelude: {0:?}")]
    MalformedPrelude(String),

    #[error("malformed trace line: {0:?}")]
    MalformedTrace(String),

    #[error("unrecognized instruction '{0}'")]
    InvalidOp(String),

    #[error("reference to undefined process {0}")]
    UnknownProcess(usize),

    #[error("virtual page {vpage} is out of range: the page table has {entries} entries")]
    InvalidVpage { vpage: usize, entries: usize },

    #[error("frame count must be between 1 and 128, got {0}")]
    InvalidFrameCount(i64),

    #[error("unknown algorithm '{0}', expected one of f, r, c, e, a, w")]
    InvalidAlgorithm(char),

    #[error("unknown output option '{0}', expected one of O, P, F, S")]
    InvalidOutputOption(char),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("internal invariant violated: {0}")]
    Internal(String),
}
