//! Parses the process/VMA prelude that precedes the trace's marker line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::SimError;
use crate::process::Process;
use crate::vma::Vma;

/// Non-comment, non-blank, trimmed lines of a file, in order.
struct MeaningfulLines<R> {
    lines: std::io::Lines<R>,
}

impl<R: BufRead> Iterator for MeaningfulLines<R> {
    type Item = Result<String, SimError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(SimError::Io(e))),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Some(Ok(trimmed.to_string()));
        }
    }
}

fn next_line<R: BufRead>(lines: &mut MeaningfulLines<R>) -> Result<String, SimError> {
    lines.next().ok_or(SimError::UnexpectedEof)?
}

fn next_int<R: BufRead>(lines: &mut MeaningfulLines<R>) -> Result<usize, SimError> {
    let line = next_line(lines)?;
    line.parse()
        .map_err(|_| SimError::MalformedPrelude(line.clone()))
}

/// Reads the number-of-processes / VMA prelude from the start of the trace
/// file. Independent of [`crate::trace::TraceReader`], which re-reads the
/// same file from its own handle starting at the marker line — mirroring
/// the reference tool's two-pass read of a single input file.
pub fn parse_processes(path: &Path) -> Result<Vec<Process>, SimError> {
    let file = File::open(path).map_err(|source| SimError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let mut lines = MeaningfulLines {
        lines: BufReader::new(file).lines(),
    };

    let num_processes = next_int(&mut lines)?;
    let mut processes = Vec::with_capacity(num_processes);

    for pid in 0..num_processes {
        let num_vmas = next_int(&mut lines)?;
        let mut vmas = Vec::with_capacity(num_vmas);
        for _ in 0..num_vmas {
            let line = next_line(&mut lines)?;
            let mut fields = line.split_whitespace();
            let parse_field = |f: Option<&str>| -> Result<usize, SimError> {
                f.and_then(|s| s.parse().ok())
                    .ok_or_else(|| SimError::MalformedPrelude(line.clone()))
            };
            let start = parse_field(fields.next())?;
            let end = parse_field(fields.next())?;
            let write_protected = parse_field(fields.next())? == 1;
            let file_mapped = parse_field(fields.next())? == 1;
            vmas.push(Vma {
                start,
                end,
                write_protected,
                file_mapped,
            });
        }
        processes.push(Process::new(pid, vmas));
    }

    Ok(processes)
}
