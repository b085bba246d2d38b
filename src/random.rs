//! The random-number stream.
//!
//! A finite, index-cycling sequence of integers read once from a file.
//! Only the Random pager ever calls [`RandomStream::next_below`]; every
//! other algorithm ignores this module entirely (§8 "random isolation").

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SimError;

pub struct RandomStream {
    values: Vec<u32>,
    index: usize,
}

impl RandomStream {
    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let contents = fs::read_to_string(path).map_err(|source| SimError::OpenRandom {
            path: path.to_path_buf(),
            source,
        })?;
        let mut numbers = contents.split_whitespace();

        let count: usize = numbers
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| SimError::MalformedPrelude(format!("{}: missing count", path.display())))?;

        let values: Vec<u32> = numbers.filter_map(|s| s.parse().ok()).take(count).collect();
        if values.is_empty() {
            return Err(SimError::EmptyRandomStream(PathBuf::from(path)));
        }

        Ok(RandomStream { values, index: 0 })
    }

    /// Builds a stream directly from an in-memory sequence, bypassing the
    /// file format. Exposed for embedders and tests that want a
    /// deterministic stream without writing a random-number file.
    pub fn from_values(values: Vec<u32>) -> Self {
        RandomStream { values, index: 0 }
    }

    /// Returns `values[index] % bound`, then advances and wraps the index.
    pub fn next_below(&mut self, bound: usize) -> usize {
        let value = self.values[self.index] as usize % bound;
        self.index = (self.index + 1) % self.values.len();
        value
    }
}
