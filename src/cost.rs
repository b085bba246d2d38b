//! The fixed per-operation cost table (spec.md §4.5), accumulated into a
//! single 64-bit counter for the whole run.

pub const READ_WRITE: u64 = 1;
pub const CTX_SWITCH: u64 = 130;
pub const PROC_EXIT: u64 = 1230;
pub const MAP: u64 = 350;
pub const UNMAP: u64 = 410;
pub const IN: u64 = 3200;
pub const OUT: u64 = 2750;
pub const FIN: u64 = 2350;
pub const FOUT: u64 = 2800;
pub const ZERO: u64 = 150;
pub const SEGV: u64 = 440;
pub const SEGPROT: u64 = 410;
