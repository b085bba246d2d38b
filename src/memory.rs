//! The explicit simulation context shared between the dispatcher and the
//! pager. Deliberately not a global: [`crate::dispatcher::Simulator`] owns
//! one and passes it by mutable reference into [`crate::pager::Pager`] on
//! every victim selection, per the "no hidden globals" design note.

use crate::frame::FrameTable;
use crate::process::Process;

pub struct Memory {
    pub processes: Vec<Process>,
    pub frames: FrameTable,
    pub instruction_counter: u64,
}

impl Memory {
    pub fn new(processes: Vec<Process>, frame_count: usize) -> Self {
        Memory {
            processes,
            frames: FrameTable::new(frame_count),
            instruction_counter: 0,
        }
    }
}
