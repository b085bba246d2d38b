//! Per-process address-space state: VMA list, 64-entry page table, counters.

use crate::pte::Pte;
use crate::vma::Vma;

pub const PAGE_TABLE_ENTRIES: usize = 64;

#[derive(Debug, Default, Clone, Copy)]
pub struct Counters {
    pub unmaps: u64,
    pub maps: u64,
    pub ins: u64,
    pub outs: u64,
    pub fins: u64,
    pub fouts: u64,
    pub zeros: u64,
    pub segv: u64,
    pub segprot: u64,
}

#[derive(Debug)]
pub struct Process {
    pub pid: usize,
    pub vmas: Vec<Vma>,
    pub page_table: [Pte; PAGE_TABLE_ENTRIES],
    pub counters: Counters,
}

impl Process {
    pub fn new(pid: usize, vmas: Vec<Vma>) -> Self {
        Process {
            pid,
            vmas,
            page_table: [Pte::default(); PAGE_TABLE_ENTRIES],
            counters: Counters::default(),
        }
    }

    /// The VMA backing `vpage`, if any. `None` means the access is a SEGV.
    pub fn vma_for(&self, vpage: usize) -> Option<&Vma> {
        self.vmas.iter().find(|vma| vma.contains(vpage))
    }
}
