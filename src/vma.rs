//! Virtual memory areas: per-process, disjoint, inclusive vpage ranges.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vma {
    pub start: usize,
    pub end: usize,
    pub write_protected: bool,
    pub file_mapped: bool,
}

impl Vma {
    pub fn contains(&self, vpage: usize) -> bool {
        vpage >= self.start && vpage <= self.end
    }
}
