//! The page-fault handler and the two paths that unmap a frame: eviction
//! (via the pager) and process exit (which never writes anonymous pages
//! back out — see spec.md §4.4's `e` bullet).

use log::debug;

use crate::error::SimError;
use crate::memory::Memory;
use crate::pager::{Algorithm, Pager};
use crate::process::PAGE_TABLE_ENTRIES;
use crate::random::RandomStream;
use crate::report::Event;

pub enum FaultOutcome {
    Segv,
    Installed(Vec<Event>),
}

/// Unmaps an occupied frame: emits `UNMAP`, then `OUT`/`FOUT` if modified,
/// clears `present`/`referenced`/`modified` (but not `paged_out`), and
/// returns the frame to the free list. Does not allocate a replacement.
pub fn unmap_frame(mem: &mut Memory, frame: usize) -> Result<Vec<Event>, SimError> {
    let (pid, vpage) = mem
        .frames
        .occupant(frame)
        .ok_or_else(|| SimError::Internal("attempted to unmap a free frame".to_string()))?;

    let mut events = vec![Event::Unmap { pid, vpage }];
    mem.processes[pid].counters.unmaps += 1;

    let modified = mem.processes[pid].page_table[vpage].modified();
    if modified {
        let file_mapped = mem.processes[pid]
            .vma_for(vpage)
            .map(|vma| vma.file_mapped)
            .unwrap_or(false);
        if file_mapped {
            events.push(Event::Fout);
            mem.processes[pid].counters.fouts += 1;
        } else {
            events.push(Event::Out);
            mem.processes[pid].counters.outs += 1;
            mem.processes[pid].page_table[vpage].set_paged_out(true);
        }
    }

    let pte = &mut mem.processes[pid].page_table[vpage];
    pte.set_present(false);
    pte.set_referenced(false);
    pte.set_modified(false);

    mem.frames.vacate(frame);
    mem.frames.push_free(frame);

    Ok(events)
}

/// Handles a fault on `(pid, vpage)`. Returns `Segv` without touching any
/// PTE if the page isn't backed by a VMA; otherwise allocates a frame
/// (evicting via `pager` if none are free), brings the page in, and
/// installs the PTE.
pub fn handle_page_fault(
    mem: &mut Memory,
    pager: &mut Pager,
    rand: &mut RandomStream,
    algorithm: Algorithm,
    pid: usize,
    vpage: usize,
) -> Result<FaultOutcome, SimError> {
    let vma = match mem.processes[pid].vma_for(vpage) {
        Some(vma) => *vma,
        None => {
            mem.processes[pid].counters.segv += 1;
            return Ok(FaultOutcome::Segv);
        }
    };

    let mut events = Vec::new();
    let frame = match mem.frames.pop_free() {
        Some(frame) => frame,
        None => {
            let victim = pager.select_victim(mem, rand)?;
            debug!(
                "{:?} selected frame {} as victim, scanning at most {} frames",
                algorithm,
                victim,
                mem.frames.len()
            );
            events.extend(unmap_frame(mem, victim)?);
            mem.frames.pop_free().ok_or_else(|| {
                SimError::Internal("free list empty immediately after a successful eviction".to_string())
            })?
        }
    };

    match algorithm {
        Algorithm::Aging => mem.frames.set_age(frame, 0),
        Algorithm::WorkingSet => mem.frames.set_age(frame, mem.instruction_counter as u32),
        _ => {}
    }

    let pte = &mut mem.processes[pid].page_table[vpage];
    let bring_in = if pte.paged_out() {
        Event::In
    } else if vma.file_mapped {
        Event::Fin
    } else {
        Event::Zero
    };

    pte.set_present(true);
    pte.set_frame(frame);
    pte.set_write_protect(vma.write_protected);
    mem.frames.occupy(frame, pid, vpage);

    match bring_in {
        Event::In => mem.processes[pid].counters.ins += 1,
        Event::Fin => mem.processes[pid].counters.fins += 1,
        Event::Zero => mem.processes[pid].counters.zeros += 1,
        _ => unreachable!(),
    }
    events.push(bring_in);

    mem.processes[pid].counters.maps += 1;
    events.push(Event::Map { frame });

    Ok(FaultOutcome::Installed(events))
}

/// Unmaps every present page of the exiting process in ascending vpage
/// order, discarding modified anonymous pages without an `OUT`, then zeros
/// the whole page table (including `paged_out`).
pub fn exit_process(mem: &mut Memory, pid: usize) -> Vec<Event> {
    let mut events = Vec::new();

    for vpage in 0..PAGE_TABLE_ENTRIES {
        let pte = mem.processes[pid].page_table[vpage];
        if !pte.present() {
            continue;
        }
        let frame = pte.frame();

        events.push(Event::Unmap { pid, vpage });
        mem.processes[pid].counters.unmaps += 1;

        if pte.modified() {
            let file_mapped = mem.processes[pid]
                .vma_for(vpage)
                .map(|vma| vma.file_mapped)
                .unwrap_or(false);
            if file_mapped {
                events.push(Event::Fout);
                mem.processes[pid].counters.fouts += 1;
            }
            // Modified anonymous pages are simply discarded on exit: no
            // OUT, no paged_out bit, no counter bump.
        }

        mem.frames.vacate(frame);
        mem.frames.push_free(frame);
    }

    mem.processes[pid].page_table = [Default::default(); PAGE_TABLE_ENTRIES];
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;
    use crate::vma::Vma;

    fn single_process_memory(vma: Vma, frames: usize) -> Memory {
        Memory::new(vec![Process::new(0, vec![vma])], frames)
    }

    #[test]
    fn segv_on_access_outside_every_vma() {
        let mut mem = single_process_memory(
            Vma {
                start: 0,
                end: 2,
                write_protected: false,
                file_mapped: false,
            },
            4,
        );
        let mut pager = Pager::new(Algorithm::Fifo);
        let mut rand = RandomStream::from_values(vec![0]);
        let outcome = handle_page_fault(&mut mem, &mut pager, &mut rand, Algorithm::Fifo, 0, 3).unwrap();
        assert!(matches!(outcome, FaultOutcome::Segv));
        assert_eq!(mem.processes[0].counters.segv, 1);
        assert!(!mem.processes[0].page_table[3].present());
    }

    #[test]
    fn first_fault_zero_fills_an_anonymous_page() {
        let mut mem = single_process_memory(
            Vma {
                start: 0,
                end: 7,
                write_protected: false,
                file_mapped: false,
            },
            4,
        );
        let mut pager = Pager::new(Algorithm::Fifo);
        let mut rand = RandomStream::from_values(vec![0]);
        let outcome = handle_page_fault(&mut mem, &mut pager, &mut rand, Algorithm::Fifo, 0, 0).unwrap();
        match outcome {
            FaultOutcome::Installed(events) => {
                assert_eq!(events, vec![Event::Zero, Event::Map { frame: 0 }]);
            }
            FaultOutcome::Segv => panic!("expected a successful install"),
        }
        assert!(mem.processes[0].page_table[0].present());
        assert_eq!(mem.processes[0].counters.zeros, 1);
        assert_eq!(mem.processes[0].counters.maps, 1);
    }

    #[test]
    fn eviction_emits_out_for_modified_anonymous_pages() {
        let mut mem = single_process_memory(
            Vma {
                start: 0,
                end: 7,
                write_protected: false,
                file_mapped: false,
            },
            1,
        );
        let mut pager = Pager::new(Algorithm::Fifo);
        let mut rand = RandomStream::from_values(vec![0]);

        handle_page_fault(&mut mem, &mut pager, &mut rand, Algorithm::Fifo, 0, 0).unwrap();
        mem.processes[0].page_table[0].set_modified(true);

        let outcome = handle_page_fault(&mut mem, &mut pager, &mut rand, Algorithm::Fifo, 0, 1).unwrap();
        match outcome {
            FaultOutcome::Installed(events) => {
                assert_eq!(
                    events,
                    vec![
                        Event::Unmap { pid: 0, vpage: 0 },
                        Event::Out,
                        Event::Zero,
                        Event::Map { frame: 0 },
                    ]
                );
            }
            FaultOutcome::Segv => panic!("expected a successful install"),
        }
        assert!(mem.processes[0].page_table[0].paged_out());
        assert!(!mem.processes[0].page_table[0].present());
    }

    #[test]
    fn exit_never_emits_out_for_modified_anonymous_pages() {
        let mut mem = single_process_memory(
            Vma {
                start: 0,
                end: 7,
                write_protected: false,
                file_mapped: false,
            },
            4,
        );
        let mut pager = Pager::new(Algorithm::Fifo);
        let mut rand = RandomStream::from_values(vec![0]);
        handle_page_fault(&mut mem, &mut pager, &mut rand, Algorithm::Fifo, 0, 0).unwrap();
        mem.processes[0].page_table[0].set_modified(true);

        let events = exit_process(&mut mem, 0);
        assert_eq!(events, vec![Event::Unmap { pid: 0, vpage: 0 }]);
        assert!(!mem.processes[0].page_table[0].paged_out());
        assert_eq!(mem.processes[0].counters.outs, 0);
        assert_eq!(mem.frames.free_count(), 4);
    }

    #[test]
    fn exit_emits_fout_for_modified_file_mapped_pages() {
        let mut mem = single_process_memory(
            Vma {
                start: 0,
                end: 7,
                write_protected: false,
                file_mapped: true,
            },
            4,
        );
        let mut pager = Pager::new(Algorithm::Fifo);
        let mut rand = RandomStream::from_values(vec![0]);
        handle_page_fault(&mut mem, &mut pager, &mut rand, Algorithm::Fifo, 0, 0).unwrap();
        mem.processes[0].page_table[0].set_modified(true);

        let events = exit_process(&mut mem, 0);
        assert_eq!(
            events,
            vec![Event::Unmap { pid: 0, vpage: 0 }, Event::Fout]
        );
        assert_eq!(mem.processes[0].counters.fouts, 1);
    }
}
