//! The instruction dispatcher: the state machine driving `c`/`r`/`w`/`e`
//! transitions, accumulating per-process counters and the global cost.

use log::debug;

use crate::cost;
use crate::error::SimError;
use crate::fault::{exit_process, handle_page_fault, FaultOutcome};
use crate::memory::Memory;
use crate::pager::{Algorithm, Pager};
use crate::process::PAGE_TABLE_ENTRIES;
use crate::random::RandomStream;
use crate::report::{self, Event, OutputFlags};
use crate::trace::{Instruction, Op};

pub struct Simulator {
    mem: Memory,
    pager: Pager,
    rand: RandomStream,
    algorithm: Algorithm,
    output: OutputFlags,
    current_pid: usize,
    ctx_switches: u64,
    process_exits: u64,
    cost: u64,
}

impl Simulator {
    pub fn new(mem: Memory, algorithm: Algorithm, rand: RandomStream, output: OutputFlags) -> Self {
        Simulator {
            mem,
            pager: Pager::new(algorithm),
            rand,
            algorithm,
            output,
            current_pid: 0,
            ctx_switches: 0,
            process_exits: 0,
            cost: 0,
        }
    }

    pub fn dispatch(&mut self, instr: Instruction) -> Result<(), SimError> {
        self.mem.instruction_counter += 1;
        let index = self.mem.instruction_counter - 1;

        if self.output.trace {
            println!("{}: ==> {} {}", index, instr.op.as_char(), instr.arg);
        }

        match instr.op {
            Op::Switch => self.handle_switch(instr.arg as usize),
            Op::Exit => self.handle_exit(),
            Op::Read => self.handle_access(instr.arg as usize, false),
            Op::Write => self.handle_access(instr.arg as usize, true),
        }
    }

    fn check_pid(&self, pid: usize) -> Result<(), SimError> {
        if pid >= self.mem.processes.len() {
            return Err(SimError::UnknownProcess(pid));
        }
        Ok(())
    }

    fn check_vpage(vpage: usize) -> Result<(), SimError> {
        if vpage >= PAGE_TABLE_ENTRIES {
            return Err(SimError::InvalidVpage {
                vpage,
                entries: PAGE_TABLE_ENTRIES,
            });
        }
        Ok(())
    }

    fn handle_switch(&mut self, pid: usize) -> Result<(), SimError> {
        self.check_pid(pid)?;
        self.current_pid = pid;
        self.ctx_switches += 1;
        self.cost += cost::CTX_SWITCH;
        Ok(())
    }

    fn handle_exit(&mut self) -> Result<(), SimError> {
        let pid = self.current_pid;
        self.check_pid(pid)?;
        if self.output.trace {
            println!("EXIT current process {}", pid);
        }
        debug!("process {} exiting", pid);

        let events = exit_process(&mut self.mem, pid);
        for event in &events {
            self.emit(event);
            self.cost += event.cost();
        }
        self.process_exits += 1;
        self.cost += cost::PROC_EXIT;
        Ok(())
    }

    fn handle_access(&mut self, vpage: usize, is_write: bool) -> Result<(), SimError> {
        let pid = self.current_pid;
        self.check_pid(pid)?;
        Self::check_vpage(vpage)?;
        self.cost += cost::READ_WRITE;

        if !self.mem.processes[pid].page_table[vpage].present() {
            let outcome = handle_page_fault(
                &mut self.mem,
                &mut self.pager,
                &mut self.rand,
                self.algorithm,
                pid,
                vpage,
            )?;
            match outcome {
                FaultOutcome::Segv => {
                    self.emit(&Event::Segv);
                    self.cost += Event::Segv.cost();
                    return Ok(());
                }
                FaultOutcome::Installed(events) => {
                    for event in &events {
                        self.emit(event);
                        self.cost += event.cost();
                        if let Event::Map { frame } = event {
                            debug!("process {} mapped vpage {} to frame {}", pid, vpage, frame);
                        }
                    }
                }
            }
        }

        let pte = &mut self.mem.processes[pid].page_table[vpage];
        pte.set_referenced(true);
        if is_write {
            if pte.write_protect() {
                self.emit(&Event::Segprot);
                self.cost += Event::Segprot.cost();
                self.mem.processes[pid].counters.segprot += 1;
            } else {
                pte.set_modified(true);
            }
        }
        Ok(())
    }

    fn emit(&self, event: &Event) {
        if self.output.trace {
            println!("{}", event.line());
        }
    }

    /// Emits the post-simulation `-oP`/`-oF`/`-oS` reports, if requested.
    pub fn report(&self) {
        if self.output.page_table {
            for proc in &self.mem.processes {
                report::print_page_table(proc);
            }
        }
        if self.output.frame_table {
            report::print_frame_table(&self.mem.frames);
        }
        if self.output.summary {
            for proc in &self.mem.processes {
                report::print_process_summary(proc);
            }
            report::print_total_cost(self.mem.instruction_counter, self.ctx_switches, self.process_exits, self.cost);
        }
    }

    /// The current simulation state. Exposed for embedders and tests that
    /// want to assert on counters/frame occupancy without re-parsing
    /// printed output.
    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    pub fn total_cost(&self) -> u64 {
        self.cost
    }
}
