//! Cycle Driver.
//!
//! Runs a loaded program the way a PLC scan loop does:
//! 1. **Inputs:** The binding copies external levels into the relay bank.
//! 2. **Execute:** The interpreter makes exactly one pass over the program.
//! 3. **Outputs:** The binding publishes the relay bank.
//! 4. **Pace:** The driver sleeps until the next period boundary, logging overruns.

use std::convert::Infallible;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::common::ExecError;
use crate::config::Config;
use crate::core::{CycleReport, Machine};
use crate::sim::image::ProgramImage;
use crate::sim::io::IoBinding;
use crate::stats::CycleStats;

/// Owns a program image, its execution context, and the I/O binding.
#[derive(Debug)]
pub struct CycleDriver<B: IoBinding> {
    image: ProgramImage,
    machine: Machine,
    binding: B,
    stats: CycleStats,
    paced: bool,
}

impl<B: IoBinding> CycleDriver<B> {
    /// Creates a driver with zeroed banks.
    ///
    /// Banks are sized by `config`, grown if needed to cover every address
    /// the program was validated against.
    pub fn new(image: ProgramImage, config: &Config, binding: B) -> Self {
        let program = image.program();
        let mut machine = Machine::with_capacity(
            config.memory.relay_capacity.max(program.relay_capacity()),
            config.memory.integer_capacity.max(program.integer_capacity()),
        );
        machine.step_limit = config.general.step_limit;
        machine.trace = config.general.trace_instructions;
        Self {
            image,
            machine,
            binding,
            stats: CycleStats::default(),
            paced: true,
        }
    }

    /// Enables or disables sleeping between cycles.
    #[must_use]
    pub fn with_pacing(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    /// The loaded program image.
    pub const fn image(&self) -> &ProgramImage {
        &self.image
    }

    /// The execution context.
    pub const fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Mutable execution context, for inspection and injection between cycles.
    pub const fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    /// The I/O binding.
    pub const fn binding(&self) -> &B {
        &self.binding
    }

    /// Mutable I/O binding.
    pub const fn binding_mut(&mut self) -> &mut B {
        &mut self.binding
    }

    /// Period between cycle starts.
    pub const fn period(&self) -> Duration {
        self.image.cycle_period()
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Reads inputs, runs one cycle, and writes outputs.
    ///
    /// # Errors
    ///
    /// Any [`ExecError`] from the interpreter. Outputs are not written for a
    /// failed cycle.
    pub fn run_cycle(&mut self) -> Result<CycleReport, ExecError> {
        let start = Instant::now();
        self.binding.read_inputs(&mut self.machine.relays);
        let report = self.machine.run_one_cycle(self.image.program())?;
        self.binding.write_outputs(&self.machine.relays);

        let elapsed = start.elapsed();
        let period = self.image.cycle_period();
        if self.stats.record(report, elapsed, period) {
            warn!(
                cycle = self.stats.cycles,
                elapsed_us = elapsed.as_micros(),
                period_us = period.as_micros(),
                "cycle overran its period"
            );
        }
        debug!(cycle = self.stats.cycles, steps = report.steps, "cycle complete");
        Ok(report)
    }

    /// Runs `n` cycles, returning as soon as the last one completes.
    ///
    /// # Errors
    ///
    /// The first [`ExecError`]; no further cycles are run after it.
    pub fn run_cycles(&mut self, n: u64) -> Result<(), ExecError> {
        let mut deadline = Instant::now();
        for i in 0..n {
            let _ = self.run_cycle()?;
            if i + 1 < n {
                deadline = self.pace(deadline);
            }
        }
        Ok(())
    }

    /// Runs cycles until one fails.
    ///
    /// # Errors
    ///
    /// Returns only with the [`ExecError`] that stopped the loop.
    pub fn run_forever(&mut self) -> Result<Infallible, ExecError> {
        let mut deadline = Instant::now();
        loop {
            let _ = self.run_cycle()?;
            deadline = self.pace(deadline);
        }
    }

    /// Sleeps until one period after `deadline` and returns the new deadline.
    ///
    /// A late cycle restarts the schedule from now rather than bursting to catch up.
    fn pace(&self, deadline: Instant) -> Instant {
        if !self.paced {
            return deadline;
        }
        let next = deadline + self.image.cycle_period();
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
            next
        } else {
            now
        }
    }
}
