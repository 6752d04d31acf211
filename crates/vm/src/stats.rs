//! Cycle statistics collection and reporting.
//!
//! This module tracks how the interpreter keeps up with its cycle period. It provides:
//! 1. **Throughput:** Cycles run and instructions executed, with derived per-cycle averages.
//! 2. **Worst case:** The longest cycle in instructions and in wall time.
//! 3. **Overruns:** Cycles whose wall time exceeded the configured period.

use std::time::{Duration, Instant};

use crate::core::CycleReport;

/// Running totals over every cycle a driver has executed.
#[derive(Clone, Debug)]
pub struct CycleStats {
    start_time: Instant,
    /// Cycles completed.
    pub cycles: u64,
    /// Instructions executed across all cycles, end markers included.
    pub instructions: u64,
    /// Most instructions executed by a single cycle.
    pub max_steps: u64,
    /// Cycles that took longer than the period.
    pub overruns: u64,
    /// Longest wall time spent in a single cycle.
    pub longest_cycle: Duration,
}

impl Default for CycleStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions: 0,
            max_steps: 0,
            overruns: 0,
            longest_cycle: Duration::ZERO,
        }
    }
}

impl CycleStats {
    /// Accounts one completed cycle.
    ///
    /// # Returns
    ///
    /// `true` when `elapsed` exceeded `period`.
    pub fn record(&mut self, report: CycleReport, elapsed: Duration, period: Duration) -> bool {
        self.cycles += 1;
        self.instructions += report.steps;
        self.max_steps = self.max_steps.max(report.steps);
        self.longest_cycle = self.longest_cycle.max(elapsed);
        let overran = elapsed > period;
        if overran {
            self.overruns += 1;
        }
        overran
    }

    /// Wall time since collection started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Mean instructions per cycle, zero before the first cycle.
    pub fn mean_steps(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions as f64 / self.cycles as f64
        }
    }

    /// Prints a summary to stdout.
    pub fn print(&self) {
        let seconds = self.elapsed().as_secs_f64();
        let hz = if seconds > 0.0 {
            self.cycles as f64 / seconds
        } else {
            0.0
        };
        println!("\n==========================================================");
        println!("LADDER INTERPRETER STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("cycles                   {}", self.cycles);
        println!("cycle_rate               {hz:.2} Hz");
        println!("instructions             {}", self.instructions);
        println!("steps_per_cycle.mean     {:.2}", self.mean_steps());
        println!("steps_per_cycle.max      {}", self.max_steps);
        println!(
            "cycle_time.max           {:.3} ms",
            self.longest_cycle.as_secs_f64() * 1000.0
        );
        println!("overruns                 {}", self.overruns);
        println!("==========================================================");
    }
}
