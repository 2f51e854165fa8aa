// ============================================================
// Layer 6 - RSS Profiler
// ============================================================
// The memory-sampling hook used by the memory runner.
//
// Every checkpoint the trainer reports becomes one table row:
//
//   Line #    Mem usage    Increment   Line Contents
//   ================================================
//        1    41.250 MiB    0.000 MiB   train: start
//        2    57.875 MiB   16.625 MiB   train: random topic assignment
//
// followed by a peak / net-change line when the run finishes.
// Resident set size is read from /proc/self/status on Linux;
// other platforms report 0.

use anyhow::Result;
use std::io::Write;

use crate::domain::traits::MemoryProbe;

const MIB: f64 = 1024.0 * 1024.0;

/// Current resident set size of this process, in bytes.
#[cfg(target_os = "linux")]
pub fn read_rss_bytes() -> u64 {
    if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
        for line in status.lines() {
            if let Some(rest) = line.strip_prefix("VmRSS:") {
                let trimmed = rest.trim().trim_end_matches("kB").trim();
                if let Ok(kb) = trimmed.parse::<u64>() {
                    return kb * 1024;
                }
            }
        }
    }
    0
}

#[cfg(not(target_os = "linux"))]
pub fn read_rss_bytes() -> u64 {
    0
}

/// Totals for one profiled construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySummary {
    pub rows:         usize,
    pub baseline_mib: f64,
    pub peak_mib:     f64,
    pub final_mib:    f64,
}

/// Writes a line-by-line memory table to a sink.
pub struct RssProfiler<'w> {
    sink:     &'w mut dyn Write,
    sampler:  fn() -> u64,
    baseline: u64,
    last:     u64,
    peak:     u64,
    rows:     usize,
}

impl<'w> RssProfiler<'w> {
    /// Start profiling against the real process RSS.
    pub fn start(sink: &'w mut dyn Write) -> Result<Self> {
        Self::with_sampler(sink, read_rss_bytes)
    }

    /// Start profiling with a custom RSS source.
    pub fn with_sampler(sink: &'w mut dyn Write, sampler: fn() -> u64) -> Result<Self> {
        writeln!(sink, "Line #    Mem usage    Increment   Line Contents")?;
        writeln!(sink, "================================================")?;
        let baseline = sampler();
        Ok(Self {
            sink,
            sampler,
            baseline,
            last: baseline,
            peak: baseline,
            rows: 0,
        })
    }

    /// Write the closing peak line and return the totals.
    pub fn finish(mut self) -> Result<MemorySummary> {
        let summary = MemorySummary {
            rows:         self.rows,
            baseline_mib: self.baseline as f64 / MIB,
            peak_mib:     self.peak as f64 / MIB,
            final_mib:    self.last as f64 / MIB,
        };
        writeln!(
            self.sink,
            "\nPeak {:.3} MiB, net change {:.3} MiB over {} checkpoints\n",
            summary.peak_mib,
            summary.final_mib - summary.baseline_mib,
            summary.rows
        )?;
        Ok(summary)
    }
}

impl MemoryProbe for RssProfiler<'_> {
    fn checkpoint(&mut self, label: &str) -> Result<()> {
        let rss = (self.sampler)();
        let increment = (rss as f64 - self.last as f64) / MIB;
        self.rows += 1;
        self.last = rss;
        self.peak = self.peak.max(rss);

        writeln!(
            self.sink,
            "{:>6} {:>9.3} MiB {:>9.3} MiB   {}",
            self.rows,
            rss as f64 / MIB,
            increment,
            label
        )?;
        Ok(())
    }
}
