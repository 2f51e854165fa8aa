// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Workflow coordination only: no sampling math, no file
// formats, no argument parsing.
//
//   benchmark_use_case.rs - the orchestrator for a grid sweep
//   timing_runner.rs      - repeated timed constructions
//   memory_runner.rs      - one profiled construction
//   topic_reporter.rs     - top-word blocks per assignment

// The grid sweep workflow
pub mod benchmark_use_case;

pub mod timing_runner;
pub mod memory_runner;
pub mod topic_reporter;

#[cfg(test)]
pub(crate) mod test_support;
