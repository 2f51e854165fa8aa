// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting pieces the benchmark runners write through:
//
//   report_sinks.rs - the timing / memory / topic report files,
//                     opened once per run and flushed after
//                     every parameter assignment
//
//   rss_profiler.rs - the memory-sampling hook: reads the
//                     process RSS at each trainer checkpoint
//                     and writes one table row per checkpoint
//
//   run_manifest.rs - the run configuration saved as JSON
//                     next to the reports

/// Report file lifecycle
pub mod report_sinks;

/// Line-granular resident memory profiler
pub mod rss_profiler;

/// bench_config.json writer
pub mod run_manifest;
