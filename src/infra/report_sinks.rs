// ============================================================
// Layer 6 - Report Sinks
// ============================================================
// Owns the three report writers for one benchmark run:
//
//   timing  -> perf_enron.csv
//   memory  -> mem_enron.txt
//   topics  -> topic_enron.rst
//
// Files are created (truncated) once, when the sweep starts,
// and closed when ReportSinks is dropped, on success or error.
// A disabled report kind gets no file; anything still written
// to it goes to standard output instead.

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

/// The kinds of report a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Timing,
    Memory,
    Topics,
}

impl ReportKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::Timing => "perf_enron.csv",
            ReportKind::Memory => "mem_enron.txt",
            ReportKind::Topics => "topic_enron.rst",
        }
    }
}

/// Which report files to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkToggles {
    pub timing: bool,
    pub memory: bool,
    pub topics: bool,
}

pub struct ReportSinks {
    timing: Box<dyn Write>,
    memory: Box<dyn Write>,
    topics: Box<dyn Write>,
    /// Files actually created, for logging
    files:  Vec<PathBuf>,
}

impl ReportSinks {
    /// Create the enabled report files under `out_dir`.
    pub fn open(out_dir: &Path, toggles: SinkToggles) -> Result<Self> {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("Cannot create output directory '{}'", out_dir.display()))?;

        let mut files = Vec::new();
        let mut open = |kind: ReportKind, enabled: bool| -> Result<Box<dyn Write>> {
            if !enabled {
                return Ok(Box::new(io::stdout()));
            }
            let path = out_dir.join(kind.file_name());
            let file = File::create(&path)
                .with_context(|| format!("Cannot create report '{}'", path.display()))?;
            tracing::debug!("Opened {:?} report '{}'", kind, path.display());
            files.push(path);
            Ok(Box::new(BufWriter::new(file)))
        };

        let timing = open(ReportKind::Timing, toggles.timing)?;
        let memory = open(ReportKind::Memory, toggles.memory)?;
        let topics = open(ReportKind::Topics, toggles.topics)?;

        Ok(Self { timing, memory, topics, files })
    }

    pub fn timing(&mut self) -> &mut dyn Write {
        self.timing.as_mut()
    }

    pub fn memory(&mut self) -> &mut dyn Write {
        self.memory.as_mut()
    }

    pub fn topics(&mut self) -> &mut dyn Write {
        self.topics.as_mut()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Push everything written so far to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.timing.flush().context("Cannot flush timing report")?;
        self.memory.flush().context("Cannot flush memory report")?;
        self.topics.flush().context("Cannot flush topic report")?;
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_only_enabled_files() {
        let dir = tempfile::tempdir().unwrap();
        let sinks = ReportSinks::open(
            dir.path(),
            SinkToggles { timing: true, memory: false, topics: true },
        )
        .unwrap();

        assert_eq!(sinks.files().len(), 2);
        assert!(dir.path().join("perf_enron.csv").exists());
        assert!(!dir.path().join("mem_enron.txt").exists());
        assert!(dir.path().join("topic_enron.rst").exists());
    }

    #[test]
    fn test_flush_persists_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut sinks = ReportSinks::open(
            dir.path(),
            SinkToggles { timing: true, memory: true, topics: true },
        )
        .unwrap();

        write!(sinks.timing(), "5, 50, None, 0.100").unwrap();
        sinks.flush().unwrap();

        let content = fs::read_to_string(dir.path().join("perf_enron.csv")).unwrap();
        assert_eq!(content, "5, 50, None, 0.100");
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ReportSinks::open(&nested, SinkToggles { timing: true, memory: true, topics: true })
            .unwrap();
        assert!(nested.join("mem_enron.txt").exists());
    }
}
