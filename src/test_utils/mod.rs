//! Test utilities for errorshots
//!
//! Helpers for building temporary log trees, a command runner that
//! records what discovery asked it to run, and a log recorder.

#![cfg(test)]

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};

use anyhow::Result;
use log::{Level, LevelFilter, Log, Metadata, Record};
use tempfile::TempDir;

use crate::command::{CommandOutput, CommandRunner, CommandSpec};
use crate::constants::OVERRIDE_FILE_NAME;

/// Creates a test file structure in a temporary directory
pub fn create_test_file_structure() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let base_path = temp_dir.path();

    // Create directory structure
    fs::create_dir_all(base_path.join("dir1/subdir1"))?;
    fs::create_dir_all(base_path.join("dir2"))?;

    // Create test files
    fs::write(base_path.join("file1.txt"), b"Test content 1")?;
    fs::write(base_path.join("file2.log"), b"Test log content")?;
    fs::write(base_path.join("dir1/file3.txt"), b"Test content 3")?;
    fs::write(base_path.join("dir1/subdir1/file4.txt"), b"Test content 4")?;
    fs::write(base_path.join("dir2/file5.log"), b"Another log file")?;

    Ok(temp_dir)
}

/// Writes `.errorshots` into `dir`
pub fn write_override_file(dir: &Path, content: &str) -> io::Result<PathBuf> {
    let path = dir.join(OVERRIDE_FILE_NAME);
    fs::write(&path, content)?;
    Ok(path)
}

/// Command runner answering every command with the same stdout
pub struct RecordingRunner {
    stdout: String,
    calls: Arc<Mutex<Vec<CommandSpec>>>,
}

impl RecordingRunner {
    pub fn new(stdout: &str) -> Self {
        RecordingRunner {
            stdout: stdout.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle on the recorded invocations
    pub fn calls(&self) -> Arc<Mutex<Vec<CommandSpec>>> {
        Arc::clone(&self.calls)
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        self.calls.lock().unwrap().push(spec.clone());
        Ok(CommandOutput::with_stdout(self.stdout.clone()))
    }
}

/// A log record captured by [`capture_logs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLog {
    pub level: Level,
    pub message: String,
}

thread_local! {
    static CAPTURED: RefCell<Vec<CapturedLog>> = RefCell::new(Vec::new());
}

/// Keeps records per thread so parallel tests don't see each other's logs
struct ThreadLogRecorder;

impl Log for ThreadLogRecorder {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|captured| {
            captured.borrow_mut().push(CapturedLog {
                level: record.level(),
                message: record.args().to_string(),
            })
        });
    }

    fn flush(&self) {}
}

static RECORDER: ThreadLogRecorder = ThreadLogRecorder;
static RECORDER_INIT: Once = Once::new();

/// Install the recorder and clear the current thread's records
pub fn capture_logs() {
    RECORDER_INIT.call_once(|| {
        let _ = log::set_logger(&RECORDER);
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

/// Records logged on the current thread since [`capture_logs`]
pub fn captured_logs() -> Vec<CapturedLog> {
    CAPTURED.with(|captured| captured.borrow().clone())
}
