//! Writes rendered pages under the destination directory and collects the
//! pages that could not be produced.
//!
//! A failing page never stops the batch: the failure is logged, recorded and
//! the caller moves on. [`PageWriter::finish`] hands back every failure,
//! sorted by path, once all visitors are done.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use cukedoc_error::{CukedocError, RenderError};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// One page that was not written.
#[derive(Debug)]
pub struct PageFailure {
    /// Path relative to the destination directory.
    pub path: String,
    /// [`CukedocError::Render`] or [`CukedocError::Io`].
    pub error: CukedocError,
}

/// Outcome of one rendering batch.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub pages_written: usize,
    pub failures: Vec<PageFailure>,
}

impl WriteReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Shared sink for rendered pages. Safe to use from several visitors at once.
#[derive(Debug)]
pub struct PageWriter {
    root: PathBuf,
    written: AtomicUsize,
    failures: Mutex<Vec<PageFailure>>,
}

impl PageWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: AtomicUsize::new(0),
            failures: Mutex::new(Vec::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Render one page and write it to `path`.
    ///
    /// Returns whether the page was written. Render and write failures are
    /// recorded against `path`.
    pub fn publish(
        &self,
        path: &str,
        render: impl FnOnce() -> Result<String, RenderError>,
    ) -> bool {
        let outcome = render()
            .map_err(CukedocError::from)
            .and_then(|html| self.write(path, html.as_bytes()).map_err(CukedocError::from));
        match outcome {
            Ok(()) => {
                self.written.fetch_add(1, Ordering::Relaxed);
                debug!(path, "page written");
                true
            }
            Err(error) => {
                self.record_failure(path, error);
                false
            }
        }
    }

    /// Write raw bytes to `path`, creating parent directories as needed.
    pub fn write(&self, path: &str, contents: &[u8]) -> io::Result<()> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, contents)
    }

    pub fn record_failure(&self, path: &str, error: CukedocError) {
        warn!(path, error = %error, "page could not be generated");
        self.failures.lock().push(PageFailure {
            path: path.to_owned(),
            error,
        });
    }

    pub fn pages_written(&self) -> usize {
        self.written.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> usize {
        self.failures.lock().len()
    }

    pub fn finish(self) -> WriteReport {
        let mut failures = self.failures.into_inner();
        failures.sort_by(|a, b| a.path.cmp(&b.path));
        WriteReport {
            pages_written: self.written.into_inner(),
            failures,
        }
    }
}
