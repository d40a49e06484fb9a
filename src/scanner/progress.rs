use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

/// Counts finished projects and drives an optional terminal progress bar.
#[derive(Clone)]
pub struct ScanProgress {
    inner: Arc<Inner>,
}

struct Inner {
    projects_total: AtomicUsize,
    analyzed: AtomicUsize,
    failed: AtomicUsize,
    started_at: Mutex<Option<Instant>>,
    bar: Option<ProgressBar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub projects_total: usize,
    pub projects_done: usize,
    pub analyzed: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
    pub progress_pct: f64,
}

impl ScanProgress {
    /// Progress without any terminal output.
    pub fn hidden() -> Self {
        Self::with_bar(None)
    }

    /// Progress rendered as a bar on stderr.
    pub fn visible() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{msg} [{elapsed_precise}] {bar:40} {pos}/{len}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_message("Scanning project directories");
        Self::with_bar(Some(bar))
    }

    fn with_bar(bar: Option<ProgressBar>) -> Self {
        Self {
            inner: Arc::new(Inner {
                projects_total: AtomicUsize::new(0),
                analyzed: AtomicUsize::new(0),
                failed: AtomicUsize::new(0),
                started_at: Mutex::new(None),
                bar,
            }),
        }
    }

    pub fn start(&self, total_projects: usize) {
        self.inner
            .projects_total
            .store(total_projects, Ordering::Release);
        self.inner.analyzed.store(0, Ordering::Release);
        self.inner.failed.store(0, Ordering::Release);
        if let Ok(mut started_at) = self.inner.started_at.lock() {
            *started_at = Some(Instant::now());
        }
        if let Some(bar) = &self.inner.bar {
            bar.set_length(total_projects as u64);
            bar.set_position(0);
        }
    }

    pub fn inc_analyzed(&self) {
        self.inner.analyzed.fetch_add(1, Ordering::Relaxed);
        self.tick();
    }

    pub fn inc_failed(&self) {
        self.inner.failed.fetch_add(1, Ordering::Relaxed);
        self.tick();
    }

    fn tick(&self) {
        if let Some(bar) = &self.inner.bar {
            bar.inc(1);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.inner.bar {
            bar.finish();
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let projects_total = self.inner.projects_total.load(Ordering::Acquire);
        let analyzed = self.inner.analyzed.load(Ordering::Acquire);
        let failed = self.inner.failed.load(Ordering::Acquire);
        let projects_done = analyzed + failed;

        let elapsed_ms = self
            .inner
            .started_at
            .lock()
            .ok()
            .and_then(|t| t.map(|t| t.elapsed().as_millis() as u64))
            .unwrap_or(0);

        let progress_pct = if projects_total > 0 {
            (projects_done as f64 / projects_total as f64) * 100.0
        } else {
            0.0
        };

        ProgressSnapshot {
            projects_total,
            projects_done,
            analyzed,
            failed,
            elapsed_ms,
            progress_pct,
        }
    }
}
