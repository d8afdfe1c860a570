// Tue Feb 03 2026 - Alex

use crate::orchestration::DumpError;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};

/// Completion handle for one dispatched write.
#[must_use]
pub struct WriteTicket {
    path: PathBuf,
    receiver: Receiver<io::Result<()>>,
}

impl WriteTicket {
    /// Blocks until the write has finished.
    pub fn wait(self) -> Result<PathBuf, DumpError> {
        match self.receiver.recv() {
            Ok(Ok(())) => Ok(self.path),
            Ok(Err(source)) => Err(DumpError::io(self.path, source)),
            Err(_) => Err(DumpError::Fatal(format!(
                "write job for {} ended without reporting",
                self.path.display()
            ))),
        }
    }
}

/// Runs report writes on a bounded pool.
pub struct WriteDispatcher {
    pool: ThreadPool,
    dispatched: AtomicUsize,
    completed: AtomicUsize,
}

impl WriteDispatcher {
    pub fn new(worker_threads: usize) -> Result<Self, DumpError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads.max(1))
            .thread_name(|i| format!("report-writer-{}", i))
            .build()
            .map_err(|e| DumpError::Fatal(format!("Failed to start writer pool: {}", e)))?;

        Ok(Self {
            pool,
            dispatched: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        })
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn dispatch<F>(&self, path: PathBuf, job: F) -> WriteTicket
    where
        F: FnOnce(&Path) -> io::Result<()> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let target = path.clone();
        self.dispatched.fetch_add(1, Ordering::SeqCst);

        self.pool.spawn(move || {
            let result = job(&target);
            if let Err(e) = &result {
                log::warn!("Write to {} failed: {}", target.display(), e);
            }
            let _ = sender.send(result);
        });

        WriteTicket { path, receiver }
    }

    /// Waits for every ticket, even after a failure, and returns the
    /// written paths or the first error.
    pub fn join(&self, tickets: Vec<WriteTicket>) -> Result<Vec<PathBuf>, DumpError> {
        let mut written = Vec::with_capacity(tickets.len());
        let mut first_error = None;

        for ticket in tickets {
            let result = ticket.wait();
            self.completed.fetch_add(1, Ordering::SeqCst);
            match result {
                Ok(path) => written.push(path),
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        log::debug!(
            "Joined writer pool: {}/{} writes completed",
            self.completed(),
            self.dispatched()
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(written),
        }
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_join_waits_for_every_write() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = WriteDispatcher::new(4).unwrap();

        let tickets: Vec<_> = (0..32)
            .map(|i| {
                let path = dir.path().join(format!("{}-report", i));
                dispatcher.dispatch(path, move |p| fs::write(p, format!("report {}", i)))
            })
            .collect();

        let written = dispatcher.join(tickets).unwrap();
        assert_eq!(written.len(), 32);
        assert_eq!(dispatcher.dispatched(), 32);
        assert_eq!(dispatcher.completed(), 32);
        for path in written {
            assert!(path.is_file());
        }
    }

    #[test]
    fn test_failed_write_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let dispatcher = WriteDispatcher::new(2).unwrap();

        let good = dispatcher.dispatch(dir.path().join("ok"), |p| fs::write(p, "fine"));
        let bad = dispatcher.dispatch(dir.path().join("missing").join("nope"), |p| fs::write(p, "lost"));

        let err = dispatcher.join(vec![good, bad]).unwrap_err();
        assert!(matches!(err, DumpError::Io { .. }));
        assert_eq!(dispatcher.completed(), 2);
        assert!(dir.path().join("ok").is_file());
    }
}
