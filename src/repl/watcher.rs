use crossbeam_channel::Sender;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Watches the chorale file being edited and forwards change events to a
/// channel. Only one file is watched at a time, since the REPL holds a
/// single chorale.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    current: Option<PathBuf>,
}

impl FileWatcher {
    /// Create a new file watcher that sends events to the provided channel
    pub fn new(tx: Sender<notify::Result<Event>>) -> notify::Result<Self> {
        let watcher = notify::recommended_watcher(move |res| {
            // The receiver is gone once the REPL exits
            let _ = tx.send(res);
        })?;

        Ok(Self {
            watcher,
            current: None,
        })
    }

    /// Watch `path`, replacing any previously watched file
    pub fn watch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<()> {
        let path = path.as_ref();
        if self.current.as_deref() == Some(path) {
            return Ok(());
        }

        self.watcher.watch(path, RecursiveMode::NonRecursive)?;
        if let Some(previous) = self.current.replace(path.to_path_buf()) {
            if let Err(e) = self.watcher.unwatch(&previous) {
                tracing::debug!(path = %previous.display(), error = %e, "unwatch failed");
            }
        }
        tracing::debug!(path = %path.display(), "watching");
        Ok(())
    }

    /// Stop watching the current file
    pub fn unwatch(&mut self) -> notify::Result<()> {
        match self.current.take() {
            Some(path) => self.watcher.unwatch(&path),
            None => Ok(()),
        }
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }
}
