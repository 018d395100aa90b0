use std::path::{Path, PathBuf};

use {
    async_trait::async_trait,
    tokio::sync::Mutex,
    tracing::{debug, info, warn},
};

use crate::store::SubscriberStore;

/// Line-oriented file store: one subscriber identifier per line.
///
/// The file is created lazily on the first successful insert. Blank and
/// whitespace-only lines are ignored on read, so a hand-edited file stays
/// loadable. Every mutation rewrites the full membership through a sibling
/// temp file followed by an atomic rename, which lets `list` read without
/// taking the write lock.
pub struct FileSubscriberStore {
    path: PathBuf,
    /// Serializes the read-check-write sequence of `add`/`remove` so two
    /// concurrent follow events cannot lose an update.
    write_lock: Mutex<()>,
}

impl FileSubscriberStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Vec<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read subscriber file");
                Vec::new()
            },
        }
    }

    /// Write the full membership to a sibling temp file, then swap it into
    /// place so a concurrent `list` never observes a torn file.
    async fn write_all(&self, ids: &[String]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("tmp");
        let mut contents = ids.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &self.path).await
    }
}

#[async_trait]
impl SubscriberStore for FileSubscriberStore {
    async fn list(&self) -> Vec<String> {
        self.read_all().await
    }

    async fn add(&self, id: &str) -> bool {
        // Reads trim each line, so store the trimmed form too or an id with
        // surrounding whitespace would never match its persisted copy.
        let id = id.trim();
        if id.is_empty() {
            warn!("refusing to register a blank subscriber identifier");
            return false;
        }
        let _guard = self.write_lock.lock().await;
        let mut ids = self.read_all().await;
        if ids.iter().any(|existing| existing == id) {
            debug!(user_id = id, "subscriber already registered");
            return false;
        }
        ids.push(id.to_string());
        match self.write_all(&ids).await {
            Ok(()) => {
                info!(user_id = id, total = ids.len(), "registered subscriber");
                true
            },
            Err(e) => {
                warn!(user_id = id, error = %e, "failed to persist subscriber");
                false
            },
        }
    }

    async fn remove(&self, id: &str) -> bool {
        let id = id.trim();
        let _guard = self.write_lock.lock().await;
        let mut ids = self.read_all().await;
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() == before {
            debug!(user_id = id, "subscriber not registered, nothing to remove");
            return false;
        }
        match self.write_all(&ids).await {
            Ok(()) => {
                info!(user_id = id, total = ids.len(), "removed subscriber");
                true
            },
            Err(e) => {
                warn!(user_id = id, error = %e, "failed to rewrite subscriber file");
                false
            },
        }
    }
}
