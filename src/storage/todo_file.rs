//! Plain-text storage for task lists
//!
//! A todo.txt file holds one task per line. Reads take a shared lock,
//! writes go to a locked temp file that is renamed over the original.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tracing::debug;

use crate::domain::TodoList;

/// A todo.txt file on disk
pub struct TodoFile {
    path: PathBuf,
}

impl TodoFile {
    /// Creates a store for the file at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the todo file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the file into a list. A missing file is an empty list.
    pub fn read(&self) -> Result<TodoList> {
        let mut list = TodoList::new();
        list.set_filename(self.path.display().to_string());

        if !self.path.exists() {
            debug!(path = %self.path.display(), "Todo file missing, starting empty");
            return Ok(list);
        }

        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to open todo file: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on todo file")?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read todo file: {}", self.path.display()))?;

        list.parse(&content);
        debug!(path = %self.path.display(), tasks = list.len(), "Read todo file");

        // Lock is released when file is dropped
        Ok(list)
    }

    /// Writes the whole list back (full rewrite)
    pub fn write(&self, list: &TodoList) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on todo file")?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(list.to_text().as_bytes())
                .context("Failed to write tasks")?;
            writer.flush().context("Failed to flush todo file")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        debug!(path = %self.path.display(), tasks = list.len(), "Wrote todo file");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "todo.txt".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = TodoFile::new(dir.path().join("todo.txt"));

        let list = store.read().unwrap();
        assert!(list.is_empty());
        assert_eq!(list.source(), store.path().display().to_string());
    }

    #[test]
    fn read_parses_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(
            &path,
            "(A) 2013-01-01 Call mum @phone\n\nx 2013-01-03 2013-01-02 Pay rent +home\n",
        )
        .unwrap();

        let list = TodoFile::new(&path).read().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.contexts(), vec!["phone"]);
        assert_eq!(list.projects(), vec!["home"]);
    }

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = TodoFile::new(dir.path().join("todo.txt"));

        let list = TodoList::from_text(
            "(B) 2012-12-11 Push +todotxt.js to @github\nx 2013-01-20 2012-12-11 +Launch release 3.1",
        );
        store.write(&list).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "(B) 2012-12-11 Push +todotxt.js to @github\nx 2013-01-20 2012-12-11 +Launch release 3.1\n"
        );

        let loaded = store.read().unwrap();
        assert_eq!(loaded.to_text(), list.to_text());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = TodoFile::new(dir.path().join("nested").join("dir").join("todo.txt"));

        store.write(&TodoList::from_text("Something")).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let store = TodoFile::new(dir.path().join("todo.txt"));

        store.write(&TodoList::from_text("Something")).unwrap();
        assert!(!dir.path().join("todo.txt.tmp").exists());
    }
}
