//! Size-rotated append-only file.
//!
//! When the live file reaches its size limit it is renamed to `<name>.1`,
//! existing backups shift up by one (`.1` → `.2`, ...) and the oldest beyond
//! the retention limit is deleted.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size at which the live file is rotated (10 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of numbered backups kept next to the live file.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe line writer with numbered backups.
///
/// The file handle is opened lazily on the first write, so constructing a
/// `RotatingFile` never touches the filesystem.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    /// Rotating file with the default limits.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Fails if the lock is poisoned or if rotating, opening or writing the
    /// file fails.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("lock poisoned: {e}")))?;

        if self.is_full() {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }
        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "span file not open"))?;

        writeln!(handle, "{line}")?;
        handle.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() >= self.max_bytes)
    }

    /// `<path>.<n>`
    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn appends_lines_below_limit() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("spans.jsonl"));

        file.append_line("one").unwrap();
        file.append_line("two").unwrap();

        assert_eq!(read(file.path()), "one\ntwo\n");
        assert!(!dir.path().join("spans.jsonl.1").exists());
    }

    #[test]
    fn rotation_shifts_backups_and_drops_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let file = RotatingFile::with_limits(path.clone(), 1, 2);

        for line in ["l1", "l2", "l3", "l4"] {
            file.append_line(line).unwrap();
        }

        assert_eq!(read(&path), "l4\n");
        assert_eq!(read(&dir.path().join("spans.jsonl.1")), "l3\n");
        assert_eq!(read(&dir.path().join("spans.jsonl.2")), "l2\n");
        assert!(!dir.path().join("spans.jsonl.3").exists());
    }

    #[test]
    fn zero_backups_truncates_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let file = RotatingFile::with_limits(path.clone(), 1, 0);

        file.append_line("old").unwrap();
        file.append_line("new").unwrap();

        assert_eq!(read(&path), "new\n");
        assert!(!dir.path().join("spans.jsonl.1").exists());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("absent").join("spans.jsonl"));
        assert!(file.append_line("x").is_err());
    }
}
