use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::bot::bridge::Observer;
use crate::bot::error::observer::ObserverError;
use crate::model::log::LogRecord;

/// Appends records to a size-bounded log file with numbered backups.
///
/// When appending a line would push the active file past `max_bytes`, the file is
/// rotated: `bot.log.{n-1}` becomes `bot.log.{n}` down to `bot.log` becoming
/// `bot.log.1`, and the oldest backup beyond `backups` is discarded. With zero
/// backups the active file is simply truncated.
pub struct RotatingFileObserver {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    state: Mutex<FileState>,
}

struct FileState {
    file: Option<File>,
    written: u64,
}

impl RotatingFileObserver {
    /// Opens (or creates) the active log file for appending.
    pub fn open(
        path: impl Into<PathBuf>,
        max_bytes: u64,
        backups: usize,
    ) -> Result<Self, ObserverError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = open_append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes: max_bytes.max(1),
            backups,
            state: Mutex::new(FileState {
                file: Some(file),
                written,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self, state: &mut FileState) -> Result<(), ObserverError> {
        state.file = None;

        if self.backups == 0 {
            File::create(&self.path)?;
        } else {
            let oldest = self.backup_path(self.backups);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in (1..self.backups).rev() {
                let from = self.backup_path(index);
                if from.exists() {
                    fs::rename(&from, self.backup_path(index + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
        }

        state.file = Some(open_append(&self.path)?);
        state.written = 0;
        Ok(())
    }
}

impl Observer for RotatingFileObserver {
    fn name(&self) -> &str {
        "file"
    }

    fn receive(&self, record: &LogRecord) -> Result<(), ObserverError> {
        let line = format!("{record}\n");
        let len = line.len() as u64;

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.written > 0 && state.written + len > self.max_bytes {
            self.rotate(&mut state)?;
        }

        if state.file.is_none() {
            state.file = Some(open_append(&self.path)?);
        }
        if let Some(file) = state.file.as_mut() {
            file.write_all(line.as_bytes())?;
            file.flush()?;
        }
        state.written += len;

        Ok(())
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
