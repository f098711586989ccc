//! File I/O utilities for line-oriented storage
//!
//! Reading treats a missing file as empty. Writing replaces the whole file,
//! either in place or via a temporary file and rename.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::JournalError;

/// How a full rewrite reaches the disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write to a temp file, sync, then rename over the target
    #[default]
    Atomic,
    /// Truncate the target and write into it directly
    InPlace,
}

/// Read all lines of a text file, returning `None` if the file doesn't exist
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Option<Vec<String>>, JournalError> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(JournalError::Storage(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            JournalError::Storage(format!(
                "Failed to read {} line {}: {}",
                path.display(),
                line_num + 1,
                e
            ))
        })?;
        lines.push(line);
    }

    Ok(Some(lines))
}

/// Replace the contents of a file with the given lines, one per line
pub fn write_lines<P, I, S>(path: P, lines: I, mode: WriteMode) -> Result<(), JournalError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            JournalError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    match mode {
        WriteMode::InPlace => write_to(path, lines),
        WriteMode::Atomic => {
            let temp_path = temp_path_for(path);

            if let Err(e) = write_to(&temp_path, lines) {
                let _ = fs::remove_file(&temp_path);
                return Err(e);
            }

            fs::rename(&temp_path, path).map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                JournalError::Storage(format!("Failed to rename temp file: {}", e))
            })
        }
    }
}

/// Append a single line to a file, creating the file if needed
pub fn append_line<P: AsRef<Path>>(path: P, line: &str) -> Result<(), JournalError> {
    let path = path.as_ref();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| JournalError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    writeln!(file, "{}", line)
        .and_then(|()| file.sync_data())
        .map_err(|e| JournalError::Storage(format!("Failed to append to {}: {}", path.display(), e)))
}

/// Sibling temp file used for atomic writes (`journal.txt` -> `journal.txt.tmp`)
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_to<I, S>(path: &Path, lines: I) -> Result<(), JournalError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = File::create(path).map_err(|e| {
        JournalError::Storage(format!("Failed to create {}: {}", path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref())
            .map_err(|e| JournalError::Storage(format!("Failed to write data: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| JournalError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| JournalError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}
