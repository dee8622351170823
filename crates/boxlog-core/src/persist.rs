//! Durable copies of a writer's rendered output.
//!
//! One file per closed writer, named after the close time and the writer:
//! `2026-10-15_14-30-45-repository.create.txt`. The content keeps the ANSI
//! colors, so `cat` replays it as it looked on the console.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const HEADER: &str = "// Generated by boxlog\n// Print this file to see it with colors\n";

/// File name for a writer closed now.
pub fn file_name(name: &str) -> String {
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    let safe: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    format!("{}-{}.txt", stamp, safe)
}

/// Write `buffer` to a new file in `dir`, creating `dir` if needed.
pub fn persist(dir: impl AsRef<Path>, name: &str, buffer: &str) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = dir.join(file_name(name));
    let mut writer = BufWriter::new(File::create(&path)?);
    writer.write_all(HEADER.as_bytes())?;
    writer.write_all(buffer.as_bytes())?;
    writer.flush()?;

    Ok(path)
}
