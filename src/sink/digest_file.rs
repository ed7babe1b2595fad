use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::Result;

/// Writes one pretty-printed JSON file per run, named
/// `{prefix}-{YYYYMMDD-HHMM}.json`. Existing files are never overwritten.
pub struct DigestWriter {
    output_dir: PathBuf,
    prefix: String,
}

impl DigestWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P, prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
        }
    }

    pub fn file_stem(&self, now: DateTime<Utc>) -> String {
        format!("{}-{}", self.prefix, now.format("%Y%m%d-%H%M"))
    }

    pub fn write<T: Serialize>(&self, pack: &T, now: DateTime<Utc>) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let json = serde_json::to_string_pretty(pack)?;
        let stem = self.file_stem(now);

        let mut attempt = 0u32;
        loop {
            let name = if attempt == 0 {
                format!("{stem}.json")
            } else {
                format!("{stem}-{attempt}.json")
            };
            let path = self.output_dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(json.as_bytes())?;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
