//! Artwork file lifecycle: stream into `<target>.part`, then rename over the
//! target. A crash mid-transfer leaves at most a `.part` file behind.

use crate::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before the rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `poster.jpg` → `poster.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// An artwork file being written.
#[derive(Debug)]
pub struct ArtworkFile {
    writer: BufWriter<File>,
    temp_path: PathBuf,
    /// Asset folder, when `create` had to make it.
    created_dir: Option<PathBuf>,
}

impl ArtworkFile {
    /// Creates the parent directories of `final_path` and opens its temp
    /// file, truncating any leftover from an earlier run.
    pub fn create(final_path: &Path) -> Result<Self> {
        let mut created_dir = None;
        if let Some(parent) = final_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                fs::create_dir_all(parent)?;
                created_dir = Some(parent.to_path_buf());
            }
        }
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            temp_path,
            created_dir,
        })
    }

    pub fn writer(&mut self) -> &mut dyn Write {
        &mut self.writer
    }

    /// Flushes and renames the temp file to `final_path`, replacing any
    /// existing file.
    pub fn finalize(mut self, final_path: &Path) -> Result<()> {
        self.writer.flush()?;
        fs::rename(&self.temp_path, final_path)?;
        Ok(())
    }

    /// Removes the temp file, and the asset folder too if `create` made it
    /// and it is empty again. Folders that already existed are left alone.
    pub fn discard(self) -> Result<()> {
        let Self {
            writer,
            temp_path,
            created_dir,
        } = self;
        drop(writer);
        fs::remove_file(&temp_path)?;
        if let Some(dir) = created_dir {
            // Only succeeds when empty.
            let _ = fs::remove_dir(dir);
        }
        Ok(())
    }
}
