//! On-disk home of the most recently generated resume.
//!
//! There is exactly one artifact, `resume.pdf`, and every successful
//! generation replaces it. Writes land in a temporary file in the same
//! directory and are renamed over the target, so readers only ever see a
//! complete document. Concurrent generations resolve to last-writer-wins.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

/// File name shared by the writer and the download route.
pub const RESUME_FILENAME: &str = "resume.pdf";

#[cfg(unix)]
const RESUME_FILE_MODE: u32 = 0o644;

#[derive(Debug, Clone)]
pub struct ResumeStore {
    dir: PathBuf,
}

impl ResumeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(RESUME_FILENAME)
    }

    /// Atomically replaces the stored resume with `bytes`.
    pub async fn save(&self, bytes: Vec<u8>) -> io::Result<PathBuf> {
        let dir = self.dir.clone();
        let target = self.path();

        let written = tokio::task::spawn_blocking(move || write_atomically(&dir, &target, &bytes))
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;

        info!("Resume PDF written to {}", written.display());
        Ok(written)
    }

    /// Returns the stored resume, or `None` before the first generation.
    pub async fn load(&self) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path()).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Temp files are created 0600; the published resume is world-readable.
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(RESUME_FILE_MODE))?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;

    Ok(target.to_path_buf())
}
