use std::{fs, io, path::PathBuf};

/// Hands out fresh, uniquely named file paths. Cleanup belongs to the caller.
pub trait TempFileProvider: Send + Sync {
    fn allocate(&self, prefix: &str) -> io::Result<PathBuf>;
}

/// Creates empty files through `tempfile` and detaches them so they outlive the call.
#[derive(Debug, Default, Clone)]
pub struct ScopedTempFiles {
    dir: Option<PathBuf>,
}

impl ScopedTempFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

impl TempFileProvider for ScopedTempFiles {
    fn allocate(&self, prefix: &str) -> io::Result<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);

        let file = match &self.dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                builder.tempfile_in(dir)?
            }
            None => builder.tempfile()?,
        };

        file.into_temp_path().keep().map_err(|e| e.error)
    }
}
