use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::utils::errors::{EmptyResult, ResultTrait, ResultWithError};

pub struct DirUtils;

impl DirUtils {
    pub fn curr_dir() -> ResultWithError<PathBuf> {
        std::env::current_dir().auto_err("Could not read current directory")
    }

    /// Per-user configuration directory, e.g. `~/.config/artifetch`.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("artifetch"))
    }

    /// Moves a file, falling back to copy + remove when a rename crosses filesystems.
    pub fn move_file(from: &Path, to: &Path) -> EmptyResult {
        if let Some(parent) = to.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .auto_err(&format!("Could not create directory {:?}", parent))?;
        }

        if fs::rename(from, to).is_ok() {
            return Ok(());
        }

        debug!("Rename of {:?} failed, copying to {:?}", from, to);
        fs::copy(from, to).auto_err(&format!("Failed to copy {:?} to {:?}", from, to))?;
        fs::remove_file(from).auto_err(&format!("Failed to remove {:?}", from))?;
        Ok(())
    }
}
