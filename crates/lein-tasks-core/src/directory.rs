//! Scoped working-directory changes
//!
//! Task actions may run their external command from another directory. The
//! process working directory is global state, so the change is held by a guard
//! that puts the previous directory back when it is dropped, even when the
//! action fails or panics.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ExecutionError;

/// Restores the previous working directory on drop
#[derive(Debug)]
pub struct DirectoryGuard {
    previous: PathBuf,
}

impl DirectoryGuard {
    /// Change into `path`, remembering the current directory
    pub fn enter(path: &Path) -> Result<Self, ExecutionError> {
        let previous = std::env::current_dir().map_err(|source| ExecutionError::Directory {
            path: PathBuf::from("."),
            source,
        })?;

        std::env::set_current_dir(path).map_err(|source| ExecutionError::Directory {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(from = %previous.display(), to = %path.display(), "changed directory");

        Ok(Self { previous })
    }
}

impl Drop for DirectoryGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            warn!(path = %self.previous.display(), error = %e, "failed to restore directory");
        } else {
            debug!(to = %self.previous.display(), "restored directory");
        }
    }
}

/// Run `f` inside `directory`, or in place when no directory is given
pub fn in_directory<T, E>(
    directory: Option<&Path>,
    f: impl FnOnce() -> Result<T, E>,
) -> Result<T, E>
where
    E: From<ExecutionError>,
{
    match directory {
        Some(directory) => {
            let _guard = DirectoryGuard::enter(directory)?;
            f()
        }
        None => f(),
    }
}
