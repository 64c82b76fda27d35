use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

pub trait FsExt {
    // Relative paths are resolved against the current working directory, absolute paths are kept as is.
    fn relative_to_cwd(&self) -> Result<PathBuf>
    where
        Self: AsRef<Path>,
    {
        let cwd_dir = std::env::current_dir()?;

        Ok(cwd_dir.join(self))
    }

    fn existing_file(&self) -> Result<PathBuf>
    where
        Self: AsRef<Path>,
    {
        let path = self.relative_to_cwd()?;

        if path.is_file() {
            Ok(path)
        } else {
            Err(anyhow!("{:?} is not a valid file", path))
        }
    }
}

impl FsExt for String {}

impl FsExt for &str {}

impl FsExt for PathBuf {}
