//! # Rank File Location

use std::{
    env,
    io,
    path::{Path, PathBuf},
};

use directories_next::ProjectDirs;

use crate::errors::{BCError, BCResult};

/// Environment variable naming the rank-file directory.
pub const VOCAB_DIR_ENV_VAR: &str = "BYTECHIPPER_VOCAB_DIR";

/// Where the pretrained schemes look for their rank files.
///
/// Resolution Order:
/// 1. `vocab_dir`, if present.
/// 2. `env[$BYTECHIPPER_VOCAB_DIR]`, if set.
/// 3. the platform data directory (e.g. `~/.local/share/bytechipper`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenaiVocabConfig {
    /// An explicit rank-file directory.
    pub vocab_dir: Option<PathBuf>,
}

impl OpenaiVocabConfig {
    /// Use an explicit rank-file directory.
    pub fn with_vocab_dir<P: AsRef<Path>>(
        mut self,
        vocab_dir: P,
    ) -> Self {
        self.vocab_dir = Some(vocab_dir.as_ref().to_path_buf());
        self
    }

    /// The platform project directories.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "bytechipper", "bytechipper")
    }

    /// Resolve the rank-file directory.
    pub fn resolve_vocab_dir(&self) -> Option<PathBuf> {
        if let Some(path) = &self.vocab_dir {
            return Some(path.clone());
        }

        if let Ok(path) = env::var(VOCAB_DIR_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        let dir = Self::project_dirs().map(|pds| pds.data_dir().to_path_buf());
        log::warn!("${VOCAB_DIR_ENV_VAR} is not set; falling back to {dir:?}");
        dir
    }

    /// The path of a file in the rank-file directory.
    ///
    /// ## Returns
    /// An `Io` `NotFound` error if no directory can be resolved.
    pub fn file_path(
        &self,
        file_name: &str,
    ) -> BCResult<PathBuf> {
        let dir = self.resolve_vocab_dir().ok_or_else(|| {
            BCError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no vocabulary directory for {file_name:?}; set ${VOCAB_DIR_ENV_VAR}"),
            ))
        })?;
        Ok(dir.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_resolution_order() {
        let explicit = OpenaiVocabConfig::default().with_vocab_dir("/tmp/explicit");
        assert_eq!(
            explicit.file_path("r50k_base.tiktoken").unwrap(),
            PathBuf::from("/tmp/explicit/r50k_base.tiktoken")
        );

        let previous = env::var(VOCAB_DIR_ENV_VAR).ok();

        unsafe { env::set_var(VOCAB_DIR_ENV_VAR, "/tmp/from_env") };
        assert_eq!(
            OpenaiVocabConfig::default().resolve_vocab_dir(),
            Some(PathBuf::from("/tmp/from_env"))
        );
        assert_eq!(
            explicit.resolve_vocab_dir(),
            Some(PathBuf::from("/tmp/explicit"))
        );

        unsafe { env::remove_var(VOCAB_DIR_ENV_VAR) };
        assert_eq!(
            OpenaiVocabConfig::default().resolve_vocab_dir(),
            OpenaiVocabConfig::project_dirs().map(|pds| pds.data_dir().to_path_buf())
        );

        if let Some(previous) = previous {
            unsafe { env::set_var(VOCAB_DIR_ENV_VAR, previous) };
        }
    }
}
