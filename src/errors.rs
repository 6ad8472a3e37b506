use std::path::PathBuf;
use thiserror::Error;

pub type SoundpackResult<T, E = SoundpackError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SoundpackError {
  #[error("directory not found: {}", .0.display())]
  DirectoryNotFound(PathBuf),

  #[error("not a directory: {}", .0.display())]
  NotADirectory(PathBuf),

  #[error("output already exists: {} (use --overwrite to replace it)", .0.display())]
  OutputExists(PathBuf),

  #[error("invalid extension ‘{0}’: extensions must start with '.'")]
  InvalidExtension(String),

  #[error("invalid namespace ‘{0}’")]
  InvalidNamespace(String),

  #[error("invalid key delimiter ‘{0}’: expected a single character")]
  InvalidDelimiter(String),

  #[error("cannot rename {} -> {}: target already exists", .from.display(), .to.display())]
  RenameCollision { from: PathBuf, to: PathBuf },

  #[error("path is not valid UTF-8: {}", .0.display())]
  NonUtf8Path(PathBuf),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("config error: {0}")]
  Toml(#[from] toml::de::Error),

  #[error("other: {0}")]
  Other(String),
}

impl SoundpackError {
  /// Errors raised while validating options, before anything on disk changes.
  pub fn is_configuration(&self) -> bool {
    matches!(
      self,
      SoundpackError::DirectoryNotFound(_)
        | SoundpackError::NotADirectory(_)
        | SoundpackError::OutputExists(_)
        | SoundpackError::InvalidExtension(_)
        | SoundpackError::InvalidNamespace(_)
        | SoundpackError::InvalidDelimiter(_)
    )
  }
}
