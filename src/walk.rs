use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::errors::{SoundpackError, SoundpackResult};
use crate::utils::config::WalkerConfig;

/// A regular file found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative: PathBuf,
}

impl FileEntry {
    /// Relative path as `/`-separated UTF-8 segments.
    pub fn segments(&self) -> SoundpackResult<Vec<&str>> {
        self.relative
            .components()
            .map(|c| {
                c.as_os_str()
                    .to_str()
                    .ok_or_else(|| SoundpackError::NonUtf8Path(self.path.clone()))
            })
            .collect()
    }
}

/// Walk `root` sequentially and collect every regular file, in file-name
/// order per directory. Unreadable entries are logged and skipped; a missing
/// root yields nothing.
pub fn collect_files(root: &Path, cfg: &WalkerConfig) -> Vec<FileEntry> {
    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(!cfg.scan_hidden_files)
        .git_ignore(cfg.read_vcsignore)
        .git_exclude(cfg.read_vcsignore)
        .ignore(cfg.read_vcsignore)
        .follow_links(cfg.follow_symlinks)
        .max_depth(cfg.max_depth)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(e) if e.file_type().map(|ft| ft.is_file()).unwrap_or(false) => e,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!("skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };

        let path = entry.into_path();
        let relative = match path.strip_prefix(root) {
            Ok(r) => r.to_path_buf(),
            Err(_) => continue,
        };
        tracing::debug!("found {}", relative.display());
        files.push(FileEntry { path, relative });
    }

    files
}
