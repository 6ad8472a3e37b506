use crate::errors::{SoundpackError, SoundpackResult};
use crate::utils::config::{Config, DEFAULT_ROOT, OnConflict};
use crate::utils::ext::{strip_exact, validate_extension};
use crate::walk::collect_files;
use console::style;
use std::fs;
use std::path::{Path, PathBuf};

/// What a normalizer pass did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub renamed: Vec<(PathBuf, PathBuf)>,
    pub skipped: Vec<PathBuf>,
}

/// Entry point called by the CLI.
pub fn handle(path: Option<String>, config: &Config) -> SoundpackResult<()> {
    let root = path
        .or_else(|| config.normalizer.root.clone())
        .unwrap_or_else(|| DEFAULT_ROOT.into());

    let summary = normalize_tree(
        Path::new(&root),
        &config.normalizer.target_extension,
        config.normalizer.on_conflict,
        config,
    )?;

    println!(
        "{} {} file(s) under {}",
        style("Renamed").green().bold(),
        summary.renamed.len(),
        style(&root).underlined()
    );
    if !summary.skipped.is_empty() {
        println!(
            "{} {} file(s) whose lowercase name already existed",
            style("Skipped").yellow().bold(),
            summary.skipped.len()
        );
    }
    Ok(())
}

/// Rename every `*<target>` file under `root` to `*<target lowercased>`.
///
/// Candidates are collected before the first rename. Matching is exact and
/// case-sensitive; `.ogg` and `.Ogg` are left alone when the target is `.OGG`.
pub fn normalize_tree(
    root: &Path,
    target: &str,
    on_conflict: OnConflict,
    config: &Config,
) -> SoundpackResult<NormalizeSummary> {
    validate_extension(target)?;
    let lower = target.to_lowercase();
    let mut summary = NormalizeSummary::default();

    if lower == target {
        tracing::warn!("target extension ‘{target}’ is already lowercase; nothing to rename");
        return Ok(summary);
    }

    let candidates: Vec<(PathBuf, PathBuf)> = collect_files(root, &config.walker)
        .into_iter()
        .filter_map(|f| {
            let stem = strip_exact(&f.path, target)?;
            let to = f.path.with_file_name(format!("{stem}{lower}"));
            Some((f.path, to))
        })
        .collect();

    tracing::debug!("{} file(s) to rename under {}", candidates.len(), root.display());

    for (from, to) in candidates {
        if is_collision(&from, &to)? {
            match on_conflict {
                OnConflict::Error => {
                    return Err(SoundpackError::RenameCollision { from, to });
                }
                OnConflict::Skip => {
                    tracing::warn!("{} exists, leaving {} as is", to.display(), from.display());
                    summary.skipped.push(from);
                    continue;
                }
                OnConflict::Overwrite => {
                    tracing::debug!("replacing {}", to.display());
                }
            }
        }

        fs::rename(&from, &to)?;
        println!("Renamed: {} -> {}", from.display(), to.display());
        summary.renamed.push((from, to));
    }

    Ok(summary)
}

/// `to` exists and is a different file from `from`. On case-insensitive
/// filesystems `drop.ogg` can name the same file as `drop.OGG`; that is a
/// plain case change, not a collision.
pub fn is_collision(from: &Path, to: &Path) -> SoundpackResult<bool> {
    if !to.exists() {
        return Ok(false);
    }
    Ok(!same_file::is_same_file(from, to)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, body: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn run(root: &Path, policy: OnConflict) -> SoundpackResult<NormalizeSummary> {
        normalize_tree(root, ".OGG", policy, &Config::default())
    }

    #[test]
    fn renames_uppercase_extension_only() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(root, "games/tetris/drop.OGG", b"drop");
        write(root, "games/tetris/rotate.OGG", b"rotate");
        write(root, "games/snake/eat.ogg", b"eat");
        write(root, "games/snake/turn.Ogg", b"turn");
        write(root, "games/snake/cover.PNG", b"png");

        let summary = run(root, OnConflict::Error).unwrap();

        assert_eq!(summary.renamed.len(), 2);
        assert!(summary.skipped.is_empty());
        assert_eq!(fs::read(root.join("games/tetris/drop.ogg")).unwrap(), b"drop");
        assert_eq!(fs::read(root.join("games/tetris/rotate.ogg")).unwrap(), b"rotate");
        assert!(!root.join("games/tetris/drop.OGG").exists());
        assert!(!root.join("games/tetris/rotate.OGG").exists());

        assert_eq!(fs::read(root.join("games/snake/eat.ogg")).unwrap(), b"eat");
        assert_eq!(fs::read(root.join("games/snake/turn.Ogg")).unwrap(), b"turn");
        assert_eq!(fs::read(root.join("games/snake/cover.PNG")).unwrap(), b"png");
    }

    #[test]
    fn collision_is_fatal_by_default() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(root, "games/tetris/drop.ogg", b"lower");
        write(root, "games/tetris/drop.OGG", b"upper");

        let err = run(root, OnConflict::Error).unwrap_err();

        match err {
            SoundpackError::RenameCollision { from, to } => {
                assert_eq!(from, root.join("games/tetris/drop.OGG"));
                assert_eq!(to, root.join("games/tetris/drop.ogg"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fs::read(root.join("games/tetris/drop.ogg")).unwrap(), b"lower");
        assert_eq!(fs::read(root.join("games/tetris/drop.OGG")).unwrap(), b"upper");
    }

    #[test]
    fn collision_can_be_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(root, "a/drop.ogg", b"lower");
        write(root, "a/drop.OGG", b"upper");
        write(root, "b/zap.OGG", b"zap");

        let summary = run(root, OnConflict::Skip).unwrap();

        assert_eq!(summary.skipped, vec![root.join("a/drop.OGG")]);
        assert_eq!(summary.renamed, vec![(root.join("b/zap.OGG"), root.join("b/zap.ogg"))]);
        assert_eq!(fs::read(root.join("a/drop.ogg")).unwrap(), b"lower");
        assert!(root.join("a/drop.OGG").exists());
    }

    #[test]
    fn collision_can_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(root, "drop.ogg", b"lower");
        write(root, "drop.OGG", b"upper");

        let summary = run(root, OnConflict::Overwrite).unwrap();

        assert_eq!(summary.renamed.len(), 1);
        assert_eq!(fs::read(root.join("drop.ogg")).unwrap(), b"upper");
        assert!(!root.join("drop.OGG").exists());
    }

    #[test]
    fn is_collision_ignores_other_names_for_the_same_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(root, "drop.OGG", b"upper");
        fs::hard_link(root.join("drop.OGG"), root.join("drop.ogg")).unwrap();
        write(root, "zap.OGG", b"zap");
        write(root, "zap.ogg", b"other");

        assert!(!is_collision(&root.join("drop.OGG"), &root.join("drop.ogg")).unwrap());
        assert!(is_collision(&root.join("zap.OGG"), &root.join("zap.ogg")).unwrap());
        assert!(!is_collision(&root.join("zap.OGG"), &root.join("absent.ogg")).unwrap());
    }

    #[test]
    fn same_file_target_is_renamed_not_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write(root, "games/drop.OGG", b"upper");
        fs::hard_link(root.join("games/drop.OGG"), root.join("games/drop.ogg")).unwrap();

        let summary = run(root, OnConflict::Error).unwrap();

        assert_eq!(
            summary.renamed,
            vec![(root.join("games/drop.OGG"), root.join("games/drop.ogg"))]
        );
        assert!(summary.skipped.is_empty());
        assert_eq!(fs::read(root.join("games/drop.ogg")).unwrap(), b"upper");
    }

    #[test]
    fn missing_root_renames_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let summary = run(&tmp.path().join("absent"), OnConflict::Error).unwrap();
        assert_eq!(summary, NormalizeSummary::default());
    }

    #[test]
    fn other_target_extensions_work() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "blip.WAV", b"w");
        write(tmp.path(), "blip.OGG", b"o");

        let summary =
            normalize_tree(tmp.path(), ".WAV", OnConflict::Error, &Config::default()).unwrap();

        assert_eq!(summary.renamed.len(), 1);
        assert!(tmp.path().join("blip.wav").exists());
        assert!(tmp.path().join("blip.OGG").exists());
    }

    #[test]
    fn invalid_target_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = normalize_tree(tmp.path(), "OGG", OnConflict::Error, &Config::default());
        assert!(matches!(err, Err(SoundpackError::InvalidExtension(_))));
    }
}
