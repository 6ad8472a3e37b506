//! `sounds.json` model and generation.
//!
//! The document maps a logical sound key to the resources backing it:
//!
//! ```json
//! {
//!   "games.tetris.drop": {
//!     "sounds": [
//!       { "name": "mymod:games/tetris/drop" }
//!     ]
//!   }
//! }
//! ```

use bytesize::ByteSize;
use console::style;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{SoundpackError, SoundpackResult};
use crate::utils::config::{
    DEFAULT_EXTENSION, DEFAULT_KEY_DELIMITER, DEFAULT_NAMESPACE, DEFAULT_OUTPUT_FILE, DEFAULT_ROOT,
    ManifestConfig, WalkerConfig,
};
use crate::utils::ext::{match_any_ignore_case, validate_extension};
use crate::walk::{FileEntry, collect_files};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub sounds: Vec<SoundRef>,
}

/// Ordered key -> entry map, serialized in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(IndexMap<String, ManifestEntry>);

/// Everything a generator run needs, resolved from config, flags or prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOptions {
    pub root: PathBuf,
    pub output_file: String,
    pub namespace: String,
    pub extensions: Vec<String>,
    pub key_delimiter: char,
    pub overwrite: bool,
    pub verbose: bool,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            output_file: DEFAULT_OUTPUT_FILE.into(),
            namespace: DEFAULT_NAMESPACE.into(),
            extensions: vec![DEFAULT_EXTENSION.into()],
            key_delimiter: DEFAULT_KEY_DELIMITER,
            overwrite: false,
            verbose: false,
        }
    }
}

impl ManifestOptions {
    pub fn from_config(root: PathBuf, cfg: &ManifestConfig) -> Self {
        Self {
            root,
            output_file: cfg.output_file.clone(),
            namespace: cfg.namespace.clone(),
            extensions: cfg.extensions.clone(),
            key_delimiter: cfg.key_delimiter,
            overwrite: cfg.overwrite,
            verbose: cfg.verbose,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_file)
    }

    /// Checks run before the scan. Nothing on disk is touched.
    pub fn validate(&self) -> SoundpackResult<()> {
        if !self.root.exists() {
            return Err(SoundpackError::DirectoryNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(SoundpackError::NotADirectory(self.root.clone()));
        }
        for ext in &self.extensions {
            validate_extension(ext)?;
        }
        if self.namespace.trim().is_empty() || self.namespace.contains(':') {
            return Err(SoundpackError::InvalidNamespace(self.namespace.clone()));
        }
        let output = self.output_path();
        if output.exists() && !self.overwrite {
            return Err(SoundpackError::OutputExists(output));
        }
        Ok(())
    }
}

/// Result of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestReport {
    pub output_path: PathBuf,
    pub entries: usize,
    pub bytes: u64,
}

/// `games/tetris/drop` + '.' -> `games.tetris.drop`
pub fn logical_key(segments: &[&str], delimiter: char) -> String {
    segments.join(&delimiter.to_string())
}

/// `mymod` + `games/tetris/drop` -> `mymod:games/tetris/drop`
pub fn resource_name(namespace: &str, segments: &[&str]) -> String {
    format!("{namespace}:{}", segments.join("/"))
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert or replace `key`. A replaced key keeps its original position.
    /// Returns the previous entry, if any.
    pub fn insert(&mut self, key: String, name: String) -> Option<ManifestEntry> {
        self.0.insert(key, ManifestEntry { sounds: vec![SoundRef { name }] })
    }

    /// Build the manifest from walked files. Files whose extension is not
    /// accepted are ignored.
    pub fn build(files: &[FileEntry], opts: &ManifestOptions) -> SoundpackResult<Self> {
        let mut manifest = Manifest::default();

        for file in files {
            let Some(ext) = match_any_ignore_case(&file.path, &opts.extensions) else {
                tracing::debug!("ignoring {}", file.relative.display());
                continue;
            };

            let mut segments = file.segments()?;
            let Some(last) = segments.pop() else {
                continue;
            };
            segments.push(&last[..last.len() - ext.len()]);

            let key = logical_key(&segments, opts.key_delimiter);
            let name = resource_name(&opts.namespace, &segments);

            if opts.verbose {
                println!("  {} -> {}", style(&key).white().bold(), style(&name).dim());
            }
            if manifest.insert(key.clone(), name).is_some() {
                tracing::warn!(
                    "duplicate sound key ‘{key}’: {} replaces the earlier entry",
                    file.relative.display()
                );
            }
        }

        Ok(manifest)
    }

    /// Pretty JSON, two-space indent, non-ASCII left unescaped.
    pub fn to_json(&self) -> SoundpackResult<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    pub fn write(&self, path: &Path) -> SoundpackResult<u64> {
        let json = self.to_json()?;
        fs::write(path, &json)?;
        Ok(json.len() as u64)
    }
}

/// Validate, scan and write the manifest described by `opts`.
pub fn generate(opts: &ManifestOptions, walker: &WalkerConfig) -> SoundpackResult<ManifestReport> {
    opts.validate()?;
    let output_path = opts.output_path();

    tracing::debug!(
        "scanning {} for {:?} (namespace ‘{}’)",
        opts.root.display(),
        opts.extensions,
        opts.namespace
    );

    let files: Vec<FileEntry> = collect_files(&opts.root, walker)
        .into_iter()
        .filter(|f| f.path != output_path)
        .collect();

    let manifest = Manifest::build(&files, opts)?;

    if manifest.is_empty() {
        tracing::warn!("no matching sound files under {}", opts.root.display());
        println!(
            "{}: no files matching {} found in {}; writing an empty manifest",
            style("warning").yellow().bold(),
            opts.extensions.join(" "),
            style(opts.root.display()).underlined()
        );
    }

    let bytes = manifest.write(&output_path)?;

    Ok(ManifestReport {
        output_path,
        entries: manifest.len(),
        bytes,
    })
}

impl std::fmt::Display for ManifestReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} entries written to {} ({})",
            self.entries,
            self.output_path.display(),
            ByteSize::b(self.bytes)
        )
    }
}
