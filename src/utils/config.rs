use crate::errors::SoundpackResult;
use console::style;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

static DEFAULT_CONFIG_TOML: &str = include_str!("../../default-soundpack.conf");

pub const DEFAULT_ROOT: &str = ".";
pub const DEFAULT_TARGET_EXTENSION: &str = ".OGG";
pub const DEFAULT_OUTPUT_FILE: &str = "sounds.json";
pub const DEFAULT_NAMESPACE: &str = "mymod";
pub const DEFAULT_EXTENSION: &str = ".ogg";
pub const DEFAULT_KEY_DELIMITER: char = '.';

/// Policy for a rename whose lowercase target already exists.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OnConflict {
    #[default]
    Error,
    Skip,
    Overwrite,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WalkerConfig {
    /// Whether to visit hidden files and directories.
    pub scan_hidden_files: bool,

    /// Whether to follow symlinks or not.
    pub follow_symlinks: bool,

    /// Whether to respect VCS ignore files (`.gitignore`, ..) or not.
    pub read_vcsignore: bool,

    /// Maximum directory depth below the root.
    pub max_depth: Option<usize>,
}
impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            scan_hidden_files: true,
            follow_symlinks: false,
            read_vcsignore: false,
            max_depth: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Directory to walk when none is given on the command line.
    pub root: Option<String>,

    /// Extension renamed to its lowercase form (case-sensitive match).
    pub target_extension: String,

    pub on_conflict: OnConflict,
}
impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            root: None,
            target_extension: DEFAULT_TARGET_EXTENSION.into(),
            on_conflict: OnConflict::Error,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ManifestConfig {
    /// Directory to scan when none is given on the command line.
    pub root: Option<String>,

    /// Output file name, relative to the scanned root.
    pub output_file: String,

    /// Namespace prefixed to every sound name.
    pub namespace: String,

    /// Accepted extensions, matched case-insensitively.
    pub extensions: Vec<String>,

    /// Joins path segments in sound keys.
    pub key_delimiter: char,

    pub overwrite: bool,
    pub verbose: bool,
}
impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            root: None,
            output_file: DEFAULT_OUTPUT_FILE.into(),
            namespace: DEFAULT_NAMESPACE.into(),
            extensions: vec![DEFAULT_EXTENSION.into()],
            key_delimiter: DEFAULT_KEY_DELIMITER,
            overwrite: false,
            verbose: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub walker: WalkerConfig,
    pub normalizer: NormalizerConfig,
    pub manifest: ManifestConfig,
}

impl Config {
    pub fn load(config_dir: &Path) -> SoundpackResult<Self> {
        let mut config = Config::default();
        create_example_config(config_dir)?;

        let user_config_path = config_dir.join("soundpack.local");
        if user_config_path.exists() {
            let user_config_content = fs::read_to_string(&user_config_path)?;
            let user_config: Config = toml::from_str(&user_config_content)?;

            config = merge_configs(config, user_config);

            println!(
                "{}: Loaded user config from: {}\n",
                style("note").green().bold(),
                style(user_config_path.display())
                    .underlined()
                    .white()
                    .bold()
            );
        } else {
            tracing::debug!(
                "no user config at {}, using defaults",
                user_config_path.display()
            );
        }

        Ok(config)
    }
}

fn create_example_config(config_dir: &Path) -> SoundpackResult<()> {
    let example_path = config_dir.join("soundpack.conf");
    if !example_path.exists() {
        fs::write(&example_path, DEFAULT_CONFIG_TOML)?;
        tracing::debug!("Example config created at: {}", example_path.display());
    }
    Ok(())
}

/// Merge user config into default config. Accepted extensions are unioned,
/// everything else is overridden.
fn merge_configs(mut default: Config, user: Config) -> Config {
    default.walker = user.walker;
    default.normalizer = user.normalizer;

    default.manifest.root = user.manifest.root;
    default.manifest.output_file = user.manifest.output_file;
    default.manifest.namespace = user.manifest.namespace;
    default.manifest.key_delimiter = user.manifest.key_delimiter;
    default.manifest.overwrite = user.manifest.overwrite;
    default.manifest.verbose = user.manifest.verbose;

    default
        .manifest
        .extensions
        .extend(user.manifest.extensions);
    default.manifest.extensions.sort_unstable();
    default.manifest.extensions.dedup();

    default
}

#[test]
fn merge_configs_unions_extensions() {
    let mut default_cfg = Config::default();
    default_cfg.manifest.extensions = vec![".ogg".into(), ".wav".into()];

    let mut user_cfg = Config::default();
    user_cfg.manifest.extensions = vec![".mp3".into(), ".ogg".into()];
    user_cfg.manifest.namespace = "geowaremod".into();

    let merged = merge_configs(default_cfg, user_cfg);

    assert_eq!(merged.manifest.extensions, vec![".mp3", ".ogg", ".wav"]);
    assert_eq!(merged.manifest.namespace, "geowaremod");
}

#[test]
fn default_config_file_parses_to_defaults() {
    let parsed: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
    let defaults = Config::default();

    assert_eq!(parsed.normalizer.target_extension, defaults.normalizer.target_extension);
    assert_eq!(parsed.normalizer.on_conflict, OnConflict::Error);
    assert_eq!(parsed.manifest.output_file, defaults.manifest.output_file);
    assert_eq!(parsed.manifest.extensions, defaults.manifest.extensions);
    assert_eq!(parsed.manifest.key_delimiter, '.');
    assert!(parsed.walker.scan_hidden_files);
}

#[test]
fn load_creates_example_and_reads_user_overrides() {
    let cfg_dir = tempfile::tempdir().unwrap();
    let cfg_path = cfg_dir.path();

    let user_toml = r#"
        [normalizer]
        target_extension = ".WAV"
        on_conflict = "skip"

        [manifest]
        namespace = "geowaremod"
        extensions = [".wav"]
        overwrite = true
    "#;
    fs::write(cfg_path.join("soundpack.local"), user_toml).unwrap();

    let cfg = Config::load(cfg_path).expect("Config::load should succeed");

    assert!(cfg_path.join("soundpack.conf").is_file());

    assert_eq!(cfg.normalizer.target_extension, ".WAV");
    assert_eq!(cfg.normalizer.on_conflict, OnConflict::Skip);
    assert_eq!(cfg.manifest.namespace, "geowaremod");
    assert!(cfg.manifest.overwrite);
    assert_eq!(cfg.manifest.extensions, vec![".ogg", ".wav"]);
    assert_eq!(cfg.manifest.output_file, DEFAULT_OUTPUT_FILE);
}

#[test]
fn load_without_user_config_uses_defaults() {
    let cfg_dir = tempfile::tempdir().unwrap();
    let cfg = Config::load(cfg_dir.path()).unwrap();

    assert_eq!(cfg.manifest.namespace, DEFAULT_NAMESPACE);
    assert_eq!(cfg.normalizer.on_conflict, OnConflict::Error);
    assert!(cfg.manifest.root.is_none());
}
