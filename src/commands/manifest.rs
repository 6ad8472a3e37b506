use crate::errors::SoundpackResult;
use crate::manifest::{ManifestOptions, generate};
use crate::utils::Prompter;
use crate::utils::config::{Config, DEFAULT_ROOT};
use console::style;
use std::io;
use std::path::PathBuf;

/// Flags given on the command line; anything unset falls back to the config.
#[derive(Debug, Default)]
pub struct ManifestArgs {
    pub path: Option<String>,
    pub output: Option<String>,
    pub namespace: Option<String>,
    pub extensions: Vec<String>,
    pub delimiter: Option<char>,
    pub overwrite: bool,
    pub verbose: bool,
    pub interactive: bool,
}

/// Entry point called by the CLI.
pub fn handle(args: ManifestArgs, config: &Config) -> SoundpackResult<()> {
    let interactive = args.interactive || (args.path.is_none() && config.manifest.root.is_none());
    let defaults = resolve_options(args, config);

    let opts = if interactive {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        prompter.manifest_options(&defaults)?
    } else {
        defaults
    };

    println!(
        "Scanning {} for {}",
        style(opts.root.display()).underlined(),
        opts.extensions.join(" ")
    );
    let report = generate(&opts, &config.walker)?;
    println!("{} {}", style("Manifest").green().bold(), report);
    Ok(())
}

/// Layer CLI flags over the `[manifest]` config section.
pub fn resolve_options(args: ManifestArgs, config: &Config) -> ManifestOptions {
    let cfg = &config.manifest;
    let root = args
        .path
        .or_else(|| cfg.root.clone())
        .unwrap_or_else(|| DEFAULT_ROOT.into());

    let mut opts = ManifestOptions::from_config(PathBuf::from(root), cfg);
    if let Some(output) = args.output {
        opts.output_file = output;
    }
    if let Some(namespace) = args.namespace {
        opts.namespace = namespace;
    }
    if !args.extensions.is_empty() {
        opts.extensions = args.extensions;
    }
    if let Some(delimiter) = args.delimiter {
        opts.key_delimiter = delimiter;
    }
    opts.overwrite |= args.overwrite;
    opts.verbose |= args.verbose;
    opts
}

#[test]
fn flags_override_config() {
    let mut config = Config::default();
    config.manifest.root = Some("from/config".into());
    config.manifest.namespace = "cfgmod".into();
    config.manifest.verbose = true;

    let opts = resolve_options(
        ManifestArgs {
            path: Some("from/cli".into()),
            namespace: Some("geowaremod".into()),
            extensions: vec![".wav".into()],
            delimiter: Some('/'),
            ..ManifestArgs::default()
        },
        &config,
    );

    assert_eq!(opts.root, PathBuf::from("from/cli"));
    assert_eq!(opts.namespace, "geowaremod");
    assert_eq!(opts.extensions, vec![".wav"]);
    assert_eq!(opts.key_delimiter, '/');
    assert_eq!(opts.output_file, "sounds.json");
    assert!(opts.verbose);
    assert!(!opts.overwrite);
}

#[test]
fn config_root_is_used_without_path() {
    let mut config = Config::default();
    config.manifest.root = Some("assets/sounds".into());

    let opts = resolve_options(ManifestArgs::default(), &config);

    assert_eq!(opts.root, PathBuf::from("assets/sounds"));
    assert_eq!(opts.extensions, vec![".ogg"]);
}
