use crate::errors::{SoundpackError, SoundpackResult};
use std::path::Path;

/// Ensure an extension is written with its leading dot (".ogg") and is not just the dot.
pub fn validate_extension(ext: &str) -> SoundpackResult<()> {
    if ext.len() > 1 && ext.starts_with('.') && !ext.chars().any(char::is_whitespace) {
        Ok(())
    } else {
        Err(SoundpackError::InvalidExtension(ext.to_owned()))
    }
}

/// Case-sensitive suffix match used by the normalizer. Returns the file name
/// with `target` stripped.
pub fn strip_exact<'a>(path: &'a Path, target: &str) -> Option<&'a str> {
    let name = path.file_name()?.to_str()?;
    name.strip_suffix(target).filter(|stem| !stem.is_empty())
}

/// Case-insensitive match used by the manifest generator. Returns the
/// longest accepted extension that matched, so the caller knows how much to strip.
pub fn match_any_ignore_case<'e>(path: &Path, accepted: &'e [String]) -> Option<&'e str> {
    let name = path.file_name()?.to_str()?;
    accepted
        .iter()
        .map(String::as_str)
        .filter(|ext| ends_with_ignore_case(name, ext) && name.len() > ext.len())
        .max_by_key(|ext| ext.len())
}

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[test]
fn validate_extension_requires_leading_dot() {
    assert!(validate_extension(".ogg").is_ok());
    assert!(validate_extension(".OGG").is_ok());
    assert!(validate_extension(".tar.gz").is_ok());

    for bad in ["ogg", ".", "", ". ogg"] {
        assert!(
            matches!(validate_extension(bad), Err(SoundpackError::InvalidExtension(_))),
            "case: {bad:?}"
        );
    }
}

#[test]
fn strip_exact_is_case_sensitive() {
    let cases = [
        ("drop.OGG", Some("drop")),
        ("drop.ogg", None),
        ("drop.Ogg", None),
        ("a/b/line.clear.OGG", Some("line.clear")),
        (".OGG", None),
        ("README", None),
    ];

    for (file, expected) in cases {
        assert_eq!(strip_exact(Path::new(file), ".OGG"), expected, "case: {file}");
    }
}

#[test]
fn match_any_ignore_case_finds_accepted_extension() {
    let accepted = vec![".ogg".to_string(), ".wav".to_string()];
    let cases = [
        ("drop.ogg", Some(".ogg")),
        ("drop.OGG", Some(".ogg")),
        ("music/Theme.Wav", Some(".wav")),
        ("notes.txt", None),
        ("noext", None),
        (".ogg", None),
        ("drop.ogg.bak", None),
    ];

    for (file, expected) in cases {
        assert_eq!(
            match_any_ignore_case(Path::new(file), &accepted),
            expected,
            "case: {file}"
        );
    }
}

#[test]
fn match_any_ignore_case_prefers_longest_extension() {
    let accepted = vec![".gz".to_string(), ".tar.gz".to_string()];

    assert_eq!(match_any_ignore_case(Path::new("a.tar.gz"), &accepted), Some(".tar.gz"));
    assert_eq!(match_any_ignore_case(Path::new("A.TAR.GZ"), &accepted), Some(".tar.gz"));
    assert_eq!(match_any_ignore_case(Path::new("a.gz"), &accepted), Some(".gz"));
    assert_eq!(match_any_ignore_case(Path::new(".tar.gz"), &accepted), Some(".gz"));
}
