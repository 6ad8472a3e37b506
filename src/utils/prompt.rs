use crate::errors::{SoundpackError, SoundpackResult};
use crate::manifest::ManifestOptions;
use crate::utils::ext::validate_extension;
use console::style;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// `y`, `yes`, `true` and `1` mean yes; anything else falls back to `default`.
pub fn parse_bool(input: &str, default: bool) -> bool {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => true,
        _ => default,
    }
}

/// Whitespace separated extensions, each starting with '.'. Empty input keeps `default`.
pub fn parse_extensions(input: &str, default: &[String]) -> SoundpackResult<Vec<String>> {
    let tokens: Vec<String> = input.split_whitespace().map(str::to_owned).collect();
    if tokens.is_empty() {
        return Ok(default.to_vec());
    }
    for t in &tokens {
        validate_extension(t)?;
    }
    Ok(tokens)
}

/// Exactly one character. Empty input keeps `default`.
pub fn parse_delimiter(input: &str, default: char) -> SoundpackResult<char> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(default),
        (Some(c), None) => Ok(c),
        _ => Err(SoundpackError::InvalidDelimiter(input.to_owned())),
    }
}

/// Line-based question/answer over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question [default]: ` and read one trimmed line. EOF reads as empty.
    fn ask(&mut self, question: &str, default: &str) -> SoundpackResult<String> {
        write!(
            self.output,
            "{} {} ",
            style(question).bold(),
            style(format!("[{default}]:")).dim()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_owned())
    }

    pub fn text(&mut self, question: &str, default: &str) -> SoundpackResult<String> {
        let answer = self.ask(question, default)?;
        Ok(if answer.is_empty() { default.to_owned() } else { answer })
    }

    pub fn yes_no(&mut self, question: &str, default: bool) -> SoundpackResult<bool> {
        let shown = if default { "y" } else { "n" };
        Ok(parse_bool(&self.ask(question, shown)?, default))
    }

    pub fn extensions(&mut self, question: &str, default: &[String]) -> SoundpackResult<Vec<String>> {
        let answer = self.ask(question, &default.join(" "))?;
        parse_extensions(&answer, default)
    }

    pub fn delimiter(&mut self, question: &str, default: char) -> SoundpackResult<char> {
        let answer = self.ask(question, &default.to_string())?;
        parse_delimiter(&answer, default)
    }

    /// Ask for every manifest option, using `defaults` for anything left blank.
    pub fn manifest_options(&mut self, defaults: &ManifestOptions) -> SoundpackResult<ManifestOptions> {
        let root = self.text("Sound directory", &defaults.root.to_string_lossy())?;
        let output_file = self.text("Output file name", &defaults.output_file)?;
        let namespace = self.text("Namespace (mod id)", &defaults.namespace)?;
        let extensions = self.extensions("Accepted extensions", &defaults.extensions)?;
        let key_delimiter = self.delimiter("Key delimiter", defaults.key_delimiter)?;
        let overwrite = self.yes_no("Overwrite existing output?", defaults.overwrite)?;
        let verbose = self.yes_no("Verbose output?", defaults.verbose)?;

        Ok(ManifestOptions {
            root: PathBuf::from(root),
            output_file,
            namespace,
            extensions,
            key_delimiter,
            overwrite,
            verbose,
        })
    }
}
