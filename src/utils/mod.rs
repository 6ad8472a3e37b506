pub mod config;
pub mod ext;
pub mod prompt;

// Re-export commonly used items for convenience
pub use config::Config;
pub use prompt::Prompter;
