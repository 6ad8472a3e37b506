pub mod manifest;
pub mod normalize;

use crate::cli::Commands;
use crate::errors::SoundpackResult;
use crate::utils::config::Config;
use manifest::ManifestArgs;

pub fn handle_command(command: Commands, config: &mut Config) -> SoundpackResult<()> {
    match command {
        Commands::Normalize {
            path,
            extension,
            on_conflict,
        } => {
            if let Some(ext) = extension {
                config.normalizer.target_extension = ext
            };

            if let Some(policy) = on_conflict {
                config.normalizer.on_conflict = policy
            };

            normalize::handle(path, config)
        }
        Commands::Manifest {
            path,
            output,
            namespace,
            extensions,
            delimiter,
            overwrite,
            verbose,
            interactive,
        } => manifest::handle(
            ManifestArgs {
                path,
                output,
                namespace,
                extensions,
                delimiter,
                overwrite,
                verbose,
                interactive,
            },
            config,
        ),
    }
}
