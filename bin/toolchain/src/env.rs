use config::Environment;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where to read dotenv variables from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFile {
    /// `.env` in the working directory, skipped when absent
    Default,
    /// Explicit file, must exist
    Path(PathBuf),
    /// Only the process environment
    Disabled,
}

impl EnvFile {
    pub const DEFAULT_PATH: &'static str = ".env";
}

/// Snapshot the process environment with `env_file` layered underneath it.
pub fn load_environment(env_file: &EnvFile) -> eyre::Result<Environment> {
    layer_env_file(Environment::from_process(), env_file)
}

/// Layer `env_file` under an existing snapshot.
///
/// Values already in `base` win. The process environment itself is never
/// modified.
pub fn layer_env_file(base: Environment, env_file: &EnvFile) -> eyre::Result<Environment> {
    match env_file {
        EnvFile::Disabled => Ok(base),
        EnvFile::Path(path) => {
            let vars = read_env_file(path)?;
            Ok(base.merge_under(vars))
        }
        EnvFile::Default => layer_default_env_file(base, Path::new(".")),
    }
}

/// Layer `dir/.env` under an existing snapshot, if that file exists.
pub fn layer_default_env_file(base: Environment, dir: &Path) -> eyre::Result<Environment> {
    let path = dir.join(EnvFile::DEFAULT_PATH);
    if !path.exists() {
        debug!(path = %path.display(), "No env file found");
        return Ok(base);
    }

    let vars = read_env_file(&path)?;
    Ok(base.merge_under(vars))
}

fn read_env_file(path: &Path) -> eyre::Result<Vec<(String, String)>> {
    let vars = dotenvy::from_path_iter(path)
        .map_err(|e| eyre::eyre!("Failed to open env file {}: {}", path.display(), e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| eyre::eyre!("Failed to parse env file {}: {}", path.display(), e))?;

    // names only, values may be secrets
    info!(path = %path.display(), count = vars.len(), "Loaded env file");

    Ok(vars)
}
