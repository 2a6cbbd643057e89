use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// An override file together with where it was read from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub file: ConfigFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }),
            None => Err(ConfigError::MissingExtension),
        }
    }

    fn decode(self, path: &Path, content: &str) -> Result<ConfigFile, ConfigError> {
        let path = path.to_path_buf();
        match self {
            Self::Toml => {
                toml::from_str(content).map_err(|source| ConfigError::ParseToml { path, source })
            }
            Self::Json => serde_json::from_str(content)
                .map_err(|source| ConfigError::ParseJson { path, source }),
        }
    }
}

/// Loads `explicit` when given, otherwise the first of `candidates` that
/// exists. `Ok(None)` means the built-in campaign runs unchanged.
///
/// # Errors
///
/// Returns an error when the chosen file cannot be read or parsed.
pub fn load_config(
    explicit: Option<&Path>,
    candidates: &[&str],
) -> AppResult<Option<LoadedConfig>> {
    let chosen = explicit.map(Path::to_path_buf).or_else(|| {
        candidates
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.is_file())
    });

    let Some(path) = chosen else {
        tracing::debug!("No override file found, using built-in campaign");
        return Ok(None);
    };
    tracing::debug!("Using config file {}", path.display());
    let file = load_config_file(&path)?;
    Ok(Some(LoadedConfig { path, file }))
}

/// Reads and decodes one override file. The extension picks the format and
/// is checked before the file is opened.
///
/// # Errors
///
/// Returns an error when the extension is not `.toml`/`.json`, the file
/// cannot be read, or the contents do not decode.
pub fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let format = ConfigFormat::of(path).map_err(AppError::config)?;
    let content = std::fs::read_to_string(path).map_err(|source| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })
    })?;
    format.decode(path, &content).map_err(AppError::config)
}
