//! Configuration for trains (stored in ~/.config/trains/config.toml)
//!
//! ```toml
//! routes_file = "data/routes.txt"
//! input_file = "data/commands.txt"
//! verbose = true
//! format = "human"
//! ```
//!
//! Every key is optional. Command-line values take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, TrainsError};
use crate::format::OutputFormat;

const CONFIG_DIR: &str = "trains";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "TRAINS_CONFIG_DIR";

/// Path value that selects the console instead of a file
pub const CONSOLE: &str = "-";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Route table file
    pub routes_file: Option<PathBuf>,
    /// Command file; stdin when absent
    pub input_file: Option<PathBuf>,
    /// Result file; stdout when absent
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
    pub format: Option<OutputFormat>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub routes_file: Option<PathBuf>,
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
    pub format: Option<OutputFormat>,
}

impl AppConfig {
    /// Default config file location
    pub fn config_path() -> Result<PathBuf> {
        // Allow environment variable override for testing
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    TrainsError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load an explicitly requested config file; it must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TrainsError::UsageError(format!(
                "failed to read config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: AppConfig = toml::from_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the config from its default location; a missing file yields defaults
    pub fn load_default() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    /// Apply command-line values on top of this config
    pub fn merge(mut self, overrides: Overrides) -> Self {
        if overrides.routes_file.is_some() {
            self.routes_file = overrides.routes_file;
        }
        if overrides.input_file.is_some() {
            self.input_file = overrides.input_file;
        }
        if overrides.output_file.is_some() {
            self.output_file = overrides.output_file;
        }
        if overrides.format.is_some() {
            self.format = overrides.format;
        }
        self.verbose |= overrides.verbose;
        self
    }

    /// Route table path; required
    pub fn routes_path(&self) -> Result<&Path> {
        self.routes_file.as_deref().ok_or_else(|| {
            TrainsError::UsageError(
                "no route table given (pass a ROUTES file or set routes_file in config)"
                    .to_string(),
            )
        })
    }

    /// Command file, or `None` for stdin
    pub fn input_path(&self) -> Option<&Path> {
        file_or_console(self.input_file.as_deref())
    }

    /// Result file, or `None` for stdout
    pub fn output_path(&self) -> Option<&Path> {
        file_or_console(self.output_file.as_deref())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

fn file_or_console(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != CONSOLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.verbose);
        assert_eq!(config.output_format(), OutputFormat::Human);
        assert!(config.input_path().is_none());
        assert!(matches!(
            config.routes_path(),
            Err(TrainsError::UsageError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "routes_file = \"routes.txt\"\nverbose = true\nformat = \"json\"\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.routes_path().unwrap(), Path::new("routes.txt"));
        assert!(config.verbose);
        assert_eq!(config.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_load_missing_explicit_file_is_usage_error() {
        let dir = tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, TrainsError::UsageError(_)));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "routes = \"routes.txt\"\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, TrainsError::Toml(_)));
        assert_eq!(err.exit_code(), crate::error::ExitCode::Usage);
    }

    #[test]
    fn test_command_line_overrides_file() {
        let config = AppConfig {
            routes_file: Some("file-routes.txt".into()),
            input_file: Some("commands.txt".into()),
            output_file: None,
            verbose: false,
            format: Some(OutputFormat::Json),
        };
        let merged = config.merge(Overrides {
            routes_file: Some("cli-routes.txt".into()),
            input_file: None,
            output_file: Some("out.txt".into()),
            verbose: true,
            format: None,
        });

        assert_eq!(merged.routes_path().unwrap(), Path::new("cli-routes.txt"));
        assert_eq!(merged.input_path(), Some(Path::new("commands.txt")));
        assert_eq!(merged.output_path(), Some(Path::new("out.txt")));
        assert!(merged.verbose);
        assert_eq!(merged.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_dash_selects_console() {
        let config = AppConfig::default().merge(Overrides {
            input_file: Some(CONSOLE.into()),
            output_file: Some(CONSOLE.into()),
            ..Overrides::default()
        });
        assert!(config.input_path().is_none());
        assert!(config.output_path().is_none());
    }
}
