//! Layered configuration for the ament tool.
//!
//! Settings are read from `ament.toml` files and merged in this order, later
//! layers winning:
//! 1. built-in defaults
//! 2. the user file (`<config dir>/ament/ament.toml`)
//! 3. the project file (`<basepath>/ament.toml`)
//! 4. environment variables (`AMENT_BUILD_SPACE`, `AMENT_INSTALL_SPACE`)
//! 5. command-line flags (`--build-space`, `--install-space`)
//!
//! # Configuration File Format
//!
//! ```toml
//! [spaces]
//! build = "build"
//! install = "install"
//!
//! [discovery]
//! ignore_markers = ["AMENT_IGNORE", "COLCON_IGNORE"]
//! skip_hidden = true
//!
//! [build]
//! default_build_type = "ament_cmake"
//! ```
//!
//! Files are merged table by table, so a project file only needs the keys it
//! changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::helper::determine_path_argument;

/// Name of the configuration file in a base path or the user config dir.
pub const CONFIG_FILE: &str = "ament.toml";

pub const BUILD_SPACE_ENV: &str = "AMENT_BUILD_SPACE";
pub const INSTALL_SPACE_ENV: &str = "AMENT_INSTALL_SPACE";

/// Default locations of the build and install spaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpacesSection {
    /// Build space, relative to the base path
    #[serde(default = "default_build_space")]
    pub build: String,
    /// Install space, relative to the base path
    #[serde(default = "default_install_space")]
    pub install: String,
}

fn default_build_space() -> String {
    "build".to_string()
}

fn default_install_space() -> String {
    "install".to_string()
}

impl Default for SpacesSection {
    fn default() -> Self {
        Self {
            build: default_build_space(),
            install: default_install_space(),
        }
    }
}

/// Package crawl settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySection {
    /// Marker files that exclude a directory (and everything below it)
    #[serde(default = "default_ignore_markers")]
    pub ignore_markers: Vec<String>,
    /// Whether to skip directories whose name starts with a dot
    #[serde(default = "default_skip_hidden")]
    pub skip_hidden: bool,
}

fn default_ignore_markers() -> Vec<String> {
    vec!["AMENT_IGNORE".to_string(), "COLCON_IGNORE".to_string()]
}

fn default_skip_hidden() -> bool {
    true
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            ignore_markers: default_ignore_markers(),
            skip_hidden: default_skip_hidden(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    /// Build type of manifest packages that do not export one
    #[serde(default = "default_build_type")]
    pub default_build_type: String,
}

fn default_build_type() -> String {
    "ament_cmake".to_string()
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            default_build_type: default_build_type(),
        }
    }
}

/// The complete ament.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmentToml {
    #[serde(default)]
    pub spaces: SpacesSection,
    #[serde(default)]
    pub discovery: DiscoverySection,
    #[serde(default)]
    pub build: BuildSection,
}

impl AmentToml {
    /// Load configuration from a single TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let table = read_table(path)?;
        table.try_into().map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Merge the given files in order, skipping any that do not exist.
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut merged = toml::Table::new();
        let mut last = PathBuf::from(CONFIG_FILE);
        for path in paths.iter().filter(|p| p.is_file()) {
            tracing::debug!(path = %path.display(), "loading config layer");
            merge_tables(&mut merged, read_table(path)?);
            last = path.clone();
        }
        merged.try_into().map_err(|source| ConfigError::Parse { path: last, source })
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self, known_build_types: &[&str]) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.spaces.build.trim().is_empty() {
            warnings.push("Empty [spaces] build: the base path itself would be used".to_string());
        }
        if self.spaces.install.trim().is_empty() {
            warnings.push("Empty [spaces] install: the base path itself would be used".to_string());
        }
        if !known_build_types.contains(&self.build.default_build_type.as_str()) {
            warnings.push(format!(
                "Unknown default_build_type '{}'. Valid values: {}",
                self.build.default_build_type,
                known_build_types.join(", ")
            ));
        }

        warnings
    }
}

fn read_table(path: &Path) -> Result<toml::Table, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Deep-merge `overlay` into `base`; nested tables merge, everything else is replaced.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// The user-level config file, if the platform has a config directory.
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ament").join(CONFIG_FILE))
}

/// Space overrides taken from the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub build_space: Option<String>,
    pub install_space: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            build_space: std::env::var(BUILD_SPACE_ENV).ok().filter(|v| !v.is_empty()),
            install_space: std::env::var(INSTALL_SPACE_ENV).ok().filter(|v| !v.is_empty()),
        }
    }
}

/// Effective configuration for one invocation.
///
/// Combines the merged TOML layers with environment and CLI overrides and
/// resolves the build/install spaces against the base path.
#[derive(Debug, Clone)]
pub struct AmentConfig {
    /// Directory packages are crawled from and spaces default into
    pub base_path: PathBuf,
    /// Directory explicit path flags are relative to
    pub cwd: PathBuf,
    pub toml: AmentToml,
    pub env: EnvOverrides,
    pub cli_build_space: Option<PathBuf>,
    pub cli_install_space: Option<PathBuf>,
}

impl AmentConfig {
    /// Load the user and project files plus environment overrides.
    pub fn load(base_path: &Path, cwd: &Path) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        if let Some(user) = user_config_file() {
            layers.push(user);
        }
        layers.push(base_path.join(CONFIG_FILE));
        let toml = AmentToml::load_layers(&layers)?;
        Ok(Self::from_parts(base_path, cwd, toml, EnvOverrides::from_env()))
    }

    pub fn from_parts(base_path: &Path, cwd: &Path, toml: AmentToml, env: EnvOverrides) -> Self {
        Self {
            base_path: base_path.to_path_buf(),
            cwd: cwd.to_path_buf(),
            toml,
            env,
            cli_build_space: None,
            cli_install_space: None,
        }
    }

    /// Apply `--build-space` / `--install-space`.
    pub fn with_cli_args(mut self, build_space: Option<PathBuf>, install_space: Option<PathBuf>) -> Self {
        self.cli_build_space = build_space;
        self.cli_install_space = install_space;
        self
    }

    /// Build space (CLI → env → file → default).
    pub fn build_space(&self) -> PathBuf {
        let default = self.env.build_space.as_deref().unwrap_or(&self.toml.spaces.build);
        determine_path_argument(
            &self.cwd,
            &self.base_path,
            self.cli_build_space.as_deref(),
            Path::new(default),
        )
    }

    /// Install space (CLI → env → file → default).
    pub fn install_space(&self) -> PathBuf {
        let default = self
            .env
            .install_space
            .as_deref()
            .unwrap_or(&self.toml.spaces.install);
        determine_path_argument(
            &self.cwd,
            &self.base_path,
            self.cli_install_space.as_deref(),
            Path::new(default),
        )
    }

    pub fn default_build_type(&self) -> &str {
        &self.toml.build.default_build_type
    }

    pub fn discovery(&self) -> &DiscoverySection {
        &self.toml.discovery
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const KNOWN: &[&str] = &["ament_cmake", "ament_python", "cmake"];

    #[test]
    fn test_defaults() {
        let toml = AmentToml::default();
        assert_eq!(toml.spaces.build, "build");
        assert_eq!(toml.spaces.install, "install");
        assert_eq!(toml.discovery.ignore_markers, vec!["AMENT_IGNORE", "COLCON_IGNORE"]);
        assert!(toml.discovery.skip_hidden);
        assert_eq!(toml.build.default_build_type, "ament_cmake");
        assert!(toml.validate(KNOWN).is_empty());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[spaces]\nbuild = \"_build\"\n").unwrap();

        let toml = AmentToml::load(&path).unwrap();
        assert_eq!(toml.spaces.build, "_build");
        assert_eq!(toml.spaces.install, "install");
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[spaces\nbuild = ").unwrap();

        let err = AmentToml::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_later_layers_win_per_key() {
        let dir = tempdir().unwrap();
        let user = dir.path().join("user.toml");
        let project = dir.path().join("project.toml");
        std::fs::write(
            &user,
            "[spaces]\nbuild = \"user_build\"\ninstall = \"user_install\"\n[build]\ndefault_build_type = \"cmake\"\n",
        )
        .unwrap();
        std::fs::write(&project, "[spaces]\nbuild = \"proj_build\"\n").unwrap();

        let toml = AmentToml::load_layers(&[user, project, dir.path().join("missing.toml")]).unwrap();
        assert_eq!(toml.spaces.build, "proj_build");
        assert_eq!(toml.spaces.install, "user_install");
        assert_eq!(toml.build.default_build_type, "cmake");
    }

    #[test]
    fn test_validate_unknown_build_type() {
        let mut toml = AmentToml::default();
        toml.build.default_build_type = "meson".to_string();
        let warnings = toml.validate(KNOWN);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("meson"));
    }

    #[test]
    fn test_spaces_default_relative_to_base_path() {
        let config = AmentConfig::from_parts(
            Path::new("/proj"),
            Path::new("/work"),
            AmentToml::default(),
            EnvOverrides::default(),
        );
        assert_eq!(config.build_space(), PathBuf::from("/proj/build"));
        assert_eq!(config.install_space(), PathBuf::from("/proj/install"));
    }

    #[test]
    fn test_env_overrides_file_but_stays_base_relative() {
        let env = EnvOverrides {
            build_space: Some("env_build".into()),
            install_space: None,
        };
        let config =
            AmentConfig::from_parts(Path::new("/proj"), Path::new("/work"), AmentToml::default(), env);
        assert_eq!(config.build_space(), PathBuf::from("/proj/env_build"));
    }

    #[test]
    fn test_cli_overrides_env_and_is_cwd_relative() {
        let env = EnvOverrides {
            build_space: Some("env_build".into()),
            install_space: Some("env_install".into()),
        };
        let config =
            AmentConfig::from_parts(Path::new("/proj"), Path::new("/work"), AmentToml::default(), env)
                .with_cli_args(Some(PathBuf::from("out")), Some(PathBuf::from("/abs/install")));
        assert_eq!(config.build_space(), PathBuf::from("/work/out"));
        assert_eq!(config.install_space(), PathBuf::from("/abs/install"));
    }
}
