//! Typed error hierarchy for the ament tool.
//!
//! One enum per concern:
//! - `PathError`: path-typed command-line arguments that fail validation
//! - `RegistryError`: verb / build-type discovery and loading failures
//! - `BootstrapError`: environment preconditions checked before startup
//! - `ConfigError`: `ament.toml` read and parse failures
//! - `ManifestError`: package manifest read failures and missing tags

use std::path::PathBuf;

use thiserror::Error;

/// A user-supplied path failed validation.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Path '{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("Path '{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Path '{}' does not contain a '{manifest}' file", path.display())]
    MissingManifest {
        path: PathBuf,
        manifest: &'static str,
    },
}

impl PathError {
    /// The offending path, whichever check it failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            PathError::NotFound { path }
            | PathError::NotADirectory { path }
            | PathError::MissingManifest { path, .. } => path,
        }
    }
}

/// Errors from component discovery and deferred loading.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unsupported component group '{group}' (this registry serves '{expected}')")]
    UnsupportedGroup {
        group: String,
        expected: &'static str,
    },

    #[error(
        "This tool does not support the {kind} '{name}'\nOnly the following {kind}s are supported: {}",
        valid.join(", ")
    )]
    UnknownComponent {
        kind: &'static str,
        name: String,
        valid: Vec<String>,
    },

    #[error("Failed to load component: no module '{module}' is linked into this binary")]
    ModuleNotFound { module: String },

    #[error("Failed to load component: module '{module}' has no symbol '{symbol}'")]
    SymbolNotFound { module: String, symbol: String },
}

impl RegistryError {
    /// Whether this is a deferred-load failure rather than a lookup failure.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            RegistryError::ModuleNotFound { .. } | RegistryError::SymbolNotFound { .. }
        )
    }
}

/// A startup precondition did not hold; nothing has been installed yet.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("{message}\n{hint}")]
    Precondition { message: String, hint: String },
}

/// Errors loading layered configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors reading a package manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest at {} has no <{tag}> tag", path.display())]
    MissingTag { path: PathBuf, tag: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_error_messages_name_the_path() {
        let err = PathError::NotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        assert_eq!(err.to_string(), "Path '/no/such/dir' does not exist");

        let err = PathError::NotADirectory {
            path: PathBuf::from("/etc/hosts"),
        };
        assert_eq!(err.to_string(), "Path '/etc/hosts' is not a directory");
        assert_eq!(err.path(), std::path::Path::new("/etc/hosts"));
    }

    #[test]
    fn missing_manifest_names_the_manifest_file() {
        let err = PathError::MissingManifest {
            path: PathBuf::from("/src/foo"),
            manifest: "package.xml",
        };
        assert_eq!(
            err.to_string(),
            "Path '/src/foo' does not contain a 'package.xml' file"
        );
    }

    #[test]
    fn unknown_component_lists_valid_names() {
        let err = RegistryError::UnknownComponent {
            kind: "build type",
            name: "meson".into(),
            valid: vec!["ament_cmake".into(), "ament_python".into(), "cmake".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'meson'"));
        assert!(msg.contains("ament_cmake, ament_python, cmake"));
        assert!(!err.is_load_error());
    }

    #[test]
    fn load_errors_are_classified() {
        let missing_module = RegistryError::ModuleNotFound {
            module: "build_types::meson".into(),
        };
        let missing_symbol = RegistryError::SymbolNotFound {
            module: "build_types::cmake".into(),
            symbol: "MesonBuildType".into(),
        };
        assert!(missing_module.is_load_error());
        assert!(missing_symbol.is_load_error());
        assert!(missing_symbol.to_string().contains("MesonBuildType"));
    }

    #[test]
    fn precondition_message_carries_hint() {
        let err = BootstrapError::Precondition {
            message: "verb 'build' is not linked".into(),
            hint: "Add its module to the verb link table".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("verb 'build' is not linked\n"));
        assert!(msg.ends_with("Add its module to the verb link table"));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_std_error(&PathError::NotFound {
            path: PathBuf::from("x"),
        });
        assert_std_error(&RegistryError::ModuleNotFound { module: "x".into() });
        assert_std_error(&BootstrapError::Precondition {
            message: "x".into(),
            hint: "y".into(),
        });
        assert_std_error(&ManifestError::MissingTag {
            path: PathBuf::from("x"),
            tag: "name",
        });
    }
}
