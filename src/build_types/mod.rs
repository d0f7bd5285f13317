//! Build-type backends.
//!
//! A build type knows how a package of its kind is configured, built, tested,
//! installed and uninstalled. Backends only *describe* those steps as command
//! lines; nothing here spawns a process.
//!
//! | Build type     | Entry point            | Module                    |
//! |----------------|------------------------|---------------------------|
//! | `ament_cmake`  | `AmentCmakeBuildType`  | `build_types::ament_cmake` |
//! | `ament_python` | `AmentPythonBuildType` | `build_types::ament_python` |
//! | `cmake`        | `CmakeBuildType`       | `build_types::cmake`      |
//!
//! Backends are reached through the build-type registry in
//! [`crate::bootstrap`], which loads only the one that is selected.

pub mod ament_cmake;
pub mod ament_python;
pub mod cmake;

use std::path::PathBuf;

use crate::registry::{LinkedModule, Symbol};

pub use ament_cmake::AmentCmakeBuildType;
pub use ament_python::AmentPythonBuildType;
pub use cmake::CmakeBuildType;

/// Module prefix under which backends are linked.
pub const PACKAGE: &str = "build_types";

/// Backends linked into this binary.
pub const MODULES: &[LinkedModule<Box<dyn BuildType>>] = &[
    LinkedModule {
        path: "build_types::ament_cmake",
        symbols: &[Symbol {
            name: "AmentCmakeBuildType",
            load: AmentCmakeBuildType::boxed,
        }],
    },
    LinkedModule {
        path: "build_types::ament_python",
        symbols: &[Symbol {
            name: "AmentPythonBuildType",
            load: AmentPythonBuildType::boxed,
        }],
    },
    LinkedModule {
        path: "build_types::cmake",
        symbols: &[Symbol {
            name: "CmakeBuildType",
            load: CmakeBuildType::boxed,
        }],
    },
];

/// What a verb asks a backend to do for one package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Build,
    Test,
    Install,
    Uninstall,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Build => write!(f, "build"),
            Action::Test => write!(f, "test"),
            Action::Install => write!(f, "install"),
            Action::Uninstall => write!(f, "uninstall"),
        }
    }
}

/// Locations and options for one package's job.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub package_name: String,
    pub source_space: PathBuf,
    /// Package-specific build directory (`<build space>/<package>`).
    pub build_space: PathBuf,
    pub install_space: PathBuf,
    /// Extra arguments passed to the configure step.
    pub configure_args: Vec<String>,
}

impl BuildContext {
    pub fn new(
        package_name: &str,
        source_space: PathBuf,
        build_space: PathBuf,
        install_space: PathBuf,
    ) -> Self {
        Self {
            package_name: package_name.to_string(),
            source_space,
            build_space,
            install_space,
            configure_args: Vec::new(),
        }
    }

    pub fn with_configure_args(mut self, args: Vec<String>) -> Self {
        self.configure_args = args;
        self
    }

    /// Directory test runners write result files into.
    pub fn test_results_dir(&self) -> PathBuf {
        self.build_space.join("test_results").join(&self.package_name)
    }
}

/// A build-system backend.
pub trait BuildType {
    /// Registry name, e.g. `cmake`.
    fn build_type(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Command lines that carry out `action`, in order.
    fn steps(&self, action: Action, ctx: &BuildContext) -> Vec<String>;
}
