//! Process start-up.
//!
//! [`Registries::bootstrap`] checks start-up preconditions and then builds
//! the three component registries. The resulting value is immutable and is
//! handed by reference to the dispatcher and from there to every verb.

use tracing::debug;

use crate::build_types::{self, BuildType};
use crate::errors::{BootstrapError, RegistryError};
use crate::package_types::{PackageTypeEntryPointData, get_package_types};
use crate::registry::{GroupRegistry, NamedRegistry};
use crate::verbs::{self, VerbEntryPointData};

/// Group name the verb registry serves.
pub const VERB_GROUP: &str = "ament.verbs";

/// Verbs in the order they are listed.
pub const VERBS: &[&str] = &[
    "build",
    "build_pkg",
    "list_dependencies",
    "list_packages",
    "package_name",
    "package_version",
    "test",
    "test_pkg",
    "test_results",
    "uninstall",
    "uninstall_pkg",
];

/// Build type name to the backend symbol its module exports.
pub const KNOWN_BUILD_TYPES: &[(&str, &str)] = &[
    ("ament_cmake", "AmentCmakeBuildType"),
    ("ament_python", "AmentPythonBuildType"),
    ("cmake", "CmakeBuildType"),
];

const VERB_REGISTRY: GroupRegistry<VerbEntryPointData> = GroupRegistry::new(
    "verb",
    VERB_GROUP,
    verbs::PACKAGE,
    verbs::ENTRY_POINT_SYMBOL,
    VERBS,
    verbs::MODULES,
);

const BUILD_TYPE_REGISTRY: NamedRegistry<Box<dyn BuildType>> = NamedRegistry::new(
    "build type",
    build_types::PACKAGE,
    KNOWN_BUILD_TYPES,
    build_types::MODULES,
);

/// The component registries for the lifetime of the process.
pub struct Registries {
    pub verbs: GroupRegistry<VerbEntryPointData>,
    pub build_types: NamedRegistry<Box<dyn BuildType>>,
    /// Tried in order; there is no lookup by name.
    pub package_types: Vec<PackageTypeEntryPointData>,
}

impl Registries {
    /// Check preconditions, then build the registries.
    ///
    /// Nothing is constructed when a precondition fails.
    pub fn bootstrap() -> Result<Self, BootstrapError> {
        preflight(&VERB_REGISTRY, &BUILD_TYPE_REGISTRY)?;
        let registries = Self {
            verbs: VERB_REGISTRY,
            build_types: BUILD_TYPE_REGISTRY,
            package_types: get_package_types(),
        };
        debug!(
            verbs = VERBS.len(),
            build_types = KNOWN_BUILD_TYPES.len(),
            package_types = registries.package_types.len(),
            "registries ready"
        );
        Ok(registries)
    }

    /// Verb names of the served group.
    pub fn verb_names(&self) -> Result<Vec<&'static str>, RegistryError> {
        self.verbs.list_components(VERB_GROUP)
    }

    pub fn load_verb_description(&self, name: &str) -> Result<VerbEntryPointData, RegistryError> {
        self.verbs.load_description(name, VERB_GROUP)
    }

    /// Load the backend for one build type by name.
    pub fn get_class_for_build_type(&self, name: &str) -> Result<Box<dyn BuildType>, RegistryError> {
        self.build_types.load(name)
    }
}

fn preflight(
    verbs: &GroupRegistry<VerbEntryPointData>,
    build_types: &NamedRegistry<Box<dyn BuildType>>,
) -> Result<(), BootstrapError> {
    if let Err(err) = std::env::current_dir() {
        return Err(BootstrapError::Precondition {
            message: format!("The current working directory is not accessible: {}", err),
            hint: "Change into an existing directory and run the command again.".to_string(),
        });
    }

    let unlinked = verbs.unlinked();
    if !unlinked.is_empty() {
        return Err(BootstrapError::Precondition {
            message: format!("Verbs without a linked implementation: {}", unlinked.join(", ")),
            hint: "Every name in VERBS needs a matching entry in verbs::MODULES.".to_string(),
        });
    }

    let unlinked = build_types.unlinked();
    if !unlinked.is_empty() {
        return Err(BootstrapError::Precondition {
            message: format!(
                "Build types without a linked implementation: {}",
                unlinked.join(", ")
            ),
            hint: "Every name in KNOWN_BUILD_TYPES needs a matching entry in build_types::MODULES."
                .to_string(),
        });
    }
    Ok(())
}
