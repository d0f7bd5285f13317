//! Verb implementations.
//!
//! Each verb module exports `entry_point_data()`, a [`VerbEntryPointData`]
//! describing its name, help text, argument setup and entry function. Verbs
//! are reached through the verb registry in [`crate::bootstrap`].
//!
//! | Verb                | Module                 |
//! |---------------------|------------------------|
//! | `build`             | workspace build + install |
//! | `build_pkg`         | single package build + install |
//! | `list_dependencies` | manifest dependencies  |
//! | `list_packages`     | package discovery      |
//! | `package_name`      | manifest `<name>`      |
//! | `package_version`   | manifest `<version>`   |
//! | `test` / `test_pkg` | test steps             |
//! | `test_results`      | result file summary    |
//! | `uninstall` / `uninstall_pkg` | uninstall steps |

pub mod build;
pub mod build_pkg;
pub mod jobs;
pub mod list_dependencies;
pub mod list_packages;
pub mod package_name;
pub mod package_version;
pub mod test;
pub mod test_pkg;
pub mod test_results;
pub mod uninstall;
pub mod uninstall_pkg;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::bootstrap::Registries;
use crate::registry::{LinkedModule, Symbol};

/// Module prefix under which verbs are linked.
pub const PACKAGE: &str = "verbs";

/// Symbol every verb module exports.
pub const ENTRY_POINT_SYMBOL: &str = "entry_point_data";

macro_rules! linked_verb {
    ($verb:ident) => {
        LinkedModule {
            path: concat!("verbs::", stringify!($verb)),
            symbols: &[Symbol {
                name: ENTRY_POINT_SYMBOL,
                load: $verb::entry_point_data,
            }],
        }
    };
}

/// Verbs linked into this binary.
pub const MODULES: &[LinkedModule<VerbEntryPointData>] = &[
    linked_verb!(build),
    linked_verb!(build_pkg),
    linked_verb!(list_dependencies),
    linked_verb!(list_packages),
    linked_verb!(package_name),
    linked_verb!(package_version),
    linked_verb!(test),
    linked_verb!(test_pkg),
    linked_verb!(test_results),
    linked_verb!(uninstall),
    linked_verb!(uninstall_pkg),
];

/// Descriptor a verb module exports.
#[derive(Clone, Copy)]
pub struct VerbEntryPointData {
    pub verb: &'static str,
    pub description: &'static str,
    /// Add the verb's arguments to its subcommand.
    pub prepare_arguments: fn(Command, &Registries) -> Command,
    /// Run the verb; the returned value is the process exit code.
    pub main: fn(&ArgMatches, &VerbContext<'_>) -> Result<i32>,
}

impl std::fmt::Debug for VerbEntryPointData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerbEntryPointData")
            .field("verb", &self.verb)
            .field("description", &self.description)
            .finish()
    }
}

/// Everything a running verb may consult.
pub struct VerbContext<'a> {
    pub registries: &'a Registries,
    /// Directory explicit path arguments are relative to
    pub cwd: PathBuf,
}

/// `--build-space` and `--install-space`.
pub(crate) fn space_arguments(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("build_space")
            .long("build-space")
            .value_name("PATH")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Build space (default: <basepath>/build)"),
    )
    .arg(
        Arg::new("install_space")
            .long("install-space")
            .value_name("PATH")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Install space (default: <basepath>/install)"),
    )
}

/// `--cmake-args`, forwarded to CMake configure steps.
pub(crate) fn configure_arguments(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("cmake_args")
            .long("cmake-args")
            .value_name("ARG")
            .num_args(1..)
            .allow_hyphen_values(true)
            .action(ArgAction::Append)
            .help("Extra arguments for the CMake configure step"),
    )
}

/// `--build-type`, with choices enumerated from the build-type registry.
/// Listing the names does not load any backend.
pub(crate) fn build_type_argument(cmd: Command, registries: &Registries) -> Command {
    cmd.arg(
        Arg::new("build_type")
            .long("build-type")
            .value_name("TYPE")
            .value_parser(PossibleValuesParser::new(registries.build_types.names()))
            .help("Override the package's build type"),
    )
}

// The lookups below tolerate ids a verb never registered, so shared job code
// can ask for optional arguments regardless of which verb is running.

pub(crate) fn path_value(matches: &ArgMatches, id: &str) -> Option<PathBuf> {
    matches.try_get_one::<PathBuf>(id).ok().flatten().cloned()
}

pub(crate) fn string_value<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a str> {
    matches
        .try_get_one::<String>(id)
        .ok()
        .flatten()
        .map(String::as_str)
}

pub(crate) fn string_values(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .try_get_many::<String>(id)
        .ok()
        .flatten()
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
