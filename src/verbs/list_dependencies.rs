//! `list_dependencies`: print the dependencies a package manifest declares.

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

use super::jobs::{package_arguments, required_path};
use super::{VerbContext, VerbEntryPointData};
use crate::bootstrap::Registries;
use crate::helper::absolute;
use crate::manifest::{Dependency, Manifest};

pub fn entry_point_data() -> VerbEntryPointData {
    VerbEntryPointData {
        verb: "list_dependencies",
        description: "List the dependencies of a package",
        prepare_arguments,
        main,
    }
}

fn prepare_arguments(cmd: Command, _registries: &Registries) -> Command {
    package_arguments(cmd)
        .arg(
            Arg::new("build")
                .long("build")
                .action(ArgAction::SetTrue)
                .help("Include build dependencies"),
        )
        .arg(
            Arg::new("run")
                .long("run")
                .action(ArgAction::SetTrue)
                .help("Include run dependencies"),
        )
        .arg(
            Arg::new("test")
                .long("test")
                .action(ArgAction::SetTrue)
                .help("Include test dependencies"),
        )
}

/// Which dependency kinds to print. No flag at all means every kind.
#[derive(Debug, Clone, Copy, Default)]
struct Filter {
    build: bool,
    run: bool,
    test: bool,
}

impl Filter {
    fn accepts(&self, dependency: &Dependency) -> bool {
        if !(self.build || self.run || self.test) {
            return true;
        }
        let kind = dependency.kind;
        (self.build && kind.is_build()) || (self.run && kind.is_run()) || (self.test && kind.is_test())
    }
}

fn main(matches: &ArgMatches, ctx: &VerbContext<'_>) -> Result<i32> {
    let path = absolute(&ctx.cwd, required_path(matches, "path")?);
    let manifest = Manifest::load(&path)?;
    let filter = Filter {
        build: matches.get_flag("build"),
        run: matches.get_flag("run"),
        test: matches.get_flag("test"),
    };
    for name in select(&manifest.dependencies, filter) {
        println!("{}", name);
    }
    Ok(0)
}

/// Names accepted by `filter`, first occurrence kept.
fn select(dependencies: &[Dependency], filter: Filter) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for dependency in dependencies.iter().filter(|d| filter.accepts(d)) {
        if !names.contains(&dependency.name.as_str()) {
            names.push(&dependency.name);
        }
    }
    names
}
