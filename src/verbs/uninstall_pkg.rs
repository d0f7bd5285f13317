use anyhow::Result;
use clap::{ArgMatches, Command};

use super::jobs::{package_arguments, run_package};
use super::{VerbContext, VerbEntryPointData, build_type_argument, space_arguments};
use crate::bootstrap::Registries;
use crate::build_types::Action;

pub fn entry_point_data() -> VerbEntryPointData {
    VerbEntryPointData {
        verb: "uninstall_pkg",
        description: "Uninstall a single package",
        prepare_arguments,
        main,
    }
}

fn prepare_arguments(cmd: Command, registries: &Registries) -> Command {
    build_type_argument(space_arguments(package_arguments(cmd)), registries)
}

fn main(matches: &ArgMatches, ctx: &VerbContext<'_>) -> Result<i32> {
    run_package(matches, ctx, &[Action::Uninstall])
}
