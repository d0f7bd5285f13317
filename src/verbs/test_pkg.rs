use anyhow::Result;
use clap::{ArgMatches, Command};

use super::jobs::{package_arguments, run_package};
use super::{VerbContext, VerbEntryPointData, build_type_argument, configure_arguments, space_arguments};
use crate::bootstrap::Registries;
use crate::build_types::Action;

pub fn entry_point_data() -> VerbEntryPointData {
    VerbEntryPointData {
        verb: "test_pkg",
        description: "Run the tests of a single package",
        prepare_arguments,
        main,
    }
}

fn prepare_arguments(cmd: Command, registries: &Registries) -> Command {
    build_type_argument(configure_arguments(space_arguments(package_arguments(cmd))), registries)
}

fn main(matches: &ArgMatches, ctx: &VerbContext<'_>) -> Result<i32> {
    run_package(matches, ctx, &[Action::Test])
}
