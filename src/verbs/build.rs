//! `build`: build and install steps for every package in a workspace.

use anyhow::Result;
use clap::{ArgMatches, Command};

use super::jobs::{run_workspace, workspace_arguments};
use super::{VerbContext, VerbEntryPointData, configure_arguments, space_arguments};
use crate::bootstrap::Registries;
use crate::build_types::Action;

pub fn entry_point_data() -> VerbEntryPointData {
    VerbEntryPointData {
        verb: "build",
        description: "Build and install every package in a workspace",
        prepare_arguments,
        main,
    }
}

fn prepare_arguments(cmd: Command, _registries: &Registries) -> Command {
    configure_arguments(space_arguments(workspace_arguments(cmd)))
}

fn main(matches: &ArgMatches, ctx: &VerbContext<'_>) -> Result<i32> {
    run_workspace(matches, ctx, &[Action::Build, Action::Install])
}
