//! `package_name`: print the `<name>` of a package manifest.

use anyhow::Result;
use clap::{ArgMatches, Command};

use super::jobs::{package_arguments, required_path};
use super::{VerbContext, VerbEntryPointData};
use crate::bootstrap::Registries;
use crate::helper::absolute;
use crate::manifest::Manifest;

pub fn entry_point_data() -> VerbEntryPointData {
    VerbEntryPointData {
        verb: "package_name",
        description: "Print the name of a package",
        prepare_arguments,
        main,
    }
}

fn prepare_arguments(cmd: Command, _registries: &Registries) -> Command {
    package_arguments(cmd)
}

fn main(matches: &ArgMatches, ctx: &VerbContext<'_>) -> Result<i32> {
    let path = absolute(&ctx.cwd, required_path(matches, "path")?);
    let manifest = Manifest::load(&path)?;
    println!("{}", manifest.name);
    Ok(0)
}
