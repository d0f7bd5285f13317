//! `list_packages`: crawl a workspace and print what was found.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};

use super::jobs::required_path;
use super::{VerbContext, VerbEntryPointData};
use crate::bootstrap::Registries;
use crate::config::AmentConfig;
use crate::helper::{absolute, existing_dir};
use crate::packages::{Package, find_packages};

pub fn entry_point_data() -> VerbEntryPointData {
    VerbEntryPointData {
        verb: "list_packages",
        description: "List the packages found under a base path",
        prepare_arguments,
        main,
    }
}

fn prepare_arguments(cmd: Command, _registries: &Registries) -> Command {
    cmd.arg(
        Arg::new("basepath")
            .value_name("BASEPATH")
            .default_value(".")
            .value_parser(existing_dir)
            .help("Base path to search"),
    )
    .arg(
        Arg::new("names_only")
            .long("names-only")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print package names only"),
    )
    .arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print packages as a JSON array"),
    )
}

fn main(matches: &ArgMatches, ctx: &VerbContext<'_>) -> Result<i32> {
    let base_path = absolute(&ctx.cwd, required_path(matches, "basepath")?);
    let config = AmentConfig::load(&base_path, &ctx.cwd)?;
    let packages = find_packages(
        &base_path,
        &ctx.registries.package_types,
        config.discovery(),
        config.default_build_type(),
    )
    .context("Failed to crawl packages")?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(0);
    }
    let names_only = matches.get_flag("names_only");
    for package in &packages {
        println!("{}", render(package, &base_path, names_only));
    }
    Ok(0)
}

/// One output line: the name, or `name<TAB>relative path<TAB>build type`.
fn render(package: &Package, base_path: &Path, names_only: bool) -> String {
    if names_only {
        return package.name.clone();
    }
    let relative = package.path.strip_prefix(base_path).unwrap_or(&package.path);
    let relative = if relative.as_os_str().is_empty() {
        Path::new(".")
    } else {
        relative
    };
    format!("{}\t{}\t{}", package.name, relative.display(), package.build_type)
}
