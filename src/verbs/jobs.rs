//! Shared body of the build, test and uninstall verbs.
//!
//! A job is one package plus the backend its build type resolves to. The
//! backend is loaded per job through the build-type registry, so a workspace
//! only loads the backends its packages actually use. Jobs run in discovery
//! order; nothing here orders packages by their dependencies.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{info, warn};

use super::{VerbContext, path_value, string_value, string_values};
use crate::build_types::{Action, BuildContext};
use crate::config::AmentConfig;
use crate::helper::{absolute, existing_dir, existing_package};
use crate::packages::{Package, filter_by_name, find_packages, unmatched_names};
use crate::package_types::detect;

/// Positional `basepath` plus `--only-packages`.
pub(crate) fn workspace_arguments(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("basepath")
            .value_name("BASEPATH")
            .default_value(".")
            .value_parser(existing_dir)
            .help("Base path of the workspace"),
    )
    .arg(
        Arg::new("only_packages")
            .long("only-packages")
            .value_name("NAME")
            .num_args(1..)
            .action(ArgAction::Append)
            .help("Only process the named packages"),
    )
}

/// Positional package `path`.
pub(crate) fn package_arguments(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("path")
            .value_name("PATH")
            .default_value(".")
            .value_parser(existing_package)
            .help("Path to the package"),
    )
}

/// Discover the workspace and print each package's steps for `actions`.
pub(crate) fn run_workspace(matches: &ArgMatches, ctx: &VerbContext<'_>, actions: &[Action]) -> Result<i32> {
    let base_path = absolute(&ctx.cwd, required_path(matches, "basepath")?);
    let config = load_config(matches, ctx, &base_path)?;

    let packages = find_packages(
        &base_path,
        &ctx.registries.package_types,
        config.discovery(),
        config.default_build_type(),
    )
    .context("Failed to crawl packages")?;
    let only_packages = string_values(matches, "only_packages");
    for name in unmatched_names(&packages, &only_packages) {
        warn!(package = name, "requested package was not found");
    }
    let packages = filter_by_name(packages, &only_packages);

    if packages.is_empty() {
        println!("No packages found in {}", base_path.display());
        return Ok(0);
    }

    info!(count = packages.len(), "processing packages");
    for package in &packages {
        print_job(ctx, &config, package, None, matches, actions)?;
    }
    Ok(0)
}

/// Print the steps for `actions` on the single package named on the command line.
pub(crate) fn run_package(matches: &ArgMatches, ctx: &VerbContext<'_>, actions: &[Action]) -> Result<i32> {
    let path = absolute(&ctx.cwd, required_path(matches, "path")?);
    // single-package verbs place their spaces next to the invocation
    let config = load_config(matches, ctx, &ctx.cwd)?;

    let package_type = detect(&ctx.registries.package_types, &path)
        .with_context(|| format!("No known package type at {}", path.display()))?;
    let identity = (package_type.identify)(&path, config.default_build_type())?;
    let package = Package {
        name: identity.name,
        path,
        package_type: package_type.name,
        build_type: identity.build_type,
    };

    let build_type = string_value(matches, "build_type");
    print_job(ctx, &config, &package, build_type, matches, actions)?;
    Ok(0)
}

fn print_job(
    ctx: &VerbContext<'_>,
    config: &AmentConfig,
    package: &Package,
    build_type_override: Option<&str>,
    matches: &ArgMatches,
    actions: &[Action],
) -> Result<()> {
    let build_type = build_type_override.unwrap_or(&package.build_type);
    let backend = ctx
        .registries
        .build_types
        .load(build_type)
        .with_context(|| format!("Cannot process package '{}'", package.name))?;

    let job = BuildContext::new(
        &package.name,
        package.path.clone(),
        config.build_space().join(&package.name),
        config.install_space(),
    )
    .with_configure_args(string_values(matches, "cmake_args"));

    println!(
        "{} {} ({}) {}",
        console::style("==>").bold(),
        console::style(&package.name).green(),
        backend.build_type(),
        package.path.display()
    );
    for action in actions {
        for step in backend.steps(*action, &job) {
            println!("  {}: {}", action, step);
        }
    }
    Ok(())
}

fn load_config(matches: &ArgMatches, ctx: &VerbContext<'_>, base_path: &Path) -> Result<AmentConfig> {
    let config = AmentConfig::load(base_path, &ctx.cwd)?.with_cli_args(
        path_value(matches, "build_space"),
        path_value(matches, "install_space"),
    );
    for warning in config.toml.validate(&ctx.registries.build_types.names()) {
        warn!("{}", warning);
    }
    Ok(config)
}

pub(crate) fn required_path<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .with_context(|| format!("Missing argument '{}'", id))
}
