//! Top-level command dispatcher.
//!
//! Global flags are declared with clap's derive API; one subcommand per
//! registered verb is appended at runtime from the verb registry, with the
//! verb's own `prepare_arguments` filling in its flags.

use std::ffi::OsString;

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, FromArgMatches, Parser};
use tracing::info;

use crate::bootstrap::Registries;
use crate::logging;
use crate::verbs::VerbContext;

#[derive(Parser, Debug)]
#[command(name = "ament")]
#[command(version, about = "Build, test and inspect multi-package workspaces")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log filter, e.g. `info` or `ament=trace`
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// The full command tree: global flags plus one subcommand per verb.
pub fn command(registries: &Registries) -> Result<Command> {
    let mut cmd = Cli::command()
        .subcommand_required(true)
        .arg_required_else_help(true);

    for name in registries.verb_names()? {
        let verb = registries.load_verb_description(name)?;
        let sub = Command::new(verb.verb).about(verb.description);
        cmd = cmd.subcommand((verb.prepare_arguments)(sub, registries));
    }
    Ok(cmd)
}

/// Parse `args` and run the selected verb. Returns the process exit code.
pub fn run<I, T>(registries: &Registries, args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match command(registries)?.try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => {
            // help and version land here too, with exit code 0
            let _ = err.print();
            return Ok(err.exit_code());
        }
    };
    let cli = Cli::from_arg_matches(&matches)?;
    logging::init(cli.log_level.as_deref(), cli.verbose);

    let (name, sub_matches) = matches
        .subcommand()
        .context("No verb given")?;
    let verb = registries.load_verb_description(name)?;
    let ctx = VerbContext {
        registries,
        cwd: std::env::current_dir().context("Failed to get current directory")?,
    };

    info!(verb = name, "running verb");
    (verb.main)(sub_matches, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registries() -> Registries {
        Registries::bootstrap().unwrap()
    }

    #[test]
    fn test_command_is_consistent() {
        command(&registries()).unwrap().debug_assert();
    }

    #[test]
    fn test_every_verb_is_a_subcommand() {
        let registries = registries();
        let cmd = command(&registries).unwrap();
        let names: Vec<_> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        assert_eq!(names, registries.verb_names().unwrap());
    }

    #[test]
    fn test_build_type_choices_come_from_registry() {
        let registries = registries();
        let err = command(&registries)
            .unwrap()
            .try_get_matches_from(["ament", "build_pkg", "--build-type", "meson"])
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("meson"));
        assert!(message.contains("ament_python"));
    }

    #[test]
    fn test_invalid_path_is_an_argument_error() {
        let registries = registries();
        let err = command(&registries)
            .unwrap()
            .try_get_matches_from(["ament", "list_packages", "/path/that/does/not/exist"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("/path/that/does/not/exist"));
    }

    #[test]
    fn test_global_flags_after_verb() {
        let registries = registries();
        let matches = command(&registries)
            .unwrap()
            .try_get_matches_from(["ament", "package_name", "--help"]);
        assert!(matches.is_err());

        let dir = tempfile::TempDir::new().unwrap();
        let raw = dir.path().to_str().unwrap();
        let matches = command(&registries)
            .unwrap()
            .try_get_matches_from(["ament", "list_packages", raw, "-v", "--log-level", "info"])
            .unwrap();
        let cli = Cli::from_arg_matches(&matches).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_level.as_deref(), Some("info"));
    }
}
