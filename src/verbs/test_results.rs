//! `test_results`: summarise the JUnit-style result files in a build space.
//!
//! Every `<testsuite>` element contributes its `tests`, `failures`, `errors`
//! and `skipped` attributes. The verb fails when any file reports a failure
//! or an error.

use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use glob::{Pattern, glob};
use regex::Regex;
use tracing::{debug, warn};

use super::jobs::required_path;
use super::{VerbContext, VerbEntryPointData};
use crate::bootstrap::Registries;
use crate::helper::{absolute, existing_dir};

static TESTSUITE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<testsuite\b([^>]*)>").expect("Invalid regex pattern for testsuite")
});

static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)\s*=\s*"([^"]*)""#).expect("Invalid regex pattern for attribute")
});

pub fn entry_point_data() -> VerbEntryPointData {
    VerbEntryPointData {
        verb: "test_results",
        description: "Summarise the test results in a build space",
        prepare_arguments,
        main,
    }
}

fn prepare_arguments(cmd: Command, _registries: &Registries) -> Command {
    cmd.arg(
        Arg::new("build_space")
            .value_name("BUILD_SPACE")
            .default_value("build")
            .value_parser(existing_dir)
            .help("Build space to search for result files"),
    )
    .arg(
        Arg::new("all")
            .long("all")
            .action(ArgAction::SetTrue)
            .help("Also list result files without failures"),
    )
}

/// Counts summed over one or more test suites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestCounts {
    pub tests: u64,
    pub failures: u64,
    pub errors: u64,
    pub skipped: u64,
}

impl TestCounts {
    pub fn is_success(&self) -> bool {
        self.failures == 0 && self.errors == 0
    }
}

impl AddAssign for TestCounts {
    fn add_assign(&mut self, other: Self) {
        self.tests += other.tests;
        self.failures += other.failures;
        self.errors += other.errors;
        self.skipped += other.skipped;
    }
}

impl std::fmt::Display for TestCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tests, {} errors, {} failures, {} skipped",
            self.tests, self.errors, self.failures, self.skipped
        )
    }
}

/// Sum the `<testsuite>` counters in one result document.
pub fn parse_counts(content: &str) -> TestCounts {
    let mut total = TestCounts::default();
    for suite in TESTSUITE_REGEX.captures_iter(content) {
        let Some(attributes) = suite.get(1) else {
            continue;
        };
        for attribute in ATTRIBUTE_REGEX.captures_iter(attributes.as_str()) {
            let value = attribute[2].trim().parse::<u64>().unwrap_or(0);
            match &attribute[1] {
                "tests" => total.tests += value,
                "failures" => total.failures += value,
                "errors" => total.errors += value,
                "skipped" | "disabled" => total.skipped += value,
                _ => {}
            }
        }
    }
    total
}

/// All `*.xml` files below `build_space`, sorted.
pub fn collect_result_files(build_space: &Path) -> Result<Vec<PathBuf>> {
    // the build space is literal text; only the suffix is a pattern
    let pattern = format!(
        "{}/**/*.xml",
        Pattern::escape(&build_space.to_string_lossy())
    );
    let mut files: Vec<PathBuf> = glob(&pattern)
        .context("Failed to read glob pattern")?
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();
    Ok(files)
}

fn main(matches: &ArgMatches, ctx: &VerbContext<'_>) -> Result<i32> {
    let build_space = absolute(&ctx.cwd, required_path(matches, "build_space")?);
    let all = matches.get_flag("all");

    let mut total = TestCounts::default();
    for file in collect_result_files(&build_space)? {
        let content = match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %file.display(), error = %err, "skipping unreadable result file");
                continue;
            }
        };
        let counts = parse_counts(&content);
        debug!(path = %file.display(), %counts, "parsed result file");

        if all || !counts.is_success() {
            let relative = file.strip_prefix(&build_space).unwrap_or(&file);
            println!("{}: {}", relative.display(), counts);
        }
        total += counts;
    }

    let summary = format!("Summary: {}", total);
    if total.is_success() {
        println!("{}", console::style(summary).green());
        Ok(0)
    } else {
        println!("{}", console::style(summary).red().bold());
        Ok(1)
    }
}
