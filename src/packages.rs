//! Package discovery.
//!
//! Crawls a base path and classifies every package root with the first
//! matching package type. Crawling stops at a package root (packages do not
//! nest) and at any directory carrying an ignore marker.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::DiscoverySection;
use crate::errors::ManifestError;
use crate::package_types::{PackageTypeEntryPointData, detect};

/// A package found under the base path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub name: String,
    pub path: PathBuf,
    pub package_type: &'static str,
    pub build_type: String,
}

/// All packages below `base_path`, ordered by path.
pub fn find_packages(
    base_path: &Path,
    package_types: &[PackageTypeEntryPointData],
    discovery: &DiscoverySection,
    default_build_type: &str,
) -> Result<Vec<Package>, ManifestError> {
    let mut packages = Vec::new();
    let mut it = WalkDir::new(base_path).sort_by_file_name().into_iter();

    while let Some(entry) = it.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable path");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if entry.depth() > 0 && discovery.skip_hidden && is_hidden(path) {
            it.skip_current_dir();
            continue;
        }
        if let Some(marker) = discovery
            .ignore_markers
            .iter()
            .find(|marker| path.join(marker).exists())
        {
            debug!(path = %path.display(), marker = %marker, "ignoring directory");
            it.skip_current_dir();
            continue;
        }

        if let Some(package_type) = detect(package_types, path) {
            let identity = (package_type.identify)(path, default_build_type)?;
            debug!(
                name = %identity.name,
                package_type = package_type.name,
                path = %path.display(),
                "found package"
            );
            packages.push(Package {
                name: identity.name,
                path: path.to_path_buf(),
                package_type: package_type.name,
                build_type: identity.build_type,
            });
            it.skip_current_dir();
        }
    }

    Ok(packages)
}

/// Keep only the named packages, in discovery order.
pub fn filter_by_name(packages: Vec<Package>, names: &[String]) -> Vec<Package> {
    if names.is_empty() {
        return packages;
    }
    packages
        .into_iter()
        .filter(|p| names.contains(&p.name))
        .collect()
}

/// Requested names that match no discovered package, in request order.
pub fn unmatched_names<'a>(packages: &[Package], names: &'a [String]) -> Vec<&'a str> {
    names
        .iter()
        .filter(|name| !packages.iter().any(|p| &p.name == *name))
        .map(String::as_str)
        .collect()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
