//! Packages carrying a `package.xml` manifest.

use std::path::Path;

use super::{PackageIdentity, PackageTypeEntryPointData};
use crate::errors::ManifestError;
use crate::manifest::{Manifest, package_exists_at};

pub fn entry_point_data() -> PackageTypeEntryPointData {
    PackageTypeEntryPointData {
        name: "ament",
        description: "Package with a package.xml manifest",
        package_exists_at,
        identify,
    }
}

fn identify(path: &Path, default_build_type: &str) -> Result<PackageIdentity, ManifestError> {
    let manifest = Manifest::load(path)?;
    Ok(PackageIdentity {
        name: manifest.name,
        build_type: manifest
            .build_type
            .unwrap_or_else(|| default_build_type.to_string()),
    })
}
