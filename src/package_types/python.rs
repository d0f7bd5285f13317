//! Python projects with a `setup.py` and no manifest.

use std::path::Path;

use super::{PackageIdentity, PackageTypeEntryPointData, dir_name};
use crate::errors::ManifestError;

pub fn entry_point_data() -> PackageTypeEntryPointData {
    PackageTypeEntryPointData {
        name: "python",
        description: "Python project (setup.py)",
        package_exists_at,
        identify,
    }
}

fn package_exists_at(path: &Path) -> bool {
    path.join("setup.py").is_file()
}

fn identify(path: &Path, _default_build_type: &str) -> Result<PackageIdentity, ManifestError> {
    Ok(PackageIdentity {
        name: dir_name(path),
        build_type: "ament_python".to_string(),
    })
}
