//! Plain CMake projects without a manifest.

use std::path::Path;

use super::{PackageIdentity, PackageTypeEntryPointData, dir_name};
use crate::errors::ManifestError;

const MARKER: &str = "CMakeLists.txt";

pub fn entry_point_data() -> PackageTypeEntryPointData {
    PackageTypeEntryPointData {
        name: "cmake",
        description: "Plain CMake project (CMakeLists.txt)",
        package_exists_at,
        identify,
    }
}

fn package_exists_at(path: &Path) -> bool {
    path.join(MARKER).is_file()
}

fn identify(path: &Path, _default_build_type: &str) -> Result<PackageIdentity, ManifestError> {
    Ok(PackageIdentity {
        name: dir_name(path),
        build_type: "cmake".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_identify_uses_directory_name() {
        let dir = TempDir::new().unwrap();
        let pkg = dir.path().join("libfoo");
        std::fs::create_dir(&pkg).unwrap();
        std::fs::write(pkg.join(MARKER), "").unwrap();

        assert!(package_exists_at(&pkg));
        let id = identify(&pkg, "ament_cmake").unwrap();
        assert_eq!(id.name, "libfoo");
        assert_eq!(id.build_type, "cmake");
    }
}
