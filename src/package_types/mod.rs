//! Package types.
//!
//! A package type recognises a package by looking at a directory's contents
//! and tells which build type applies to it. Unlike build types, package
//! types are never selected by name: they are always tried in sequence
//! (`ament`, `cmake`, `python`) and the first match wins.

pub mod ament;
pub mod cmake;
pub mod python;

use std::path::Path;

use crate::errors::ManifestError;

/// What a package type learned about a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    pub name: String,
    pub build_type: String,
}

/// Descriptor each package-type module exports.
#[derive(Debug, Clone, Copy)]
pub struct PackageTypeEntryPointData {
    pub name: &'static str,
    pub description: &'static str,
    /// Cheap marker-file check.
    pub package_exists_at: fn(&Path) -> bool,
    /// Name and build type of a directory `package_exists_at` accepted.
    /// The second argument is the build type to assume when none is declared.
    pub identify: fn(&Path, &str) -> Result<PackageIdentity, ManifestError>,
}

/// Every known package type, in detection order.
pub fn get_package_types() -> Vec<PackageTypeEntryPointData> {
    vec![
        ament::entry_point_data(),
        cmake::entry_point_data(),
        python::entry_point_data(),
    ]
}

/// The first package type recognising `path`, if any.
pub fn detect<'a>(
    package_types: &'a [PackageTypeEntryPointData],
    path: &Path,
) -> Option<&'a PackageTypeEntryPointData> {
    package_types.iter().find(|pt| (pt.package_exists_at)(path))
}

/// Directory name as a package name, for types without a manifest.
pub(crate) fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_package_types_are_ordered() {
        let names: Vec<_> = get_package_types().iter().map(|pt| pt.name).collect();
        assert_eq!(names, vec!["ament", "cmake", "python"]);
    }

    #[test]
    fn test_detect_prefers_ament_over_cmake() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.xml"), "<package/>").unwrap();
        std::fs::write(dir.path().join("CMakeLists.txt"), "").unwrap();

        let types = get_package_types();
        assert_eq!(detect(&types, dir.path()).map(|pt| pt.name), Some("ament"));
    }

    #[test]
    fn test_detect_falls_through_to_python() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("setup.py"), "").unwrap();

        let types = get_package_types();
        assert_eq!(detect(&types, dir.path()).map(|pt| pt.name), Some("python"));
    }

    #[test]
    fn test_detect_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(detect(&get_package_types(), dir.path()).is_none());
    }
}
