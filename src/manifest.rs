//! Package manifest (`package.xml`) access.
//!
//! Only the handful of tags the verbs need are read, using regex patterns for:
//! - `<name>` and `<version>`
//! - `<export><build_type>...</build_type></export>`
//! - the `*_depend` family of dependency declarations
//!
//! Comments are stripped first so commented-out dependencies are ignored.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::errors::ManifestError;

/// Well-known file whose presence marks a directory as a package root.
pub const PACKAGE_MANIFEST_FILENAME: &str = "package.xml";

static COMMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid regex pattern for comment"));

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<name(?:\s[^>]*)?>\s*([^<]*?)\s*</name>").expect("Invalid regex pattern for name"));

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<version(?:\s[^>]*)?>\s*([^<]*?)\s*</version>").expect("Invalid regex pattern for version"));

static EXPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<export(?:\s[^>]*)?>(.*?)</export>").expect("Invalid regex pattern for export")
});

static BUILD_TYPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<build_type(?:\s[^>]*)?>\s*([^<]*?)\s*</build_type>")
        .expect("Invalid regex pattern for build_type")
});

static DEPEND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"<(build_depend|buildtool_depend|build_export_depend|exec_depend|run_depend|test_depend|doc_depend|depend)(?:\s[^>]*)?>\s*([^<]*?)\s*</[a-z_]+>",
    )
    .expect("Invalid regex pattern for dependency")
});

/// Whether `path` contains a package manifest.
pub fn package_exists_at(path: &Path) -> bool {
    path.join(PACKAGE_MANIFEST_FILENAME).is_file()
}

/// Which `*_depend` tag declared a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    Build,
    Buildtool,
    BuildExport,
    Exec,
    Test,
    Doc,
    /// Plain `<depend>`: build, export and exec at once.
    Generic,
}

impl DependencyKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "build_depend" => Some(DependencyKind::Build),
            "buildtool_depend" => Some(DependencyKind::Buildtool),
            "build_export_depend" => Some(DependencyKind::BuildExport),
            "exec_depend" | "run_depend" => Some(DependencyKind::Exec),
            "test_depend" => Some(DependencyKind::Test),
            "doc_depend" => Some(DependencyKind::Doc),
            "depend" => Some(DependencyKind::Generic),
            _ => None,
        }
    }

    pub fn is_build(self) -> bool {
        matches!(
            self,
            DependencyKind::Build | DependencyKind::Buildtool | DependencyKind::Generic
        )
    }

    pub fn is_run(self) -> bool {
        matches!(
            self,
            DependencyKind::Exec | DependencyKind::BuildExport | DependencyKind::Generic
        )
    }

    pub fn is_test(self) -> bool {
        matches!(self, DependencyKind::Test | DependencyKind::Generic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub name: String,
    pub kind: DependencyKind,
}

/// The subset of a package manifest the tool reads.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub path: PathBuf,
    pub name: String,
    pub version: String,
    /// Value of `<export><build_type>`, if declared.
    pub build_type: Option<String>,
    /// Dependencies in declaration order.
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    /// Read the manifest inside a package directory.
    pub fn load(package_path: &Path) -> Result<Self, ManifestError> {
        let path = package_path.join(PACKAGE_MANIFEST_FILENAME);
        let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&path, &content)
    }

    /// Parse manifest content; `path` is only used in error messages.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let content = COMMENT_REGEX.replace_all(content, "");

        let name = capture(&NAME_REGEX, &content).ok_or_else(|| ManifestError::MissingTag {
            path: path.to_path_buf(),
            tag: "name",
        })?;
        let version =
            capture(&VERSION_REGEX, &content).ok_or_else(|| ManifestError::MissingTag {
                path: path.to_path_buf(),
                tag: "version",
            })?;
        // only a <build_type> inside <export> counts
        let build_type = capture(&EXPORT_REGEX, &content)
            .and_then(|export| capture(&BUILD_TYPE_REGEX, &export));

        let dependencies = DEPEND_REGEX
            .captures_iter(&content)
            .filter_map(|cap| {
                let kind = DependencyKind::from_tag(cap.get(1)?.as_str())?;
                let name = cap.get(2)?.as_str().trim();
                (!name.is_empty()).then(|| Dependency {
                    name: name.to_string(),
                    kind,
                })
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            version,
            build_type,
            dependencies,
        })
    }
}

fn capture(regex: &Regex, text: &str) -> Option<String> {
    regex
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}
