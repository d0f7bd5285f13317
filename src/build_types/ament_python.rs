//! Python packages driven by setuptools.

use super::{Action, BuildContext, BuildType};

const PYTHON: &str = "python3";

#[derive(Debug, Default)]
pub struct AmentPythonBuildType;

impl AmentPythonBuildType {
    pub fn boxed() -> Box<dyn BuildType> {
        Box::new(Self)
    }
}

impl BuildType for AmentPythonBuildType {
    fn build_type(&self) -> &'static str {
        "ament_python"
    }

    fn description(&self) -> &'static str {
        "Python package built with setuptools"
    }

    fn steps(&self, action: Action, ctx: &BuildContext) -> Vec<String> {
        let setup_py = ctx.source_space.join("setup.py");
        let build = ctx.build_space.display();
        // installed files are recorded so uninstall can remove exactly those
        let record = ctx.build_space.join("install.log");
        match action {
            Action::Build => vec![format!(
                "{PYTHON} {} build --build-base {}",
                setup_py.display(),
                build
            )],
            Action::Test => vec![format!(
                "{PYTHON} -m pytest {} --junit-xml={}",
                ctx.source_space.display(),
                ctx.test_results_dir().join("pytest.xml").display()
            )],
            Action::Install => vec![format!(
                "{PYTHON} {} install --prefix {} --record {} --single-version-externally-managed",
                setup_py.display(),
                ctx.install_space.display(),
                record.display()
            )],
            Action::Uninstall => vec![format!("remove files listed in {}", record.display())],
        }
    }
}
