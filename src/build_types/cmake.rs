//! Plain CMake packages.

use super::{Action, BuildContext, BuildType};

#[derive(Debug, Default)]
pub struct CmakeBuildType;

impl CmakeBuildType {
    pub fn boxed() -> Box<dyn BuildType> {
        Box::new(Self)
    }
}

impl BuildType for CmakeBuildType {
    fn build_type(&self) -> &'static str {
        "cmake"
    }

    fn description(&self) -> &'static str {
        "Plain CMake project"
    }

    fn steps(&self, action: Action, ctx: &BuildContext) -> Vec<String> {
        cmake_steps(action, ctx, &[])
    }
}

/// Shared by every CMake-driven backend; `defines` are appended to the
/// configure step before the user's own arguments.
pub(crate) fn cmake_steps(action: Action, ctx: &BuildContext, defines: &[String]) -> Vec<String> {
    let build = ctx.build_space.display();
    match action {
        Action::Build => {
            let mut configure = format!(
                "cmake -S {} -B {} -DCMAKE_INSTALL_PREFIX={}",
                ctx.source_space.display(),
                build,
                ctx.install_space.display()
            );
            for arg in defines.iter().chain(&ctx.configure_args) {
                configure.push(' ');
                configure.push_str(arg);
            }
            vec![configure, format!("cmake --build {}", build)]
        }
        Action::Test => vec![format!("ctest --test-dir {} --output-on-failure", build)],
        Action::Install => vec![format!("cmake --install {}", build)],
        Action::Uninstall => vec![format!("cmake --build {} --target uninstall", build)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ctx() -> BuildContext {
        BuildContext::new(
            "foo",
            PathBuf::from("/src/foo"),
            PathBuf::from("/ws/build/foo"),
            PathBuf::from("/ws/install"),
        )
    }

    #[test]
    fn test_build_configures_then_builds() {
        let steps = CmakeBuildType.steps(Action::Build, &ctx());
        assert_eq!(
            steps,
            vec![
                "cmake -S /src/foo -B /ws/build/foo -DCMAKE_INSTALL_PREFIX=/ws/install",
                "cmake --build /ws/build/foo",
            ]
        );
    }

    #[test]
    fn test_configure_args_are_appended() {
        let ctx = ctx().with_configure_args(vec!["-DCMAKE_BUILD_TYPE=Release".into()]);
        let steps = CmakeBuildType.steps(Action::Build, &ctx);
        assert!(steps[0].ends_with("-DCMAKE_INSTALL_PREFIX=/ws/install -DCMAKE_BUILD_TYPE=Release"));
    }

    #[test]
    fn test_uninstall_uses_uninstall_target() {
        let steps = CmakeBuildType.steps(Action::Uninstall, &ctx());
        assert_eq!(steps, vec!["cmake --build /ws/build/foo --target uninstall"]);
    }
}
