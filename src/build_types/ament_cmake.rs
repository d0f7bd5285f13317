//! CMake packages using the ament CMake macros.
//!
//! Configured like plain CMake, with the install prefix exposed on
//! `CMAKE_PREFIX_PATH` so sibling packages are found, and test results
//! redirected into the per-package results directory.

use super::cmake::cmake_steps;
use super::{Action, BuildContext, BuildType};

#[derive(Debug, Default)]
pub struct AmentCmakeBuildType;

impl AmentCmakeBuildType {
    pub fn boxed() -> Box<dyn BuildType> {
        Box::new(Self)
    }
}

impl BuildType for AmentCmakeBuildType {
    fn build_type(&self) -> &'static str {
        "ament_cmake"
    }

    fn description(&self) -> &'static str {
        "CMake package built with ament_cmake"
    }

    fn steps(&self, action: Action, ctx: &BuildContext) -> Vec<String> {
        let defines = [
            format!("-DCMAKE_PREFIX_PATH={}", ctx.install_space.display()),
            format!("-DAMENT_TEST_RESULTS_DIR={}", ctx.test_results_dir().display()),
        ];
        cmake_steps(action, ctx, &defines)
    }
}
