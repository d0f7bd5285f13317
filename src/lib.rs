pub mod bootstrap;
pub mod build_types;
pub mod cli;
pub mod config;
pub mod errors;
pub mod helper;
pub mod logging;
pub mod manifest;
pub mod package_types;
pub mod packages;
pub mod registry;
pub mod verbs;
