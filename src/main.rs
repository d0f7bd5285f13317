use std::process::ExitCode;

use ament::bootstrap::Registries;
use ament::cli;

fn main() -> ExitCode {
    let registries = match Registries::bootstrap() {
        Ok(registries) => registries,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(1);
        }
    };

    match cli::run(&registries, std::env::args_os()) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            eprintln!("{} {:#}", console::style("Error:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
