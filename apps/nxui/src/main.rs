use std::process::ExitCode;

fn main() -> ExitCode {
    match nxui_cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            nxui_logger::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
