use std::process::ExitCode;

fn main() -> ExitCode {
    match revendor::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("internal error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
