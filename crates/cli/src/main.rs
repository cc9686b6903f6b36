use std::process::ExitCode;

fn main() -> ExitCode {
    babtory_cli::run()
}
