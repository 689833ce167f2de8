use std::process::ExitCode;

use dochameleon::action::cli::{finish, process_args};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    ExitCode::from(finish(process_args(args)))
}
