//! Command line entry point: `cavity <script.json>`.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: cavity <script.json>");
        return ExitCode::from(2);
    };

    match cavity_app::run(&path) {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Session failed: {}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
