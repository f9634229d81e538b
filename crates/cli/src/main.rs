use std::process::ExitCode;

use clap::error::ErrorKind;

use matamazon_cli::{Args, Config, FAILURE_MESSAGE, USAGE};

fn main() -> ExitCode {
    let args = match Args::try_parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    matamazon_observability::init(config.log_format);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = matamazon_cli::app::run(&config, &mut out) {
        tracing::error!(error = %format!("{err:#}"), "run failed");
        eprintln!("{FAILURE_MESSAGE}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
