//! Command-line arguments and resolved run configuration.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use matamazon_observability::{LogFormat, UnknownLogFormat};

/// Printed to stderr when the arguments cannot be parsed.
pub const USAGE: &str = "Usage: matamazon -l <matamazon_log> -s <matamazon_system> -o <output_file> -os <out_matamazon_system>";

/// Printed to stderr when a run fails after the arguments were accepted.
pub const FAILURE_MESSAGE: &str = "The matamazon script has encountered an error";

#[derive(Debug, Parser)]
#[command(name = "matamazon")]
#[command(version)]
#[command(
    about = "Replay a Matamazon command log and export orders by origin city",
    long_about = None
)]
pub struct Args {
    /// Command log to replay
    #[arg(short = 'l', long = "log")]
    pub log: PathBuf,
    /// Catalog snapshot to load before replaying
    #[arg(short = 's', long = "system")]
    pub system: Option<PathBuf>,
    /// Where to write the orders-by-city JSON (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Where to write the catalog snapshot after replaying
    #[arg(long = "os", visible_alias = "out-system")]
    pub out_system: Option<PathBuf>,
    /// Log format: json or pretty (overrides MATAMAZON_LOG_FORMAT)
    #[arg(long = "log-format")]
    pub log_format: Option<LogFormat>,
}

impl Args {
    /// Parse from raw process arguments.
    ///
    /// `-os` is rewritten to `--os` first; clap would otherwise read it as
    /// `-o s`.
    pub fn try_parse_args<I, T>(raw: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(raw.into_iter().map(|arg| {
            let arg: OsString = arg.into();
            if arg.to_str() == Some("-os") { OsString::from("--os") } else { arg }
        }))
    }
}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log: PathBuf,
    pub system: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub out_system: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Config {
    /// Resolve arguments against the environment. The flag wins over
    /// `MATAMAZON_LOG_FORMAT`, which wins over the default.
    pub fn from_args(args: Args) -> Result<Self, UnknownLogFormat> {
        let log_format = match args.log_format {
            Some(format) => format,
            None => LogFormat::from_env()?.unwrap_or_default(),
        };
        Ok(Self {
            log: args.log,
            system: args.system,
            output: args.output,
            out_system: args.out_system,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags_including_single_dash_os() {
        let args = Args::try_parse_args([
            "matamazon", "-l", "log.txt", "-s", "in.txt", "-o", "out.json", "-os", "snap.txt",
        ])
        .unwrap();
        assert_eq!(args.log, PathBuf::from("log.txt"));
        assert_eq!(args.system, Some(PathBuf::from("in.txt")));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.out_system, Some(PathBuf::from("snap.txt")));
    }

    #[test]
    fn log_is_required() {
        assert!(Args::try_parse_args(["matamazon", "-o", "out.json"]).is_err());
        assert!(Args::try_parse_args(["matamazon", "-l"]).is_err());
        assert!(Args::try_parse_args(["matamazon", "-l", "a", "stray"]).is_err());
    }

    #[test]
    fn log_format_flag_wins() {
        let args =
            Args::try_parse_args(["matamazon", "-l", "log.txt", "--log-format", "pretty"]).unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.output, None);

        assert!(
            Args::try_parse_args(["matamazon", "-l", "log.txt", "--log-format", "xml"]).is_err()
        );
    }
}
