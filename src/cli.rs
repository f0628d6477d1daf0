use std::path::PathBuf;

use clap::Parser;

use crate::browser::DriverKind;
use crate::models::EntityKind;

/// Get the ids of every entity of a kind listed on the parliament website
#[derive(Parser, Debug)]
#[command(name = "parliament_ids")]
#[command(version)]
pub struct Args {
    /// Type of data to retrieve
    #[arg(long = "type", value_enum)]
    pub kind: EntityKind,

    /// Run all legislatures and not just the last
    #[arg(long)]
    pub full: bool,

    /// Do not use cached results; do not cache results for further runs
    #[arg(long = "no-cache")]
    pub no_cache: bool,

    /// How to obtain the browser
    #[arg(long, value_enum, ignore_case = true, default_value = "headless")]
    pub driver: DriverKind,

    /// Path to the browser executable
    #[arg(long = "driver-path")]
    pub driver_path: Option<PathBuf>,

    /// TOML file overriding the default configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["parliament_ids", "--type", "mp"]).unwrap();
        assert_eq!(args.kind, EntityKind::Mp);
        assert!(!args.full);
        assert!(!args.no_cache);
        assert_eq!(args.driver, DriverKind::Headless);
        assert!(args.driver_path.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "parliament_ids",
            "--type",
            "attendance",
            "--full",
            "--no-cache",
            "--driver",
            "connect",
            "--driver-path",
            "/usr/bin/chromium",
        ])
        .unwrap();
        assert_eq!(args.kind, EntityKind::Attendance);
        assert!(args.full);
        assert!(args.no_cache);
        assert_eq!(args.driver, DriverKind::Connect);
        assert_eq!(args.driver_path, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn test_unknown_driver_is_rejected() {
        let result = Args::try_parse_from(["parliament_ids", "--type", "mp", "--driver", "phantomjs"]);
        assert!(result.is_err());

        let args = Args::try_parse_from(["parliament_ids", "--type", "mp", "--driver", "Headed"]).unwrap();
        assert_eq!(args.driver, DriverKind::Headed);
    }

    #[test]
    fn test_type_is_required_and_closed() {
        assert!(Args::try_parse_from(["parliament_ids"]).is_err());
        assert!(Args::try_parse_from(["parliament_ids", "--type", "committee"]).is_err());
    }
}
