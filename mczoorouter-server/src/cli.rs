use clap::Parser;
use std::path::PathBuf;

use mczoorouter_types::{SettingsError, SyncSettings};

/// Every flag can also be set through a `MCZOOROUTER_*` environment variable.
#[derive(Parser, Debug)]
#[command(
    name = "mczoorouter",
    about = "Configure mcrouter based on a Zookeeper Finagle ServerSet",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct Cli {
    #[arg(
        long,
        env = "MCZOOROUTER_ZOOKEEPER",
        required = true,
        num_args = 1..,
        value_delimiter = ',',
        help = "Zookeeper hosts (host:port, comma separated or repeated)"
    )]
    pub zookeeper: Vec<String>,

    #[arg(long, env = "MCZOOROUTER_ROLE", help = "Memcache Aurora Role")]
    pub role: String,

    #[arg(long, env = "MCZOOROUTER_ENV", help = "Memcache Aurora Environment")]
    pub env: String,

    #[arg(long, env = "MCZOOROUTER_JOB", help = "Memcache Aurora Job")]
    pub job: String,

    #[arg(long, env = "MCZOOROUTER_MCROUTER_CONFIG_FILE", help = "mcrouter configuration file")]
    pub mcrouter_config_file: PathBuf,

    #[arg(short, long, env = "MCZOOROUTER_VERBOSE", help = "Verbose output")]
    pub verbose: bool,

    #[arg(short, long, env = "MCZOOROUTER_DEBUG", help = "Debug output")]
    pub debug: bool,
}

impl Cli {
    pub fn settings(&self) -> Result<SyncSettings, SettingsError> {
        SyncSettings::new(
            self.zookeeper.clone(),
            self.role.clone(),
            self.env.clone(),
            self.job.clone(),
            self.mcrouter_config_file.clone(),
        )
    }
}

/// Exit status for a failed parse: 0 for `--help`/`--version`, 1 for usage errors.
pub fn parse_exit_code(e: &clap::Error) -> u8 {
    if e.use_stderr() {
        1
    } else {
        0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mczoorouter").chain(args.iter().copied()))
    }

    const REQUIRED: &[&str] = &[
        "--zookeeper",
        "zk1:2181,zk2:2181",
        "--role",
        "www-data",
        "--env",
        "prod",
        "--job",
        "memcached",
        "--mcrouter-config-file",
        "/etc/mcrouter/mcrouter.json",
    ];

    #[test]
    fn test_parse_required_flags() {
        let cli = parse(REQUIRED).unwrap();
        assert_eq!(cli.zookeeper, vec!["zk1:2181", "zk2:2181"]);
        assert!(!cli.verbose && !cli.debug);

        let settings = cli.settings().unwrap();
        assert_eq!(settings.serverset_path(), "/aurora/jobs/www-data/prod/memcached");
        assert_eq!(settings.output_path, PathBuf::from("/etc/mcrouter/mcrouter.json"));
    }

    #[test]
    fn test_missing_output_file_is_an_error() {
        let args: Vec<&str> = REQUIRED[..8].to_vec();
        assert!(parse(&args).is_err());
    }

    #[test]
    fn test_short_flags() {
        let mut args = REQUIRED.to_vec();
        args.extend(["-v", "-d"]);
        let cli = parse(&args).unwrap();
        assert!(cli.verbose && cli.debug);
    }

    #[test]
    fn test_parse_exit_codes() {
        let missing = parse(&REQUIRED[..8]).unwrap_err();
        assert_eq!(parse_exit_code(&missing), 1);

        let help = parse(&["--help"]).unwrap_err();
        assert_eq!(parse_exit_code(&help), 0);

        let version = parse(&["--version"]).unwrap_err();
        assert_eq!(parse_exit_code(&version), 0);
    }
}
