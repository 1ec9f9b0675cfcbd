//! Log subscriber setup.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

const WORKSPACE_TARGETS: &[&str] = &["mczoorouter", "mczoorouter_core", "mczoorouter_types"];

/// Filter directives for the given flags. `--debug` wins over `--verbose`.
pub fn directives(verbose: bool, debug: bool) -> String {
    let level = if debug {
        "trace"
    } else if verbose {
        "debug"
    } else {
        return "info".to_string();
    };

    std::iter::once("info".to_string())
        .chain(WORKSPACE_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. `RUST_LOG` overrides the flags.
pub fn init(verbose: bool, debug: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives(verbose, debug)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("setting default subscriber failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_info() {
        assert_eq!(directives(false, false), "info");
    }

    #[test]
    fn test_verbose_and_debug_levels() {
        assert_eq!(
            directives(true, false),
            "info,mczoorouter=debug,mczoorouter_core=debug,mczoorouter_types=debug"
        );
        assert!(directives(true, true).contains("mczoorouter_core=trace"));
    }
}
