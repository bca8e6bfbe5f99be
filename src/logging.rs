use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

/// This crate at `info`, dependencies (rbook, html2md) only when they warn.
const DEFAULT_DIRECTIVES: &str = "daily_reading=info,warn";

/// Installs the stderr subscriber for the binary. `RUST_LOG` replaces the
/// default directives when set.
pub fn init() -> anyhow::Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string());
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("parse log directives {directives:?}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("install log subscriber: {err}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVES).is_ok());
    }
}
