use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variables holding a filter directive, first one set wins.
const LOG_ENV_VARS: [&str; 2] = ["CAPTURE_LOAD_LOG", "RUST_LOG"];

/// Installs the global tracing subscriber on stderr so the campaign report on
/// stdout stays readable. A second call only reports the failure.
pub fn init_logging(verbose: bool) {
    let directive = LOG_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(build_filter(directive.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

/// `directive` when it parses, otherwise `debug` for verbose runs and `info`
/// for the rest.
fn build_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    directive
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false);
        init_logging(true);
    }

    #[test]
    fn filter_prefers_directive_then_verbosity() -> Result<(), String> {
        let cases = [
            (Some("capture_load=trace"), false, "capture_load=trace"),
            (None, false, "info"),
            (None, true, "debug"),
            (Some("capture_load=loudest"), true, "debug"),
        ];
        for (directive, verbose, expected) in cases {
            let filter = build_filter(directive, verbose).to_string();
            if !filter.contains(expected) {
                return Err(format!(
                    "{:?}/{} gave '{}', expected '{}'",
                    directive, verbose, filter, expected
                ));
            }
        }
        Ok(())
    }
}
