use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding a level or a full filter spec.
pub const LOG_ENV: &str = "SHAPEGEN_LOG";

const CRATES: [&str; 3] = ["shapegen_core", "shapegen_cli", "shapegen"];

/// Install the stderr fmt subscriber.
///
/// `SHAPEGEN_LOG` takes "trace", "debug", "info", "warn", "error" (applied to
/// the shapegen crates) or a full tracing filter spec like
/// "shapegen_core=trace,shapegen_cli=info".
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = filter_spec(std::env::var(LOG_ENV).ok().as_deref(), default_level);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn filter_spec(env: Option<&str>, default_level: &str) -> String {
    match env {
        Some(level) if is_plain_level(level) => per_crate(&level.to_ascii_lowercase()),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => per_crate(default_level),
    }
}

fn per_crate(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_level_applies_to_shapegen_crates() {
        assert_eq!(
            filter_spec(Some("DEBUG"), "warn"),
            "shapegen_core=debug,shapegen_cli=debug,shapegen=debug"
        );
    }

    #[test]
    fn test_full_spec_is_passed_through() {
        assert_eq!(
            filter_spec(Some("shapegen_core=trace"), "warn"),
            "shapegen_core=trace"
        );
    }

    #[test]
    fn test_default_level() {
        assert_eq!(
            filter_spec(None, "warn"),
            "shapegen_core=warn,shapegen_cli=warn,shapegen=warn"
        );
        assert_eq!(
            filter_spec(Some("  "), "debug"),
            "shapegen_core=debug,shapegen_cli=debug,shapegen=debug"
        );
    }
}
