use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "textlens=warn";
const VERBOSE_FILTER: &str = "textlens=info";

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` wins when set and valid; otherwise `--verbose` picks `info`
/// and the default is `warn`.
pub fn init(verbose: bool, json: bool) {
    let default_level = default_filter(verbose);
    // Fall back to the default filter if the variable is unset or invalid
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        eprintln!("textlens: failed to initialize logging: {}", e);
    }
}

/// Filter directive used when `RUST_LOG` is unset or invalid.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}
