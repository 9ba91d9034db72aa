use serde_yaml::Value;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the global `fmt` subscriber on stderr.
///
/// `RUST_LOG` wins over the document's `logging` section. Calling this again
/// after a subscriber is installed does nothing.
pub(super) fn init(section: Option<&Value>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(document_directive(section).unwrap_or(DEFAULT_FILTER)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn document_directive(section: Option<&Value>) -> Option<&str> {
    let section = section?;
    ["filter", "level"]
        .into_iter()
        .find_map(|key| section.get(key).and_then(Value::as_str))
}
